#![allow(clippy::upper_case_acronyms)]

pub mod bus;
pub mod cartridge;
pub mod device;
pub mod ram;
pub mod settings;
pub mod system;
