#[cfg(test)]
mod unit_tests;

use strum_macros::{Display, EnumIter, EnumString};

use super::{
    mappers::{
        Layout, Mapper, parker_bros::ParkerBros, plain::Plain, standard::Standard,
        tigervision::Tigervision, ua::Ua,
    },
    ram_overlay::RamPorts,
};

const SUPERCHIP_RAM: u16 = 128;
const CBS_RAM: u16 = 256;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum CartType {
    #[strum(serialize = "AUTO")]
    Auto,
    #[strum(serialize = "2K")]
    Rom2K,
    #[strum(serialize = "4K")]
    Rom4K,
    F8,
    F8SC,
    F6,
    F6SC,
    F4,
    F4SC,
    EF,
    EFSC,
    FA,
    E0,
    #[strum(serialize = "3F")]
    Tigervision,
    UA,
    UASW,
}

impl CartType {
    pub fn layout(self) -> Layout {
        let layout = Layout::default();
        match self {
            CartType::F8SC | CartType::F6SC | CartType::F4SC | CartType::EFSC => {
                layout.with_ram(SUPERCHIP_RAM, RamPorts::Split)
            }
            CartType::FA => layout.with_ram(CBS_RAM, RamPorts::Split),
            CartType::E0 => layout.with_bank_shift(10),
            CartType::Tigervision => layout.with_bank_shift(11),
            _ => layout,
        }
    }

    pub fn mapper(self) -> Mapper {
        match self {
            CartType::Auto | CartType::Rom2K | CartType::Rom4K => Mapper::Plain(Plain::default()),
            CartType::F8 | CartType::F8SC => Mapper::Standard(Standard::f8()),
            CartType::F6 | CartType::F6SC => Mapper::Standard(Standard::f6()),
            CartType::F4 | CartType::F4SC => Mapper::Standard(Standard::f4()),
            CartType::EF | CartType::EFSC => Mapper::Standard(Standard::ef()),
            CartType::FA => Mapper::Standard(Standard::fa()),
            CartType::E0 => Mapper::ParkerBros(ParkerBros::default()),
            CartType::Tigervision => Mapper::Tigervision(Tigervision::default()),
            CartType::UA => Mapper::Ua(Ua::new(false)),
            CartType::UASW => Mapper::Ua(Ua::new(true)),
        }
    }

    /// The image size the scheme was built for, where there is only one.
    pub fn expected_size(self) -> Option<usize> {
        match self {
            CartType::Rom4K => Some(0x1000),
            CartType::F8 | CartType::F8SC | CartType::E0 | CartType::UA | CartType::UASW => {
                Some(0x2000)
            }
            CartType::FA => Some(0x3000),
            CartType::F6 | CartType::F6SC => Some(0x4000),
            CartType::F4 | CartType::F4SC => Some(0x8000),
            CartType::EF | CartType::EFSC => Some(0x10000),
            CartType::Auto | CartType::Rom2K | CartType::Tigervision => None,
        }
    }
}
