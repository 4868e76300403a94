use crate::bus::{DirectSource, PageTable};

pub trait Device {
    fn name(&self) -> &str;

    /// Claim pages of the address space.
    fn install(&mut self, pages: &mut PageTable);

    fn reset(&mut self, pages: &mut PageTable);

    fn peek(&mut self, pages: &mut PageTable, address: u16, data_bus: u8) -> u8;

    /// Returns true when the access changed the device's address space.
    fn poke(&mut self, pages: &mut PageTable, address: u16, value: u8) -> bool;

    fn peek_direct(&self, source: DirectSource) -> Option<u8>;

    fn poke_direct(&mut self, source: DirectSource, value: u8) -> bool;
}
