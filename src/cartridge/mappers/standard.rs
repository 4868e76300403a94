use crate::{
    bus::{ADDRESS_MASK, PageTable},
    cartridge::{cart_core::CartridgeCore, mappers::BankSwitch},
};

/**
 * The Atari style schemes (F8, F6, F4, EF and their SuperChip versions) and
 * CBS RAM Plus (FA): a run of consecutive hotspots at the top of the window,
 * one per 4K bank, reacting to both reads and writes.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standard {
    first_hotspot: u16,
    hotspot_count: u16,
    start_bank: u16,
}

impl Standard {
    pub fn new(first_hotspot: u16, hotspot_count: u16, start_bank: u16) -> Self {
        Self {
            first_hotspot,
            hotspot_count,
            start_bank,
        }
    }

    pub fn f8() -> Self {
        Self::new(0x1FF8, 2, 1)
    }

    pub fn f6() -> Self {
        Self::new(0x1FF6, 4, 0)
    }

    pub fn f4() -> Self {
        Self::new(0x1FF4, 8, 0)
    }

    pub fn ef() -> Self {
        Self::new(0x1FE0, 16, 1)
    }

    pub fn fa() -> Self {
        Self::new(0x1FF8, 3, 2)
    }
}

impl BankSwitch for Standard {
    fn check_switch_bank(
        &mut self,
        core: &mut CartridgeCore,
        pages: &mut PageTable,
        address: u16,
        _value: u8,
    ) -> bool {
        let address = address & ADDRESS_MASK;
        if !(self.first_hotspot..self.first_hotspot + self.hotspot_count).contains(&address) {
            return false;
        }
        // A rejected switch (locked, or an undersized image) is still a hotspot hit
        let _ = core.bank(pages, address - self.first_hotspot, 0);
        true
    }

    fn start_bank(&self) -> u16 {
        self.start_bank
    }

    fn rom_hotspot(&self) -> u16 {
        self.first_hotspot
    }
}
