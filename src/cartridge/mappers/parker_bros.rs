use crate::{
    bus::{ADDRESS_MASK, PageTable},
    cartridge::{cart_core::CartridgeCore, mappers::BankSwitch},
};

/**
 * E0: the window is four 1K segments. The first three each have a block of
 * eight hotspots selecting any of the eight banks; the last segment is
 * wired to bank 7.
 */
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ParkerBros {}

impl BankSwitch for ParkerBros {
    fn check_switch_bank(
        &mut self,
        core: &mut CartridgeCore,
        pages: &mut PageTable,
        address: u16,
        _value: u8,
    ) -> bool {
        let segment = match address & ADDRESS_MASK {
            0x1FE0..=0x1FE7 => 0,
            0x1FE8..=0x1FEF => 1,
            0x1FF0..=0x1FF7 => 2,
            _ => return false,
        };
        let _ = core.bank(pages, address & 0x0007, segment);
        true
    }

    fn start_bank(&self) -> u16 {
        4
    }

    fn rom_hotspot(&self) -> u16 {
        0x1FE0
    }

    fn initial_bank(&self, segment: u16, start_bank: u16, bank_count: u16) -> u16 {
        if segment == 3 {
            bank_count - 1
        } else {
            (start_bank + segment) % bank_count
        }
    }
}
