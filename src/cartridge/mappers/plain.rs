use crate::{
    bus::PageTable,
    cartridge::{cart_core::CartridgeCore, mappers::BankSwitch},
};

/**
 * 2K and 4K carts: one bank, nothing to switch.
 */
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Plain {}

impl BankSwitch for Plain {
    fn check_switch_bank(
        &mut self,
        _core: &mut CartridgeCore,
        _pages: &mut PageTable,
        _address: u16,
        _value: u8,
    ) -> bool {
        false
    }
}
