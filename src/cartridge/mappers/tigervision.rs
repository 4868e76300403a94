use crate::{
    bus::{DeviceId, PageAccess, PageAccessType, PageTable},
    cartridge::{cart_core::CartridgeCore, mappers::BankSwitch},
};

const HOTSPOT_END: u16 = 0x003F;

/**
 * 3F: two 2K segments. Writing to any TIA address up to 0x3F selects the
 * bank shown in the first segment; the second always shows the last bank.
 */
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Tigervision {}

impl BankSwitch for Tigervision {
    fn check_switch_bank(
        &mut self,
        core: &mut CartridgeCore,
        pages: &mut PageTable,
        address: u16,
        value: u8,
    ) -> bool {
        if address > HOTSPOT_END {
            return false;
        }
        let bank = value as u16 % core.bank_count();
        let _ = core.bank(pages, bank, 0);
        true
    }

    fn hotspots_on_peek(&self) -> bool {
        false
    }

    fn initial_bank(&self, segment: u16, start_bank: u16, bank_count: u16) -> u16 {
        if segment == 0 {
            start_bank
        } else {
            bank_count - 1
        }
    }

    fn install_hotspots(&self, pages: &mut PageTable) {
        pages.set_page_access(
            0x0000,
            PageAccess::new(DeviceId::Cartridge, PageAccessType::WRITE),
        );
    }
}
