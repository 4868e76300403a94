use crate::{
    bus::{DeviceId, PageAccess, PageAccessType, PageTable},
    cartridge::{cart_core::CartridgeCore, mappers::BankSwitch},
};

const HOTSPOT_MASK: u16 = 0x1260;
const HOTSPOT_LOW: u16 = 0x0220;
const HOTSPOT_HIGH: u16 = 0x0240;

/**
 * UA Ltd: two 4K banks selected by any access to 0x0220 or 0x0240.
 * Some boards have the two hotspots swapped.
 */
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Ua {
    swapped: bool,
}

impl Ua {
    pub fn new(swapped: bool) -> Self {
        Self { swapped }
    }
}

impl BankSwitch for Ua {
    fn check_switch_bank(
        &mut self,
        core: &mut CartridgeCore,
        pages: &mut PageTable,
        address: u16,
        _value: u8,
    ) -> bool {
        let bank = match address & HOTSPOT_MASK {
            HOTSPOT_LOW => 0,
            HOTSPOT_HIGH => 1,
            _ => return false,
        };
        let bank = if self.swapped { bank ^ 1 } else { bank };
        let _ = core.bank(pages, bank, 0);
        true
    }

    fn install_hotspots(&self, pages: &mut PageTable) {
        for hotspot in [HOTSPOT_LOW, HOTSPOT_HIGH] {
            pages.set_page_access(
                hotspot,
                PageAccess::new(DeviceId::Cartridge, PageAccessType::READWRITE),
            );
        }
    }
}
