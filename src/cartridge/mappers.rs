
pub mod parker_bros;
pub mod plain;
pub mod standard;
pub mod tigervision;
pub mod ua;

use crate::bus::PageTable;

use super::{cart_core::CartridgeCore, ram_overlay::RamPorts};

use self::{
    parker_bros::ParkerBros, plain::Plain, standard::Standard, tigervision::Tigervision, ua::Ua,
};

/**
 * How a scheme carves up the 4K cartridge window.
 */
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Layout {
    /// Segment size is 2^bank_shift bytes
    pub bank_shift: u16,
    pub ram_size: u16,
    pub ram_ports: RamPorts,
    /// Serve ROM pages straight from the image instead of calling peek()
    pub direct_peek: bool,
}

impl Layout {
    pub const fn with_bank_shift(mut self, bank_shift: u16) -> Self {
        self.bank_shift = bank_shift;
        self
    }

    pub const fn with_ram(mut self, ram_size: u16, ram_ports: RamPorts) -> Self {
        self.ram_size = ram_size;
        self.ram_ports = ram_ports;
        self
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            bank_shift: 12,
            ram_size: 0,
            ram_ports: RamPorts::Shared,
            direct_peek: true,
        }
    }
}

pub trait BankSwitch {
    /// Switches banks if `address` is one of the scheme's hotspots. `value` is
    /// the byte written, or 0 for reads. Returns true when a hotspot was hit.
    fn check_switch_bank(
        &mut self,
        core: &mut CartridgeCore,
        pages: &mut PageTable,
        address: u16,
        value: u8,
    ) -> bool;

    fn start_bank(&self) -> u16 {
        0
    }

    /// Lowest hotspot in ROM space, or 0 when there isn't a single one.
    fn rom_hotspot(&self) -> u16 {
        0
    }

    /// Hotspots that sit in the TIA's range only react to writes.
    fn hotspots_on_peek(&self) -> bool {
        true
    }

    fn initial_bank(&self, _segment: u16, start_bank: u16, _bank_count: u16) -> u16 {
        start_bank
    }

    /// Claims any hotspot pages outside the cartridge window.
    fn install_hotspots(&self, _pages: &mut PageTable) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mapper {
    Plain(Plain),
    Standard(Standard),
    ParkerBros(ParkerBros),
    Tigervision(Tigervision),
    Ua(Ua),
}

#[rustfmt::skip]
impl BankSwitch for Mapper {
    fn check_switch_bank(
        &mut self,
        core: &mut CartridgeCore,
        pages: &mut PageTable,
        address: u16,
        value: u8,
    ) -> bool {
        match self {
            Mapper::Plain(m)       => m.check_switch_bank(core, pages, address, value),
            Mapper::Standard(m)    => m.check_switch_bank(core, pages, address, value),
            Mapper::ParkerBros(m)  => m.check_switch_bank(core, pages, address, value),
            Mapper::Tigervision(m) => m.check_switch_bank(core, pages, address, value),
            Mapper::Ua(m)          => m.check_switch_bank(core, pages, address, value),
        }
    }

    fn start_bank(&self) -> u16 {
        match self {
            Mapper::Plain(m)       => m.start_bank(),
            Mapper::Standard(m)    => m.start_bank(),
            Mapper::ParkerBros(m)  => m.start_bank(),
            Mapper::Tigervision(m) => m.start_bank(),
            Mapper::Ua(m)          => m.start_bank(),
        }
    }

    fn rom_hotspot(&self) -> u16 {
        match self {
            Mapper::Plain(m)       => m.rom_hotspot(),
            Mapper::Standard(m)    => m.rom_hotspot(),
            Mapper::ParkerBros(m)  => m.rom_hotspot(),
            Mapper::Tigervision(m) => m.rom_hotspot(),
            Mapper::Ua(m)          => m.rom_hotspot(),
        }
    }

    fn hotspots_on_peek(&self) -> bool {
        match self {
            Mapper::Plain(m)       => m.hotspots_on_peek(),
            Mapper::Standard(m)    => m.hotspots_on_peek(),
            Mapper::ParkerBros(m)  => m.hotspots_on_peek(),
            Mapper::Tigervision(m) => m.hotspots_on_peek(),
            Mapper::Ua(m)          => m.hotspots_on_peek(),
        }
    }

    fn initial_bank(&self, segment: u16, start_bank: u16, bank_count: u16) -> u16 {
        match self {
            Mapper::Plain(m)       => m.initial_bank(segment, start_bank, bank_count),
            Mapper::Standard(m)    => m.initial_bank(segment, start_bank, bank_count),
            Mapper::ParkerBros(m)  => m.initial_bank(segment, start_bank, bank_count),
            Mapper::Tigervision(m) => m.initial_bank(segment, start_bank, bank_count),
            Mapper::Ua(m)          => m.initial_bank(segment, start_bank, bank_count),
        }
    }

    fn install_hotspots(&self, pages: &mut PageTable) {
        match self {
            Mapper::Plain(m)       => m.install_hotspots(pages),
            Mapper::Standard(m)    => m.install_hotspots(pages),
            Mapper::ParkerBros(m)  => m.install_hotspots(pages),
            Mapper::Tigervision(m) => m.install_hotspots(pages),
            Mapper::Ua(m)          => m.install_hotspots(pages),
        }
    }
}
