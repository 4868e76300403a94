#[cfg(test)]
mod unit_tests;

use log::{debug, trace};

use crate::{
    bus::{ADDRESS_MASK, DeviceId, DirectSource, PageTable},
    cartridge::Cartridge,
    device::Device,
    ram::ConsoleRam,
};

/**
 * The console side of the bus: decodes every CPU access through the page
 * table, either straight into a device's buffer or by calling the device.
 */
pub struct System {
    pages: PageTable,
    ram: ConsoleRam,
    cartridge: Option<Cartridge>,
    data_bus: u8,
}

impl System {
    pub fn new() -> Self {
        let mut pages = PageTable::new();
        let mut ram = ConsoleRam::new();
        ram.install(&mut pages);

        Self {
            pages,
            ram,
            cartridge: None,
            data_bus: 0,
        }
    }

    /// Plugs in a cartridge, replacing any that was there.
    pub fn attach(&mut self, mut cartridge: Cartridge) {
        self.detach();
        cartridge.install(&mut self.pages);
        debug!("Attached {}", cartridge.about());
        self.cartridge = Some(cartridge);
    }

    pub fn detach(&mut self) -> Option<Cartridge> {
        let cartridge = self.cartridge.take()?;
        self.pages.clear();
        self.ram.install(&mut self.pages);
        debug!("Detached {}", cartridge.about());
        Some(cartridge)
    }

    pub fn reset(&mut self) {
        self.ram.reset(&mut self.pages);
        if let Some(cartridge) = self.cartridge.as_mut() {
            cartridge.reset(&mut self.pages);
        }
        self.data_bus = 0;
    }

    pub fn peek(&mut self, address: u16) -> u8 {
        let address = address & ADDRESS_MASK;
        let entry = self.pages.read_entry(address);

        let direct = entry
            .direct
            .and_then(|source| self.peek_direct(entry.device, source.offset(address)));
        let value = match direct {
            Some(value) => value,
            None => self.dispatch_peek(entry.device, address),
        };

        self.data_bus = value;
        value
    }

    /// Returns true when the write landed somewhere that stores it.
    pub fn poke(&mut self, address: u16, value: u8) -> bool {
        let address = address & ADDRESS_MASK;
        let entry = self.pages.write_entry(address);
        self.data_bus = value;

        if let Some(source) = entry.direct {
            if self.poke_direct(entry.device, source.offset(address), value) {
                return true;
            }
        }

        match entry.device {
            DeviceId::ConsoleRam => self.ram.poke(&mut self.pages, address, value),
            DeviceId::Cartridge => match self.cartridge.as_mut() {
                Some(cartridge) => cartridge.poke(&mut self.pages, address, value),
                None => false,
            },
            DeviceId::None => {
                trace!("Write of {:#04x} to unmapped {:#06x}", value, address);
                false
            }
        }
    }

    /**
     * A read for debuggers: hotspots are locked for the duration, so banks,
     * cartridge RAM and the data bus are left exactly as they were.
     */
    pub fn inspect(&mut self, address: u16) -> u8 {
        let data_bus = self.data_bus;
        if let Some(cartridge) = self.cartridge.as_mut() {
            cartridge.lock_hotspots();
        }

        let value = self.peek(address);

        if let Some(cartridge) = self.cartridge.as_mut() {
            cartridge.unlock_hotspots();
        }
        self.data_bus = data_bus;
        value
    }

    /// The last value driven on the data bus.
    pub fn data_bus(&self) -> u8 {
        self.data_bus
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    /// The cartridge along with the page table its bank operations update.
    pub fn cartridge_mut(&mut self) -> Option<(&mut Cartridge, &mut PageTable)> {
        self.cartridge
            .as_mut()
            .map(|cartridge| (cartridge, &mut self.pages))
    }

    pub fn pages(&self) -> &PageTable {
        &self.pages
    }

    fn dispatch_peek(&mut self, device: DeviceId, address: u16) -> u8 {
        let data_bus = self.data_bus;
        match device {
            DeviceId::ConsoleRam => self.ram.peek(&mut self.pages, address, data_bus),
            DeviceId::Cartridge => match self.cartridge.as_mut() {
                Some(cartridge) => cartridge.peek(&mut self.pages, address, data_bus),
                None => data_bus,
            },
            DeviceId::None => {
                trace!("Read of unmapped {:#06x}", address);
                data_bus
            }
        }
    }

    fn peek_direct(&self, device: DeviceId, source: DirectSource) -> Option<u8> {
        match device {
            DeviceId::ConsoleRam => self.ram.peek_direct(source),
            DeviceId::Cartridge => self.cartridge.as_ref()?.peek_direct(source),
            DeviceId::None => None,
        }
    }

    fn poke_direct(&mut self, device: DeviceId, source: DirectSource, value: u8) -> bool {
        match device {
            DeviceId::ConsoleRam => self.ram.poke_direct(source, value),
            DeviceId::Cartridge => match self.cartridge.as_mut() {
                Some(cartridge) => cartridge.poke_direct(source, value),
                None => false,
            },
            DeviceId::None => false,
        }
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}
