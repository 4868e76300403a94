#[cfg(test)]
mod unit_tests;

use crate::{
    bus::{DeviceId, DirectSource, PAGE_SIZE, PageAccess, PageAccessType, PageTable},
    device::Device,
};

// 0x0080 - 0x00FF, and again at 0x0180 - 0x01FF where the stack lives
const RAM_START: u16 = 0x0080;
const RAM_MIRROR_START: u16 = 0x0180;
const RAM_SIZE: usize = 0x80;
const ADDR_MASK: u16 = 0x007F;

pub struct ConsoleRam {
    memory: [u8; RAM_SIZE],
}

impl ConsoleRam {
    pub fn new() -> Self {
        Self {
            memory: [0; RAM_SIZE],
        }
    }

    #[cfg(test)]
    pub fn raw(&mut self) -> &mut [u8; RAM_SIZE] {
        &mut self.memory
    }
}

impl Default for ConsoleRam {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for ConsoleRam {
    fn name(&self) -> &str {
        "console RAM"
    }

    fn install(&mut self, pages: &mut PageTable) {
        for start in [RAM_START, RAM_MIRROR_START] {
            for addr in (start..start + RAM_SIZE as u16).step_by(PAGE_SIZE as usize) {
                let offset = (addr & ADDR_MASK) as usize;
                pages.set_page_access(
                    addr,
                    PageAccess::new(DeviceId::ConsoleRam, PageAccessType::READWRITE)
                        .with_direct(Some(DirectSource::Ram(offset))),
                );
            }
        }
    }

    fn reset(&mut self, _pages: &mut PageTable) {
        self.memory = [0; RAM_SIZE];
    }

    fn peek(&mut self, _pages: &mut PageTable, address: u16, _data_bus: u8) -> u8 {
        self.memory[(address & ADDR_MASK) as usize]
    }

    fn poke(&mut self, _pages: &mut PageTable, address: u16, value: u8) -> bool {
        self.memory[(address & ADDR_MASK) as usize] = value;
        true
    }

    fn peek_direct(&self, source: DirectSource) -> Option<u8> {
        match source {
            DirectSource::Ram(offset) => self.memory.get(offset).copied(),
            DirectSource::Rom(_) => None,
        }
    }

    fn poke_direct(&mut self, source: DirectSource, value: u8) -> bool {
        match source {
            DirectSource::Ram(offset) => match self.memory.get_mut(offset) {
                Some(cell) => {
                    *cell = value;
                    true
                }
                None => false,
            },
            DirectSource::Rom(_) => false,
        }
    }
}
