#[cfg(test)]
mod unit_tests;

use std::ops::Range;

use rand::{Rng, rngs::StdRng};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RamPorts {
    /// One range at the bottom of the window serves both reads and writes.
    Shared,
    /// Writes go to the bottom `size` bytes, reads come from the next `size`.
    Split,
}

/**
 * Extra RAM carried on the cartridge, mapped at the bottom of the first
 * segment. All ranges are relative to the start of the cartridge window.
 */
pub struct RamOverlay {
    memory: Vec<u8>,
    mask: u16,
    ports: RamPorts,
}

impl RamOverlay {
    pub fn new(size: u16, ports: RamPorts) -> Self {
        debug_assert!(size == 0 || size.is_power_of_two());
        Self {
            memory: vec![0; size as usize],
            mask: size.saturating_sub(1),
            ports,
        }
    }

    pub fn size(&self) -> u16 {
        self.memory.len() as u16
    }

    pub fn is_present(&self) -> bool {
        !self.memory.is_empty()
    }

    pub fn ports(&self) -> RamPorts {
        self.ports
    }

    pub fn write_port(&self) -> Range<u16> {
        0..self.size()
    }

    pub fn read_port(&self) -> Range<u16> {
        match self.ports {
            RamPorts::Shared => 0..self.size(),
            RamPorts::Split => self.size()..self.size() * 2,
        }
    }

    /// Number of window bytes taken away from ROM.
    pub fn extent(&self) -> u16 {
        match self.ports {
            RamPorts::Shared => self.size(),
            RamPorts::Split => self.size() * 2,
        }
    }

    pub fn offset(&self, address: u16) -> usize {
        (address & self.mask) as usize
    }

    pub fn read(&self, address: u16) -> u8 {
        self.memory[self.offset(address)]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        let offset = self.offset(address);
        self.memory[offset] = value;
    }

    pub fn get(&self, offset: usize) -> Option<u8> {
        self.memory.get(offset).copied()
    }

    pub fn get_mut(&mut self, offset: usize) -> Option<&mut u8> {
        self.memory.get_mut(offset)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.memory
    }

    pub fn restore(&mut self, bytes: &[u8]) -> bool {
        if bytes.len() != self.memory.len() {
            return false;
        }
        self.memory.copy_from_slice(bytes);
        true
    }

    pub fn initialize(&mut self, rng: Option<&mut StdRng>) {
        match rng {
            Some(rng) => rng.fill(&mut self.memory[..]),
            None => self.memory.fill(0),
        }
    }
}
