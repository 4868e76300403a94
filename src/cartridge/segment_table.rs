#[cfg(test)]
mod unit_tests;

use super::{ROM_MASK, ROM_SIZE};

/**
 * Tracks which bank each segment of the 4K cartridge window currently shows.
 * Segment sizes are powers of two, so addresses decompose by masking.
 */
pub struct SegmentTable {
    bank_shift: u16,
    bank_size: u16,
    bank_mask: u16,
    bank_count: u16,
    offsets: Vec<usize>,
}

impl SegmentTable {
    pub fn new(bank_shift: u16, mapped_len: usize) -> Self {
        let bank_size = 1 << bank_shift;
        let bank_segs = ROM_SIZE >> bank_shift;
        Self {
            bank_shift,
            bank_size,
            bank_mask: bank_size - 1,
            bank_count: (mapped_len >> bank_shift) as u16,
            offsets: vec![0; bank_segs as usize],
        }
    }

    pub fn bank_size(&self) -> u16 {
        self.bank_size
    }

    pub fn bank_mask(&self) -> u16 {
        self.bank_mask
    }

    pub fn bank_count(&self) -> u16 {
        self.bank_count
    }

    pub fn bank_segs(&self) -> u16 {
        self.offsets.len() as u16
    }

    pub fn segment_of(&self, address: u16) -> u16 {
        (address & ROM_MASK) >> self.bank_shift
    }

    /// Window-relative address of the first byte of a segment.
    pub fn segment_base(&self, segment: u16) -> u16 {
        segment << self.bank_shift
    }

    /// Returns the new image offset of the segment.
    pub fn map(&mut self, bank: u16, segment: u16) -> usize {
        let offset = (bank as usize) << self.bank_shift;
        self.offsets[segment as usize] = offset;
        offset
    }

    pub fn bank(&self, segment: u16) -> u16 {
        (self.offsets[segment as usize] >> self.bank_shift) as u16
    }

    pub fn image_offset(&self, address: u16) -> usize {
        self.offsets[self.segment_of(address) as usize] + (address & self.bank_mask) as usize
    }
}
