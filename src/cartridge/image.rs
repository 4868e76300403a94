
use log::warn;

/**
 * The ROM image. Images are padded up to a whole number of banks:
 * power-of-two images smaller than one bank are mirrored to fill it
 * (the upper address lines are not connected), anything else is padded
 * with zeros.
 */
pub struct Image {
    data: Box<[u8]>,
    size: usize,
    mirrored: bool,
}

impl Image {
    pub fn new(image: &[u8], bank_size: usize) -> Self {
        let size = image.len();
        let padded = size.div_ceil(bank_size).max(1) * bank_size;
        let mirrored = size < bank_size && size.is_power_of_two();

        let mut data = vec![0; padded];
        if mirrored {
            for chunk in data.chunks_mut(size) {
                chunk.copy_from_slice(image);
            }
        } else {
            data[..size].copy_from_slice(image);
            if padded != size {
                warn!(
                    "ROM size {:#x} is not a multiple of the {:#x} byte bank size, padding to {:#x}",
                    size, bank_size, padded
                );
            }
        }

        Self {
            data: data.into_boxed_slice(),
            size,
            mirrored,
        }
    }

    /// The image as it was supplied, without padding.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.size]
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Length including padding; always a whole number of banks.
    pub fn mapped_len(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    /// Padding past the end of a non-mirrored image can't be patched.
    pub fn patch(&mut self, offset: usize, value: u8) -> bool {
        let limit = if self.mirrored {
            self.data.len()
        } else {
            self.size
        };
        if offset >= limit {
            return false;
        }
        if self.mirrored {
            let base = offset % self.size;
            for mirror in (base..self.data.len()).step_by(self.size) {
                self.data[mirror] = value;
            }
        } else {
            self.data[offset] = value;
        }
        true
    }
}
