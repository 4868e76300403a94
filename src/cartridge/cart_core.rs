use log::trace;

use crate::bus::{DeviceId, DirectSource, PAGE_MASK, PAGE_SIZE, PageAccess, PageAccessType, PageTable};

use super::{
    BankError, CartridgeError, PatchError, ROM_MASK, ROM_OFFSET, ROM_SIZE,
    image::Image,
    mappers::Layout,
    ram_overlay::{RamOverlay, RamPorts},
    segment_table::SegmentTable,
};

// Segments must cover whole pages
const MIN_BANK_SHIFT: u16 = 6;
const MAX_BANK_SHIFT: u16 = 12;

/**
 * The bank switching machinery shared by every scheme: the ROM image, the
 * segment table and the optional RAM overlay. Schemes drive it through
 * `bank()`; everything else is address routing.
 */
pub struct CartridgeCore {
    pub(super) image: Image,
    pub(super) segments: SegmentTable,
    pub(super) ram: RamOverlay,
    direct_peek: bool,
    rom_hotspot: u16,
    hotspot_locks: u8,
    bank_changed: bool,
}

impl CartridgeCore {
    pub fn new(image: &[u8], layout: &Layout, rom_hotspot: u16) -> Result<Self, CartridgeError> {
        if !(MIN_BANK_SHIFT..=MAX_BANK_SHIFT).contains(&layout.bank_shift) {
            return Err(CartridgeError::BadBankShift(layout.bank_shift));
        }

        let ram = RamOverlay::new(layout.ram_size, layout.ram_ports);
        let bank_size = 1u16 << layout.bank_shift;
        if (layout.ram_size != 0 && !layout.ram_size.is_power_of_two())
            || ram.extent() & PAGE_MASK != 0
            || ram.extent() > bank_size
        {
            return Err(CartridgeError::BadRamSize(layout.ram_size));
        }

        let image = Image::new(image, bank_size as usize);
        // Bank numbers are u16 everywhere, including save states
        if u16::try_from(image.mapped_len() >> layout.bank_shift).is_err() {
            return Err(CartridgeError::TooManyBanks(image.mapped_len()));
        }
        let segments = SegmentTable::new(layout.bank_shift, image.mapped_len());

        Ok(Self {
            image,
            segments,
            ram,
            direct_peek: layout.direct_peek,
            rom_hotspot,
            hotspot_locks: 0,
            bank_changed: false,
        })
    }

    pub fn bank(&mut self, pages: &mut PageTable, bank: u16, segment: u16) -> Result<(), BankError> {
        if self.hotspots_locked() {
            trace!("Ignoring switch to bank {} in segment {} while locked", bank, segment);
            return Err(BankError::Locked);
        }
        self.map_bank(pages, bank, segment)
    }

    /// Like `bank()` but ignores hotspot locks; used by reset and state loading.
    pub(super) fn map_bank(
        &mut self,
        pages: &mut PageTable,
        bank: u16,
        segment: u16,
    ) -> Result<(), BankError> {
        let bank_segs = self.segments.bank_segs();
        if segment >= bank_segs {
            return Err(BankError::NoSuchSegment {
                segment,
                count: bank_segs,
            });
        }
        let bank_count = self.segments.bank_count();
        if bank >= bank_count {
            trace!("Rejecting bank {} of {}", bank, bank_count);
            return Err(BankError::OutOfRange {
                bank,
                count: bank_count,
            });
        }

        let bank_offset = self.segments.map(bank, segment);
        self.install_segment(pages, segment, bank_offset);
        trace!("Segment {} now shows bank {}", segment, bank);

        self.bank_changed = true;
        Ok(())
    }

    pub fn get_bank(&self, address: u16) -> u16 {
        self.segments.bank(self.segments.segment_of(address))
    }

    pub fn bank_count(&self) -> u16 {
        self.segments.bank_count()
    }

    pub fn lock_hotspots(&mut self) {
        self.hotspot_locks = self.hotspot_locks.saturating_add(1);
    }

    pub fn unlock_hotspots(&mut self) {
        self.hotspot_locks = self.hotspot_locks.saturating_sub(1);
    }

    pub fn hotspots_locked(&self) -> bool {
        self.hotspot_locks > 0
    }

    pub fn take_bank_changed(&mut self) -> bool {
        std::mem::take(&mut self.bank_changed)
    }

    /// Claims the whole 4K window for dispatch and maps the RAM ports.
    /// ROM pages get their direct sources when banks are mapped.
    pub fn install(&self, pages: &mut PageTable) {
        for addr in (ROM_OFFSET..ROM_OFFSET + ROM_SIZE).step_by(PAGE_SIZE as usize) {
            pages.set_page_access(
                addr,
                PageAccess::new(DeviceId::Cartridge, PageAccessType::READWRITE),
            );
        }

        if !self.ram.is_present() {
            return;
        }

        let ports = match self.ram.ports() {
            RamPorts::Shared => vec![(self.ram.write_port(), PageAccessType::READWRITE)],
            RamPorts::Split => vec![
                (self.ram.write_port(), PageAccessType::WRITE),
                (self.ram.read_port(), PageAccessType::READ),
            ],
        };
        for (port, access_type) in ports {
            for addr in port.step_by(PAGE_SIZE as usize) {
                let addr = ROM_OFFSET + addr;
                let direct = self
                    .direct_for_page(addr)
                    .then(|| DirectSource::Ram(self.ram.offset(addr)));
                pages.set_page_access(
                    addr,
                    PageAccess::new(DeviceId::Cartridge, access_type).with_direct(direct),
                );
            }
        }
    }

    fn install_segment(&self, pages: &mut PageTable, segment: u16, bank_offset: usize) {
        let base = ROM_OFFSET + self.segments.segment_base(segment);
        // RAM only ever lives in the first segment
        let from = if segment == 0 {
            base + self.ram.extent()
        } else {
            base
        };
        let to = base + self.segments.bank_size();

        for addr in (from..to).step_by(PAGE_SIZE as usize) {
            let direct = self.direct_for_page(addr).then(|| {
                DirectSource::Rom(bank_offset + (addr & self.segments.bank_mask()) as usize)
            });
            pages.set_page_access(
                addr,
                PageAccess::new(DeviceId::Cartridge, PageAccessType::READ).with_direct(direct),
            );
        }
    }

    // The page holding the ROM hotspot must always reach peek()/poke()
    fn direct_for_page(&self, page: u16) -> bool {
        if !self.direct_peek {
            return false;
        }
        self.rom_hotspot & ROM_OFFSET == 0 || (self.rom_hotspot & !PAGE_MASK) != (page & !PAGE_MASK)
    }

    pub fn read(&mut self, address: u16, data_bus: u8) -> u8 {
        // Hotspot pages outside the window have nothing to return
        if address & ROM_OFFSET == 0 {
            return data_bus;
        }

        let address = address & ROM_MASK;
        if self.ram.is_present() {
            if self.ram.read_port().contains(&address) {
                return self.ram.read(address);
            }
            if self.ram.write_port().contains(&address) {
                // Reading the write port latches whatever is on the bus
                if !self.hotspots_locked() {
                    self.ram.write(address, data_bus);
                }
                return self.ram.read(address);
            }
        }

        self.image
            .get(self.segments.image_offset(address))
            .unwrap_or(data_bus)
    }

    pub fn write(&mut self, address: u16, value: u8) -> bool {
        if !self.ram.is_present() || address & ROM_OFFSET == 0 {
            return false;
        }

        let address = address & ROM_MASK;
        if self.ram.write_port().contains(&address) {
            self.ram.write(address, value);
            true
        } else {
            false
        }
    }

    pub fn patch(&mut self, address: u16, value: u8) -> Result<(), PatchError> {
        if address & ROM_OFFSET == 0 {
            return Err(PatchError::OutsideWindow(address));
        }

        let window_address = address & ROM_MASK;
        if window_address < self.ram.extent() {
            // Patching ignores the read/write port split
            self.ram.write(window_address, value);
        } else if !self
            .image
            .patch(self.segments.image_offset(window_address), value)
        {
            return Err(PatchError::OutsideImage(address));
        }

        self.bank_changed = true;
        Ok(())
    }

    pub fn peek_direct(&self, source: DirectSource) -> Option<u8> {
        match source {
            DirectSource::Rom(offset) => self.image.get(offset),
            DirectSource::Ram(offset) => self.ram.get(offset),
        }
    }

    pub fn poke_direct(&mut self, source: DirectSource, value: u8) -> bool {
        match source {
            DirectSource::Rom(_) => false,
            DirectSource::Ram(offset) => match self.ram.get_mut(offset) {
                Some(cell) => {
                    *cell = value;
                    true
                }
                None => false,
            },
        }
    }
}
