#[cfg(test)]
mod unit_tests;

// The 6507 only brings out 13 address lines
pub const ADDRESS_MASK: u16 = 0x1FFF;

pub const PAGE_SHIFT: u16 = 6;
pub const PAGE_SIZE: u16 = 1 << PAGE_SHIFT;
pub const PAGE_MASK: u16 = PAGE_SIZE - 1;
pub const NUM_PAGES: usize = (ADDRESS_MASK as usize + 1) >> PAGE_SHIFT;

bitflags::bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct PageAccessType: u8 {
        const READ = 0b00000001;
        const WRITE = 0b00000010;
        const READWRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DeviceId {
    None,
    ConsoleRam,
    Cartridge,
}

/**
 * Where a page's bytes live inside the owning device, so the system can
 * serve the access without calling back into the device.
 * The offset is that of the first byte of the page.
 */
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DirectSource {
    Rom(usize),
    Ram(usize),
}

impl DirectSource {
    pub fn offset(self, address: u16) -> Self {
        let in_page = (address & PAGE_MASK) as usize;
        match self {
            DirectSource::Rom(base) => DirectSource::Rom(base + in_page),
            DirectSource::Ram(base) => DirectSource::Ram(base + in_page),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PageEntry {
    pub device: DeviceId,
    pub direct: Option<DirectSource>,
}

impl PageEntry {
    pub const UNMAPPED: Self = Self {
        device: DeviceId::None,
        direct: None,
    };
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PageAccess {
    pub device: DeviceId,
    pub access_type: PageAccessType,
    pub direct: Option<DirectSource>,
}

impl PageAccess {
    pub fn new(device: DeviceId, access_type: PageAccessType) -> Self {
        Self {
            device,
            access_type,
            direct: None,
        }
    }

    pub fn with_direct(mut self, direct: Option<DirectSource>) -> Self {
        self.direct = direct;
        self
    }
}

pub struct PageTable {
    read: [PageEntry; NUM_PAGES],
    write: [PageEntry; NUM_PAGES],
}

impl PageTable {
    pub fn new() -> Self {
        Self {
            read: [PageEntry::UNMAPPED; NUM_PAGES],
            write: [PageEntry::UNMAPPED; NUM_PAGES],
        }
    }

    pub fn set_page_access(&mut self, address: u16, access: PageAccess) {
        let page = page_index(address);
        let entry = PageEntry {
            device: access.device,
            direct: access.direct,
        };
        if access.access_type.contains(PageAccessType::READ) {
            self.read[page] = entry;
        }
        if access.access_type.contains(PageAccessType::WRITE) {
            self.write[page] = entry;
        }
    }

    pub fn read_entry(&self, address: u16) -> PageEntry {
        self.read[page_index(address)]
    }

    pub fn write_entry(&self, address: u16) -> PageEntry {
        self.write[page_index(address)]
    }

    pub fn clear(&mut self) {
        self.read = [PageEntry::UNMAPPED; NUM_PAGES];
        self.write = [PageEntry::UNMAPPED; NUM_PAGES];
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}

fn page_index(address: u16) -> usize {
    ((address & ADDRESS_MASK) >> PAGE_SHIFT) as usize
}
