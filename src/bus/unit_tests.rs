use crate::bus::{DeviceId, DirectSource, PageAccess, PageAccessType, PageEntry, PageTable};

#[test]
fn test_read_and_write_entries_are_independent() {
    let mut pages = PageTable::new();

    pages.set_page_access(
        0x1000,
        PageAccess::new(DeviceId::Cartridge, PageAccessType::WRITE),
    );

    assert_eq!(PageEntry::UNMAPPED, pages.read_entry(0x1000));
    assert_eq!(DeviceId::Cartridge, pages.write_entry(0x1000).device);

    pages.set_page_access(
        0x1000,
        PageAccess::new(DeviceId::Cartridge, PageAccessType::READ)
            .with_direct(Some(DirectSource::Rom(0x0800))),
    );

    assert_eq!(
        Some(DirectSource::Rom(0x0800)),
        pages.read_entry(0x1000).direct
    );
    assert_eq!(None, pages.write_entry(0x1000).direct);
}

#[test]
fn test_pages_are_64_bytes_and_mirror_above_13_bits() {
    let mut pages = PageTable::new();
    pages.set_page_access(
        0x1FC0,
        PageAccess::new(DeviceId::Cartridge, PageAccessType::READWRITE),
    );

    assert_eq!(DeviceId::Cartridge, pages.read_entry(0x1FC0).device);
    assert_eq!(DeviceId::Cartridge, pages.read_entry(0x1FFF).device);
    assert_eq!(DeviceId::Cartridge, pages.read_entry(0xFFF8).device);
    assert_eq!(DeviceId::None, pages.read_entry(0x1FBF).device);
}

#[test]
fn test_direct_source_offset() {
    assert_eq!(DirectSource::Rom(0x1010), DirectSource::Rom(0x1000).offset(0x1F50));
    assert_eq!(DirectSource::Ram(0x3F), DirectSource::Ram(0).offset(0x10BF));
}

#[test]
fn test_clear() {
    let mut pages = PageTable::new();
    pages.set_page_access(
        0x0080,
        PageAccess::new(DeviceId::ConsoleRam, PageAccessType::READWRITE),
    );
    pages.clear();

    assert_eq!(PageEntry::UNMAPPED, pages.read_entry(0x0080));
    assert_eq!(PageEntry::UNMAPPED, pages.write_entry(0x0080));
}
