use crate::{
    bus::{DeviceId, DirectSource, PageTable},
    device::Device,
    ram::ConsoleRam,
};

#[test]
fn test_install_maps_both_mirrors() {
    let mut ram = ConsoleRam::new();
    let mut pages = PageTable::new();
    ram.install(&mut pages);

    assert_eq!(
        Some(DirectSource::Ram(0x00)),
        pages.read_entry(0x0080).direct
    );
    assert_eq!(
        Some(DirectSource::Ram(0x40)),
        pages.read_entry(0x00C0).direct
    );
    assert_eq!(
        Some(DirectSource::Ram(0x00)),
        pages.write_entry(0x0180).direct
    );
    assert_eq!(DeviceId::None, pages.read_entry(0x0000).device);
    assert_eq!(DeviceId::None, pages.read_entry(0x0100).device);
}

#[test]
fn test_peek_and_poke() {
    let mut ram = ConsoleRam::new();
    let mut pages = PageTable::new();

    assert!(ram.poke(&mut pages, 0x0085, 0x42));
    assert_eq!(0x42, ram.peek(&mut pages, 0x0185, 0));
    assert_eq!(0x42, ram.raw()[5]);

    assert!(ram.poke_direct(DirectSource::Ram(0x7F), 0x99));
    assert_eq!(Some(0x99), ram.peek_direct(DirectSource::Ram(0x7F)));
    assert_eq!(None, ram.peek_direct(DirectSource::Ram(0x80)));
    assert_eq!(None, ram.peek_direct(DirectSource::Rom(0)));
}

#[test]
fn test_reset_clears() {
    let mut ram = ConsoleRam::new();
    let mut pages = PageTable::new();
    ram.poke(&mut pages, 0x0080, 1);
    ram.reset(&mut pages);

    assert_eq!(0, ram.peek(&mut pages, 0x0080, 0xFF));
}
