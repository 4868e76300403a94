use rand::{SeedableRng, rngs::StdRng};

use crate::cartridge::ram_overlay::{RamOverlay, RamPorts};

#[test]
fn test_shared_ports() {
    let mut ram = RamOverlay::new(128, RamPorts::Shared);

    assert_eq!(0..128, ram.write_port());
    assert_eq!(0..128, ram.read_port());
    assert_eq!(128, ram.extent());

    ram.write(0x1005, 0x42);
    assert_eq!(0x42, ram.read(0x1005));
    assert_eq!(0x42, ram.read(0x1085));
}

#[test]
fn test_split_ports() {
    let ram = RamOverlay::new(256, RamPorts::Split);

    assert_eq!(0..256, ram.write_port());
    assert_eq!(256..512, ram.read_port());
    assert_eq!(512, ram.extent());
    assert_eq!(ram.offset(0x1010), ram.offset(0x1110));
}

#[test]
fn test_no_ram() {
    let ram = RamOverlay::new(0, RamPorts::Shared);

    assert!(!ram.is_present());
    assert_eq!(0, ram.extent());
    assert!(ram.write_port().is_empty());
    assert!(ram.read_port().is_empty());
}

#[test]
fn test_restore_requires_exact_size() {
    let mut ram = RamOverlay::new(128, RamPorts::Split);

    assert!(!ram.restore(&[0; 127]));
    assert!(ram.restore(&[7; 128]));
    assert_eq!(&[7; 128][..], ram.bytes());
}

#[test]
fn test_initialize() {
    let mut ram = RamOverlay::new(128, RamPorts::Split);
    let mut rng = StdRng::seed_from_u64(1);
    ram.initialize(Some(&mut rng));
    assert!(ram.bytes().iter().any(|&b| b != 0));

    ram.initialize(None);
    assert!(ram.bytes().iter().all(|&b| b == 0));
}
