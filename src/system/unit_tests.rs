use crate::{
    cartridge::{CartType, Cartridge},
    settings::Settings,
    system::System,
};

fn rom(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 253) as u8 ^ (i >> 11) as u8).collect()
}

fn with_cartridge(cart_type: CartType, image: &[u8]) -> System {
    let mut system = System::new();
    let cartridge = Cartridge::new(cart_type, image, "test", &Settings::default()).unwrap();
    system.attach(cartridge);
    system
}

fn current_bank(system: &System) -> u16 {
    system.cartridge().unwrap().current_bank()
}

#[test]
fn test_console_ram_is_mirrored() {
    let mut system = System::new();

    assert!(system.poke(0x0080, 0x12));
    assert!(system.poke(0x01FF, 0x34));
    assert_eq!(0x12, system.peek(0x0180));
    assert_eq!(0x34, system.peek(0x00FF));
    assert_eq!(0x12, system.peek(0x2080));
}

#[test]
fn test_unmapped_reads_return_data_bus() {
    let mut system = System::new();

    system.poke(0x0081, 0x5C);
    assert_eq!(0x5C, system.peek(0x0081));
    assert_eq!(0x5C, system.peek(0x1000));
    assert_eq!(0x5C, system.data_bus());
    assert!(!system.poke(0x0300, 0x77));
    assert_eq!(0x77, system.peek(0x0300));
}

#[test]
fn test_cartridge_reads() {
    let image = rom(0x2000);
    let mut system = with_cartridge(CartType::F8, &image);

    assert_eq!(1, current_bank(&system));
    assert_eq!(image[0x1000], system.peek(0x1000));
    assert_eq!(image[0x1FFC], system.peek(0xFFFC));
}

#[test]
fn test_hotspots_through_the_bus() {
    let image = rom(0x2000);
    let mut system = with_cartridge(CartType::F8, &image);

    assert_eq!(image[0x0FF8], system.peek(0x1FF8));
    assert_eq!(0, current_bank(&system));
    assert_eq!(image[0x0123], system.peek(0x1123));

    assert!(!system.poke(0x1FF9, 0));
    assert_eq!(1, current_bank(&system));
    assert_eq!(image[0x1123], system.peek(0x1123));
}

#[test]
fn test_inspect_has_no_side_effects() {
    let mut system = with_cartridge(CartType::F8SC, &rom(0x2000));
    system.poke(0x1000, 0x66);
    system.peek(0x0080);
    let data_bus = system.data_bus();

    system.inspect(0x1FF8);
    assert_eq!(1, current_bank(&system));

    system.inspect(0x1000);
    assert_eq!(0x66, system.peek(0x1080));

    system.peek(0x0080);
    system.inspect(0x1000);
    assert_eq!(data_bus, system.data_bus());
    assert!(!system.cartridge().unwrap().hotspots_locked());
}

#[test]
fn test_superchip_through_the_bus() {
    let image = rom(0x2000);
    let mut system = with_cartridge(CartType::F8SC, &image);

    assert!(system.poke(0x1010, 0xA5));
    assert_eq!(0xA5, system.peek(0x1090));
    assert!(!system.poke(0x1090, 0x00));
    assert_eq!(0xA5, system.peek(0x1090));

    // The data bus holds the last value read when the write port is read
    system.peek(0x0080);
    assert_eq!(0x00, system.peek(0x1010));
    assert_eq!(0x00, system.peek(0x1090));
}

#[test]
fn test_cartridge_mut_rebanks_pages() {
    let image = rom(0x4000);
    let mut system = with_cartridge(CartType::F6, &image);

    let (cartridge, pages) = system.cartridge_mut().unwrap();
    cartridge.bank(pages, 3, 0).unwrap();

    assert_eq!(image[0x3000], system.peek(0x1000));
    assert_eq!(image[0x3F00], system.peek(0x1F00));
}

#[test]
fn test_tigervision_through_the_bus() {
    let image = rom(0x2000);
    let mut system = with_cartridge(CartType::Tigervision, &image);

    assert_eq!(image[0x1800], system.peek(0x1800));
    system.poke(0x003F, 1);
    assert_eq!(image[0x0800], system.peek(0x1000));
    assert_eq!(image[0x1800], system.peek(0x1800));

    system.peek(0x003F);
    assert_eq!(1, current_bank(&system));
}

#[test]
fn test_ua_through_the_bus() {
    let image = rom(0x2000);
    let mut system = with_cartridge(CartType::UA, &image);

    system.peek(0x0240);
    assert_eq!(image[0x1000], system.peek(0x1000));
    system.poke(0x0220, 0);
    assert_eq!(image[0x0000], system.peek(0x1000));

    // Console RAM is untouched by the hotspot pages
    system.poke(0x0080, 9);
    assert_eq!(9, system.peek(0x0080));
}

#[test]
fn test_reset() {
    let mut system = with_cartridge(CartType::F8SC, &rom(0x2000));
    system.poke(0x0080, 1);
    system.poke(0x1000, 2);
    system.peek(0x1FF8);

    system.reset();

    assert_eq!(0, system.peek(0x0080));
    assert_eq!(0, system.peek(0x1080));
    assert_eq!(1, current_bank(&system));
}

#[test]
fn test_detach() {
    let mut system = with_cartridge(CartType::UA, &rom(0x2000));
    system.poke(0x0080, 0x42);

    let cartridge = system.detach().unwrap();
    assert_eq!(CartType::UA, cartridge.cart_type());
    assert!(system.cartridge().is_none());
    assert!(system.detach().is_none());

    system.poke(0x00FE, 0x10);
    assert_eq!(0x10, system.peek(0x1000));
    assert_eq!(0x42, system.peek(0x0080));
    assert!(!system.poke(0x0240, 0));
}
