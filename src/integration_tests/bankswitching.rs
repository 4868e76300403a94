use crate::{
    cartridge::{CartType, Cartridge},
    settings::Settings,
    system::System,
};

fn rom(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn with_code(mut image: Vec<u8>, at: usize, code: &[u8]) -> Vec<u8> {
    image[at..at + code.len()].copy_from_slice(code);
    image
}

fn boot(image: &[u8]) -> System {
    let cartridge = Cartridge::new(CartType::Auto, image, "synthetic", &Settings::default()).unwrap();
    let mut system = System::new();
    system.attach(cartridge);
    system.reset();
    system
}

fn cart_type(system: &System) -> CartType {
    system.cartridge().unwrap().cart_type()
}

fn window(system: &mut System) -> Vec<u8> {
    (0x1000..0x2000).map(|address| system.inspect(address)).collect()
}

#[test]
fn test_2k_image_fills_the_window() {
    let image = rom(0x0800);
    let mut system = boot(&image);

    assert_eq!(CartType::Rom2K, cart_type(&system));
    let window = window(&mut system);
    assert_eq!(image[..], window[..0x0800]);
    assert_eq!(image[..], window[0x0800..]);
}

#[test]
fn test_e0_program() {
    // STA $1FE0
    let image = with_code(rom(0x2000), 0x0100, &[0x8D, 0xE0, 0x1F]);
    let mut system = boot(&image);
    assert_eq!(CartType::E0, cart_type(&system));

    // The fixed segment holds the code that switches the others
    assert_eq!(image[0x1FFC], system.peek(0x1FFC));

    system.poke(0x1FE1, 0);
    system.peek(0x1FEA);
    system.peek(0x1FF3);
    assert_eq!(image[0x0400..0x0800], window(&mut system)[..0x0400]);
    assert_eq!(image[0x0810], system.peek(0x1410));
    assert_eq!(image[0x0C20], system.peek(0x1820));
}

#[test]
fn test_tigervision_program() {
    // STA $3F twice
    let image = with_code(rom(0x4000), 0x0010, &[0x85, 0x3F, 0xEA, 0x85, 0x3F]);
    let mut system = boot(&image);
    assert_eq!(CartType::Tigervision, cart_type(&system));
    assert_eq!(8, system.cartridge().unwrap().bank_count());

    let last_bank = window(&mut system)[0x0800..].to_vec();
    assert_eq!(image[0x3800..], last_bank[..]);

    for bank in 0..8 {
        system.poke(0x003F, bank);
        let offset = bank as usize * 0x0800;
        assert_eq!(image[offset + 0x0123], system.peek(0x1123));
        assert_eq!(last_bank[0x0123], system.peek(0x1923));
    }
}

#[test]
fn test_ua_program() {
    // LDA $240
    let image = with_code(rom(0x2000), 0x0200, &[0xAD, 0x40, 0x02]);
    let mut system = boot(&image);
    assert_eq!(CartType::UA, cart_type(&system));

    system.peek(0x0240);
    assert_eq!(image[0x1000..], window(&mut system)[..]);
    system.peek(0x0220);
    assert_eq!(image[..0x1000], window(&mut system)[..]);
}

#[test]
fn test_superchip_program() {
    let mut image = rom(0x10000);
    for bank in image.chunks_mut(0x1000) {
        bank[..0x100].fill(0xFF);
    }
    let mut system = boot(&image);
    assert_eq!(CartType::EFSC, cart_type(&system));
    assert_eq!(1, system.cartridge().unwrap().current_bank());

    for offset in 0..0x80 {
        system.poke(0x1000 + offset, offset as u8);
    }
    system.peek(0x1FEF);
    assert_eq!(15, system.cartridge().unwrap().current_bank());

    // RAM survives bank switches
    for offset in 0..0x80 {
        assert_eq!(offset as u8, system.peek(0x1080 + offset));
    }
    assert_eq!(image[0xF100], system.peek(0x1100));
}

#[test]
fn test_inspecting_a_whole_window_switches_nothing() {
    let image = rom(0x8000);
    let mut system = boot(&image);
    assert_eq!(CartType::F4, cart_type(&system));

    let before = window(&mut system);
    assert_eq!(before, window(&mut system));
    assert_eq!(0, system.cartridge().unwrap().current_bank());
    assert_eq!(image[..0x1000], before[..]);
}

#[test]
fn test_reading_through_the_hotspots() {
    let image = rom(0x8000);
    let mut system = boot(&image);

    // Reading the window from the bottom up ends in the last bank
    for address in 0x1000..0x2000 {
        system.peek(address);
    }
    assert_eq!(7, system.cartridge().unwrap().current_bank());
}
