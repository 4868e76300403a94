use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::{
    bus::PageTable,
    cartridge::{CartType, Cartridge},
    device::Device,
    settings::Settings,
};

#[test]
fn test_names() {
    for cart_type in CartType::iter() {
        let name = cart_type.to_string();
        assert_eq!(cart_type, CartType::from_str(&name).unwrap());
        assert_eq!(cart_type, CartType::from_str(&name.to_lowercase()).unwrap());
    }
    assert_eq!(CartType::Tigervision, CartType::from_str("3F").unwrap());
    assert_eq!(CartType::Rom4K, CartType::from_str("4k").unwrap());
    assert!(CartType::from_str("F9").is_err());
}

#[test]
fn test_every_scheme_fills_the_window() {
    for cart_type in CartType::iter().filter(|&cart_type| cart_type != CartType::Auto) {
        let size = match cart_type {
            CartType::Rom2K => 0x0800,
            CartType::Tigervision => 0x2000,
            cart_type => cart_type.expected_size().unwrap(),
        };
        let image = vec![0xEA; size];

        let mut cart = Cartridge::new(cart_type, &image, "", &Settings::default()).unwrap();
        let mut pages = PageTable::new();
        cart.install(&mut pages);

        assert_eq!(0x1000, cart.bank_segs() * cart.bank_size(), "{}", cart_type);
        assert!(cart.start_bank() < cart.bank_count(), "{}", cart_type);
        assert_eq!(cart_type, cart.cart_type());
    }
}

#[test]
fn test_ram_sizes() {
    assert_eq!(0, CartType::F8.layout().ram_size);
    assert_eq!(128, CartType::F8SC.layout().ram_size);
    assert_eq!(128, CartType::EFSC.layout().ram_size);
    assert_eq!(256, CartType::FA.layout().ram_size);
    assert_eq!(10, CartType::E0.layout().bank_shift);
    assert_eq!(11, CartType::Tigervision.layout().bank_shift);
}
