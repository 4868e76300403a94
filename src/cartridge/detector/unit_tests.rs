use crate::cartridge::{CartType, CartridgeError, detector::detect};

// Every byte distinct from its neighbours so no bank looks like SuperChip
fn noise(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i * 7 + i / 256) as u8).collect()
}

fn with_signature(mut image: Vec<u8>, at: usize, signature: &[u8]) -> Vec<u8> {
    image[at..at + signature.len()].copy_from_slice(signature);
    image
}

fn with_superchip_banks(mut image: Vec<u8>) -> Vec<u8> {
    for bank in image.chunks_mut(0x1000) {
        bank[..256].fill(0xFF);
    }
    image
}

#[test]
fn test_small_sizes() {
    assert_eq!(CartType::Rom2K, detect(&noise(0x0800)).unwrap());
    assert_eq!(CartType::Rom2K, detect(&noise(0x0200)).unwrap());
    assert_eq!(CartType::Rom4K, detect(&noise(0x1000)).unwrap());
}

#[test]
fn test_standard_sizes() {
    assert_eq!(CartType::F8, detect(&noise(0x2000)).unwrap());
    assert_eq!(CartType::FA, detect(&noise(0x3000)).unwrap());
    assert_eq!(CartType::F6, detect(&noise(0x4000)).unwrap());
    assert_eq!(CartType::F4, detect(&noise(0x8000)).unwrap());
    assert_eq!(CartType::EF, detect(&noise(0x10000)).unwrap());
}

#[test]
fn test_superchip() {
    assert_eq!(
        CartType::F8SC,
        detect(&with_superchip_banks(noise(0x2000))).unwrap()
    );
    assert_eq!(
        CartType::F6SC,
        detect(&with_superchip_banks(noise(0x4000))).unwrap()
    );
    assert_eq!(
        CartType::F4SC,
        detect(&with_superchip_banks(noise(0x8000))).unwrap()
    );
    assert_eq!(
        CartType::EFSC,
        detect(&with_superchip_banks(noise(0x10000))).unwrap()
    );
}

#[test]
fn test_8k_signatures() {
    let e0 = with_signature(noise(0x2000), 0x0100, &[0x8D, 0xE0, 0x1F]);
    assert_eq!(CartType::E0, detect(&e0).unwrap());

    let tigervision = with_signature(noise(0x2000), 0x0100, &[0x85, 0x3F]);
    let tigervision = with_signature(tigervision, 0x0400, &[0x85, 0x3F]);
    assert_eq!(CartType::Tigervision, detect(&tigervision).unwrap());

    let ua = with_signature(noise(0x2000), 0x0100, &[0x8D, 0x40, 0x02]);
    assert_eq!(CartType::UA, detect(&ua).unwrap());
}

#[test]
fn test_one_3f_store_is_not_enough() {
    let image = with_signature(noise(0x2000), 0x0100, &[0x85, 0x3F]);
    assert_eq!(CartType::F8, detect(&image).unwrap());
}

#[test]
fn test_large_tigervision() {
    let image = with_signature(noise(0x20000), 0x0100, &[0x85, 0x3F]);
    let image = with_signature(image, 0x0200, &[0x85, 0x3F]);
    assert_eq!(CartType::Tigervision, detect(&image).unwrap());
}

#[test]
fn test_unrecognized() {
    assert!(matches!(detect(&[]), Err(CartridgeError::EmptyImage)));
    assert!(matches!(
        detect(&noise(0x1800)),
        Err(CartridgeError::UnrecognizedSize(0x1800))
    ));
    assert!(matches!(
        detect(&noise(0x20000)),
        Err(CartridgeError::UnrecognizedSize(0x20000))
    ));
}
