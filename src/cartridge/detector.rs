#[cfg(test)]
mod unit_tests;

use log::info;

use super::{CartType, CartridgeError};

const SUPERCHIP_RAM_SIZE: usize = 128;
const BANK_SIZE_4K: usize = 0x1000;
const MAX_3F_SIZE: usize = 0x80000;

// STA $1FE0, STA $5FE0, STA $FFE9, NOP $1FE0, LDA $1FE0, LDA $FFE9, LDA $FFED, LDA $BFF3
const E0_SIGNATURES: [[u8; 3]; 8] = [
    [0x8D, 0xE0, 0x1F],
    [0x8D, 0xE0, 0x5F],
    [0x8D, 0xE9, 0xFF],
    [0x0C, 0xE0, 0x1F],
    [0xAD, 0xE0, 0x1F],
    [0xAD, 0xE9, 0xFF],
    [0xAD, 0xED, 0xFF],
    [0xAD, 0xF3, 0xBF],
];

// STA $3F
const TIGERVISION_SIGNATURE: [u8; 2] = [0x85, 0x3F];

// STA $240, LDA $240, LDA $21F,X
const UA_SIGNATURES: [[u8; 3]; 3] = [[0x8D, 0x40, 0x02], [0xAD, 0x40, 0x02], [0xBD, 0x1F, 0x02]];

// NOP $FFE0, LDA $FFE0, NOP $1FE0, LDA $1FE0
const EF_SIGNATURES: [[u8; 3]; 4] = [
    [0x0C, 0xE0, 0xFF],
    [0xAD, 0xE0, 0xFF],
    [0x0C, 0xE0, 0x1F],
    [0xAD, 0xE0, 0x1F],
];

/**
 * Guesses the bankswitching scheme of a ROM from its size and from the code
 * typically found in games using each scheme.
 */
pub fn detect(image: &[u8]) -> Result<CartType, CartridgeError> {
    let size = image.len();
    let cart_type = match size {
        0 => return Err(CartridgeError::EmptyImage),
        1..=0x0800 => CartType::Rom2K,
        0x1000 => CartType::Rom4K,
        0x2000 => {
            if is_probably_superchip(image) {
                CartType::F8SC
            } else if is_probably_e0(image) {
                CartType::E0
            } else if is_probably_3f(image) {
                CartType::Tigervision
            } else if is_probably_ua(image) {
                CartType::UA
            } else {
                CartType::F8
            }
        }
        0x3000 => CartType::FA,
        0x4000 => {
            if is_probably_superchip(image) {
                CartType::F6SC
            } else if is_probably_3f(image) {
                CartType::Tigervision
            } else {
                CartType::F6
            }
        }
        0x8000 => {
            if is_probably_superchip(image) {
                CartType::F4SC
            } else if is_probably_3f(image) {
                CartType::Tigervision
            } else {
                CartType::F4
            }
        }
        0x10000 => {
            if is_probably_superchip(image) {
                CartType::EFSC
            } else if is_probably_3f(image) && !is_probably_ef(image) {
                CartType::Tigervision
            } else {
                CartType::EF
            }
        }
        _ if size % 0x0800 == 0 && size <= MAX_3F_SIZE && is_probably_3f(image) => {
            CartType::Tigervision
        }
        _ => return Err(CartridgeError::UnrecognizedSize(size)),
    };

    info!("Detected {} for a {:#x} byte image", cart_type, size);
    Ok(cart_type)
}

/// SuperChip RAM reads back as the same garbage on both ports, so dumps
/// repeat the first 128 bytes of every 4K bank.
fn is_probably_superchip(image: &[u8]) -> bool {
    image.chunks(BANK_SIZE_4K).all(|bank| {
        bank.len() >= 2 * SUPERCHIP_RAM_SIZE
            && bank[..SUPERCHIP_RAM_SIZE] == bank[SUPERCHIP_RAM_SIZE..2 * SUPERCHIP_RAM_SIZE]
    })
}

fn is_probably_e0(image: &[u8]) -> bool {
    E0_SIGNATURES
        .iter()
        .any(|signature| search_for_bytes(image, signature, 1))
}

fn is_probably_3f(image: &[u8]) -> bool {
    search_for_bytes(image, &TIGERVISION_SIGNATURE, 2)
}

fn is_probably_ua(image: &[u8]) -> bool {
    UA_SIGNATURES
        .iter()
        .any(|signature| search_for_bytes(image, signature, 1))
}

fn is_probably_ef(image: &[u8]) -> bool {
    EF_SIGNATURES
        .iter()
        .any(|signature| search_for_bytes(image, signature, 1))
}

fn search_for_bytes(image: &[u8], signature: &[u8], min_hits: usize) -> bool {
    image
        .windows(signature.len())
        .filter(|window| *window == signature)
        .take(min_hits)
        .count()
        == min_hits
}
