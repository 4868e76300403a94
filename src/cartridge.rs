mod cart_type;
mod cart_core;
mod detector;
mod image;
mod mappers;
mod ram_overlay;
mod segment_table;


use std::{
    fs::File,
    io::{BufReader, Read, Write},
    path::Path,
};

use anyhow::{Context, Result};
use bincode::error::{DecodeError, EncodeError};
use log::{debug, info, warn};
use rand::{Rng, rngs::StdRng};
use thiserror::Error;

use crate::{
    bus::{ADDRESS_MASK, DirectSource, PageTable},
    device::Device,
    settings::Settings,
};

pub use self::{
    cart_type::CartType,
    detector::detect,
    mappers::{BankSwitch, Layout, Mapper},
    ram_overlay::RamPorts,
};

use self::cart_core::CartridgeCore;

// The cartridge answers whenever A12 is set
pub const ROM_OFFSET: u16 = 0x1000;
pub const ROM_MASK: u16 = 0x0FFF;
pub const ROM_SIZE: u16 = 0x1000;

#[derive(bincode::Encode, bincode::Decode)]
struct CartState {
    banks: Vec<u16>,
    ram: Vec<u8>,
    start_bank: u16,
}

pub struct Cartridge {
    core: CartridgeCore,
    mapper: Mapper,
    cart_type: CartType,
    md5: String,
    settings: Settings,
    start_bank: u16,
    rng: StdRng,
}

impl Cartridge {
    /**
     * Builds a cartridge of the given type; `CartType::Auto` detects it
     * from the image.
     */
    pub fn new(
        cart_type: CartType,
        image: &[u8],
        md5: &str,
        settings: &Settings,
    ) -> Result<Self, CartridgeError> {
        let cart_type = match cart_type {
            CartType::Auto => detect(image)?,
            cart_type => cart_type,
        };
        if let Some(expected) = cart_type.expected_size() {
            if expected != image.len() {
                warn!(
                    "{} expects a {:#x} byte image, got {:#x}",
                    cart_type,
                    expected,
                    image.len()
                );
            }
        }

        let mut cartridge = Self::with_layout(
            cart_type.mapper(),
            cart_type.layout(),
            image,
            md5,
            settings,
        )?;
        cartridge.cart_type = cart_type;
        info!("Created {}", cartridge.about());
        Ok(cartridge)
    }

    /// A cartridge with an explicit scheme and window layout.
    pub fn with_layout(
        mapper: Mapper,
        layout: Layout,
        image: &[u8],
        md5: &str,
        settings: &Settings,
    ) -> Result<Self, CartridgeError> {
        let core = CartridgeCore::new(image, &layout, mapper.rom_hotspot())?;
        let mut rng = settings.rng();
        let start_bank = resolve_start_bank(&mapper, &core, settings, &mut rng);

        Ok(Self {
            core,
            mapper,
            cart_type: CartType::Auto,
            md5: md5.to_string(),
            settings: settings.clone(),
            start_bank,
            rng,
        })
    }

    pub fn from_file<P: AsRef<Path>>(
        path: P,
        cart_type: CartType,
        md5: Option<&str>,
        settings: &Settings,
    ) -> Result<Cartridge> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

        let mut image = Vec::new();
        BufReader::new(file)
            .read_to_end(&mut image)
            .with_context(|| format!("reading {}", path.display()))?;

        let label = match md5 {
            Some(md5) => md5.to_string(),
            None => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        let cartridge = Cartridge::new(cart_type, &image, &label, settings)
            .with_context(|| format!("loading {}", path.display()))?;
        Ok(cartridge)
    }

    pub fn cart_type(&self) -> CartType {
        self.cart_type
    }

    pub fn md5(&self) -> &str {
        &self.md5
    }

    pub fn about(&self) -> String {
        let mut about = format!(
            "{} ({}K, {} x {} byte banks",
            self.cart_type,
            self.core.image.size() / 1024,
            self.bank_count(),
            self.bank_size()
        );
        if self.ram_size() > 0 {
            about.push_str(&format!(", {} bytes RAM", self.ram_size()));
        }
        about.push(')');
        about
    }

    /// The ROM exactly as supplied.
    pub fn image(&self) -> &[u8] {
        self.core.image.bytes()
    }

    pub fn bank(&mut self, pages: &mut PageTable, bank: u16, segment: u16) -> Result<(), BankError> {
        self.core.bank(pages, bank, segment)
    }

    /// Which bank the segment holding `address` shows.
    pub fn get_bank(&self, address: u16) -> u16 {
        self.core.get_bank(address)
    }

    pub fn current_bank(&self) -> u16 {
        self.core.get_bank(ROM_OFFSET)
    }

    pub fn segment_bank(&self, segment: u16) -> u16 {
        self.core.segments.bank(segment % self.bank_segs())
    }

    pub fn bank_count(&self) -> u16 {
        self.core.bank_count()
    }

    pub fn bank_segs(&self) -> u16 {
        self.core.segments.bank_segs()
    }

    pub fn bank_size(&self) -> u16 {
        self.core.segments.bank_size()
    }

    pub fn ram_size(&self) -> u16 {
        self.core.ram.size()
    }

    pub fn start_bank(&self) -> u16 {
        self.start_bank
    }

    pub fn rom_hotspot(&self) -> Option<u16> {
        match self.mapper.rom_hotspot() {
            0 => None,
            hotspot => Some(hotspot),
        }
    }

    pub fn patch(&mut self, address: u16, value: u8) -> Result<(), PatchError> {
        self.core.patch(address, value)?;
        debug!("Patched {:#06x} with {:#04x}", address, value);
        Ok(())
    }

    pub fn lock_hotspots(&mut self) {
        self.core.lock_hotspots();
    }

    pub fn unlock_hotspots(&mut self) {
        self.core.unlock_hotspots();
    }

    pub fn hotspots_locked(&self) -> bool {
        self.core.hotspots_locked()
    }

    /// True once after any bank switch or patch.
    pub fn take_bank_changed(&mut self) -> bool {
        self.core.take_bank_changed()
    }

    pub fn save<W: Write>(&self, out: &mut W) -> Result<(), StateError> {
        let state = CartState {
            banks: (0..self.bank_segs())
                .map(|segment| self.core.segments.bank(segment))
                .collect(),
            ram: self.core.ram.bytes().to_vec(),
            start_bank: self.start_bank,
        };
        bincode::encode_into_std_write(&state, out, bincode::config::standard())?;
        Ok(())
    }

    /**
     * Restores a state written by `save()`. The state is validated in full
     * before anything is applied, so a rejected state leaves the cartridge
     * as it was.
     */
    pub fn load<R: Read>(&mut self, pages: &mut PageTable, input: &mut R) -> Result<(), StateError> {
        let state: CartState = bincode::decode_from_std_read(input, bincode::config::standard())
            .inspect_err(|error| warn!("Rejecting cartridge state: {}", error))?;

        self.validate(&state)
            .inspect_err(|error| warn!("Rejecting cartridge state: {}", error))?;

        for (segment, &bank) in state.banks.iter().enumerate() {
            self.core.map_bank(pages, bank, segment as u16)?;
        }
        self.core.ram.restore(&state.ram);
        self.start_bank = state.start_bank;
        Ok(())
    }

    fn validate(&self, state: &CartState) -> Result<(), StateError> {
        if state.banks.len() != self.bank_segs() as usize {
            return Err(StateError::SegmentCount {
                expected: self.bank_segs() as usize,
                found: state.banks.len(),
            });
        }
        if state.ram.len() != self.ram_size() as usize {
            return Err(StateError::RamSize {
                expected: self.ram_size() as usize,
                found: state.ram.len(),
            });
        }
        let count = self.bank_count();
        if let Some(&bank) = state
            .banks
            .iter()
            .chain(std::iter::once(&state.start_bank))
            .find(|&&bank| bank >= count)
        {
            return Err(StateError::BankOutOfRange { bank, count });
        }
        Ok(())
    }

    fn map_initial_banks(&mut self, pages: &mut PageTable) {
        let bank_count = self.bank_count();
        for segment in 0..self.bank_segs() {
            let bank = self
                .mapper
                .initial_bank(segment, self.start_bank, bank_count);
            if let Err(error) = self.core.map_bank(pages, bank, segment) {
                warn!("Couldn't map segment {} at power up: {}", segment, error);
            }
        }
    }
}

impl Device for Cartridge {
    fn name(&self) -> &str {
        "cartridge"
    }

    fn install(&mut self, pages: &mut PageTable) {
        self.core.install(pages);
        self.mapper.install_hotspots(pages);
        self.map_initial_banks(pages);
    }

    fn reset(&mut self, pages: &mut PageTable) {
        let rng = self.settings.random_ram.then_some(&mut self.rng);
        self.core.ram.initialize(rng);
        self.start_bank = resolve_start_bank(&self.mapper, &self.core, &self.settings, &mut self.rng);
        self.map_initial_banks(pages);
    }

    fn peek(&mut self, pages: &mut PageTable, address: u16, data_bus: u8) -> u8 {
        let Cartridge { core, mapper, .. } = self;
        if mapper.hotspots_on_peek() {
            mapper.check_switch_bank(core, pages, address & ADDRESS_MASK, 0);
        }
        core.read(address, data_bus)
    }

    fn poke(&mut self, pages: &mut PageTable, address: u16, value: u8) -> bool {
        let Cartridge { core, mapper, .. } = self;
        if mapper.check_switch_bank(core, pages, address & ADDRESS_MASK, value) {
            return false;
        }
        core.write(address, value)
    }

    fn peek_direct(&self, source: DirectSource) -> Option<u8> {
        self.core.peek_direct(source)
    }

    fn poke_direct(&mut self, source: DirectSource, value: u8) -> bool {
        self.core.poke_direct(source, value)
    }
}

fn resolve_start_bank(
    mapper: &Mapper,
    core: &CartridgeCore,
    settings: &Settings,
    rng: &mut StdRng,
) -> u16 {
    let bank_count = core.bank_count();
    if settings.random_start_bank {
        rng.gen_range(0..bank_count)
    } else if let Some(bank) = settings.start_bank {
        bank % bank_count
    } else {
        mapper.start_bank().min(bank_count - 1)
    }
}

#[derive(Error, Debug)]
pub enum CartridgeError {
    #[error("The ROM image is empty")]
    EmptyImage,
    #[error("No bankswitching scheme fits a ROM of {0:#x} bytes")]
    UnrecognizedSize(usize),
    #[error("Segments of 2^{0} bytes aren't supported")]
    BadBankShift(u16),
    #[error("{0} bytes of cartridge RAM don't fit the first segment")]
    BadRamSize(u16),
    #[error("A ROM of {0:#x} bytes has more banks than can be numbered")]
    TooManyBanks(usize),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BankError {
    #[error("Bank {bank} is out of range, the cartridge has {count} banks")]
    OutOfRange { bank: u16, count: u16 },
    #[error("Segment {segment} doesn't exist, the cartridge has {count} segments")]
    NoSuchSegment { segment: u16, count: u16 },
    #[error("Bank switching is locked")]
    Locked,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PatchError {
    #[error("Cannot patch {0:#06x} for this cartridge type: it is outside the cartridge")]
    OutsideWindow(u16),
    #[error("Cannot patch {0:#06x} for this cartridge type: it maps outside the ROM image")]
    OutsideImage(u16),
}

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Couldn't write the cartridge state: {0}")]
    Encode(#[from] EncodeError),
    #[error("Save state incompatible or corrupted: {0}")]
    Decode(#[from] DecodeError),
    #[error("Save state incompatible or corrupted: {found} segments instead of {expected}")]
    SegmentCount { expected: usize, found: usize },
    #[error("Save state incompatible or corrupted: {found} bytes of RAM instead of {expected}")]
    RamSize { expected: usize, found: usize },
    #[error("Save state incompatible or corrupted: bank {bank} of {count}")]
    BankOutOfRange { bank: u16, count: u16 },
    #[error("Save state incompatible or corrupted: {0}")]
    Bank(#[from] BankError),
}
