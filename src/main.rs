mod logger;

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use vcs_carts::{
    cartridge::{CartType, Cartridge},
    settings::Settings,
    system::System,
};

#[derive(Parser, Debug)]
#[command(version, about = "Loads an Atari 2600 cartridge and pokes at its bank switching", long_about = None)]
struct Args {
    rom: PathBuf,

    /// Bank switching scheme, or AUTO to guess from the image
    #[arg(short = 't', long = "type", default_value = "AUTO")]
    cart_type: CartType,

    /// Label for the ROM; defaults to the file name
    #[arg(long)]
    md5: Option<String>,

    #[arg(long)]
    random_ram: bool,

    #[arg(long)]
    random_bank: bool,

    #[arg(long)]
    start_bank: Option<u16>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    load_state: Option<PathBuf>,

    #[arg(long)]
    save_state: Option<PathBuf>,

    /// Writes done before any reads, as ADDRESS=VALUE
    #[arg(long, value_parser = parse_poke)]
    poke: Vec<(u16, u8)>,

    /// Addresses to read, in order; reads can switch banks
    #[arg(long, value_parser = parse_address, num_args = 1..)]
    peek: Vec<u16>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(level_filter(args.verbose)).context("installing the logger")?;

    let settings = Settings {
        random_ram: args.random_ram,
        random_start_bank: args.random_bank,
        start_bank: args.start_bank,
        seed: args.seed,
    };
    let cartridge =
        Cartridge::from_file(&args.rom, args.cart_type, args.md5.as_deref(), &settings)?;

    let mut system = System::new();
    system.attach(cartridge);
    system.reset();

    if let Some(path) = &args.load_state {
        load_state(&mut system, path)?;
    }

    for &(address, value) in &args.poke {
        system.poke(address, value);
    }
    for &address in &args.peek {
        println!("{:#06x}: {:#04x}", address, system.peek(address));
    }

    describe(&system);

    if let Some(path) = &args.save_state {
        save_state(&system, path)?;
    }
    Ok(())
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn describe(system: &System) {
    let Some(cartridge) = system.cartridge() else {
        return;
    };

    println!("{}", cartridge.about());
    println!("label: {}", cartridge.md5());
    let banks: Vec<String> = (0..cartridge.bank_segs())
        .map(|segment| cartridge.segment_bank(segment).to_string())
        .collect();
    println!("banks: {}", banks.join(" "));
    if let Some(hotspot) = cartridge.rom_hotspot() {
        println!("first hotspot: {:#06x}", hotspot);
    }
}

fn load_state(system: &mut System, path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let (cartridge, pages) = system
        .cartridge_mut()
        .context("no cartridge to load a state into")?;
    cartridge
        .load(pages, &mut BufReader::new(file))
        .with_context(|| format!("loading {}", path.display()))?;
    Ok(())
}

fn save_state(system: &System, path: &Path) -> Result<()> {
    let cartridge = system.cartridge().context("no cartridge to save")?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;

    let mut out = BufWriter::new(file);
    cartridge
        .save(&mut out)
        .with_context(|| format!("saving {}", path.display()))?;
    out.flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn parse_address(text: &str) -> Result<u16, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix('$')) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|error| format!("bad address {:?}: {}", text, error))
}

fn parse_poke(text: &str) -> Result<(u16, u8), String> {
    let (address, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected ADDRESS=VALUE, got {:?}", text))?;
    let value = parse_address(value)?;
    let value = u8::try_from(value).map_err(|_| format!("{:#x} doesn't fit in a byte", value))?;
    Ok((parse_address(address)?, value))
}
