use rand::{SeedableRng, rngs::StdRng};

#[derive(Clone, Debug, Default)]
pub struct Settings {
    /// Fill cartridge RAM with random bytes on reset instead of zeros
    pub random_ram: bool,
    /// Power up in a random ROM bank
    pub random_start_bank: bool,
    /// Per-ROM override of the power-up bank
    pub start_bank: Option<u16>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
