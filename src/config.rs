use crate::constants::CYCLES_PER_FRAME;

/// Runtime settings for a `Chip8`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed by `Chip8::run_frame` before each timer tick
    pub cycles_per_frame: u32,
    /// Seed for `Cxkk`; `None` seeds from the operating system
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cycles_per_frame: CYCLES_PER_FRAME,
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runs_nine_cycles_per_frame() {
        let config = Config::default();
        assert_eq!(config.cycles_per_frame, 9);
        assert_eq!(config.rng_seed, None);
    }
}
