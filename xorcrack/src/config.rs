use clap::Args;

use crate::{
    analyze::{
        english::{english, Reference, DEFAULT_TOLERANCE},
        histogram::Score,
        multibyte::{KeyLengthEstimator, RepeatingKeyBreaker},
        single_byte::{SingleByteBreaker, Strategy, DEFAULT_THRESHOLD},
        Scorer,
    },
    error::ToolsResult,
};

pub const DEFAULT_MIN_KEYLENGTH: usize = 2;
pub const DEFAULT_MAX_KEYLENGTH: usize = 40;

/// Tunables of the xor attacks, shared by the library defaults and the command line.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct AttackConfig {
    /// Shortest repeating key to try
    #[arg(long, default_value_t = DEFAULT_MIN_KEYLENGTH)]
    pub min_keylength: usize,

    /// Longest repeating key to try
    #[arg(long, default_value_t = DEFAULT_MAX_KEYLENGTH)]
    pub max_keylength: usize,

    /// Block pairs averaged per keylength
    #[arg(long, env = "SAMPLES", default_value_t = 1)]
    pub samples: usize,

    #[arg(long, value_enum, default_value_t = Strategy::Heuristic)]
    pub strategy: Strategy,

    /// Single-byte results scoring below this are flagged as non-english
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: Score,

    /// Distance to the reference score still accepted as english
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: Score,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            min_keylength: DEFAULT_MIN_KEYLENGTH,
            max_keylength: DEFAULT_MAX_KEYLENGTH,
            samples: 1,
            strategy: Strategy::default(),
            threshold: DEFAULT_THRESHOLD,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl AttackConfig {
    /// The bundled English reference with this config's tolerance.
    pub fn reference(&self) -> Reference {
        english().clone().with_tolerance(self.tolerance)
    }

    pub fn single_byte<'a, S: Scorer>(&self, scorer: &'a S) -> SingleByteBreaker<'a, S> {
        SingleByteBreaker::new(scorer)
            .strategy(self.strategy)
            .threshold(self.threshold)
    }

    pub fn estimator(&self) -> ToolsResult<KeyLengthEstimator> {
        Ok(KeyLengthEstimator::new(self.min_keylength..=self.max_keylength)?.samples(self.samples))
    }

    pub fn repeating_key<'a, S: Scorer + Sync>(
        &self,
        scorer: &'a S,
    ) -> ToolsResult<RepeatingKeyBreaker<'a, S>> {
        Ok(RepeatingKeyBreaker::new(
            self.single_byte(scorer),
            self.estimator()?,
        ))
    }
}

#[test]
fn test_default_config() {
    let config = AttackConfig::default();
    assert_eq!(config.estimator().unwrap().keylengths(), 2..=40);
    assert_eq!(config.reference().tolerance(), 50.0);
    assert_eq!(config.reference().self_score(), english().self_score());
}

#[test]
fn test_invalid_range() {
    let config = AttackConfig {
        min_keylength: 10,
        max_keylength: 3,
        ..Default::default()
    };
    assert!(config.estimator().is_err());
    assert!(config.repeating_key(english()).is_err());
}

#[test]
fn test_command_line() {
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        config: AttackConfig,
    }

    let cli = Cli::parse_from(["test", "--strategy", "exhaustive", "--max-keylength", "12", "--samples", "3"]);
    assert_eq!(cli.config.strategy, Strategy::Exhaustive);
    assert_eq!(cli.config.max_keylength, 12);
    assert_eq!(cli.config.samples, 3);
    assert_eq!(cli.config.threshold, DEFAULT_THRESHOLD);
}
