//! Randomness sources for simulated latency and the content check
//!
//! The engine never touches global random state. Callers hand it a
//! [`Sampler`], which is consulted once per unit on the calling thread.

use std::time::Duration;

use super::types::EngineConfig;

/// Supplies the per-unit latency and content-check decision
pub trait Sampler {
    /// Simulated processing latency for the next unit
    fn latency(&mut self) -> Duration;

    /// Whether the next unit's content check should reject the file
    fn is_malformed(&mut self) -> bool;
}

impl<S: Sampler + ?Sized> Sampler for &mut S {
    fn latency(&mut self) -> Duration {
        (**self).latency()
    }

    fn is_malformed(&mut self) -> bool {
        (**self).is_malformed()
    }
}

/// Uniform latency in `[min, max)` and a Bernoulli content check
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: fastrand::Rng,
    min_ms: u64,
    max_ms: u64,
    malformed_rate: f64,
}

impl RandomSampler {
    /// Seeded sampler; the same seed reproduces the same sequence
    pub fn with_seed(seed: u64, config: &EngineConfig) -> Self {
        Self::from_rng(fastrand::Rng::with_seed(seed), config)
    }

    /// Sampler seeded from system entropy
    pub fn from_entropy(config: &EngineConfig) -> Self {
        Self::from_rng(fastrand::Rng::new(), config)
    }

    pub fn from_config(seed: Option<u64>, config: &EngineConfig) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed, config),
            None => Self::from_entropy(config),
        }
    }

    fn from_rng(rng: fastrand::Rng, config: &EngineConfig) -> Self {
        Self {
            rng,
            min_ms: config.latency_min.as_millis() as u64,
            max_ms: config.latency_max.as_millis() as u64,
            malformed_rate: config.malformed_rate.clamp(0.0, 1.0),
        }
    }
}

impl Sampler for RandomSampler {
    fn latency(&mut self) -> Duration {
        // fastrand panics on an empty range
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(self.rng.u64(self.min_ms..self.max_ms))
    }

    fn is_malformed(&mut self) -> bool {
        self.rng.f64() < self.malformed_rate
    }
}

/// Constant latency and a forced content-check verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSampler {
    pub latency: Duration,
    pub malformed: bool,
}

impl FixedSampler {
    /// Every file passes the content check
    pub fn passing(latency: Duration) -> Self {
        Self {
            latency,
            malformed: false,
        }
    }

    /// Every readable file is reported as malformed
    pub fn rejecting(latency: Duration) -> Self {
        Self {
            latency,
            malformed: true,
        }
    }
}

impl Sampler for FixedSampler {
    fn latency(&mut self) -> Duration {
        self.latency
    }

    fn is_malformed(&mut self) -> bool {
        self.malformed
    }
}
