use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "error",
        }
    }
}

/// Decides whether a simulated upload or API call succeeds.
pub trait OutcomeDecider: Send {
    /// `success_rate` is the probability of success, in `[0, 1]`.
    fn decide(&mut self, success_rate: f64) -> Outcome;
}

/// Pseudo-random draw; reproducible when seeded.
#[derive(Debug)]
pub struct RandomOutcome {
    rng: StdRng,
}

impl RandomOutcome {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl OutcomeDecider for RandomOutcome {
    fn decide(&mut self, success_rate: f64) -> Outcome {
        let p = if success_rate.is_nan() { 0.0 } else { success_rate.clamp(0.0, 1.0) };
        if self.rng.gen_bool(p) {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

/// Always the same answer, whatever the rate.
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcome(pub Outcome);

impl OutcomeDecider for FixedOutcome {
    fn decide(&mut self, _success_rate: f64) -> Outcome {
        self.0
    }
}
