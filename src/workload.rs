//! The synthetic workload and the loop that reports its progress.

use crate::error::Error;
use crate::progress::Reporter;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::Duration;

/// Blocks the current thread.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

impl<S: Sleeper + ?Sized> Sleeper for &mut S {
    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// A [`Sleeper`] backed by [`std::thread::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration)
    }
}

/// Parameters of a run.
///
/// Each of the `iterations` units of work sleeps for a duration drawn from
/// `[min_delay_secs, max_delay_secs]`, then performs `steps` random
/// multiply-accumulates with operands drawn from `[operand_low, operand_high)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workload {
    /// Units of work in a run.
    pub iterations: usize,
    /// Multiply-accumulates per unit.
    pub steps: usize,
    /// Shortest delay per unit, inclusive.
    pub min_delay_secs: f64,
    /// Longest delay per unit, inclusive.
    pub max_delay_secs: f64,
    /// Smallest operand, inclusive.
    pub operand_low: u64,
    /// Largest operand, exclusive.
    pub operand_high: u64,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            iterations: 100,
            steps: 1000,
            min_delay_secs: 0.01,
            max_delay_secs: 0.05,
            operand_low: 1,
            operand_high: 100,
        }
    }
}

/// What a single unit of work did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    /// How long we slept.
    pub delay: Duration,
    /// Multiply-accumulates performed.
    pub steps: usize,
    /// The final sum. Meaningless, but it keeps the arithmetic honest.
    pub accumulator: u64,
}

/// The outcome of [`Workload::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Units of work completed.
    pub units: usize,
    /// Total time requested of the [`Sleeper`].
    pub slept: Duration,
}

impl Workload {
    /// Check that the delay and operand ranges can actually be sampled.
    pub fn validate(&self) -> Result<(), Error> {
        let (min, max) = (self.min_delay_secs, self.max_delay_secs);

        if Duration::try_from_secs_f64(min).is_err() || Duration::try_from_secs_f64(max).is_err() {
            return Err(Error::InvalidWorkload(format!(
                "delays must be finite and non-negative, got {} and {}",
                min, max
            )));
        }

        if min > max {
            return Err(Error::InvalidWorkload(format!(
                "min_delay_secs ({}) exceeds max_delay_secs ({})",
                min, max
            )));
        }

        if self.operand_low >= self.operand_high {
            return Err(Error::InvalidWorkload(format!(
                "operand range {}..{} is empty",
                self.operand_low, self.operand_high
            )));
        }

        Ok(())
    }

    /// Perform a single unit of work.
    ///
    /// # Panics
    ///
    /// If the workload doesn't pass [`Workload::validate`].
    pub fn unit<R: Rng, S: Sleeper + ?Sized>(&self, rng: &mut R, sleeper: &mut S) -> Unit {
        let secs = rng.random_range(self.min_delay_secs..=self.max_delay_secs);
        let delay = Duration::from_secs_f64(secs);
        sleeper.sleep(delay);

        let operands = self.operand_low..self.operand_high;
        let mut accumulator: u64 = rng.random_range(operands.clone());
        let mut steps = 0;

        for _ in 0..self.steps {
            let x: u64 = rng.random_range(operands.clone());
            let y: u64 = rng.random_range(operands.clone());
            accumulator = accumulator.wrapping_add(x.wrapping_mul(y));
            steps += 1;
        }

        Unit {
            delay,
            steps,
            accumulator: black_box(accumulator),
        }
    }

    /// Perform every unit of work, advancing `reporter` by one after each.
    ///
    /// The first reporter failure ends the run.
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use slowbar::{NoProgress, Sleeper, Workload};
    /// use std::time::Duration;
    ///
    /// struct NoSleep;
    ///
    /// impl Sleeper for NoSleep {
    ///     fn sleep(&mut self, _: Duration) {}
    /// }
    ///
    /// let workload = Workload { iterations: 5, ..Default::default() };
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let summary = workload.run(&mut rng, NoSleep, NoProgress).unwrap();
    /// assert_eq!(5, summary.units);
    /// ```
    pub fn run<R, S, P>(&self, rng: &mut R, mut sleeper: S, mut reporter: P) -> Result<Summary, Error>
    where
        R: Rng,
        S: Sleeper,
        P: Reporter,
    {
        self.validate()?;
        info!("Starting {} units of work", self.iterations);

        let mut slept = Duration::ZERO;

        for i in 0..self.iterations {
            let unit = self.unit(rng, &mut sleeper);
            debug!(
                "Unit {}/{}: slept {:?}, {} steps",
                i + 1,
                self.iterations,
                unit.delay,
                unit.steps
            );
            slept = slept.saturating_add(unit.delay);
            reporter.advance(1)?;
        }

        info!("Finished {} units, slept {:?} in total", self.iterations, slept);
        Ok(Summary {
            units: self.iterations,
            slept,
        })
    }
}
