//! A slow synthetic workload behind a progress bar.
//!
//! # Features
//!
//! - Injectable randomness, delays, and progress reporting.
//! - A single, efficient terminal bar with a percentage and ETA.
//! - Sensible behaviour when not attached to a terminal.
//!
//! # Usage
//!
//! A [`Workload`] is a number of "units of work", each of which sleeps for a
//! short random time and then grinds through some random arithmetic. After
//! every unit, the loop notifies a [`Reporter`] that one more unit is done.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use slowbar::{Progress, ThreadSleeper, Workload};
//!
//! let workload = Workload { iterations: 3, ..Default::default() };
//! let mut progress = Progress::with_writer(Vec::new(), Some(80), workload.iterations, "Working").unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let summary = workload.run(&mut rng, ThreadSleeper, &mut progress).unwrap();
//! assert_eq!(3, summary.units);
//! assert!(progress.is_done());
//! ```
//!
//! Notice that the bar is lent to [`Workload::run`], so that we can inspect it
//! afterward. `Progress::new` draws to `stdout` instead, sized to your
//! terminal.
//!
//! ## Reporters
//!
//! Anything implementing [`Reporter`] can stand in for the bar. [`NoProgress`]
//! does nothing at all:
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use slowbar::{NoProgress, ThreadSleeper, Workload};
//!
//! let workload = Workload { iterations: 0, ..Default::default() };
//! let mut rng = StdRng::seed_from_u64(42);
//! let summary = workload.run(&mut rng, ThreadSleeper, NoProgress).unwrap();
//! assert_eq!(0, summary.units);
//! ```
//!
//! # Caveats
//!
//! - Your terminal must support ANSI codes.
//! - Only one bar at a time.
//! - No dynamic resizing of the bar if the window size changes.

pub mod cli;
pub mod config;
pub mod error;
pub mod progress;
pub mod workload;

pub use error::Error;
pub use progress::{NoProgress, Progress, Reporter};
pub use workload::{Sleeper, Summary, ThreadSleeper, Unit, Workload};
