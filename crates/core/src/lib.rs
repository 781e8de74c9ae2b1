//! hotmath Core - Fast Math for Simulation Hot Paths
//!
//! Interchangeable approximations of `sqrt`, `floor` and the trig / inverse
//! trig functions, selectable per family at runtime, plus an auto-tuner that
//! measures every strategy on the running machine and locks in the fastest.
//!
//! Also hosts the blast-propagation sampler used by explosion handling.
//!
//! # Rules
//!
//! 1. No hidden globals - the `Configuration` is passed in explicitly
//! 2. Lookup tables are built once and never written again
//! 3. Out-of-domain inputs degrade to a reference value or NaN, never panic
//! 4. Random draws go through `RandomSource` so callers can replay them

pub mod blast;
pub mod config;
pub mod dispatch;
pub mod geometry;
pub mod lut;
pub mod math;
pub mod mode;
pub mod random;
pub mod strategy;
pub mod tune;

pub use blast::{calculate_affected_cells, keyed_shuffle, BlastWorld, FnWorld, IdentityHash};
pub use config::{ConfigStore, Configuration, SqrtLutConfig};
pub use dispatch::FastMath;
pub use lut::Lut;
pub use mode::{ArcMode, Family, Mode, SqrtMode, TrigMode};
pub use random::{RandomSource, SeededRandom};
pub use strategy::Strategies;
pub use tune::{BenchmarkProtocol, Clock, MonotonicClock, Tuner, TuningReport};
