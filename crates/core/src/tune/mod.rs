//! Auto-tuning.
//!
//! Every family still set to `AUTO` gets each of its concrete modes timed
//! under the [`BenchmarkProtocol`]; the lowest mean wins and replaces `AUTO`
//! in the configuration. Families with a fixed mode are left alone. After
//! the pass the configuration may be saved once through a [`ConfigStore`].
//!
//! ```text
//! Locked ──────────────────────────────┐
//! Auto ── Tuning ── Resolved ──────────┴── Persisted (one save for all)
//! ```

mod bench;

use std::ops::Range;

pub use bench::{BenchmarkProtocol, Clock, MonotonicClock};

use crate::config::{ConfigStore, Configuration};
use crate::math::TWO_PI;
use crate::mode::{Family, Mode};
use crate::random::SeededRandom;
use crate::strategy::Strategies;

/// Inputs for sin, cos and tan benchmarks.
const TRIG_DOMAIN: Range<f64> = -TWO_PI..TWO_PI;

/// Inputs for asin and acos benchmarks.
const ARC_DOMAIN: Range<f64> = -1.0..1.0;

/// Inputs for atan benchmarks. Wide enough to hit the reciprocal branch.
const ATAN_DOMAIN: Range<f64> = -4.0..4.0;

/// Measured cost of one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub mode: &'static str,
    pub mean_ns: f64,
}

/// What happened to one family.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Mode was fixed; nothing measured.
    Locked { mode: &'static str },

    /// Every concrete mode was timed and `mode` won.
    Resolved {
        mode: &'static str,
        timings: Vec<Timing>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FamilyOutcome {
    pub family: Family,
    pub outcome: Outcome,
}

impl FamilyOutcome {
    /// Mode the family ended up with.
    pub fn mode(&self) -> &'static str {
        match &self.outcome {
            Outcome::Locked { mode } | Outcome::Resolved { mode, .. } => mode,
        }
    }

    pub fn was_tuned(&self) -> bool {
        matches!(self.outcome, Outcome::Resolved { .. })
    }
}

/// Result of the save after a tuning pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Persistence {
    /// No store was involved.
    NotAttempted,
    Saved,
    /// The store failed; the in-memory configuration still holds the result.
    Failed(String),
}

/// Summary of one tuning pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningReport {
    pub families: Vec<FamilyOutcome>,
    pub persistence: Persistence,
}

impl TuningReport {
    pub fn tuned(&self) -> impl Iterator<Item = &FamilyOutcome> {
        self.families.iter().filter(|f| f.was_tuned())
    }

    pub fn family(&self, family: Family) -> Option<&FamilyOutcome> {
        self.families.iter().find(|f| f.family == family)
    }
}

/// Benchmarks strategies and picks the fastest per family.
#[derive(Debug, Clone)]
pub struct Tuner<C = MonotonicClock> {
    clock: C,
    protocol: BenchmarkProtocol,
    seed: u32,
}

impl Tuner<MonotonicClock> {
    pub fn new(protocol: BenchmarkProtocol) -> Self {
        Self::with_clock(MonotonicClock::new(), protocol)
    }
}

impl<C: Clock> Tuner<C> {
    pub fn with_clock(clock: C, protocol: BenchmarkProtocol) -> Self {
        Self {
            clock,
            protocol,
            seed: 0x5eed,
        }
    }

    /// Seed for the benchmark inputs.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn protocol(&self) -> &BenchmarkProtocol {
        &self.protocol
    }

    /// Resolve every `AUTO` family in `config`, timing the given strategies.
    ///
    /// Families are tuned in [`Family::TUNABLE`] order, each independently.
    pub fn tune(&self, config: &mut Configuration, strategies: &Strategies) -> TuningReport {
        let mut rng = SeededRandom::new(self.seed);
        let sqrt_domain = 0.0..strategies.sqrt_table().max();

        let families = vec![
            self.resolve(Family::Sqrt, &mut config.sqrt, sqrt_domain, &mut rng, |m, x| {
                strategies.sqrt(m, x)
            }),
            self.resolve(Family::Sin, &mut config.sin, TRIG_DOMAIN, &mut rng, |m, x| {
                strategies.sin(m, x)
            }),
            self.resolve(Family::Cos, &mut config.cos, TRIG_DOMAIN, &mut rng, |m, x| {
                strategies.cos(m, x)
            }),
            self.resolve(Family::Tan, &mut config.tan, TRIG_DOMAIN, &mut rng, |m, x| {
                strategies.tan(m, x)
            }),
            self.resolve(Family::Asin, &mut config.asin, ARC_DOMAIN, &mut rng, |m, x| {
                strategies.asin(m, x)
            }),
            self.resolve(Family::Acos, &mut config.acos, ARC_DOMAIN, &mut rng, |m, x| {
                strategies.acos(m, x)
            }),
            self.resolve(Family::Atan, &mut config.atan, ATAN_DOMAIN, &mut rng, |m, x| {
                strategies.atan(m, x)
            }),
        ];

        TuningReport {
            families,
            persistence: Persistence::NotAttempted,
        }
    }

    /// [`tune`](Self::tune), then save `config` once.
    ///
    /// A failed save is logged and recorded in the report; it never undoes
    /// the in-memory result.
    pub fn tune_and_persist<S: ConfigStore>(
        &self,
        config: &mut Configuration,
        strategies: &Strategies,
        store: &S,
    ) -> TuningReport {
        let mut report = self.tune(config, strategies);

        report.persistence = match store.save(config) {
            Ok(()) => {
                tracing::info!("Tuned configuration saved");
                Persistence::Saved
            }
            Err(e) => {
                tracing::warn!("Failed to save tuned configuration, keeping it in memory: {e}");
                Persistence::Failed(e.to_string())
            }
        };
        report
    }

    /// Tune a single family.
    ///
    /// When `*mode` is `AUTO`, times `run(candidate, x)` for every concrete
    /// mode in order and stores the one with the strictly lowest mean; the
    /// earliest mode wins a tie. Any other mode is left untouched.
    pub fn resolve<M: Mode>(
        &self,
        family: Family,
        mode: &mut M,
        domain: Range<f64>,
        rng: &mut SeededRandom,
        run: impl Fn(M, f64) -> f64,
    ) -> FamilyOutcome {
        if !mode.is_auto() {
            tracing::info!("{family}: locked to {}, skipping", mode.name());
            return FamilyOutcome {
                family,
                outcome: Outcome::Locked { mode: mode.name() },
            };
        }

        tracing::info!("{family}: tuning {} modes", M::concrete().len());

        let mut timings = Vec::with_capacity(M::concrete().len());
        let mut best: Option<(M, f64)> = None;
        for &candidate in M::concrete() {
            let mean_ns =
                bench::measure(&self.clock, &self.protocol, rng, &domain, |x| run(candidate, x));
            tracing::debug!(family = %family, mode = candidate.name(), mean_ns, "measured");

            timings.push(Timing {
                mode: candidate.name(),
                mean_ns,
            });
            if best.map_or(true, |(_, fastest)| mean_ns < fastest) {
                best = Some((candidate, mean_ns));
            }
        }

        // `concrete()` is never empty, so `best` is always set here.
        if let Some((winner, mean_ns)) = best {
            *mode = winner;
            tracing::info!("{family}: resolved to {} ({mean_ns:.2} ns/call)", winner.name());
        }

        FamilyOutcome {
            family,
            outcome: Outcome::Resolved {
                mode: mode.name(),
                timings,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::bench::fake::FakeClock;
    use super::*;
    use crate::config::SqrtLutConfig;
    use crate::mode::{ArcMode, SqrtMode, TrigMode};

    fn tiny() -> BenchmarkProtocol {
        BenchmarkProtocol {
            warmup_iterations: 4,
            measure_iterations: 8,
            rounds: 2,
        }
    }

    fn strategies() -> Strategies {
        Strategies::build(&SqrtLutConfig {
            min: 0.0,
            max: 16.0,
            step: 0.01,
        })
    }

    /// Store that records saves and can be told to fail.
    #[derive(Default)]
    struct MemoryStore {
        saved: RefCell<Vec<Configuration>>,
        fail: bool,
    }

    impl ConfigStore for MemoryStore {
        type Error = std::io::Error;

        fn load(&self) -> Result<Configuration, Self::Error> {
            Ok(self.saved.borrow().last().cloned().unwrap_or_default())
        }

        fn save(&self, config: &Configuration) -> Result<(), Self::Error> {
            if self.fail {
                return Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.saved.borrow_mut().push(config.clone());
            Ok(())
        }
    }

    #[test]
    fn picks_smallest_injected_delay() {
        let clock = FakeClock::default();
        let tuner = Tuner::with_clock(clock.clone(), tiny());
        let mut rng = SeededRandom::new(1);
        let mut mode = ArcMode::Auto;

        let outcome = tuner.resolve(Family::Asin, &mut mode, ARC_DOMAIN, &mut rng, |m, x| {
            clock.advance(match m {
                ArcMode::Poly => 30,
                ArcMode::Lut => 10,
                ArcMode::Reference => 20,
                ArcMode::Auto => unreachable!("auto is never measured"),
            });
            x
        });

        assert_eq!(mode, ArcMode::Lut);
        assert_eq!(outcome.mode(), "LUT");
        let Outcome::Resolved { timings, .. } = outcome.outcome else {
            panic!("expected a resolved outcome");
        };
        let means: Vec<f64> = timings.iter().map(|t| t.mean_ns).collect();
        assert_eq!(means, vec![30.0, 10.0, 20.0]);
    }

    #[test]
    fn first_mode_wins_a_tie() {
        let clock = FakeClock::default();
        let tuner = Tuner::with_clock(clock.clone(), tiny());
        let mut rng = SeededRandom::new(1);
        let mut mode = TrigMode::Auto;

        tuner.resolve(Family::Sin, &mut mode, TRIG_DOMAIN, &mut rng, |m, x| {
            clock.advance(match m {
                TrigMode::Piecewise | TrigMode::Lut => 9,
                TrigMode::Taylor | TrigMode::Poly => 4,
                _ => 6,
            });
            x
        });

        assert_eq!(mode, TrigMode::Taylor);
    }

    #[test]
    fn locked_family_is_not_measured() {
        let tuner = Tuner::with_clock(FakeClock::default(), tiny());
        let mut rng = SeededRandom::new(1);
        let mut mode = SqrtMode::InvSqrt;
        let calls = Cell::new(0);

        let outcome = tuner.resolve(Family::Sqrt, &mut mode, 0.0..1.0, &mut rng, |_, x| {
            calls.set(calls.get() + 1);
            x
        });

        assert_eq!(mode, SqrtMode::InvSqrt);
        assert_eq!(calls.get(), 0);
        assert_eq!(outcome.outcome, Outcome::Locked { mode: "INV_SQRT" });
    }

    #[test]
    fn tune_resolves_only_auto_families() {
        // clock never moves: every mode ties and the first concrete one wins
        let tuner = Tuner::with_clock(FakeClock::default(), tiny());
        let mut config = Configuration {
            sin: TrigMode::Lut,
            atan: ArcMode::Reference,
            ..Configuration::default()
        };

        let report = tuner.tune(&mut config, &strategies());

        assert!(!config.needs_tuning());
        assert_eq!(config.sqrt, SqrtMode::Lut);
        assert_eq!(config.sin, TrigMode::Lut);
        assert_eq!(config.cos, TrigMode::Piecewise);
        assert_eq!(config.asin, ArcMode::Poly);
        assert_eq!(config.atan, ArcMode::Reference);

        assert_eq!(report.families.len(), Family::TUNABLE.len());
        assert_eq!(report.tuned().count(), 5);
        assert_eq!(report.family(Family::Sin).map(FamilyOutcome::was_tuned), Some(false));
        assert_eq!(report.persistence, Persistence::NotAttempted);
    }

    #[test]
    fn persists_once_after_the_pass() {
        let tuner = Tuner::with_clock(FakeClock::default(), tiny());
        let store = MemoryStore::default();
        let mut config = Configuration::default();

        let report = tuner.tune_and_persist(&mut config, &strategies(), &store);

        assert_eq!(report.persistence, Persistence::Saved);
        let saved = store.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], config);
    }

    #[test]
    fn failed_save_keeps_in_memory_result() {
        let tuner = Tuner::with_clock(FakeClock::default(), tiny());
        let store = MemoryStore {
            fail: true,
            ..MemoryStore::default()
        };
        let mut config = Configuration::default();

        let report = tuner.tune_and_persist(&mut config, &strategies(), &store);

        assert!(matches!(report.persistence, Persistence::Failed(ref msg) if msg.contains("read-only")));
        assert!(!config.needs_tuning());
        assert!(store.saved.borrow().is_empty());
    }

    #[test]
    fn real_clock_produces_positive_timings() {
        let tuner = Tuner::new(tiny()).with_seed(9);
        let mut config = Configuration {
            atan: ArcMode::Auto,
            ..Configuration::accurate()
        };

        let report = tuner.tune(&mut config, &strategies());
        let atan = report.family(Family::Atan).map(|f| f.outcome.clone());
        let Some(Outcome::Resolved { timings, .. }) = atan else {
            panic!("atan should have been tuned");
        };
        assert_eq!(timings.len(), ArcMode::concrete().len());
        assert!(timings.iter().all(|t| t.mean_ns >= 0.0));
    }
}
