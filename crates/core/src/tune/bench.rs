//! Benchmark protocol and clocks.

use std::hint::black_box;
use std::ops::Range;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::random::SeededRandom;

/// Monotonic nanosecond source.
pub trait Clock {
    fn now_nanos(&self) -> u64;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

/// Iteration counts for one mode's measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkProtocol {
    /// Untimed calls before the first round.
    pub warmup_iterations: u32,

    /// Calls per timed round.
    pub measure_iterations: u32,

    /// Timed rounds; the score is the mean of the round means.
    pub rounds: u32,
}

impl Default for BenchmarkProtocol {
    fn default() -> Self {
        Self {
            warmup_iterations: 1_000_000,
            measure_iterations: 1_000_000,
            rounds: 500,
        }
    }
}

impl BenchmarkProtocol {
    /// Short run for the CLI and tests.
    pub fn quick() -> Self {
        Self {
            warmup_iterations: 10_000,
            measure_iterations: 10_000,
            rounds: 20,
        }
    }

    /// Calls made per measured mode, warm-up included.
    pub fn calls_per_mode(&self) -> u64 {
        let timed = self.measure_iterations.max(1) as u64 * self.rounds.max(1) as u64;
        self.warmup_iterations as u64 + timed
    }
}

/// Mean nanoseconds per call of `op`.
///
/// Every call gets a fresh input from `rng` inside `domain` and its result
/// goes through `black_box`, so the optimizer can neither fold nor drop it.
/// Zero rounds or iterations are treated as one.
pub(crate) fn measure(
    clock: &impl Clock,
    protocol: &BenchmarkProtocol,
    rng: &mut SeededRandom,
    domain: &Range<f64>,
    op: impl Fn(f64) -> f64,
) -> f64 {
    for _ in 0..protocol.warmup_iterations {
        black_box(op(rng.next_range(domain.start, domain.end)));
    }

    let rounds = protocol.rounds.max(1);
    let iterations = protocol.measure_iterations.max(1);

    let mut sum = 0.0;
    for _ in 0..rounds {
        let start = clock.now_nanos();
        for _ in 0..iterations {
            black_box(op(rng.next_range(domain.start, domain.end)));
        }
        let elapsed = clock.now_nanos().saturating_sub(start);
        sum += elapsed as f64 / iterations as f64;
    }
    sum / rounds as f64
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::fake::FakeClock;
    use super::*;

    #[test]
    fn mean_matches_injected_delay() {
        let clock = FakeClock::default();
        let protocol = BenchmarkProtocol {
            warmup_iterations: 5,
            measure_iterations: 10,
            rounds: 3,
        };
        let mut rng = SeededRandom::new(3);

        let mean = measure(&clock, &protocol, &mut rng, &(0.0..1.0), |x| {
            clock.advance(40);
            x
        });
        assert_eq!(mean, 40.0);
    }

    #[test]
    fn every_call_sees_an_input_in_domain() {
        let clock = FakeClock::default();
        let protocol = BenchmarkProtocol::quick();
        let mut rng = SeededRandom::new(11);
        let calls = Cell::new(0u64);

        measure(&clock, &protocol, &mut rng, &(-1.0..1.0), |x| {
            assert!((-1.0..1.0).contains(&x), "x={x}");
            calls.set(calls.get() + 1);
            x
        });
        assert_eq!(calls.get(), protocol.calls_per_mode());
    }

    #[test]
    fn zero_counts_still_measure_once() {
        let clock = FakeClock::default();
        let protocol = BenchmarkProtocol {
            warmup_iterations: 0,
            measure_iterations: 0,
            rounds: 0,
        };
        let mut rng = SeededRandom::new(1);
        let calls = Cell::new(0u32);

        let mean = measure(&clock, &protocol, &mut rng, &(0.0..1.0), |x| {
            clock.advance(7);
            calls.set(calls.get() + 1);
            x
        });
        assert_eq!(calls.get(), 1);
        assert_eq!(mean, 7.0);
    }

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now_nanos();
        let b = clock.now_nanos();
        assert!(b >= a);
    }

    #[test]
    fn default_protocol_counts() {
        let p = BenchmarkProtocol::default();
        assert_eq!(p.warmup_iterations, 1_000_000);
        assert_eq!(p.measure_iterations, 1_000_000);
        assert_eq!(p.rounds, 500);
    }
}
