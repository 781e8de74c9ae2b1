//! Fixed-step lookup tables with linear interpolation.
//!
//! A table samples a function on `[min, max]` every `step`. Sample `i` holds
//! `f(min + i * step)`. Tables are built once and never written again, so a
//! shared `&Lut` can be read from any number of threads.

/// Upper bound on table size (16M samples, 128 MiB of `f64`).
pub const MAX_SAMPLES: usize = 1 << 24;

/// Precomputed samples of a function over a bounded domain.
#[derive(Debug, Clone)]
pub struct Lut {
    min: f64,
    max: f64,
    step: f64,
    samples: Box<[f64]>,
}

impl Lut {
    /// Sample `f` over `[min, max]` with a fixed `step`.
    ///
    /// The table holds `ceil((max - min) / step) + 1` samples, so the last
    /// sample sits at or just past `max`. Returns `None` for a degenerate
    /// shape (non-finite bounds, `max < min`, `step <= 0`) or when the table
    /// would exceed [`MAX_SAMPLES`].
    pub fn build(min: f64, max: f64, step: f64, f: impl Fn(f64) -> f64) -> Option<Self> {
        if !min.is_finite() || !max.is_finite() || !step.is_finite() || step <= 0.0 || max < min {
            return None;
        }

        let intervals = interval_count(max - min, step);
        if intervals >= MAX_SAMPLES as f64 {
            return None;
        }
        let len = intervals as usize + 1;

        let samples = (0..len)
            .map(|i| f(min + i as f64 * step))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Some(Self {
            min,
            max,
            step,
            samples,
        })
    }

    /// Sample `f` with `intervals` equal steps between `min` and `max`.
    pub fn with_intervals(min: f64, max: f64, intervals: usize, f: impl Fn(f64) -> f64) -> Option<Self> {
        if intervals == 0 {
            return None;
        }
        Self::build(min, max, (max - min) / intervals as f64, f)
    }

    /// `intervals` equal steps over a known-good domain. Callers pass
    /// literal shapes, so no validation happens here.
    pub(crate) fn uniform(min: f64, max: f64, intervals: usize, f: impl Fn(f64) -> f64) -> Self {
        debug_assert!(intervals > 0 && max > min);
        let step = (max - min) / intervals as f64;
        let samples = (0..=intervals)
            .map(|i| f(min + i as f64 * step))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            min,
            max,
            step,
            samples,
        }
    }

    /// Interpolated value at `x`, or `None` when `x` lies outside `[min, max]`
    /// (NaN included). Never extrapolates.
    #[inline]
    pub fn lookup(&self, x: f64) -> Option<f64> {
        if !(x >= self.min && x <= self.max) {
            return None;
        }
        if self.samples.len() < 2 {
            return Some(self.samples[0]);
        }

        let pos = (x - self.min) / self.step;
        let i = (pos as usize).min(self.samples.len() - 2);
        let t = pos - i as f64;

        let prev = self.samples[i];
        let next = self.samples[i + 1];
        Some(prev + t * (next - prev))
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Raw sample `i`, the exact function value at `min + i * step`.
    pub fn sample(&self, i: usize) -> Option<f64> {
        self.samples.get(i).copied()
    }
}

/// `ceil(span / step)`, except that a span which is a whole number of steps
/// up to rounding noise is not bumped to the next interval.
fn interval_count(span: f64, step: f64) -> f64 {
    let ratio = span / step;
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= 1e-9 * nearest.max(1.0) {
        nearest
    } else {
        ratio.ceil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_follows_span_and_step() {
        let lut = Lut::build(0.0, 256.0, 0.01, f64::sqrt).unwrap();
        assert_eq!(lut.len(), 25_601);

        // 1.0 / 0.3 is not whole: rounds up, last sample lands past max
        let lut = Lut::build(0.0, 1.0, 0.3, |x| x).unwrap();
        assert_eq!(lut.len(), 5);
        assert!((lut.sample(4).unwrap() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn sample_i_is_min_plus_i_step() {
        let lut = Lut::build(-1.0, 1.0, 0.25, |x| x * x).unwrap();
        for i in 0..lut.len() {
            let x = -1.0 + i as f64 * 0.25;
            assert_eq!(lut.sample(i).unwrap(), x * x);
        }
    }

    #[test]
    fn interpolates_linear_functions_exactly() {
        let lut = Lut::build(0.0, 10.0, 0.5, |x| 3.0 * x - 2.0).unwrap();
        for i in 0..=1000 {
            let x = i as f64 * 0.01;
            let got = lut.lookup(x).unwrap();
            assert!((got - (3.0 * x - 2.0)).abs() < 1e-9, "x={x} got={got}");
        }
    }

    #[test]
    fn hits_samples_exactly_at_grid_points() {
        let lut = Lut::build(0.0, 4.0, 1.0, f64::sqrt).unwrap();
        assert_eq!(lut.lookup(0.0), Some(0.0));
        assert_eq!(lut.lookup(4.0), Some(2.0));
        assert_eq!(lut.lookup(1.0), Some(1.0));
    }

    #[test]
    fn never_extrapolates() {
        let lut = Lut::build(0.0, 1.0, 0.1, |x| x).unwrap();
        assert_eq!(lut.lookup(-0.0001), None);
        assert_eq!(lut.lookup(1.0001), None);
        assert_eq!(lut.lookup(f64::NAN), None);
        assert_eq!(lut.lookup(f64::INFINITY), None);
    }

    #[test]
    fn rejects_degenerate_shapes() {
        assert!(Lut::build(0.0, 1.0, 0.0, |x| x).is_none());
        assert!(Lut::build(0.0, 1.0, -0.1, |x| x).is_none());
        assert!(Lut::build(1.0, 0.0, 0.1, |x| x).is_none());
        assert!(Lut::build(0.0, f64::INFINITY, 0.1, |x| x).is_none());
        assert!(Lut::build(0.0, 1e9, 1e-9, |x| x).is_none());
        assert!(Lut::with_intervals(0.0, 1.0, 0, |x| x).is_none());
    }

    #[test]
    fn single_point_domain() {
        let lut = Lut::build(2.0, 2.0, 0.1, |x| x * 10.0).unwrap();
        assert_eq!(lut.len(), 1);
        assert_eq!(lut.lookup(2.0), Some(20.0));
    }
}
