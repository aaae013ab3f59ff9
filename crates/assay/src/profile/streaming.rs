//! Welford's online algorithm for computing mean and variance in a single pass.

/// Streaming statistics accumulator using Welford's algorithm.
/// Computes mean and variance in a single pass with O(1) memory.
///
/// Deltas are taken on halved values and the sum of squares is kept relative
/// to the largest magnitude seen, so any finite input stays finite.
#[derive(Debug, Clone, Default)]
pub struct StreamingStats {
    count: usize,
    mean: f64,
    m2: f64, // Sum of squared differences from mean, divided by scale^2
    scale: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl StreamingStats {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value using Welford's online algorithm. Non-finite values are ignored.
    pub fn add(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.count += 1;

        let magnitude = value.abs();
        if magnitude > self.scale {
            if self.scale > 0.0 {
                let ratio = self.scale / magnitude;
                self.m2 *= ratio * ratio;
            }
            self.scale = magnitude;
        }

        let half_delta = value / 2.0 - self.mean / 2.0;
        self.mean += half_delta / self.count as f64 * 2.0;
        let half_delta2 = value / 2.0 - self.mean / 2.0;
        if self.scale > 0.0 {
            self.m2 += 4.0 * (half_delta / self.scale) * (half_delta2 / self.scale);
        }

        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// Number of values seen.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean, if any value was seen.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sample variance (N-1 denominator). Needs at least two values.
    ///
    /// `None` when the variance itself is too large for an `f64`; the standard
    /// deviation may still be available.
    pub fn sample_variance(&self) -> Option<f64> {
        self.sample_std()
            .map(|std| std * std)
            .filter(|v| v.is_finite())
    }

    /// Sample standard deviation. Needs at least two values.
    pub fn sample_std(&self) -> Option<f64> {
        (self.count >= 2)
            .then(|| (self.m2.max(0.0) / (self.count - 1) as f64).sqrt() * self.scale)
            .filter(|std| std.is_finite())
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }
}

impl FromIterator<f64> for StreamingStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = StreamingStats::new();
        for value in iter {
            stats.add(value);
        }
        stats
    }
}
