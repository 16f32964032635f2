//! Lazy evaluation of evenly spaced curve points.

use super::{BondingCurveAnalyzer, CurveError};
use crate::models::CurveSample;

/// Fewest points that still cover both ends of the curve.
pub const MIN_SWEEP_POINTS: usize = 2;

/// Iterator over `points` samples at fractions `i / (points - 1)`.
///
/// Samples are computed on demand. The sweep is restartable: clone it
/// before consuming, or call [`Sweep::restart`].
#[derive(Debug, Clone)]
pub struct Sweep {
    analyzer: BondingCurveAnalyzer,
    points: usize,
    next: usize,
}

impl Sweep {
    pub(crate) fn new(analyzer: BondingCurveAnalyzer, points: usize) -> Result<Self, CurveError> {
        if points < MIN_SWEEP_POINTS {
            return Err(CurveError::invalid(
                "sweep_points",
                format!("must be at least {MIN_SWEEP_POINTS}, got {points}"),
            ));
        }
        Ok(Self {
            analyzer,
            points,
            next: 0,
        })
    }

    /// Total number of points in the sweep.
    pub fn points(&self) -> usize {
        self.points
    }

    /// Sweep fraction of the point at `index`.
    pub fn fraction(&self, index: usize) -> f64 {
        index as f64 / (self.points - 1) as f64
    }

    /// Rewind to the first point.
    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl Iterator for Sweep {
    type Item = CurveSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.points {
            return None;
        }
        let sample = self.analyzer.sample_unchecked(self.fraction(self.next));
        self.next += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.points - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Sweep {}
