// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny scale utilities.
//!
//! [`ScaleLinear`] maps a continuous domain into a pixel range, [`ScaleBand`] allocates
//! equal-width slots (with padding) to an ordered set of categories described by a
//! [`BandDomain`].

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// Values outside the domain extrapolate linearly (no clamping).
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (y - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns “nice-ish” tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step = nice_step(span / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).ceil();
    let stop = (max / step).floor();

    let n_f = (stop - start).round();
    if !n_f.is_finite() || n_f < 0.0 {
        return Vec::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "guarded by finite/non-negative checks and capped at 10k"
    )]
    let n = n_f.min(10_000.0) as u64;
    // Multiply integer indices rather than accumulating steps to keep ticks exact-ish.
    (0..=n).map(|i| (start + i as f64) * step).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// An ordered set of distinct category labels.
///
/// Labels keep their first-occurrence order; repeated labels collapse onto the first band.
#[derive(Clone, Debug, Default)]
pub struct BandDomain {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl BandDomain {
    /// Builds a domain from labels in data order.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut domain = Self::default();
        for label in labels {
            let label = label.into();
            if domain.index.contains_key(&label) {
                continue;
            }
            domain.index.insert(label.clone(), domain.labels.len());
            domain.labels.push(label);
        }
        domain
    }

    /// Returns the number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the domain is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the band index of `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Returns labels in band order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// A discrete band scale for categorical charts.
///
/// Padding is expressed as a fraction of the step (the distance between band starts), and
/// bands are centered within the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`, without padding.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    /// Sets the same inner and outer padding.
    pub fn with_padding(self, padding: f64) -> Self {
        self.with_paddings(padding, padding)
    }

    /// Sets inner and outer padding as fractions of the step.
    ///
    /// Inner padding is clamped to `[0, 1]`; outer padding to `>= 0`.
    pub fn with_paddings(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        let denom = (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        (r1 - r0).abs() / denom
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.step() * (1.0 - self.padding_inner)
    }

    fn start(&self) -> f64 {
        let (r0, r1) = self.range;
        let lo = r0.min(r1);
        let span = (r1 - r0).abs();
        let n = self.count as f64;
        let used = self.step() * (n - self.padding_inner);
        lo + 0.5 * (span - used)
    }

    /// Returns the start coordinate of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        self.start() + self.step() * index as f64
    }

    /// Returns the band whose slot (excluding padding) contains `pos`.
    pub fn index_at(&self, pos: f64) -> Option<usize> {
        let step = self.step();
        if self.count == 0 || step <= 0.0 || !pos.is_finite() {
            return None;
        }
        let rel = (pos - self.start()) / step;
        if rel < 0.0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, reason = "non-negative and bounds-checked")]
        let i = rel.floor() as usize;
        if i >= self.count {
            return None;
        }
        let x0 = self.x(i);
        (pos >= x0 && pos <= x0 + self.band_width()).then_some(i)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn linear_maps_endpoints_to_range() {
        let s = ScaleLinear::new((0.0, 1.0), (0.0, 650.0));
        assert_eq!(s.map(0.0), 0.0);
        assert_eq!(s.map(1.0), 650.0);
        assert!((s.invert(325.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn unit_domain_ticks_are_tenths() {
        let s = ScaleLinear::new((0.0, 1.0), (0.0, 100.0));
        let ticks = s.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0], 0.0);
        assert!((ticks[10] - 1.0).abs() < 1e-12);
        assert!((ticks[3] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn band_domain_collapses_duplicates_in_first_order() {
        let d = BandDomain::new(["Drama", "Action", "Drama", "Comedy"]);
        assert_eq!(d.len(), 3);
        assert_eq!(d.labels(), &["Drama", "Action", "Comedy"]);
        assert_eq!(d.index_of("Action"), Some(1));
        assert_eq!(d.index_of("Horror"), None);
    }

    #[test]
    fn bands_do_not_overlap_and_stay_in_range() {
        let s = ScaleBand::new((0.0, 520.0), 7).with_padding(0.1);
        let bw = s.band_width();
        assert!(bw > 0.0);
        for i in 0..7 {
            let x0 = s.x(i);
            assert!(x0 >= 0.0, "band {i} starts before the range");
            assert!(x0 + bw <= 520.0 + 1e-9, "band {i} ends after the range");
            if i + 1 < 7 {
                assert!(x0 + bw < s.x(i + 1), "band {i} overlaps the next band");
            }
        }
    }

    #[test]
    fn band_padding_matches_step_fractions() {
        // Two bands with 0.1 padding: step = 100 / (2 - 0.1 + 0.2).
        let s = ScaleBand::new((0.0, 100.0), 2).with_padding(0.1);
        let step = 100.0 / 2.1;
        assert!((s.step() - step).abs() < 1e-9);
        assert!((s.band_width() - 0.9 * step).abs() < 1e-9);
        assert!((s.x(0) - 0.1 * step).abs() < 1e-9);
    }

    #[test]
    fn index_at_skips_padding() {
        let s = ScaleBand::new((0.0, 100.0), 2).with_padding(0.1);
        let mid0 = s.x(0) + 0.5 * s.band_width();
        let mid1 = s.x(1) + 0.5 * s.band_width();
        assert_eq!(s.index_at(mid0), Some(0));
        assert_eq!(s.index_at(mid1), Some(1));
        assert_eq!(s.index_at(0.5), None);
        assert_eq!(s.index_at(s.x(1) - 0.1), None);
        assert_eq!(s.index_at(f64::NAN), None);
    }
}
