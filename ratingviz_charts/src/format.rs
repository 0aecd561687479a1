// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick labels and tooltips.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a fraction as a percentage with a fixed number of decimals.
///
/// `0.3` with one decimal becomes `"30.0%"`; with zero decimals, `"30%"`.
///
/// Ties round away from zero (`0.0625` with one decimal is `"6.3%"`), unlike the
/// round-half-to-even of `format!`.
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    #[allow(clippy::cast_precision_loss, reason = "decimal counts are tiny")]
    let scale = 10_f64.powf(decimals as f64);
    let pct = (fraction * 100.0 * scale).round() / scale;
    // Avoid printing "-0%" for tiny negative rounding noise.
    let pct = if pct == 0.0 { 0.0 } else { pct };
    let s = format!("{pct:.decimals$}");
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        return format!("{}%", &s[1..]);
    }
    format!("{s}%")
}

/// Formats a tick value with just enough decimals to distinguish ticks `step` apart.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() && step < 1.0 {
        let d = -step.log10().floor();
        #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
        {
            d.clamp(0.0, 12.0) as usize
        }
    } else {
        0
    };
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v:.decimals$}")
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn percent_rounds_to_requested_decimals() {
        assert_eq!(format_percent(0.3, 1), "30.0%");
        assert_eq!(format_percent(0.5 - 0.2, 1), "30.0%");
        assert_eq!(format_percent(0.30000000000000004, 0), "30%");
        assert_eq!(format_percent(1.0, 0), "100%");
        assert_eq!(format_percent(0.0, 0), "0%");
    }

    #[test]
    fn percent_rounds_ties_away_from_zero() {
        assert_eq!(format_percent(0.0625, 1), "6.3%");
        assert_eq!(format_percent(0.3125, 1), "31.3%");
        assert_eq!(format_percent(0.125, 1), "12.5%");
    }

    #[test]
    fn percent_drops_negative_zero() {
        assert_eq!(format_percent(-1e-12, 1), "0.0%");
    }

    #[test]
    fn tick_decimals_follow_step() {
        assert_eq!(format_tick_with_step(0.5, 0.1), "0.5");
        assert_eq!(format_tick_with_step(20.0, 5.0), "20");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
    }
}
