// Copyright 2025 the ratingviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tooltip state.
//!
//! A [`Tooltip`] is a single reusable element: pointer-enter sets its text and position and
//! fades it in, pointer-leave fades it out. Opacity is a pure function of time so the state can
//! be driven by DOM events, a native event loop, or a test.

extern crate alloc;

use alloc::string::String;

use kurbo::{Point, Vec2};

/// Tooltip placement and transition timings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipStyle {
    /// Offset from the pointer to the tooltip's top-left corner.
    pub offset: Vec2,
    /// Fade-in duration in milliseconds.
    pub fade_in_ms: f64,
    /// Fade-out duration in milliseconds.
    pub fade_out_ms: f64,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            offset: Vec2::new(10.0, -25.0),
            fade_in_ms: 100.0,
            fade_out_ms: 200.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Fade {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
}

impl Fade {
    fn at(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }
}

/// A single tooltip element, hidden until the first [`Tooltip::show`].
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    style: TooltipStyle,
    text: String,
    pos: Point,
    fade: Fade,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::new(TooltipStyle::default())
    }
}

impl Tooltip {
    /// Creates a hidden tooltip.
    pub fn new(style: TooltipStyle) -> Self {
        Self {
            style,
            text: String::new(),
            pos: Point::ZERO,
            fade: Fade {
                from: 0.0,
                to: 0.0,
                start_ms: 0.0,
                duration_ms: 0.0,
            },
        }
    }

    /// Returns the style.
    pub fn style(&self) -> TooltipStyle {
        self.style
    }

    /// Pointer entered a target: set text and position, then fade in from the current opacity.
    pub fn show(&mut self, text: impl Into<String>, pointer: Point, now_ms: f64) {
        let from = self.opacity_at(now_ms);
        self.text = text.into();
        self.pos = pointer + self.style.offset;
        self.fade = Fade {
            from,
            to: 1.0,
            start_ms: now_ms,
            duration_ms: self.style.fade_in_ms,
        };
    }

    /// Pointer left the target: fade out, keeping text and position.
    pub fn hide(&mut self, now_ms: f64) {
        let from = self.opacity_at(now_ms);
        self.fade = Fade {
            from,
            to: 0.0,
            start_ms: now_ms,
            duration_ms: self.style.fade_out_ms,
        };
    }

    /// Opacity at time `now_ms`.
    pub fn opacity_at(&self, now_ms: f64) -> f64 {
        self.fade.at(now_ms)
    }

    /// Current text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current top-left position.
    pub fn position(&self) -> Point {
        self.pos
    }
}
