// SPDX-FileCopyrightText: The wedding-site authors
// SPDX-License-Identifier: MPL-2.0

//! Touch gestures

use std::ops::{Add, Sub};

/// A position or offset in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Horizontal, growing to the right
    pub x: f64,

    /// Vertical, growing downwards
    pub y: f64,
}

impl Point {
    /// The origin, i.e. no offset.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The touch gesture in progress.
///
/// Every variant records its baseline when the gesture begins. A change of
/// the number of touch points ends the current gesture and begins a new
/// one from the current positions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Gesture {
    /// No gesture
    #[default]
    Idle,

    /// A single touch at 100% zoom that might become a swipe
    Dragging {
        /// First touch position
        start: Point,

        /// Horizontal distance moved since the start
        delta_x: f64,
    },

    /// Two touches changing the zoom
    Pinching {
        /// Initial distance between both touches, always positive
        start_distance: f64,

        /// Zoom when the pinch began
        start_zoom: f64,
    },

    /// A single touch moving the zoomed image
    PanningZoomed {
        /// First touch position
        start: Point,

        /// Pan offset when the gesture began
        start_pan: Point,
    },

    /// The touch that remains of a pinch at 100% zoom
    ///
    /// Ignored until it is released. It never swipes.
    Residual,
}

impl Gesture {
    /// Begin a new gesture for the given touch points.
    #[must_use]
    pub fn begin(touches: &[Point], zoom: f64, pan: Point) -> Self {
        match *touches {
            [start] if zoom > super::MIN_ZOOM => Self::PanningZoomed {
                start,
                start_pan: pan,
            },
            [start] => Self::Dragging {
                start,
                delta_x: 0.0,
            },
            [first, second] => {
                let start_distance = first.distance(second);
                if start_distance > 0.0 && start_distance.is_finite() {
                    Self::Pinching {
                        start_distance,
                        start_zoom: zoom,
                    }
                } else {
                    Self::Idle
                }
            }
            _ => Self::Idle,
        }
    }

    /// Continue with the touch points that remain after some have been
    /// lifted.
    ///
    /// Unlike [`Gesture::begin()`] a single remaining touch at 100% zoom
    /// does not start a drag.
    #[must_use]
    pub fn resume(remaining: &[Point], zoom: f64, pan: Point) -> Self {
        match Self::begin(remaining, zoom, pan) {
            Self::Dragging { .. } => Self::Residual,
            gesture => gesture,
        }
    }

    /// Check if no gesture is in progress.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
