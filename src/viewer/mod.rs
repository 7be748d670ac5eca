// SPDX-FileCopyrightText: The wedding-site authors
// SPDX-License-Identifier: MPL-2.0

//! Lightbox image viewer
//!
//! A modal viewer over a cyclic sequence of images. While open it holds
//! the host's scroll lock and keyboard listener. Both are released when
//! the viewer closes or is dropped.
//!
//! Touch input is dispatched by the number of touch points: a single touch
//! either swipes to the adjacent image or pans the zoomed image, two
//! touches pinch to zoom. Two single touches in quick succession toggle
//! the zoom.

use std::{fmt, mem, time::Duration};

use crate::ImageSource;

mod gesture;

pub use self::gesture::{Gesture, Point};

/// Horizontal distance in pixels a single touch must travel to navigate.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Maximum time between two taps of a double tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// Zoom of the unscaled image.
pub const MIN_ZOOM: f64 = 1.0;

/// Upper bound of the zoom.
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom after a double tap on the unscaled image.
pub const DOUBLE_TAP_ZOOM: f64 = 2.0;

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The preceding image, wrapping around to the last
    Prev,

    /// The following image, wrapping around to the first
    Next,
}

impl Direction {
    /// Apply the direction to an index in `0..len`.
    #[must_use]
    pub const fn step(self, index: usize, len: usize) -> usize {
        debug_assert!(index < len);
        match self {
            Self::Prev => (index + len - 1) % len,
            Self::Next => (index + 1) % len,
        }
    }
}

/// Keys handled while the viewer is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_key_value(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

/// Resources of the host page that are held while the viewer is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Prevents the page behind the viewer from scrolling
    ScrollLock,

    /// Delivers key presses to [`Viewer::handle_key()`]
    KeyboardListener,
}

impl Capability {
    const ALL: [Self; 2] = [Self::ScrollLock, Self::KeyboardListener];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScrollLock => f.write_str("scroll lock"),
            Self::KeyboardListener => f.write_str("keyboard listener"),
        }
    }
}

/// The page that hosts the viewer
pub trait Host {
    /// Acquire a capability.
    fn acquire(&mut self, capability: Capability);

    /// Release a previously acquired capability.
    fn release(&mut self, capability: Capability);

    /// Hint that the image might be shown next.
    ///
    /// Failures must be ignored. Completion after the viewer has been
    /// closed is harmless.
    fn preload(&mut self, image: &ImageSource);
}

/// Observable state of the viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerState {
    /// Not shown
    Closed,

    /// Showing an image
    Open {
        /// Index of the current image
        index: usize,

        /// Scale within [`MIN_ZOOM`]..=[`MAX_ZOOM`]
        zoom: f64,

        /// Translation of the scaled image, unbounded
        pan: Point,
    },
}

#[derive(Debug)]
struct Session {
    index: usize,
    zoom: f64,
    pan: Point,
    gesture: Gesture,
    last_tap: Option<Duration>,
}

impl Session {
    const fn new(index: usize) -> Self {
        Self {
            index,
            zoom: MIN_ZOOM,
            pan: Point::ORIGIN,
            gesture: Gesture::Idle,
            last_tap: None,
        }
    }

    const fn is_zoomed(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if !self.is_zoomed() {
            self.pan = Point::ORIGIN;
        }
    }

    fn reset_zoom(&mut self) {
        self.zoom = MIN_ZOOM;
        self.pan = Point::ORIGIN;
        if let Gesture::PanningZoomed { .. } = self.gesture {
            self.gesture = Gesture::Idle;
        }
    }

    fn toggle_zoom(&mut self) {
        if self.is_zoomed() {
            self.reset_zoom();
        } else {
            self.set_zoom(DOUBLE_TAP_ZOOM);
        }
    }
}

/// Lightbox state machine
#[derive(Debug)]
pub struct Viewer<H>
where
    H: Host,
{
    images: Vec<ImageSource>,
    host: H,
    session: Option<Session>,
}

impl<H> Viewer<H>
where
    H: Host,
{
    /// Create a closed viewer.
    #[must_use]
    pub const fn new(images: Vec<ImageSource>, host: H) -> Self {
        Self {
            images,
            host,
            session: None,
        }
    }

    /// The images in display order.
    #[must_use]
    pub fn images(&self) -> &[ImageSource] {
        &self.images
    }

    /// The host.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> ViewerState {
        self.session
            .as_ref()
            .map_or(ViewerState::Closed, |session| ViewerState::Open {
                index: session.index,
                zoom: session.zoom,
                pan: session.pan,
            })
    }

    /// Check if the viewer is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The touch gesture in progress.
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.session
            .as_ref()
            .map_or(Gesture::Idle, |session| session.gesture)
    }

    /// The image that is shown.
    #[must_use]
    pub fn current_image(&self) -> Option<&ImageSource> {
        let session = self.session.as_ref()?;
        self.images.get(session.index)
    }

    /// The position label, e.g. `3 / 6`.
    #[must_use]
    pub fn counter(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        Some(format!("{} / {}", session.index + 1, self.images.len()))
    }

    /// Show the image at the given index.
    ///
    /// Returns `false` and stays closed if the index is out of range. An
    /// open viewer switches to the image.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            log::warn!(
                "Cannot open image #{index} of {num_images}",
                num_images = self.images.len()
            );
            return false;
        }
        if let Some(session) = &mut self.session {
            *session = Session::new(index);
        } else {
            for capability in Capability::ALL {
                self.host.acquire(capability);
            }
            self.session = Some(Session::new(index));
        }
        log::debug!("Opened image #{index}");
        self.preload_adjacent();
        true
    }

    /// Hide the viewer and release all capabilities.
    pub fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        for capability in Capability::ALL.into_iter().rev() {
            self.host.release(capability);
        }
        log::debug!("Closed image #{index}", index = session.index);
    }

    /// Show the adjacent image with zoom and pan reset.
    pub fn navigate(&mut self, direction: Direction) {
        let Some(session) = &mut self.session else {
            return;
        };
        let index = direction.step(session.index, self.images.len());
        *session = Session::new(index);
        log::debug!("Navigated {direction:?} to image #{index}");
        self.preload_adjacent();
    }

    /// Handle a key press.
    ///
    /// Returns `true` if the key has been consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            Key::ArrowLeft => self.navigate(Direction::Prev),
            Key::ArrowRight => self.navigate(Direction::Next),
            Key::Escape => self.close(),
        }
        true
    }

    /// Restore the unscaled image.
    pub fn reset_zoom(&mut self) {
        if let Some(session) = &mut self.session {
            session.reset_zoom();
        }
    }

    /// Zoom in if unscaled, otherwise restore the unscaled image.
    pub fn toggle_zoom(&mut self) {
        if let Some(session) = &mut self.session {
            session.toggle_zoom();
            log::debug!("Toggled zoom to {zoom}", zoom = session.zoom);
        }
    }

    /// Touch points have been added.
    ///
    /// `touches` are all current touch points. `timestamp` is monotonic
    /// with an arbitrary origin.
    pub fn touch_start(&mut self, touches: &[Point], timestamp: Duration) {
        let Some(session) = &mut self.session else {
            return;
        };
        if touches.len() == 1 {
            let is_double_tap = session.last_tap.is_some_and(|last_tap| {
                timestamp
                    .checked_sub(last_tap)
                    .is_some_and(|elapsed| elapsed < DOUBLE_TAP_WINDOW)
            });
            if is_double_tap {
                session.toggle_zoom();
            }
            session.last_tap = Some(timestamp);
        }
        session.gesture = Gesture::begin(touches, session.zoom, session.pan);
    }

    /// Touch points have moved.
    ///
    /// `touches` are all current touch points.
    pub fn touch_move(&mut self, touches: &[Point]) {
        let Some(session) = &mut self.session else {
            return;
        };
        match (session.gesture, touches) {
            (
                Gesture::Pinching {
                    start_distance,
                    start_zoom,
                },
                [first, second],
            ) => {
                let ratio = first.distance(*second) / start_distance;
                session.set_zoom(ratio * start_zoom);
            }
            (Gesture::PanningZoomed { start, start_pan }, [touch]) => {
                session.pan = start_pan + (*touch - start);
            }
            (Gesture::Residual, [_]) => (),
            (Gesture::Dragging { start, .. }, [touch]) => {
                session.gesture = Gesture::Dragging {
                    start,
                    delta_x: touch.x - start.x,
                };
            }
            _ => {
                // Unexpected number of touch points
                session.gesture = Gesture::begin(touches, session.zoom, session.pan);
            }
        }
    }

    /// Touch points have been removed.
    ///
    /// `remaining` are the touch points that are still active. Releasing
    /// the last touch of a horizontal drag at 100% zoom navigates. A touch
    /// that remains of a pinch never navigates.
    pub fn touch_end(&mut self, remaining: &[Point]) {
        let Some(session) = &mut self.session else {
            return;
        };
        let gesture = mem::take(&mut session.gesture);
        if !remaining.is_empty() {
            session.gesture = Gesture::resume(remaining, session.zoom, session.pan);
            return;
        }
        let Gesture::Dragging { delta_x, .. } = gesture else {
            return;
        };
        if session.is_zoomed() || delta_x.abs() <= SWIPE_THRESHOLD_PX {
            return;
        }
        // Swiping right reveals the preceding image
        let direction = if delta_x > 0.0 {
            Direction::Prev
        } else {
            Direction::Next
        };
        self.navigate(direction);
    }

    fn preload_adjacent(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let index = session.index;
        let len = self.images.len();
        let next = Direction::Next.step(index, len);
        let prev = Direction::Prev.step(index, len);
        if next != index {
            self.host.preload(&self.images[next]);
        }
        if prev != index && prev != next {
            self.host.preload(&self.images[prev]);
        }
    }
}

impl<H> Drop for Viewer<H>
where
    H: Host,
{
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests;
