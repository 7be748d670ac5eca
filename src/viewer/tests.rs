// SPDX-FileCopyrightText: The wedding-site authors
// SPDX-License-Identifier: MPL-2.0

use std::{cell::RefCell, rc::Rc};

use super::*;

#[derive(Debug, Clone, PartialEq)]
enum HostCall {
    Acquire(Capability),
    Release(Capability),
    Preload(String),
}

#[derive(Debug, Default, Clone)]
struct RecordingHost {
    calls: Rc<RefCell<Vec<HostCall>>>,
}

impl RecordingHost {
    fn take_calls(&self) -> Vec<HostCall> {
        self.calls.borrow_mut().drain(..).collect()
    }

    fn held(&self) -> Vec<Capability> {
        let mut held = Vec::new();
        for call in self.calls.borrow().iter() {
            match call {
                HostCall::Acquire(capability) => held.push(*capability),
                HostCall::Release(capability) => held.retain(|other| other != capability),
                HostCall::Preload(_) => (),
            }
        }
        held
    }
}

impl Host for RecordingHost {
    fn acquire(&mut self, capability: Capability) {
        self.calls.borrow_mut().push(HostCall::Acquire(capability));
    }

    fn release(&mut self, capability: Capability) {
        self.calls.borrow_mut().push(HostCall::Release(capability));
    }

    fn preload(&mut self, image: &ImageSource) {
        self.calls
            .borrow_mut()
            .push(HostCall::Preload(image.path().to_owned()));
    }
}

fn images(count: usize) -> Vec<ImageSource> {
    (1..=count)
        .map(|i| ImageSource::new(format!("/mobile-background/couple ({i}).jpg")))
        .collect()
}

fn viewer(count: usize) -> Viewer<RecordingHost> {
    Viewer::new(images(count), RecordingHost::default())
}

fn open_viewer(count: usize, index: usize) -> Viewer<RecordingHost> {
    let mut viewer = viewer(count);
    assert!(viewer.open(index));
    viewer
}

fn index(viewer: &Viewer<RecordingHost>) -> usize {
    match viewer.state() {
        ViewerState::Open { index, .. } => index,
        ViewerState::Closed => panic!("viewer is closed"),
    }
}

fn zoom(viewer: &Viewer<RecordingHost>) -> f64 {
    match viewer.state() {
        ViewerState::Open { zoom, .. } => zoom,
        ViewerState::Closed => panic!("viewer is closed"),
    }
}

fn pan(viewer: &Viewer<RecordingHost>) -> Point {
    match viewer.state() {
        ViewerState::Open { pan, .. } => pan,
        ViewerState::Closed => panic!("viewer is closed"),
    }
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn swipe(viewer: &mut Viewer<RecordingHost>, delta_x: f64, timestamp: Duration) {
    let start = Point::new(200.0, 300.0);
    viewer.touch_start(&[start], timestamp);
    viewer.touch_move(&[Point::new(start.x + delta_x, start.y + 5.0)]);
    viewer.touch_end(&[]);
}

fn pinch(viewer: &mut Viewer<RecordingHost>, start_distance: f64, distance: f64) {
    viewer.touch_start(
        &[Point::new(100.0, 100.0), Point::new(100.0 + start_distance, 100.0)],
        ms(10_000),
    );
    viewer.touch_move(&[Point::new(100.0, 100.0), Point::new(100.0 + distance, 100.0)]);
}

#[test]
fn new_viewer_is_closed() {
    let viewer = viewer(3);
    assert_eq!(ViewerState::Closed, viewer.state());
    assert!(viewer.current_image().is_none());
    assert!(viewer.counter().is_none());
    assert!(viewer.host().take_calls().is_empty());
}

#[test]
fn open_resets_view_and_acquires_capabilities() {
    let viewer = open_viewer(6, 2);
    assert_eq!(
        ViewerState::Open {
            index: 2,
            zoom: MIN_ZOOM,
            pan: Point::ORIGIN,
        },
        viewer.state()
    );
    assert_eq!(Some("3 / 6"), viewer.counter().as_deref());
    assert_eq!(
        vec![Capability::ScrollLock, Capability::KeyboardListener],
        viewer.host().held()
    );
}

#[test]
fn open_out_of_range_stays_closed() {
    let mut viewer = viewer(3);
    assert!(!viewer.open(3));
    assert!(!viewer.is_open());
    let mut empty = self::viewer(0);
    assert!(!empty.open(0));
    assert!(empty.host().take_calls().is_empty());
}

#[test]
fn open_preloads_adjacent_images() {
    let viewer = open_viewer(6, 0);
    let calls = viewer.host().take_calls();
    assert_eq!(
        vec![
            HostCall::Acquire(Capability::ScrollLock),
            HostCall::Acquire(Capability::KeyboardListener),
            HostCall::Preload("/mobile-background/couple (2).jpg".to_owned()),
            HostCall::Preload("/mobile-background/couple (6).jpg".to_owned()),
        ],
        calls
    );
}

#[test]
fn preload_skips_duplicates_in_small_galleries() {
    let viewer = open_viewer(1, 0);
    assert!(
        !viewer
            .host()
            .take_calls()
            .iter()
            .any(|call| matches!(call, HostCall::Preload(_)))
    );
    let viewer = open_viewer(2, 0);
    let preloads = viewer
        .host()
        .take_calls()
        .into_iter()
        .filter(|call| matches!(call, HostCall::Preload(_)))
        .collect::<Vec<_>>();
    assert_eq!(
        vec![HostCall::Preload("/mobile-background/couple (2).jpg".to_owned())],
        preloads
    );
}

#[test]
fn close_releases_capabilities() {
    let mut viewer = open_viewer(3, 1);
    viewer.close();
    assert_eq!(ViewerState::Closed, viewer.state());
    assert!(viewer.host().held().is_empty());
    // Closing twice is a no-op
    viewer.host().take_calls();
    viewer.close();
    assert!(viewer.host().take_calls().is_empty());
}

#[test]
fn drop_releases_capabilities() {
    let host = RecordingHost::default();
    let mut viewer = Viewer::new(images(3), host.clone());
    assert!(viewer.open(0));
    assert!(!host.held().is_empty());
    drop(viewer);
    assert!(host.held().is_empty());
}

#[test]
fn reopening_keeps_capabilities_acquired_once() {
    let mut viewer = open_viewer(3, 0);
    assert!(viewer.open(2));
    let acquired = viewer
        .host()
        .take_calls()
        .into_iter()
        .filter(|call| matches!(call, HostCall::Acquire(_)))
        .count();
    assert_eq!(2, acquired);
    assert_eq!(2, index(&viewer));
}

#[test]
fn navigation_is_cyclic() {
    let mut viewer = open_viewer(6, 5);
    viewer.navigate(Direction::Next);
    assert_eq!(0, index(&viewer));
    viewer.navigate(Direction::Prev);
    assert_eq!(5, index(&viewer));
    viewer.navigate(Direction::Prev);
    assert_eq!(4, index(&viewer));
}

#[test]
fn navigation_resets_zoom_and_pan() {
    let mut viewer = open_viewer(3, 0);
    pinch(&mut viewer, 100.0, 250.0);
    viewer.touch_end(&[]);
    viewer.touch_start(&[Point::new(0.0, 0.0)], ms(20_000));
    viewer.touch_move(&[Point::new(30.0, 40.0)]);
    viewer.touch_end(&[]);
    assert!(zoom(&viewer) > MIN_ZOOM);
    assert_eq!(Point::new(30.0, 40.0), pan(&viewer));
    viewer.navigate(Direction::Next);
    assert_eq!(
        ViewerState::Open {
            index: 1,
            zoom: MIN_ZOOM,
            pan: Point::ORIGIN,
        },
        viewer.state()
    );
}

#[test]
fn navigation_while_closed_is_ignored() {
    let mut viewer = viewer(3);
    viewer.navigate(Direction::Next);
    assert_eq!(ViewerState::Closed, viewer.state());
}

#[test]
fn keyboard_navigation() {
    let mut viewer = open_viewer(3, 0);
    assert!(viewer.handle_key(Key::ArrowLeft));
    assert_eq!(2, index(&viewer));
    assert!(viewer.handle_key(Key::ArrowRight));
    assert_eq!(0, index(&viewer));
    assert!(viewer.handle_key(Key::Escape));
    assert!(!viewer.is_open());
    assert!(!viewer.handle_key(Key::ArrowRight));
}

#[test]
fn key_values() {
    assert_eq!(Some(Key::ArrowLeft), Key::from_key_value("ArrowLeft"));
    assert_eq!(Some(Key::ArrowRight), Key::from_key_value("ArrowRight"));
    assert_eq!(Some(Key::Escape), Key::from_key_value("Escape"));
    assert_eq!(None, Key::from_key_value("Enter"));
}

#[test]
fn swipe_threshold() {
    let mut viewer = open_viewer(6, 3);
    swipe(&mut viewer, 49.0, ms(1_000));
    assert_eq!(3, index(&viewer));
    swipe(&mut viewer, -49.0, ms(2_000));
    assert_eq!(3, index(&viewer));
    swipe(&mut viewer, 50.0, ms(3_000));
    assert_eq!(3, index(&viewer));
    swipe(&mut viewer, 51.0, ms(4_000));
    assert_eq!(2, index(&viewer));
    swipe(&mut viewer, -51.0, ms(5_000));
    assert_eq!(3, index(&viewer));
}

#[test]
fn swipe_while_zoomed_pans_instead() {
    let mut viewer = open_viewer(6, 3);
    viewer.toggle_zoom();
    swipe(&mut viewer, 120.0, ms(1_000));
    assert_eq!(3, index(&viewer));
    assert_eq!(Point::new(120.0, 5.0), pan(&viewer));
}

#[test]
fn pinch_zoom_is_clamped() {
    let mut viewer = open_viewer(3, 0);
    pinch(&mut viewer, 100.0, 500.0);
    assert!((zoom(&viewer) - MAX_ZOOM).abs() < f64::EPSILON);
    viewer.touch_end(&[]);
    pinch(&mut viewer, 100.0, 10.0);
    assert!((zoom(&viewer) - MIN_ZOOM).abs() < f64::EPSILON);
    assert_eq!(Point::ORIGIN, pan(&viewer));
}

#[test]
fn pinch_uses_zoom_at_start_as_baseline() {
    let mut viewer = open_viewer(3, 0);
    pinch(&mut viewer, 100.0, 150.0);
    assert!((zoom(&viewer) - 1.5).abs() < 1e-9);
    viewer.touch_end(&[]);
    pinch(&mut viewer, 100.0, 160.0);
    assert!((zoom(&viewer) - 2.4).abs() < 1e-9);
}

#[test]
fn pinch_with_coincident_touches_is_ignored() {
    let mut viewer = open_viewer(3, 0);
    viewer.touch_start(&[Point::new(5.0, 5.0), Point::new(5.0, 5.0)], ms(1_000));
    assert!(viewer.gesture().is_idle());
    viewer.touch_move(&[Point::new(0.0, 0.0), Point::new(50.0, 50.0)]);
    assert!((zoom(&viewer) - MIN_ZOOM).abs() < f64::EPSILON);
}

#[test]
fn double_tap_toggles_zoom() {
    let mut viewer = open_viewer(3, 0);
    let touch = [Point::new(10.0, 10.0)];
    viewer.touch_start(&touch, ms(1_000));
    viewer.touch_end(&[]);
    viewer.touch_start(&touch, ms(1_299));
    viewer.touch_end(&[]);
    assert!((zoom(&viewer) - DOUBLE_TAP_ZOOM).abs() < f64::EPSILON);
    viewer.touch_start(&touch, ms(2_000));
    viewer.touch_move(&[Point::new(40.0, 50.0)]);
    viewer.touch_end(&[]);
    assert_eq!(Point::new(30.0, 40.0), pan(&viewer));
    viewer.touch_start(&touch, ms(2_100));
    viewer.touch_end(&[]);
    assert!((zoom(&viewer) - MIN_ZOOM).abs() < f64::EPSILON);
    assert_eq!(Point::ORIGIN, pan(&viewer));
}

#[test]
fn slow_taps_are_no_double_tap() {
    let mut viewer = open_viewer(3, 0);
    let touch = [Point::new(10.0, 10.0)];
    viewer.touch_start(&touch, ms(1_000));
    viewer.touch_end(&[]);
    viewer.touch_start(&touch, ms(1_300));
    viewer.touch_end(&[]);
    assert!((zoom(&viewer) - MIN_ZOOM).abs() < f64::EPSILON);
}

#[test]
fn timestamps_going_backwards_are_no_double_tap() {
    let mut viewer = open_viewer(3, 0);
    let touch = [Point::new(10.0, 10.0)];
    viewer.touch_start(&touch, ms(1_000));
    viewer.touch_end(&[]);
    viewer.touch_start(&touch, ms(900));
    viewer.touch_end(&[]);
    assert!((zoom(&viewer) - MIN_ZOOM).abs() < f64::EPSILON);
}

#[test]
fn pan_is_relative_to_pan_at_gesture_start() {
    let mut viewer = open_viewer(3, 0);
    viewer.toggle_zoom();
    viewer.touch_start(&[Point::new(0.0, 0.0)], ms(1_000));
    viewer.touch_move(&[Point::new(-500.0, 20.0)]);
    viewer.touch_end(&[]);
    viewer.touch_start(&[Point::new(100.0, 100.0)], ms(2_000));
    viewer.touch_move(&[Point::new(90.0, 130.0)]);
    // Unbounded
    assert_eq!(Point::new(-510.0, 50.0), pan(&viewer));
}

#[test]
fn lifting_one_pinch_finger_rebaselines() {
    let mut viewer = open_viewer(3, 0);
    pinch(&mut viewer, 100.0, 200.0);
    assert!((zoom(&viewer) - 2.0).abs() < 1e-9);
    viewer.touch_end(&[Point::new(300.0, 100.0)]);
    assert!(matches!(viewer.gesture(), Gesture::PanningZoomed { .. }));
    viewer.touch_move(&[Point::new(310.0, 90.0)]);
    assert_eq!(Point::new(10.0, -10.0), pan(&viewer));
    viewer.touch_end(&[]);
    assert_eq!(0, index(&viewer));
}

#[test]
fn lifting_one_pinch_finger_at_full_size_never_swipes() {
    let mut viewer = open_viewer(3, 0);
    pinch(&mut viewer, 100.0, 80.0);
    assert!((zoom(&viewer) - MIN_ZOOM).abs() < f64::EPSILON);
    viewer.touch_end(&[Point::new(180.0, 100.0)]);
    assert_eq!(Gesture::Residual, viewer.gesture());
    viewer.touch_move(&[Point::new(300.0, 100.0)]);
    viewer.touch_move(&[Point::new(-300.0, 100.0)]);
    viewer.touch_end(&[]);
    assert_eq!(0, index(&viewer));
    assert!(viewer.gesture().is_idle());
    // The next touch swipes again
    swipe(&mut viewer, -120.0, ms(20_000));
    assert_eq!(1, index(&viewer));
}

#[test]
fn second_finger_during_drag_starts_pinch() {
    let mut viewer = open_viewer(3, 0);
    viewer.touch_start(&[Point::new(100.0, 100.0)], ms(1_000));
    viewer.touch_move(&[Point::new(20.0, 100.0)]);
    viewer.touch_start(&[Point::new(20.0, 100.0), Point::new(120.0, 100.0)], ms(1_100));
    assert!(matches!(viewer.gesture(), Gesture::Pinching { .. }));
    viewer.touch_move(&[Point::new(20.0, 100.0), Point::new(220.0, 100.0)]);
    assert!((zoom(&viewer) - 2.0).abs() < 1e-9);
    viewer.touch_end(&[]);
    assert_eq!(0, index(&viewer));
}

#[test]
fn unexpected_touch_sequences_do_not_panic() {
    let mut viewer = open_viewer(3, 0);
    viewer.touch_end(&[]);
    viewer.touch_move(&[]);
    viewer.touch_move(&[Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0)]);
    assert!(viewer.gesture().is_idle());
    viewer.touch_move(&[Point::new(1.0, 1.0), Point::new(f64::NAN, 2.0)]);
    viewer.touch_end(&[]);
    assert_eq!(
        ViewerState::Open {
            index: 0,
            zoom: MIN_ZOOM,
            pan: Point::ORIGIN,
        },
        viewer.state()
    );
}

#[test]
fn touches_while_closed_are_ignored() {
    let mut viewer = viewer(3);
    viewer.touch_start(&[Point::new(1.0, 1.0)], ms(0));
    viewer.touch_move(&[Point::new(100.0, 1.0)]);
    viewer.touch_end(&[]);
    assert_eq!(ViewerState::Closed, viewer.state());
}

#[test]
fn reset_zoom_keeps_image() {
    let mut viewer = open_viewer(3, 1);
    viewer.toggle_zoom();
    viewer.reset_zoom();
    assert_eq!(
        ViewerState::Open {
            index: 1,
            zoom: MIN_ZOOM,
            pan: Point::ORIGIN,
        },
        viewer.state()
    );
}
