use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use zoom_chart::animation::{
    AnimationState, Animator, DEFAULT_ANIMATION_DURATION, FrameClock, FrameListener,
    Interpolate, ease_out_quad,
};
use zoom_chart::core::AxisInterval;
use zoom_chart::{ChartError, ChartResult};

#[test]
fn equal_endpoints_deliver_the_target_immediately() {
    let mut animator = Animator::new(0.5);
    assert_eq!(animator.animate(3.0, 3.0), Some(3.0));
    assert_eq!(animator.state(), AnimationState::Finished);
    assert_eq!(animator.update(1.0), None);
}

#[test]
fn ticks_interpolate_with_ease_out_and_finish_exactly_on_target() {
    let mut animator = Animator::new(0.5);
    assert_eq!(animator.animate(0.0, 10.0), None);
    assert!(animator.is_in_progress());

    // The first tick ever has no previous timestamp to measure from.
    assert_eq!(animator.update(1.0), Some(0.0));

    let value = animator.update(1.125).expect("still animating");
    let expected = 10.0 * ease_out_quad(0.25);
    assert!((value - expected).abs() <= 1e-9);
    assert!((animator.progress() - 0.25).abs() <= 1e-9);

    assert_eq!(animator.update(2.0), Some(10.0));
    assert_eq!(animator.state(), AnimationState::Finished);
    assert_relative_eq!(animator.progress(), 1.0);
    assert_eq!(animator.update(2.1), None);
}

#[test]
fn idle_ticks_keep_the_clock_current() {
    let mut animator = Animator::new(0.5);
    assert_eq!(animator.update(0.0), None);
    assert_eq!(animator.update(10.0), None);

    assert_eq!(animator.animate(0.0, 1.0), None);
    let value = animator.update(10.25).expect("animating");
    assert!((value - ease_out_quad(0.5)).abs() <= 1e-9);
}

#[test]
fn new_animation_overrides_the_running_one() {
    let mut animator = Animator::new(1.0);
    assert_eq!(animator.animate(0.0, 100.0), None);
    let _ = animator.update(0.0);
    let _ = animator.update(0.5);

    assert_eq!(animator.animate(40.0, 0.0), None);
    assert_relative_eq!(animator.progress(), 0.0);
    assert_eq!(animator.from_value(), Some(40.0));
    assert_eq!(animator.to_value(), Some(0.0));
    assert_eq!(animator.update(2.0), Some(0.0));
}

#[test]
fn backwards_timestamps_do_not_rewind() {
    let mut animator = Animator::new(1.0);
    assert_eq!(animator.animate(0.0, 1.0), None);
    let _ = animator.update(5.0);
    let _ = animator.update(5.5);
    let before = animator.progress();
    let _ = animator.update(4.0);
    assert_relative_eq!(animator.progress(), before);
}

#[test]
fn intervals_interpolate_component_wise() {
    let mut animator = Animator::new(0.3);
    let from = AxisInterval { min: 0.0, max: 10.0 };
    let to = AxisInterval { min: 2.0, max: 20.0 };
    assert_eq!(animator.animate(from, to), None);

    let _ = animator.update(0.0);
    let half = animator.update(0.15).expect("animating");
    let eased = ease_out_quad(0.5);
    assert!((half.min - 2.0 * eased).abs() <= 1e-9);
    assert!((half.max - (10.0 + 10.0 * eased)).abs() <= 1e-9);
    assert_eq!(animator.update(1.0), Some(to));

    let mid = from.lerp(to, 0.5);
    assert_relative_eq!(mid.min, 1.0);
    assert_relative_eq!(mid.max, 15.0);
}

#[test]
fn invalid_durations_fall_back_to_default() {
    assert_relative_eq!(Animator::<f64>::new(0.0).duration(), DEFAULT_ANIMATION_DURATION);
    assert_relative_eq!(
        Animator::<f64>::new(f64::NAN).duration(),
        DEFAULT_ANIMATION_DURATION
    );
    assert_relative_eq!(ease_out_quad(0.0), 0.0);
    assert_relative_eq!(ease_out_quad(1.0), 1.0);
}

#[derive(Debug)]
struct Recorder {
    id: usize,
    log: Rc<RefCell<Vec<(usize, f64)>>>,
    fail: bool,
}

impl FrameListener for Recorder {
    fn on_frame(&mut self, timestamp: f64) -> ChartResult<()> {
        self.log.borrow_mut().push((self.id, timestamp));
        if self.fail {
            return Err(ChartError::InvalidData("listener failure".to_owned()));
        }
        Ok(())
    }
}

fn recorder(id: usize, log: &Rc<RefCell<Vec<(usize, f64)>>>) -> Recorder {
    Recorder {
        id,
        log: Rc::clone(log),
        fail: false,
    }
}

#[test]
fn clock_ticks_listeners_in_registration_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut clock = FrameClock::new();
    let _first = clock.register(recorder(1, &log));
    let second = clock.register(recorder(2, &log));
    let _third = clock.register(recorder(3, &log));

    assert_eq!(clock.tick(0.5), 0);
    assert_eq!(*log.borrow(), vec![(1, 0.5), (2, 0.5), (3, 0.5)]);
    assert_eq!(clock.current_timestamp(), Some(0.5));

    let removed = clock.unregister(second).expect("registered on this clock");
    assert_eq!(removed.id, 2);
    assert_eq!(clock.len(), 2);

    log.borrow_mut().clear();
    let _ = clock.tick(1.0);
    assert_eq!(*log.borrow(), vec![(1, 1.0), (3, 1.0)]);
}

#[test]
fn clock_rejects_foreign_registrations() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut clock = FrameClock::new();
    let mut other = FrameClock::new();
    let own = clock.register(recorder(1, &log));
    let foreign = other.register(recorder(2, &log));

    assert!(clock.get(&foreign).is_none());
    assert!(clock.unregister(foreign).is_none());
    assert_eq!(other.len(), 1);

    clock
        .get_mut(&own)
        .expect("registered on this clock")
        .fail = true;
    assert!(clock.get(&own).is_some_and(|listener| listener.fail));
}

#[test]
fn failing_listener_does_not_stop_the_tick() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut clock = FrameClock::new();
    let _broken = clock.register(Recorder {
        id: 1,
        log: Rc::clone(&log),
        fail: true,
    });
    let _healthy = clock.register(recorder(2, &log));

    assert_eq!(clock.tick(2.0), 1);
    assert_eq!(*log.borrow(), vec![(1, 2.0), (2, 2.0)]);

    clock.clear();
    assert!(clock.is_empty());
    assert_eq!(clock.tick(3.0), 0);
}

#[test]
fn boxed_listeners_share_one_clock() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut clock: FrameClock<Box<dyn FrameListener>> = FrameClock::default();
    let _a = clock.register(Box::new(recorder(1, &log)));
    let _b = clock.register(Box::new(recorder(2, &log)));
    let _ = clock.tick(0.25);
    assert_eq!(log.borrow().len(), 2);
}
