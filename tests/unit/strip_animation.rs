use super::*;

fn animator(steps: u32) -> HideShowAnimator {
    HideShowAnimator::new(&HideAnimationConfig {
        steps,
        step_interval_ms: 10,
    })
}

const TICK: Duration = Duration::from_millis(10);

#[test]
fn hide_without_animation_settles_immediately() {
    let mut a = animator(3);
    let now = Instant::now();
    assert_eq!(
        a.request(true, false, now),
        Some(AnimatorEvent::Settled { hidden: true })
    );
    assert!(a.is_hidden());
    assert!(!a.is_animating());
    assert_eq!(a.visible_fraction(), 0.0);
}

#[test]
fn animated_hide_takes_one_step_per_tick() {
    let mut a = animator(3);
    let t0 = Instant::now();
    a.request(true, true, t0);
    assert_eq!(a.step(), AnimationStep::JustStarted);
    assert_eq!(a.schedule(), Some(t0 + TICK));

    // Before the deadline nothing happens.
    assert_eq!(a.tick(t0 + Duration::from_millis(5)), None);

    assert_eq!(a.tick(t0 + TICK), Some(AnimatorEvent::Stepped));
    assert_eq!(a.step(), AnimationStep::Step(1));
    assert!((a.visible_fraction() - 2.0 / 3.0).abs() < 1e-9);

    assert_eq!(a.tick(t0 + TICK * 2), Some(AnimatorEvent::Stepped));
    assert_eq!(
        a.tick(t0 + TICK * 3),
        Some(AnimatorEvent::Settled { hidden: true })
    );
    assert!(a.is_hidden());
    assert_eq!(a.schedule(), None);
}

#[test]
fn same_target_while_animating_is_noop() {
    let mut a = animator(3);
    let t0 = Instant::now();
    a.request(true, true, t0);
    a.tick(t0 + TICK);
    assert_eq!(a.request(true, true, t0 + TICK), None);
    assert_eq!(a.step(), AnimationStep::Step(1));
}

#[test]
fn request_matching_rest_state_is_noop() {
    let mut a = animator(2);
    assert_eq!(a.request(false, true, Instant::now()), None);
    assert!(!a.is_animating());
}

#[test]
fn back_to_back_requests_settle_at_second_target() {
    let mut a = animator(2);
    let t0 = Instant::now();
    a.request(true, true, t0);
    a.request(false, true, t0);
    let mut now = t0;
    for _ in 0..10 {
        now += TICK;
        a.tick(now);
    }
    assert!(!a.is_animating());
    assert!(!a.is_hidden());

    let mut b = animator(2);
    b.request(true, false, t0);
    b.request(false, true, t0);
    b.request(true, true, t0);
    for _ in 0..10 {
        now += TICK;
        b.tick(now);
    }
    assert!(b.is_hidden());
}

#[test]
fn reversal_continues_from_current_step() {
    let mut a = animator(4);
    let t0 = Instant::now();
    a.request(true, true, t0);
    a.tick(t0 + TICK);
    assert_eq!(a.step(), AnimationStep::Step(1));
    let before = a.visible_fraction();

    a.request(false, true, t0 + TICK);
    assert_eq!(a.step(), AnimationStep::Step(3));
    assert!((a.visible_fraction() - before).abs() < 1e-9);

    assert_eq!(
        a.tick(t0 + TICK * 2),
        Some(AnimatorEvent::Settled { hidden: false })
    );
}

#[test]
fn ease_out_endpoints() {
    assert_eq!(ease_out(0.0), 0.0);
    assert_eq!(ease_out(1.0), 1.0);
    assert!(ease_out(0.5) > 0.5);
}

#[test]
fn slide_offsets_decay_to_zero() {
    let t0 = Instant::now();
    let mut slide = SlideAnimation::new(t0);
    slide.push(ItemId(1), 100.0, t0);
    assert_eq!(slide.offset_at(ItemId(1), t0), 100.0);
    let mid = slide.offset_at(ItemId(1), t0 + SLIDE_DURATION / 2);
    assert!(mid > 0.0 && mid < 50.0);
    assert_eq!(slide.offset_at(ItemId(1), t0 + SLIDE_DURATION), 0.0);
    assert!(slide.is_finished(t0 + SLIDE_DURATION));
    assert_eq!(slide.offset_at(ItemId(2), t0), 0.0);
}

#[test]
fn manual_clock_advances_only_when_told() {
    let clock = ManualClock::new();
    let t0 = clock.now();
    assert_eq!(clock.now(), t0);
    clock.advance(TICK);
    assert_eq!(clock.now(), t0 + TICK);
}
