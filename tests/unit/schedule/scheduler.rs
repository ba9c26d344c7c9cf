use super::*;
use crate::schedule::primitive::ManualFrames;

fn table_with_high_interval(interval_ms: f64) -> TierTable {
    let mut t = TierTable::default();
    t.high.frame_interval_ms = interval_ms;
    t
}

fn scheduler(interval_ms: f64) -> FrameScheduler<ManualFrames> {
    FrameScheduler::new(
        ManualFrames::new(),
        table_with_high_interval(interval_ms),
        QualityTier::High,
        0.25,
    )
}

/// Fire every due callback at each timestamp; returns (timestamp, outcome) per tick.
fn pump(
    s: &mut FrameScheduler<ManualFrames>,
    timestamps: &[f64],
    drawn_at: &mut Vec<f64>,
) -> Vec<(f64, TickOutcome)> {
    let mut out = Vec::new();
    for &now in timestamps {
        for id in s.primitive_mut().take_due() {
            let o = s.tick(id, now, |ctx| {
                drawn_at.push(ctx.now_ms);
                DrawOutcome::Drawn
            });
            out.push((now, o));
        }
    }
    out
}

#[test]
fn thirty_fps_scenario_draws_at_40_and_70() {
    let mut s = scheduler(33.3);
    assert!(s.start());
    let mut drawn = Vec::new();
    let outcomes = pump(&mut s, &[0.0, 10.0, 20.0, 40.0, 70.0], &mut drawn);
    assert_eq!(
        outcomes.iter().map(|(_, o)| *o).collect::<Vec<_>>(),
        vec![
            TickOutcome::Throttled,
            TickOutcome::Throttled,
            TickOutcome::Throttled,
            TickOutcome::Drawn,
            TickOutcome::Drawn,
        ]
    );
    assert_eq!(drawn, vec![40.0, 70.0]);
    let st = s.stats();
    assert_eq!((st.ticks, st.draws, st.throttled), (5, 2, 3));
}

#[test]
fn ticks_faster_than_interval_are_throttled() {
    let mut s = scheduler(1000.0 / 30.0);
    s.start();
    let ts: Vec<f64> = (0..120).map(|k| k as f64 * (1000.0 / 60.0)).collect();
    let mut drawn = Vec::new();
    let outcomes = pump(&mut s, &ts, &mut drawn);
    assert_eq!(outcomes.len(), ts.len());
    assert!(drawn.len() < outcomes.len());
    assert!(drawn.len() >= 55 && drawn.len() <= 61, "{}", drawn.len());
}

#[test]
fn ticks_at_or_above_interval_draw_every_time() {
    let mut s = scheduler(33.3);
    s.start();
    let ts: Vec<f64> = (1..=25).map(|k| k as f64 * 40.0).collect();
    let mut drawn = Vec::new();
    let outcomes = pump(&mut s, &ts, &mut drawn);
    assert_eq!(outcomes.len(), 25);
    assert_eq!(drawn.len(), 25);
}

#[test]
fn stop_cancels_queued_callback() {
    let mut s = scheduler(10.0);
    s.start();
    assert_eq!(s.primitive().len(), 1);
    assert!(s.stop());
    assert!(s.primitive().is_empty());
    assert_eq!(s.primitive().cancelled(), 1);
}

#[test]
fn no_draw_after_stop_even_if_callback_already_dequeued() {
    let mut s = scheduler(10.0);
    s.start();
    let in_flight = s.primitive_mut().take_due();
    assert_eq!(in_flight.len(), 1);
    s.stop();

    let mut draws = 0;
    for id in in_flight {
        let o = s.tick(id, 1000.0, |_| {
            draws += 1;
            DrawOutcome::Drawn
        });
        assert_eq!(o, TickOutcome::Ignored(IgnoreReason::Stopped));
    }
    assert_eq!(draws, 0);
    assert!(s.primitive().is_empty());
}

#[test]
fn callbacks_from_before_a_restart_are_stale() {
    let mut s = scheduler(10.0);
    s.start();
    let old = s.primitive_mut().take_due();
    s.stop();
    s.start();
    let fresh = s.primitive_mut().take_due();

    let o = s.tick(old[0], 100.0, |_| DrawOutcome::Drawn);
    assert_eq!(o, TickOutcome::Ignored(IgnoreReason::Stale));
    let o = s.tick(fresh[0], 100.0, |_| DrawOutcome::Drawn);
    assert_eq!(o, TickOutcome::Drawn);
    assert_eq!(s.stats().ignored, 1);
}

#[test]
fn double_start_and_double_stop_are_noops() {
    let mut s = scheduler(10.0);
    assert!(!s.stop());
    assert!(s.start());
    assert!(!s.start());
    assert_eq!(s.primitive().requested(), 1);
    assert!(s.stop());
    assert!(!s.stop());
    let st = s.stats();
    assert_eq!((st.starts, st.stops), (1, 1));
    assert_eq!(s.state(), SchedulerState::Stopped);
}

#[test]
fn ticks_while_stopped_are_ignored() {
    let mut s = scheduler(10.0);
    let o = s.tick(FrameRequestId(0), 50.0, |_| DrawOutcome::Drawn);
    assert_eq!(o, TickOutcome::Ignored(IgnoreReason::Stopped));
    assert!(s.primitive().is_empty());
}

#[test]
fn tier_change_applies_from_next_tick() {
    let mut s = scheduler(10.0);
    s.start();
    let mut seen = Vec::new();

    let ids = s.primitive_mut().take_due();
    s.tick(ids[0], 100.0, |ctx| {
        seen.push(ctx.tier);
        DrawOutcome::Drawn
    });
    s.set_tier(QualityTier::LowPower);
    assert_eq!(s.tier(), QualityTier::High);

    let ids = s.primitive_mut().take_due();
    s.tick(ids[0], 400.0, |ctx| {
        seen.push(ctx.tier);
        assert_eq!(ctx.profile.resolution, 30);
        DrawOutcome::Drawn
    });
    assert_eq!(seen, vec![QualityTier::High, QualityTier::LowPower]);
    assert_eq!(s.tier(), QualityTier::LowPower);
}

#[test]
fn tier_change_while_stopped_is_immediate() {
    let mut s = scheduler(10.0);
    s.set_tier(QualityTier::Mobile);
    assert_eq!(s.tier(), QualityTier::Mobile);
    assert_eq!(s.profile().resolution, 40);
}

#[test]
fn skipped_draws_still_reschedule() {
    let mut s = scheduler(10.0);
    s.start();
    let ids = s.primitive_mut().take_due();
    let o = s.tick(ids[0], 50.0, |_| DrawOutcome::Skipped(SkipReason::MissingSurface));
    assert_eq!(o, TickOutcome::Skipped(SkipReason::MissingSurface));
    assert_eq!(s.primitive().len(), 1);
    assert_eq!(s.stats().skipped, 1);
}

#[test]
fn frame_context_carries_rotation_and_fade() {
    let mut s = scheduler(10.0).with_fade(FadeIn {
        duration_ms: 1000.0,
        ease: crate::animation::ease::Ease::Linear,
    });
    s.start();
    let mut ctxs = Vec::new();
    for now in [4000.0, 4500.0, 6000.0] {
        let ids = s.primitive_mut().take_due();
        s.tick(ids[0], now, |ctx| {
            ctxs.push(*ctx);
            DrawOutcome::Drawn
        });
    }
    assert!((ctxs[0].rotation_angle - 1.0).abs() < 1e-12);
    assert_eq!(ctxs[0].opacity, 0.0);
    assert!((ctxs[1].opacity - 0.5).abs() < 1e-12);
    assert_eq!(ctxs[2].opacity, 1.0);
}
