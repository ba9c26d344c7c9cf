use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Canvas, Rgba8};

fn small_config() -> OrbConfig {
    let mut cfg = OrbConfig::default();
    cfg.canvas = Canvas {
        width: 96,
        height: 96,
    };
    cfg.surface.base_radius = 30.0;
    cfg
}

#[test]
fn vsync_count_includes_first_vsync() {
    let opts = PreviewOpts {
        duration_ms: 1000.0,
        ..PreviewOpts::default()
    };
    assert_eq!(opts.vsync_count(), 61);
    assert_eq!(
        PreviewOpts {
            duration_ms: 0.0,
            ..opts
        }
        .vsync_count(),
        1
    );
}

#[test]
fn vsync_count_keeps_last_whole_period_at_common_rates() {
    for (duration_ms, native_hz, want) in [
        (1000.0, 60.0, 61),
        (2000.0, 60.0, 121),
        (500.0, 144.0, 73),
        (100.0, 30.0, 4),
        (1000.0, 120.0, 121),
        (10.0, 60.0, 1),
    ] {
        let opts = PreviewOpts {
            native_hz,
            duration_ms,
            start_ms: 0.0,
        };
        assert_eq!(opts.vsync_count(), want, "{duration_ms} ms @ {native_hz} Hz");
    }
}

#[test]
fn invalid_opts_are_rejected() {
    let cfg = small_config();
    for opts in [
        PreviewOpts {
            native_hz: 0.0,
            ..PreviewOpts::default()
        },
        PreviewOpts {
            duration_ms: -1.0,
            ..PreviewOpts::default()
        },
        PreviewOpts {
            start_ms: f64::NAN,
            ..PreviewOpts::default()
        },
    ] {
        assert!(PreviewSession::new(&cfg, QualityTier::High, opts).is_err());
    }
}

#[test]
fn low_power_run_is_throttled_to_its_budget() {
    let cfg = small_config();
    let opts = PreviewOpts {
        duration_ms: 1000.0,
        ..PreviewOpts::default()
    };
    let mut session = PreviewSession::new(&cfg, QualityTier::LowPower, opts).unwrap();
    let mut sink = InMemorySink::new();
    let stats = session.run(&mut sink).unwrap();

    assert_eq!(stats.vsyncs, 61);
    assert!((13..=15).contains(&stats.frames), "frames={}", stats.frames);
    assert_eq!(stats.frames + stats.throttled, stats.vsyncs);
    assert_eq!(stats.skipped, 0);
    assert_eq!(stats.scheduler.draws, stats.frames);

    assert!(sink.finished);
    assert_eq!(sink.frames.len() as u64, stats.frames);
    let ts = sink.timestamps();
    for w in ts.windows(2) {
        assert!(w[1] - w[0] > 40.0, "gap {} too short", w[1] - w[0]);
    }
    let mean_gap = (ts[ts.len() - 1] - ts[0]) / (ts.len() - 1) as f64;
    assert!(mean_gap >= 60.0, "mean gap {mean_gap}");
    assert!((sink.config.unwrap().fps - 15.0).abs() < 1e-9);
    assert!(!session.hero().is_running());
}

#[test]
fn drawn_frames_cover_pixels_and_move() {
    let cfg = small_config();
    let opts = PreviewOpts {
        duration_ms: 700.0,
        start_ms: 10_000.0,
        ..PreviewOpts::default()
    };
    let mut session = PreviewSession::new(&cfg, QualityTier::High, opts).unwrap();
    let mut sink = InMemorySink::new();
    session.run(&mut sink).unwrap();

    // The first draw lands on the first vsync, at zero fade-in opacity.
    assert_eq!(sink.frames[0].timestamp_ms, 10_000.0);
    assert_eq!(sink.frames[0].frame.covered_pixels(), 0);

    let early = &sink.frames[1].frame;
    let last = &sink.frames.last().unwrap().frame;
    assert_eq!((early.width, early.height), (96, 96));
    assert!(early.covered_pixels() > 0);
    assert_ne!(early.data, last.data);
}

#[test]
fn render_still_honours_background() {
    let mut cfg = small_config();
    cfg.background = Some(Rgba8::rgb(18, 20, 28));
    let frame = render_still(&cfg, QualityTier::Mobile, 1234.0).unwrap();
    assert_eq!(frame.covered_pixels(), 96 * 96);
    assert_eq!(&frame.data[..4], &[18, 20, 28, 255]);

    assert!(render_still(&cfg, QualityTier::Mobile, f64::INFINITY).is_err());
}
