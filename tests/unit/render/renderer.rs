use super::*;
use crate::blob::tier::QualityTier;
use crate::foundation::core::Canvas;
use crate::render::recording::{RecordingSurface, SurfaceOp};

fn surface() -> RecordingSurface {
    RecordingSurface::new(Canvas::default())
}

#[test]
fn low_power_draws_ten_rings_without_extras() {
    let r = Renderer::default();
    let mut s = surface();
    let report = r.draw_frame(&mut s, 0.7, &QualityTier::LowPower.profile());
    assert_eq!(report.rings, 10);
    assert_eq!(report.highlights, 0);
    assert!(!report.glow);
    assert_eq!(s.strokes().count(), 10);
    assert!(
        !s.current_frame()
            .iter()
            .any(|op| matches!(op, SurfaceOp::Glow { .. }))
    );
    for (points, _) in s.strokes() {
        assert_eq!(points.len(), 11);
    }
    assert_eq!(report.points, 110);
}

#[test]
fn high_tier_draws_sixty_five_rings_plus_highlights() {
    let r = Renderer::default();
    let mut s = surface();
    let report = r.draw_frame(&mut s, 0.0, &QualityTier::High.profile());
    assert_eq!(report.rings, 65);
    assert!(report.highlights >= 1);
    assert!(report.glow);
    assert_eq!(
        s.strokes().count() as u32,
        report.rings + report.highlights
    );
}

#[test]
fn mobile_tier_ring_count() {
    let r = Renderer::default();
    let mut s = surface();
    let report = r.draw_frame(&mut s, 1.3, &QualityTier::Mobile.profile());
    assert_eq!(report.rings, QualityTier::Mobile.profile().ring_count());
    assert_eq!(report.rings, 20);
}

#[test]
fn ring_count_never_exceeds_ceiling() {
    let r = Renderer::default();
    for (resolution, step) in [(31, 3), (2, 1), (10, 4), (7, 7), (5, 9)] {
        let profile = TierProfile {
            resolution,
            step,
            ..QualityTier::LowPower.profile()
        };
        let mut s = surface();
        let report = r.draw_frame(&mut s, 0.2, &profile);
        assert_eq!(report.rings, profile.ring_count(), "{resolution}/{step}");
    }
}

#[test]
fn every_frame_starts_with_a_clear() {
    let r = Renderer::default();
    let mut s = surface();
    let profile = QualityTier::Mobile.profile();
    r.draw_frame(&mut s, 0.0, &profile);
    r.draw_frame(&mut s, 0.1, &profile);
    assert_eq!(s.clear_count(), 2);
    assert_eq!(s.ops()[0], SurfaceOp::Clear);
    assert_eq!(s.strokes().count() as u32, {
        let mut again = surface();
        let rep = r.draw_frame(&mut again, 0.1, &profile);
        rep.rings + rep.highlights
    });
}

#[test]
fn geometry_stays_on_canvas_and_finite() {
    let r = Renderer::default();
    let mut s = surface();
    for angle in [0.0, 0.9, 2.5, 40.0] {
        r.draw_frame(&mut s, angle, &QualityTier::High.profile());
        for (points, style) in s.strokes() {
            assert!(style.is_finite());
            for p in points {
                assert!(p.x.is_finite() && p.y.is_finite());
                assert!((0.0..=1000.0).contains(&p.x), "{p:?}");
                assert!((0.0..=1000.0).contains(&p.y), "{p:?}");
            }
        }
    }
}

#[test]
fn frames_change_over_time() {
    let r = Renderer::default();
    let profile = QualityTier::LowPower.profile();
    let mut a = surface();
    let mut b = surface();
    r.draw_frame(&mut a, 0.0, &profile);
    r.draw_frame(&mut b, 0.5, &profile);
    assert_ne!(a.ops(), b.ops());
}

#[test]
fn brighter_rings_are_wider_and_more_opaque() {
    let r = Renderer::default();
    let dim = r.ring_style(
        Lighting {
            diffuse: 0.2,
            specular: 0.0,
        },
        1.0,
    );
    let bright = r.ring_style(
        Lighting {
            diffuse: 1.0,
            specular: 0.0,
        },
        1.0,
    );
    assert!(bright.width > dim.width);
    assert!(bright.effective_alpha() > dim.effective_alpha());
    assert!(bright.shadow.unwrap().blur > dim.shadow.unwrap().blur);

    let weak = r.highlight_style(
        Lighting {
            diffuse: 0.5,
            specular: 0.16,
        },
        1.0,
    );
    let strong = r.highlight_style(
        Lighting {
            diffuse: 0.5,
            specular: 0.4,
        },
        1.0,
    );
    assert!(strong.width > weak.width);
    assert!(strong.effective_alpha() > weak.effective_alpha());
}

#[test]
fn opacity_scales_every_stroke() {
    let r = Renderer::default();
    let mut s = surface();
    r.draw_frame_with_opacity(&mut s, 0.0, &QualityTier::High.profile(), 0.0);
    assert!(s.strokes().all(|(_, style)| style.opacity == 0.0));
    let glow_opacity = s.current_frame().iter().find_map(|op| match op {
        SurfaceOp::Glow { opacity, .. } => Some(*opacity),
        _ => None,
    });
    assert_eq!(glow_opacity, Some(0.0));
}

#[test]
fn glow_is_centred_and_sized_from_base_radius() {
    let r = Renderer::default();
    let mut s = surface();
    r.draw_frame(&mut s, 0.0, &QualityTier::High.profile());
    let glow = s.current_frame().iter().find_map(|op| match op {
        SurfaceOp::Glow {
            center,
            inner_radius,
            outer_radius,
            opacity,
        } => Some((*center, *inner_radius, *outer_radius, *opacity)),
        _ => None,
    });
    let (center, inner, outer, opacity) = glow.unwrap();
    assert_eq!(center, Point::new(500.0, 500.0));
    assert!((inner - 175.0).abs() < 1e-9);
    assert!((outer - 560.0).abs() < 1e-9);
    assert!((opacity - 0.6).abs() < 1e-12);
}

#[test]
fn projection_skews_depth_into_y() {
    let p = Projection::default();
    let c = Point::new(500.0, 500.0);
    assert_eq!(p.project(Point3D::new(10.0, 0.0, 0.0), c), Point::new(510.0, 500.0));
    let q = p.project(Point3D::new(0.0, 100.0, 100.0), c);
    assert!((q.y - (500.0 + 92.0 - 4.5)).abs() < 1e-9);
}
