use super::*;

fn directions() -> Vec<Vec3> {
    let mut out = Vec::new();
    for i in 0..12 {
        for j in 0..24 {
            let theta = std::f64::consts::PI * (i as f64 + 0.5) / 12.0;
            let phi = std::f64::consts::TAU * j as f64 / 24.0;
            out.push(Vec3::new(
                theta.sin() * phi.cos() * 3.0,
                theta.sin() * phi.sin() * 3.0,
                theta.cos() * 3.0,
            ));
        }
    }
    out
}

#[test]
fn normalize_yields_unit_length() {
    for v in directions()
        .into_iter()
        .chain([Vec3::new(1e-4, 0.0, 0.0), Vec3::new(1e6, -3e5, 2.0)])
    {
        let n = normalize(v);
        assert!((n.length() - 1.0).abs() <= 1e-6);
        assert!((dot(n, n) - 1.0).abs() <= 1e-6);
    }
}

#[test]
fn normalize_of_zero_is_zero_not_nan() {
    let n = normalize(Vec3::ZERO);
    assert_eq!(n, Vec3::ZERO);
}

#[test]
fn light_direction_is_unit_and_stable() {
    let l = light_direction();
    assert!((l.length() - 1.0).abs() < 1e-12);
    assert_eq!(l, light_direction());
    assert!(l.x < 0.0 && l.y < 0.0 && l.z > 0.0);
}

#[test]
fn lighting_respects_floor_and_non_negative_specular() {
    let m = LightingModel::default();
    for n in directions() {
        let l = m.compute(n, light_direction(), VIEW_DIRECTION);
        assert!(l.diffuse >= m.diffuse_floor);
        assert!(l.specular >= 0.0);
        assert!(l.diffuse.is_finite() && l.specular.is_finite());
    }
}

#[test]
fn facing_the_halfway_vector_gives_peak_specular() {
    let m = LightingModel::default();
    let halfway = normalize(light_direction() + VIEW_DIRECTION);
    let l = m.compute(halfway, light_direction(), VIEW_DIRECTION);
    assert!((l.specular - m.specular_scale).abs() < 1e-9);
    assert!(m.wants_highlight(l));

    let away = m.compute(-halfway, light_direction(), VIEW_DIRECTION);
    assert_eq!(away.specular, 0.0);
    assert_eq!(away.diffuse, m.diffuse_floor);
    assert!(!m.wants_highlight(away));
}

#[test]
fn degenerate_inputs_fall_back() {
    let m = LightingModel::default();
    let fb = m.fallback();
    assert_eq!(m.compute(Vec3::ZERO, light_direction(), VIEW_DIRECTION), fb);
    assert_eq!(
        m.compute(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, VIEW_DIRECTION),
        fb
    );
    assert_eq!(
        m.compute(
            Vec3::new(f64::NAN, 0.0, 1.0),
            light_direction(),
            VIEW_DIRECTION
        ),
        fb
    );
    let opposed = m.compute(
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, -1.0),
        VIEW_DIRECTION,
    );
    assert_eq!(opposed.specular, 0.0);
    assert_eq!(opposed.diffuse, m.diffuse_floor);
}

#[test]
fn validation_catches_bad_constants() {
    assert!(LightingModel::default().validate().is_ok());
    let m = LightingModel {
        diffuse_floor: 1.5,
        ..LightingModel::default()
    };
    assert!(m.validate().is_err());
    let m = LightingModel {
        shininess: f64::NAN,
        ..LightingModel::default()
    };
    assert!(m.validate().is_err());
}
