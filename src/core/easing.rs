//! Easing curves shared by the camera blend and the element animations.
//!
//! Every curve takes normalised time and clamps it to `[0, 1]` first, so
//! callers can pass raw ratios without guarding them.

/// Clamp to the unit interval.  NaN collapses to 0.
pub fn clamp01(t: f64) -> f64 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Fast start, gentle landing.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = clamp01(t);
    1.0 - (1.0 - t).powi(3)
}

/// Slow start, accelerating exit.
pub fn ease_in_cubic(t: f64) -> f64 {
    let t = clamp01(t);
    t * t * t
}

/// Symmetric quadratic S-curve used for camera blend windows.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = clamp01(t);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Steeper quartic S-curve (drawer slide).
pub fn ease_in_out_quart(t: f64) -> f64 {
    let t = clamp01(t);
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: &[(&str, fn(f64) -> f64)] = &[
        ("out_cubic", ease_out_cubic),
        ("in_cubic", ease_in_cubic),
        ("in_out_quad", ease_in_out_quad),
        ("in_out_quart", ease_in_out_quart),
    ];

    #[test]
    fn endpoints_are_fixed() {
        for (name, f) in CURVES {
            assert!(f(0.0).abs() < 1e-12, "{name} should start at 0");
            assert!((f(1.0) - 1.0).abs() < 1e-12, "{name} should end at 1");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for (name, f) in CURVES {
            let mut prev = 0.0;
            for i in 0..=200 {
                let v = f(i as f64 / 200.0);
                assert!(v >= prev - 1e-12, "{name} dipped at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn symmetric_curves_hit_half_at_midpoint() {
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-12);
        assert!((ease_in_out_quart(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(ease_out_cubic(-3.0), 0.0);
        assert_eq!(ease_in_cubic(7.0), 1.0);
        assert_eq!(clamp01(f64::NAN), 0.0);
    }

    #[test]
    fn lerp_hits_both_ends() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
    }
}
