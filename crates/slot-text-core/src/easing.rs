//! Easing mapper
//!
//! Maps a symbolic easing name to its transition-curve descriptor. Easing is a
//! presentation concern only: the sequencers never consult it for timing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Symbolic easing name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EasingType {
    Bounce,
    Elastic,
    #[default]
    Smooth,
    Sharp,
    Linear,
}

impl EasingType {
    pub const ALL: [EasingType; 5] = [
        EasingType::Bounce,
        EasingType::Elastic,
        EasingType::Smooth,
        EasingType::Sharp,
        EasingType::Linear,
    ];

    /// Parse an easing name, falling back to `Smooth` for anything unknown
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "bounce" => EasingType::Bounce,
            "elastic" => EasingType::Elastic,
            "smooth" => EasingType::Smooth,
            "sharp" => EasingType::Sharp,
            "linear" => EasingType::Linear,
            other => {
                tracing::debug!(easing = other, "Unknown easing name, using smooth");
                EasingType::Smooth
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EasingType::Bounce => "bounce",
            EasingType::Elastic => "elastic",
            EasingType::Smooth => "smooth",
            EasingType::Sharp => "sharp",
            EasingType::Linear => "linear",
        }
    }

    /// Transition-curve descriptor for this easing
    pub fn timing_function(&self) -> &'static str {
        match self {
            EasingType::Bounce => "cubic-bezier(0.175, 0.885, 0.32, 1.275)",
            EasingType::Elastic => "cubic-bezier(0.68, -0.55, 0.265, 1.55)",
            EasingType::Smooth => "cubic-bezier(0.25, 0.1, 0.25, 1)",
            EasingType::Sharp => "cubic-bezier(0.19, 1, 0.22, 1)",
            EasingType::Linear => "linear",
        }
    }

    /// Style hook class, e.g. `slot-easing-smooth`
    pub fn class_name(&self) -> String {
        format!("slot-easing-{}", self.name())
    }

    /// Control points of the curve described by `timing_function`
    pub fn curve(&self) -> CubicBezier {
        match self {
            EasingType::Bounce => CubicBezier::new(0.175, 0.885, 0.32, 1.275),
            EasingType::Elastic => CubicBezier::new(0.68, -0.55, 0.265, 1.55),
            EasingType::Smooth => CubicBezier::new(0.25, 0.1, 0.25, 1.0),
            EasingType::Sharp => CubicBezier::new(0.19, 1.0, 0.22, 1.0),
            EasingType::Linear => CubicBezier::new(0.0, 0.0, 1.0, 1.0),
        }
    }

    /// Evaluate the easing curve at progress `t` in [0, 1]
    ///
    /// Overshooting curves (bounce, elastic) may leave [0, 1] in between.
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            EasingType::Linear => t.clamp(0.0, 1.0),
            other => other.curve().apply(t),
        }
    }
}

impl fmt::Display for EasingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for EasingType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

// Unknown names deserialize to smooth instead of failing the whole config
impl<'de> Deserialize<'de> for EasingType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(EasingType::from_name(&name))
    }
}

/// CSS-style cubic Bézier timing curve with fixed end points (0,0) and (1,1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// y value of the curve at horizontal position `x` in [0, 1]
    pub fn apply(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let s = self.solve_x(x);
        bezier(s, self.y1, self.y2)
    }

    /// Find the curve parameter whose x coordinate equals `x`
    fn solve_x(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        // Newton-Raphson first, it converges in a handful of steps for sane curves
        let mut s = x;
        for _ in 0..8 {
            let err = bezier(s, self.x1, self.x2) - x;
            if err.abs() < EPSILON {
                return s;
            }
            let slope = bezier_slope(s, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        // Bisection fallback; x(s) is monotonic since x1, x2 lie in [0, 1]
        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        while hi - lo > EPSILON {
            let value = bezier(s, self.x1, self.x2);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }
}

/// One coordinate of a cubic Bézier with end points 0 and 1
#[inline]
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[inline]
fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_functions() {
        assert_eq!(
            EasingType::Bounce.timing_function(),
            "cubic-bezier(0.175, 0.885, 0.32, 1.275)"
        );
        assert_eq!(
            EasingType::Elastic.timing_function(),
            "cubic-bezier(0.68, -0.55, 0.265, 1.55)"
        );
        assert_eq!(
            EasingType::Smooth.timing_function(),
            "cubic-bezier(0.25, 0.1, 0.25, 1)"
        );
        assert_eq!(
            EasingType::Sharp.timing_function(),
            "cubic-bezier(0.19, 1, 0.22, 1)"
        );
        assert_eq!(EasingType::Linear.timing_function(), "linear");
    }

    #[test]
    fn test_unknown_name_falls_back_to_smooth() {
        assert_eq!(EasingType::from_name("wobbly"), EasingType::Smooth);
        assert_eq!(EasingType::from_name(""), EasingType::Smooth);
        assert_eq!(EasingType::from_name("BOUNCE"), EasingType::Bounce);
        assert_eq!(EasingType::default(), EasingType::Smooth);
    }

    #[test]
    fn test_deserialize_unknown_as_smooth() {
        #[derive(Deserialize)]
        struct Wrapper {
            easing: EasingType,
        }
        let w: Wrapper = toml::from_str("easing = \"sharp\"").unwrap();
        assert_eq!(w.easing, EasingType::Sharp);
        let w: Wrapper = toml::from_str("easing = \"nope\"").unwrap();
        assert_eq!(w.easing, EasingType::Smooth);
    }

    #[test]
    fn test_class_name() {
        assert_eq!(EasingType::Elastic.class_name(), "slot-easing-elastic");
    }

    #[test]
    fn test_easing_boundaries() {
        for easing in EasingType::ALL {
            assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_smooth_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let v = EasingType::Smooth.apply(t);
            assert!(v >= prev - 1e-9, "not monotonic at t={}", t);
            prev = v;
        }
    }

    #[test]
    fn test_bounce_overshoots() {
        let peak = (1..20)
            .map(|i| EasingType::Bounce.apply(i as f64 / 20.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }
}
