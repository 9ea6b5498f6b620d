use serde::Deserialize;

/// Physical dimensions of the arm.
///
/// All lengths share the unit of the targets handed to the solver (the
/// firmware works in millimeters). Both segment lengths must be positive.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArmGeometry {
    /// Height of the shoulder pivot above the base rotation pivot.
    pub base_height: f64,
    /// Length of the upper segment (shoulder to elbow).
    pub segment1: f64,
    /// Length of the lower segment (elbow to effector).
    pub segment2: f64,
}

impl ArmGeometry {
    /// Construct a new arm geometry.
    pub fn new(base_height: f64, segment1: f64, segment2: f64) -> Self {
        Self {
            base_height,
            segment1,
            segment2,
        }
    }

    /// Combined length of both segments.
    #[inline]
    pub fn max_reach(&self) -> f64 {
        self.segment1 + self.segment2
    }
}

impl Default for ArmGeometry {
    fn default() -> Self {
        Self::new(50.0, 110.0, 71.0)
    }
}

impl std::fmt::Display for ArmGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "base height: {:.1}, segment 1: {:.1}, segment 2: {:.1}",
            self.base_height, self.segment1, self.segment2
        )
    }
}

/// Calculate the angle of a triangle using the law of cosines.
///
/// Returns the angle in radians between the sides `a` and `b`, opposite of
/// side `c`. Returns `None` if the sides cannot form a triangle, that is when
/// `a` or `b` is zero or the cosine falls outside `[-1, 1]`.
pub fn law_of_cosines(a: f64, b: f64, c: f64) -> Option<f64> {
    let denominator = 2.0 * a * b;
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }

    let numerator = a.powi(2) + b.powi(2) - c.powi(2);

    arccos(numerator / denominator)
}

/// Arc cosine restricted to its real domain.
#[inline]
pub fn arccos(value: f64) -> Option<f64> {
    if (-1.0..=1.0).contains(&value) {
        Some(value.acos())
    } else {
        None
    }
}

/// Whether an angle lies within the half turn `[0, π]`.
#[inline]
pub fn within_half_turn(angle: f64) -> bool {
    (0.0..=std::f64::consts::PI).contains(&angle)
}
