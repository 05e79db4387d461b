use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::error::EngineError;

/// 2-D vector used for positions, directions and camera-plane offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians (counter-clockwise from +x).
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    #[inline]
    pub fn scale(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector with the same direction. Zero-length input is a contract violation.
    pub fn normalized(self) -> Result<Self, EngineError> {
        let m = self.magnitude();
        if m == 0.0 {
            return Err(EngineError::DegenerateVector);
        }
        Ok(self.scale(1.0 / m))
    }

    /// atan2(y, x), in (-pi, pi].
    #[inline]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Rotated a quarter turn clockwise: (y, -x).
    #[inline]
    pub fn perp_cw(self) -> Self {
        Self::new(self.y, -self.x)
    }

    #[cfg(test)]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;

    #[inline]
    fn mul(self, k: f32) -> Self {
        self.scale(k)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-6;

    #[test]
    fn arithmetic() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, -1.0);
        assert_eq!(a + b, Vector2::new(4.0, 1.0));
        assert_eq!(a - b, Vector2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));
        assert!((Vector2::new(3.0, 4.0).magnitude() - 5.0).abs() < EPS);
    }

    #[test]
    fn normalize_zero_vector_fails() {
        assert!(matches!(
            Vector2::ZERO.normalized(),
            Err(EngineError::DegenerateVector)
        ));
        let n = Vector2::new(0.0, -7.0).normalized().unwrap();
        assert!((n.y + 1.0).abs() < EPS && n.x.abs() < EPS);
    }

    #[test]
    fn angle_round_trips_for_unit_vectors() {
        for a in [-3.0, -FRAC_PI_2, -0.3, 0.0, 0.7, FRAC_PI_2, 2.5, PI] {
            let v = Vector2::from_angle(a);
            assert!((v.magnitude() - 1.0).abs() < EPS);
            assert!((v.angle() - a).abs() < 1e-5, "angle {a}");
        }
        // atan2 maps the negative x-axis to +pi, never -pi
        assert_eq!(Vector2::new(-1.0, 0.0).angle(), PI);
    }

    #[test]
    fn perp_is_clockwise() {
        let v = Vector2::new(0.0, 1.0).perp_cw();
        assert_eq!(v, Vector2::new(1.0, -0.0));
        assert_eq!(Vector2::new(2.0, 3.0).dot(Vector2::new(3.0, -2.0)), 0.0);
    }
}
