//! Three-component vector type
//!
//! `Vec3` is a plain value: every method and binary operator returns a new
//! vector and leaves its operands untouched. The compound-assignment
//! operators (`+=`, `-=`, `*=`, `/=`) and [`Vec3::normalize_mut`] form an
//! optional in-place layer on top of that.

use core::ops::{
    Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// 3D vector used for positions, velocities, forces and Euler angles
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C, align(16))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    _pad: f32, // Padding for SIMD alignment
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);
    pub const NEG_X: Self = Self::new(-1.0, 0.0, 0.0);
    pub const NEG_Y: Self = Self::new(0.0, -1.0, 0.0);
    pub const NEG_Z: Self = Self::new(0.0, 0.0, -1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, _pad: 0.0 }
    }

    #[inline]
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    #[inline]
    pub fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product: `X.cross(Y) == Z`
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Component-wise product
    #[inline]
    pub fn mul_elem(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Component-wise quotient. Every component of `other` must be non-zero.
    #[inline]
    pub fn div_elem(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y, self.z / other.z)
    }

    /// Multiply every component by `factor`
    #[inline]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    #[inline]
    pub fn negate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }

    #[inline]
    pub fn magnitude_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Distance between two points
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).magnitude()
    }

    /// Unit vector pointing the same way as `self`.
    ///
    /// # Panics
    ///
    /// The direction of a zero-length (or non-finite) vector is undefined, so
    /// this panics instead of returning NaN components. Use
    /// [`Vec3::try_normalize`] or [`Vec3::normalize_or`] when the input may
    /// be degenerate.
    #[inline]
    pub fn normalize(self) -> Self {
        match self.try_normalize() {
            Some(unit) => unit,
            None => panic!("cannot normalize degenerate vector {:?}", self),
        }
    }

    /// Unit vector, or `None` when the magnitude is zero or not finite
    #[inline]
    pub fn try_normalize(self) -> Option<Self> {
        let len = self.magnitude();
        if len > 0.0 && len.is_finite() {
            Some(self / len)
        } else {
            None
        }
    }

    /// Unit vector, or `fallback` when `self` cannot be normalized
    #[inline]
    pub fn normalize_or(self, fallback: Self) -> Self {
        self.try_normalize().unwrap_or(fallback)
    }

    /// Normalize in place, returning `self` for chaining.
    ///
    /// # Panics
    ///
    /// Same precondition as [`Vec3::normalize`].
    #[inline]
    pub fn normalize_mut(&mut self) -> &mut Self {
        *self = self.normalize();
        self
    }

    /// Replace `self` with `self.cross(other)`, returning `self` for chaining
    #[inline]
    pub fn cross_mut(&mut self, other: Self) -> &mut Self {
        *self = self.cross(other);
        self
    }

    /// Component-wise equality within `tolerance`
    #[inline]
    pub fn nearly_equals(self, other: Self, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    #[inline]
    pub fn min_component(self) -> f32 {
        self.x.min(self.y).min(self.z)
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Vec3> for [f32; 3] {
    #[inline]
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl Index<usize> for Vec3 {
    type Output = f32;

    fn index(&self, axis: usize) -> &f32 {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 axis out of range: {}", axis),
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline] fn add(self, rhs: Self) -> Self { Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z) }
}
impl Sub for Vec3 {
    type Output = Self;
    #[inline] fn sub(self, rhs: Self) -> Self { Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z) }
}
impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline] fn mul(self, rhs: f32) -> Self { self.scale(rhs) }
}
impl Mul<Vec3> for f32 {
    type Output = Vec3;
    #[inline] fn mul(self, rhs: Vec3) -> Vec3 { rhs.scale(self) }
}
impl Mul<Vec3> for Vec3 {
    type Output = Self;
    #[inline] fn mul(self, rhs: Self) -> Self { self.mul_elem(rhs) }
}
impl Div<f32> for Vec3 {
    type Output = Self;
    #[inline] fn div(self, rhs: f32) -> Self { Self::new(self.x / rhs, self.y / rhs, self.z / rhs) }
}
impl Div<Vec3> for Vec3 {
    type Output = Self;
    #[inline] fn div(self, rhs: Self) -> Self { self.div_elem(rhs) }
}
impl Neg for Vec3 {
    type Output = Self;
    #[inline] fn neg(self) -> Self { self.negate() }
}
impl AddAssign for Vec3 {
    #[inline] fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
}
impl SubAssign for Vec3 {
    #[inline] fn sub_assign(&mut self, rhs: Self) { *self = *self - rhs; }
}
impl MulAssign<f32> for Vec3 {
    #[inline] fn mul_assign(&mut self, rhs: f32) { *self = *self * rhs; }
}
impl MulAssign<Vec3> for Vec3 {
    #[inline] fn mul_assign(&mut self, rhs: Self) { *self = self.mul_elem(rhs); }
}
impl DivAssign<f32> for Vec3 {
    #[inline] fn div_assign(&mut self, rhs: f32) { *self = *self / rhs; }
}
impl DivAssign<Vec3> for Vec3 {
    #[inline] fn div_assign(&mut self, rhs: Self) { *self = self.div_elem(rhs); }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [Vec3; 6] = [
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(-4.0, 0.5, 2.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(10.0, -3.0, 7.5),
        Vec3::new(-0.25, -0.75, 0.125),
        Vec3::new(3.0, 3.0, -3.0),
    ];

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_vec3_cross() {
        let z = Vec3::X.cross(Vec3::Y);
        assert!((z - Vec3::Z).magnitude() < 1e-6);

        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
    }

    #[test]
    fn test_cross_anticommutative() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert!(a.cross(b).nearly_equals(-b.cross(a), 1e-5));
            }
        }
    }

    #[test]
    fn test_cross_orthogonal_to_operands() {
        for a in SAMPLES {
            for b in SAMPLES {
                let c = a.cross(b);
                assert!(a.dot(c).abs() < 1e-3, "{:?} x {:?}", a, b);
                assert!(b.dot(c).abs() < 1e-3, "{:?} x {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_vec3_normalize() {
        let v = Vec3::new(3.0, 0.0, 4.0);
        let n = v.normalize();
        assert!((n.magnitude() - 1.0).abs() < 1e-6);
        assert!(n.nearly_equals(Vec3::new(0.6, 0.0, 0.8), 1e-6));
    }

    #[test]
    fn test_normalize_idempotent_on_unit_vectors() {
        for v in SAMPLES {
            let unit = v.normalize();
            let again = unit.normalize();
            assert!(again.nearly_equals(unit, 1e-6));
            assert!((again.magnitude() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    #[should_panic(expected = "cannot normalize")]
    fn test_normalize_zero_panics() {
        let _ = Vec3::ZERO.normalize();
    }

    #[test]
    fn test_try_normalize_degenerate() {
        assert_eq!(Vec3::ZERO.try_normalize(), None);
        assert_eq!(Vec3::new(f32::NAN, 0.0, 0.0).try_normalize(), None);
        assert_eq!(Vec3::ZERO.normalize_or(Vec3::Y), Vec3::Y);
    }

    #[test]
    fn test_pairwise_ops() {
        let a = Vec3::new(2.0, 6.0, -8.0);
        let b = Vec3::new(2.0, 3.0, 4.0);
        assert_eq!(a * b, Vec3::new(4.0, 18.0, -32.0));
        assert_eq!(a / b, Vec3::new(1.0, 2.0, -2.0));
        assert_eq!(a.scale(0.5), Vec3::new(1.0, 3.0, -4.0));
        assert_eq!(-a, a.negate());
    }

    #[test]
    fn test_operands_untouched() {
        let a = Vec3::new(1.0, 1.0, 1.0);
        let b = Vec3::new(2.0, 2.0, 2.0);
        let _ = a + b;
        let _ = a.cross(b);
        assert_eq!(a, Vec3::ONE);
        assert_eq!(b, Vec3::splat(2.0));
    }

    #[test]
    fn test_in_place_layer() {
        let mut v = Vec3::new(3.0, 0.0, 4.0);
        v += Vec3::ONE;
        v -= Vec3::ONE;
        v *= 2.0;
        v /= 2.0;
        v *= Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(v, Vec3::new(3.0, 0.0, 4.0));

        let len = v.normalize_mut().magnitude();
        assert!((len - 1.0).abs() < 1e-6);

        let mut axis = Vec3::X;
        axis.cross_mut(Vec3::Y).cross_mut(Vec3::X);
        assert_eq!(axis, Vec3::Y);
    }

    #[test]
    fn test_index_and_array_conversion() {
        let v = Vec3::from([1.0, 2.0, 3.0]);
        assert_eq!((v[0], v[1], v[2]), (1.0, 2.0, 3.0));
        let arr: [f32; 3] = v.into();
        assert_eq!(arr, [1.0, 2.0, 3.0]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_vec3_serialization() {
        let v = Vec3::new(1.5, -2.5, 3.5);
        let serialized = bincode::serialize(&v).unwrap();
        let deserialized: Vec3 = bincode::deserialize(&serialized).unwrap();
        assert_eq!(v, deserialized);
    }
}
