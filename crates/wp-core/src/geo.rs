//! 3-D position type and the vector helpers the router and followers need.
//!
//! `Vec3` uses `f32` like the scene it is lifted from.  Lengths are
//! evaluated in `f64` and rounded back, so squaring a large coordinate gap
//! cannot overflow before the square root.

use std::ops::{Add, Mul, Sub};

/// A point (or displacement) in world space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(self) -> f32 {
        hypot3(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Euclidean distance to `other`.  This is the edge weight between two
    /// linked markers.
    ///
    /// Infinite only if the true distance exceeds `f32::MAX`.
    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        hypot3(
            other.x as f64 - self.x as f64,
            other.y as f64 - self.y as f64,
            other.z as f64 - self.z as f64,
        )
    }

    #[inline]
    pub fn distance_squared(self, other: Vec3) -> f32 {
        (other - self).length_squared()
    }

    /// Step from `self` toward `target` by at most `max_delta`.
    ///
    /// Lands exactly on `target` when it is within reach, so callers never
    /// overshoot a waypoint.
    pub fn move_towards(self, target: Vec3, max_delta: f32) -> Vec3 {
        let delta = target - self;
        let dist = delta.length();
        if dist <= max_delta || dist == 0.0 {
            return target;
        }
        self + delta * (max_delta / dist)
    }

    /// Linear interpolation, `t` clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        self + (other - self) * t.clamp(0.0, 1.0)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

#[inline]
fn hypot3(x: f64, y: f64, z: f64) -> f32 {
    (x * x + y * y + z * z).sqrt() as f32
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
