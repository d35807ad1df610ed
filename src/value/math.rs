//! Math value kinds: vectors, rotations, transforms and colors.

use serde::{Deserialize, Serialize};

/// Default tolerance for [`ApproxEq::approx_eq`].
pub const KINDA_SMALL_NUMBER: f64 = 1.0e-4;

// == Approximate Equality ==
/// Component-wise near-equality for float-backed kinds.
pub trait ApproxEq {
    fn approx_eq_within(&self, other: &Self, tolerance: f64) -> bool;

    fn approx_eq(&self, other: &Self) -> bool {
        self.approx_eq_within(other, KINDA_SMALL_NUMBER)
    }
}

fn near(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

impl ApproxEq for f64 {
    fn approx_eq_within(&self, other: &Self, tolerance: f64) -> bool {
        near(*self, *other, tolerance)
    }
}

impl ApproxEq for f32 {
    fn approx_eq_within(&self, other: &Self, tolerance: f64) -> bool {
        near(f64::from(*self), f64::from(*other), tolerance)
    }
}

// == Vectors ==
/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl ApproxEq for Vector3 {
    fn approx_eq_within(&self, other: &Self, tolerance: f64) -> bool {
        near(self.x, other.x, tolerance)
            && near(self.y, other.y, tolerance)
            && near(self.z, other.z, tolerance)
    }
}

/// 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl ApproxEq for Vector2 {
    fn approx_eq_within(&self, other: &Self, tolerance: f64) -> bool {
        near(self.x, other.x, tolerance) && near(self.y, other.y, tolerance)
    }
}

/// 4D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vector4 {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }
}

impl ApproxEq for Vector4 {
    fn approx_eq_within(&self, other: &Self, tolerance: f64) -> bool {
        near(self.x, other.x, tolerance)
            && near(self.y, other.y, tolerance)
            && near(self.z, other.z, tolerance)
            && near(self.w, other.w, tolerance)
    }
}

// == Rotations ==
/// Euler rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Rotator {
    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }
}

impl ApproxEq for Rotator {
    fn approx_eq_within(&self, other: &Self, tolerance: f64) -> bool {
        near(self.pitch, other.pitch, tolerance)
            && near(self.yaw, other.yaw, tolerance)
            && near(self.roll, other.roll, tolerance)
    }
}

/// Rotation quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ApproxEq for Quat {
    fn approx_eq_within(&self, other: &Self, tolerance: f64) -> bool {
        near(self.x, other.x, tolerance)
            && near(self.y, other.y, tolerance)
            && near(self.z, other.z, tolerance)
            && near(self.w, other.w, tolerance)
    }
}

// == Transform ==
/// Affine transform: rotation, translation and non-uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub rotation: Quat,
    pub translation: Vector3,
    pub scale: Vector3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vector3::ZERO,
        scale: Vector3::ONE,
    };

    pub fn new(rotation: Quat, translation: Vector3, scale: Vector3) -> Self {
        Self {
            rotation,
            translation,
            scale,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ApproxEq for Transform {
    fn approx_eq_within(&self, other: &Self, tolerance: f64) -> bool {
        self.rotation.approx_eq_within(&other.rotation, tolerance)
            && self.translation.approx_eq_within(&other.translation, tolerance)
            && self.scale.approx_eq_within(&other.scale, tolerance)
    }
}

// == Colors ==
/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Floating-point RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl ApproxEq for LinearColor {
    fn approx_eq_within(&self, other: &Self, tolerance: f64) -> bool {
        self.r.approx_eq_within(&other.r, tolerance)
            && self.g.approx_eq_within(&other.g, tolerance)
            && self.b.approx_eq_within(&other.b, tolerance)
            && self.a.approx_eq_within(&other.a, tolerance)
    }
}
