// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tweenable value types and their interpolation strategies.
//!
//! Every kind interpolates componentwise and unclamped, so overshooting
//! curves push values past the `[start, goal]` range. Rotations blend their
//! Euler angles rather than slerping; large angle differences can therefore
//! take the long way round or pass through gimbal configurations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

use crate::keyframe::Interpolation;

/// Kind of value a property holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Scalar float
    Float,
    /// 2D vector
    Vec2,
    /// 3D vector
    Vec3,
    /// Rotation quaternion
    Rotation,
    /// RGBA color
    Color,
}

impl ValueKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Float => "Float",
            Self::Vec2 => "Vec2",
            Self::Vec3 => "Vec3",
            Self::Rotation => "Rotation",
            Self::Color => "Color",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Create a new vector
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another vector
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

/// 3D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Create a new vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another vector
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Rotation quaternion (x, y, z, w)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W (scalar) component
    pub w: f32,
}

impl Quat {
    /// The identity rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a quaternion from raw components
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Build a rotation from Euler angles in degrees.
    ///
    /// Applied as a roll around Z, then pitch around X, then yaw around Y.
    pub fn from_euler(degrees: Vec3) -> Self {
        let (sx, cx) = (degrees.x.to_radians() * 0.5).sin_cos();
        let (sy, cy) = (degrees.y.to_radians() * 0.5).sin_cos();
        let (sz, cz) = (degrees.z.to_radians() * 0.5).sin_cos();

        let qx = Self::new(sx, 0.0, 0.0, cx);
        let qy = Self::new(0.0, sy, 0.0, cy);
        let qz = Self::new(0.0, 0.0, sz, cz);

        qy * qx * qz
    }

    /// Decompose into Euler angles in degrees, each in `[0, 360)`.
    ///
    /// Inverse of [`Quat::from_euler`]. At gimbal lock the roll is folded
    /// into the yaw and reported as zero.
    pub fn to_euler(&self) -> Vec3 {
        let Self { x, y, z, w } = *self;

        let m00 = 1.0 - 2.0 * (y * y + z * z);
        let m02 = 2.0 * (x * z + w * y);
        let m10 = 2.0 * (x * y + w * z);
        let m11 = 1.0 - 2.0 * (x * x + z * z);
        let m12 = 2.0 * (y * z - w * x);
        let m20 = 2.0 * (x * z - w * y);
        let m22 = 1.0 - 2.0 * (x * x + y * y);

        let sin_pitch = (-m12).clamp(-1.0, 1.0);
        let pitch = sin_pitch.asin();
        let (yaw, roll) = if sin_pitch.abs() < 0.999_999 {
            (m02.atan2(m22), m10.atan2(m11))
        } else {
            ((-m20).atan2(m00), 0.0)
        };

        Vec3::new(
            normalize_degrees(pitch.to_degrees()),
            normalize_degrees(yaw.to_degrees()),
            normalize_degrees(roll.to_degrees()),
        )
    }

    /// Dot product of the raw components
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Whether two quaternions describe the same rotation within `epsilon`
    pub fn approx_eq_rotation(&self, other: &Self, epsilon: f32) -> bool {
        1.0 - self.dot(other).abs() < epsilon
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product
    fn mul(self, rhs: Self) -> Self {
        let a = self;
        let b = rhs;
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}

impl From<[f32; 4]> for Quat {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// RGBA color with unclamped float channels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create a color from channels
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Euclidean distance over all four channels
    pub fn distance(&self, other: &Self) -> f32 {
        let dr = other.r - self.r;
        let dg = other.g - self.g;
        let db = other.b - self.b;
        let da = other.a - self.a;
        (dr * dr + dg * dg + db * db + da * da).sqrt()
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

/// A property value of any supported kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Float value
    Float(f32),
    /// 2D vector
    Vec2(Vec2),
    /// 3D vector
    Vec3(Vec3),
    /// Rotation quaternion
    Rotation(Quat),
    /// Color (RGBA)
    Color(Color),
}

impl Value {
    /// Get the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Rotation(_) => ValueKind::Rotation,
            Value::Color(_) => ValueKind::Color,
        }
    }

    /// Get as float if possible
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as Vec2 if possible
    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Value::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as Vec3 if possible
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Value::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as rotation if possible
    pub fn as_rotation(&self) -> Option<Quat> {
        match self {
            Value::Rotation(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as color if possible
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(v) => Some(*v),
            _ => None,
        }
    }
}

/// A value that an interpolation task can drive.
///
/// Implementations define the unclamped blend used every tick and the
/// distance used to turn a speed into a duration.
pub trait Tweenable: Clone + fmt::Debug + 'static {
    /// Kind tag checked against a property at resolve time
    const KIND: ValueKind;

    /// Blend towards `goal` by `t`, without clamping `t`
    fn lerp_unclamped(&self, goal: &Self, t: f32) -> Self;

    /// Distance to `other`, used by speed-based pacing
    fn distance(&self, other: &Self) -> f32;

    /// Wrap into a dynamic [`Value`]
    fn into_value(self) -> Value;

    /// Unwrap from a dynamic [`Value`] of the same kind
    fn from_value(value: Value) -> Option<Self>;
}

impl Tweenable for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn lerp_unclamped(&self, goal: &Self, t: f32) -> Self {
        Interpolation::lerp(*self, *goal, t)
    }

    fn distance(&self, other: &Self) -> f32 {
        (other - self).abs()
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_float()
    }
}

impl Tweenable for Vec2 {
    const KIND: ValueKind = ValueKind::Vec2;

    fn lerp_unclamped(&self, goal: &Self, t: f32) -> Self {
        Vec2::new(
            Interpolation::lerp(self.x, goal.x, t),
            Interpolation::lerp(self.y, goal.y, t),
        )
    }

    fn distance(&self, other: &Self) -> f32 {
        Vec2::distance(self, other)
    }

    fn into_value(self) -> Value {
        Value::Vec2(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_vec2()
    }
}

impl Tweenable for Vec3 {
    const KIND: ValueKind = ValueKind::Vec3;

    fn lerp_unclamped(&self, goal: &Self, t: f32) -> Self {
        Vec3::new(
            Interpolation::lerp(self.x, goal.x, t),
            Interpolation::lerp(self.y, goal.y, t),
            Interpolation::lerp(self.z, goal.z, t),
        )
    }

    fn distance(&self, other: &Self) -> f32 {
        Vec3::distance(self, other)
    }

    fn into_value(self) -> Value {
        Value::Vec3(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_vec3()
    }
}

impl Tweenable for Quat {
    const KIND: ValueKind = ValueKind::Rotation;

    fn lerp_unclamped(&self, goal: &Self, t: f32) -> Self {
        let euler = self.to_euler().lerp_unclamped(&goal.to_euler(), t);
        Quat::from_euler(euler)
    }

    fn distance(&self, other: &Self) -> f32 {
        self.to_euler().distance(&other.to_euler())
    }

    fn into_value(self) -> Value {
        Value::Rotation(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_rotation()
    }
}

impl Tweenable for Color {
    const KIND: ValueKind = ValueKind::Color;

    fn lerp_unclamped(&self, goal: &Self, t: f32) -> Self {
        Color::rgba(
            Interpolation::lerp(self.r, goal.r, t),
            Interpolation::lerp(self.g, goal.g, t),
            Interpolation::lerp(self.b, goal.b, t),
            Interpolation::lerp(self.a, goal.a, t),
        )
    }

    fn distance(&self, other: &Self) -> f32 {
        Color::distance(self, other)
    }

    fn into_value(self) -> Value {
        Value::Color(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_color()
    }
}
