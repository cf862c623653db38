/* Copyright 2020 @Yuchen Wong */

pub type Float = f32;
pub type Int = i32;

pub type Vector2f = nalgebra::Vector2<Float>;
pub type Vector3f = nalgebra::Vector3<Float>;
pub type Point2f = Vector2f;

/// Offset used to keep spawned rays off their own surface.
pub const EPSILON: Float = 1e-4;
pub const PI: Float = std::f32::consts::PI;
pub const INV_PI: Float = 0.31830988618;
pub const INV_TWOPI: Float = 0.15915494309;
pub const INV_FOURPI: Float = 0.07957747155;

/// Bounds used for empty boxes.
pub const FLOAT_MAX: Float = Float::MAX;
pub const FLOAT_MIN: Float = Float::MIN;
