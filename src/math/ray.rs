// Copyright 2020 @TwoCookingMice

use super::constants::{ EPSILON, Float, Vector3f };

/// Ray with a unit direction and a valid parameter range `[min_t, max_t]`.
/// Intersection routines shrink `max_t` as closer hits are found.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    /// The range defaults to `[EPSILON, inf)`.
    pub fn new(origin: Vector3f, dir: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self {
            origin,
            dir: dir.normalize(),
            min_t: min_t.unwrap_or(EPSILON),
            max_t: max_t.unwrap_or(Float::INFINITY),
        }
    }

    /// Shadow ray from `origin` towards `target`, stopping `EPSILON` short of it.
    pub fn segment(origin: Vector3f, target: Vector3f) -> Self {
        let offset = target - origin;
        let length = (offset.norm() - EPSILON).max(EPSILON);
        Self::new(origin, offset, Some(EPSILON), Some(length))
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + t * self.dir
    }

    pub fn test_segment(&self, t: Float) -> bool {
        (self.min_t..=self.max_t).contains(&t)
    }

    /// Clips the range to `t` if it lies inside it.
    pub fn update(&mut self, t: Float) -> bool {
        let inside = self.test_segment(t);
        if inside {
            self.max_t = t;
        }
        inside
    }
}
