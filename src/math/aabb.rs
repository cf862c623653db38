// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Vector3f, FLOAT_MIN, FLOAT_MAX };
use super::ray::Ray3f;

/// Axis aligned box. The default box is empty (inverted) so that it can be
/// grown point by point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub p_min: Vector3f,
    pub p_max: Vector3f
}

impl Default for AABB {
    fn default() -> Self {
        Self { p_min: Vector3f::repeat(FLOAT_MAX),
               p_max: Vector3f::repeat(FLOAT_MIN) }
    }
}

impl AABB {
    /// Corners may be given in any order.
    pub fn new(a: Vector3f, b: Vector3f) -> Self {
        Self { p_min: a.inf(&b), p_max: a.sup(&b) }
    }

    pub fn center(&self) -> Vector3f {
        (self.p_min + self.p_max) * 0.5
    }

    pub fn expand_by_point(&mut self, p: &Vector3f) {
        self.p_min = self.p_min.inf(p);
        self.p_max = self.p_max.sup(p);
    }

    pub fn expand_by_aabb(&mut self, other: &AABB) {
        self.p_min = self.p_min.inf(&other.p_min);
        self.p_max = self.p_max.sup(&other.p_max);
    }

    /// Whether the ray overlaps the box anywhere inside `[min_t, max_t]`.
    pub fn ray_intersect(&self, ray: &Ray3f) -> bool {
        if !self.is_valid() {
            return false;
        }

        let o = ray.origin();
        let d = ray.dir();
        let mut near = ray.min_t;
        let mut far = ray.max_t;

        for axis in 0..3 {
            if d[axis] == 0.0 {
                // Parallel to this slab.
                if o[axis] < self.p_min[axis] || o[axis] > self.p_max[axis] {
                    return false;
                }
                continue;
            }

            let inv_d = d[axis].recip();
            let ta = (self.p_min[axis] - o[axis]) * inv_d;
            let tb = (self.p_max[axis] - o[axis]) * inv_d;
            near = near.max(ta.min(tb));
            far = far.min(ta.max(tb));
            if near > far {
                return false;
            }
        }

        true
    }

    /// Edge lengths, zero for an empty box.
    pub fn extents(&self) -> Vector3f {
        if self.is_valid() {
            self.p_max - self.p_min
        } else {
            Vector3f::zeros()
        }
    }

    pub fn surface_area(&self) -> Float {
        let e = self.extents();
        2.0 * (e.x * e.y + e.y * e.z + e.z * e.x)
    }

    /// Index of the longest axis.
    pub fn max_extent(&self) -> usize {
        self.extents().imax()
    }

    pub fn is_valid(&self) -> bool {
        self.p_min.iter().zip(self.p_max.iter()).all(|(lo, hi)| lo <= hi)
    }
}
