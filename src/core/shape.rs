// Copyright @yucwang 2023

use crate::core::computation_node::ComputationNode;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Point2f, Vector2f, Vector3f };
use crate::math::ray::Ray3f;

/// Local surface data at a ray hit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeHit {
    pub p: Vector3f,
    pub geo_normal: Vector3f,
    pub sh_normal: Vector3f,
    pub uv: Vector2f,
}

/// A point drawn uniformly over a shape's surface, `pdf` per unit area.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeSample {
    pub p: Vector3f,
    pub n: Vector3f,
    pub pdf: Float,
}

pub trait Shape: ComputationNode + Send + Sync {
    fn bounding_box(&self) -> AABB;

    /// Closest hit distance inside `[ray.min_t, ray.max_t]`.
    fn ray_intersect(&self, ray: &Ray3f) -> Option<Float>;

    fn hit_information(&self, ray: &Ray3f, t: Float) -> ShapeHit;

    fn sample_surface(&self, u: &Point2f) -> ShapeSample;

    fn pdf_surface(&self, _p: &Vector3f) -> Float {
        let area = self.surface_area();
        if area > 0.0 { 1.0 / area } else { 0.0 }
    }

    fn surface_area(&self) -> Float;
}
