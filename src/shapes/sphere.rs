// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::shape::{ Shape, ShapeHit, ShapeSample };
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Point2f, Vector2f, Vector3f, INV_PI, INV_TWOPI, PI };
use crate::math::ray::Ray3f;
use crate::math::warp::{ square_to_uniform_sphere };

pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius: radius.abs() }
    }

    pub fn center(&self) -> Vector3f {
        self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }
}

impl ComputationNode for Sphere {
    fn to_string(&self) -> String {
        format!("Sphere[center = {:?}, radius = {}]", self.center, self.radius)
    }
}

impl Shape for Sphere {
    fn bounding_box(&self) -> AABB {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        AABB::new(self.center - r, self.center + r)
    }

    fn ray_intersect(&self, ray: &Ray3f) -> Option<Float> {
        // |o + t d - c|^2 = r^2 with |d| = 1.
        let oc = ray.origin() - self.center;
        let half_b = oc.dot(&ray.dir());
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t0 = -half_b - sqrt_d;
        let t1 = -half_b + sqrt_d;
        if ray.test_segment(t0) {
            Some(t0)
        } else if ray.test_segment(t1) {
            Some(t1)
        } else {
            None
        }
    }

    fn hit_information(&self, ray: &Ray3f, t: Float) -> ShapeHit {
        let p = ray.at(t);
        let n = (p - self.center).normalize();
        let phi = {
            let phi = n.y.atan2(n.x);
            if phi < 0.0 { phi + 2.0 * PI } else { phi }
        };
        let theta = n.z.max(-1.0).min(1.0).acos();

        ShapeHit { p, geo_normal: n, sh_normal: n, uv: Vector2f::new(phi * INV_TWOPI, theta * INV_PI) }
    }

    fn sample_surface(&self, u: &Point2f) -> ShapeSample {
        let q = square_to_uniform_sphere(u);
        ShapeSample { p: self.center + self.radius * q, n: q, pdf: 1.0 / self.surface_area() }
    }

    fn surface_area(&self) -> Float {
        4.0 * PI * self.radius * self.radius
    }
}
