// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::shape::{ Shape, ShapeHit, ShapeSample };
use crate::math::aabb::AABB;
use crate::math::constants::{ EPSILON, Float, Point2f, Vector2f, Vector3f };
use crate::math::ray::Ray3f;

/// Parallelogram `origin + a * edge_u + b * edge_v`, `a, b` in `[0, 1]`,
/// facing `normalize(edge_u x edge_v)`.
pub struct Rectangle {
    origin: Vector3f,
    edge_u: Vector3f,
    edge_v: Vector3f,
    normal: Vector3f,
    area: Float,
}

impl Rectangle {
    pub fn new(origin: Vector3f, edge_u: Vector3f, edge_v: Vector3f) -> Self {
        let cross = edge_u.cross(&edge_v);
        let area = cross.norm();
        let normal = if area > 0.0 { cross / area } else { Vector3f::new(0.0, 0.0, 1.0) };

        Self { origin, edge_u, edge_v, normal, area }
    }

    /// Axis aligned square of side `size` centred at `center`, facing `+z`
    /// or `-z`.
    pub fn square_z(center: Vector3f, size: Float, facing_up: bool) -> Self {
        let h = 0.5 * size;
        let u = Vector3f::new(size, 0.0, 0.0);
        let v = Vector3f::new(0.0, size, 0.0);
        if facing_up {
            Self::new(center - Vector3f::new(h, h, 0.0), u, v)
        } else {
            Self::new(center - Vector3f::new(h, h, 0.0), v, u)
        }
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    fn local_coordinates(&self, p: &Vector3f) -> Vector2f {
        let d = p - self.origin;
        let denom = self.area * self.area;
        Vector2f::new(d.cross(&self.edge_v).dot(&(self.normal * self.area)) / denom,
                      self.edge_u.cross(&d).dot(&(self.normal * self.area)) / denom)
    }
}

impl ComputationNode for Rectangle {
    fn to_string(&self) -> String {
        format!("Rectangle[origin = {:?}, u = {:?}, v = {:?}]", self.origin, self.edge_u, self.edge_v)
    }
}

impl Shape for Rectangle {
    fn bounding_box(&self) -> AABB {
        let mut bbox = AABB::default();
        for corner in [self.origin,
                       self.origin + self.edge_u,
                       self.origin + self.edge_v,
                       self.origin + self.edge_u + self.edge_v].iter() {
            bbox.expand_by_point(corner);
        }
        // Keep flat boxes from being degenerate in the slab test.
        for idx in 0..3 {
            bbox.p_min[idx] -= EPSILON;
            bbox.p_max[idx] += EPSILON;
        }
        bbox
    }

    fn ray_intersect(&self, ray: &Ray3f) -> Option<Float> {
        if self.area <= 0.0 {
            return None;
        }

        let denom = self.normal.dot(&ray.dir());
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = self.normal.dot(&(self.origin - ray.origin())) / denom;
        if !ray.test_segment(t) {
            return None;
        }

        let ab = self.local_coordinates(&ray.at(t));
        if ab.x < 0.0 || ab.x > 1.0 || ab.y < 0.0 || ab.y > 1.0 {
            return None;
        }

        Some(t)
    }

    fn hit_information(&self, ray: &Ray3f, t: Float) -> ShapeHit {
        let p = ray.at(t);
        ShapeHit { p, geo_normal: self.normal, sh_normal: self.normal, uv: self.local_coordinates(&p) }
    }

    fn sample_surface(&self, u: &Point2f) -> ShapeSample {
        let p = self.origin + u.x * self.edge_u + u.y * self.edge_v;
        ShapeSample { p, n: self.normal, pdf: if self.area > 0.0 { 1.0 / self.area } else { 0.0 } }
    }

    fn surface_area(&self) -> Float {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::Rectangle;
    use crate::core::shape::Shape;
    use crate::math::constants::{ Point2f, Vector3f };
    use crate::math::ray::Ray3f;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rectangle_intersection() {
        let rect = Rectangle::new(Vector3f::new(-1.0, -1.0, 0.0),
                                  Vector3f::new(2.0, 0.0, 0.0),
                                  Vector3f::new(0.0, 2.0, 0.0));
        assert_abs_diff_eq!(rect.surface_area(), 4.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rect.normal().z, 1.0, epsilon = 1e-6);

        let ray = Ray3f::new(Vector3f::new(0.5, 0.5, 2.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let t = rect.ray_intersect(&ray).unwrap();
        assert_abs_diff_eq!(t, 2.0, epsilon = 1e-5);
        let hit = rect.hit_information(&ray, t);
        assert_abs_diff_eq!(hit.uv.x, 0.75, epsilon = 1e-5);
        assert_abs_diff_eq!(hit.uv.y, 0.75, epsilon = 1e-5);

        let outside = Ray3f::new(Vector3f::new(1.5, 0.0, 2.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert!(rect.ray_intersect(&outside).is_none());
        let parallel = Ray3f::new(Vector3f::new(0.0, 0.0, 1.0), Vector3f::new(1.0, 0.0, 0.0), None, None);
        assert!(rect.ray_intersect(&parallel).is_none());
    }

    #[test]
    fn test_rectangle_sampling_and_orientation() {
        let down = Rectangle::square_z(Vector3f::new(0.0, 0.0, 1.0), 0.5, false);
        assert_abs_diff_eq!(down.normal().z, -1.0, epsilon = 1e-6);
        let s = down.sample_surface(&Point2f::new(0.5, 0.5));
        assert!((s.p - Vector3f::new(0.0, 0.0, 1.0)).norm() < 1e-5);
        assert_abs_diff_eq!(s.pdf, 4.0, epsilon = 1e-5);
    }
}
