// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector3f };

/// Orthonormal basis; `z` is the normal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub s: Vector3f,
    pub t: Vector3f,
    pub n: Vector3f
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            s: Vector3f::new(1.0, 0.0, 0.0),
            t: Vector3f::new(0.0, 1.0, 0.0),
            n: Vector3f::new(0.0, 0.0, 1.0)
        }
    }
}

impl Frame {
    pub fn new(new_s: Vector3f, new_t: Vector3f, new_n: Vector3f) -> Frame {
        Frame {
            s: new_s,
            t: new_t,
            n: new_n
        }
    }

    /// Completes a unit normal into a frame.
    pub fn from_normal(n: &Vector3f) -> Frame {
        let up = if n.z.abs() < 0.999 {
            Vector3f::new(0.0, 0.0, 1.0)
        } else {
            Vector3f::new(1.0, 0.0, 0.0)
        };
        let s = n.cross(&up).normalize();
        let t = n.cross(&s).normalize();
        Frame { s, t, n: *n }
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.s), v.dot(&self.t), v.dot(&self.n))
    }

    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        v.x * self.s + v.y * self.t + v.z * self.n
    }

    pub fn cos_theta(v: &Vector3f) -> Float {
        v.z
    }

    pub fn sin_theta2(v: &Vector3f) -> Float {
        (1.0 - v.z * v.z).max(0.0)
    }

    pub fn sin_theta(v: &Vector3f) -> Float {
        Self::sin_theta2(v).sqrt()
    }

    pub fn tan_theta(v: &Vector3f) -> Float {
        if v.z == 0.0 {
            return 0.0;
        }
        Self::sin_theta(v) / v.z
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use crate::math::constants::Vector3f;

    #[test]
    fn test_frame_round_trip_and_orthonormal() {
        let n = Vector3f::new(0.3, -0.5, 0.8).normalize();
        let frame = Frame::from_normal(&n);
        assert!(frame.s.dot(&frame.t).abs() < 1e-5);
        assert!(frame.s.dot(&frame.n).abs() < 1e-5);
        assert!(frame.t.dot(&frame.n).abs() < 1e-5);

        let v = Vector3f::new(0.1, 0.7, -0.2);
        let back = frame.to_world(&frame.to_local(&v));
        assert!((back - v).norm() < 1e-5);
        assert!((frame.to_local(&n) - Vector3f::new(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_frame_pole_normal() {
        let frame = Frame::from_normal(&Vector3f::new(0.0, 0.0, 1.0));
        assert!((frame.s.norm() - 1.0).abs() < 1e-6);
        assert!((frame.t.norm() - 1.0).abs() < 1e-6);
    }
}
