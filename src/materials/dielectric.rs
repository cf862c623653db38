// Copyright @yucwang 2026

use crate::core::bsdf::{ BSDFQueryRecord, EMeasure, BSDF };
use crate::core::computation_node::ComputationNode;
use crate::materials::microfacet::{ fresnel_dielectric, reflect_local, refract };
use crate::math::constants::{ Float, Point2f, Vector3f };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;

pub const DEFAULT_INT_IOR: Float = 1.5046;
pub const DEFAULT_EXT_IOR: Float = 1.000277;

/// Smooth glass interface; only reachable through `sample`.
pub struct Dielectric {
    int_ior: Float,
    ext_ior: Float,
}

impl Default for Dielectric {
    fn default() -> Self {
        Self::new(DEFAULT_INT_IOR, DEFAULT_EXT_IOR)
    }
}

impl Dielectric {
    pub fn new(int_ior: Float, ext_ior: Float) -> Self {
        Self { int_ior, ext_ior }
    }
}

impl ComputationNode for Dielectric {
    fn to_string(&self) -> String {
        format!("Dielectric[intIOR = {}, extIOR = {}]", self.int_ior, self.ext_ior)
    }
}

impl BSDF for Dielectric {
    fn eval(&self, _rec: &BSDFQueryRecord) -> RGBSpectrum {
        RGBSpectrum::default()
    }

    fn pdf(&self, _rec: &BSDFQueryRecord) -> Float {
        0.0
    }

    fn sample(&self, rec: &mut BSDFQueryRecord, u: &Point2f) -> RGBSpectrum {
        let cos_i = Frame::cos_theta(&rec.wi);
        let f = fresnel_dielectric(cos_i, self.ext_ior, self.int_ior);
        rec.measure = EMeasure::Discrete;

        if u.x < f {
            rec.wo = reflect_local(&rec.wi);
            rec.eta = 1.0;
            return RGBSpectrum::splat(1.0);
        }

        let entering = cos_i > 0.0;
        let (n, eta_from, eta_to) = if entering {
            (Vector3f::new(0.0, 0.0, 1.0), self.ext_ior, self.int_ior)
        } else {
            (Vector3f::new(0.0, 0.0, -1.0), self.int_ior, self.ext_ior)
        };

        match refract(&rec.wi, &n, eta_from / eta_to) {
            Some(wt) => {
                rec.wo = wt.normalize();
                rec.eta = eta_to / eta_from;
                RGBSpectrum::splat(1.0)
            }
            None => RGBSpectrum::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Dielectric;
    use crate::core::bsdf::{ BSDFQueryRecord, EMeasure, BSDF };
    use crate::math::constants::{ Point2f, Vector3f };
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_dielectric_reflects_or_refracts() {
        let glass = Dielectric::default();
        let wi = Vector3f::new(0.6, 0.0, 0.8);

        let mut rec = BSDFQueryRecord::new(wi);
        let w = glass.sample(&mut rec, &Point2f::new(0.0, 0.5));
        assert_eq!(rec.measure, EMeasure::Discrete);
        assert_eq!(rec.wo, Vector3f::new(-0.6, 0.0, 0.8));
        assert_eq!(w.r(), 1.0);

        let mut rec = BSDFQueryRecord::new(wi);
        glass.sample(&mut rec, &Point2f::new(0.99, 0.5));
        assert!(rec.wo.z < 0.0);
        assert_abs_diff_eq!(rec.wo.norm(), 1.0, epsilon = 1e-5);
        assert!(rec.eta > 1.0);

        // Leaving the glass beyond the critical angle.
        let inside = Vector3f::new(0.9, 0.0, -0.43589).normalize();
        let mut rec = BSDFQueryRecord::new(inside);
        let w = glass.sample(&mut rec, &Point2f::new(0.999, 0.5));
        assert_eq!(rec.wo, Vector3f::new(-inside.x, -inside.y, inside.z));
        assert!(!w.is_black());
    }
}
