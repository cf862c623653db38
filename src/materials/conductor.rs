// Copyright @yucwang 2026

use crate::core::bsdf::{ BSDFQueryRecord, EMeasure, BSDF };
use crate::core::computation_node::ComputationNode;
use crate::materials::microfacet::{ fresnel_conductor, reflect_local };
use crate::math::constants::{ Float, Point2f };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;

/// Smooth metal mirror.
pub struct Conductor {
    specular_reflectance: RGBSpectrum,
    eta: RGBSpectrum,
    k: RGBSpectrum,
}

impl Default for Conductor {
    fn default() -> Self {
        Self::new(RGBSpectrum::splat(1.0), RGBSpectrum::splat(0.0), RGBSpectrum::splat(1.0))
    }
}

impl Conductor {
    pub fn new(specular_reflectance: RGBSpectrum, eta: RGBSpectrum, k: RGBSpectrum) -> Self {
        Self { specular_reflectance, eta, k }
    }
}

impl ComputationNode for Conductor {
    fn to_string(&self) -> String {
        format!("Conductor[specularReflectance = {:?}, eta = {:?}, k = {:?}]",
                self.specular_reflectance, self.eta, self.k)
    }
}

impl BSDF for Conductor {
    fn eval(&self, _rec: &BSDFQueryRecord) -> RGBSpectrum {
        RGBSpectrum::default()
    }

    fn pdf(&self, _rec: &BSDFQueryRecord) -> Float {
        0.0
    }

    fn sample(&self, rec: &mut BSDFQueryRecord, _u: &Point2f) -> RGBSpectrum {
        rec.measure = EMeasure::Discrete;
        rec.eta = 1.0;
        let cos_i = Frame::cos_theta(&rec.wi);
        if cos_i <= 0.0 {
            return RGBSpectrum::default();
        }

        rec.wo = reflect_local(&rec.wi);
        self.specular_reflectance * fresnel_conductor(cos_i, 1.0, &self.eta, &self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::Conductor;
    use crate::core::bsdf::{ BSDFQueryRecord, EMeasure, BSDF };
    use crate::materials::microfacet::fresnel_conductor;
    use crate::math::constants::{ Point2f, Vector3f };
    use crate::math::spectrum::RGBSpectrum;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_conductor_mirrors_with_fresnel_weight() {
        let eta = RGBSpectrum::new(0.143, 0.374, 1.442);
        let k = RGBSpectrum::new(3.983, 2.385, 1.603);
        let tint = RGBSpectrum::new(1.0, 0.8, 0.6);
        let gold = Conductor::new(tint, eta, k);

        let wi = Vector3f::new(0.3, -0.2, 0.9).normalize();
        let mut rec = BSDFQueryRecord::new(wi);
        let weight = gold.sample(&mut rec, &Point2f::new(0.5, 0.5));

        assert_eq!(rec.measure, EMeasure::Discrete);
        assert!((rec.wo - Vector3f::new(-wi.x, -wi.y, wi.z)).norm() < 1e-6);

        let expected = tint * fresnel_conductor(wi.z, 1.0, &eta, &k);
        for idx in 0..3 {
            assert_abs_diff_eq!(weight[idx], expected[idx], epsilon = 1e-6);
        }
        assert!(weight.max_coeff() < 1.0);
        assert!(gold.eval(&rec).is_black());
        assert_eq!(gold.pdf(&rec), 0.0);
    }

    #[test]
    fn test_conductor_below_horizon_is_black() {
        let mirror = Conductor::default();
        let mut rec = BSDFQueryRecord::new(Vector3f::new(0.0, 0.6, -0.8));
        assert!(mirror.sample(&mut rec, &Point2f::new(0.1, 0.9)).is_black());
        assert_eq!(rec.measure, EMeasure::Discrete);
    }
}
