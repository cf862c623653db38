// Copyright @yucwang 2023

use crate::core::bsdf::{ BSDFQueryRecord, EMeasure, BSDF };
use crate::core::computation_node::ComputationNode;
use crate::math::constants::{ Float, Point2f, INV_PI };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ square_to_cosine_hemisphere, square_to_cosine_hemisphere_pdf };

/// Ideal Lambertian reflector.
pub struct Diffuse {
    albedo: RGBSpectrum
}

impl Diffuse {
    pub fn new(albedo: RGBSpectrum) -> Self {
        Self { albedo }
    }

    fn same_hemisphere(rec: &BSDFQueryRecord) -> bool {
        rec.measure == EMeasure::SolidAngle
            && Frame::cos_theta(&rec.wi) > 0.0
            && Frame::cos_theta(&rec.wo) > 0.0
    }
}

impl ComputationNode for Diffuse {
    fn to_string(&self) -> String {
        format!("Diffuse[albedo = {:?}]", self.albedo)
    }
}

impl BSDF for Diffuse {
    fn eval(&self, rec: &BSDFQueryRecord) -> RGBSpectrum {
        if !Self::same_hemisphere(rec) {
            return RGBSpectrum::default();
        }

        self.albedo * INV_PI
    }

    fn pdf(&self, rec: &BSDFQueryRecord) -> Float {
        if !Self::same_hemisphere(rec) {
            return 0.0;
        }

        INV_PI * Frame::cos_theta(&rec.wo)
    }

    fn sample(&self, rec: &mut BSDFQueryRecord, u: &Point2f) -> RGBSpectrum {
        rec.measure = EMeasure::SolidAngle;
        rec.eta = 1.0;
        if Frame::cos_theta(&rec.wi) <= 0.0 {
            return RGBSpectrum::default();
        }

        rec.wo = square_to_cosine_hemisphere(u);
        if square_to_cosine_hemisphere_pdf(&rec.wo) <= 0.0 {
            return RGBSpectrum::default();
        }

        // eval * cos / pdf
        self.albedo
    }

    fn is_diffuse(&self) -> bool {
        true
    }
}
