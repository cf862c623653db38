// Copyright @yucwang 2026

use crate::core::bsdf::{ BSDFQueryRecord, EMeasure, BSDF };
use crate::core::computation_node::ComputationNode;
use crate::materials::microfacet::{ fresnel_dielectric, reflect, roughness_to_alpha, trowbridge_reitz_g1 };
use crate::math::constants::{ Float, Point2f, INV_PI };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ square_to_cosine_hemisphere, square_to_trowbridge_reitz, trowbridge_reitz_d };

/// Diffuse base under a rough Trowbridge-Reitz coating. `coef` is the
/// probability of sampling the coating lobe.
pub struct Plastic {
    roughness: Float,
    alpha: Float,
    int_ior: Float,
    ext_ior: Float,
    kd: RGBSpectrum,
    ks: RGBSpectrum,
    coef: Float,
}

impl Default for Plastic {
    fn default() -> Self {
        Self::new(0.1, 1.5, 1.0, RGBSpectrum::splat(0.25), RGBSpectrum::splat(0.25), 0.5)
    }
}

impl Plastic {
    pub fn new(roughness: Float, int_ior: Float, ext_ior: Float,
               kd: RGBSpectrum, ks: RGBSpectrum, coef: Float) -> Self {
        Self {
            roughness,
            alpha: roughness_to_alpha(roughness),
            int_ior,
            ext_ior,
            kd,
            ks,
            coef: coef.max(0.0).min(1.0),
        }
    }

    fn is_valid_pair(rec: &BSDFQueryRecord) -> bool {
        rec.measure == EMeasure::SolidAngle
            && Frame::cos_theta(&rec.wi) > 0.0
            && Frame::cos_theta(&rec.wo) > 0.0
    }
}

impl ComputationNode for Plastic {
    fn to_string(&self) -> String {
        format!("Plastic[roughness = {}, alpha = {}, intIOR = {}, extIOR = {}, kd = {:?}, ks = {:?}, coef = {}]",
                self.roughness, self.alpha, self.int_ior, self.ext_ior, self.kd, self.ks, self.coef)
    }
}

impl BSDF for Plastic {
    fn eval(&self, rec: &BSDFQueryRecord) -> RGBSpectrum {
        if !Self::is_valid_pair(rec) {
            return RGBSpectrum::default();
        }

        let cos_i = Frame::cos_theta(&rec.wi);
        let cos_o = Frame::cos_theta(&rec.wo);
        let wh = (rec.wi + rec.wo).normalize();
        let d = trowbridge_reitz_d(&wh, self.alpha);
        let g = trowbridge_reitz_g1(&rec.wi, self.alpha) * trowbridge_reitz_g1(&rec.wo, self.alpha);
        let f = fresnel_dielectric(wh.dot(&rec.wi), self.ext_ior, self.int_ior);

        self.kd * INV_PI + self.ks * (d * f * g / (4.0 * cos_i * cos_o))
    }

    fn pdf(&self, rec: &BSDFQueryRecord) -> Float {
        if !Self::is_valid_pair(rec) {
            return 0.0;
        }

        let wh = (rec.wi + rec.wo).normalize();
        let wh_dot_wo = wh.dot(&rec.wo);
        let specular = if wh_dot_wo > 0.0 {
            trowbridge_reitz_d(&wh, self.alpha) * Frame::cos_theta(&wh) / (4.0 * wh_dot_wo)
        } else {
            0.0
        };
        let diffuse = INV_PI * Frame::cos_theta(&rec.wo);

        self.coef * specular + (1.0 - self.coef) * diffuse
    }

    fn sample(&self, rec: &mut BSDFQueryRecord, u: &Point2f) -> RGBSpectrum {
        rec.measure = EMeasure::SolidAngle;
        rec.eta = 1.0;
        if Frame::cos_theta(&rec.wi) <= 0.0 {
            return RGBSpectrum::default();
        }

        if u.x < self.coef {
            let u_spec = Point2f::new(u.x / self.coef, u.y);
            let wh = square_to_trowbridge_reitz(&u_spec, self.alpha);
            rec.wo = reflect(&rec.wi, &wh).normalize();
        } else {
            let u_diff = Point2f::new((u.x - self.coef) / (1.0 - self.coef), u.y);
            rec.wo = square_to_cosine_hemisphere(&u_diff);
        }

        let pdf = self.pdf(rec);
        if pdf <= 0.0 {
            return RGBSpectrum::default();
        }

        self.eval(rec) * Frame::cos_theta(&rec.wo) / pdf
    }
}
