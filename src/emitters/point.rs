// Copyright @yucwang 2026

use crate::core::bsdf::EMeasure;
use crate::core::computation_node::ComputationNode;
use crate::core::emitter::{ Emitter, EmitterQueryRecord };
use crate::core::error::Result;
use crate::math::constants::{ Float, Point2f, Vector3f, INV_FOURPI };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::square_to_uniform_sphere;

/// Isotropic point light of total emitted `power`.
pub struct PointLight {
    power: RGBSpectrum,
    position: Vector3f,
}

impl PointLight {
    pub fn new(power: RGBSpectrum, position: Vector3f) -> Self {
        Self { power, position }
    }
}

impl ComputationNode for PointLight {
    fn to_string(&self) -> String {
        format!("PointLight[power = {:?}, position = {:?}]", self.power, self.position)
    }
}

impl Emitter for PointLight {
    fn sample(&self, rec: &mut EmitterQueryRecord, _u: &Point2f) -> RGBSpectrum {
        let d = self.position - rec.ref_p;
        let dist = d.norm();
        if dist <= 0.0 {
            return RGBSpectrum::default();
        }

        rec.p = self.position;
        rec.wi = d / dist;
        rec.n = -rec.wi;
        rec.pdf = 1.0;
        rec.measure = EMeasure::Discrete;
        self.eval(rec)
    }

    /// Irradiance arriving at `rec.ref_p`.
    fn eval(&self, rec: &EmitterQueryRecord) -> RGBSpectrum {
        let dist2 = (self.position - rec.ref_p).norm_squared();
        if dist2 <= 0.0 {
            return RGBSpectrum::default();
        }

        self.power * (INV_FOURPI / dist2)
    }

    fn pdf(&self, _rec: &EmitterQueryRecord) -> Float {
        1.0
    }

    fn sample_photon(&self, _u1: &Point2f, u2: &Point2f) -> Result<(Ray3f, RGBSpectrum)> {
        let dir = square_to_uniform_sphere(u2);
        Ok((Ray3f::new(self.position, dir, None, None), self.power))
    }
}
