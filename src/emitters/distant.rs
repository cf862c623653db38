// Copyright @yucwang 2026

use crate::core::bsdf::EMeasure;
use crate::core::computation_node::ComputationNode;
use crate::core::emitter::{ Emitter, EmitterQueryRecord };
use crate::core::error::{ RenderError, Result };
use crate::math::constants::{ Float, Point2f, Vector3f, PI };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Parallel light travelling along `direction`, with `power` spread over
/// a disk of radius `world_radius`.
pub struct DistantLight {
    power: RGBSpectrum,
    direction: Vector3f,
    world_radius: Float,
}

impl DistantLight {
    pub fn new(power: RGBSpectrum, direction: Vector3f) -> Self {
        Self::with_world_radius(power, direction, 1000.0)
    }

    pub fn with_world_radius(power: RGBSpectrum, direction: Vector3f, world_radius: Float) -> Self {
        Self { power, direction: direction.normalize(), world_radius }
    }
}

impl ComputationNode for DistantLight {
    fn to_string(&self) -> String {
        format!("DistantLight[power = {:?}, lightToPointDirection = {:?}, worldRadius = {}]",
                self.power, self.direction, self.world_radius)
    }
}

impl Emitter for DistantLight {
    fn sample(&self, rec: &mut EmitterQueryRecord, _u: &Point2f) -> RGBSpectrum {
        rec.wi = -self.direction;
        rec.p = rec.ref_p - 2.0 * self.world_radius * self.direction;
        rec.n = self.direction;
        rec.pdf = 1.0;
        rec.measure = EMeasure::Discrete;
        self.eval(rec)
    }

    fn eval(&self, _rec: &EmitterQueryRecord) -> RGBSpectrum {
        self.power / (PI * self.world_radius * self.world_radius)
    }

    fn pdf(&self, _rec: &EmitterQueryRecord) -> Float {
        1.0
    }

    fn sample_photon(&self, _u1: &Point2f, _u2: &Point2f) -> Result<(Ray3f, RGBSpectrum)> {
        Err(RenderError::UnsupportedPhotonEmission(self.to_string()))
    }
}
