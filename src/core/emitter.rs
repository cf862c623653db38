// Copyright @yucwang 2026

use crate::core::bsdf::EMeasure;
use crate::core::computation_node::ComputationNode;
use crate::core::error::Result;
use crate::math::constants::{ Float, Point2f, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Light sampling transaction seen from a reference point. `wi` always
/// points from `ref_p` towards the light sample `p`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EmitterQueryRecord {
    pub ref_p: Vector3f,
    pub p: Vector3f,
    pub n: Vector3f,
    pub wi: Vector3f,
    pub pdf: Float,
    pub measure: EMeasure,
}

impl EmitterQueryRecord {
    /// Record to be filled by `Emitter::sample`.
    pub fn new(ref_p: Vector3f) -> Self {
        Self {
            ref_p,
            p: Vector3f::zeros(),
            n: Vector3f::zeros(),
            wi: Vector3f::zeros(),
            pdf: 0.0,
            measure: EMeasure::Unknown,
        }
    }

    /// Record describing a point on an emitter that was hit by a ray.
    pub fn from_hit(ref_p: Vector3f, p: Vector3f, n: Vector3f) -> Self {
        let d = p - ref_p;
        let dist = d.norm();
        let wi = if dist > 0.0 { d / dist } else { Vector3f::zeros() };
        Self { ref_p, p, n, wi, pdf: 0.0, measure: EMeasure::SolidAngle }
    }

    pub fn distance(&self) -> Float {
        (self.p - self.ref_p).norm()
    }

    /// Visibility segment between the reference point and the sample.
    pub fn shadow_ray(&self) -> Ray3f {
        Ray3f::segment(self.ref_p, self.p)
    }

    pub fn is_discrete(&self) -> bool {
        self.measure == EMeasure::Discrete
    }
}

pub trait Emitter: ComputationNode + Send + Sync {
    /// Fills `rec` and returns `eval(rec) / pdf` in solid angle at the
    /// reference point. Discrete lights return the incident irradiance.
    fn sample(&self, rec: &mut EmitterQueryRecord, u: &Point2f) -> RGBSpectrum;

    fn eval(&self, rec: &EmitterQueryRecord) -> RGBSpectrum;

    /// Solid angle density of `sample` producing `rec`; one for lights
    /// that are sampled with a probability mass.
    fn pdf(&self, rec: &EmitterQueryRecord) -> Float;

    /// Emits a particle and returns it with the total power of the light.
    fn sample_photon(&self, u1: &Point2f, u2: &Point2f) -> Result<(Ray3f, RGBSpectrum)>;

    /// Checks that the emitter is usable before rendering starts.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
