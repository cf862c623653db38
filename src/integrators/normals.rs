// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::integrator::Integrator;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Debug view: absolute shading normal of the first hit as a colour.
#[derive(Debug, Default)]
pub struct NormalIntegrator;

impl NormalIntegrator {
    pub fn new() -> Self {
        Self
    }
}

impl ComputationNode for NormalIntegrator {
    fn to_string(&self) -> String {
        String::from("NormalIntegrator[]")
    }
}

impl Integrator for NormalIntegrator {
    fn li(&self, scene: &Scene, _sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        match scene.ray_intersect(ray) {
            Some(its) => RGBSpectrum::from_vector(&its.sh_frame.n.abs()),
            None => RGBSpectrum::default(),
        }
    }
}
