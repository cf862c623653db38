// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::error::Result;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Radiance estimator. `li` may be called concurrently once
/// `preprocess` has returned; each call owns its sampler.
pub trait Integrator: ComputationNode + Send + Sync {
    /// One-time work before any `li` call.
    fn preprocess(&mut self, _scene: &Scene) -> Result<()> {
        Ok(())
    }

    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum;
}
