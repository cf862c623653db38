// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::error::Result;
use crate::core::integrator::Integrator;
use crate::core::properties::PropertyList;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::square_to_uniform_hemisphere;

/// Ambient occlusion style estimator: white when a uniformly sampled
/// hemisphere ray of bounded length escapes, black when it is blocked.
pub struct AverageVisibility {
    ray_length: Float,
}

impl AverageVisibility {
    pub fn new(ray_length: Float) -> Self {
        Self { ray_length }
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let ray_length = props.get_float_required("length")?;
        log::debug!("Average visibility ray length is {}.", ray_length);
        Ok(Self::new(ray_length))
    }
}

impl ComputationNode for AverageVisibility {
    fn to_string(&self) -> String {
        format!("AverageVisibility[rayLength = {}]", self.ray_length)
    }
}

impl Integrator for AverageVisibility {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let its = match scene.ray_intersect(ray) {
            Some(its) => its,
            None => return RGBSpectrum::splat(1.0),
        };

        let d = its.to_world(&square_to_uniform_hemisphere(&sampler.next_2d()));
        let probe = Ray3f::new(its.p, d, None, Some(self.ray_length));
        if scene.ray_intersect_shadow(&probe) {
            RGBSpectrum::default()
        } else {
            RGBSpectrum::splat(1.0)
        }
    }
}
