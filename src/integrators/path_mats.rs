// Copyright @yucwang 2026

use crate::core::bsdf::BSDFQueryRecord;
use crate::core::computation_node::ComputationNode;
use crate::core::integrator::Integrator;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use super::{ russian_roulette, spawn_ray, surface_emission };

/// Path tracer that only samples the BSDF; lights contribute when a
/// sampled direction happens to hit them.
#[derive(Debug, Default)]
pub struct PathMats;

impl PathMats {
    pub fn new() -> Self {
        Self
    }
}

impl ComputationNode for PathMats {
    fn to_string(&self) -> String {
        String::from("PathMats[]")
    }
}

impl Integrator for PathMats {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let mut l = RGBSpectrum::default();
        let mut throughput = RGBSpectrum::splat(1.0);
        let mut ray = *ray;

        loop {
            let its = match scene.ray_intersect(&ray) {
                Some(its) => its,
                None => break,
            };

            l += throughput * surface_emission(&its, ray.origin());

            let bsdf = match its.bsdf {
                Some(bsdf) => bsdf,
                None => break,
            };

            let mut b_rec = BSDFQueryRecord::new(its.to_local(&(-ray.dir()))).with_uv(its.uv);
            let weight = bsdf.sample(&mut b_rec, &sampler.next_2d());
            if weight.is_black() {
                break;
            }

            let p = match russian_roulette(&throughput, sampler.next_1d()) {
                Some(p) => p,
                None => break,
            };
            throughput = throughput * weight / p;
            ray = spawn_ray(&its, &b_rec.wo);
        }

        l
    }
}
