// Copyright @yucwang 2026

use crate::core::bsdf::BSDFQueryRecord;
use crate::core::computation_node::ComputationNode;
use crate::core::integrator::Integrator;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use super::{ mis_weight, russian_roulette, sample_light, spawn_ray };

/// Path tracer combining next event estimation and BSDF sampling with the
/// balance heuristic. Path length is bounded by Russian roulette only.
#[derive(Debug, Default)]
pub struct PathMis;

impl PathMis {
    pub fn new() -> Self {
        Self
    }
}

impl ComputationNode for PathMis {
    fn to_string(&self) -> String {
        String::from("PathMis[]")
    }
}

impl Integrator for PathMis {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let mut l = RGBSpectrum::default();
        let mut throughput = RGBSpectrum::splat(1.0);
        let mut ray = *ray;
        let mut bounce: u32 = 0;
        let mut prev_discrete = false;
        let mut prev_bsdf_pdf: Float = 0.0;

        loop {
            let its = match scene.ray_intersect(&ray) {
                Some(its) => its,
                None => break,
            };

            if let Some(emitter) = its.emitter {
                let l_rec = its.emitter_record(ray.origin());
                let light_pdf = emitter.pdf(&l_rec);
                if light_pdf > 0.0 {
                    // Camera rays and discrete bounces have no emitter sampled partner.
                    let w = if bounce == 0 || prev_discrete {
                        1.0
                    } else {
                        mis_weight(prev_bsdf_pdf, light_pdf)
                    };
                    l += throughput * emitter.eval(&l_rec) * w;
                }
            }

            let bsdf = match its.bsdf {
                Some(bsdf) => bsdf,
                None => break,
            };

            let camera_local = its.to_local(&(-ray.dir()));
            let mut b_rec = BSDFQueryRecord::new(camera_local).with_uv(its.uv);
            let weight = bsdf.sample(&mut b_rec, &sampler.next_2d());
            let discrete = b_rec.is_discrete();

            if !discrete {
                for light in scene.lights() {
                    if let Some(s) = sample_light(scene, light.as_ref(), &its, bsdf, &camera_local, sampler) {
                        let w = if s.discrete { 1.0 } else { mis_weight(s.light_pdf, s.bsdf_pdf) };
                        l += throughput * s.value * w;
                    }
                }
            }

            if weight.is_black() {
                break;
            }

            let p = match russian_roulette(&throughput, sampler.next_1d()) {
                Some(p) => p,
                None => break,
            };

            throughput = throughput * weight / p;
            prev_discrete = discrete;
            // Density of the direction just sampled, with `wi` on the camera
            // side as in `sample_light`, so both techniques share one measure.
            prev_bsdf_pdf = if discrete { 0.0 } else { bsdf.pdf(&b_rec) };
            ray = spawn_ray(&its, &b_rec.wo);
            bounce += 1;
        }

        l
    }
}
