// Copyright @yucwang 2026

use crate::core::bsdf::{ BSDFQueryRecord, BSDF };
use crate::core::computation_node::ComputationNode;
use crate::core::integrator::Integrator;
use crate::core::interaction::Intersection;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use super::{ mis_weight, sample_light, spawn_ray, surface_emission };

/// How the two direct lighting techniques are combined.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DirectStrategy {
    /// Emitter sampling only.
    Emitter,
    /// BSDF sampling only.
    Material,
    /// Both techniques, each weighted one half where both apply.
    Naive,
    /// Both techniques, balance heuristic.
    Mis,
}

/// Single-bounce estimator of the light arriving directly from emitters.
pub struct DirectIntegrator {
    strategy: DirectStrategy,
}

impl DirectIntegrator {
    pub fn new(strategy: DirectStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> DirectStrategy {
        self.strategy
    }

    /// Weight of the emitter sampled estimate.
    fn emitter_weight(&self, light_pdf: Float, bsdf_pdf: Float, discrete_light: bool) -> Float {
        match self.strategy {
            DirectStrategy::Material => 0.0,
            DirectStrategy::Emitter => 1.0,
            _ if discrete_light => 1.0,
            DirectStrategy::Naive => 0.5,
            DirectStrategy::Mis => mis_weight(light_pdf, bsdf_pdf),
        }
    }

    /// Weight of the BSDF sampled estimate.
    fn material_weight(&self, bsdf_pdf: Float, light_pdf: Float, discrete_bsdf: bool) -> Float {
        match self.strategy {
            DirectStrategy::Emitter => 0.0,
            DirectStrategy::Material => 1.0,
            _ if discrete_bsdf => 1.0,
            DirectStrategy::Naive => 0.5,
            DirectStrategy::Mis => mis_weight(bsdf_pdf, light_pdf),
        }
    }

    /// BSDF sampled estimate for the light with index `light_index`.
    /// Returns the scattering record so that the caller can tell whether
    /// the event was discrete.
    fn sample_material(&self, scene: &Scene, its: &Intersection<'_>, bsdf: &dyn BSDF,
                       camera_local: &Vector3f, light_index: usize,
                       sampler: &mut dyn Sampler) -> (BSDFQueryRecord, RGBSpectrum) {
        let mut b_rec = BSDFQueryRecord::new(*camera_local).with_uv(its.uv);
        let weight = bsdf.sample(&mut b_rec, &sampler.next_2d());
        if weight.is_black() || self.strategy == DirectStrategy::Emitter {
            return (b_rec, RGBSpectrum::default());
        }

        let hit = match scene.ray_intersect(&spawn_ray(its, &b_rec.wo)) {
            Some(hit) if hit.is_light(light_index) => hit,
            _ => return (b_rec, RGBSpectrum::default()),
        };
        let emitter = match hit.emitter {
            Some(emitter) => emitter,
            None => return (b_rec, RGBSpectrum::default()),
        };

        let l_rec = hit.emitter_record(its.p);
        let radiance = emitter.eval(&l_rec);
        if radiance.is_black() {
            return (b_rec, RGBSpectrum::default());
        }

        let discrete = b_rec.is_discrete();
        let bsdf_pdf = if discrete { 0.0 } else { bsdf.pdf(&b_rec) };
        let w = self.material_weight(bsdf_pdf, emitter.pdf(&l_rec), discrete);
        (b_rec, radiance * weight * w)
    }
}

impl ComputationNode for DirectIntegrator {
    fn to_string(&self) -> String {
        format!("DirectIntegrator[strategy = {:?}]", self.strategy)
    }
}

impl Integrator for DirectIntegrator {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let its = match scene.ray_intersect(ray) {
            Some(its) => its,
            None => return RGBSpectrum::default(),
        };

        let mut l = surface_emission(&its, ray.origin());
        let bsdf = match its.bsdf {
            Some(bsdf) => bsdf,
            None => return l,
        };

        let camera_local = its.to_local(&(-ray.dir()));
        for (light_index, light) in scene.lights().iter().enumerate() {
            let discrete_bsdf = if self.strategy == DirectStrategy::Emitter {
                false
            } else {
                let (b_rec, value) = self.sample_material(scene, &its, bsdf, &camera_local,
                                                          light_index, sampler);
                l += value;
                b_rec.is_discrete()
            };

            // Emitter sampling cannot reach a discrete scattering event.
            if discrete_bsdf || self.strategy == DirectStrategy::Material {
                continue;
            }

            if let Some(s) = sample_light(scene, light.as_ref(), &its, bsdf, &camera_local, sampler) {
                l += s.value * self.emitter_weight(s.light_pdf, s.bsdf_pdf, s.discrete);
            }
        }

        l
    }
}

#[cfg(test)]
mod tests {
    use super::{ DirectIntegrator, DirectStrategy };
    use crate::core::integrator::Integrator;
    use crate::core::sampler::IndependentSampler;
    use crate::core::scene::{ Scene, SceneObject };
    use crate::emitters::point::PointLight;
    use crate::materials::diffuse::Diffuse;
    use crate::math::constants::{ Vector3f, INV_PI, PI };
    use crate::math::ray::Ray3f;
    use crate::math::spectrum::RGBSpectrum;
    use crate::shapes::sphere::Sphere;
    use approx::assert_abs_diff_eq;
    use std::sync::Arc;

    fn lit_sphere() -> Scene {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(Arc::new(Sphere::new(Vector3f::zeros(), 1.0)))
            .with_bsdf(Arc::new(Diffuse::new(RGBSpectrum::splat(1.0)))));
        scene.add_emitter(Arc::new(PointLight::new(RGBSpectrum::splat(4.0 * PI),
                                                   Vector3f::new(0.0, 0.0, 2.0))));
        scene.build().unwrap();
        scene
    }

    #[test]
    fn test_point_light_is_independent_of_strategy_weights() {
        let scene = lit_sphere();
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 3.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        for strategy in [DirectStrategy::Emitter, DirectStrategy::Naive, DirectStrategy::Mis].iter() {
            let integrator = DirectIntegrator::new(*strategy);
            let mut sampler = IndependentSampler::new(1);
            let l = integrator.li(&scene, &mut sampler, &ray);
            assert_abs_diff_eq!(l.r(), INV_PI, epsilon = 1e-3);
        }

        // A point light cannot be hit by a sampled direction.
        let integrator = DirectIntegrator::new(DirectStrategy::Material);
        let mut sampler = IndependentSampler::new(1);
        assert!(integrator.li(&scene, &mut sampler, &ray).is_black());
    }

    #[test]
    fn test_miss_is_black() {
        let scene = lit_sphere();
        let ray = Ray3f::new(Vector3f::new(0.0, 5.0, 3.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let mut sampler = IndependentSampler::new(1);
        assert!(DirectIntegrator::new(DirectStrategy::Mis).li(&scene, &mut sampler, &ray).is_black());
    }
}
