// Copyright @yucwang 2026

use crate::core::bsdf::{ BSDFQueryRecord, EMeasure };
use crate::core::computation_node::ComputationNode;
use crate::core::error::{ RenderError, Result };
use crate::core::integrator::Integrator;
use crate::core::photon::{ Photon, PhotonBuffer, PhotonMap };
use crate::core::properties::PropertyList;
use crate::core::sampler::{ IndependentSampler, Sampler };
use crate::core::scene::Scene;
use crate::math::constants::{ Float, Int, PI };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use indicatif::{ ProgressBar, ProgressStyle };

use super::{ russian_roulette, spawn_ray, surface_emission };

pub const DEFAULT_PHOTON_COUNT: usize = 1000000;

/// Two pass estimator: photons are traced from the lights once in
/// `preprocess`, then `li` follows camera paths to the first diffuse
/// surface and estimates the radiance there from the photon density.
pub struct PhotonMapper {
    photon_count: usize,
    photon_radius: Float,
    seed: u64,
    /// Particles in a row without a deposit before tracing gives up.
    /// Unlimited unless configured.
    stall_limit: Option<usize>,
    photon_map: PhotonMap,
}

impl PhotonMapper {
    /// A radius of zero is replaced in `preprocess` by one derived from
    /// the scene extent.
    pub fn new(photon_count: usize, photon_radius: Float) -> Self {
        Self { photon_count, photon_radius, seed: 0, stall_limit: None, photon_map: PhotonMap::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_stall_limit(mut self, limit: usize) -> Self {
        self.stall_limit = Some(limit);
        self
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let count = props.get_integer("photonCount", DEFAULT_PHOTON_COUNT as Int)?;
        if count <= 0 {
            return Err(RenderError::InvalidProperty {
                name: String::from("photonCount"),
                reason: format!("must be positive, got {}", count),
            });
        }

        let radius = props.get_float("photonRadius", 0.0)?;
        if radius < 0.0 {
            return Err(RenderError::InvalidProperty {
                name: String::from("photonRadius"),
                reason: format!("must not be negative, got {}", radius),
            });
        }

        let seed = props.get_integer("seed", 0)?;
        let mut mapper = Self::new(count as usize, radius).with_seed(seed as u64);

        let limit = props.get_integer("maxEmissionsWithoutDeposit", 0)?;
        if limit < 0 {
            return Err(RenderError::InvalidProperty {
                name: String::from("maxEmissionsWithoutDeposit"),
                reason: format!("must not be negative, got {}", limit),
            });
        }
        if limit > 0 {
            mapper = mapper.with_stall_limit(limit as usize);
        }

        Ok(mapper)
    }

    pub fn photon_map(&self) -> &PhotonMap {
        &self.photon_map
    }

    pub fn radius(&self) -> Float {
        self.photon_radius
    }

    pub fn photon_count(&self) -> usize {
        self.photon_count
    }

    pub fn stall_limit(&self) -> Option<usize> {
        self.stall_limit
    }

    /// Traces particles until `photon_count` diffuse deposits are made.
    /// Deposits keep the bare path throughput and are grouped per light,
    /// together with the number of particles each light emitted.
    fn trace_photons(&self, scene: &Scene, sampler: &mut dyn Sampler)
                     -> Result<(Vec<Vec<Photon>>, Vec<usize>)> {
        let lights = scene.lights();
        let mut pending: Vec<Vec<Photon>> = vec![Vec::new(); lights.len()];
        let mut emitted = vec![0usize; lights.len()];
        let mut deposited = 0usize;
        let mut since_last_deposit = 0usize;

        let progress = ProgressBar::new(self.photon_count as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} photons")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        while deposited < self.photon_count {
            let light_index = ((sampler.next_1d() * lights.len() as Float) as usize).min(lights.len() - 1);
            let (mut ray, _) = lights[light_index].sample_photon(&sampler.next_2d(), &sampler.next_2d())?;
            emitted[light_index] += 1;

            let before = deposited;
            let mut throughput = RGBSpectrum::splat(1.0);
            while deposited < self.photon_count {
                let its = match scene.ray_intersect(&ray) {
                    Some(its) => its,
                    None => break,
                };
                let bsdf = match its.bsdf {
                    Some(bsdf) => bsdf,
                    None => break,
                };

                if bsdf.is_diffuse() {
                    pending[light_index].push(Photon::new(its.p, -ray.dir(), throughput));
                    deposited += 1;
                }

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

            if deposited > before {
                progress.inc((deposited - before) as u64);
                since_last_deposit = 0;
            } else {
                since_last_deposit += 1;
                if self.stall_limit.map_or(false, |limit| since_last_deposit >= limit) {
                    progress.abandon();
                    return Err(RenderError::PhotonTracingStalled(since_last_deposit));
                }
            }
        }

        progress.finish_and_clear();
        Ok((pending, emitted))
    }
}

impl Default for PhotonMapper {
    fn default() -> Self {
        Self::new(DEFAULT_PHOTON_COUNT, 0.0)
    }
}

impl ComputationNode for PhotonMapper {
    fn to_string(&self) -> String {
        format!("PhotonMapper[photonCount = {}, photonRadius = {}, seed = {}, maxEmissionsWithoutDeposit = {:?}]",
                self.photon_count, self.photon_radius, self.seed, self.stall_limit)
    }
}

impl Integrator for PhotonMapper {
    fn preprocess(&mut self, scene: &Scene) -> Result<()> {
        let lights = scene.lights();
        if lights.is_empty() {
            return Err(RenderError::NoEmitters);
        }

        let mut sampler = IndependentSampler::new(self.seed);

        // Total power per light. Also rejects lights without a photon model
        // before any tracing work is done.
        let powers = lights.iter()
            .map(|light| light.sample_photon(&sampler.next_2d(), &sampler.next_2d()).map(|(_, power)| power))
            .collect::<Result<Vec<RGBSpectrum>>>()?;

        if self.photon_radius <= 0.0 {
            self.photon_radius = scene.bounding_box().extents().norm() / 500.0;
            log::info!("Photon radius was set to {}.", self.photon_radius);
        }

        log::info!("Gathering {} photons from {} lights.", self.photon_count, lights.len());
        let (pending, emitted) = self.trace_photons(scene, &mut sampler)?;

        let mut buffer = PhotonBuffer::with_capacity(self.photon_count);
        for (light_index, deposits) in pending.into_iter().enumerate() {
            if emitted[light_index] == 0 {
                continue;
            }

            let scale = powers[light_index] / emitted[light_index] as Float;
            for photon in deposits {
                buffer.push(Photon::new(photon.position, photon.direction, photon.power * scale));
            }
        }

        self.photon_map = PhotonMap::build(buffer);
        log::info!("Photon map built with {} photons ({} particles emitted).",
                   self.photon_map.len(), emitted.iter().sum::<usize>());
        Ok(())
    }

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

            let camera_local = its.to_local(&(-ray.dir()));
            if bsdf.is_diffuse() {
                if self.photon_radius <= 0.0 {
                    break;
                }

                let mut sum = RGBSpectrum::default();
                self.photon_map.search(&its.p, self.photon_radius, |photon| {
                    let rec = BSDFQueryRecord::with_directions(camera_local, its.to_local(&photon.direction),
                                                               EMeasure::SolidAngle).with_uv(its.uv);
                    sum += bsdf.eval(&rec) * photon.power;
                });

                l += throughput * sum / (PI * self.photon_radius * self.photon_radius);
                break;
            }

            let mut b_rec = BSDFQueryRecord::new(camera_local).with_uv(its.uv);
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
