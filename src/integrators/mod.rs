// Copyright @yucwang 2026

pub mod average_visibility;
pub mod direct;
pub mod normals;
pub mod path_mats;
pub mod path_mis;
pub mod photon_mapper;

use crate::core::bsdf::{ BSDFQueryRecord, EMeasure, BSDF };
use crate::core::computation_node::ComputationNode;
use crate::core::config_loader::parse_integrator_config;
use crate::core::emitter::{ Emitter, EmitterQueryRecord };
use crate::core::error::{ RenderError, Result };
use crate::core::integrator::Integrator;
use crate::core::interaction::Intersection;
use crate::core::properties::PropertyList;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::{ Float, Vector3f };
use crate::math::frame::Frame;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use self::average_visibility::AverageVisibility;
use self::direct::{ DirectIntegrator, DirectStrategy };
use self::normals::NormalIntegrator;
use self::path_mats::PathMats;
use self::path_mis::PathMis;
use self::photon_mapper::PhotonMapper;

/// Densities below this are treated as zero when combining techniques.
pub const MIS_PDF_EPSILON: Float = 1e-7;

/// Upper bound of the Russian roulette survival probability.
pub const MAX_SURVIVAL_PROBABILITY: Float = 0.99;

/// Balance heuristic weight of the technique with density `pdf_a` against
/// one with density `pdf_b`. Falls back to full weight when the other
/// technique could not have produced the sample.
pub fn mis_weight(pdf_a: Float, pdf_b: Float) -> Float {
    if pdf_a <= 0.0 {
        return 0.0;
    }
    if pdf_b <= MIS_PDF_EPSILON {
        return 1.0;
    }

    pdf_a / (pdf_a + pdf_b)
}

/// Survival probability if a path with `throughput` continues for the
/// uniform number `u`. The caller divides its throughput by it.
pub fn russian_roulette(throughput: &RGBSpectrum, u: Float) -> Option<Float> {
    let p = throughput.max_coeff().min(MAX_SURVIVAL_PROBABILITY);
    if p > 0.0 && u <= p {
        Some(p)
    } else {
        None
    }
}

/// Emission of the surface at `its` towards `ref_p`, counted only where
/// the emitter could have sampled it.
pub(crate) fn surface_emission(its: &Intersection<'_>, ref_p: Vector3f) -> RGBSpectrum {
    match its.emitter {
        Some(emitter) => {
            let rec = its.emitter_record(ref_p);
            if emitter.pdf(&rec) > 0.0 {
                emitter.eval(&rec)
            } else {
                RGBSpectrum::default()
            }
        }
        None => RGBSpectrum::default(),
    }
}

/// Unoccluded emitter-sampled contribution at a surface point, before any
/// technique weight is applied.
pub(crate) struct LightSample {
    pub value: RGBSpectrum,
    pub light_pdf: Float,
    pub bsdf_pdf: Float,
    pub discrete: bool,
}

/// Next event estimation towards one light. `camera_local` is the
/// direction the path arrived from, in the local frame of `its`.
pub(crate) fn sample_light(scene: &Scene, light: &dyn Emitter, its: &Intersection<'_>,
                           bsdf: &dyn BSDF, camera_local: &Vector3f,
                           sampler: &mut dyn Sampler) -> Option<LightSample> {
    let mut l_rec = EmitterQueryRecord::new(its.p);
    let weight = light.sample(&mut l_rec, &sampler.next_2d());
    if weight.is_black() || scene.ray_intersect_shadow(&l_rec.shadow_ray()) {
        return None;
    }

    let b_rec = BSDFQueryRecord::with_directions(*camera_local, its.to_local(&l_rec.wi),
                                                 EMeasure::SolidAngle).with_uv(its.uv);
    let f = bsdf.eval(&b_rec);
    if f.is_black() {
        return None;
    }

    Some(LightSample {
        value: weight * f * Frame::cos_theta(&b_rec.wo).abs(),
        light_pdf: if l_rec.is_discrete() { 0.0 } else { light.pdf(&l_rec) },
        bsdf_pdf: bsdf.pdf(&b_rec),
        discrete: l_rec.is_discrete(),
    })
}

/// Scattered ray leaving `its` along the local direction `wo`.
pub(crate) fn spawn_ray(its: &Intersection<'_>, wo: &Vector3f) -> Ray3f {
    Ray3f::new(its.p, its.to_world(wo), None, None)
}

/// Builds the integrator registered under `kind`.
pub fn create_integrator(kind: &str, props: &PropertyList) -> Result<Box<dyn Integrator>> {
    let integrator: Box<dyn Integrator> = match kind {
        "direct" | "direct_ems" => Box::new(DirectIntegrator::new(DirectStrategy::Emitter)),
        "direct_mats" => Box::new(DirectIntegrator::new(DirectStrategy::Material)),
        "direct_naive" => Box::new(DirectIntegrator::new(DirectStrategy::Naive)),
        "direct_mis" => Box::new(DirectIntegrator::new(DirectStrategy::Mis)),
        "path_mats" => Box::new(PathMats::new()),
        "path_mis" => Box::new(PathMis::new()),
        "photonmapper" => Box::new(PhotonMapper::from_properties(props)?),
        "normals" => Box::new(NormalIntegrator::new()),
        "av" => Box::new(AverageVisibility::from_properties(props)?),
        _ => return Err(RenderError::UnknownIntegrator(kind.to_string())),
    };

    log::debug!("Created integrator {}.", integrator.to_string());
    Ok(integrator)
}

/// Parses an XML fragment and builds the integrator it describes.
pub fn load_integrator(xml: &str) -> Result<Box<dyn Integrator>> {
    let config = parse_integrator_config(xml)?;
    create_integrator(&config.kind, &config.props)
}
