// Copyright @yucwang 2023

use crate::core::computation_node::ComputationNode;
use crate::math::constants::{ Float, Point2f, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;

/// Measure a sampled direction is expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EMeasure {
    Unknown,
    SolidAngle,
    Discrete,
}

/// Scattering query in the local shading frame. `wi` is the direction
/// the query starts from and `wo` the one being sampled or evaluated;
/// both point away from the surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BSDFQueryRecord {
    pub wi: Vector3f,
    pub wo: Vector3f,
    pub measure: EMeasure,
    /// Relative index of refraction of the sampled event.
    pub eta: Float,
    pub uv: Vector2f,
}

impl BSDFQueryRecord {
    /// Query used for sampling: only `wi` is known.
    pub fn new(wi: Vector3f) -> Self {
        Self {
            wi,
            wo: Vector3f::zeros(),
            measure: EMeasure::Unknown,
            eta: 1.0,
            uv: Vector2f::zeros(),
        }
    }

    /// Query used for evaluation with both directions known.
    pub fn with_directions(wi: Vector3f, wo: Vector3f, measure: EMeasure) -> Self {
        Self { wi, wo, measure, eta: 1.0, uv: Vector2f::zeros() }
    }

    pub fn with_uv(mut self, uv: Vector2f) -> Self {
        self.uv = uv;
        self
    }

    pub fn is_discrete(&self) -> bool {
        self.measure == EMeasure::Discrete
    }
}

pub trait BSDF: ComputationNode + Send + Sync {
    /// BSDF value for a continuous record, zero for discrete ones.
    fn eval(&self, rec: &BSDFQueryRecord) -> RGBSpectrum;

    /// Solid angle density of `sample` choosing `rec.wo`.
    fn pdf(&self, rec: &BSDFQueryRecord) -> Float;

    /// Samples `rec.wo` and sets `rec.measure`. Returns
    /// `eval * cos(theta_o) / pdf` for continuous events and the
    /// full weight of discrete ones.
    fn sample(&self, rec: &mut BSDFQueryRecord, u: &Point2f) -> RGBSpectrum;

    fn is_diffuse(&self) -> bool {
        false
    }
}
