// Copyright @yucwang 2026

use thiserror::Error;

/// Fatal conditions surfaced by scene construction, configuration and
/// integrator preprocessing. Degenerate numerics never end up here; they
/// contribute zero radiance instead.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("area emitter `{0}` has no attached shape")]
    MissingShape(String),

    #[error("emitter `{0}` cannot emit photons")]
    UnsupportedPhotonEmission(String),

    #[error("photon mapping requires at least one emitter")]
    NoEmitters,

    #[error("{0} photons in a row were emitted without reaching a diffuse surface")]
    PhotonTracingStalled(usize),

    #[error("property `{name}` is not of type {expected}")]
    PropertyType { name: String, expected: &'static str },

    #[error("invalid property `{name}`: {reason}")]
    InvalidProperty { name: String, reason: String },

    #[error("unknown integrator type `{0}`")]
    UnknownIntegrator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
