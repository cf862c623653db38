// Copyright @yucwang 2021

pub mod bsdf;
pub mod computation_node;
pub mod config_loader;
pub mod emitter;
pub mod error;
pub mod integrator;
pub mod interaction;
pub mod photon;
pub mod properties;
pub mod sampler;
pub mod scene;
pub mod shape;
