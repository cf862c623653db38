// Copyright @yucwang 2023

use crate::core::bsdf::BSDF;
use crate::core::emitter::{ Emitter, EmitterQueryRecord };
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::frame::Frame;

/// Closest surface hit returned by `Scene::ray_intersect`. Borrows the
/// scattering and emission models of the object that was hit.
#[derive(Copy, Clone)]
pub struct Intersection<'a> {
    pub p: Vector3f,
    pub t: Float,
    pub uv: Vector2f,
    pub sh_frame: Frame,
    pub geo_frame: Frame,
    pub object_index: usize,
    pub bsdf: Option<&'a dyn BSDF>,
    pub emitter: Option<&'a dyn Emitter>,
    /// Position of `emitter` in the scene's light list.
    pub emitter_index: Option<usize>,
}

impl<'a> Intersection<'a> {
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        self.sh_frame.to_local(v)
    }

    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.sh_frame.to_world(v)
    }

    pub fn is_emitter(&self) -> bool {
        self.emitter.is_some()
    }

    /// Emitter record for this hit as seen from `ref_p`.
    pub fn emitter_record(&self, ref_p: Vector3f) -> EmitterQueryRecord {
        EmitterQueryRecord::from_hit(ref_p, self.p, self.sh_frame.n)
    }

    /// True when the hit lies on the light with index `light_index`.
    pub fn is_light(&self, light_index: usize) -> bool {
        self.emitter_index == Some(light_index)
    }
}

impl<'a> std::fmt::Debug for Intersection<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Intersection")
            .field("p", &self.p)
            .field("t", &self.t)
            .field("uv", &self.uv)
            .field("n", &self.sh_frame.n)
            .field("object_index", &self.object_index)
            .field("emitter_index", &self.emitter_index)
            .finish()
    }
}
