// Copyright @yucwang 2026

use crate::core::bsdf::BSDF;
use crate::core::emitter::Emitter;
use crate::core::error::Result;
use crate::core::interaction::Intersection;
use crate::core::shape::Shape;
use crate::emitters::area::AreaEmitter;
use crate::math::aabb::AABB;
use crate::math::frame::Frame;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

pub struct SceneObject {
    pub shape: Arc<dyn Shape>,
    pub bsdf: Option<Arc<dyn BSDF>>,
    pub emission: RGBSpectrum,
    pub name: Option<String>,
    emitter_index: Option<usize>,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>) -> Self {
        Self { shape, bsdf: None, emission: RGBSpectrum::default(), name: None, emitter_index: None }
    }

    pub fn with_bsdf(mut self, bsdf: Arc<dyn BSDF>) -> Self {
        self.bsdf = Some(bsdf);
        self
    }

    /// Turns the object into an area light of the given radiance.
    pub fn with_emission(mut self, radiance: RGBSpectrum) -> Self {
        self.emission = radiance;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn shape(&self) -> &Arc<dyn Shape> {
        &self.shape
    }

    pub fn emitter_index(&self) -> Option<usize> {
        self.emitter_index
    }
}

pub struct Scene {
    objects: Vec<SceneObject>,
    object_bounds: Vec<AABB>,
    lights: Vec<Arc<dyn Emitter>>,
    scene_bounds: AABB,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            object_bounds: Vec::new(),
            lights: Vec::new(),
            scene_bounds: AABB::default(),
        }
    }

    /// Adds an object and, if it emits, the area light bound to its shape.
    /// Returns the object index.
    pub fn add_object(&mut self, mut object: SceneObject) -> usize {
        if !object.emission.is_black() {
            let emitter = AreaEmitter::new(object.emission).with_shape(object.shape.clone());
            self.lights.push(Arc::new(emitter));
            object.emitter_index = Some(self.lights.len() - 1);
        }

        let bounds = object.shape.bounding_box();
        self.scene_bounds.expand_by_aabb(&bounds);
        self.object_bounds.push(bounds);
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Adds a light that is not bound to scene geometry.
    pub fn add_emitter(&mut self, emitter: Arc<dyn Emitter>) -> usize {
        self.lights.push(emitter);
        self.lights.len() - 1
    }

    /// Validates every light. Must succeed before rendering.
    pub fn build(&mut self) -> Result<()> {
        for light in self.lights.iter() {
            light.validate()?;
        }

        log::info!("Scene built: {} objects, {} lights.", self.objects.len(), self.lights.len());
        Ok(())
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, idx: usize) -> Option<&SceneObject> {
        self.objects.get(idx)
    }

    pub fn lights(&self) -> &[Arc<dyn Emitter>] {
        &self.lights
    }

    pub fn bounding_box(&self) -> &AABB {
        &self.scene_bounds
    }

    /// Closest hit within `[ray.min_t, ray.max_t]`.
    pub fn ray_intersect(&self, ray: &Ray3f) -> Option<Intersection<'_>> {
        let mut r = *ray;
        let mut closest: Option<usize> = None;

        for (idx, object) in self.objects.iter().enumerate() {
            if !self.object_bounds[idx].ray_intersect(&r) {
                continue;
            }
            if let Some(t) = object.shape.ray_intersect(&r) {
                if r.update(t) {
                    closest = Some(idx);
                }
            }
        }

        let idx = closest?;
        let object = &self.objects[idx];
        let hit = object.shape.hit_information(&r, r.max_t);

        Some(Intersection {
            p: hit.p,
            t: r.max_t,
            uv: hit.uv,
            sh_frame: Frame::from_normal(&hit.sh_normal),
            geo_frame: Frame::from_normal(&hit.geo_normal),
            object_index: idx,
            bsdf: object.bsdf.as_deref(),
            emitter: object.emitter_index.map(|i| self.lights[i].as_ref()),
            emitter_index: object.emitter_index,
        })
    }

    /// Occlusion test; stops at the first hit.
    pub fn ray_intersect_shadow(&self, ray: &Ray3f) -> bool {
        self.objects.iter().zip(self.object_bounds.iter()).any(|(object, bounds)| {
            bounds.ray_intersect(ray) && object.shape.ray_intersect(ray).is_some()
        })
    }
}
