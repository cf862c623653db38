// Copyright @yucwang 2026

use crate::core::bsdf::EMeasure;
use crate::core::computation_node::ComputationNode;
use crate::core::emitter::{ Emitter, EmitterQueryRecord };
use crate::core::error::{ RenderError, Result };
use crate::math::constants::{ Float, Point2f, Vector3f, PI };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Point light restricted to a cone around `direction` with a quartic
/// falloff between `cos_falloff_start` and `cos_total_width`.
pub struct SpotLight {
    power: RGBSpectrum,
    position: Vector3f,
    direction: Vector3f,
    cos_total_width: Float,
    cos_falloff_start: Float,
}

impl SpotLight {
    /// Spot pointing down the `-y` axis.
    pub fn new(power: RGBSpectrum, position: Vector3f,
               cos_total_width: Float, cos_falloff_start: Float) -> Self {
        Self::with_direction(power, position, Vector3f::new(0.0, -1.0, 0.0),
                             cos_total_width, cos_falloff_start)
    }

    pub fn with_direction(power: RGBSpectrum, position: Vector3f, direction: Vector3f,
                          cos_total_width: Float, cos_falloff_start: Float) -> Self {
        Self {
            power,
            position,
            direction: direction.normalize(),
            cos_total_width,
            cos_falloff_start: cos_falloff_start.max(cos_total_width),
        }
    }

    fn falloff(&self, w: &Vector3f) -> Float {
        let cos_theta = w.dot(&self.direction);
        if cos_theta >= self.cos_falloff_start {
            return 1.0;
        }
        if cos_theta <= self.cos_total_width {
            return 0.0;
        }
        let delta = (cos_theta - self.cos_total_width) / (self.cos_falloff_start - self.cos_total_width);
        delta * delta * delta * delta
    }

    fn intensity(&self) -> RGBSpectrum {
        let solid_angle = 2.0 * PI * (1.0 - 0.5 * (self.cos_total_width + self.cos_falloff_start));
        if solid_angle <= 0.0 {
            return RGBSpectrum::default();
        }
        self.power / solid_angle
    }
}

impl ComputationNode for SpotLight {
    fn to_string(&self) -> String {
        format!("SpotLight[power = {:?}, position = {:?}, direction = {:?}, cosTotalWidth = {}, cosFalloffStart = {}]",
                self.power, self.position, self.direction, self.cos_total_width, self.cos_falloff_start)
    }
}

impl Emitter for SpotLight {
    fn sample(&self, rec: &mut EmitterQueryRecord, _u: &Point2f) -> RGBSpectrum {
        let d = self.position - rec.ref_p;
        let dist = d.norm();
        if dist <= 0.0 {
            return RGBSpectrum::default();
        }

        rec.p = self.position;
        rec.wi = d / dist;
        rec.n = -rec.wi;
        rec.pdf = 1.0;
        rec.measure = EMeasure::Discrete;
        self.eval(rec)
    }

    /// Irradiance arriving at `rec.ref_p`.
    fn eval(&self, rec: &EmitterQueryRecord) -> RGBSpectrum {
        let d = rec.ref_p - self.position;
        let dist2 = d.norm_squared();
        if dist2 <= 0.0 {
            return RGBSpectrum::default();
        }

        self.intensity() * (self.falloff(&(d / dist2.sqrt())) / dist2)
    }

    fn pdf(&self, _rec: &EmitterQueryRecord) -> Float {
        1.0
    }

    fn sample_photon(&self, _u1: &Point2f, _u2: &Point2f) -> Result<(Ray3f, RGBSpectrum)> {
        Err(RenderError::UnsupportedPhotonEmission(self.to_string()))
    }
}
