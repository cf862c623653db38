// Copyright @yucwang 2026

use crate::core::bsdf::EMeasure;
use crate::core::computation_node::ComputationNode;
use crate::core::emitter::{ Emitter, EmitterQueryRecord };
use crate::core::error::{ RenderError, Result };
use crate::core::shape::Shape;
use crate::math::constants::{ Float, Point2f, PI };
use crate::math::frame::Frame;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::square_to_cosine_hemisphere;
use std::sync::Arc;

/// One-sided diffuse emitter bound to a shape. Without a shape it is
/// inert and rejected by `Scene::build`.
pub struct AreaEmitter {
    shape: Option<Arc<dyn Shape>>,
    radiance: RGBSpectrum,
}

impl AreaEmitter {
    pub fn new(radiance: RGBSpectrum) -> Self {
        Self { shape: None, radiance }
    }

    pub fn with_shape(mut self, shape: Arc<dyn Shape>) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn radiance(&self) -> RGBSpectrum {
        self.radiance
    }

    fn shape_or_err(&self) -> Result<&Arc<dyn Shape>> {
        self.shape.as_ref().ok_or_else(|| RenderError::MissingShape(self.to_string()))
    }
}

impl ComputationNode for AreaEmitter {
    fn to_string(&self) -> String {
        format!("AreaEmitter[radiance = {:?}]", self.radiance)
    }
}

impl Emitter for AreaEmitter {
    fn sample(&self, rec: &mut EmitterQueryRecord, u: &Point2f) -> RGBSpectrum {
        let shape = match self.shape.as_ref() {
            Some(shape) => shape,
            None => return RGBSpectrum::default(),
        };

        let s = shape.sample_surface(u);
        let d = s.p - rec.ref_p;
        let dist = d.norm();
        if dist <= 0.0 {
            return RGBSpectrum::default();
        }

        rec.p = s.p;
        rec.n = s.n;
        rec.wi = d / dist;
        rec.measure = EMeasure::SolidAngle;
        rec.pdf = self.pdf(rec);
        if rec.pdf <= 0.0 {
            return RGBSpectrum::default();
        }

        self.eval(rec) / rec.pdf
    }

    fn eval(&self, rec: &EmitterQueryRecord) -> RGBSpectrum {
        if self.shape.is_none() || rec.n.dot(&(-rec.wi)) <= 0.0 {
            return RGBSpectrum::default();
        }

        self.radiance
    }

    fn pdf(&self, rec: &EmitterQueryRecord) -> Float {
        let shape = match self.shape.as_ref() {
            Some(shape) => shape,
            None => return 0.0,
        };

        let cos_light = rec.n.dot(&(-rec.wi)).abs();
        if cos_light < 1e-6 {
            return 0.0;
        }

        let dist2 = (rec.p - rec.ref_p).norm_squared();
        shape.pdf_surface(&rec.p) * dist2 / cos_light
    }

    fn sample_photon(&self, u1: &Point2f, u2: &Point2f) -> Result<(Ray3f, RGBSpectrum)> {
        let shape = self.shape_or_err()?;
        let s = shape.sample_surface(u1);
        let dir = Frame::from_normal(&s.n).to_world(&square_to_cosine_hemisphere(u2));

        Ok((Ray3f::new(s.p, dir, None, None), self.radiance * (PI * shape.surface_area())))
    }

    fn validate(&self) -> Result<()> {
        self.shape_or_err().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::AreaEmitter;
    use crate::core::emitter::{ Emitter, EmitterQueryRecord };
    use crate::core::error::RenderError;
    use crate::math::constants::{ Point2f, Vector3f, PI };
    use crate::math::spectrum::RGBSpectrum;
    use crate::shapes::rectangle::Rectangle;
    use approx::assert_abs_diff_eq;
    use std::sync::Arc;

    fn ceiling() -> AreaEmitter {
        AreaEmitter::new(RGBSpectrum::splat(2.0))
            .with_shape(Arc::new(Rectangle::square_z(Vector3f::new(0.0, 0.0, 1.0), 1.0, false)))
    }

    #[test]
    fn test_area_sample_uses_solid_angle_jacobian() {
        let light = ceiling();
        let mut rec = EmitterQueryRecord::new(Vector3f::zeros());
        let value = light.sample(&mut rec, &Point2f::new(0.5, 0.5));
        // Centre of a unit square at distance 1, facing the reference point.
        assert_abs_diff_eq!(rec.pdf, 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(value.r(), 2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(light.pdf(&rec), rec.pdf, epsilon = 1e-6);
    }

    #[test]
    fn test_area_is_one_sided() {
        let light = ceiling();
        let mut rec = EmitterQueryRecord::new(Vector3f::new(0.0, 0.0, 2.0));
        let value = light.sample(&mut rec, &Point2f::new(0.2, 0.7));
        assert!(value.is_black());
    }

    #[test]
    fn test_area_photon_power() {
        let light = ceiling();
        let (ray, power) = light.sample_photon(&Point2f::new(0.3, 0.3), &Point2f::new(0.6, 0.1)).unwrap();
        assert!(ray.dir().z < 0.0);
        assert_abs_diff_eq!(power.g(), 2.0 * PI, epsilon = 1e-4);
    }

    #[test]
    fn test_area_without_shape() {
        let light = AreaEmitter::new(RGBSpectrum::splat(1.0));
        assert!(matches!(light.validate(), Err(RenderError::MissingShape(_))));
        assert!(matches!(light.sample_photon(&Point2f::new(0.5, 0.5), &Point2f::new(0.5, 0.5)),
                         Err(RenderError::MissingShape(_))));
        let mut rec = EmitterQueryRecord::new(Vector3f::zeros());
        assert!(light.sample(&mut rec, &Point2f::new(0.5, 0.5)).is_black());
    }
}
