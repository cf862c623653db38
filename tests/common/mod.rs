// Copyright @yucwang 2026

#![allow(dead_code)]

use lumiere::core::integrator::Integrator;
use lumiere::core::sampler::IndependentSampler;
use lumiere::core::scene::{ Scene, SceneObject };
use lumiere::materials::diffuse::Diffuse;
use lumiere::math::constants::{ Float, Vector3f };
use lumiere::math::ray::Ray3f;
use lumiere::math::spectrum::RGBSpectrum;
use lumiere::shapes::rectangle::Rectangle;
use std::sync::Arc;

/// Radiance leaving the centre of the floor of `floor_and_light`,
/// `albedo / pi * E` with `E` the irradiance from a unit square of unit
/// radiance one unit above.
pub const FLOOR_CENTRE_RADIANCE: Float = 0.1197;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Diffuse floor of albedo 0.5 lit by a downward facing unit square light
/// at height one.
pub fn floor_and_light() -> Scene {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::new(Arc::new(Rectangle::square_z(Vector3f::zeros(), 10.0, true)))
        .with_bsdf(Arc::new(Diffuse::new(RGBSpectrum::splat(0.5))))
        .with_name("floor"));
    scene.add_object(SceneObject::new(Arc::new(Rectangle::square_z(Vector3f::new(0.0, 0.0, 1.0), 1.0, false)))
        .with_emission(RGBSpectrum::splat(1.0))
        .with_name("light"));
    scene.build().unwrap();
    scene
}

/// Camera ray hitting the floor centre from below the light.
pub fn floor_centre_ray() -> Ray3f {
    Ray3f::new(Vector3f::new(0.0, 0.0, 0.5), Vector3f::new(0.0, 0.0, -1.0), None, None)
}

/// Mean and sample variance of the green channel over `n` estimates.
pub fn estimate(integrator: &dyn Integrator, scene: &Scene, ray: &Ray3f,
                n: usize, seed: u64) -> (Float, Float) {
    let mut sampler = IndependentSampler::new(seed);
    let mut sum = 0.0f64;
    let mut sum2 = 0.0f64;
    for _ in 0..n {
        let l = integrator.li(scene, &mut sampler, ray);
        assert!(l.is_valid(), "invalid radiance {:?}", l);
        let g = l.g() as f64;
        sum += g;
        sum2 += g * g;
    }

    let mean = sum / n as f64;
    let var = (sum2 / n as f64 - mean * mean).max(0.0);
    (mean as Float, var as Float)
}

pub fn assert_close(actual: Float, expected: Float, rel: Float) {
    assert!((actual - expected).abs() <= rel * expected.abs(),
            "expected {} within {}%, got {}", expected, rel * 100.0, actual);
}
