// Copyright @yucwang 2026

mod common;

use common::{ assert_close, floor_and_light, floor_centre_ray, init_logger, FLOOR_CENTRE_RADIANCE };
use lumiere::core::computation_node::ComputationNode;
use lumiere::core::error::RenderError;
use lumiere::core::integrator::Integrator;
use lumiere::core::sampler::IndependentSampler;
use lumiere::core::scene::{ Scene, SceneObject };
use lumiere::emitters::area::AreaEmitter;
use lumiere::emitters::point::PointLight;
use lumiere::emitters::spot::SpotLight;
use lumiere::integrators::load_integrator;
use lumiere::integrators::photon_mapper::PhotonMapper;
use lumiere::materials::conductor::Conductor;
use lumiere::materials::diffuse::Diffuse;
use lumiere::math::constants::{ Float, Vector3f };
use lumiere::math::ray::Ray3f;
use lumiere::math::spectrum::RGBSpectrum;
use lumiere::shapes::rectangle::Rectangle;
use lumiere::shapes::sphere::Sphere;
use std::sync::Arc;

/// Black diffuse sphere enclosing two point lights: every particle is
/// absorbed at its first hit.
fn absorbing_shell() -> Scene {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::new(Arc::new(Sphere::new(Vector3f::zeros(), 2.0)))
        .with_bsdf(Arc::new(Diffuse::new(RGBSpectrum::default()))));
    scene.add_emitter(Arc::new(PointLight::new(RGBSpectrum::new(3.0, 6.0, 9.0), Vector3f::new(0.5, 0.0, 0.0))));
    scene.add_emitter(Arc::new(PointLight::new(RGBSpectrum::splat(1.0), Vector3f::new(0.0, -0.5, 0.0))));
    scene.build().unwrap();
    scene
}

#[test]
fn test_photon_power_sums_to_light_power() {
    init_logger();
    let scene = absorbing_shell();
    let mut mapper = PhotonMapper::new(5000, 0.1).with_seed(3);
    mapper.preprocess(&scene).unwrap();

    let map = mapper.photon_map();
    assert_eq!(map.len(), 5000);

    let mut total = RGBSpectrum::default();
    for photon in map.iter() {
        assert!((photon.position.norm() - 2.0).abs() < 1e-3);
        // Directions point back into the shell, towards the emitting light.
        assert!(photon.direction.dot(&(-photon.position)) > 0.0);
        total += photon.power;
    }

    assert_close(total.r(), 4.0, 1e-3);
    assert_close(total.g(), 7.0, 1e-3);
    assert_close(total.b(), 10.0, 1e-3);
}

#[test]
fn test_density_estimate_converges() {
    init_logger();
    let scene = floor_and_light();
    let ray = floor_centre_ray();

    let spread = |count: usize| -> (Float, Float) {
        let estimates: Vec<Float> = (0..8u64).map(|seed| {
            let mut mapper = PhotonMapper::new(count, 0.2).with_seed(seed);
            mapper.preprocess(&scene).unwrap();
            let mut sampler = IndependentSampler::new(seed);
            mapper.li(&scene, &mut sampler, &ray).g()
        }).collect();

        let mean = estimates.iter().sum::<Float>() / estimates.len() as Float;
        let var = estimates.iter().map(|e| (e - mean) * (e - mean)).sum::<Float>() / estimates.len() as Float;
        (mean, var)
    };

    let (_, coarse_var) = spread(1000);
    let (fine_mean, fine_var) = spread(30000);
    assert!(fine_var < coarse_var, "fine {} vs coarse {}", fine_var, coarse_var);
    assert_close(fine_mean, FLOOR_CENTRE_RADIANCE, 0.1);
}

#[test]
fn test_camera_path_continues_through_mirror() {
    init_logger();
    let mut scene = floor_and_light();
    // Upright mirror at x = 2 facing -x, tinted so its weight is 0.8.
    scene.add_object(SceneObject::new(Arc::new(Rectangle::new(Vector3f::new(2.0, -1.0, 0.2),
                                                              Vector3f::new(0.0, 0.0, 0.6),
                                                              Vector3f::new(0.0, 2.0, 0.0))))
        .with_bsdf(Arc::new(Conductor::new(RGBSpectrum::splat(0.8), RGBSpectrum::splat(0.0),
                                           RGBSpectrum::splat(1.0))))
        .with_name("mirror"));
    scene.build().unwrap();

    let mut mapper = PhotonMapper::new(20000, 0.2).with_seed(9);
    mapper.preprocess(&scene).unwrap();

    let mut sampler = IndependentSampler::new(4);
    let direct = mapper.li(&scene, &mut sampler, &floor_centre_ray()).g();
    assert!(direct > 0.0);

    // Reflects off the mirror at (2, 0, 0.5) onto the floor centre.
    let via_mirror = Ray3f::new(Vector3f::new(1.0, 0.0, 0.75), Vector3f::new(1.0, 0.0, -0.25), None, None);
    let n = 4000;
    let mut sum = 0.0;
    for _ in 0..n {
        let l = mapper.li(&scene, &mut sampler, &via_mirror);
        assert!(l.is_valid());
        sum += l.g();
    }

    assert_close(sum / n as Float, 0.8 * direct, 0.02);
}

#[test]
fn test_rare_deposits_keep_tracing() {
    init_logger();
    let mut scene = Scene::new();
    // Subtends about 1e-4 of the directions leaving the light.
    scene.add_object(SceneObject::new(Arc::new(Sphere::new(Vector3f::new(1.0, 0.0, 0.0), 0.02)))
        .with_bsdf(Arc::new(Diffuse::new(RGBSpectrum::splat(0.5)))));
    scene.add_emitter(Arc::new(PointLight::new(RGBSpectrum::splat(1.0), Vector3f::zeros())));
    scene.build().unwrap();

    let mut unlimited = PhotonMapper::new(3, 0.01).with_seed(1);
    unlimited.preprocess(&scene).unwrap();
    assert_eq!(unlimited.photon_map().len(), 3);

    let mut capped = PhotonMapper::new(3, 0.01).with_seed(1).with_stall_limit(5);
    assert!(matches!(capped.preprocess(&scene), Err(RenderError::PhotonTracingStalled(5))));
}

#[test]
fn test_automatic_radius() {
    let scene = floor_and_light();
    let mut mapper = PhotonMapper::new(100, 0.0);
    mapper.preprocess(&scene).unwrap();

    let expected = scene.bounding_box().extents().norm() / 500.0;
    assert!((mapper.radius() - expected).abs() < 1e-6);
    assert!(mapper.radius() > 0.0);
}

#[test]
fn test_preprocess_errors() {
    let mut empty = Scene::new();
    empty.add_object(SceneObject::new(Arc::new(Sphere::new(Vector3f::zeros(), 1.0))));
    empty.build().unwrap();
    assert!(matches!(PhotonMapper::new(10, 0.1).preprocess(&empty), Err(RenderError::NoEmitters)));

    let mut spot = absorbing_shell();
    spot.add_emitter(Arc::new(SpotLight::new(RGBSpectrum::splat(1.0), Vector3f::zeros(), 0.5, 0.8)));
    spot.build().unwrap();
    assert!(matches!(PhotonMapper::new(10, 0.1).preprocess(&spot),
                     Err(RenderError::UnsupportedPhotonEmission(_))));

    let mut unattached = absorbing_shell();
    unattached.add_emitter(Arc::new(AreaEmitter::new(RGBSpectrum::splat(1.0))));
    assert!(matches!(unattached.build(), Err(RenderError::MissingShape(_))));
}

#[test]
fn test_configured_from_xml() {
    let xml = r#"
        <scene>
            <default name="count" value="2000"/>
            <integrator type="photonmapper">
                <integer name="photonCount" value="$count"/>
                <float name="photonRadius" value="0.25"/>
            </integrator>
        </scene>"#;

    let mut integrator = load_integrator(xml).unwrap();
    assert!(integrator.to_string().contains("photonCount = 2000"));
    assert!(integrator.to_string().contains("photonRadius = 0.25"));

    let scene = floor_and_light();
    integrator.preprocess(&scene).unwrap();
    let mut sampler = IndependentSampler::new(0);
    let l = integrator.li(&scene, &mut sampler, &floor_centre_ray());
    assert!(l.is_valid());
    assert!(!l.is_black());
}
