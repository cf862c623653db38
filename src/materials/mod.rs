// Copyright @yucwang 2026

pub mod conductor;
pub mod dielectric;
pub mod diffuse;
pub mod microfacet;
pub mod plastic;

#[cfg(test)]
mod tests {
    use super::conductor::Conductor;
    use super::dielectric::Dielectric;
    use super::diffuse::Diffuse;
    use super::plastic::Plastic;
    use crate::core::bsdf::{ BSDFQueryRecord, EMeasure, BSDF };
    use crate::core::computation_node::ComputationNode;
    use crate::math::constants::Point2f;
    use crate::math::spectrum::RGBSpectrum;
    use crate::math::warp::square_to_uniform_sphere;
    use proptest::prelude::*;

    fn all_materials() -> Vec<Box<dyn BSDF>> {
        vec![
            Box::new(Diffuse::new(RGBSpectrum::splat(0.5))),
            Box::new(Plastic::default()),
            Box::new(Conductor::default()),
            Box::new(Dielectric::default()),
        ]
    }

    proptest! {
        #[test]
        fn prop_discrete_records_have_no_density(u1 in 0.0f32..1.0, u2 in 0.0f32..1.0,
                                                 u3 in 0.0f32..1.0, u4 in 0.0f32..1.0) {
            let wi = square_to_uniform_sphere(&Point2f::new(u1, u2));
            let wo = square_to_uniform_sphere(&Point2f::new(u3, u4));
            let rec = BSDFQueryRecord::with_directions(wi, wo, EMeasure::Discrete);
            for bsdf in all_materials() {
                prop_assert!(bsdf.eval(&rec).is_black(), "{}", bsdf.to_string());
                prop_assert_eq!(bsdf.pdf(&rec), 0.0);
            }
        }
    }
}
