// Copyright @yucwang 2026

use crate::math::constants::{ Float, Vector3f };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;

/// Mirror direction about the local normal.
pub fn reflect_local(wi: &Vector3f) -> Vector3f {
    Vector3f::new(-wi.x, -wi.y, wi.z)
}

pub fn reflect(wi: &Vector3f, m: &Vector3f) -> Vector3f {
    2.0 * wi.dot(m) * m - wi
}

/// Refracts `wi` through the interface with normal `m` on the side of
/// `wi`. `eta` is the ratio `eta_from / eta_to`. `None` on total
/// internal reflection.
pub fn refract(wi: &Vector3f, m: &Vector3f, eta: Float) -> Option<Vector3f> {
    let cos_i = wi.dot(m).max(-1.0).min(1.0);
    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let wt = -eta * wi + (eta * cos_i - cos_t) * m;
    Some(wt)
}

/// Unpolarized Fresnel reflectance of a dielectric interface. `cos_i`
/// is measured against the normal on the `eta_ext` side.
pub fn fresnel_dielectric(cos_i: Float, eta_ext: Float, eta_int: Float) -> Float {
    let mut cos_i = cos_i.max(-1.0).min(1.0);
    let entering = cos_i > 0.0;
    let (eta_i, eta_t) = if entering { (eta_ext, eta_int) } else { (eta_int, eta_ext) };
    cos_i = cos_i.abs();

    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let eta = eta_i / eta_t;
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return 1.0;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let r_parl = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let r_perp = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    0.5 * (r_parl * r_parl + r_perp * r_perp)
}

fn fresnel_conductor_channel(cos_i: Float, eta_ext: Float, eta: Float, k: Float) -> Float {
    let cos2 = cos_i * cos_i;
    let sin2 = 1.0 - cos2;
    let eta2 = (eta / eta_ext) * (eta / eta_ext);
    let k2 = (k / eta_ext) * (k / eta_ext);

    let t0 = eta2 - k2 - sin2;
    let a2_plus_b2 = (t0 * t0 + 4.0 * eta2 * k2).max(0.0).sqrt();
    let t1 = a2_plus_b2 + cos2;
    let a = (0.5 * (a2_plus_b2 + t0)).max(0.0).sqrt();
    let t2 = 2.0 * cos_i * a;
    let rs = (t1 - t2) / (t1 + t2);

    let t3 = cos2 * a2_plus_b2 + sin2 * sin2;
    let t4 = t2 * sin2;
    let rp = rs * (t3 - t4) / (t3 + t4);

    0.5 * (rp + rs)
}

/// Fresnel reflectance of a conductor with complex index `eta + i k`.
pub fn fresnel_conductor(cos_i: Float, eta_ext: Float, eta: &RGBSpectrum, k: &RGBSpectrum) -> RGBSpectrum {
    let mut out = RGBSpectrum::default();
    for idx in 0..3 {
        out[idx] = fresnel_conductor_channel(cos_i, eta_ext, eta[idx], k[idx]);
    }
    out
}

/// Smith shadowing term of the Trowbridge-Reitz distribution.
pub fn trowbridge_reitz_g1(v: &Vector3f, alpha: Float) -> Float {
    let tan_theta = Frame::tan_theta(v);
    if tan_theta == 0.0 {
        return 1.0;
    }
    let a2_tan2 = (alpha * tan_theta) * (alpha * tan_theta);
    2.0 / (1.0 + (1.0 + a2_tan2).sqrt())
}

/// Maps RMS surface roughness to the distribution's `alpha`.
pub fn roughness_to_alpha(roughness: Float) -> Float {
    let x = roughness.max(1e-3).ln();
    let alpha = 1.62142 + 0.819955 * x + 0.1734 * x * x + 0.0171201 * x * x * x
        + 0.000640711 * x * x * x * x;
    alpha.max(1e-3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fresnel_dielectric_limits() {
        assert_abs_diff_eq!(fresnel_dielectric(1.0, 1.0, 1.5), 0.04, epsilon = 1e-4);
        assert_abs_diff_eq!(fresnel_dielectric(0.0, 1.0, 1.5), 1.0, epsilon = 1e-4);
        // Total internal reflection from inside.
        assert_eq!(fresnel_dielectric(-0.1, 1.0, 1.5), 1.0);
    }

    #[test]
    fn test_fresnel_conductor_perfect_mirror() {
        let f = fresnel_conductor(0.6, 1.0, &RGBSpectrum::splat(0.0), &RGBSpectrum::splat(1.0));
        assert_abs_diff_eq!(f.r(), 1.0, epsilon = 1e-4);
        let gold = fresnel_conductor(1.0, 1.0, &RGBSpectrum::new(0.143, 0.374, 1.442),
                                     &RGBSpectrum::new(3.983, 2.385, 1.603));
        assert!(gold.is_valid() && gold.max_coeff() <= 1.0);
    }

    #[test]
    fn test_refract_snell() {
        let wi = Vector3f::new(0.6, 0.0, 0.8);
        let wt = refract(&wi, &Vector3f::new(0.0, 0.0, 1.0), 1.0 / 1.5).unwrap();
        assert_abs_diff_eq!(wt.norm(), 1.0, epsilon = 1e-5);
        assert!(wt.z < 0.0);
        assert_abs_diff_eq!(wt.x, -0.4, epsilon = 1e-5);
        assert!(refract(&Vector3f::new(0.9, 0.0, 0.43589), &Vector3f::new(0.0, 0.0, 1.0), 1.5).is_none());
        assert_abs_diff_eq!((reflect(&wi, &Vector3f::new(0.0, 0.0, 1.0)) - reflect_local(&wi)).norm(),
                            0.0, epsilon = 1e-6);
    }
}
