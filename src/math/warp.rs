// Copyright @yucwang 2023

use super::constants::{ INV_FOURPI, INV_PI, INV_TWOPI, PI, Float, Point2f, Vector2f, Vector3f };

const WARP_EPSILON: Float = 1e-4;

fn on_unit_sphere(v: &Vector3f) -> bool {
    (1.0 - v.norm_squared()).abs() <= WARP_EPSILON
}

pub fn square_to_uniform_square(u: &Point2f) -> Point2f {
    *u
}

pub fn square_to_uniform_square_pdf(p: &Point2f) -> Float {
    if p.x >= 0.0 && p.x <= 1.0 && p.y >= 0.0 && p.y <= 1.0 { 1.0 } else { 0.0 }
}

pub fn square_to_uniform_disk(u: &Point2f) -> Point2f {
    let r = u.x.sqrt();
    let (sin_phi, cos_phi) = (2.0 * PI * u.y).sin_cos();

    Vector2f::new(r * cos_phi, r * sin_phi)
}

pub fn square_to_uniform_disk_pdf(p: &Point2f) -> Float {
    if p.norm_squared() <= 1.0 { INV_PI } else { 0.0 }
}

/// Shirley-Chiu mapping; preserves stratification better than the polar map.
pub fn square_to_uniform_disk_concentric(u: &Point2f) -> Point2f {
    let r1: Float = 2.0 * u.x - 1.0;
    let r2: Float = 2.0 * u.y - 1.0;

    let phi: Float;
    let r:   Float;

    if r1 == 0. && r2 == 0. {
        r = 0.0;
        phi = 0.0;
    } else if r1 * r1 > r2 * r2 {
        r = r1;
        phi = (PI / 4.0) * (r2 / r1);
    } else {
        r = r2;
        phi = (PI / 2.0) - (r1 / r2) * (PI / 4.0);
    }

    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector2f::new(r * cos_phi, r * sin_phi)
}

pub fn square_to_uniform_sphere(u: &Point2f) -> Vector3f {
    let z: Float = 1.0 - 2.0 * u.x;
    let r: Float = (1. - z * z).max(0.0).sqrt();
    let (sin_phi, cos_phi) = (2. * PI * u.y).sin_cos();

    Vector3f::new(r * cos_phi, r * sin_phi, z)
}

pub fn square_to_uniform_sphere_pdf(v: &Vector3f) -> Float {
    if on_unit_sphere(v) { INV_FOURPI } else { 0.0 }
}

/// Uniform over the cap `z >= cos_theta_max` of the unit sphere.
pub fn square_to_uniform_sphere_cap(u: &Point2f, cos_theta_max: Float) -> Vector3f {
    let h = 1.0 - cos_theta_max;
    let z = 1.0 - h * u.x;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let (sin_phi, cos_phi) = (2. * PI * u.y).sin_cos();

    Vector3f::new(r * cos_phi, r * sin_phi, z)
}

pub fn square_to_uniform_sphere_cap_pdf(v: &Vector3f, cos_theta_max: Float) -> Float {
    let h = 1.0 - cos_theta_max;
    if h <= 0.0 || !on_unit_sphere(v) || v.z < cos_theta_max {
        return 0.0;
    }

    INV_TWOPI / h
}

pub fn square_to_uniform_hemisphere(u: &Point2f) -> Vector3f {
    let z: Float = u.x;
    let r: Float = (1. - z * z).max(0.0).sqrt();
    let (sin_phi, cos_phi) = (2. * PI * u.y).sin_cos();

    Vector3f::new(r * cos_phi, r * sin_phi, z)
}

pub fn square_to_uniform_hemisphere_pdf(v: &Vector3f) -> Float {
    if on_unit_sphere(v) && v.z >= 0.0 { INV_TWOPI } else { 0.0 }
}

pub fn square_to_cosine_hemisphere(u: &Point2f) -> Vector3f {
    let p = square_to_uniform_disk_concentric(u);
    let z = (1. - p.x * p.x - p.y * p.y).max(0.0).sqrt();

    Vector3f::new(p.x, p.y, z)
}

pub fn square_to_cosine_hemisphere_pdf(v: &Vector3f) -> Float {
    if on_unit_sphere(v) && v.z >= 0.0 { v.z * INV_PI } else { 0.0 }
}

/// Beckmann microfacet normal, density `D(m) cos(theta_m)`.
pub fn square_to_beckmann(u: &Point2f, alpha: Float) -> Vector3f {
    let tan2_theta = -alpha * alpha * (1.0 - u.x).max(Float::MIN_POSITIVE).ln();
    let cos_theta = 1.0 / (1.0 + tan2_theta).sqrt();
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let (sin_phi, cos_phi) = (2. * PI * u.y).sin_cos();

    Vector3f::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

pub fn square_to_beckmann_pdf(m: &Vector3f, alpha: Float) -> Float {
    if !on_unit_sphere(m) || m.z <= 0.0 {
        return 0.0;
    }

    let cos2 = m.z * m.z;
    let tan2 = (1.0 - cos2) / cos2;
    (-tan2 / (alpha * alpha)).exp() / (PI * alpha * alpha * cos2 * m.z)
}

/// Trowbridge-Reitz (GGX) normal distribution `D(m)`.
pub fn trowbridge_reitz_d(m: &Vector3f, alpha: Float) -> Float {
    if m.z <= 0.0 {
        return 0.0;
    }

    let cos2 = m.z * m.z;
    let tan2 = (1.0 - cos2).max(0.0) / cos2;
    let e = 1.0 + tan2 / (alpha * alpha);
    1.0 / (PI * alpha * alpha * cos2 * cos2 * e * e)
}

/// Trowbridge-Reitz microfacet normal, density `D(m) cos(theta_m)`.
pub fn square_to_trowbridge_reitz(u: &Point2f, alpha: Float) -> Vector3f {
    let x = u.x.min(1.0 - WARP_EPSILON);
    let tan2_theta = alpha * alpha * x / (1.0 - x);
    let cos_theta = 1.0 / (1.0 + tan2_theta).sqrt();
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let (sin_phi, cos_phi) = (2. * PI * u.y).sin_cos();

    Vector3f::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

pub fn square_to_trowbridge_reitz_pdf(m: &Vector3f, alpha: Float) -> Float {
    if !on_unit_sphere(m) {
        return 0.0;
    }

    trowbridge_reitz_d(m, alpha) * m.z
}

/// Barycentric coordinates `(b0, b1, b2)`, uniform over the triangle.
pub fn square_to_uniform_triangle(u: &Point2f) -> Vector3f {
    let su1 = u.x.sqrt();
    let b0 = 1.0 - su1;
    let b1 = u.y * su1;

    Vector3f::new(b0, b1, 1.0 - b0 - b1)
}
