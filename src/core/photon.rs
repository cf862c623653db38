// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::spectrum::RGBSpectrum;
use std::cmp::Ordering;

/// Deposited transport particle. `direction` points back towards where
/// the particle came from and `power` is already normalized per light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Photon {
    pub position: Vector3f,
    pub direction: Vector3f,
    pub power: RGBSpectrum,
}

impl Photon {
    pub fn new(position: Vector3f, direction: Vector3f, power: RGBSpectrum) -> Self {
        Self { position, direction, power }
    }
}

/// Growable photon storage, owned by the tracing pass only.
#[derive(Debug, Default)]
pub struct PhotonBuffer {
    photons: Vec<Photon>,
}

impl PhotonBuffer {
    pub fn new() -> Self {
        Self { photons: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { photons: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, photon: Photon) {
        self.photons.push(photon);
    }

    pub fn len(&self) -> usize {
        self.photons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photons.is_empty()
    }
}

/// Immutable kd-tree over photons. The tree is implicit: the node of the
/// range `[lo, hi)` is the photon at `(lo + hi) / 2`, split along
/// `axes[mid]`, with the left subtree in `[lo, mid)` and the right one
/// in `(mid, hi)`.
#[derive(Debug, Default)]
pub struct PhotonMap {
    photons: Vec<Photon>,
    axes: Vec<u8>,
    bounds: AABB,
}

impl PhotonMap {
    /// Consumes the buffer; no photon can be added afterwards.
    pub fn build(buffer: PhotonBuffer) -> Self {
        let mut photons = buffer.photons;
        let mut axes = vec![0u8; photons.len()];
        let mut bounds = AABB::default();
        for photon in photons.iter() {
            bounds.expand_by_point(&photon.position);
        }

        let mut stack = vec![(0usize, photons.len())];
        while let Some((lo, hi)) = stack.pop() {
            if hi <= lo {
                continue;
            }

            let mut range_bounds = AABB::default();
            for photon in photons[lo..hi].iter() {
                range_bounds.expand_by_point(&photon.position);
            }
            let axis = range_bounds.max_extent();

            let mid = (lo + hi) / 2;
            photons[lo..hi].select_nth_unstable_by(mid - lo, |a, b| {
                a.position[axis].partial_cmp(&b.position[axis]).unwrap_or(Ordering::Equal)
            });
            axes[mid] = axis as u8;

            stack.push((lo, mid));
            stack.push((mid + 1, hi));
        }

        Self { photons, axes, bounds }
    }

    /// Visits every photon with `|position - p| <= radius`.
    pub fn search<F>(&self, p: &Vector3f, radius: Float, mut visit: F)
    where
        F: FnMut(&Photon),
    {
        let radius2 = radius * radius;
        let mut stack = vec![(0usize, self.photons.len())];

        while let Some((lo, hi)) = stack.pop() {
            if hi <= lo {
                continue;
            }

            let mid = (lo + hi) / 2;
            let photon = &self.photons[mid];
            if (photon.position - p).norm_squared() <= radius2 {
                visit(photon);
            }

            let axis = self.axes[mid] as usize;
            let d = p[axis] - photon.position[axis];
            if d <= radius {
                stack.push((lo, mid));
            }
            if d >= -radius {
                stack.push((mid + 1, hi));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.photons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photons.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Photon> {
        self.photons.iter()
    }

    pub fn bounding_box(&self) -> &AABB {
        &self.bounds
    }
}
