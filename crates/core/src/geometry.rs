//! Vector helpers built on the fast square root.
//!
//! Axis-aligned boxes are passed as `(min, max)` corner pairs.

use glam::DVec3;

use crate::math::sqrt::fast_inv_sqrt;

/// Squared lengths below this normalise to zero.
const NORMALIZE_EPSILON: f64 = 1e-10;

/// `v / |v|` using the bit-trick inverse square root.
///
/// Relative error of the length matches [`fast_inv_sqrt`]; near-zero
/// vectors come back as `DVec3::ZERO`.
#[inline]
pub fn fast_normalize(v: DVec3) -> DVec3 {
    let len_sq = v.length_squared();
    if len_sq < NORMALIZE_EPSILON {
        return DVec3::ZERO;
    }
    v * fast_inv_sqrt(len_sq)
}

/// Box-box overlap. Touching faces count as overlapping.
#[inline]
pub fn aabbs_intersect(a_min: DVec3, a_max: DVec3, b_min: DVec3, b_max: DVec3) -> bool {
    if a_max.x < b_min.x || a_min.x > b_max.x {
        return false;
    }
    if a_max.y < b_min.y || a_min.y > b_max.y {
        return false;
    }
    a_max.z >= b_min.z && a_min.z <= b_max.z
}

/// Distance along `dir` from `origin` to the box surface.
///
/// Slab test. From outside, the entry distance; from inside, the exit
/// distance. `None` when the ray misses or the box lies behind the origin.
/// `dir` does not need to be normalised; distances are in units of `dir`.
pub fn ray_box_distance(origin: DVec3, dir: DVec3, min: DVec3, max: DVec3) -> Option<f64> {
    let inv = dir.recip();
    let t1 = (min - origin) * inv;
    let t2 = (max - origin) * inv;

    let t_near = t1.min(t2).max_element();
    let t_far = t1.max(t2).min_element();

    if t_near > t_far || t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}
