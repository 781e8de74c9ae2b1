//! Keyed shuffle.
//!
//! Reorders a list while drawing exactly one `next_i32` per element, the
//! same number of draws a Fisher-Yates shuffle over the list would make.
//! A caller sharing its random source with other systems therefore sees
//! the same downstream sequence whichever shuffle runs.

use glam::IVec3;

use crate::random::RandomSource;

/// Stable 32-bit hash mixed into the shuffle key.
pub trait IdentityHash {
    fn identity_hash(&self) -> i32;
}

impl IdentityHash for IVec3 {
    /// `(y + z * 31) * 31 + x`, wrapping.
    fn identity_hash(&self) -> i32 {
        self.y
            .wrapping_add(self.z.wrapping_mul(31))
            .wrapping_mul(31)
            .wrapping_add(self.x)
    }
}

impl IdentityHash for i32 {
    fn identity_hash(&self) -> i32 {
        *self
    }
}

/// Sort `list` by `identity_hash ^ rng.next_i32()`, ascending.
///
/// Draws happen in list order before any element moves. Equal keys keep
/// their relative order.
pub fn keyed_shuffle<T: IdentityHash>(list: &mut Vec<T>, rng: &mut impl RandomSource) {
    let mut keyed: Vec<(i32, T)> = list
        .drain(..)
        .map(|item| (item.identity_hash() ^ rng.next_i32(), item))
        .collect();

    keyed.sort_by_key(|(key, _)| *key);
    list.extend(keyed.into_iter().map(|(_, item)| item));
}
