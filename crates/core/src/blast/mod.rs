//! Blast propagation.
//!
//! A blast casts one ray per direction in [`directions`]. Each ray starts
//! at the centre of the origin cell with a randomised share of the blast
//! radius as strength and marches outward in fixed steps. Every cell it
//! enters costs strength in proportion to the cell's resistance; the ray
//! stops once strength runs out or it leaves the world. Cells the world
//! agrees to collapse are collected once each, in first-hit order.
//!
//! The world itself (bounds, resistance, collapse rule) stays with the host
//! behind [`BlastWorld`].

mod directions;
mod shuffle;

use std::collections::HashSet;

use glam::{DVec3, IVec3};

pub use directions::{directions, DIRECTION_COUNT};
pub use shuffle::{keyed_shuffle, IdentityHash};

use crate::random::RandomSource;

// ============================================================================
// Decay constants
// ============================================================================

/// Smallest per-ray share of the radius.
pub const STRENGTH_MIN: f32 = 0.7;

/// Width of the random per-ray share; shares fall in `[0.7, 1.3)`.
pub const STRENGTH_SPREAD: f32 = 0.6;

/// Added to a cell's resistance before scaling.
pub const RESISTANCE_OFFSET: f32 = 0.3;

/// Scale applied to `resistance + RESISTANCE_OFFSET`.
pub const RESISTANCE_SCALE: f32 = 0.3;

/// Distance advanced per march step.
pub const STEP_LEN: f64 = 0.3;

/// Strength lost per march step regardless of the cell.
pub const STEP_COST: f32 = 0.225_000_01;

/// Host-side view of the world a blast runs in.
pub trait BlastWorld {
    fn in_bounds(&self, cell: IVec3) -> bool;

    /// Blast resistance of the cell's contents; 0 for empty cells.
    fn resistance_of(&self, cell: IVec3) -> f32;

    /// Whether a ray reaching `cell` with `strength` left destroys it.
    fn should_collapse(&self, cell: IVec3, strength: f32) -> bool;
}

/// [`BlastWorld`] built from three closures.
pub struct FnWorld<B, R, C> {
    in_bounds: B,
    resistance_of: R,
    should_collapse: C,
}

impl<B, R, C> FnWorld<B, R, C>
where
    B: Fn(IVec3) -> bool,
    R: Fn(IVec3) -> f32,
    C: Fn(IVec3, f32) -> bool,
{
    pub fn new(in_bounds: B, resistance_of: R, should_collapse: C) -> Self {
        Self {
            in_bounds,
            resistance_of,
            should_collapse,
        }
    }
}

impl<B, R, C> BlastWorld for FnWorld<B, R, C>
where
    B: Fn(IVec3) -> bool,
    R: Fn(IVec3) -> f32,
    C: Fn(IVec3, f32) -> bool,
{
    fn in_bounds(&self, cell: IVec3) -> bool {
        (self.in_bounds)(cell)
    }

    fn resistance_of(&self, cell: IVec3) -> f32 {
        (self.resistance_of)(cell)
    }

    fn should_collapse(&self, cell: IVec3, strength: f32) -> bool {
        (self.should_collapse)(cell, strength)
    }
}

/// Cells destroyed by a blast of `radius` centred on `center`.
///
/// Draws exactly one `next_f32` per direction, in direction order, even for
/// rays that end immediately. The result holds each cell at most once, in
/// the order rays first collapsed it.
pub fn calculate_affected_cells(
    center: IVec3,
    radius: f32,
    world: &impl BlastWorld,
    rng: &mut impl RandomSource,
) -> Vec<IVec3> {
    let origin = center.as_dvec3() + DVec3::splat(0.5);

    let mut visited: HashSet<u64> = HashSet::new();
    let mut affected = Vec::new();

    for &dir in directions() {
        let mut strength = radius * (STRENGTH_MIN + rng.next_f32() * STRENGTH_SPREAD);
        let step = dir * STEP_LEN;
        let mut pos = origin;

        while strength > 0.0 {
            let cell = pos.floor().as_ivec3();
            if !world.in_bounds(cell) {
                break;
            }

            strength -= (world.resistance_of(cell) + RESISTANCE_OFFSET) * RESISTANCE_SCALE;
            if strength > 0.0 && world.should_collapse(cell, strength) && visited.insert(pack(cell)) {
                affected.push(cell);
            }

            pos += step;
            strength -= STEP_COST;
        }
    }

    tracing::trace!(radius, cells = affected.len(), "blast sampled");
    affected
}

/// Bits per axis in a packed cell key.
const AXIS_BITS: u32 = 21;
const AXIS_MASK: u64 = (1 << AXIS_BITS) - 1;

/// Packs a cell into one `u64`, 21 two's-complement bits per axis.
/// Distinct for coordinates in `[-2^20, 2^20)`.
#[inline]
fn pack(cell: IVec3) -> u64 {
    let x = cell.x as u64 & AXIS_MASK;
    let y = cell.y as u64 & AXIS_MASK;
    let z = cell.z as u64 & AXIS_MASK;
    (x << (2 * AXIS_BITS)) | (y << AXIS_BITS) | z
}
