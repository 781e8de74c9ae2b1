//! Configuration persistence for hotmath.
//!
//! A JSON file store for the tuned [`Configuration`] and a compact binary
//! codec for hosts that embed it in their own snapshots.

pub mod codec;
pub mod store;

pub use codec::*;
pub use store::*;

pub use hotmath_core::Configuration;
