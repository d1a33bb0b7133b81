//! # Pentad
//!
//! Pentad is a Rust library for animating the outer automorphism of the symmetric
//! group on six points. It combines exact permutation algebra with a small scene
//! tree whose pentagon-and-hub drawings of the six synthematic totals stay
//! consistent with a pair of permutations while the user swaps positions.
//!
//! - [`permutation`]: keyed finite permutations, composition and cycle notation.
//! - [`hexad`]: duads, synthemes, the six totals and the correspondence table.
//! - [`geometry`]: edge paths and anchor interpolation.
//! - [`scene`]: components, the renderer interface and an in-memory renderer.
//! - [`composer`]: selection, the frame-driven swap animation and its commit.

pub mod composer;
pub mod geometry;
pub mod hexad;
pub mod permutation;
pub mod scene;
