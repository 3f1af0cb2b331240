//! Integer math for the fixed-point pipeline.
//!
//! Nothing in here touches floating point: angles are whole degrees and
//! trigonometric values are scaled by [`trig::MAX_SIN`].

pub mod trig;
pub mod vec2;
pub mod vec3;
