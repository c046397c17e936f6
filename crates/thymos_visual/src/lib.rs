//! # Thymos Visual
//!
//! Parameter resolution for the avatar's render shell: one engine
//! [`Frame`](thymos_engine::Frame) in, one [`RenderParams`] out. The shell
//! owns the geometry; this crate fixes every scalar the original drew
//! with — breath, scale, rotation, jitter amplitudes, palettes, layer
//! sizes and alphas — so any backend can replay the same body language.

pub mod params;
pub mod resolver;

pub use params::{CoreParams, MembraneParams, PointLayer, RenderParams};
pub use resolver::Resolver;
