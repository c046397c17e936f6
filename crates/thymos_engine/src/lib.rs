//! # Thymos Engine
//!
//! The arbitration engine: derives fear from the state vector, selects the
//! internal emotion from the priority-ranked catalog, overlays the social
//! mask, blends everything over time, and runs the sleep sub-machine.
//! One [`MaskEngine`] owns the whole pipeline and is ticked at a fixed
//! rate; the renderer only ever sees its [`Frame`].

pub mod arbiter;
pub mod blender;
pub mod engine;
pub mod masking;
pub mod sleep;

pub use arbiter::{compute_fear, select, suppresses, Selection};
pub use blender::TemporalBlender;
pub use engine::{EmotionalState, Frame, MaskEngine, Snapshot};
pub use masking::{emotion_distance, MaskVerdict, MaskingModel, SocialInputs};
pub use sleep::SleepState;
