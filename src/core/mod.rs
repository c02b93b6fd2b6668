//! Core application primitives (engines, orchestrators)

pub mod batch;
pub mod pipeline;

pub use batch::*;
pub use pipeline::*;
