//! Stepper driver implementations

pub mod half_step;

pub use half_step::{HalfStepEngine, HALF_STEP_SEQUENCE};
