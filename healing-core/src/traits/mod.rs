//! Capability traits
//!
//! These traits define the interface between the control state machine
//! and the hardware it drives. Drivers implement them for real pins; tests
//! implement them with simulated collaborators.

pub mod indicator;
pub mod sensor;
pub mod stepper;

pub use indicator::{BlinkPattern, StatusIndicator};
pub use sensor::EdgeSignal;
pub use stepper::StepEngine;
