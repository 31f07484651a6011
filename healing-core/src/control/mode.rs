//! Control modes

use crate::traits::BlinkPattern;

/// Operating mode of a motor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Spin until the sensor edge is found, then home
    Locating,
    /// Drive to the home position, then wait
    Homing,
    /// Parked at home until a spin is requested
    Waiting,
    /// Perform one full rotation, then wait
    Spinning,
    /// Motor released so the operator can set the gears by hand
    CalibrateWait,
    /// Spin to the first edge and record the home offset
    CalibrateZero,
    /// Count rotations between edges and record the full spin
    CalibrateSpin,
}

impl Mode {
    /// Check if a spin request is accepted in this mode
    pub fn accepts_spin(&self) -> bool {
        matches!(self, Mode::Waiting)
    }

    /// Status LED pattern shown on entry, for the motor that owns the LED
    pub fn indicator_pattern(&self) -> Option<BlinkPattern> {
        match self {
            Mode::Locating | Mode::CalibrateZero => Some(BlinkPattern::SEEKING),
            Mode::CalibrateWait => Some(BlinkPattern::CALIBRATE_WAIT),
            _ => None,
        }
    }
}

/// Sensor behaviour observed during one rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorHealth {
    /// Exactly one edge, as expected
    Ok,
    /// No edge: sensor or magnet likely faulty
    NoEdge,
    /// More than one edge: noisy sensor likely
    MultipleEdges,
}

impl SensorHealth {
    /// Classify the edge count of a finished rotation
    pub fn from_edge_count(edges: u16) -> Self {
        match edges {
            0 => SensorHealth::NoEdge,
            1 => SensorHealth::Ok,
            _ => SensorHealth::MultipleEdges,
        }
    }

    /// Pattern reporting a fault, if any
    pub fn fault_pattern(&self) -> Option<BlinkPattern> {
        match self {
            SensorHealth::Ok => None,
            SensorHealth::NoEdge => Some(BlinkPattern::NO_EDGE),
            SensorHealth::MultipleEdges => Some(BlinkPattern::MULTIPLE_EDGES),
        }
    }
}
