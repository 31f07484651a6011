//! Command dispatch
//!
//! Routes parsed `HTC` commands to the motors of this board.

use healing_hal::ByteStorage;
use healing_protocol::{Command, CommandError, CommandKind};

use crate::board::BoardId;
use crate::control::MotorControl;
use crate::traits::{EdgeSignal, StatusIndicator, StepEngine};

/// A motor that can be addressed by commands
pub trait Addressable {
    /// Stepper id the motor answers to
    fn stepper_id(&self) -> u8;

    /// Request one rotation
    fn spin(&mut self);

    /// Arm or advance calibration
    fn calibrate(&mut self);
}

impl<E, G, I, S> Addressable for MotorControl<E, G, I, S>
where
    E: StepEngine,
    G: EdgeSignal,
    I: StatusIndicator,
    S: ByteStorage,
{
    fn stepper_id(&self) -> u8 {
        self.id()
    }

    fn spin(&mut self) {
        MotorControl::spin(self)
    }

    fn calibrate(&mut self) {
        MotorControl::calibrate(self)
    }
}

/// Applies commands addressed to this board
pub struct Dispatcher {
    board: BoardId,
}

impl Dispatcher {
    pub fn new(board: BoardId) -> Self {
        Self { board }
    }

    /// Id of this board
    pub fn board_id(&self) -> u8 {
        self.board.get()
    }

    /// Parse one received line and apply it
    ///
    /// Malformed lines are logged and touch no motor.
    ///
    /// # Returns
    /// Number of motors invoked
    pub fn execute(
        &self,
        line: &str,
        motors: &mut [&mut dyn Addressable],
    ) -> Result<usize, CommandError> {
        let command = Command::parse(line).map_err(|e| {
            warn!("Invalid command: {:?}", e);
            e
        })?;
        Ok(self.apply(&command, motors))
    }

    /// Apply an already parsed command
    pub fn apply(&self, command: &Command, motors: &mut [&mut dyn Addressable]) -> usize {
        let board_id = self.board_id();
        if !command.board.matches(board_id) {
            trace!("Command for another board, this is {}", board_id);
            return 0;
        }

        let mut invoked = 0;
        for motor in motors.iter_mut() {
            if !command.matches(board_id, motor.stepper_id()) {
                continue;
            }
            match command.kind {
                CommandKind::Spin => motor.spin(),
                CommandKind::Calibrate => motor.calibrate(),
            }
            invoked += 1;
        }
        debug!("Command {:?} invoked {} motors", command.kind, invoked);
        invoked
    }
}
