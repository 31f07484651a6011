//! Healing Time Command Protocol
//!
//! Boards sharing one serial line are addressed with short ASCII commands,
//! one per line:
//! ```text
//! ┌────────┬───────┬─────────┬─────────┐
//! │ PREFIX │ BOARD │ STEPPER │ COMMAND │
//! │ "HTC"  │ 0-9 * │ 1-2 *   │ S / C   │
//! └────────┴───────┴─────────┴─────────┘
//! ```
//!
//! `HTC21S` spins stepper 1 of board 2, `HTC**S` spins every stepper on
//! every board, `HTC**C` steps every stepper through calibration.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;

pub use command::{
    BoardSelector, Command, CommandError, CommandKind, StepperSelector, COMMAND_LEN,
    COMMAND_PREFIX, MAX_BOARD_ID, MAX_STEPPER_ID, MIN_STEPPER_ID,
};
pub use line::{LineReader, MAX_LINE_LEN};
