//! Inter-task communication
//!
//! The serial task only assembles lines; the control loop owns every motor
//! and applies the commands.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

use healing_protocol::MAX_LINE_LEN;

/// Command line queue depth
pub const LINE_QUEUE_DEPTH: usize = 4;

/// Received command lines, serial task to control loop
pub static COMMAND_LINES: Channel<CriticalSectionRawMutex, String<MAX_LINE_LEN>, LINE_QUEUE_DEPTH> =
    Channel::new();
