//! Embassy async tasks

pub mod serial_rx;

pub use serial_rx::serial_rx_task;
