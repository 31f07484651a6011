//! Healing Time - Stepper Display Firmware
//!
//! Main firmware binary for RP2040-based Healing Time boards. Each board
//! drives two gear displays, each with a half-stepped 28BYJ-48 motor and a
//! Hall switch that sees the gear magnet once per revolution.
//!
//! All motor control runs in one cooperative loop in `main`. The serial
//! task only assembles command lines and queues them for the loop.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use healing_core::layout::check_layout;
use healing_core::traits::EdgeSignal;
use healing_core::{BoardId, Dispatcher, MotorControl};
use healing_drivers::indicator::Heartbeat;
use healing_drivers::sensor::{HallConfig, HallSensor};
use healing_drivers::stepper::HalfStepEngine;
use healing_hal_rp2040::{open_eeprom, ByteStorage, EmbassyClock};

use crate::channels::COMMAND_LINES;

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Stepper ids on every board; each selects a block of the shared storage
const STEPPER_IDS: [u8; 2] = [1, 2];

/// The button is sampled every loop pass, much faster than the sensors move
const BUTTON_CONFIG: HallConfig = HallConfig {
    stable_samples: 50,
    active_low: true,
};

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Healing Time firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Durable storage: last flash sector, shared by the board id and both
    // steppers
    let storage = RefCell::new(unwrap!(open_eeprom(p.FLASH)));
    unwrap!(check_layout(&STEPPER_IDS, storage.borrow().capacity()));

    let mut board = BoardId::load(&mut *storage.borrow_mut());
    if let Some(id) = config::BOARD_ID {
        if let Err(e) = board.assign(&mut *storage.borrow_mut(), id) {
            error!("Failed to store board id: {:?}", e);
        }
    }
    let dispatcher = Dispatcher::new(board);
    info!("Board id {}", dispatcher.board_id());

    // Status LED (Pico onboard LED: GPIO25)
    let heartbeat = RefCell::new(Heartbeat::new(
        Output::new(p.PIN_25, Level::Low),
        EmbassyClock,
    ));

    // Pin assignments are board-specific (Pico carrier: ULN2003 inputs
    // IN1-IN4 on GPIO2-5 and GPIO6-9, Hall switches on GPIO10/11)
    let engine1 = HalfStepEngine::new(
        [
            Output::new(p.PIN_2, Level::Low),
            Output::new(p.PIN_3, Level::Low),
            Output::new(p.PIN_4, Level::Low),
            Output::new(p.PIN_5, Level::Low),
        ],
        EmbassyClock,
    );
    let engine2 = HalfStepEngine::new(
        [
            Output::new(p.PIN_6, Level::Low),
            Output::new(p.PIN_7, Level::Low),
            Output::new(p.PIN_8, Level::Low),
            Output::new(p.PIN_9, Level::Low),
        ],
        EmbassyClock,
    );
    let hall1 = HallSensor::new(Input::new(p.PIN_10, Pull::Up), config::HALL_CONFIG);
    let hall2 = HallSensor::new(Input::new(p.PIN_11, Pull::Up), config::HALL_CONFIG);

    let [id1, id2] = STEPPER_IDS;
    let mut stepper1 = unwrap!(MotorControl::new(
        id1,
        engine1,
        hall1,
        &heartbeat,
        &storage,
        config::motor_config(id1),
    ));
    let mut stepper2 = unwrap!(MotorControl::new(
        id2,
        engine2,
        hall2,
        &heartbeat,
        &storage,
        config::motor_config(id2),
    ));

    // Calibration button to ground on GPIO12
    let mut button = HallSensor::new(Input::new(p.PIN_12, Pull::Up), BUTTON_CONFIG);

    // Shared serial command line
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config::SERIAL_BAUD;

    let tx_buf = TX_BUF.init([0u8; 16]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();

    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    info!("UART initialized at {} baud", config::SERIAL_BAUD);

    stepper1.begin();
    stepper2.begin();
    button.begin();
    let mut button_was_on = button.is_on();

    info!("Control loop running");

    loop {
        stepper1.update();
        stepper2.update();
        heartbeat.borrow_mut().update();

        button.update();
        let pressed = button.is_on();
        if pressed && !button_was_on {
            info!("Calibration button pressed");
            stepper1.calibrate();
            stepper2.calibrate();
        }
        button_was_on = pressed;

        while let Ok(line) = COMMAND_LINES.try_receive() {
            if let Ok(n) = dispatcher.execute(&line, &mut [&mut stepper1, &mut stepper2]) {
                debug!("'{}' addressed {} steppers", line.as_str(), n);
            }
        }

        // Let the serial task and the executor run between passes
        yield_now().await;
    }
}
