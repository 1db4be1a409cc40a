//! Arithmo - Serial Scoreboard Firmware
//!
//! Main firmware binary for RP2040-based scoreboard boards. One keystroke
//! arrives over the serial link, the matching digit lights up on the
//! seven-segment display, and a short acknowledgement goes back over the
//! same link.
//!
//! Named after the Greek "arithmos" meaning "number".

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use arithmo_core::mailbox::Mailbox;

use crate::board::SegmentPins;
use crate::queues::{DigitQueue, EchoQueue, DIGIT_QUEUE_POLICY, ECHO_QUEUE_POLICY};

mod board;
mod queues;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

// Static cells for the queues (must live forever for task references)
static DIGIT_QUEUE: StaticCell<DigitQueue> = StaticCell::new();
static ECHO_QUEUE: StaticCell<EchoQueue> = StaticCell::new();

/// Fixed line rate of the character link
const BAUD_RATE: u32 = 9600;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Arithmo firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup UART for the character link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BAUD_RATE;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for the character link");

    // Segment lines a..g + decimal point on GPIO 2-9, display common
    // enable on GPIO 10
    let segments = [
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
    ];
    let enable = Output::new(p.PIN_10, Level::Low);
    let port = SegmentPins::new(segments, enable);

    info!("Segment port initialized");

    // Both queues are constructed once here and handed to the tasks as
    // 'static references; no task ever sees an unconstructed queue
    let digits: &'static DigitQueue = DIGIT_QUEUE.init(Mailbox::new(DIGIT_QUEUE_POLICY));
    let echoes: &'static EchoQueue = ECHO_QUEUE.init(Mailbox::new(ECHO_QUEUE_POLICY));

    // Spawn tasks
    spawner.spawn(tasks::reader_task(rx, digits, echoes)).unwrap();
    spawner.spawn(tasks::render_task(port, digits)).unwrap();
    spawner.spawn(tasks::reporter_task(tx, echoes)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
