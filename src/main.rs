//! TwinCore Firmware: Main Entry Point
//!
//! Two loops on two cores, one channel between them.
//!
//! ```text
//!        PRO_CPU (core 0)                         APP_CPU (core 1)
//! ┌──────────────────────────┐             ┌──────────────────────────────┐
//! │ Acquisition              │             │ Presentation                 │
//! │  BMP280 · AHT20 (I2C)    │  Sample     │  Readings → rules → outputs  │
//! │  Joystick X/Y (ADC1)     │ ──────────▶ │  ConsoleDisplay (DisplayPort)│
//! │  TagReader               │  (kind,     │  HardwareAdapter (LEDs,      │
//! │  maintenance trigger     │   payload)  │                   buzzer)    │
//! └──────────────────────────┘             └──────────────────────────────┘
//!                       InterCoreChannel (8 words, blocking)
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::{Result, anyhow};
use esp_idf_hal::delay::Delay;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{info, warn};

use twincore::adapters::console_display::ConsoleDisplay;
use twincore::adapters::hardware::HardwareAdapter;
use twincore::adapters::time::MonotonicClock;
use twincore::app::acquisition::Acquisition;
use twincore::app::presentation::Presentation;
use twincore::channel::InterCoreChannel;
use twincore::config::SystemConfig;
use twincore::drivers::buzzer::BuzzerDriver;
use twincore::drivers::hw_init;
use twincore::drivers::maintenance;
use twincore::drivers::status_led::StatusLed;
use twincore::drivers::task_pin::{Core, spawn_on_core};
use twincore::error::Error;
use twincore::protocol::Axis;
use twincore::sensors::aht20::Aht20;
use twincore::sensors::bmp280::Bmp280;
use twincore::sensors::joystick::JoystickAxis;
use twincore::sensors::shared_bus::SharedBus;
use twincore::sensors::tag_reader::TagReader;

// ── Task parameters ───────────────────────────────────────────

const ACQUISITION_PRIORITY: u8 = 6;
const ACQUISITION_STACK_KB: usize = 8;
const PRESENTATION_PRIORITY: u8 = 5;
const PRESENTATION_STACK_KB: usize = 8;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  TwinCore v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (compile-time defaults) ──────────────
    let config = SystemConfig::default();
    config.validate().map_err(Error::from)?;
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => warn!("Config not printable: {:?}", e),
    }

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals(config.buzzer_frequency_hz)?;
    if let Err(e) = hw_init::init_isr_service() {
        warn!("ISR service init failed: {}; maintenance button disabled", e);
    }

    let peripherals = Peripherals::take()?;
    // SDA / SCL must match pins::I2C_SDA_GPIO / pins::I2C_SCL_GPIO
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio8,
        peripherals.pins.gpio9,
        &I2cConfig::new().baudrate(Hertz(config.i2c_frequency_hz)),
    )?;
    let bus = SharedBus::new(i2c);

    // A sensor that fails here is retried on every read and reported as a
    // failure sample until it answers.
    let mut bmp280 = Bmp280::new(bus.clone());
    if let Err(e) = bmp280.init() {
        warn!("BMP280 init failed: {}", e);
    }
    let mut aht20 = Aht20::new(bus, Delay::new_default());
    if let Err(e) = aht20.init() {
        warn!("AHT20 init failed: {}", e);
    }

    // ── 4. Wire the two loops ─────────────────────────────────
    let acquisition = Acquisition::new(&config)
        .with_continuous(bmp280)
        .with_continuous(aht20)
        .with_analog(JoystickAxis::new(Axis::X, hw_init::ADC1_CH_JOYSTICK_X))
        .with_analog(JoystickAxis::new(Axis::Y, hw_init::ADC1_CH_JOYSTICK_Y))
        // Silent until an RFID driver task calls tag_reader::present_tag.
        .with_identity(TagReader::new());

    let actuators = HardwareAdapter::new(StatusLed::new(), BuzzerDriver::new());
    let presentation = Presentation::new(ConsoleDisplay::new(), actuators, config.clone());

    // Lives for the whole run; each endpoint moves into its own thread.
    let channel: &'static mut InterCoreChannel = Box::leak(Box::new(InterCoreChannel::new()));
    let (mut writer, mut reader) = channel.split();

    let period_ms = config.acquisition_period_ms;
    let acquire = spawn_on_core(
        Core::Pro,
        ACQUISITION_PRIORITY,
        ACQUISITION_STACK_KB,
        "acquire\0",
        move || {
            let clock = MonotonicClock::new();
            acquisition.run(&mut writer, &clock, period_ms, maintenance::service)
        },
    )?;
    let present = spawn_on_core(
        Core::App,
        PRESENTATION_PRIORITY,
        PRESENTATION_STACK_KB,
        "present\0",
        move || presentation.run(&mut reader),
    )?;

    info!("Boot complete");

    // Neither loop returns; a join only completes if one of them panicked.
    acquire
        .join()
        .map_err(|_| anyhow!("acquisition thread panicked"))?;
    present
        .join()
        .map_err(|_| anyhow!("presentation thread panicked"))?;
    Ok(())
}
