//! AHT20 relative-humidity sensor (I2C, address 0x38).
//!
//! Each measurement is triggered by a command, takes ~80 ms, and returns a
//! 7-byte frame: status, 20-bit humidity, 20-bit temperature, CRC-8.
//! The station only reports humidity from this part; temperature comes from
//! the BMP280.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::info;

use crate::app::ports::{ContinuousSensor, Readout};
use crate::error::{DriverError, SensorError};
use crate::protocol::Quantity;

pub const ADDRESS: u8 = 0x38;

const CMD_STATUS: u8 = 0x71;
const CMD_INIT: [u8; 3] = [0xBE, 0x08, 0x00];
const CMD_MEASURE: [u8; 3] = [0xAC, 0x33, 0x00];

const STATUS_BUSY: u8 = 0x80;
const STATUS_CALIBRATED: u8 = 0x08;

const POWER_ON_MS: u32 = 40;
const INIT_MS: u32 = 10;
const MEASURE_MS: u32 = 80;

/// CRC-8 over the status and data bytes: polynomial 0x31, init 0xFF.
const FRAME_CRC: crc::Crc<u8> = crc::Crc::<u8>::new(&crc::CRC_8_NRSC_5);

/// 2^20, full scale of both raw fields.
const RAW_SCALE: f32 = 1_048_576.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub humidity_percent: f32,
    pub temperature_c: f32,
}

pub struct Aht20<I2C, D> {
    i2c: I2C,
    delay: D,
    calibrated: bool,
}

impl<I2C: I2c, D: DelayNs> Aht20<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            calibrated: false,
        }
    }

    /// Wait out power-on and load the calibration if the device lost it.
    pub fn init(&mut self) -> Result<(), DriverError<I2C::Error>> {
        self.delay.delay_ms(POWER_ON_MS);
        if self.status()? & STATUS_CALIBRATED == 0 {
            self.i2c.write(ADDRESS, &CMD_INIT).map_err(DriverError::Bus)?;
            self.delay.delay_ms(INIT_MS);
            if self.status()? & STATUS_CALIBRATED == 0 {
                return Err(DriverError::NotCalibrated);
            }
        }
        self.calibrated = true;
        info!("AHT20: calibrated");
        Ok(())
    }

    fn status(&mut self) -> Result<u8, DriverError<I2C::Error>> {
        let mut buf = [0u8];
        self.i2c
            .write_read(ADDRESS, &[CMD_STATUS], &mut buf)
            .map_err(DriverError::Bus)?;
        Ok(buf[0])
    }

    /// Trigger one conversion and block until it is done.
    pub fn measure(&mut self) -> Result<Measurement, DriverError<I2C::Error>> {
        if !self.calibrated {
            self.init()?;
        }
        self.i2c.write(ADDRESS, &CMD_MEASURE).map_err(DriverError::Bus)?;
        self.delay.delay_ms(MEASURE_MS);

        let mut frame = [0u8; 7];
        self.i2c.read(ADDRESS, &mut frame).map_err(DriverError::Bus)?;
        if frame[0] & STATUS_BUSY != 0 {
            return Err(DriverError::Busy);
        }
        if FRAME_CRC.checksum(&frame[..6]) != frame[6] {
            return Err(DriverError::Checksum);
        }
        Ok(decode(&frame))
    }
}

fn decode(frame: &[u8; 7]) -> Measurement {
    let raw_h = (u32::from(frame[1]) << 12) | (u32::from(frame[2]) << 4) | (u32::from(frame[3]) >> 4);
    let raw_t =
        ((u32::from(frame[3]) & 0x0F) << 16) | (u32::from(frame[4]) << 8) | u32::from(frame[5]);
    Measurement {
        humidity_percent: raw_h as f32 * 100.0 / RAW_SCALE,
        temperature_c: raw_t as f32 * 200.0 / RAW_SCALE - 50.0,
    }
}


impl<I2C: I2c, D: DelayNs> ContinuousSensor for Aht20<I2C, D> {
    fn quantities(&self) -> &'static [Quantity] {
        &[Quantity::Humidity]
    }

    fn read(&mut self) -> Result<Readout, SensorError> {
        let m = self.measure()?;
        let mut readout = Readout::new();
        let _ = readout.push((Quantity::Humidity, m.humidity_percent));
        Ok(readout)
    }
}
