//! BMP280 barometric pressure / temperature sensor (I2C, address 0x76).
//!
//! Runs in normal mode (continuous conversions, 62.5 ms standby), so a read
//! is a single burst of the six data registers. Raw values are compensated
//! with the factory trim table using the integer formulas of the datasheet
//! (temperature in 0.01 °C, pressure in Q24.8 Pa).

use embedded_hal::i2c::I2c;
use log::info;

use crate::app::ports::{ContinuousSensor, Readout};
use crate::error::{DriverError, SensorError};
use crate::protocol::Quantity;

pub const ADDRESS: u8 = 0x76;
const CHIP_ID: u8 = 0x58;

const REG_CALIB: u8 = 0x88;
const REG_ID: u8 = 0xD0;
const REG_CTRL_MEAS: u8 = 0xF4;
const REG_CONFIG: u8 = 0xF5;
const REG_DATA: u8 = 0xF7;

/// t_sb = 62.5 ms, filter off.
const CONFIG: u8 = 0b001_000_00;
/// osrs_t ×1, osrs_p ×4, normal mode.
const CTRL_MEAS: u8 = 0b001_011_11;

/// Data registers still hold their reset value (no conversion yet).
const ADC_SKIPPED: i32 = 0x80000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub temperature_c: f32,
    pub pressure_hpa: f32,
}

/// Factory trim values (`dig_T1` .. `dig_P9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Calibration {
    t1: u16,
    t2: i16,
    t3: i16,
    p1: u16,
    p: [i16; 8],
}

impl Calibration {
    fn parse(raw: &[u8; 24]) -> Self {
        let u = |i: usize| u16::from_le_bytes([raw[i], raw[i + 1]]);
        let s = |i: usize| i16::from_le_bytes([raw[i], raw[i + 1]]);
        Self {
            t1: u(0),
            t2: s(2),
            t3: s(4),
            p1: u(6),
            p: [s(8), s(10), s(12), s(14), s(16), s(18), s(20), s(22)],
        }
    }

    /// Returns (temperature in 0.01 °C, t_fine).
    fn temperature(&self, adc_t: i32) -> (i32, i32) {
        // 64-bit intermediates: the squared term overflows i32 for some trims
        let adc_t = i64::from(adc_t);
        let t1 = i64::from(self.t1);
        let var1 = (((adc_t >> 3) - (t1 << 1)) * i64::from(self.t2)) >> 11;
        let var2 = (((((adc_t >> 4) - t1) * ((adc_t >> 4) - t1)) >> 12) * i64::from(self.t3)) >> 14;
        let t_fine = (var1 + var2) as i32;
        ((t_fine * 5 + 128) >> 8, t_fine)
    }

    /// Pressure in Pa as Q24.8, `None` if the trim table would divide by
    /// zero or a corrupt trim/raw value overflows the 64-bit formula.
    fn pressure(&self, adc_p: i32, t_fine: i32) -> Option<u32> {
        let [p2, p3, p4, p5, p6, p7, p8, p9] = self.p.map(i64::from);
        let mut var1 = i64::from(t_fine) - 128_000;
        let var1_sq = var1.checked_mul(var1)?;
        let mut var2 = var1_sq.checked_mul(p6)?;
        var2 = var2.checked_add(var1.checked_mul(p5)?.checked_mul(1 << 17)?)?;
        var2 = var2.checked_add(p4 << 35)?;
        var1 = (var1_sq.checked_mul(p3)? >> 8).checked_add(var1.checked_mul(p2)?.checked_mul(1 << 12)?)?;
        var1 = (1_i64 << 47).checked_add(var1)?.checked_mul(i64::from(self.p1))? >> 33;
        if var1 == 0 {
            return None;
        }
        let mut p = 1_048_576 - i64::from(adc_p);
        p = (p << 31).checked_sub(var2)?.checked_mul(3125)? / var1;
        var1 = p9.checked_mul(p >> 13)?.checked_mul(p >> 13)? >> 25;
        var2 = p8.checked_mul(p)? >> 19;
        p = (p.checked_add(var1)?.checked_add(var2)? >> 8).checked_add(p7 << 4)?;
        u32::try_from(p).ok()
    }
}

pub struct Bmp280<I2C> {
    i2c: I2C,
    calibration: Option<Calibration>,
}

impl<I2C: I2c> Bmp280<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            calibration: None,
        }
    }

    /// Check the chip ID, load the trim table and start normal mode.
    pub fn init(&mut self) -> Result<(), DriverError<I2C::Error>> {
        let mut id = [0u8];
        self.i2c
            .write_read(ADDRESS, &[REG_ID], &mut id)
            .map_err(DriverError::Bus)?;
        if id[0] != CHIP_ID {
            return Err(DriverError::NotCalibrated);
        }

        let mut raw = [0u8; 24];
        self.i2c
            .write_read(ADDRESS, &[REG_CALIB], &mut raw)
            .map_err(DriverError::Bus)?;
        let calibration = Calibration::parse(&raw);
        if calibration.t1 == 0 || calibration.p1 == 0 {
            return Err(DriverError::NotCalibrated);
        }

        // config is only writable in sleep mode, which is the power-on state
        self.i2c
            .write(ADDRESS, &[REG_CONFIG, CONFIG])
            .map_err(DriverError::Bus)?;
        self.i2c
            .write(ADDRESS, &[REG_CTRL_MEAS, CTRL_MEAS])
            .map_err(DriverError::Bus)?;

        self.calibration = Some(calibration);
        info!("BMP280: chip {:#04x} ready", id[0]);
        Ok(())
    }

    /// Burst-read the latest conversion and compensate it.
    pub fn measure(&mut self) -> Result<Measurement, DriverError<I2C::Error>> {
        if self.calibration.is_none() {
            self.init()?;
        }
        let Some(calibration) = self.calibration else {
            return Err(DriverError::NotCalibrated);
        };

        let mut data = [0u8; 6];
        self.i2c
            .write_read(ADDRESS, &[REG_DATA], &mut data)
            .map_err(DriverError::Bus)?;
        let adc_p = raw20(data[0], data[1], data[2]);
        let adc_t = raw20(data[3], data[4], data[5]);
        if adc_t == ADC_SKIPPED || adc_p == ADC_SKIPPED {
            return Err(DriverError::Busy);
        }

        let (centi_c, t_fine) = calibration.temperature(adc_t);
        let pressure = calibration
            .pressure(adc_p, t_fine)
            .ok_or(DriverError::OutOfRange)?;
        Ok(Measurement {
            temperature_c: centi_c as f32 / 100.0,
            pressure_hpa: pressure as f32 / 256.0 / 100.0,
        })
    }
}

fn raw20(msb: u8, lsb: u8, xlsb: u8) -> i32 {
    (i32::from(msb) << 12) | (i32::from(lsb) << 4) | (i32::from(xlsb) >> 4)
}

impl<I2C: I2c> ContinuousSensor for Bmp280<I2C> {
    fn quantities(&self) -> &'static [Quantity] {
        &[Quantity::Temperature, Quantity::Pressure]
    }

    fn read(&mut self) -> Result<Readout, SensorError> {
        let m = self.measure()?;
        let mut readout = Readout::new();
        let _ = readout.push((Quantity::Temperature, m.temperature_c));
        let _ = readout.push((Quantity::Pressure, m.pressure_hpa));
        Ok(readout)
    }
}
