//! Unified error types for the TwinCore firmware.
//!
//! Every variant is `Copy` so errors can be handed across the sensor,
//! protocol and config layers without allocation. None of them ever reaches
//! an outside caller: sensor failures become failure-kind samples, protocol
//! errors are logged by the presentation loop, config errors stop the boot.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor transaction failed.
    Sensor(SensorError),
    /// A word pair read off the inter-core channel did not decode.
    Protocol(ProtocolError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Protocol(e) => write!(f, "protocol: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The bus transaction (I2C write/read) failed.
    Bus,
    /// The device did not finish its conversion in time.
    Busy,
    /// The device has not been initialised or lost its calibration.
    NotCalibrated,
    /// The reader saw a tag but could not complete the anticollision/read.
    TagRead,
    /// Reading is outside the physically plausible range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "bus transaction failed"),
            Self::Busy => write!(f, "conversion still busy"),
            Self::NotCalibrated => write!(f, "device not calibrated"),
            Self::TagRead => write!(f, "tag read failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

/// Error of a concrete bus driver, generic over the bus error type.
///
/// Drivers return this; the sensor port flattens it into [`SensorError`]
/// since the acquisition loop only needs to know that the read failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError<E> {
    /// The underlying I2C transaction failed.
    Bus(E),
    /// Conversion not finished when the result was fetched.
    Busy,
    /// Wrong chip ID or missing calibration data.
    NotCalibrated,
    /// Frame checksum mismatch.
    Checksum,
    /// Compensated value outside the device's range.
    OutOfRange,
}

impl<E: fmt::Debug> fmt::Display for DriverError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus error: {e:?}"),
            Self::Busy => write!(f, "device busy"),
            Self::NotCalibrated => write!(f, "device not calibrated"),
            Self::Checksum => write!(f, "checksum mismatch"),
            Self::OutOfRange => write!(f, "value out of range"),
        }
    }
}

impl<E> From<DriverError<E>> for SensorError {
    fn from(e: DriverError<E>) -> Self {
        match e {
            DriverError::Bus(_) | DriverError::Checksum => Self::Bus,
            DriverError::Busy => Self::Busy,
            DriverError::NotCalibrated => Self::NotCalibrated,
            DriverError::OutOfRange => Self::OutOfRange,
        }
    }
}

// ---------------------------------------------------------------------------
// Protocol errors
// ---------------------------------------------------------------------------

/// A `(kind, payload)` word pair that does not form a valid sample.
///
/// Seeing one of these means the two loops disagree about the protocol or
/// the pair boundary was lost; the reader has no way to resynchronise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// The kind word is not one this firmware produces.
    UnknownKind(u32),
    /// The payload violates the encoding convention of its kind.
    BadPayload { kind: u32, payload: u32 },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind(kind) => write!(f, "unknown kind word {kind:#010x}"),
            Self::BadPayload { kind, payload } => {
                write!(f, "payload {payload:#010x} invalid for kind {kind:#04x}")
            }
        }
    }
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
