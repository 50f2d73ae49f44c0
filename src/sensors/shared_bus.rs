//! One I2C controller, several device drivers.
//!
//! Each driver takes its bus by value; [`SharedBus`] is a cloneable handle
//! that serialises transactions through a mutex so the AHT20 and the BMP280
//! can sit on the same pins.

use std::sync::{Arc, Mutex, PoisonError};

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};

pub struct SharedBus<I2C> {
    bus: Arc<Mutex<I2C>>,
}

impl<I2C> Clone for SharedBus<I2C> {
    fn clone(&self) -> Self {
        Self {
            bus: Arc::clone(&self.bus),
        }
    }
}

impl<I2C> SharedBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            bus: Arc::new(Mutex::new(i2c)),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut I2C) -> R) -> R {
        // A panic mid-transaction leaves nothing half-written on our side;
        // the bus itself is still usable.
        let mut guard = self.bus.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl<I2C: ErrorType> ErrorType for SharedBus<I2C> {
    type Error = I2C::Error;
}

impl<I2C: I2c> I2c for SharedBus<I2C> {
    fn read(&mut self, address: SevenBitAddress, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.with(|i2c| i2c.read(address, buffer))
    }

    fn write(&mut self, address: SevenBitAddress, bytes: &[u8]) -> Result<(), Self::Error> {
        self.with(|i2c| i2c.write(address, bytes))
    }

    fn write_read(
        &mut self,
        address: SevenBitAddress,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.with(|i2c| i2c.write_read(address, bytes, buffer))
    }

    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.with(|i2c| i2c.transaction(address, operations))
    }
}
