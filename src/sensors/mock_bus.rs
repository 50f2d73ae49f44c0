//! Register-file I2C double for driver unit tests.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

/// Devices addressed by register pointer read from `regs`; devices that
/// answer every read with one frame (AHT20) use `frame`.
pub struct RegisterBus {
    pub regs: [u8; 256],
    pub frame: Option<Vec<u8>>,
    pub writes: Vec<(u8, Vec<u8>)>,
    pub fail: bool,
    pointer: u8,
}

impl RegisterBus {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            frame: None,
            writes: Vec::new(),
            fail: false,
            pointer: 0,
        }
    }

    pub fn with_frame(frame: &[u8]) -> Self {
        Self {
            frame: Some(frame.to_vec()),
            ..Self::new()
        }
    }
}

impl ErrorType for RegisterBus {
    type Error = ErrorKind;
}

impl I2c for RegisterBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.writes.push((address, bytes.to_vec()));
                    if self.frame.is_none() {
                        if let Some((&reg, data)) = bytes.split_first() {
                            self.pointer = reg;
                            for (i, b) in data.iter().enumerate() {
                                self.regs[usize::from(reg) + i] = *b;
                            }
                        }
                    }
                }
                Operation::Read(buf) => match &self.frame {
                    Some(frame) => {
                        for (dst, src) in buf.iter_mut().zip(frame) {
                            *dst = *src;
                        }
                    }
                    None => {
                        for (i, dst) in buf.iter_mut().enumerate() {
                            *dst = self.regs[usize::from(self.pointer) + i];
                        }
                    }
                },
            }
        }
        Ok(())
    }
}

pub struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
