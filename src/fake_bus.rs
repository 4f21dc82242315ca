//! In-memory ISL29125 stand-in for unit tests.
//!
//! Models the chip as a 16-byte register file behind an auto-incrementing
//! register pointer, records every transaction, and can pretend no device
//! is connected.

use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

use crate::registers::{DEFAULT_ADDRESS, ISL29125_DEVICE_ID, RESET_COMMAND, STATUS_THRESHOLD_FLAG};

const REGISTER_FILE_LEN: usize = 16;
const STATUS_ADDRESS: usize = 0x08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FakeError {
    NoAcknowledge,
}

impl embedded_hal::i2c::Error for FakeError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    }
}

/// One recorded bus transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transaction {
    pub address: u8,
    /// Register pointer set by the first written byte, if any.
    pub register: Option<u8>,
    /// Data bytes written after the register pointer.
    pub written: usize,
    /// Bytes read back.
    pub read: usize,
}

pub(crate) struct FakeBus {
    pub registers: [u8; REGISTER_FILE_LEN],
    pub transactions: Vec<Transaction>,
    /// When false every transaction is NACKed.
    pub present: bool,
    address: u8,
    pointer: usize,
}

impl FakeBus {
    /// A freshly powered ISL29125 at the default address.
    pub fn new() -> Self {
        let mut registers = [0u8; REGISTER_FILE_LEN];
        registers[0] = ISL29125_DEVICE_ID;
        Self {
            registers,
            transactions: Vec::new(),
            present: true,
            address: DEFAULT_ADDRESS,
            pointer: 0,
        }
    }

    /// A bus with nothing attached.
    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::new()
        }
    }

    fn apply(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), FakeError> {
        let mut record = Transaction {
            address,
            register: None,
            written: 0,
            read: 0,
        };
        for op in operations.iter() {
            match op {
                Operation::Write(bytes) => {
                    if record.register.is_none() {
                        record.register = bytes.first().copied();
                        record.written += bytes.len().saturating_sub(1);
                    } else {
                        record.written += bytes.len();
                    }
                }
                Operation::Read(buf) => record.read += buf.len(),
            }
        }
        self.transactions.push(record);

        if !self.present || address != self.address {
            return Err(FakeError::NoAcknowledge);
        }

        let mut pointer_set = false;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let mut data = bytes.iter().copied();
                    if !pointer_set {
                        if let Some(reg) = data.next() {
                            self.pointer = reg as usize % REGISTER_FILE_LEN;
                            pointer_set = true;
                        }
                    }
                    for byte in data {
                        self.store(byte);
                    }
                }
                Operation::Read(buf) => {
                    for slot in buf.iter_mut() {
                        *slot = self.load();
                    }
                }
            }
        }
        Ok(())
    }

    fn store(&mut self, byte: u8) {
        if self.pointer == 0 {
            if byte == RESET_COMMAND {
                *self = Self {
                    transactions: core::mem::take(&mut self.transactions),
                    ..Self::new()
                };
            }
        } else {
            self.registers[self.pointer] = byte;
        }
        self.pointer = (self.pointer + 1) % REGISTER_FILE_LEN;
    }

    fn load(&mut self) -> u8 {
        let value = self.registers[self.pointer];
        if self.pointer == STATUS_ADDRESS {
            self.registers[STATUS_ADDRESS] &= !STATUS_THRESHOLD_FLAG;
        }
        self.pointer = (self.pointer + 1) % REGISTER_FILE_LEN;
        value
    }
}

impl ErrorType for FakeBus {
    type Error = FakeError;
}

impl embedded_hal::i2c::I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.apply(address, operations)
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::i2c::I2c for FakeBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.apply(address, operations)
    }
}
