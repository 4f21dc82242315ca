//! Low-level register access for the ISL29125.
//!
//! Every method maps to exactly one I2C transaction: reads are a single
//! `write_read` of the register address followed by the register's bytes,
//! writes a single `write` of the address followed by the value. The chip
//! auto-increments its register pointer, so 16-bit registers never need a
//! second transaction.
//!
//! This module is crate-private. Consumers use [`Isl29125`](crate::Isl29125),
//! which validates names and values before anything reaches the bus.

use embedded_hal::i2c::I2c;

use crate::error::Isl29125Error;
use crate::registers::RegisterDescriptor;

/// Largest register width in bytes.
pub(crate) const MAX_REGISTER_BYTES: usize = 2;

/// Owns the I2C peripheral and the device address.
pub(crate) struct RegisterDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> RegisterDriver<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give the bus back to the caller.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read `register` and decode it as a little-endian unsigned integer.
    pub fn read_register(
        &mut self,
        register: &RegisterDescriptor,
    ) -> Result<u16, Isl29125Error<I2C::Error>> {
        let mut buf = [0u8; MAX_REGISTER_BYTES];
        self.i2c
            .write_read(self.address, &[register.address], &mut buf[..register.byte_len()])?;

        let value = decode_le(&buf);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "isl29125 read {=str} @ {=u8:#04x} -> {=u16:#06x}",
            register.name,
            register.address,
            value
        );

        Ok(value)
    }

    /// Write `value` to `register`, LSB first.
    ///
    /// The caller guarantees `value` fits the register width; only the low
    /// `register.byte_len()` bytes are sent.
    pub fn write_register(
        &mut self,
        register: &RegisterDescriptor,
        value: u16,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        let frame = encode_frame(register, value);
        self.i2c
            .write(self.address, &frame[..1 + register.byte_len()])?;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "isl29125 write {=str} @ {=u8:#04x} <- {=u16:#06x}",
            register.name,
            register.address,
            value
        );

        Ok(())
    }

    /// Write a single command byte to a raw register address.
    ///
    /// Used for the reset command, which targets the read-only ID register.
    pub fn write_command(
        &mut self,
        address: u8,
        command: u8,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        self.i2c.write(self.address, &[address, command])?;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "isl29125 command {=u8:#04x} @ {=u8:#04x}",
            command,
            address
        );

        Ok(())
    }
}

/// Async counterpart of [`RegisterDriver`] for `embedded-hal-async` buses.
///
/// Same framing, same transaction count and same traces.
#[cfg(feature = "async")]
pub(crate) struct AsyncRegisterDriver<I2C> {
    i2c: I2C,
    address: u8,
}

#[cfg(feature = "async")]
impl<I2C> AsyncRegisterDriver<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    pub async fn read_register(
        &mut self,
        register: &RegisterDescriptor,
    ) -> Result<u16, Isl29125Error<I2C::Error>> {
        let mut buf = [0u8; MAX_REGISTER_BYTES];
        self.i2c
            .write_read(self.address, &[register.address], &mut buf[..register.byte_len()])
            .await?;

        let value = decode_le(&buf);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "isl29125 read {=str} @ {=u8:#04x} -> {=u16:#06x}",
            register.name,
            register.address,
            value
        );

        Ok(value)
    }

    pub async fn write_register(
        &mut self,
        register: &RegisterDescriptor,
        value: u16,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        let frame = encode_frame(register, value);
        self.i2c
            .write(self.address, &frame[..1 + register.byte_len()])
            .await?;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "isl29125 write {=str} @ {=u8:#04x} <- {=u16:#06x}",
            register.name,
            register.address,
            value
        );

        Ok(())
    }

    pub async fn write_command(
        &mut self,
        address: u8,
        command: u8,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        self.i2c.write(self.address, &[address, command]).await?;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "isl29125 command {=u8:#04x} @ {=u8:#04x}",
            command,
            address
        );

        Ok(())
    }
}

/// Decode up to two little-endian bytes. Unused high bytes must be zero.
pub(crate) fn decode_le(buf: &[u8; MAX_REGISTER_BYTES]) -> u16 {
    u16::from_le_bytes(*buf)
}

/// `[register address, lsb, msb]`; only the first `1 + byte_len` bytes are
/// meaningful.
pub(crate) fn encode_frame(
    register: &RegisterDescriptor,
    value: u16,
) -> [u8; 1 + MAX_REGISTER_BYTES] {
    let [lsb, msb] = value.to_le_bytes();
    [register.address, lsb, msb]
}
