//! High-level interface for the ISL29125 RGB light sensor.
//!
//! [`Isl29125`] wraps the low-level register driver with name lookup,
//! width validation and typed accessors for the configuration, threshold
//! and status registers.

use embedded_hal::i2c::I2c;

use crate::config::{
    AdcResolution, Config1, InterruptConfig, IrCompensation, OperationMode, SensingRange, Status,
};
use crate::driver::RegisterDriver;
use crate::error::Isl29125Error;
use crate::registers::{
    self, Channel, RegisterDescriptor, CONFIG1, CONFIG2, CONFIG3, DEFAULT_CONFIG1, DEVICE_ID,
    HIGH_THRESHOLD, ISL29125_DEVICE_ID, LOW_THRESHOLD, RESET_COMMAND, STATUS,
};

/// Resolve a register name for reading.
pub(crate) fn readable<E>(name: &str) -> Result<&'static RegisterDescriptor, Isl29125Error<E>> {
    registers::lookup(name).ok_or(Isl29125Error::InvalidRegister)
}

/// Resolve a register name for writing and check `value` against its width.
pub(crate) fn writable<E>(
    name: &str,
    value: u16,
) -> Result<&'static RegisterDescriptor, Isl29125Error<E>> {
    let register = registers::lookup(name)
        .filter(|reg| reg.is_writable())
        .ok_or(Isl29125Error::<E>::InvalidRegister)?;
    if value > register.max_value() {
        return Err(Isl29125Error::OutOfRange);
    }
    Ok(register)
}

/// Driver handle for one ISL29125.
///
/// Owns the I2C bus for its whole lifetime. Every operation is a blocking
/// call made of single-register transactions; nothing is cached between
/// calls, so the chip is always the source of truth.
///
/// # Example
///
/// ```no_run
/// use isl29125::{Isl29125, OperationMode, SensingRange, DEFAULT_ADDRESS};
///
/// # fn example(i2c: impl embedded_hal::i2c::I2c) {
/// let mut sensor = Isl29125::new(i2c, DEFAULT_ADDRESS);
/// sensor.init().unwrap();
///
/// sensor.set_sensing_range(SensingRange::Lux375).unwrap();
/// sensor.set_operation_mode(OperationMode::RedGreenBlue).unwrap();
///
/// let (red, green, blue) = sensor.read_colors().unwrap();
/// # let _ = (red, green, blue);
/// # }
/// ```
pub struct Isl29125<I2C> {
    driver: RegisterDriver<I2C>,
}

impl<I2C> Isl29125<I2C>
where
    I2C: I2c,
{
    /// Create a new sensor handle.
    ///
    /// No I2C traffic is generated. Call [`init()`](Self::init) to verify
    /// the device and apply the default configuration.
    ///
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access)
    /// * `address`: 7-bit I2C device address (always 0x44 on this chip)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            driver: RegisterDriver::new(i2c, address),
        }
    }

    /// Destroy the handle and return the bus.
    pub fn release(self) -> I2C {
        self.driver.release()
    }

    /// Verify the device ID and write the default configuration.
    ///
    /// The default `config1` is RGB mode, 10 000 lux range, 16-bit
    /// resolution (0x0D).
    ///
    /// # Errors
    /// * [`Isl29125Error::UnexpectedDeviceId`] if the ID register is not 0x7D
    /// * [`Isl29125Error::I2c`] on communication failure
    pub fn init(&mut self) -> Result<(), Isl29125Error<I2C::Error>> {
        let id = self.device_id()?;
        if id != ISL29125_DEVICE_ID {
            return Err(Isl29125Error::UnexpectedDeviceId(id));
        }
        self.driver
            .write_register(&CONFIG1, u16::from(DEFAULT_CONFIG1))
    }

    /// Reset every register to its power-on default (powerdown mode).
    pub fn reset(&mut self) -> Result<(), Isl29125Error<I2C::Error>> {
        self.driver.write_command(DEVICE_ID.address, RESET_COMMAND)
    }

    /// Read the device ID register (0x7D on an ISL29125).
    pub fn device_id(&mut self) -> Result<u8, Isl29125Error<I2C::Error>> {
        self.read_u8(&DEVICE_ID)
    }

    // -----------------------------------------------------------------------
    // Named register access
    // -----------------------------------------------------------------------

    /// Read any register in [`REGISTER_MAP`](crate::REGISTER_MAP) by name.
    ///
    /// Issues exactly one transaction of the register's width at its
    /// address and returns the little-endian decoded value.
    ///
    /// # Errors
    /// * [`Isl29125Error::InvalidRegister`] if `name` is not mapped; no bus
    ///   traffic is generated
    /// * [`Isl29125Error::I2c`] on communication failure
    ///
    /// # Example
    /// ```no_run
    /// # fn example(mut sensor: isl29125::Isl29125<impl embedded_hal::i2c::I2c>) {
    /// let red = sensor.read_channel("red").unwrap();
    /// # let _ = red;
    /// # }
    /// ```
    pub fn read_channel(&mut self, name: &str) -> Result<u16, Isl29125Error<I2C::Error>> {
        let register = readable::<I2C::Error>(name)?;
        self.driver.read_register(register)
    }

    /// Write a writable register by name.
    ///
    /// Issues exactly one write transaction. Both checks run before any
    /// bus traffic.
    ///
    /// # Errors
    /// * [`Isl29125Error::InvalidRegister`] if `name` is not mapped or is
    ///   read-only
    /// * [`Isl29125Error::OutOfRange`] if `value` does not fit the register
    /// * [`Isl29125Error::I2c`] on communication failure
    pub fn write_config(&mut self, name: &str, value: u16) -> Result<(), Isl29125Error<I2C::Error>> {
        let register = writable::<I2C::Error>(name, value)?;
        self.driver.write_register(register, value)
    }

    // -----------------------------------------------------------------------
    // Colour data
    // -----------------------------------------------------------------------

    /// Read the raw count of one colour channel.
    pub fn read(&mut self, channel: Channel) -> Result<u16, Isl29125Error<I2C::Error>> {
        self.driver.read_register(channel.register())
    }

    /// Shorthand for `read(Channel::Red)`.
    pub fn read_red(&mut self) -> Result<u16, Isl29125Error<I2C::Error>> {
        self.read(Channel::Red)
    }

    /// Shorthand for `read(Channel::Green)`.
    pub fn read_green(&mut self) -> Result<u16, Isl29125Error<I2C::Error>> {
        self.read(Channel::Green)
    }

    /// Shorthand for `read(Channel::Blue)`.
    pub fn read_blue(&mut self) -> Result<u16, Isl29125Error<I2C::Error>> {
        self.read(Channel::Blue)
    }

    /// Read all three channels as `(red, green, blue)`.
    ///
    /// Three transactions; the first error aborts the sequence.
    pub fn read_colors(&mut self) -> Result<(u16, u16, u16), Isl29125Error<I2C::Error>> {
        let red = self.read_red()?;
        let green = self.read_green()?;
        let blue = self.read_blue()?;
        Ok((red, green, blue))
    }

    /// Read one channel and convert it to lux using the current range and
    /// resolution.
    ///
    /// Reads `config1` first, so this costs two transactions.
    pub fn read_lux(&mut self, channel: Channel) -> Result<f32, Isl29125Error<I2C::Error>> {
        let config = self.config1()?;
        let counts = self.read(channel)?;
        Ok(config.counts_to_lux(counts))
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Read and decode `config1`.
    pub fn config1(&mut self) -> Result<Config1, Isl29125Error<I2C::Error>> {
        Ok(Config1::from_bits(self.read_u8(&CONFIG1)?))
    }

    /// Write all `config1` fields in one transaction.
    pub fn set_config1(&mut self, config: Config1) -> Result<(), Isl29125Error<I2C::Error>> {
        self.driver
            .write_register(&CONFIG1, u16::from(config.to_bits()))
    }

    /// Current operating mode, from `config1`.
    pub fn operation_mode(&mut self) -> Result<OperationMode, Isl29125Error<I2C::Error>> {
        Ok(self.config1()?.mode)
    }

    /// Change the operating mode, keeping the other `config1` fields.
    ///
    /// Read-modify-write: two transactions.
    pub fn set_operation_mode(
        &mut self,
        mode: OperationMode,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        let mut config = self.config1()?;
        config.mode = mode;
        self.set_config1(config)
    }

    /// Current full-scale range.
    pub fn sensing_range(&mut self) -> Result<SensingRange, Isl29125Error<I2C::Error>> {
        Ok(self.config1()?.range)
    }

    /// Change the full-scale range, keeping the other `config1` fields.
    pub fn set_sensing_range(
        &mut self,
        range: SensingRange,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        let mut config = self.config1()?;
        config.range = range;
        self.set_config1(config)
    }

    /// Current ADC resolution.
    pub fn adc_resolution(&mut self) -> Result<AdcResolution, Isl29125Error<I2C::Error>> {
        Ok(self.config1()?.resolution)
    }

    /// Change the ADC resolution, keeping the other `config1` fields.
    pub fn set_adc_resolution(
        &mut self,
        resolution: AdcResolution,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        let mut config = self.config1()?;
        config.resolution = resolution;
        self.set_config1(config)
    }

    /// Read and decode the IR compensation register (`config2`).
    pub fn ir_compensation(&mut self) -> Result<IrCompensation, Isl29125Error<I2C::Error>> {
        Ok(IrCompensation::from_bits(self.read_u8(&CONFIG2)?))
    }

    /// Write the IR compensation register.
    ///
    /// # Errors
    /// * [`Isl29125Error::OutOfRange`] if `adjust` exceeds
    ///   [`IrCompensation::MAX_ADJUST`]; no bus traffic is generated
    pub fn set_ir_compensation(
        &mut self,
        compensation: IrCompensation,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        let bits = compensation
            .to_bits()
            .ok_or(Isl29125Error::<I2C::Error>::OutOfRange)?;
        self.driver.write_register(&CONFIG2, u16::from(bits))
    }

    /// Read and decode the interrupt configuration (`config3`).
    pub fn interrupt_config(&mut self) -> Result<InterruptConfig, Isl29125Error<I2C::Error>> {
        Ok(InterruptConfig::from_bits(self.read_u8(&CONFIG3)?))
    }

    /// Write `config3` in one transaction.
    pub fn set_interrupt_config(
        &mut self,
        config: InterruptConfig,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        self.driver
            .write_register(&CONFIG3, u16::from(config.to_bits()))
    }

    // -----------------------------------------------------------------------
    // Interrupt thresholds and status
    // -----------------------------------------------------------------------

    /// Lower interrupt threshold, in counts.
    pub fn low_threshold(&mut self) -> Result<u16, Isl29125Error<I2C::Error>> {
        self.driver.read_register(&LOW_THRESHOLD)
    }

    /// Set the lower interrupt threshold. An interrupt fires when the
    /// selected channel drops below it.
    pub fn set_low_threshold(&mut self, counts: u16) -> Result<(), Isl29125Error<I2C::Error>> {
        self.driver.write_register(&LOW_THRESHOLD, counts)
    }

    /// Upper interrupt threshold, in counts.
    pub fn high_threshold(&mut self) -> Result<u16, Isl29125Error<I2C::Error>> {
        self.driver.read_register(&HIGH_THRESHOLD)
    }

    /// Set the upper interrupt threshold.
    pub fn set_high_threshold(&mut self, counts: u16) -> Result<(), Isl29125Error<I2C::Error>> {
        self.driver.write_register(&HIGH_THRESHOLD, counts)
    }

    /// Read and decode the status register.
    ///
    /// The chip clears the threshold flag as a side effect.
    pub fn status(&mut self) -> Result<Status, Isl29125Error<I2C::Error>> {
        Ok(Status::from_bits(self.read_u8(&STATUS)?))
    }

    /// Clear the threshold interrupt flag and release the INT pin.
    ///
    /// The flag is cleared by reading `status`; the decoded value from
    /// before the clear is returned.
    pub fn clear_interrupt_flag(&mut self) -> Result<Status, Isl29125Error<I2C::Error>> {
        self.status()
    }

    fn read_u8(
        &mut self,
        register: &RegisterDescriptor,
    ) -> Result<u8, Isl29125Error<I2C::Error>> {
        // 8-bit registers decode with a zero high byte.
        Ok(self.driver.read_register(register)? as u8)
    }
}
