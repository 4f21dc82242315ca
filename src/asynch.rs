//! Async variant of the ISL29125 driver for `embedded-hal-async` buses.
//!
//! [`Isl29125Async`] mirrors [`Isl29125`](crate::Isl29125) operation for
//! operation: same name validation, same transaction count, same errors.
//! It only awaits inside the bus implementation.

use embedded_hal_async::i2c::I2c;

use crate::config::{
    AdcResolution, Config1, InterruptConfig, IrCompensation, OperationMode, SensingRange, Status,
};
use crate::driver::AsyncRegisterDriver;
use crate::error::Isl29125Error;
use crate::registers::{
    Channel, RegisterDescriptor, CONFIG1, CONFIG2, CONFIG3, DEFAULT_CONFIG1, DEVICE_ID,
    HIGH_THRESHOLD, ISL29125_DEVICE_ID, LOW_THRESHOLD, RESET_COMMAND, STATUS,
};
use crate::sensor::{readable, writable};

/// Async driver handle for one ISL29125.
///
/// # Example
///
/// ```no_run
/// use isl29125::{Isl29125Async, DEFAULT_ADDRESS};
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut sensor = Isl29125Async::new(i2c, DEFAULT_ADDRESS);
/// sensor.init().await.unwrap();
///
/// let (red, green, blue) = sensor.read_colors().await.unwrap();
/// # let _ = (red, green, blue);
/// # }
/// ```
pub struct Isl29125Async<I2C> {
    driver: AsyncRegisterDriver<I2C>,
}

impl<I2C> Isl29125Async<I2C>
where
    I2C: I2c,
{
    /// Create a new sensor handle. No I2C traffic is generated.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            driver: AsyncRegisterDriver::new(i2c, address),
        }
    }

    /// Destroy the handle and return the bus.
    pub fn release(self) -> I2C {
        self.driver.release()
    }

    // -----------------------------------------------------------------------
    // Device
    // -----------------------------------------------------------------------

    /// Verify the device ID and write the default configuration (0x0D).
    pub async fn init(&mut self) -> Result<(), Isl29125Error<I2C::Error>> {
        let id = self.device_id().await?;
        if id != ISL29125_DEVICE_ID {
            return Err(Isl29125Error::UnexpectedDeviceId(id));
        }
        self.driver
            .write_register(&CONFIG1, u16::from(DEFAULT_CONFIG1))
            .await
    }

    /// Send the software reset command. All registers return to their
    /// power-on values and the sensor powers down.
    pub async fn reset(&mut self) -> Result<(), Isl29125Error<I2C::Error>> {
        self.driver
            .write_command(DEVICE_ID.address, RESET_COMMAND)
            .await
    }

    /// Read the device ID register (0x7D on a genuine ISL29125).
    pub async fn device_id(&mut self) -> Result<u8, Isl29125Error<I2C::Error>> {
        self.read_u8(&DEVICE_ID).await
    }

    // -----------------------------------------------------------------------
    // Named register access
    // -----------------------------------------------------------------------

    /// Async counterpart of [`Isl29125::read_channel`](crate::Isl29125::read_channel).
    pub async fn read_channel(&mut self, name: &str) -> Result<u16, Isl29125Error<I2C::Error>> {
        let register = readable::<I2C::Error>(name)?;
        self.driver.read_register(register).await
    }

    /// Async counterpart of [`Isl29125::write_config`](crate::Isl29125::write_config).
    pub async fn write_config(
        &mut self,
        name: &str,
        value: u16,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        let register = writable::<I2C::Error>(name, value)?;
        self.driver.write_register(register, value).await
    }

    // -----------------------------------------------------------------------
    // Colour data
    // -----------------------------------------------------------------------

    /// Read one colour channel's raw count.
    pub async fn read(&mut self, channel: Channel) -> Result<u16, Isl29125Error<I2C::Error>> {
        self.driver.read_register(channel.register()).await
    }

    /// Read all three channels as `(red, green, blue)`.
    pub async fn read_colors(&mut self) -> Result<(u16, u16, u16), Isl29125Error<I2C::Error>> {
        let red = self.read(Channel::Red).await?;
        let green = self.read(Channel::Green).await?;
        let blue = self.read(Channel::Blue).await?;
        Ok((red, green, blue))
    }

    /// Read `config1`, then one channel, and convert the count to lux.
    pub async fn read_lux(&mut self, channel: Channel) -> Result<f32, Isl29125Error<I2C::Error>> {
        let config = self.config1().await?;
        let counts = self.read(channel).await?;
        Ok(config.counts_to_lux(counts))
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Read and decode `config1`.
    pub async fn config1(&mut self) -> Result<Config1, Isl29125Error<I2C::Error>> {
        Ok(Config1::from_bits(self.read_u8(&CONFIG1).await?))
    }

    /// Write all `config1` fields in one transaction.
    pub async fn set_config1(&mut self, config: Config1) -> Result<(), Isl29125Error<I2C::Error>> {
        self.driver
            .write_register(&CONFIG1, u16::from(config.to_bits()))
            .await
    }

    /// Current operating mode, from `config1`.
    pub async fn operation_mode(&mut self) -> Result<OperationMode, Isl29125Error<I2C::Error>> {
        Ok(self.config1().await?.mode)
    }

    /// Change the operating mode, keeping the other `config1` fields.
    pub async fn set_operation_mode(
        &mut self,
        mode: OperationMode,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        let mut config = self.config1().await?;
        config.mode = mode;
        self.set_config1(config).await
    }

    /// Current full-scale range.
    pub async fn sensing_range(&mut self) -> Result<SensingRange, Isl29125Error<I2C::Error>> {
        Ok(self.config1().await?.range)
    }

    /// Change the full-scale range, keeping the other `config1` fields.
    pub async fn set_sensing_range(
        &mut self,
        range: SensingRange,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        let mut config = self.config1().await?;
        config.range = range;
        self.set_config1(config).await
    }

    /// Current ADC resolution.
    pub async fn adc_resolution(&mut self) -> Result<AdcResolution, Isl29125Error<I2C::Error>> {
        Ok(self.config1().await?.resolution)
    }

    /// Change the ADC resolution, keeping the other `config1` fields.
    pub async fn set_adc_resolution(
        &mut self,
        resolution: AdcResolution,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        let mut config = self.config1().await?;
        config.resolution = resolution;
        self.set_config1(config).await
    }

    /// Read and decode the IR compensation register (`config2`).
    pub async fn ir_compensation(&mut self) -> Result<IrCompensation, Isl29125Error<I2C::Error>> {
        Ok(IrCompensation::from_bits(self.read_u8(&CONFIG2).await?))
    }

    /// Write the IR compensation register.
    ///
    /// # Errors
    /// * [`Isl29125Error::OutOfRange`] if `adjust` exceeds
    ///   [`IrCompensation::MAX_ADJUST`]; nothing is sent
    pub async fn set_ir_compensation(
        &mut self,
        compensation: IrCompensation,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        let bits = compensation
            .to_bits()
            .ok_or(Isl29125Error::<I2C::Error>::OutOfRange)?;
        self.driver.write_register(&CONFIG2, u16::from(bits)).await
    }

    /// Read and decode the interrupt configuration (`config3`).
    pub async fn interrupt_config(
        &mut self,
    ) -> Result<InterruptConfig, Isl29125Error<I2C::Error>> {
        Ok(InterruptConfig::from_bits(self.read_u8(&CONFIG3).await?))
    }

    /// Write the interrupt configuration.
    pub async fn set_interrupt_config(
        &mut self,
        config: InterruptConfig,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        self.driver
            .write_register(&CONFIG3, u16::from(config.to_bits()))
            .await
    }

    // -----------------------------------------------------------------------
    // Interrupt thresholds and status
    // -----------------------------------------------------------------------

    /// Lower interrupt threshold, in counts.
    pub async fn low_threshold(&mut self) -> Result<u16, Isl29125Error<I2C::Error>> {
        self.driver.read_register(&LOW_THRESHOLD).await
    }

    /// Set the lower interrupt threshold.
    pub async fn set_low_threshold(&mut self, counts: u16) -> Result<(), Isl29125Error<I2C::Error>> {
        self.driver.write_register(&LOW_THRESHOLD, counts).await
    }

    /// Upper interrupt threshold, in counts.
    pub async fn high_threshold(&mut self) -> Result<u16, Isl29125Error<I2C::Error>> {
        self.driver.read_register(&HIGH_THRESHOLD).await
    }

    /// Set the upper interrupt threshold.
    pub async fn set_high_threshold(
        &mut self,
        counts: u16,
    ) -> Result<(), Isl29125Error<I2C::Error>> {
        self.driver.write_register(&HIGH_THRESHOLD, counts).await
    }

    /// Read and decode the status register. Clears the threshold flag.
    pub async fn status(&mut self) -> Result<Status, Isl29125Error<I2C::Error>> {
        Ok(Status::from_bits(self.read_u8(&STATUS).await?))
    }

    /// Reading `status` clears the threshold flag; returns the value read.
    pub async fn clear_interrupt_flag(&mut self) -> Result<Status, Isl29125Error<I2C::Error>> {
        self.status().await
    }

    async fn read_u8(
        &mut self,
        register: &RegisterDescriptor,
    ) -> Result<u8, Isl29125Error<I2C::Error>> {
        Ok(self.driver.read_register(register).await? as u8)
    }
}
