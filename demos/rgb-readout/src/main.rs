//! RGB readout example
//!
//! Demonstrates the isl29125 crate on the Raspberry Pi Pico 2. Configures
//! the sensor for the 375 lux range, takes one 12-bit sample, sets a
//! red-channel threshold window, then logs raw counts and lux estimates twice a second via defmt.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                        |
//! |-----------|------------|------------------------------|
//! | I2C0 SDA  | GP20       |                              |
//! | I2C0 SCL  | GP21       |                              |
//! | ISL INT   | GP19       | Active-low, pull-up enabled  |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use isl29125::{
    AdcResolution, Channel, InterruptChannel, InterruptConfig, Isl29125Async, Persistence, SensingRange,
    DEFAULT_ADDRESS,
};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Threshold window on the red channel, in raw counts.
const LOW_THRESHOLD: u16 = 0x0200;
const HIGH_THRESHOLD: u16 = 0xC000;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    let int_pin = Input::new(p.PIN_19, Pull::Up);

    let mut sensor = Isl29125Async::new(i2c, DEFAULT_ADDRESS);

    if let Err(e) = sensor.init().await {
        error!("ISL29125 init failed: {}", e);
        return;
    }

    match sensor.sensing_range().await {
        Ok(range) => info!("Current sensing range: {}", range),
        Err(e) => error!("Failed to read sensing range: {}", e),
    }

    if let Err(e) = sensor.set_sensing_range(SensingRange::Lux375).await {
        error!("Failed to set sensing range: {}", e);
    }

    // One 12-bit sample for comparison, then back to 16-bit for the loop.
    match sensor.adc_resolution().await {
        Ok(resolution) => info!("Current ADC resolution: {}", resolution),
        Err(e) => error!("Failed to read ADC resolution: {}", e),
    }
    if let Err(e) = sensor.set_adc_resolution(AdcResolution::Bits12).await {
        error!("Failed to set ADC resolution: {}", e);
    }
    Timer::after(Duration::from_millis(200)).await;
    match sensor.read_colors().await {
        Ok((red, green, blue)) => info!("12-bit counts: R={} G={} B={}", red, green, blue),
        Err(e) => error!("Failed to read colours: {}", e),
    }
    if let Err(e) = sensor.set_adc_resolution(AdcResolution::Bits16).await {
        error!("Failed to set ADC resolution: {}", e);
    }

    let interrupts = InterruptConfig {
        channel: InterruptChannel::Red,
        persistence: Persistence::Four,
        conversion_done: false,
    };
    let configured = async {
        sensor.set_low_threshold(LOW_THRESHOLD).await?;
        sensor.set_high_threshold(HIGH_THRESHOLD).await?;
        sensor.set_interrupt_config(interrupts).await?;
        sensor.clear_interrupt_flag().await
    }
    .await;
    if let Err(e) = configured {
        error!("Failed to configure thresholds: {}", e);
    }

    info!("RGB readout started");

    loop {
        match sensor.read_colors().await {
            Ok((red, green, blue)) => {
                info!("Counts: R={} G={} B={}", red, green, blue);
            }
            Err(e) => error!("Read failed: {}", e),
        }

        if let Ok(lux) = sensor.read_lux(Channel::Green).await {
            info!("Green: {} lux", lux);
        }

        if int_pin.is_low() {
            match sensor.clear_interrupt_flag().await {
                Ok(status) => info!("Red left the threshold window: {}", status),
                Err(e) => error!("Failed to clear interrupt flag: {}", e),
            }
        }

        Timer::after(Duration::from_millis(500)).await;
    }
}
