//! Typed values for the ISL29125 configuration and status registers.
//!
//! Each register-sized type converts to and from its raw byte with
//! `to_bits`/`from_bits`. Field enums are `#[repr(u8)]` and carry the
//! field value already shifted into place where noted.

use crate::registers::{
    Channel, CONFIG1_MODE_MASK, CONFIG1_RANGE_BIT, CONFIG1_RESOLUTION_BIT, CONFIG1_SYNC_BIT,
    CONFIG2_IR_ADJUST_MASK, CONFIG2_IR_OFFSET_BIT, CONFIG3_CONVEN_BIT, CONFIG3_INTSEL_MASK,
    CONFIG3_PERSIST_MASK, CONFIG3_PERSIST_SHIFT, STATUS_BROWNOUT, STATUS_CONVERSION_DONE,
    STATUS_CONVERTING_MASK, STATUS_CONVERTING_SHIFT, STATUS_THRESHOLD_FLAG,
};

/// RGB operating mode (MODE[2:0] in `config1`).
///
/// The device powers up in [`PowerDown`](OperationMode::PowerDown). Every
/// other mode except [`Standby`](OperationMode::Standby) converts
/// continuously.
///
/// | Variant        | Bits  | Channels converted |
/// |----------------|-------|--------------------|
/// | PowerDown      | 000   | none (ADC off)     |
/// | GreenOnly      | 001   | G                  |
/// | RedOnly        | 010   | R                  |
/// | BlueOnly       | 011   | B                  |
/// | Standby        | 100   | none (no ADC conversion) |
/// | RedGreenBlue   | 101   | G, R, B            |
/// | GreenRed       | 110   | G, R               |
/// | GreenBlue      | 111   | G, B               |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperationMode {
    PowerDown = 0b000,
    GreenOnly = 0b001,
    RedOnly = 0b010,
    BlueOnly = 0b011,
    Standby = 0b100,
    RedGreenBlue = 0b101,
    GreenRed = 0b110,
    GreenBlue = 0b111,
}

impl OperationMode {
    /// Decode the MODE field; bits outside the field are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & CONFIG1_MODE_MASK {
            0b000 => OperationMode::PowerDown,
            0b001 => OperationMode::GreenOnly,
            0b010 => OperationMode::RedOnly,
            0b011 => OperationMode::BlueOnly,
            0b100 => OperationMode::Standby,
            0b101 => OperationMode::RedGreenBlue,
            0b110 => OperationMode::GreenRed,
            _ => OperationMode::GreenBlue,
        }
    }
}

/// Full-scale optical range (RNG bit in `config1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SensingRange {
    /// 375 lux full scale, for dim environments.
    Lux375 = 0x00,
    /// 10 000 lux full scale.
    Lux10000 = CONFIG1_RANGE_BIT,
}

impl SensingRange {
    /// Illuminance corresponding to a full-scale count.
    pub const fn max_lux(self) -> f32 {
        match self {
            SensingRange::Lux375 => 375.0,
            SensingRange::Lux10000 => 10_000.0,
        }
    }
}

/// ADC resolution (BITS bit in `config1`).
///
/// 12-bit conversions are 16x faster (about 6.25 ms instead of 100 ms).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AdcResolution {
    Bits16 = 0x00,
    Bits12 = CONFIG1_RESOLUTION_BIT,
}

impl AdcResolution {
    /// Largest count the ADC produces at this resolution.
    pub const fn full_scale(self) -> u16 {
        match self {
            AdcResolution::Bits16 => 0xFFFF,
            AdcResolution::Bits12 => 0x0FFF,
        }
    }
}

/// Contents of `config1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config1 {
    pub mode: OperationMode,
    pub range: SensingRange,
    pub resolution: AdcResolution,
    /// When set, conversions start on a rising edge of the INT pin.
    pub sync_on_int: bool,
}

impl Config1 {
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            mode: OperationMode::from_bits(bits),
            range: if bits & CONFIG1_RANGE_BIT != 0 {
                SensingRange::Lux10000
            } else {
                SensingRange::Lux375
            },
            resolution: if bits & CONFIG1_RESOLUTION_BIT != 0 {
                AdcResolution::Bits12
            } else {
                AdcResolution::Bits16
            },
            sync_on_int: bits & CONFIG1_SYNC_BIT != 0,
        }
    }

    pub const fn to_bits(self) -> u8 {
        let sync = if self.sync_on_int { CONFIG1_SYNC_BIT } else { 0 };
        self.mode as u8 | self.range as u8 | self.resolution as u8 | sync
    }

    /// Convert a raw channel count taken under this configuration to lux.
    pub fn counts_to_lux(self, counts: u16) -> f32 {
        counts_to_lux(counts, self.range, self.resolution)
    }
}

/// RGB mode, 10 000 lux, 16-bit, no sync: the value `init` writes (0x0D).
impl Default for Config1 {
    fn default() -> Self {
        Self {
            mode: OperationMode::RedGreenBlue,
            range: SensingRange::Lux10000,
            resolution: AdcResolution::Bits16,
            sync_on_int: false,
        }
    }
}

/// Linear conversion from raw ADC counts to an illuminance estimate.
///
/// Counts above the resolution's full scale saturate at the range limit.
pub fn counts_to_lux(counts: u16, range: SensingRange, resolution: AdcResolution) -> f32 {
    let full_scale = resolution.full_scale();
    f32::from(counts.min(full_scale)) * range.max_lux() / f32::from(full_scale)
}

/// Infrared compensation settings (`config2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrCompensation {
    /// Adds the coarse IR compensation offset.
    pub offset: bool,
    /// Fine IR compensation adjust, 0 to [`IrCompensation::MAX_ADJUST`].
    pub adjust: u8,
}

impl IrCompensation {
    pub const MAX_ADJUST: u8 = CONFIG2_IR_ADJUST_MASK;

    pub const fn from_bits(bits: u8) -> Self {
        Self {
            offset: bits & CONFIG2_IR_OFFSET_BIT != 0,
            adjust: bits & CONFIG2_IR_ADJUST_MASK,
        }
    }

    /// Encode into `config2`, or `None` if `adjust` does not fit six bits.
    pub const fn to_bits(self) -> Option<u8> {
        if self.adjust > Self::MAX_ADJUST {
            return None;
        }
        let offset = if self.offset { CONFIG2_IR_OFFSET_BIT } else { 0 };
        Some(offset | self.adjust)
    }
}

/// Channel compared against the interrupt thresholds (INTSEL in `config3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InterruptChannel {
    #[default]
    None = 0b00,
    Green = 0b01,
    Red = 0b10,
    Blue = 0b11,
}

/// Consecutive out-of-window conversions needed to raise an interrupt
/// (PRST in `config3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Persistence {
    #[default]
    One = 0b00,
    Two = 0b01,
    Four = 0b10,
    Eight = 0b11,
}

/// Interrupt settings (`config3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptConfig {
    pub channel: InterruptChannel,
    pub persistence: Persistence,
    /// Pulse INT when an RGB conversion completes.
    pub conversion_done: bool,
}

impl InterruptConfig {
    pub const fn from_bits(bits: u8) -> Self {
        let channel = match bits & CONFIG3_INTSEL_MASK {
            0b00 => InterruptChannel::None,
            0b01 => InterruptChannel::Green,
            0b10 => InterruptChannel::Red,
            _ => InterruptChannel::Blue,
        };
        let persistence = match (bits & CONFIG3_PERSIST_MASK) >> CONFIG3_PERSIST_SHIFT {
            0b00 => Persistence::One,
            0b01 => Persistence::Two,
            0b10 => Persistence::Four,
            _ => Persistence::Eight,
        };
        Self {
            channel,
            persistence,
            conversion_done: bits & CONFIG3_CONVEN_BIT != 0,
        }
    }

    pub const fn to_bits(self) -> u8 {
        let conven = if self.conversion_done {
            CONFIG3_CONVEN_BIT
        } else {
            0
        };
        self.channel as u8 | ((self.persistence as u8) << CONFIG3_PERSIST_SHIFT) | conven
    }
}

/// Decoded `status` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// A threshold interrupt is pending (RGBTHF).
    pub threshold_interrupt: bool,
    /// An RGB conversion has completed (CONVENF).
    pub conversion_done: bool,
    /// A brownout occurred since the flag was last cleared (BOUTF).
    pub brownout: bool,
    /// Channel currently being converted, if any (RGBCF).
    pub converting: Option<Channel>,
}

impl Status {
    pub const fn from_bits(bits: u8) -> Self {
        let converting = match (bits & STATUS_CONVERTING_MASK) >> STATUS_CONVERTING_SHIFT {
            0b01 => Some(Channel::Green),
            0b10 => Some(Channel::Red),
            0b11 => Some(Channel::Blue),
            _ => None,
        };
        Self {
            threshold_interrupt: bits & STATUS_THRESHOLD_FLAG != 0,
            conversion_done: bits & STATUS_CONVERSION_DONE != 0,
            brownout: bits & STATUS_BROWNOUT != 0,
            converting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::DEFAULT_CONFIG1;

    #[test]
    fn default_config1_matches_init_value() {
        assert_eq!(Config1::default().to_bits(), DEFAULT_CONFIG1);
        assert_eq!(Config1::from_bits(DEFAULT_CONFIG1), Config1::default());
    }

    #[test]
    fn config1_decodes_every_field() {
        let cfg = Config1::from_bits(0b0011_1010);
        assert_eq!(cfg.mode, OperationMode::RedOnly);
        assert_eq!(cfg.range, SensingRange::Lux10000);
        assert_eq!(cfg.resolution, AdcResolution::Bits12);
        assert!(cfg.sync_on_int);
        assert_eq!(cfg.to_bits(), 0b0011_1010);
    }

    #[test]
    fn operation_mode_ignores_upper_bits() {
        assert_eq!(OperationMode::from_bits(0xF3), OperationMode::BlueOnly);
        assert_eq!(OperationMode::from_bits(0x04), OperationMode::Standby);
    }

    #[test]
    fn lux_full_scale_maps_to_range_limit() {
        let lux = counts_to_lux(0xFFFF, SensingRange::Lux10000, AdcResolution::Bits16);
        assert!((lux - 10_000.0).abs() < 1e-2);
        let lux = counts_to_lux(0x0FFF, SensingRange::Lux375, AdcResolution::Bits12);
        assert!((lux - 375.0).abs() < 1e-3);
        assert_eq!(counts_to_lux(0, SensingRange::Lux375, AdcResolution::Bits16), 0.0);
    }

    #[test]
    fn lux_saturates_above_twelve_bit_full_scale() {
        let lux = counts_to_lux(0x8000, SensingRange::Lux375, AdcResolution::Bits12);
        assert!((lux - 375.0).abs() < 1e-3);
    }

    #[test]
    fn ir_compensation_rejects_wide_adjust() {
        let ir = IrCompensation {
            offset: true,
            adjust: 0x3F,
        };
        assert_eq!(ir.to_bits(), Some(0xBF));
        assert_eq!(IrCompensation::from_bits(0xBF), ir);

        let too_wide = IrCompensation {
            offset: false,
            adjust: 64,
        };
        assert_eq!(too_wide.to_bits(), None);
    }

    #[test]
    fn interrupt_config_packs_fields() {
        let cfg = InterruptConfig {
            channel: InterruptChannel::Red,
            persistence: Persistence::Eight,
            conversion_done: true,
        };
        assert_eq!(cfg.to_bits(), 0b0001_1110);
        assert_eq!(InterruptConfig::from_bits(0b0001_1110), cfg);
        assert_eq!(InterruptConfig::default().to_bits(), 0);
    }

    #[test]
    fn status_decodes_flags_and_channel() {
        let status = Status::from_bits(0b0010_0111);
        assert!(status.threshold_interrupt);
        assert!(status.conversion_done);
        assert!(status.brownout);
        assert_eq!(status.converting, Some(Channel::Red));
        assert_eq!(Status::from_bits(0).converting, None);
    }
}
