//! ISL29125 register map and device constants.
//!
//! Every register the driver touches is declared once here as a
//! [`RegisterDescriptor`] and collected in [`REGISTER_MAP`]. Name-based
//! access goes through [`lookup`]; typed operations reference the `const`
//! descriptors directly, so a missing register is a compile error.
//!
//! Multi-byte registers are little-endian: the LSB lives at the lower
//! address and the chip auto-increments the register pointer, so a 16-bit
//! register is read or written in a single transaction.

// ---------------------------------------------------------------------------
// Device constants
// ---------------------------------------------------------------------------

/// Default (and only) 7-bit I2C address of the ISL29125.
pub const DEFAULT_ADDRESS: u8 = 0x44;

/// Value of the device ID register on a genuine ISL29125.
pub const ISL29125_DEVICE_ID: u8 = 0x7D;

/// Writing this value to the device ID register resets all registers to
/// their power-on defaults.
pub const RESET_COMMAND: u8 = 0x46;

/// `config1` value written by [`Isl29125::init`](crate::Isl29125::init):
/// RGB mode, 10 000 lux range, 16-bit resolution.
pub const DEFAULT_CONFIG1: u8 = 0x0D;

/// Highest register address implemented by the chip (blue MSB).
pub const LAST_REGISTER: u8 = 0x0E;

// ---------------------------------------------------------------------------
// Register bit-fields
// ---------------------------------------------------------------------------

/// `config1` MODE[2:0]: RGB operating mode.
pub const CONFIG1_MODE_MASK: u8 = 0x07;
/// `config1` RNG[3]: 0 = 375 lux, 1 = 10 000 lux.
pub const CONFIG1_RANGE_BIT: u8 = 0x08;
/// `config1` BITS[4]: 0 = 16-bit, 1 = 12-bit ADC.
pub const CONFIG1_RESOLUTION_BIT: u8 = 0x10;
/// `config1` SYNC[5]: INT pin acts as a conversion start input.
pub const CONFIG1_SYNC_BIT: u8 = 0x20;

/// `config2` IR compensation adjust[5:0].
pub const CONFIG2_IR_ADJUST_MASK: u8 = 0x3F;
/// `config2` IR compensation offset[7].
pub const CONFIG2_IR_OFFSET_BIT: u8 = 0x80;

/// `config3` INTSEL[1:0]: channel compared against the thresholds.
pub const CONFIG3_INTSEL_MASK: u8 = 0x03;
/// `config3` PRST[3:2]: interrupt persistence.
pub const CONFIG3_PERSIST_MASK: u8 = 0x0C;
/// Bit position of PRST within `config3`.
pub const CONFIG3_PERSIST_SHIFT: u8 = 2;
/// `config3` CONVEN[4]: pulse INT when an RGB conversion completes.
pub const CONFIG3_CONVEN_BIT: u8 = 0x10;

/// `status` RGBTHF[0]: threshold interrupt flag, cleared by reading `status`.
pub const STATUS_THRESHOLD_FLAG: u8 = 0x01;
/// `status` CONVENF[1]: conversion complete.
pub const STATUS_CONVERSION_DONE: u8 = 0x02;
/// `status` BOUTF[2]: brownout detected.
pub const STATUS_BROWNOUT: u8 = 0x04;
/// `status` RGBCF[5:4]: channel currently being converted.
pub const STATUS_CONVERTING_MASK: u8 = 0x30;
/// Bit position of RGBCF within `status`.
pub const STATUS_CONVERTING_SHIFT: u8 = 4;

// ---------------------------------------------------------------------------
// Register descriptors
// ---------------------------------------------------------------------------

/// Whether a register may be written through the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Rejected by `write_config` with `InvalidRegister`.
    ReadOnly,
    /// Readable and writable by name.
    ReadWrite,
}

/// One entry of the register map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterDescriptor {
    /// Name used by [`Isl29125::read_channel`](crate::Isl29125::read_channel)
    /// and [`Isl29125::write_config`](crate::Isl29125::write_config).
    pub name: &'static str,
    /// Address of the register (of its LSB for 16-bit registers).
    pub address: u8,
    /// Width in bits, 8 or 16.
    pub width: u8,
    pub access: Access,
}

impl RegisterDescriptor {
    /// Number of bytes moved on the bus for this register.
    pub const fn byte_len(&self) -> usize {
        (self.width / 8) as usize
    }

    /// Largest value that fits the register's declared width.
    pub const fn max_value(&self) -> u16 {
        if self.width >= 16 {
            u16::MAX
        } else {
            (1u16 << self.width) - 1
        }
    }

    pub const fn is_writable(&self) -> bool {
        matches!(self.access, Access::ReadWrite)
    }

    /// Address of the last byte covered by this register.
    const fn last_address(&self) -> usize {
        self.address as usize + self.byte_len() - 1
    }
}

pub const DEVICE_ID: RegisterDescriptor = RegisterDescriptor {
    name: "device_id",
    address: 0x00,
    width: 8,
    access: Access::ReadOnly,
};

pub const CONFIG1: RegisterDescriptor = RegisterDescriptor {
    name: "config1",
    address: 0x01,
    width: 8,
    access: Access::ReadWrite,
};

pub const CONFIG2: RegisterDescriptor = RegisterDescriptor {
    name: "config2",
    address: 0x02,
    width: 8,
    access: Access::ReadWrite,
};

pub const CONFIG3: RegisterDescriptor = RegisterDescriptor {
    name: "config3",
    address: 0x03,
    width: 8,
    access: Access::ReadWrite,
};

pub const LOW_THRESHOLD: RegisterDescriptor = RegisterDescriptor {
    name: "low_threshold",
    address: 0x04,
    width: 16,
    access: Access::ReadWrite,
};

pub const HIGH_THRESHOLD: RegisterDescriptor = RegisterDescriptor {
    name: "high_threshold",
    address: 0x06,
    width: 16,
    access: Access::ReadWrite,
};

pub const STATUS: RegisterDescriptor = RegisterDescriptor {
    name: "status",
    address: 0x08,
    width: 8,
    access: Access::ReadOnly,
};

pub const GREEN: RegisterDescriptor = RegisterDescriptor {
    name: "green",
    address: 0x09,
    width: 16,
    access: Access::ReadOnly,
};

pub const RED: RegisterDescriptor = RegisterDescriptor {
    name: "red",
    address: 0x0B,
    width: 16,
    access: Access::ReadOnly,
};

pub const BLUE: RegisterDescriptor = RegisterDescriptor {
    name: "blue",
    address: 0x0D,
    width: 16,
    access: Access::ReadOnly,
};

const MAP: [RegisterDescriptor; 10] = [
    DEVICE_ID,
    CONFIG1,
    CONFIG2,
    CONFIG3,
    LOW_THRESHOLD,
    HIGH_THRESHOLD,
    STATUS,
    GREEN,
    RED,
    BLUE,
];

/// Every register reachable by name, in address order.
pub static REGISTER_MAP: [RegisterDescriptor; 10] = MAP;

const _: () = assert!(map_is_valid(&MAP), "invalid ISL29125 register map");

/// Find a register by name.
pub fn lookup(name: &str) -> Option<&'static RegisterDescriptor> {
    REGISTER_MAP.iter().find(|reg| reg.name == name)
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Names are unique, widths are 8 or 16 bits, spans stay inside the chip
/// and no two registers overlap.
const fn map_is_valid(map: &[RegisterDescriptor]) -> bool {
    let mut i = 0;
    while i < map.len() {
        let reg = &map[i];
        if reg.width != 8 && reg.width != 16 {
            return false;
        }
        if reg.last_address() > LAST_REGISTER as usize {
            return false;
        }
        let mut j = i + 1;
        while j < map.len() {
            let other = &map[j];
            if str_eq(reg.name, other.name) {
                return false;
            }
            if reg.address as usize <= other.last_address()
                && other.address as usize <= reg.last_address()
            {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

// ---------------------------------------------------------------------------
// Colour channels
// ---------------------------------------------------------------------------

/// One of the sensor's three measurement outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// The 16-bit data register holding this channel's last conversion.
    pub const fn register(self) -> &'static RegisterDescriptor {
        match self {
            Channel::Red => &RED,
            Channel::Green => &GREEN,
            Channel::Blue => &BLUE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_every_entry() {
        for reg in REGISTER_MAP.iter() {
            assert_eq!(lookup(reg.name), Some(reg));
        }
    }

    #[test]
    fn lookup_rejects_unknown_names() {
        assert!(lookup("purple").is_none());
        assert!(lookup("").is_none());
        assert!(lookup("RED").is_none());
    }

    #[test]
    fn channel_registers_match_datasheet() {
        assert_eq!(Channel::Green.register().address, 0x09);
        assert_eq!(Channel::Red.register().address, 0x0B);
        assert_eq!(Channel::Blue.register().address, 0x0D);
        assert_eq!(Channel::Red.register().width, 16);
    }

    #[test]
    fn max_value_follows_width() {
        assert_eq!(CONFIG1.max_value(), 0xFF);
        assert_eq!(HIGH_THRESHOLD.max_value(), 0xFFFF);
        assert_eq!(RED.byte_len(), 2);
        assert_eq!(STATUS.byte_len(), 1);
    }

    #[test]
    fn validation_rejects_bad_maps() {
        assert!(map_is_valid(&MAP));
        assert!(!map_is_valid(&[RED, RED]));
        // Threshold spans 0x04..=0x05, a 16-bit register at 0x05 overlaps.
        let overlapping = RegisterDescriptor {
            name: "overlap",
            address: 0x05,
            width: 16,
            access: Access::ReadOnly,
        };
        assert!(!map_is_valid(&[LOW_THRESHOLD, overlapping]));
        let past_end = RegisterDescriptor {
            name: "past_end",
            address: LAST_REGISTER,
            width: 16,
            access: Access::ReadOnly,
        };
        assert!(!map_is_valid(&[past_end]));
        let odd_width = RegisterDescriptor {
            name: "odd",
            address: 0x01,
            width: 12,
            access: Access::ReadOnly,
        };
        assert!(!map_is_valid(&[odd_width]));
    }
}
