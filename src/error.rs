//! Error types for the ISL29125 driver.

use core::fmt;

/// Errors returned by [`Isl29125`](crate::Isl29125) operations.
///
/// Generic over the bus error `E` so no information from the HAL is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Isl29125Error<E> {
    /// The bus transaction did not complete (no acknowledgement, arbitration
    /// loss, transport timeout).
    I2c(E),

    /// The register name is not in the register map, or the register is
    /// read-only and a write was requested.
    InvalidRegister,

    /// The value does not fit the register's bit-width or the field's range.
    OutOfRange,

    /// The device ID register did not read back as 0x7D.
    UnexpectedDeviceId(u8),
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for Isl29125Error<E> {
    fn from(error: E) -> Self {
        Isl29125Error::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Isl29125Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Isl29125Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Isl29125Error::InvalidRegister => write!(f, "Unknown or read-only register"),
            Isl29125Error::OutOfRange => write!(f, "Value exceeds register width"),
            Isl29125Error::UnexpectedDeviceId(id) => {
                write!(f, "Unexpected device ID {:#04x} (expected 0x7d)", id)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Isl29125Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Isl29125Error::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            Isl29125Error::InvalidRegister => defmt::write!(f, "Invalid register"),
            Isl29125Error::OutOfRange => defmt::write!(f, "Value out of range"),
            Isl29125Error::UnexpectedDeviceId(id) => {
                defmt::write!(f, "Unexpected device ID {=u8:#04x}", id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        let err: Isl29125Error<()> = Isl29125Error::UnexpectedDeviceId(0x42);
        assert_eq!(
            format!("{}", err),
            "Unexpected device ID 0x42 (expected 0x7d)"
        );
        let err: Isl29125Error<&str> = "nack".into();
        assert_eq!(format!("{}", err), "I2C error: \"nack\"");
    }
}
