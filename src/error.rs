//! Error handling primitives for the AS3935 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The operation requires an open connection to the sensor.
    NotConnected,
    /// `open` was called while the connection is already established.
    AlreadyConnected,
    /// The configured I2C address is outside the 7-bit range.
    InvalidAddress,
    /// A caller-supplied value is outside the field's defined set or range.
    InvalidValue,
    /// A register read decoded to a value outside the field's defined set.
    ///
    /// Distinct from [`Error::Interface`]: the bus transaction succeeded but the
    /// returned bits do not match any documented encoding, which points at a
    /// hardware fault or a register-map mismatch rather than an I/O problem.
    CorruptedField,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
