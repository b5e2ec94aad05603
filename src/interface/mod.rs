//! Bus interface abstraction for the AS3935 driver.

pub mod i2c;

use crate::log::trace_access;

/// Computes the result of a masked register update.
///
/// Bits selected by `mask` are taken from `value`; all other bits keep their
/// current state.
pub const fn masked_update(current: u8, value: u8, mask: u8) -> u8 {
    (current & !mask) | (value & mask)
}

/// Abstraction over the low-level bus access required by the driver.
pub trait As3935Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error>;

    /// Reads multiple consecutive registers into the provided buffer.
    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Performs a read-modify-write of the bits selected by `mask`.
    ///
    /// The update is two separate bus transactions, so it is atomic only with
    /// respect to this driver instance; another bus master touching the same
    /// register between the read and the write will have its change lost.
    fn write_register_masked(
        &mut self,
        register: u8,
        value: u8,
        mask: u8,
    ) -> core::result::Result<(), Self::Error> {
        let current = self.read_register(register)?;
        let updated = masked_update(current, value, mask);
        trace_access!(
            "masked write reg={=u8:x} mask={=u8:x} before={=u8:b} after={=u8:b}",
            register,
            mask,
            current,
            updated
        );
        self.write_register(register, updated)
    }
}

#[cfg(test)]
mod tests {
    use super::masked_update;

    /// Exhausts the full (current, value, mask) byte space.
    #[test]
    fn masked_update_touches_only_masked_bits() {
        for current in 0..=255u8 {
            for value in 0..=255u8 {
                for mask in 0..=255u8 {
                    let updated = masked_update(current, value, mask);
                    assert_eq!(updated & mask, value & mask);
                    assert_eq!(updated & !mask, current & !mask);
                }
            }
        }
    }

    #[test]
    fn masked_update_full_mask_replaces_register() {
        assert_eq!(masked_update(0xAB, 0x5C, 0xFF), 0x5C);
    }

    #[test]
    fn masked_update_empty_mask_preserves_register() {
        assert_eq!(masked_update(0xAB, 0x5C, 0x00), 0xAB);
    }
}
