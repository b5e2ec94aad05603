//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::As3935Interface;
use crate::log::trace_access;

/// Default 7-bit I2C address of the AS3935.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x03;

/// I2C-based interface implementation for the AS3935 driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface from the provided I2C bus and 7-bit address.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Returns the configured 7-bit device address.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> As3935Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        trace_access!("write reg={=u8:x} value={=u8:b}", register, value);
        self.i2c.write(self.address, &[register, value])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        self.i2c.write_read(self.address, &[register], buf)?;
        trace_access!("read reg={=u8:x} len={=usize}", register, buf.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::vec;

    use embedded_hal_mock::eh1::i2c::{Mock, Transaction};

    use super::{DEFAULT_I2C_ADDRESS, I2cInterface};
    use crate::interface::As3935Interface;

    #[test]
    fn read_register_issues_write_read() {
        let expectations = [Transaction::write_read(
            DEFAULT_I2C_ADDRESS,
            vec![0x03],
            vec![0x28],
        )];
        let mut i2c = Mock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone(), DEFAULT_I2C_ADDRESS);

        let value = interface.read_register(0x03).unwrap();
        assert_eq!(value, 0x28);
        i2c.done();
    }

    #[test]
    fn write_register_sends_register_and_value() {
        let expectations = [Transaction::write(DEFAULT_I2C_ADDRESS, vec![0x08, 0x40])];
        let mut i2c = Mock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone(), DEFAULT_I2C_ADDRESS);

        interface.write_register(0x08, 0x40).unwrap();
        i2c.done();
    }

    #[test]
    fn read_many_fills_buffer_in_one_transaction() {
        let expectations = [Transaction::write_read(
            DEFAULT_I2C_ADDRESS,
            vec![0x04],
            vec![0x12, 0x34, 0x01],
        )];
        let mut i2c = Mock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone(), DEFAULT_I2C_ADDRESS);

        let mut buffer = [0u8; 3];
        interface.read_many(0x04, &mut buffer).unwrap();
        assert_eq!(buffer, [0x12, 0x34, 0x01]);
        i2c.done();
    }

    #[test]
    fn read_many_ignores_empty_buffer() {
        let mut i2c = Mock::new(&[]);
        let mut interface = I2cInterface::new(i2c.clone(), DEFAULT_I2C_ADDRESS);

        interface.read_many(0x00, &mut []).unwrap();
        i2c.done();
    }

    #[test]
    fn masked_write_reads_then_writes_updated_byte() {
        // Current value 0b1010_1010; writing 0x1C with mask 0x3E must leave
        // bits 0, 6 and 7 untouched.
        let expectations = [
            Transaction::write_read(DEFAULT_I2C_ADDRESS, vec![0x00], vec![0b1010_1010]),
            Transaction::write(DEFAULT_I2C_ADDRESS, vec![0x00, 0b1001_1100]),
        ];
        let mut i2c = Mock::new(&expectations);
        let mut interface = I2cInterface::new(i2c.clone(), DEFAULT_I2C_ADDRESS);

        interface.write_register_masked(0x00, 0x1C, 0x3E).unwrap();
        i2c.done();
    }
}
