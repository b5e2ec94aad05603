//! High-level AS3935 device driver implementation.

use crate::error::{Error, Result};
use crate::interface::As3935Interface;
use crate::interface::i2c::I2cInterface;
use crate::params::{
    AnalogFrontEnd,
    InterruptSource,
    IrqOutputSource,
    NoiseFloorLevel,
    SPIKE_REJECTION_MAX,
    TuningCapacitance,
    WATCHDOG_THRESHOLD_MAX,
};
use crate::registers::{
    DIRECT_COMMAND,
    Distance,
    EnergyMsb,
    InterruptMask,
    Lightning,
    MASK_AFE_GAIN,
    MASK_DISP_SRCO,
    MASK_DISTURBER,
    MASK_IRQ_SOURCE,
    MASK_NOISE_FLOOR,
    MASK_POWER_DOWN,
    MASK_SPIKE_REJECTION,
    MASK_TUNING_CAP,
    MASK_WATCHDOG,
    REG_AFE_GAIN,
    REG_CALIB_RCO,
    REG_DISTANCE,
    REG_ENERGY_LSB,
    REG_INT_MASK,
    REG_IRQ_TUNING,
    REG_LIGHTNING,
    REG_THRESHOLD,
    REGISTER_COUNT,
    Threshold,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

// Settling time before reading the interrupt field and after triggering RCO
// calibration (milliseconds). The datasheet minimum is 2 ms.
const SETTLING_DELAY_MS: u32 = 5;
// Divisor applied to the 21-bit strike energy composite. Pinned by regression
// tests; not verified against the datasheet.
const ENERGY_DIVISOR: u32 = 16777;
// Number of consecutive bytes spanning the strike energy triple.
const RAW_ENERGY_BYTES: usize = 3;

/// High-level synchronous driver for the AS3935 lightning sensor.
///
/// All operations take `&mut self`, so every typed operation is atomic with
/// respect to other users of the same instance. Nothing protects the physical
/// device from other bus masters or other driver instances.
pub struct As3935<IFACE> {
    interface: IFACE,
    connected: bool,
}

/// Decoded estimate of the distance to the head of an approaching storm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceEstimate {
    /// The storm is directly overhead (raw code `0x01`).
    StormOverhead,
    /// Estimated distance in kilometres.
    Km(u8),
    /// The storm is beyond the detection range (raw code `0x3F`).
    OutOfRange,
}

impl DistanceEstimate {
    /// Decodes the raw `DISTANCE` register byte.
    pub fn from_raw(raw: u8) -> Self {
        match Distance::from(raw).distance() {
            0x01 => Self::StormOverhead,
            0x3F => Self::OutOfRange,
            km => Self::Km(km),
        }
    }

    /// Returns the estimate in kilometres, mapping [`DistanceEstimate::OutOfRange`]
    /// to the `u32::MAX` sentinel.
    pub const fn km(self) -> u32 {
        match self {
            Self::StormOverhead => 0,
            Self::Km(km) => km as u32,
            Self::OutOfRange => u32::MAX,
        }
    }
}

impl<IFACE> As3935<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    ///
    /// The instance starts in the unopened state; call [`As3935::open`] before
    /// any typed operation.
    pub fn new(interface: IFACE) -> Self {
        Self {
            interface,
            connected: false,
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> IFACE {
        self.interface
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns whether the driver currently holds an open connection.
    pub const fn is_connected(&self) -> bool {
        self.connected
    }
}

impl<I2C> As3935<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports.
    ///
    /// Rejects addresses outside the 7-bit range.
    pub fn new_i2c(i2c: I2C, address: u8) -> Result<Self, I2C::Error> {
        if address > 0x7F {
            return Err(Error::InvalidAddress);
        }

        Ok(Self::new(I2cInterface::new(i2c, address)))
    }

    /// Releases the driver, returning the I2C bus.
    pub fn release_i2c(self) -> I2C {
        self.release().release()
    }
}

impl<IFACE, CommE> As3935<IFACE>
where
    IFACE: As3935Interface<Error = CommE>,
{
    // ==================================================================
    // == Connection Lifecycle ==========================================
    // ==================================================================
    /// Opens the logical connection to the sensor.
    ///
    /// The bus handle itself is supplied at construction; `open` marks the
    /// session as active and arms the typed operations. Fails if the
    /// connection is already established.
    pub fn open(&mut self) -> Result<(), CommE> {
        if self.connected {
            return Err(Error::AlreadyConnected);
        }

        self.connected = true;
        Ok(())
    }

    /// Closes the logical connection.
    ///
    /// The connected flag is cleared on every path, so a subsequent `open`
    /// always succeeds after `close` has been called. Fails if the connection
    /// is not established.
    pub fn close(&mut self) -> Result<(), CommE> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        self.connected = false;
        Ok(())
    }

    fn ensure_connected(&self) -> Result<(), CommE> {
        if self.connected {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    // ==================================================================
    // == Power & Calibration ===========================================
    // ==================================================================
    /// Switches the sensor between power-down and active operation.
    ///
    /// Powering down sets the `PWD` bit. Powering up clears it and runs the
    /// calibration sequence the chip requires afterwards: the `CALIB_RCO`
    /// direct command, then a transient toggle of `DISP_SRCO` that exposes the
    /// calibration clock on the IRQ pin for the settling period.
    pub fn power_switch(&mut self, on: bool, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.ensure_connected()?;

        if !on {
            return self
                .interface
                .write_register_masked(REG_AFE_GAIN, 0x01, MASK_POWER_DOWN)
                .map_err(Error::from);
        }

        self.interface
            .write_register_masked(REG_AFE_GAIN, 0x00, MASK_POWER_DOWN)
            .map_err(Error::from)?;
        self.interface
            .write_register(REG_CALIB_RCO, DIRECT_COMMAND)
            .map_err(Error::from)?;
        self.interface
            .write_register_masked(REG_IRQ_TUNING, MASK_DISP_SRCO, MASK_DISP_SRCO)
            .map_err(Error::from)?;

        delay.delay_ms(SETTLING_DELAY_MS);

        self.interface
            .write_register_masked(REG_IRQ_TUNING, 0x00, MASK_DISP_SRCO)
            .map_err(Error::from)
    }

    /// Resets all registers to their factory defaults via direct command.
    pub fn initialize_defaults(&mut self) -> Result<(), CommE> {
        self.ensure_connected()?;

        self.interface
            .write_register(REG_CALIB_RCO, DIRECT_COMMAND)
            .map_err(Error::from)
    }

    // ==================================================================
    // == Front-End & Antenna Configuration =============================
    // ==================================================================
    /// Selects the analog front-end gain profile.
    pub fn set_analog_front_end(&mut self, model: AnalogFrontEnd) -> Result<(), CommE> {
        self.ensure_connected()?;

        self.interface
            .write_register_masked(REG_AFE_GAIN, model.code(), MASK_AFE_GAIN)
            .map_err(Error::from)
    }

    /// Routes one of the internal clocks to the IRQ pin, or none for normal
    /// interrupt operation.
    pub fn set_irq_output_source(&mut self, source: IrqOutputSource) -> Result<(), CommE> {
        self.ensure_connected()?;

        self.interface
            .write_register_masked(REG_IRQ_TUNING, source.code(), MASK_IRQ_SOURCE)
            .map_err(Error::from)
    }

    /// Sets the antenna tuning capacitance divisor.
    pub fn set_tuning_capacitance(&mut self, capacitance: TuningCapacitance) -> Result<(), CommE> {
        self.ensure_connected()?;

        self.interface
            .write_register_masked(REG_IRQ_TUNING, capacitance.wire_byte(), MASK_TUNING_CAP)
            .map_err(Error::from)
    }

    // ==================================================================
    // == Event Filtering ===============================================
    // ==================================================================
    /// Sets the disturber mask bit (register `0x03`, bit 5).
    pub fn enable_disturber(&mut self) -> Result<(), CommE> {
        self.ensure_connected()?;

        self.interface
            .write_register_masked(REG_INT_MASK, MASK_DISTURBER, MASK_DISTURBER)
            .map_err(Error::from)
    }

    /// Clears the disturber mask bit (register `0x03`, bit 5).
    pub fn disable_disturber(&mut self) -> Result<(), CommE> {
        self.ensure_connected()?;

        self.interface
            .write_register_masked(REG_INT_MASK, 0x00, MASK_DISTURBER)
            .map_err(Error::from)
    }

    /// Sets the noise floor level.
    pub fn set_noise_floor_level(&mut self, level: NoiseFloorLevel) -> Result<(), CommE> {
        self.ensure_connected()?;

        self.interface
            .write_register_masked(REG_THRESHOLD, level.code(), MASK_NOISE_FLOOR)
            .map_err(Error::from)
    }

    /// Reads the active noise floor level.
    pub fn read_noise_floor_level(&mut self) -> Result<NoiseFloorLevel, CommE> {
        self.ensure_connected()?;

        let raw = self
            .interface
            .read_register(REG_THRESHOLD)
            .map_err(Error::from)?;

        NoiseFloorLevel::from_code(raw & MASK_NOISE_FLOOR).ok_or(Error::CorruptedField)
    }

    /// Sets the watchdog threshold. Accepted range is `0..=10`.
    pub fn set_watchdog_threshold(&mut self, threshold: u8) -> Result<(), CommE> {
        self.ensure_connected()?;

        if threshold > WATCHDOG_THRESHOLD_MAX {
            return Err(Error::InvalidValue);
        }

        self.interface
            .write_register_masked(REG_THRESHOLD, threshold, MASK_WATCHDOG)
            .map_err(Error::from)
    }

    /// Reads the watchdog threshold.
    pub fn read_watchdog_threshold(&mut self) -> Result<u8, CommE> {
        self.ensure_connected()?;

        let raw = self
            .interface
            .read_register(REG_THRESHOLD)
            .map_err(Error::from)?;

        let threshold = Threshold::from(raw).watchdog();
        if threshold > WATCHDOG_THRESHOLD_MAX {
            return Err(Error::CorruptedField);
        }

        Ok(threshold)
    }

    /// Sets the spike rejection setting. Accepted range is `0..=11`.
    pub fn set_spike_rejection(&mut self, rejection: u8) -> Result<(), CommE> {
        self.ensure_connected()?;

        if rejection > SPIKE_REJECTION_MAX {
            return Err(Error::InvalidValue);
        }

        self.interface
            .write_register_masked(REG_LIGHTNING, rejection, MASK_SPIKE_REJECTION)
            .map_err(Error::from)
    }

    /// Reads the spike rejection setting.
    pub fn read_spike_rejection(&mut self) -> Result<u8, CommE> {
        self.ensure_connected()?;

        let raw = self
            .interface
            .read_register(REG_LIGHTNING)
            .map_err(Error::from)?;

        let rejection = Lightning::from(raw).spike_rejection();
        if rejection > SPIKE_REJECTION_MAX {
            return Err(Error::CorruptedField);
        }

        Ok(rejection)
    }

    // ==================================================================
    // == Event Readout =================================================
    // ==================================================================
    /// Reads the pending interrupt source.
    ///
    /// Waits for the settling period first: the chip needs time to populate
    /// the interrupt field after the triggering event, and reading early
    /// returns stale data.
    pub fn read_interrupt_source(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<InterruptSource, CommE> {
        self.ensure_connected()?;

        delay.delay_ms(SETTLING_DELAY_MS);

        let raw = self
            .interface
            .read_register(REG_INT_MASK)
            .map_err(Error::from)?;

        InterruptSource::from_code(InterruptMask::from(raw).int_source())
            .ok_or(Error::CorruptedField)
    }

    /// Reads the estimated distance to the storm front.
    pub fn read_lightning_distance(&mut self) -> Result<DistanceEstimate, CommE> {
        self.ensure_connected()?;

        let raw = self
            .interface
            .read_register(REG_DISTANCE)
            .map_err(Error::from)?;

        Ok(DistanceEstimate::from_raw(raw))
    }

    /// Reads the energy of the latest strike.
    ///
    /// The value is a dimensionless figure, not a physical unit. Truncating
    /// integer division before the final scaling is intentional; the arithmetic
    /// is pinned by a regression fixture.
    pub fn read_strike_energy(&mut self) -> Result<f64, CommE> {
        self.ensure_connected()?;

        let mut raw = [0u8; RAW_ENERGY_BYTES];
        self.interface
            .read_many(REG_ENERGY_LSB, &mut raw)
            .map_err(Error::from)?;

        let mut composite = u32::from(EnergyMsb::from(raw[2]).energy()) << 16;
        composite |= u32::from(raw[1]) << 8;
        composite |= u32::from(raw[0]);

        let scaled = composite / ENERGY_DIVISOR;
        Ok(f64::from(scaled) / 1000.0)
    }

    // ==================================================================
    // == Diagnostics ===================================================
    // ==================================================================
    /// Dumps registers `0x00` through `0x08` as a snapshot.
    ///
    /// Reads sequentially; a failure on any single register aborts the whole
    /// dump without returning partial data.
    pub fn dump_registers(&mut self) -> Result<[u8; REGISTER_COUNT], CommE> {
        self.ensure_connected()?;

        let mut snapshot = [0u8; REGISTER_COUNT];
        for (offset, slot) in snapshot.iter_mut().enumerate() {
            *slot = self
                .interface
                .read_register(offset as u8)
                .map_err(Error::from)?;
        }

        Ok(snapshot)
    }
}
