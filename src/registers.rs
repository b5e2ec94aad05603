//! Register map definitions for the AS3935 lightning sensor.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

/// Register address of `AFE_GAIN` (power-down bit and analog front-end gain).
pub const REG_AFE_GAIN: u8 = 0x00;
/// Register address of `THRESHOLD` (watchdog threshold and noise floor level).
pub const REG_THRESHOLD: u8 = 0x01;
/// Register address of `LIGHTNING_REG` (spike rejection and strike settings).
pub const REG_LIGHTNING: u8 = 0x02;
/// Register address of `INT_MASK_ANT` (interrupt field and disturber mask).
pub const REG_INT_MASK: u8 = 0x03;
/// Register address of `ENERGY_LIG_L` (strike energy, least significant byte).
pub const REG_ENERGY_LSB: u8 = 0x04;
/// Register address of `ENERGY_LIG_M` (strike energy, middle byte).
pub const REG_ENERGY_MID: u8 = 0x05;
/// Register address of `ENERGY_LIG_MM` (strike energy, bits 16-20).
pub const REG_ENERGY_MSB: u8 = 0x06;
/// Register address of `DISTANCE` (estimated strike distance).
pub const REG_DISTANCE: u8 = 0x07;
/// Register address of `IRQ_TUN_CAP` (tuning capacitance and clock display bits).
pub const REG_IRQ_TUNING: u8 = 0x08;
/// Direct-command register triggering internal RCO calibration.
pub const REG_CALIB_RCO: u8 = 0x3C;
/// Direct-command register restoring factory defaults. Not exercised by this
/// driver; the defaults path goes through [`REG_CALIB_RCO`].
pub const REG_PRESET_DEFAULT: u8 = 0x3D;

/// Byte accepted by the direct-command registers.
pub const DIRECT_COMMAND: u8 = 0x96;

/// Number of addressable registers covered by a dump.
pub const REGISTER_COUNT: usize = 9;

/// Mask of the power-down bit in `AFE_GAIN`.
pub const MASK_POWER_DOWN: u8 = 0x01;
/// Mask of the analog front-end gain field in `AFE_GAIN`.
pub const MASK_AFE_GAIN: u8 = 0x3E;
/// Mask of the watchdog threshold field in `THRESHOLD`.
pub const MASK_WATCHDOG: u8 = 0x0F;
/// Mask of the noise floor level field in `THRESHOLD`.
pub const MASK_NOISE_FLOOR: u8 = 0x70;
/// Mask of the spike rejection field in `LIGHTNING_REG`.
pub const MASK_SPIKE_REJECTION: u8 = 0x0F;
/// Mask of the interrupt field in `INT_MASK_ANT`.
pub const MASK_INT_SOURCE: u8 = 0x0F;
/// Mask of the disturber mask bit in `INT_MASK_ANT`.
pub const MASK_DISTURBER: u8 = 0x20;
/// Mask of the distance estimation field in `DISTANCE`.
pub const MASK_DISTANCE: u8 = 0x3F;
/// Mask of the significant bits in `ENERGY_LIG_MM`.
pub const MASK_ENERGY_MSB: u8 = 0x1F;
/// Mask of the tuning capacitance field in `IRQ_TUN_CAP`.
pub const MASK_TUNING_CAP: u8 = 0x0F;
/// Mask of the clock display field in `IRQ_TUN_CAP`.
pub const MASK_IRQ_SOURCE: u8 = 0xE0;
/// Mask of the `DISP_SRCO` bit in `IRQ_TUN_CAP`, toggled during power-up.
pub const MASK_DISP_SRCO: u8 = 0x40;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Write-only register.
    WriteOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Bitfield representation of the `AFE_GAIN` register (address `0x00`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AfeGain {
    // Power-down flag (bit 0).
    pub power_down: bool,
    // Analog front-end gain boost (bits 5:1).
    pub gain: B5,
    #[skip]
    __: B2,
}

impl From<u8> for AfeGain {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<AfeGain> for u8 {
    fn from(value: AfeGain) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `THRESHOLD` register (address `0x01`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    // Watchdog threshold (bits 3:0).
    pub watchdog: B4,
    // Noise floor level (bits 6:4).
    pub noise_floor: B3,
    #[skip]
    __: B1,
}

impl From<u8> for Threshold {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Threshold> for u8 {
    fn from(value: Threshold) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `LIGHTNING_REG` register (address `0x02`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lightning {
    // Spike rejection setting (bits 3:0).
    pub spike_rejection: B4,
    // Minimum number of strikes before an interrupt (bits 5:4).
    pub min_strikes: B2,
    // Clear statistics flag (bit 6).
    pub clear_stats: bool,
    #[skip]
    __: B1,
}

impl From<u8> for Lightning {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Lightning> for u8 {
    fn from(value: Lightning) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `INT_MASK_ANT` register (address `0x03`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptMask {
    // Interrupt source field (bits 3:0).
    pub int_source: B4,
    #[skip]
    __: B1,
    // Disturber mask bit (bit 5).
    pub mask_disturber: bool,
    // Antenna LCO frequency division ratio (bits 7:6).
    pub lco_divider: B2,
}

impl From<u8> for InterruptMask {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<InterruptMask> for u8 {
    fn from(value: InterruptMask) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `ENERGY_LIG_MM` register (address `0x06`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyMsb {
    // Strike energy bits 20:16 (bits 4:0).
    pub energy: B5,
    #[skip]
    __: B3,
}

impl From<u8> for EnergyMsb {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<EnergyMsb> for u8 {
    fn from(value: EnergyMsb) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `DISTANCE` register (address `0x07`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Distance {
    // Distance estimation (bits 5:0).
    pub distance: B6,
    #[skip]
    __: B2,
}

impl From<u8> for Distance {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Distance> for u8 {
    fn from(value: Distance) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `IRQ_TUN_CAP` register (address `0x08`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrqTuning {
    // Tuning capacitance code (bits 3:0).
    pub tuning_cap: B4,
    #[skip]
    __: B1,
    // Display TRCO on the IRQ pin (bit 5).
    pub disp_trco: bool,
    // Display SRCO on the IRQ pin (bit 6).
    pub disp_srco: bool,
    // Display LCO on the IRQ pin (bit 7).
    pub disp_lco: bool,
}

impl From<u8> for IrqTuning {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<IrqTuning> for u8 {
    fn from(value: IrqTuning) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for AfeGain {
    type Raw = u8;
    const ADDRESS: u8 = REG_AFE_GAIN;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x24);
}

impl Register for Threshold {
    type Raw = u8;
    const ADDRESS: u8 = REG_THRESHOLD;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x22);
}

impl Register for Lightning {
    type Raw = u8;
    const ADDRESS: u8 = REG_LIGHTNING;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0xC2);
}

impl Register for InterruptMask {
    type Raw = u8;
    const ADDRESS: u8 = REG_INT_MASK;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for EnergyMsb {
    type Raw = u8;
    const ADDRESS: u8 = REG_ENERGY_MSB;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Distance {
    type Raw = u8;
    const ADDRESS: u8 = REG_DISTANCE;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = Some(0x3F);
}

impl Register for IrqTuning {
    type Raw = u8;
    const ADDRESS: u8 = REG_IRQ_TUNING;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates that AfeGain bitfields match the datasheet layout.
    #[test]
    fn afe_gain_layout_matches_datasheet() {
        let afe = AfeGain::from(0x24);
        assert!(!afe.power_down());
        assert_eq!(afe.gain(), 0b10010);

        let powered_down = AfeGain::from(0x25);
        assert!(powered_down.power_down());
    }

    /// Ensures Threshold encodes and decodes as expected across both fields.
    #[test]
    fn threshold_roundtrip() {
        let threshold = Threshold::new().with_watchdog(0x02).with_noise_floor(0x02);
        assert_eq!(u8::from(threshold), 0x22);

        let decoded = Threshold::from(0x75);
        assert_eq!(decoded.watchdog(), 0x05);
        assert_eq!(decoded.noise_floor(), 0x07);
    }

    #[test]
    fn interrupt_mask_layout_matches_datasheet() {
        let mask = InterruptMask::from(0b1010_0100);
        assert_eq!(mask.int_source(), 0x04);
        assert!(mask.mask_disturber());
        assert_eq!(mask.lco_divider(), 0b10);
    }

    #[test]
    fn irq_tuning_display_bits_cover_high_nibble_codes() {
        let tuning = IrqTuning::new().with_disp_srco(true).with_tuning_cap(0x0F);
        assert_eq!(u8::from(tuning), 0x4F);

        let decoded = IrqTuning::from(0xA3);
        assert!(decoded.disp_lco());
        assert!(decoded.disp_trco());
        assert!(!decoded.disp_srco());
        assert_eq!(decoded.tuning_cap(), 0x03);
    }

    #[test]
    fn distance_field_ignores_reserved_bits() {
        let distance = Distance::from(0xFF);
        assert_eq!(distance.distance(), 0x3F);
    }
}
