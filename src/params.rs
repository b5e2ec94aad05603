//! Strongly typed parameter enumerations for the AS3935 driver.
//!
//! Each enum carries its datasheet wire encoding through an explicit byte-code
//! mapping, so invalid codes are unrepresentable at the API boundary. Ranged
//! fields that are plain integers on the wire (watchdog threshold, spike
//! rejection) are validated against the `*_MAX` limits below instead.

/// Highest accepted watchdog threshold (`WDTH` field of register 0x01).
pub const WATCHDOG_THRESHOLD_MAX: u8 = 10;

/// Highest accepted spike rejection setting (`SREJ` field of register 0x02).
pub const SPIKE_REJECTION_MAX: u8 = 11;

/// Clock sources that can be displayed on the IRQ pin (register 0x08, bits 5-7).
///
/// The codes are mutually exclusive high bits; the whole field is written with
/// mask `0xE0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqOutputSource {
    /// No clock routed to the IRQ pin (normal interrupt operation).
    None,
    /// Timer RC oscillator (`DISP_TRCO`).
    Trco,
    /// System RC oscillator (`DISP_SRCO`).
    Srco,
    /// Antenna LC oscillator (`DISP_LCO`).
    Lco,
}

impl IrqOutputSource {
    /// Returns the byte code written to the display field.
    pub const fn code(self) -> u8 {
        match self {
            Self::None => 0x00,
            Self::Trco => 0x20,
            Self::Srco => 0x40,
            Self::Lco => 0x80,
        }
    }
}

/// Event kinds reported by the interrupt field (register 0x03, low nibble).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptSource {
    /// No event pending.
    None,
    /// Ambient noise level exceeds the configured noise floor.
    NoiseLevelTooHigh,
    /// A disturber (non-lightning) event was detected.
    DisturberDetected,
    /// A lightning strike was detected.
    Lightning,
}

impl InterruptSource {
    /// Maps the interrupt nibble to an event kind.
    ///
    /// Returns `None` for any nibble outside the four documented codes; callers
    /// surface that as a corrupted-field error.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::None),
            0x01 => Some(Self::NoiseLevelTooHigh),
            0x04 => Some(Self::DisturberDetected),
            0x08 => Some(Self::Lightning),
            _ => None,
        }
    }
}

/// Antenna tuning capacitance divisor selections (register 0x08, low nibble).
///
/// Two incompatible encodings of these codes exist across driver revisions: a
/// nibble-only byte and a duplicated-nibble 16-bit value. This crate keeps the
/// duplicated-nibble constants as the identity codes and writes the nibble-only
/// low byte on the wire. Under that encoding `Div64` and `Div128` share wire
/// bytes with `Div16` and `Div32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TuningCapacitance {
    /// Division ratio 16.
    Div16,
    /// Division ratio 32.
    Div32,
    /// Division ratio 64.
    Div64,
    /// Division ratio 128.
    Div128,
}

impl TuningCapacitance {
    /// Returns the duplicated-nibble identity code.
    pub const fn code(self) -> u16 {
        match self {
            Self::Div16 => 0x0000,
            Self::Div32 => 0x000F,
            Self::Div64 => 0x0F00,
            Self::Div128 => 0x0F0F,
        }
    }

    /// Returns the byte written to the `TUN_CAP` field (nibble-only encoding).
    pub const fn wire_byte(self) -> u8 {
        (self.code() & 0x0F) as u8
    }
}

/// Analog front-end gain profiles (register 0x00, bits 1-5).
///
/// The codes are the pre-shifted field values written with mask `0x3E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogFrontEnd {
    /// Gain profile for indoor electrical noise conditions.
    Indoor,
    /// Gain profile for outdoor electrical noise conditions.
    Outdoor,
}

impl AnalogFrontEnd {
    /// Returns the byte code written to the `AFE_GB` field.
    pub const fn code(self) -> u8 {
        match self {
            Self::Indoor => 0x24,
            Self::Outdoor => 0x1C,
        }
    }
}

/// Noise floor level selections (register 0x01, bits 4-6).
///
/// The stored code is identical for both front-end profiles; only the
/// continuous-noise threshold it maps to differs, so callers must track which
/// profile is active to interpret a level physically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoiseFloorLevel {
    /// Level 0 (lowest threshold).
    Level0,
    /// Level 1.
    Level1,
    /// Level 2 (datasheet default).
    Level2,
    /// Level 3.
    Level3,
    /// Level 4.
    Level4,
    /// Level 5.
    Level5,
    /// Level 6.
    Level6,
    /// Level 7 (highest threshold).
    Level7,
}

impl NoiseFloorLevel {
    /// Returns the pre-shifted byte code written to the `NF_LEV` field.
    pub const fn code(self) -> u8 {
        (self.index() as u8) << 4
    }

    /// Returns the level as a plain 0-7 index.
    pub const fn index(self) -> u8 {
        match self {
            Self::Level0 => 0,
            Self::Level1 => 1,
            Self::Level2 => 2,
            Self::Level3 => 3,
            Self::Level4 => 4,
            Self::Level5 => 5,
            Self::Level6 => 6,
            Self::Level7 => 7,
        }
    }

    /// Maps a pre-shifted field code (`0x00`, `0x10`, .., `0x70`) to a level.
    ///
    /// Returns `None` for bytes that are not a multiple of `0x10` within the
    /// field or that set bits outside it.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::Level0),
            0x10 => Some(Self::Level1),
            0x20 => Some(Self::Level2),
            0x30 => Some(Self::Level3),
            0x40 => Some(Self::Level4),
            0x50 => Some(Self::Level5),
            0x60 => Some(Self::Level6),
            0x70 => Some(Self::Level7),
            _ => None,
        }
    }

    /// Continuous input noise threshold in µVrms for the indoor profile.
    pub const fn uv_rms_indoor(self) -> u16 {
        match self {
            Self::Level0 => 28,
            Self::Level1 => 45,
            Self::Level2 => 62,
            Self::Level3 => 78,
            Self::Level4 => 95,
            Self::Level5 => 112,
            Self::Level6 => 130,
            Self::Level7 => 146,
        }
    }

    /// Continuous input noise threshold in µVrms for the outdoor profile.
    pub const fn uv_rms_outdoor(self) -> u16 {
        match self {
            Self::Level0 => 390,
            Self::Level1 => 630,
            Self::Level2 => 860,
            Self::Level3 => 1100,
            Self::Level4 => 1140,
            Self::Level5 => 1570,
            Self::Level6 => 1800,
            Self::Level7 => 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_nibbles_map_to_documented_events() {
        assert_eq!(InterruptSource::from_code(0x00), Some(InterruptSource::None));
        assert_eq!(
            InterruptSource::from_code(0x01),
            Some(InterruptSource::NoiseLevelTooHigh)
        );
        assert_eq!(
            InterruptSource::from_code(0x04),
            Some(InterruptSource::DisturberDetected)
        );
        assert_eq!(
            InterruptSource::from_code(0x08),
            Some(InterruptSource::Lightning)
        );

        for nibble in 0x00..=0x0Fu8 {
            let defined = matches!(nibble, 0x00 | 0x01 | 0x04 | 0x08);
            assert_eq!(InterruptSource::from_code(nibble).is_some(), defined);
        }
    }

    #[test]
    fn noise_floor_codes_round_trip() {
        for index in 0..8u8 {
            let code = index << 4;
            let level = NoiseFloorLevel::from_code(code).unwrap();
            assert_eq!(level.code(), code);
            assert_eq!(level.index(), index);
        }
    }

    #[test]
    fn noise_floor_rejects_codes_off_the_grid() {
        assert!(NoiseFloorLevel::from_code(0x05).is_none());
        assert!(NoiseFloorLevel::from_code(0x15).is_none());
        assert!(NoiseFloorLevel::from_code(0x80).is_none());
    }

    #[test]
    fn noise_floor_thresholds_rise_monotonically() {
        let levels = [
            NoiseFloorLevel::Level0,
            NoiseFloorLevel::Level1,
            NoiseFloorLevel::Level2,
            NoiseFloorLevel::Level3,
            NoiseFloorLevel::Level4,
            NoiseFloorLevel::Level5,
            NoiseFloorLevel::Level6,
            NoiseFloorLevel::Level7,
        ];
        for pair in levels.windows(2) {
            assert!(pair[0].uv_rms_indoor() < pair[1].uv_rms_indoor());
        }
        assert_eq!(NoiseFloorLevel::Level0.uv_rms_outdoor(), 390);
        assert_eq!(NoiseFloorLevel::Level7.uv_rms_outdoor(), 2000);
    }

    #[test]
    fn tuning_capacitance_wire_bytes_follow_nibble_encoding() {
        assert_eq!(TuningCapacitance::Div16.wire_byte(), 0x00);
        assert_eq!(TuningCapacitance::Div32.wire_byte(), 0x0F);
        // Aliased with Div16/Div32 under the nibble-only encoding.
        assert_eq!(TuningCapacitance::Div64.wire_byte(), 0x00);
        assert_eq!(TuningCapacitance::Div128.wire_byte(), 0x0F);
    }

    #[test]
    fn irq_output_codes_occupy_distinct_high_bits() {
        let codes = [
            IrqOutputSource::None.code(),
            IrqOutputSource::Trco.code(),
            IrqOutputSource::Srco.code(),
            IrqOutputSource::Lco.code(),
        ];
        assert_eq!(codes, [0x00, 0x20, 0x40, 0x80]);
        for code in codes {
            assert_eq!(code & !0xE0, 0x00);
        }
    }
}
