/*
    ViceFront

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    common::types::drive.rs

    Drive unit identifiers and drive LED state.
*/

use std::fmt::Display;

use serde::Deserialize;
use strum_macros::EnumIter;

/// Number of drive units shown on a status bar.
pub const DRIVE_NUM: usize = 4;
/// Device number of the first drive unit.
pub const FIRST_DRIVE_DEVICE: u8 = 8;
/// PWM intensity above which a drive LED is considered lit.
pub const LED_PWM_THRESHOLD: u32 = 100;

/// A drive unit index (0-3), corresponding to device numbers 8-11.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "u8")]
pub struct DriveUnit(u8);

impl TryFrom<u8> for DriveUnit {
    type Error = String;

    fn try_from(idx: u8) -> Result<Self, Self::Error> {
        DriveUnit::new(idx as usize).ok_or_else(|| format!("Invalid drive unit index: {}", idx))
    }
}

impl DriveUnit {
    /// Create a drive unit from a zero-based index. Returns `None` for indices past [DRIVE_NUM].
    pub fn new(idx: usize) -> Option<Self> {
        (idx < DRIVE_NUM).then_some(DriveUnit(idx as u8))
    }

    /// Create a drive unit from a device number (8-11).
    pub fn from_device(device: u8) -> Option<Self> {
        device
            .checked_sub(FIRST_DRIVE_DEVICE)
            .and_then(|idx| DriveUnit::new(idx as usize))
    }

    pub fn idx(&self) -> usize {
        self.0 as usize
    }

    pub fn device(&self) -> u8 {
        self.0 + FIRST_DRIVE_DEVICE
    }

    /// The bit this unit occupies in a drive enable mask.
    pub fn mask_bit(&self) -> u8 {
        1 << self.0
    }

    pub fn all() -> impl Iterator<Item = DriveUnit> {
        (0..DRIVE_NUM as u8).map(DriveUnit)
    }
}

impl Display for DriveUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:2}:", self.device())
    }
}

/// Whether a drive's status area should be drawn or erased.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriveDisplayState {
    Active(DriveUnit),
    Inactive(DriveUnit),
}

impl DriveDisplayState {
    pub fn unit(&self) -> DriveUnit {
        match self {
            DriveDisplayState::Active(unit) | DriveDisplayState::Inactive(unit) => *unit,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DriveDisplayState::Active(_))
    }
}

/// The state of a drive LED. Drives may have two LEDs, driven by separate PWM channels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, EnumIter)]
pub enum DriveLed {
    #[default]
    Off,
    Red,
    Green,
    Both,
}

impl DriveLed {
    const RED_BIT: u8 = 0x01;
    const GREEN_BIT: u8 = 0x02;

    /// Resolve LED state from the two PWM intensities reported by the drive.
    pub fn from_pwm(pwm1: u32, pwm2: u32) -> Self {
        let mut bits = 0;
        if pwm1 > LED_PWM_THRESHOLD {
            bits |= Self::RED_BIT;
        }
        if pwm2 > LED_PWM_THRESHOLD {
            bits |= Self::GREEN_BIT;
        }
        Self::from_bits(bits)
    }

    pub fn from_bits(bits: u8) -> Self {
        match bits & (Self::RED_BIT | Self::GREEN_BIT) {
            0 => DriveLed::Off,
            Self::RED_BIT => DriveLed::Red,
            Self::GREEN_BIT => DriveLed::Green,
            _ => DriveLed::Both,
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            DriveLed::Off => 0,
            DriveLed::Red => Self::RED_BIT,
            DriveLed::Green => Self::GREEN_BIT,
            DriveLed::Both => Self::RED_BIT | Self::GREEN_BIT,
        }
    }

    pub fn is_lit(&self) -> bool {
        !matches!(self, DriveLed::Off)
    }
}

impl Display for DriveLed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriveLed::Off => write!(f, "black"),
            DriveLed::Red => write!(f, "red"),
            DriveLed::Green => write!(f, "green"),
            DriveLed::Both => write!(f, "red+green"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn led_resolves_from_pwm() {
        assert_eq!(DriveLed::from_pwm(150, 50), DriveLed::Red);
        assert_eq!(DriveLed::from_pwm(50, 150), DriveLed::Green);
        assert_eq!(DriveLed::from_pwm(150, 150), DriveLed::Both);
        assert_eq!(DriveLed::from_pwm(50, 50), DriveLed::Off);
        // The threshold itself is not lit.
        assert_eq!(DriveLed::from_pwm(100, 100), DriveLed::Off);
    }

    #[test]
    fn led_bits_are_consistent() {
        for led in DriveLed::iter() {
            assert_eq!(DriveLed::from_bits(led.bits()), led);
        }
    }

    #[test]
    fn drive_unit_device_numbers() {
        assert_eq!(DriveUnit::from_device(8).map(|u| u.idx()), Some(0));
        assert_eq!(DriveUnit::from_device(11).map(|u| u.idx()), Some(3));
        assert!(DriveUnit::from_device(12).is_none());
        assert!(DriveUnit::from_device(7).is_none());
        assert!(DriveUnit::new(4).is_none());
        assert_eq!(DriveUnit::all().count(), DRIVE_NUM);
        assert_eq!(DriveUnit::new(2).map(|u| u.mask_bit()), Some(0b0100));
    }
}
