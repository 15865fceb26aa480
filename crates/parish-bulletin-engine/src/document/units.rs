use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A signed length stored in English Metric Units (EMU).
///
/// EMU is the integer unit of the page-layout format the document is later
/// converted from, so every conversion rounds to a whole EMU exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Length(i64);

impl Length {
    pub const EMU_PER_PT: f64 = 12_700.0;
    pub const EMU_PER_MM: f64 = 36_000.0;
    pub const EMU_PER_TWIP: f64 = 635.0;

    pub const ZERO: Length = Length(0);

    pub const fn emu(emu: i64) -> Self {
        Self(emu)
    }

    /// Rounds a fractional EMU value to the nearest whole unit.
    pub fn from_emu_f64(emu: f64) -> Self {
        Self(emu.round() as i64)
    }

    pub fn pt(pt: f64) -> Self {
        Self::from_emu_f64(pt * Self::EMU_PER_PT)
    }

    pub fn mm(mm: f64) -> Self {
        Self::from_emu_f64(mm * Self::EMU_PER_MM)
    }

    pub fn twips(twips: f64) -> Self {
        Self::from_emu_f64(twips * Self::EMU_PER_TWIP)
    }

    #[must_use]
    pub const fn as_emu(self) -> i64 {
        self.0
    }

    #[must_use]
    pub fn as_emu_f64(self) -> f64 {
        self.0 as f64
    }

    #[must_use]
    pub fn as_pt(self) -> f64 {
        self.0 as f64 / Self::EMU_PER_PT
    }

    #[must_use]
    pub fn as_mm(self) -> f64 {
        self.0 as f64 / Self::EMU_PER_MM
    }

    #[must_use]
    pub fn as_twips(self) -> f64 {
        self.0 as f64 / Self::EMU_PER_TWIP
    }

    /// Multiplies by `factor` and rounds back to whole EMU.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::from_emu_f64(self.0 as f64 * factor)
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Neg for Length {
    type Output = Length;

    fn neg(self) -> Length {
        Length(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_and_millimetres_round_to_whole_emu() {
        assert_eq!(Length::pt(1.0).as_emu(), 12_700);
        assert_eq!(Length::mm(297.0).as_emu(), 10_692_000);
        assert_eq!(Length::twips(20.0), Length::pt(1.0));
    }

    #[test]
    fn hanging_indent_values() {
        let first_line = -Length::pt(16.0);
        let body = Length::pt(16.0 * 1.5);
        assert_eq!(first_line.as_emu(), -203_200);
        assert_eq!(body.as_pt(), 24.0);
    }

    #[test]
    fn scale_rounds_half_away_from_zero() {
        assert_eq!(Length::emu(5).scale(0.5), Length::emu(3));
        assert_eq!(Length::mm(10.0).scale(0.8), Length::mm(8.0));
    }

    #[test]
    fn arithmetic() {
        let mut total = Length::pt(10.0) + Length::pt(2.0) - Length::pt(4.0);
        total += Length::pt(1.0);
        assert_eq!(total, Length::pt(9.0));
        assert_eq!(Length::ZERO.as_mm(), 0.0);
    }
}
