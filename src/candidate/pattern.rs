//! Fixed-width bit patterns.

use std::fmt;

/// A fixed-width bit string stored in the low `width` bits of a `u32`.
///
/// Position 0 is the most significant bit, so `bit(p)` matches the `p`-th
/// character of the binary rendering.
///
/// ```
/// use u_tour::candidate::BitPattern;
///
/// let p = BitPattern::new(0b0110, 4);
/// assert_eq!(p.to_string(), "0110");
/// assert!(!p.bit(0));
/// assert!(p.bit(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitPattern {
    value: u32,
    width: usize,
}

impl BitPattern {
    /// Keeps the low `width` bits of `value`. `width` is clamped to `1..=32`.
    pub fn new(value: u32, width: usize) -> Self {
        let width = width.clamp(1, 32);
        let mask = if width == 32 { u32::MAX } else { (1u32 << width) - 1 };
        Self {
            value: value & mask,
            width,
        }
    }

    /// Builds a pattern from bits listed most significant first.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut value = 0u32;
        let mut width = 0;
        for bit in bits.into_iter().take(32) {
            value = (value << 1) | u32::from(bit);
            width += 1;
        }
        Self::new(value, width)
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Bit at `position`, wrapping modulo the width.
    pub fn bit(&self, position: usize) -> bool {
        let p = position % self.width;
        (self.value >> (self.width - 1 - p)) & 1 == 1
    }

    /// Number of set bits.
    pub fn ones(&self) -> u32 {
        self.value.count_ones()
    }
}

impl fmt::Display for BitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits_msb_first() {
        let p = BitPattern::from_bits([true, false, true, true]);
        assert_eq!(p.value(), 0b1011);
        assert_eq!(p.width(), 4);
        assert_eq!(p.to_string(), "1011");
        assert_eq!(p.ones(), 3);
    }

    #[test]
    fn test_new_masks_high_bits() {
        let p = BitPattern::new(0xFF, 3);
        assert_eq!(p.value(), 0b111);
        assert_eq!(BitPattern::new(u32::MAX, 40).width(), 32);
    }

    #[test]
    fn test_bit_wraps() {
        let p = BitPattern::new(0b100, 3);
        assert!(p.bit(0));
        assert!(!p.bit(2));
        assert!(p.bit(3));
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(BitPattern::new(1, 6).to_string(), "000001");
    }
}
