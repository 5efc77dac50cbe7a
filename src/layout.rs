//! Bit layout of a real-multiplexer state.
//!
//! A multiplexer of `total_bits` splits its input into `address_bits` leading
//! address bits followed by `2^address_bits` data bits. The address selects
//! which data bit holds the correct answer. Sizes that do not fit a layout
//! exactly leave their trailing bits unused.
//!
//! | total_bits | address_bits | data bits |
//! |-----------:|-------------:|----------:|
//! | 3          | 1            | 2         |
//! | 6          | 2            | 4         |
//! | 11         | 3            | 8         |
//! | 20         | 4            | 16        |
//! | 37         | 5            | 32        |
//! | 70         | 6            | 64        |

use crate::{Result, RmuxError};
use serde::{Deserialize, Serialize};

/// Smallest supported multiplexer (1 address bit, 2 data bits).
pub const MIN_TOTAL_BITS: usize = 3;

/// Derive the number of address bits for a multiplexer of `total_bits`.
///
/// Returns the largest `a` such that `a + 2^a <= total_bits`.
///
/// # Errors
///
/// Returns [`RmuxError::InvalidLayout`] when `total_bits < 3`.
///
/// # Examples
///
/// ```
/// use rmux::layout::derive_layout;
///
/// assert_eq!(derive_layout(6).unwrap(), 2);
/// assert_eq!(derive_layout(11).unwrap(), 3);
/// assert_eq!(derive_layout(12).unwrap(), 3);
/// assert!(derive_layout(2).is_err());
/// ```
pub fn derive_layout(total_bits: usize) -> Result<usize> {
    if total_bits < MIN_TOTAL_BITS {
        return Err(RmuxError::InvalidLayout { total_bits });
    }

    let mut address_bits = 1;
    while fits(address_bits + 1, total_bits) {
        address_bits += 1;
    }
    Ok(address_bits)
}

/// Whether `address_bits + 2^address_bits <= total_bits`, without overflow.
#[inline]
fn fits(address_bits: usize, total_bits: usize) -> bool {
    u32::try_from(address_bits)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .and_then(|data_bits| data_bits.checked_add(address_bits))
        .map_or(false, |used| used <= total_bits)
}

/// Immutable address/data split of a multiplexer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    total_bits: usize,
    address_bits: usize,
}

impl Layout {
    /// Derive the layout for `total_bits`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rmux::Layout;
    ///
    /// let layout = Layout::new(6).unwrap();
    /// assert_eq!(layout.address_bits(), 2);
    /// assert_eq!(layout.data_bits(), 4);
    /// ```
    pub fn new(total_bits: usize) -> Result<Self> {
        let address_bits = derive_layout(total_bits)?;
        Ok(Self {
            total_bits,
            address_bits,
        })
    }

    #[inline]
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    #[inline]
    pub fn address_bits(&self) -> usize {
        self.address_bits
    }

    /// Number of data bits selectable by the address.
    #[inline]
    pub fn data_bits(&self) -> usize {
        1 << self.address_bits
    }

    /// Number of leading bits that take part in the problem.
    #[inline]
    pub fn used_bits(&self) -> usize {
        self.address_bits + self.data_bits()
    }

    /// State position of the data bit selected by `address`.
    #[inline]
    pub fn data_position(&self, address: usize) -> usize {
        debug_assert!(address < self.data_bits());
        self.address_bits + address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_sizes() {
        assert_eq!(derive_layout(3).unwrap(), 1);
        assert_eq!(derive_layout(6).unwrap(), 2);
        assert_eq!(derive_layout(11).unwrap(), 3);
        assert_eq!(derive_layout(20).unwrap(), 4);
        assert_eq!(derive_layout(37).unwrap(), 5);
        assert_eq!(derive_layout(70).unwrap(), 6);
    }

    #[test]
    fn test_padding_sizes() {
        assert_eq!(derive_layout(5).unwrap(), 1);
        assert_eq!(derive_layout(7).unwrap(), 2);
        assert_eq!(derive_layout(10).unwrap(), 2);
        assert_eq!(derive_layout(19).unwrap(), 3);
    }

    #[test]
    fn test_degenerate_sizes_rejected() {
        for total_bits in 0..MIN_TOTAL_BITS {
            assert!(matches!(
                derive_layout(total_bits),
                Err(RmuxError::InvalidLayout { .. })
            ));
        }
    }

    #[test]
    fn test_huge_size_does_not_overflow() {
        let a = derive_layout(usize::MAX).unwrap();
        assert!(a < usize::BITS as usize);
    }

    #[test]
    fn test_layout_accessors() {
        let layout = Layout::new(11).unwrap();
        assert_eq!(layout.total_bits(), 11);
        assert_eq!(layout.address_bits(), 3);
        assert_eq!(layout.data_bits(), 8);
        assert_eq!(layout.used_bits(), 11);
        assert_eq!(layout.data_position(0), 3);
        assert_eq!(layout.data_position(7), 10);
    }
}
