//! The weave permutation applied to register A.
//!
//! Each source bit moves to a fixed destination:
//!
//! | source | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 |
//! |--------|---|---|---|---|---|---|---|---|
//! | dest   | 2 | 0 | 4 | 1 | 6 | 3 | 7 | 5 |

/// Destination bit for each source bit, indexed by source bit.
const DESTINATION: [u8; 8] = [2, 0, 4, 1, 6, 3, 7, 5];

const fn build_table(inverse: bool) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut value = 0usize;
    while value < 256 {
        let mut out = 0u8;
        let mut bit = 0usize;
        while bit < 8 {
            let (from, to) = if inverse {
                (DESTINATION[bit] as usize, bit)
            } else {
                (bit, DESTINATION[bit] as usize)
            };
            if (value >> from) & 1 == 1 {
                out |= 1 << to;
            }
            bit += 1;
        }
        table[value] = out;
        value += 1;
    }
    table
}

static WEAVE: [u8; 256] = build_table(false);
static UNWEAVE: [u8; 256] = build_table(true);

/// Apply the weave permutation to one byte.
#[inline]
pub fn weave(value: u8) -> u8 {
    WEAVE[value as usize]
}

/// Undo [`weave`]. No instruction uses this; it exists for tooling and tests.
#[inline]
pub fn unweave(value: u8) -> u8 {
    UNWEAVE[value as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Bit-by-bit reference: output bit i takes input bit SOURCE[i].
    fn reference(value: u8) -> u8 {
        const SOURCE: [u8; 8] = [1, 3, 0, 5, 2, 7, 4, 6];
        SOURCE
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &src)| acc | (((value >> src) & 1) << i))
    }

    #[test]
    fn matches_reference_for_every_byte() {
        for value in 0..=255u8 {
            assert_eq!(weave(value), reference(value), "weave({value:#04x})");
        }
    }

    #[test]
    fn single_bits_move_to_documented_positions() {
        assert_eq!(weave(0x01), 0x04);
        assert_eq!(weave(0x02), 0x01);
        assert_eq!(weave(0x04), 0x10);
        assert_eq!(weave(0x08), 0x02);
        assert_eq!(weave(0x10), 0x40);
        assert_eq!(weave(0x20), 0x08);
        assert_eq!(weave(0x40), 0x80);
        assert_eq!(weave(0x80), 0x20);
    }

    #[test]
    fn is_not_self_inverse() {
        assert_ne!(weave(weave(0x01)), 0x01);
        assert_eq!(weave(0x00), 0x00);
        assert_eq!(weave(0xff), 0xff);
    }

    proptest! {
        #[test]
        fn unweave_inverts_weave(value in any::<u8>()) {
            prop_assert_eq!(unweave(weave(value)), value);
            prop_assert_eq!(weave(unweave(value)), value);
        }

        #[test]
        fn preserves_popcount(value in any::<u8>()) {
            prop_assert_eq!(weave(value).count_ones(), value.count_ones());
        }
    }
}
