//! Instruction set.
//!
//! Every instruction is a single lowercase ASCII byte with no operands. The
//! table below is the one place command bytes are defined; the enum,
//! decoder and encoder are generated from it.

/// Byte that marks a jump target while the marker state is normal.
pub const MARKER_NORMAL: u8 = b'm';
/// Byte that marks a jump target while the marker state is alternate.
pub const MARKER_ALTERNATE: u8 = b'j';

macro_rules! define_instructions {
    ($( $(#[$doc:meta])* $name:ident = $byte:literal, )*) => {
        /// A decoded instruction.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Instruction {
            $( $(#[$doc])* $name, )*
        }

        impl Instruction {
            /// Every instruction, in command-byte order.
            pub const ALL: &'static [Instruction] = &[$(Instruction::$name,)*];

            /// Decode a source byte. Bytes outside the instruction set,
            /// including both marker bytes, decode to `None`.
            pub const fn decode(byte: u8) -> Option<Self> {
                match byte {
                    $( $byte => Some(Instruction::$name), )*
                    _ => None,
                }
            }

            /// The command byte for this instruction.
            pub const fn byte(self) -> u8 {
                match self {
                    $( Instruction::$name => $byte, )*
                }
            }
        }
    };
}

define_instructions! {
    /// A += 1
    Increment = b'a',
    /// Seek backward to the active marker.
    JumpBackward = b'b',
    /// Insert a zero cell before the current wheel cell.
    InsertWheelCell = b'c',
    /// Remove the current wheel cell.
    DeleteWheelCell = b'd',
    /// A = weave(A)
    Weave = b'e',
    /// Seek forward to the active marker.
    JumpForward = b'f',
    /// A = P
    LoadPental = b'g',
    /// Pp += 1
    PentalForward = b'h',
    /// Wp += 1
    WheelForward = b'i',
    /// P = A
    StorePental = b'k',
    /// A <-> W
    SwapWheel = b'l',
    /// Pp -= 1
    PentalBackward = b'n',
    /// Wp -= 1
    WheelBackward = b'o',
    /// A = W
    LoadWheel = b'p',
    /// Exchange the source and wheel pools with their cursors.
    SwapPools = b'q',
    /// A = next input byte
    Read = b'r',
    /// Skip the next byte if A == 0.
    SkipIfZero = b's',
    /// Skip the next byte if A != 0.
    SkipIfNonZero = b't',
    /// A -= 1
    Decrement = b'u',
    /// A <-> P
    SwapPental = b'v',
    /// Output A
    Write = b'w',
    /// Flip between the normal and alternate marker.
    ToggleMarker = b'x',
    /// W = A
    StoreWheel = b'y',
    /// A = 0
    Zero = b'z',
}

impl TryFrom<u8> for Instruction {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Instruction::decode(byte).ok_or(byte)
    }
}

impl From<Instruction> for u8 {
    fn from(instruction: Instruction) -> u8 {
        instruction.byte()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_letters_except_markers_decode() {
        for byte in b'a'..=b'z' {
            let decoded = Instruction::decode(byte);
            if byte == MARKER_NORMAL || byte == MARKER_ALTERNATE {
                assert!(decoded.is_none(), "marker {} must be inert", byte as char);
            } else {
                assert_eq!(decoded.map(Instruction::byte), Some(byte));
            }
        }
        assert_eq!(Instruction::ALL.len(), 24);
    }

    #[test]
    fn everything_else_is_inert() {
        let decoded = (0..=255u8)
            .filter(|b| !b.is_ascii_lowercase())
            .filter_map(Instruction::decode)
            .count();
        assert_eq!(decoded, 0);
        assert_eq!(Instruction::try_from(b'A'), Err(b'A'));
    }
}
