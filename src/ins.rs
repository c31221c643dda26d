mod opcodes;

pub use opcodes::{Cond, Opcode};

use std::sync::LazyLock;

// The pattern tables in `opcodes` are the single source of truth; the LUT is
// materialized once, on first decode.
static DECODE_LUT: LazyLock<Box<[Decoded]>> = LazyLock::new(|| {
    (0..=u16::MAX)
        .map(|word| {
            let opcode = Opcode::find_match(word);
            Decoded {
                opcode,
                needs_expansion: opcode.needs_expansion(),
            }
        })
        .collect()
});

#[derive(Clone, Copy)]
pub struct Decoded {
    pub opcode: Opcode,
    pub needs_expansion: bool,
}

impl Decoded {
    pub fn len(self) -> u32 {
        if self.needs_expansion { 2 } else { 1 }
    }
}

/// A fetched instruction: the opcode word plus its expansion word, when the
/// opcode takes one.
#[derive(Clone, Copy)]
pub struct Ins {
    pub base: u16,
    pub expansion: u16,
}

impl std::fmt::Debug for Ins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let decoded = self.decoded();
        if decoded.needs_expansion {
            write!(
                f,
                "{:?} ({:04X}:{:04X})",
                decoded.opcode, self.base, self.expansion
            )
        } else {
            write!(f, "{:?} ({:04X})", decoded.opcode, self.base)
        }
    }
}

impl Ins {
    pub fn new(base: u16) -> Self {
        Self { base, expansion: 0 }
    }

    pub fn with_expansion(base: u16, expansion: u16) -> Self {
        Self { base, expansion }
    }

    pub fn decoded(self) -> Decoded {
        decode(self.base)
    }
}

pub fn decode(word: u16) -> Decoded {
    DECODE_LUT[word as usize]
}

#[cfg(test)]
mod test {
    use super::{Opcode, decode};

    #[test]
    fn lut_matches_pattern_search() {
        for value in 0..=u16::MAX {
            assert_eq!(decode(value).opcode, Opcode::find_match(value));
        }
    }

    #[test]
    fn expansion_flag_follows_opcode() {
        for value in 0..=u16::MAX {
            let decoded = decode(value);
            assert_eq!(decoded.needs_expansion, decoded.opcode.needs_expansion());
            assert_eq!(decoded.len(), if decoded.needs_expansion { 2 } else { 1 });
        }
    }
}
