//! Presentation flag bitset

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Bit-mask of the metadata fields that prefix a rendered message.
///
/// `JSON` does not add a field; it switches the prefix to the object
/// grammar. It still counts as a set bit, so use [`Flags::fields`] when
/// asking whether any field will actually be printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u32);

impl Flags {
    pub const NONE: Flags = Flags(0);
    pub const LEVEL: Flags = Flags(1);
    pub const DATE: Flags = Flags(2);
    pub const TIME: Flags = Flags(4);
    pub const PID: Flags = Flags(8);
    pub const TID: Flags = Flags(16);
    pub const JSON: Flags = Flags(32);

    const ALL: u32 = 63;

    /// Named single-bit flags, in prefix order.
    pub const NAMED: [(&'static str, Flags); 6] = [
        ("level", Flags::LEVEL),
        ("date", Flags::DATE),
        ("time", Flags::TIME),
        ("pid", Flags::PID),
        ("tid", Flags::TID),
        ("json", Flags::JSON),
    ];

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build from raw bits, discarding bits that name no flag.
    #[inline]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Flags(bits & Self::ALL)
    }

    #[inline]
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The flags with the json bit removed.
    #[inline]
    pub const fn fields(self) -> Flags {
        Flags(self.0 & !Self::JSON.0)
    }

    #[inline]
    pub fn insert(&mut self, other: Flags) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Flags) {
        self.0 &= !other.0;
    }

    /// Union of every flag in `flags`.
    pub fn union_of(flags: &[Flags]) -> Flags {
        flags.iter().fold(Flags::NONE, |acc, f| acc | *f)
    }

    /// Display name of a single flag; combinations and unnamed bits are `unknown`.
    pub fn name(self) -> &'static str {
        if self.is_empty() {
            return "none";
        }
        Self::NAMED
            .iter()
            .find(|(_, flag)| *flag == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl From<Flags> for u32 {
    fn from(flags: Flags) -> u32 {
        flags.0
    }
}

impl fmt::Display for Flags {
    /// Comma-separated flag names, the same shape the settings file accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (name, flag) in Self::NAMED {
            if self.contains(flag) {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl FromStr for Flags {
    type Err = String;

    /// Parse a single flag name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "none" {
            return Ok(Flags::NONE);
        }
        Self::NAMED
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, flag)| *flag)
            .ok_or_else(|| format!("Invalid flag: '{}'", s))
    }
}
