//! Classification of the C++ fundamental arithmetic types.
//!
//! The conversion classifier and the narrowing check need to know, for any
//! builtin arithmetic type, its bit width, signedness, and where it sits in
//! the integral promotion/conversion ladder. This module supplies that
//! knowledge as pure lookups; no registry access is involved.
//!
//! Widths follow the LP64 data model (`long` is 64-bit). `long double` is
//! modeled with the same width as `double`; the distinction only matters for
//! exact-representability checks, where treating both as binary64 is the
//! conservative choice.

use crate::type_hash::{TypeHash, builtins};

/// The fundamental arithmetic kinds.
///
/// Plain `char` is modeled as signed, as on the common LP64 targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Bool,
    Char,
    SignedChar,
    UnsignedChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Float,
    Double,
    LongDouble,
}

impl BasicKind {
    /// Storage width in bits. `Bool` reports 8; its representable value set
    /// is {0, 1} and is special-cased by value-range checks.
    pub const fn bit_width(self) -> u32 {
        match self {
            BasicKind::Bool
            | BasicKind::Char
            | BasicKind::SignedChar
            | BasicKind::UnsignedChar => 8,
            BasicKind::Short | BasicKind::UnsignedShort => 16,
            BasicKind::Int | BasicKind::UnsignedInt | BasicKind::Float => 32,
            BasicKind::Long
            | BasicKind::UnsignedLong
            | BasicKind::LongLong
            | BasicKind::UnsignedLongLong
            | BasicKind::Double
            | BasicKind::LongDouble => 64,
        }
    }

    /// Whether the kind is signed. Floating kinds report true.
    pub const fn is_signed(self) -> bool {
        !matches!(
            self,
            BasicKind::Bool
                | BasicKind::UnsignedChar
                | BasicKind::UnsignedShort
                | BasicKind::UnsignedInt
                | BasicKind::UnsignedLong
                | BasicKind::UnsignedLongLong
        )
    }

    pub const fn is_integral(self) -> bool {
        !self.is_floating()
    }

    pub const fn is_floating(self) -> bool {
        matches!(
            self,
            BasicKind::Float | BasicKind::Double | BasicKind::LongDouble
        )
    }

    /// The integer conversion rank ladder (`bool < char < short < int < long
    /// < long long`). Floating kinds have no integer rank; they report the
    /// top value and are never compared on it.
    pub const fn integer_conversion_rank(self) -> u32 {
        match self {
            BasicKind::Bool => 0,
            BasicKind::Char | BasicKind::SignedChar | BasicKind::UnsignedChar => 1,
            BasicKind::Short | BasicKind::UnsignedShort => 2,
            BasicKind::Int | BasicKind::UnsignedInt => 3,
            BasicKind::Long | BasicKind::UnsignedLong => 4,
            BasicKind::LongLong | BasicKind::UnsignedLongLong => 5,
            BasicKind::Float | BasicKind::Double | BasicKind::LongDouble => u32::MAX,
        }
    }

    /// The integral promotion target, if this kind promotes.
    ///
    /// `bool`, the char kinds, and the short kinds all promote to `int`;
    /// `float` promotes to `double`; everything else stays put.
    pub const fn promoted(self) -> BasicKind {
        match self {
            BasicKind::Bool
            | BasicKind::Char
            | BasicKind::SignedChar
            | BasicKind::UnsignedChar
            | BasicKind::Short
            | BasicKind::UnsignedShort => BasicKind::Int,
            BasicKind::Float => BasicKind::Double,
            other => other,
        }
    }

    /// Whether every value of `source` is representable in `self`.
    ///
    /// This is the value-set containment test behind the narrowing rules:
    /// a conversion between integral kinds is potentially narrowing exactly
    /// when the target does not contain the source.
    pub const fn contains_all_values_of(self, source: BasicKind) -> bool {
        if self.is_floating() || source.is_floating() {
            // Only meaningful between integral kinds; floating containment
            // is handled by the exact-representability checks.
            return false;
        }
        if matches!(source, BasicKind::Bool) {
            return true;
        }
        if matches!(self, BasicKind::Bool) {
            return false;
        }
        if source.is_signed() {
            self.is_signed() && self.bit_width() >= source.bit_width()
        } else if self.is_signed() {
            self.bit_width() > source.bit_width()
        } else {
            self.bit_width() >= source.bit_width()
        }
    }
}

/// Map a builtin type hash to its arithmetic kind.
///
/// Returns `None` for `void`, `std::nullptr_t`, and anything that is not a
/// builtin arithmetic type.
pub const fn basic_kind(hash: TypeHash) -> Option<BasicKind> {
    let h = hash.0;
    if h == builtins::BOOL.0 {
        Some(BasicKind::Bool)
    } else if h == builtins::CHAR.0 {
        Some(BasicKind::Char)
    } else if h == builtins::SCHAR.0 {
        Some(BasicKind::SignedChar)
    } else if h == builtins::UCHAR.0 {
        Some(BasicKind::UnsignedChar)
    } else if h == builtins::SHORT.0 {
        Some(BasicKind::Short)
    } else if h == builtins::USHORT.0 {
        Some(BasicKind::UnsignedShort)
    } else if h == builtins::INT.0 {
        Some(BasicKind::Int)
    } else if h == builtins::UINT.0 {
        Some(BasicKind::UnsignedInt)
    } else if h == builtins::LONG.0 {
        Some(BasicKind::Long)
    } else if h == builtins::ULONG.0 {
        Some(BasicKind::UnsignedLong)
    } else if h == builtins::LONG_LONG.0 {
        Some(BasicKind::LongLong)
    } else if h == builtins::ULONG_LONG.0 {
        Some(BasicKind::UnsignedLongLong)
    } else if h == builtins::FLOAT.0 {
        Some(BasicKind::Float)
    } else if h == builtins::DOUBLE.0 {
        Some(BasicKind::Double)
    } else if h == builtins::LONG_DOUBLE.0 {
        Some(BasicKind::LongDouble)
    } else {
        None
    }
}

/// The builtin hash for an arithmetic kind (inverse of [`basic_kind`]).
pub const fn builtin_hash(kind: BasicKind) -> TypeHash {
    match kind {
        BasicKind::Bool => builtins::BOOL,
        BasicKind::Char => builtins::CHAR,
        BasicKind::SignedChar => builtins::SCHAR,
        BasicKind::UnsignedChar => builtins::UCHAR,
        BasicKind::Short => builtins::SHORT,
        BasicKind::UnsignedShort => builtins::USHORT,
        BasicKind::Int => builtins::INT,
        BasicKind::UnsignedInt => builtins::UINT,
        BasicKind::Long => builtins::LONG,
        BasicKind::UnsignedLong => builtins::ULONG,
        BasicKind::LongLong => builtins::LONG_LONG,
        BasicKind::UnsignedLongLong => builtins::ULONG_LONG,
        BasicKind::Float => builtins::FLOAT,
        BasicKind::Double => builtins::DOUBLE,
        BasicKind::LongDouble => builtins::LONG_DOUBLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_and_signedness() {
        assert_eq!(BasicKind::SignedChar.bit_width(), 8);
        assert_eq!(BasicKind::Int.bit_width(), 32);
        assert_eq!(BasicKind::Long.bit_width(), 64);
        assert!(BasicKind::Char.is_signed());
        assert!(!BasicKind::UnsignedInt.is_signed());
        assert!(BasicKind::Double.is_floating());
        assert!(BasicKind::Bool.is_integral());
    }

    #[test]
    fn promotion_targets() {
        assert_eq!(BasicKind::Bool.promoted(), BasicKind::Int);
        assert_eq!(BasicKind::Char.promoted(), BasicKind::Int);
        assert_eq!(BasicKind::Short.promoted(), BasicKind::Int);
        assert_eq!(BasicKind::UnsignedShort.promoted(), BasicKind::Int);
        assert_eq!(BasicKind::Float.promoted(), BasicKind::Double);
        assert_eq!(BasicKind::Int.promoted(), BasicKind::Int);
        assert_eq!(BasicKind::UnsignedInt.promoted(), BasicKind::UnsignedInt);
    }

    #[test]
    fn integral_containment() {
        // widening within a signedness contains
        assert!(BasicKind::Int.contains_all_values_of(BasicKind::Short));
        assert!(BasicKind::UnsignedLong.contains_all_values_of(BasicKind::UnsignedInt));
        // unsigned fits in strictly wider signed
        assert!(BasicKind::Long.contains_all_values_of(BasicKind::UnsignedInt));
        assert!(!BasicKind::Int.contains_all_values_of(BasicKind::UnsignedInt));
        // signed never fits unsigned
        assert!(!BasicKind::UnsignedLongLong.contains_all_values_of(BasicKind::Int));
        // narrowing never contains
        assert!(!BasicKind::Short.contains_all_values_of(BasicKind::Int));
        // bool fits everywhere, nothing fits bool
        assert!(BasicKind::SignedChar.contains_all_values_of(BasicKind::Bool));
        assert!(!BasicKind::Bool.contains_all_values_of(BasicKind::SignedChar));
    }

    #[test]
    fn hash_round_trip() {
        for kind in [
            BasicKind::Bool,
            BasicKind::Char,
            BasicKind::SignedChar,
            BasicKind::UnsignedChar,
            BasicKind::Short,
            BasicKind::UnsignedShort,
            BasicKind::Int,
            BasicKind::UnsignedInt,
            BasicKind::Long,
            BasicKind::UnsignedLong,
            BasicKind::LongLong,
            BasicKind::UnsignedLongLong,
            BasicKind::Float,
            BasicKind::Double,
            BasicKind::LongDouble,
        ] {
            assert_eq!(basic_kind(builtin_hash(kind)), Some(kind));
        }
        assert_eq!(basic_kind(builtins::VOID), None);
        assert_eq!(basic_kind(builtins::NULLPTR), None);
        assert_eq!(basic_kind(TypeHash::from_name("Widget")), None);
    }
}
