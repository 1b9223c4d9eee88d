//! Deterministic hash-based identity for types and functions.
//!
//! This module provides [`TypeHash`], a 64-bit hash identifying types,
//! functions, methods, constructors, and conversion operators. Hashes are
//! computed deterministically from qualified names and signatures, so the
//! same declaration always maps to the same identity regardless of
//! registration order, and overloads with different parameter lists get
//! distinct identities.
//!
//! # Hash Computation
//!
//! Uses XXHash64 with domain-specific mixing constants so that entities of
//! different kinds (a type named `f` vs. a function named `f`) never collide
//! by construction.
//!
//! # Examples
//!
//! ```
//! use cxxsema_core::TypeHash;
//!
//! let a = TypeHash::from_name("ns::Widget");
//! let b = TypeHash::from_name("ns::Widget");
//! assert_eq!(a, b); // deterministic
//!
//! let f1 = TypeHash::from_function("draw", &[TypeHash::from_name("ns::Widget")]);
//! let f2 = TypeHash::from_function("draw", &[TypeHash::from_name("ns::Canvas")]);
//! assert_ne!(f1, f2); // different signatures, different identities
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
///
/// Each entity kind gets its own marker so same-named entities of different
/// kinds produce distinct hashes.
pub mod hash_constants {
    /// Separator constant used when folding parameter lists.
    pub const SEP: u64 = 0x9b6a3f82d14c07e5;

    /// Domain marker for type hashes.
    pub const TYPE: u64 = 0x63d81fa40b97c2ee;

    /// Domain marker for free-function hashes.
    pub const FUNCTION: u64 = 0x1f4e9c2b785da630;

    /// Domain marker for member-function hashes.
    pub const METHOD: u64 = 0xd27b64e09c3a51f8;

    /// Domain marker for constructor hashes.
    pub const CONSTRUCTOR: u64 = 0x85c1da3e6f40b927;

    /// Domain marker for conversion-operator hashes.
    pub const CONVERSION_OPERATOR: u64 = 0x4a90e7d52c863b1f;

    /// Parameter position mixing constants; position `i` beyond the table
    /// falls back to the first marker offset by `i`.
    pub const PARAM_MARKERS: [u64; 8] = [
        0x9e3779b97f4a7c15,
        0xc2b2ae3d27d4eb4f,
        0x165667b19e3779f9,
        0x27d4eb2f165667c5,
        0x85ebca77c2b2ae63,
        0xff51afd7ed558ccd,
        0xc4ceb9fe1a85ec53,
        0x2545f4914f6cdd1d,
    ];
}

/// A deterministic 64-bit hash identifying a type or function.
///
/// Computed from the qualified name (for types) or name + signature (for
/// functions). The engine treats these as opaque, comparably-equal
/// identities; the only structure it relies on is determinism.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a qualified type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a free-function hash from name and parameter type hashes.
    ///
    /// Parameter order matters: `(int, float)` and `(float, int)` yield
    /// different hashes, so overloads stay distinct.
    #[inline]
    pub fn from_function(name: &str, param_hashes: &[TypeHash]) -> Self {
        let hash = hash_constants::FUNCTION ^ xxh64(name.as_bytes(), 0);
        TypeHash(fold_params(hash, param_hashes))
    }

    /// Create a member-function hash from owner, name, parameters, and
    /// member cv-qualification.
    #[inline]
    pub fn from_method(
        owner: TypeHash,
        name: &str,
        param_hashes: &[TypeHash],
        is_const: bool,
    ) -> Self {
        let const_bit = if is_const { 1 } else { 0 };
        let hash = hash_constants::METHOD ^ owner.0 ^ xxh64(name.as_bytes(), 0) ^ const_bit;
        TypeHash(fold_params(hash, param_hashes))
    }

    /// Create a constructor hash from owner type and parameter type hashes.
    ///
    /// Constructors have no name of their own; owner + parameter list
    /// identifies them.
    #[inline]
    pub fn from_constructor(owner: TypeHash, param_hashes: &[TypeHash]) -> Self {
        let hash = hash_constants::CONSTRUCTOR ^ owner.0;
        TypeHash(fold_params(hash, param_hashes))
    }

    /// Create a conversion-operator hash from owner, result type, and member
    /// cv-qualification.
    ///
    /// A conversion operator is identified by what it converts *to*; two
    /// `operator int()` declarations on the same class (const and non-const)
    /// remain distinct.
    #[inline]
    pub fn from_operator(owner: TypeHash, result: TypeHash, is_const: bool) -> Self {
        let const_bit = if is_const { 1 } else { 0 };
        TypeHash(hash_constants::CONVERSION_OPERATOR ^ owner.0 ^ result.0.rotate_left(17) ^ const_bit)
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Fold a parameter list into a base hash so that order matters.
#[inline]
fn fold_params(mut hash: u64, param_hashes: &[TypeHash]) -> u64 {
    for (i, param) in param_hashes.iter().enumerate() {
        let marker = hash_constants::PARAM_MARKERS
            .get(i)
            .copied()
            .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
        // wrapping_mul keeps the fold non-commutative, unlike plain XOR
        hash = hash
            .wrapping_mul(hash_constants::SEP)
            .wrapping_add(marker ^ param.0);
    }
    hash
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Well-known fixed hashes for the C++ fundamental types.
///
/// These are stable sentinel identities, not computed from names, so the
/// conversion classifier can match on them without a registry lookup.
pub mod builtins {
    use super::TypeHash;

    /// Hash for `void`.
    pub const VOID: TypeHash = TypeHash(0xa0f3d14b92c6751e);

    /// Hash for `bool`.
    pub const BOOL: TypeHash = TypeHash(0xb17e94c02a5d83f6);

    /// Hash for `char`.
    pub const CHAR: TypeHash = TypeHash(0xc28a05d13b6e94a7);

    /// Hash for `signed char`.
    pub const SCHAR: TypeHash = TypeHash(0xd39b16e24c7fa5b8);

    /// Hash for `unsigned char`.
    pub const UCHAR: TypeHash = TypeHash(0xe4ac27f35d80b6c9);

    /// Hash for `short`.
    pub const SHORT: TypeHash = TypeHash(0xf5bd38046e91c7da);

    /// Hash for `unsigned short`.
    pub const USHORT: TypeHash = TypeHash(0x06ce49157fa2d8eb);

    /// Hash for `int`.
    pub const INT: TypeHash = TypeHash(0x17df5a2680b3e9fc);

    /// Hash for `unsigned int`.
    pub const UINT: TypeHash = TypeHash(0x28e06b3791c4fa0d);

    /// Hash for `long`.
    pub const LONG: TypeHash = TypeHash(0x39f17c48a2d50b1e);

    /// Hash for `unsigned long`.
    pub const ULONG: TypeHash = TypeHash(0x4a028d59b3e61c2f);

    /// Hash for `long long`.
    pub const LONG_LONG: TypeHash = TypeHash(0x5b139e6ac4f72d40);

    /// Hash for `unsigned long long`.
    pub const ULONG_LONG: TypeHash = TypeHash(0x6c24af7bd6083e51);

    /// Hash for `float`.
    pub const FLOAT: TypeHash = TypeHash(0x7d35b08ce7194f62);

    /// Hash for `double`.
    pub const DOUBLE: TypeHash = TypeHash(0x8e46c19df82a5073);

    /// Hash for `long double`.
    pub const LONG_DOUBLE: TypeHash = TypeHash(0x9f57d2ae093b6184);

    /// Hash for `std::nullptr_t` (the type of `nullptr`).
    pub const NULLPTR: TypeHash = TypeHash(0xb068e3bf1a4c7295);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_hash_determinism() {
        let a = TypeHash::from_name("int");
        let b = TypeHash::from_name("int");
        assert_eq!(a, b);

        let c = TypeHash::from_name("geo::Point");
        let d = TypeHash::from_name("geo::Point");
        assert_eq!(c, d);
    }

    #[test]
    fn type_hash_uniqueness() {
        let int_hash = TypeHash::from_name("int");
        let float_hash = TypeHash::from_name("float");
        let point_hash = TypeHash::from_name("Point");

        assert_ne!(int_hash, float_hash);
        assert_ne!(int_hash, point_hash);
        assert_ne!(float_hash, point_hash);
    }

    #[test]
    fn function_hash_overload_distinction() {
        let int_hash = TypeHash::from_name("int");
        let float_hash = TypeHash::from_name("float");

        let f_int = TypeHash::from_function("print", &[int_hash]);
        let f_float = TypeHash::from_function("print", &[float_hash]);
        let f_two = TypeHash::from_function("print", &[int_hash, float_hash]);

        assert_ne!(f_int, f_float);
        assert_ne!(f_int, f_two);
        assert_ne!(f_float, f_two);
    }

    #[test]
    fn function_hash_parameter_order_matters() {
        let int_hash = TypeHash::from_name("int");
        let float_hash = TypeHash::from_name("float");

        let f1 = TypeHash::from_function("foo", &[int_hash, float_hash]);
        let f2 = TypeHash::from_function("foo", &[float_hash, int_hash]);
        assert_ne!(f1, f2);
    }

    #[test]
    fn method_const_qualification_distinct() {
        let owner = TypeHash::from_name("Widget");
        let m1 = TypeHash::from_method(owner, "size", &[], false);
        let m2 = TypeHash::from_method(owner, "size", &[], true);
        assert_ne!(m1, m2);
    }

    #[test]
    fn method_distinct_from_free_function() {
        let owner = TypeHash::from_name("Widget");
        let m = TypeHash::from_method(owner, "draw", &[], false);
        let f = TypeHash::from_function("draw", &[]);
        assert_ne!(m, f);
    }

    #[test]
    fn constructor_hash_per_signature() {
        let owner = TypeHash::from_name("Widget");
        let c0 = TypeHash::from_constructor(owner, &[]);
        let c1 = TypeHash::from_constructor(owner, &[builtins::INT]);
        assert_ne!(c0, c1);
    }

    #[test]
    fn conversion_operator_hash_per_result() {
        let owner = TypeHash::from_name("Rational");
        let to_int = TypeHash::from_operator(owner, builtins::INT, true);
        let to_double = TypeHash::from_operator(owner, builtins::DOUBLE, true);
        assert_ne!(to_int, to_double);
    }

    #[test]
    fn builtins_are_distinct() {
        let all = [
            builtins::VOID,
            builtins::BOOL,
            builtins::CHAR,
            builtins::SCHAR,
            builtins::UCHAR,
            builtins::SHORT,
            builtins::USHORT,
            builtins::INT,
            builtins::UINT,
            builtins::LONG,
            builtins::ULONG,
            builtins::LONG_LONG,
            builtins::ULONG_LONG,
            builtins::FLOAT,
            builtins::DOUBLE,
            builtins::LONG_DOUBLE,
            builtins::NULLPTR,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn empty_hash() {
        assert!(TypeHash::EMPTY.is_empty());
        assert!(!TypeHash::from_name("int").is_empty());
    }
}
