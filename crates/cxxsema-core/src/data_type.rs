//! DataType - a C++ type with qualifiers, indirection, and reference kind.
//!
//! This module provides [`DataType`], a compact `Copy` value describing a
//! complete type as the conversion engine sees it: the base type identity,
//! cv-qualifiers at each indirection level, the number of pointer levels,
//! and whether the type is an lvalue or rvalue reference. This is distinct
//! from [`TypeHash`](crate::TypeHash), which only identifies the base type.
//!
//! # Example
//!
//! ```
//! use cxxsema_core::{DataType, Qualifiers, RefKind, builtins};
//!
//! // int
//! let int_ty = DataType::simple(builtins::INT);
//!
//! // const int
//! let const_int = DataType::with_const(builtins::INT);
//! assert!(const_int.quals_at(0).contains(Qualifiers::CONST));
//!
//! // const int *  (pointer to const int)
//! let ptr = DataType::with_const(builtins::INT).pointer_to();
//! assert!(ptr.is_pointer());
//! assert!(ptr.quals_at(1).contains(Qualifiers::CONST));
//!
//! // const int &
//! let cref = DataType::with_const(builtins::INT).lvalue_ref_to();
//! assert_eq!(cref.ref_kind, RefKind::Lvalue);
//! ```

use std::fmt::{self, Display, Formatter};

use bitflags::bitflags;

use crate::TypeHash;

/// Number of indirection levels for which qualifiers are tracked.
///
/// Level 0 is the value itself; level k is the pointee k pointers down.
/// Qualification adjustments use 3 bits per level with this same depth, so
/// deeper levels clamp to the last tracked slot.
pub const QUALIFICATION_DEPTH: usize = 3;

bitflags! {
    /// A set of C++ cv-qualifiers (plus `restrict`, tracked the same way).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Qualifiers: u8 {
        const CONST = 0b001;
        const VOLATILE = 0b010;
        const RESTRICT = 0b100;
    }
}

/// How (if at all) a type is a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefKind {
    /// Not a reference.
    #[default]
    None,
    /// Lvalue reference (`T &`).
    Lvalue,
    /// Rvalue reference (`T &&`).
    Rvalue,
}

/// A complete type: base identity, per-level qualifiers, indirection,
/// reference kind.
///
/// `Copy` by design; conversion analysis passes these around freely without
/// allocation. Pointer indirection beyond [`QUALIFICATION_DEPTH`] levels is
/// counted but its qualifiers collapse into the deepest tracked slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    /// The base type identity.
    pub type_hash: TypeHash,

    /// Qualifiers per level: `cv[0]` is the top level, `cv[k]` the pointee
    /// at depth k.
    pub cv: [Qualifiers; QUALIFICATION_DEPTH],

    /// Number of pointer levels (`int` = 0, `int*` = 1, `int**` = 2).
    pub indirection: u8,

    /// Reference kind at the top level.
    pub ref_kind: RefKind,
}

impl DataType {
    /// Create an unqualified, non-pointer, non-reference type.
    #[inline]
    pub const fn simple(type_hash: TypeHash) -> Self {
        Self {
            type_hash,
            cv: [Qualifiers::empty(); QUALIFICATION_DEPTH],
            indirection: 0,
            ref_kind: RefKind::None,
        }
    }

    /// Create a const-qualified type.
    #[inline]
    pub const fn with_const(type_hash: TypeHash) -> Self {
        let mut dt = Self::simple(type_hash);
        dt.cv[0] = Qualifiers::CONST;
        dt
    }

    /// A pointer to this type. The existing levels shift one deeper and the
    /// new top level starts unqualified. Must not be applied to a reference.
    #[inline]
    pub fn pointer_to(self) -> Self {
        debug_assert!(
            self.ref_kind == RefKind::None,
            "pointers to references do not exist"
        );
        let mut cv = [Qualifiers::empty(); QUALIFICATION_DEPTH];
        for level in 0..QUALIFICATION_DEPTH - 1 {
            cv[level + 1] = self.cv[level];
        }
        // the level falling off the end folds into the deepest tracked slot
        cv[QUALIFICATION_DEPTH - 1] |= self.cv[QUALIFICATION_DEPTH - 1];
        Self {
            cv,
            indirection: self.indirection.saturating_add(1),
            ..self
        }
    }

    /// The pointee of this pointer type (inverse of [`Self::pointer_to`]).
    #[inline]
    pub fn pointee(self) -> Self {
        debug_assert!(self.indirection > 0, "pointee of a non-pointer type");
        let mut cv = [Qualifiers::empty(); QUALIFICATION_DEPTH];
        for level in 1..QUALIFICATION_DEPTH {
            cv[level - 1] = self.cv[level];
        }
        Self {
            cv,
            indirection: self.indirection - 1,
            ..self
        }
    }

    /// An lvalue reference to this type.
    #[inline]
    pub fn lvalue_ref_to(self) -> Self {
        debug_assert!(self.ref_kind == RefKind::None, "references do not nest");
        Self {
            ref_kind: RefKind::Lvalue,
            ..self
        }
    }

    /// An rvalue reference to this type.
    #[inline]
    pub fn rvalue_ref_to(self) -> Self {
        debug_assert!(self.ref_kind == RefKind::None, "references do not nest");
        Self {
            ref_kind: RefKind::Rvalue,
            ..self
        }
    }

    /// A copy with CONST added at the top level.
    #[inline]
    pub fn as_const(mut self) -> Self {
        self.cv[0] |= Qualifiers::CONST;
        self
    }

    /// A copy with VOLATILE added at the top level.
    #[inline]
    pub fn as_volatile(mut self) -> Self {
        self.cv[0] |= Qualifiers::VOLATILE;
        self
    }

    /// A copy with no top-level qualifiers.
    #[inline]
    pub fn without_top_quals(mut self) -> Self {
        self.cv[0] = Qualifiers::empty();
        self
    }

    /// A copy with the reference stripped (the referenced type).
    #[inline]
    pub fn referenced(mut self) -> Self {
        self.ref_kind = RefKind::None;
        self
    }

    /// Qualifiers at the given level, clamped to the tracked depth.
    #[inline]
    pub fn quals_at(&self, level: usize) -> Qualifiers {
        self.cv[level.min(QUALIFICATION_DEPTH - 1)]
    }

    #[inline]
    pub const fn is_reference(&self) -> bool {
        !matches!(self.ref_kind, RefKind::None)
    }

    #[inline]
    pub const fn is_pointer(&self) -> bool {
        self.indirection > 0 && matches!(self.ref_kind, RefKind::None)
    }

    /// True when the top level carries CONST.
    #[inline]
    pub fn is_const(&self) -> bool {
        self.cv[0].contains(Qualifiers::CONST)
    }

    /// True when base type and indirection match, ignoring qualifiers and
    /// reference kind. The precondition for qualification conversions.
    #[inline]
    pub fn same_shape(&self, other: &DataType) -> bool {
        self.type_hash == other.type_hash && self.indirection == other.indirection
    }

    #[inline]
    pub const fn is_void(&self) -> bool {
        self.type_hash.0 == crate::builtins::VOID.0 && self.indirection == 0
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // Innermost level first: "const <base> * const &" style. Base names
        // are hashes here; a registry lookup is needed for readable names.
        let deepest = (self.indirection as usize).min(QUALIFICATION_DEPTH - 1);
        write_quals(f, self.cv[deepest])?;
        write!(f, "{}", self.type_hash)?;
        for level in (0..self.indirection as usize).rev() {
            write!(f, " *")?;
            if level < deepest {
                let quals = self.cv[level];
                if quals.contains(Qualifiers::CONST) {
                    write!(f, " const")?;
                }
                if quals.contains(Qualifiers::VOLATILE) {
                    write!(f, " volatile")?;
                }
                if quals.contains(Qualifiers::RESTRICT) {
                    write!(f, " restrict")?;
                }
            }
        }
        match self.ref_kind {
            RefKind::None => {}
            RefKind::Lvalue => write!(f, " &")?,
            RefKind::Rvalue => write!(f, " &&")?,
        }
        Ok(())
    }
}

fn write_quals(f: &mut Formatter<'_>, quals: Qualifiers) -> fmt::Result {
    if quals.contains(Qualifiers::CONST) {
        write!(f, "const ")?;
    }
    if quals.contains(Qualifiers::VOLATILE) {
        write!(f, "volatile ")?;
    }
    if quals.contains(Qualifiers::RESTRICT) {
        write!(f, "restrict ")?;
    }
    Ok(())
}
