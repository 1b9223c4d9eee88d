//! Core types for the cxxsema semantic-analysis engine.
//!
//! This crate defines the vocabulary the conversion-ranking engine speaks:
//!
//! - [`TypeHash`]: deterministic 64-bit identity for types and functions
//! - [`DataType`]: a complete type (qualifiers, indirection, references)
//! - [`BasicKind`]: classification of the fundamental arithmetic types
//! - [`Argument`] / [`ValueCategory`] / [`ConstantValue`]: the value model
//!   of call arguments
//! - entry types ([`ClassEntry`], [`EnumEntry`], [`FunctionEntry`], ...)
//!   that the registry stores
//! - [`Span`] and the error enums
//!
//! Nothing here performs analysis; the ranking engine lives in
//! `cxxsema-overload` and the storage in `cxxsema-registry`.

mod basic;
mod data_type;
mod entries;
mod error;
mod span;
mod type_hash;
mod value;

pub use basic::{BasicKind, basic_kind, builtin_hash};
pub use data_type::{DataType, QUALIFICATION_DEPTH, Qualifiers, RefKind};
pub use entries::{
    BasicEntry, ClassEntry, EnumEntry, FunctionDef, FunctionEntry, FunctionKind, Param, TypeEntry,
};
pub use error::{RegistrationError, SemaError};
pub use span::Span;
pub use type_hash::{TypeHash, builtins, hash_constants};
pub use value::{Argument, ConstantValue, ValueCategory};
