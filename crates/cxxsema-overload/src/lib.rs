//! Implicit-conversion ranking and overload resolution.
//!
//! This crate is the core of cxxsema: given the type-system facts stored in
//! a [`cxxsema_registry::TypeRegistry`], it decides whether an argument
//! converts to a parameter type, how good that conversion is, and which of
//! several candidate functions best matches a call.
//!
//! ## Modules
//!
//! - [`cost`]: [`ConversionCost`] - the ranking value type and its
//!   partial-preorder comparison
//! - [`conversion`]: the implicit-conversion-sequence builder (standard
//!   conversions, reference binding, user-defined conversions)
//! - [`overload`]: the candidate driver (viability, domination ranking,
//!   ambiguity reporting)
//!
//! ## Example
//!
//! ```
//! use cxxsema_core::{Argument, DataType, FunctionDef, FunctionEntry, Param, Span, builtins};
//! use cxxsema_registry::TypeRegistry;
//! use cxxsema_overload::{Rank, resolve_overload};
//!
//! let mut registry = TypeRegistry::with_builtins();
//! let int_overload = FunctionDef::free(
//!     "absolute",
//!     vec![Param::new("v", DataType::simple(builtins::INT))],
//!     DataType::simple(builtins::INT),
//! );
//! let double_overload = FunctionDef::free(
//!     "absolute",
//!     vec![Param::new("v", DataType::simple(builtins::DOUBLE))],
//!     DataType::simple(builtins::DOUBLE),
//! );
//! let h_int = registry.register_function(FunctionEntry::free(int_overload)).unwrap();
//! let h_double = registry.register_function(FunctionEntry::free(double_overload)).unwrap();
//!
//! let args = [Argument::rvalue(DataType::simple(builtins::INT))];
//! let best = resolve_overload(&[h_int, h_double], &args, &registry, Span::default()).unwrap();
//! assert_eq!(best.func_hash, h_int);
//! assert_eq!(best.arg_costs[0].as_ref().unwrap().rank(), Rank::Identity);
//! ```

pub mod conversion;
pub mod cost;
pub mod overload;

pub use conversion::{
    UdcMode, bind_reference, find_user_conversion, implicit_conversion_sequence,
    resolve_deferred_udc, standard_conversion,
};
pub use cost::{ConversionCost, DeferredUdc, Rank, ReferenceBinding, SequenceCost};
pub use overload::{OverloadMatch, find_best_match, resolve_method_overload, resolve_overload};
