//! cxxsema - implicit-conversion ranking and overload resolution for C++
//! semantic analysis.
//!
//! For a candidate function call, cxxsema determines whether an implicit
//! conversion sequence exists between each argument and its parameter,
//! ranks those sequences the way the C++ standard ranks them, and selects
//! the best candidate among overloads (or reports the call ambiguous).
//!
//! The workspace splits into three crates, re-exported here:
//!
//! - `cxxsema-core`: type identity, type representation, argument model,
//!   registry entries, errors
//! - `cxxsema-registry`: the type/function store and inheritance queries
//! - `cxxsema-overload`: conversion costs, the sequence builder, and the
//!   overload driver
//!
//! ## Example
//!
//! ```
//! use cxxsema::prelude::*;
//!
//! let mut registry = TypeRegistry::with_builtins();
//! let int_fn = FunctionDef::free(
//!     "emit",
//!     vec![Param::new("v", DataType::simple(builtins::INT))],
//!     DataType::simple(builtins::VOID),
//! );
//! let double_fn = FunctionDef::free(
//!     "emit",
//!     vec![Param::new("v", DataType::simple(builtins::DOUBLE))],
//!     DataType::simple(builtins::VOID),
//! );
//! let h_int = registry.register_function(FunctionEntry::free(int_fn)).unwrap();
//! let h_double = registry.register_function(FunctionEntry::free(double_fn)).unwrap();
//!
//! // A short argument promotes to int, which beats converting to double.
//! let args = [Argument::rvalue(DataType::simple(builtins::SHORT))];
//! let best = resolve_overload(&[h_int, h_double], &args, &registry, Span::default()).unwrap();
//! assert_eq!(best.func_hash, h_int);
//! ```

pub use cxxsema_core::{
    Argument, BasicEntry, BasicKind, ClassEntry, ConstantValue, DataType, EnumEntry, FunctionDef,
    FunctionEntry, FunctionKind, Param, QUALIFICATION_DEPTH, Qualifiers, RefKind,
    RegistrationError, SemaError, Span, TypeEntry, TypeHash, ValueCategory, basic_kind,
    builtin_hash, builtins,
};
pub use cxxsema_overload::{
    ConversionCost, DeferredUdc, OverloadMatch, Rank, ReferenceBinding, SequenceCost, UdcMode,
    bind_reference, find_best_match, find_user_conversion, implicit_conversion_sequence,
    resolve_deferred_udc, resolve_method_overload, resolve_overload, standard_conversion,
};
pub use cxxsema_registry::TypeRegistry;

/// Everything most callers need.
pub mod prelude {
    pub use cxxsema_core::{
        Argument, ClassEntry, ConstantValue, DataType, EnumEntry, FunctionDef, FunctionEntry,
        Param, Qualifiers, RefKind, SemaError, Span, TypeHash, ValueCategory, builtins,
    };
    pub use cxxsema_overload::{
        ConversionCost, DeferredUdc, OverloadMatch, Rank, ReferenceBinding, UdcMode,
        implicit_conversion_sequence, resolve_deferred_udc, resolve_method_overload,
        resolve_overload,
    };
    pub use cxxsema_registry::TypeRegistry;
}
