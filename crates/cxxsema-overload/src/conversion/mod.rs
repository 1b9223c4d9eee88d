//! Implicit conversion sequences.
//!
//! This module builds the [`ConversionCost`] for a single (argument,
//! target-type) pair. A sequence is discovered in this order:
//!
//! 1. Reference binding (when the target is a reference)
//! 2. Standard conversions (identity, qualification, promotion,
//!    conversion, pointer, boolean, derived-to-base)
//! 3. At most one user-defined conversion (constructor or conversion
//!    operator), governed by [`UdcMode`]
//!
//! Initialization contexts that postpone the user-defined-conversion
//! choice pass a [`UdcMode::Defer`] and later resolve the produced cost
//! with [`resolve_deferred_udc`] before any comparison happens.

pub mod reference;
pub mod standard;
pub mod user_defined;

use cxxsema_core::{Argument, DataType};
use cxxsema_registry::TypeRegistry;

pub use reference::bind_reference;
pub use standard::standard_conversion;
pub use user_defined::find_user_conversion;

use crate::cost::{ConversionCost, DeferredUdc, Rank, SequenceCost};

use self::reference::{can_bind_temporary, temporary_binding_kind};
use self::standard::is_class;

/// Whether a user-defined conversion may participate in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UdcMode {
    /// User-defined conversions are searched and ranked.
    Allowed,
    /// Standard conversions only (used for the legs of a user-defined
    /// conversion, which may not chain).
    Forbidden,
    /// Produce a deferred cost instead of searching; the initialization
    /// context resolves it later.
    Defer(DeferredUdc),
}

/// Build the implicit conversion sequence from `arg` to `target`.
pub fn implicit_conversion_sequence(
    arg: &Argument,
    target: &DataType,
    udc_mode: UdcMode,
    registry: &TypeRegistry,
) -> ConversionCost {
    let direct = if target.is_reference() {
        reference::bind_reference(arg, target, registry)
    } else {
        standard::standard_conversion(arg, target, registry)
    };
    if direct.converts() {
        return direct;
    }

    // Only class types bring user-defined conversions into play.
    let value_target = target.referenced();
    let source = arg.data_type;
    let class_involved = (source.indirection == 0 && is_class(source.type_hash, registry))
        || (value_target.indirection == 0 && is_class(value_target.type_hash, registry));
    if !class_involved {
        return ConversionCost::NoConversion;
    }

    match udc_mode {
        UdcMode::Forbidden => ConversionCost::NoConversion,
        UdcMode::Defer(kind) => {
            debug_assert!(kind != DeferredUdc::None, "deferring without a context");
            let mut cost = SequenceCost::new(source, *target, Rank::UserDefined);
            cost.set_deferred_udc(kind);
            cost.into()
        }
        UdcMode::Allowed => {
            let cost = user_defined::find_user_conversion(arg, &value_target, registry);
            if !target.is_reference() {
                return cost;
            }
            // The user conversion produced a temporary; it still has to
            // bind to the reference target.
            match cost {
                ConversionCost::Sequence(mut cost) if can_bind_temporary(target) => {
                    cost.set_reference_binding(temporary_binding_kind(target));
                    cost.into()
                }
                _ => ConversionCost::NoConversion,
            }
        }
    }
}

/// Resolve a deferred user-defined conversion into a concrete cost.
///
/// Costs carrying a deferral tag are structurally incomparable; callers
/// resolve them against the original argument before ranking. Costs
/// without a deferral pass through unchanged.
pub fn resolve_deferred_udc(
    cost: &ConversionCost,
    arg: &Argument,
    registry: &TypeRegistry,
) -> ConversionCost {
    match cost {
        ConversionCost::Sequence(seq) if cost.is_deferred_udc() => {
            implicit_conversion_sequence(arg, &seq.target(), UdcMode::Allowed, registry)
        }
        other => other.clone(),
    }
}
