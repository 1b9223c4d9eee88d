//! Standard conversion sequences.
//!
//! Classifies a conversion from an argument's type to a non-reference
//! target type into the standard categories: identity and qualification
//! adjustment, integral/floating promotion, arithmetic conversion, pointer
//! conversion, boolean conversion, and derived-to-base adjustment. The
//! result is a [`SequenceCost`] carrying the rank plus the tie-break data
//! (qualification adjustments, inheritance distance, narrowing flag).

use cxxsema_core::{
    Argument, BasicKind, ConstantValue, DataType, QUALIFICATION_DEPTH, TypeHash, basic_kind,
    builtins,
};
use cxxsema_registry::TypeRegistry;

use crate::cost::{ConversionCost, Rank, SequenceCost};

/// Find a standard conversion sequence from `arg` to a non-reference
/// `target`. Returns [`ConversionCost::NoConversion`] when only a
/// user-defined conversion (or nothing) could bridge the types.
pub fn standard_conversion(
    arg: &Argument,
    target: &DataType,
    registry: &TypeRegistry,
) -> ConversionCost {
    debug_assert!(!target.is_reference());
    debug_assert!(!arg.data_type.is_reference());

    let source = arg.data_type;

    // Identity, possibly with qualification adjustment.
    if source.same_shape(target) {
        let mut cost = SequenceCost::new(source, *target, Rank::Identity);
        cost.set_constant_value(arg.constant);
        if widen_qualifiers(&source, target, true, &mut cost) {
            return cost.into();
        }
        // Same shape but a pointee-level qualifier would be dropped; no
        // other conversion category can apply between identical shapes.
        return ConversionCost::NoConversion;
    }

    if let Some(cost) = arithmetic_conversion(arg, target, registry) {
        return cost;
    }
    if let Some(cost) = pointer_conversion(arg, target, registry) {
        return cost;
    }
    if let Some(cost) = class_value_conversion(&source, target, registry) {
        return cost;
    }

    ConversionCost::NoConversion
}

/// Check that `target` only widens qualifiers relative to `source`,
/// recording each widened level as a qualification adjustment.
///
/// Dropping a qualifier at the top level is a plain copy and is tolerated
/// when `allow_top_level_loss` is set (by-value passing); dropping one at a
/// pointee level breaks const-correctness and fails the conversion.
pub(crate) fn widen_qualifiers(
    source: &DataType,
    target: &DataType,
    allow_top_level_loss: bool,
    cost: &mut SequenceCost,
) -> bool {
    let levels = (target.indirection as usize).min(QUALIFICATION_DEPTH - 1);
    for level in 0..=levels {
        let lost = source.quals_at(level) - target.quals_at(level);
        if !lost.is_empty() && !(level == 0 && allow_top_level_loss) {
            return false;
        }
        let added = target.quals_at(level) - source.quals_at(level);
        if !added.is_empty() {
            cost.add_qualification_adjustment(level, added);
        }
    }
    true
}

/// Promotions and arithmetic conversions between builtin kinds, with
/// unscoped enums entering through their underlying type.
fn arithmetic_conversion(
    arg: &Argument,
    target: &DataType,
    registry: &TypeRegistry,
) -> Option<ConversionCost> {
    let source = arg.data_type;
    if source.indirection != 0 || target.indirection != 0 {
        return None;
    }
    let target_kind = basic_kind(target.type_hash)?;

    let (source_kind, from_enum) = if let Some(kind) = basic_kind(source.type_hash) {
        (kind, false)
    } else {
        let entry = registry.get_type(source.type_hash)?.as_enum()?;
        (basic_kind(entry.underlying)?, true)
    };

    let rank = if from_enum {
        // An unscoped enum promotes to int (or to its fixed underlying
        // type); every other arithmetic target is a conversion.
        if target_kind == BasicKind::Int || target_kind == source_kind {
            Rank::Promotion
        } else {
            Rank::Conversion
        }
    } else if is_promotion(source_kind, target_kind) {
        Rank::Promotion
    } else {
        Rank::Conversion
    };

    let mut cost = SequenceCost::new(source, *target, rank);
    cost.set_constant_value(arg.constant);
    if rank == Rank::Conversion && is_potentially_narrowing(source_kind, target_kind) {
        cost.set_could_narrow();
    }
    Some(cost.into())
}

fn is_promotion(source: BasicKind, target: BasicKind) -> bool {
    source != target && source.promoted() == target
}

/// Whether a `source -> target` arithmetic conversion is potentially
/// narrowing under list-initialization rules. Promotions never reach this.
fn is_potentially_narrowing(source: BasicKind, target: BasicKind) -> bool {
    match (source.is_floating(), target.is_floating()) {
        // floating -> shorter floating loses precision
        (true, true) => target.bit_width() < source.bit_width(),
        // floating -> integral always narrows
        (true, false) => true,
        // integral -> floating narrows unless the value is known exact
        (false, true) => true,
        (false, false) => !target.contains_all_values_of(source),
    }
}

/// Pointer conversions: null pointer constants, object pointers to
/// `void *`, derived-to-base pointers, and pointers to `bool`.
fn pointer_conversion(
    arg: &Argument,
    target: &DataType,
    registry: &TypeRegistry,
) -> Option<ConversionCost> {
    let source = arg.data_type;

    // Pointer (or nullptr) to bool ranks below other conversions.
    if target.indirection == 0 {
        if target.type_hash == builtins::BOOL
            && (source.is_pointer() || is_nullptr(&source))
        {
            let mut cost = SequenceCost::new(source, *target, Rank::ConversionPtrBool);
            cost.set_constant_value(arg.constant);
            return Some(cost.into());
        }
        return None;
    }

    // Null pointer constant to any pointer type.
    if is_null_pointer_constant(arg) {
        return Some(SequenceCost::new(source, *target, Rank::Conversion).into());
    }

    if !source.is_pointer() {
        return None;
    }

    // Object pointer to void pointer.
    if target.indirection == 1 && source.indirection == 1 && target.type_hash == builtins::VOID {
        let mut cost = SequenceCost::new(source, *target, Rank::Conversion);
        if widen_qualifiers(&source, target, true, &mut cost) {
            return Some(cost.into());
        }
        return None;
    }

    // Derived pointer to base pointer, with inheritance distance.
    if target.indirection == 1 && source.indirection == 1 {
        let distance = registry.inheritance_distance(source.type_hash, target.type_hash)?;
        if distance == 0 {
            return None; // same type; identity handled earlier
        }
        let mut cost = SequenceCost::new(source, *target, Rank::Conversion);
        cost.set_inheritance_distance(distance);
        if widen_qualifiers(&source, target, true, &mut cost) {
            return Some(cost.into());
        }
        return None;
    }

    None
}

fn is_nullptr(dt: &DataType) -> bool {
    dt.indirection == 0 && dt.type_hash == builtins::NULLPTR
}

fn is_null_pointer_constant(arg: &Argument) -> bool {
    if is_nullptr(&arg.data_type) {
        return true;
    }
    // the literal 0
    arg.data_type.indirection == 0
        && basic_kind(arg.data_type.type_hash).is_some_and(BasicKind::is_integral)
        && matches!(arg.constant, Some(ConstantValue::Int(0)))
}

/// Derived-to-base conversion of a class value (slicing copy).
fn class_value_conversion(
    source: &DataType,
    target: &DataType,
    registry: &TypeRegistry,
) -> Option<ConversionCost> {
    if source.indirection != 0 || target.indirection != 0 {
        return None;
    }
    is_class(source.type_hash, registry).then_some(())?;
    let distance = registry.inheritance_distance(source.type_hash, target.type_hash)?;
    if distance == 0 {
        return None;
    }
    let mut cost = SequenceCost::new(*source, *target, Rank::Conversion);
    cost.set_inheritance_distance(distance);
    Some(cost.into())
}

pub(crate) fn is_class(hash: TypeHash, registry: &TypeRegistry) -> bool {
    registry
        .get_type(hash)
        .is_some_and(|t| t.as_class().is_some())
}
