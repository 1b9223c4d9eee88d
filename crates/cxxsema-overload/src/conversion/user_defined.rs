//! User-defined conversions.
//!
//! When no standard conversion sequence reaches the target, a single
//! user-defined conversion may bridge the gap:
//!
//! - a converting constructor of a class target, or
//! - a conversion operator of a class source.
//!
//! Each candidate contributes a standard-conversion leg (argument to
//! constructor parameter, or operator result to target) built with further
//! user conversions forbidden. The best leg wins; a tie between different
//! functions marks the result ambiguous.

use std::cmp::Ordering;

use cxxsema_core::{Argument, DataType, RefKind, TypeHash};
use cxxsema_registry::TypeRegistry;

use crate::cost::{ConversionCost, SequenceCost};

use super::{UdcMode, implicit_conversion_sequence};

/// Find a user-defined conversion from `arg` to the (non-reference)
/// `target` value type.
pub fn find_user_conversion(
    arg: &Argument,
    target: &DataType,
    registry: &TypeRegistry,
) -> ConversionCost {
    debug_assert!(!target.is_reference());

    let mut selection = Selection::default();

    collect_converting_constructors(arg, target, registry, &mut selection);
    collect_conversion_operators(arg, target, registry, &mut selection);

    match selection.best {
        None => ConversionCost::NoConversion,
        Some((function, mut cost)) => {
            cost.set_user_defined_conversion(function);
            if selection.ambiguous {
                cost.set_ambiguous_udc(true);
            }
            cost.into()
        }
    }
}

/// Running best candidate while scanning conversion functions.
#[derive(Default)]
struct Selection {
    best: Option<(TypeHash, SequenceCost)>,
    ambiguous: bool,
}

impl Selection {
    fn consider(&mut self, function: TypeHash, leg: SequenceCost) {
        match &self.best {
            None => {
                self.best = Some((function, leg));
            }
            Some((_, current)) => {
                let challenger = ConversionCost::from(leg.clone());
                match challenger.compare(&ConversionCost::from(current.clone())) {
                    Ordering::Less => {
                        self.best = Some((function, leg));
                        self.ambiguous = false;
                    }
                    Ordering::Equal => self.ambiguous = true,
                    Ordering::Greater => {}
                }
            }
        }
    }
}

/// Single-argument constructors of a class target.
fn collect_converting_constructors(
    arg: &Argument,
    target: &DataType,
    registry: &TypeRegistry,
    selection: &mut Selection,
) {
    if target.indirection != 0 {
        return;
    }
    let Some(class) = registry.get_type(target.type_hash).and_then(|t| t.as_class()) else {
        return;
    };
    for &ctor in &class.constructors {
        let Some(entry) = registry.get_function(ctor) else {
            continue;
        };
        let def = &entry.def;
        if def.params.len() != 1 {
            continue;
        }
        let leg =
            implicit_conversion_sequence(arg, &def.params[0].data_type, UdcMode::Forbidden, registry);
        if let ConversionCost::Sequence(leg) = leg {
            selection.consider(def.func_hash, leg);
        }
    }
}

/// Conversion operators of a class source.
fn collect_conversion_operators(
    arg: &Argument,
    target: &DataType,
    registry: &TypeRegistry,
    selection: &mut Selection,
) {
    let source = arg.data_type;
    if source.indirection != 0 {
        return;
    }
    let Some(class) = registry.get_type(source.type_hash).and_then(|t| t.as_class()) else {
        return;
    };
    for &op in &class.conversion_operators {
        let Some(entry) = registry.get_function(op) else {
            continue;
        };
        let def = &entry.def;
        // a const source object only reaches const-qualified operators
        if source.is_const() && !def.is_const {
            continue;
        }
        let result = def.return_type;
        let result_arg = match result.ref_kind {
            RefKind::None => Argument::rvalue(result),
            RefKind::Lvalue => Argument::lvalue(result.referenced()),
            RefKind::Rvalue => Argument::xvalue(result.referenced()),
        };
        let leg = implicit_conversion_sequence(&result_arg, target, UdcMode::Forbidden, registry);
        if let ConversionCost::Sequence(leg) = leg {
            selection.consider(def.func_hash, leg);
        }
    }
}
