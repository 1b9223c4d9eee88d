//! Reference binding.
//!
//! Determines whether (and how well) an argument binds to a reference
//! parameter: direct binding for reference-compatible types, temporary
//! materialization for const lvalue references and rvalue references, and
//! the [`ReferenceBinding`] record used later as a tie-break.

use cxxsema_core::{Argument, DataType, Qualifiers, RefKind, ValueCategory};
use cxxsema_registry::TypeRegistry;

use crate::cost::{ConversionCost, Rank, ReferenceBinding, SequenceCost};

use super::standard::{standard_conversion, widen_qualifiers};

/// Find a binding of `arg` to the reference type `target`.
pub fn bind_reference(
    arg: &Argument,
    target: &DataType,
    registry: &TypeRegistry,
) -> ConversionCost {
    debug_assert!(target.is_reference());
    let inner = target.referenced();
    let source = arg.data_type;

    let direct_allowed = match target.ref_kind {
        // A non-const lvalue reference needs an lvalue; a const one also
        // accepts rvalues.
        RefKind::Lvalue => {
            arg.value_category == ValueCategory::Lvalue || is_const_not_volatile(&inner)
        }
        RefKind::Rvalue => arg.value_category.is_rvalue(),
        RefKind::None => unreachable!("bind_reference requires a reference target"),
    };

    if direct_allowed {
        if let Some(mut cost) = direct_binding(arg, target, &inner, registry) {
            cost.set_reference_binding(direct_binding_kind(target, arg));
            return cost.into();
        }
    }

    // No direct binding; const lvalue references and rvalue references can
    // bind a converted temporary instead.
    if !can_bind_temporary(target) {
        return ConversionCost::NoConversion;
    }
    // An rvalue reference never binds an lvalue of a reference-related
    // type, not even through a temporary.
    if target.ref_kind == RefKind::Rvalue
        && arg.value_category == ValueCategory::Lvalue
        && reference_related(&source, &inner, registry)
    {
        return ConversionCost::NoConversion;
    }

    match standard_conversion(arg, &inner.without_top_quals(), registry) {
        ConversionCost::Sequence(mut cost) => {
            cost.set_reference_binding(temporary_binding_kind(target));
            cost.into()
        }
        ConversionCost::NoConversion => ConversionCost::NoConversion,
    }
}

/// Direct binding for reference-compatible types: same shape, or a class
/// whose base the reference names, with qualifiers only widening.
fn direct_binding(
    arg: &Argument,
    target: &DataType,
    inner: &DataType,
    registry: &TypeRegistry,
) -> Option<SequenceCost> {
    let source = arg.data_type;

    if source.same_shape(inner) {
        let mut cost = SequenceCost::new(source, *target, Rank::Identity);
        cost.set_constant_value(arg.constant);
        widen_qualifiers(&source, inner, false, &mut cost).then_some(cost)
    } else if source.indirection == 0 && inner.indirection == 0 {
        let distance = registry
            .inheritance_distance(source.type_hash, inner.type_hash)
            .filter(|&d| d > 0)?;
        let mut cost = SequenceCost::new(source, *target, Rank::Conversion);
        cost.set_inheritance_distance(distance);
        widen_qualifiers(&source, inner, false, &mut cost).then_some(cost)
    } else {
        None
    }
}

fn direct_binding_kind(target: &DataType, arg: &Argument) -> ReferenceBinding {
    match target.ref_kind {
        RefKind::Lvalue => ReferenceBinding::LvalueRef,
        RefKind::Rvalue if arg.value_category.is_rvalue() => {
            ReferenceBinding::RvalueRefBindsRvalue
        }
        RefKind::Rvalue => ReferenceBinding::OtherRef,
        RefKind::None => ReferenceBinding::NoRef,
    }
}

/// The binding kind when a materialized temporary is bound: the temporary
/// is an rvalue, so an rvalue reference still binds an rvalue.
pub(crate) fn temporary_binding_kind(target: &DataType) -> ReferenceBinding {
    match target.ref_kind {
        RefKind::Lvalue => ReferenceBinding::LvalueRef,
        RefKind::Rvalue => ReferenceBinding::RvalueRefBindsRvalue,
        RefKind::None => ReferenceBinding::NoRef,
    }
}

/// Whether the reference can bind a materialized temporary at all.
pub(crate) fn can_bind_temporary(target: &DataType) -> bool {
    match target.ref_kind {
        RefKind::Lvalue => is_const_not_volatile(&target.referenced()),
        RefKind::Rvalue => true,
        RefKind::None => false,
    }
}

fn is_const_not_volatile(inner: &DataType) -> bool {
    let quals = inner.quals_at(0);
    quals.contains(Qualifiers::CONST) && !quals.contains(Qualifiers::VOLATILE)
}

fn reference_related(source: &DataType, inner: &DataType, registry: &TypeRegistry) -> bool {
    source.same_shape(inner)
        || (source.indirection == 0
            && inner.indirection == 0
            && registry
                .inheritance_distance(source.type_hash, inner.type_hash)
                .is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxxsema_core::{ClassEntry, builtins};

    fn registry() -> TypeRegistry {
        TypeRegistry::with_builtins()
    }

    fn int_ty() -> DataType {
        DataType::simple(builtins::INT)
    }

    #[test]
    fn lvalue_binds_lvalue_reference() {
        let registry = registry();
        let cost = bind_reference(
            &Argument::lvalue(int_ty()),
            &int_ty().lvalue_ref_to(),
            &registry,
        );
        assert_eq!(cost.rank(), Rank::Identity);
        assert_eq!(cost.reference_binding(), ReferenceBinding::LvalueRef);
    }

    #[test]
    fn rvalue_does_not_bind_mutable_lvalue_reference() {
        let registry = registry();
        let cost = bind_reference(
            &Argument::rvalue(int_ty()),
            &int_ty().lvalue_ref_to(),
            &registry,
        );
        assert!(!cost.converts());
    }

    #[test]
    fn rvalue_binds_const_lvalue_reference() {
        let registry = registry();
        let target = DataType::with_const(builtins::INT).lvalue_ref_to();
        let cost = bind_reference(&Argument::rvalue(int_ty()), &target, &registry);
        assert_eq!(cost.rank(), Rank::Identity);
        assert_eq!(cost.reference_binding(), ReferenceBinding::LvalueRef);
        // binding T to const T & widened the top level
        assert_eq!(cost.qualification_adjustments(), 0b001);
    }

    #[test]
    fn const_lvalue_does_not_bind_mutable_reference() {
        let registry = registry();
        let arg = Argument::lvalue(DataType::with_const(builtins::INT));
        let cost = bind_reference(&arg, &int_ty().lvalue_ref_to(), &registry);
        assert!(!cost.converts());
    }

    #[test]
    fn rvalue_binds_rvalue_reference() {
        let registry = registry();
        let cost = bind_reference(
            &Argument::rvalue(int_ty()),
            &int_ty().rvalue_ref_to(),
            &registry,
        );
        assert_eq!(cost.rank(), Rank::Identity);
        assert_eq!(
            cost.reference_binding(),
            ReferenceBinding::RvalueRefBindsRvalue
        );
    }

    #[test]
    fn xvalue_binds_rvalue_reference() {
        let registry = registry();
        let cost = bind_reference(
            &Argument::xvalue(int_ty()),
            &int_ty().rvalue_ref_to(),
            &registry,
        );
        assert_eq!(
            cost.reference_binding(),
            ReferenceBinding::RvalueRefBindsRvalue
        );
    }

    #[test]
    fn lvalue_never_binds_rvalue_reference_of_same_type() {
        let registry = registry();
        let cost = bind_reference(
            &Argument::lvalue(int_ty()),
            &int_ty().rvalue_ref_to(),
            &registry,
        );
        assert!(!cost.converts());
    }

    #[test]
    fn converted_temporary_binds_const_lvalue_reference() {
        // const double & d = some_int;
        let registry = registry();
        let target = DataType::with_const(builtins::DOUBLE).lvalue_ref_to();
        let cost = bind_reference(&Argument::lvalue(int_ty()), &target, &registry);
        assert_eq!(cost.rank(), Rank::Conversion);
        assert_eq!(cost.reference_binding(), ReferenceBinding::LvalueRef);
    }

    #[test]
    fn converted_temporary_binds_rvalue_reference() {
        // double && d = some_int;  (materializes a double temporary)
        let registry = registry();
        let target = DataType::simple(builtins::DOUBLE).rvalue_ref_to();
        let cost = bind_reference(&Argument::lvalue(int_ty()), &target, &registry);
        assert_eq!(cost.rank(), Rank::Conversion);
        assert_eq!(
            cost.reference_binding(),
            ReferenceBinding::RvalueRefBindsRvalue
        );
    }

    #[test]
    fn temporary_does_not_bind_mutable_lvalue_reference() {
        // double & d = some_int;  is ill-formed
        let registry = registry();
        let target = DataType::simple(builtins::DOUBLE).lvalue_ref_to();
        let cost = bind_reference(&Argument::lvalue(int_ty()), &target, &registry);
        assert!(!cost.converts());
    }

    #[test]
    fn derived_lvalue_binds_base_reference_with_distance() {
        let mut registry = registry();
        let base = registry.register_type(ClassEntry::new("Shape").into()).unwrap();
        let derived = registry
            .register_type(ClassEntry::new("Circle").with_base(base).into())
            .unwrap();

        let target = DataType::with_const(base).lvalue_ref_to();
        let cost = bind_reference(&Argument::lvalue(DataType::simple(derived)), &target, &registry);
        assert_eq!(cost.rank(), Rank::Conversion);
        assert_eq!(cost.inheritance_distance(), 1);
        assert_eq!(cost.reference_binding(), ReferenceBinding::LvalueRef);
    }

    #[test]
    fn derived_lvalue_never_binds_base_rvalue_reference() {
        let mut registry = registry();
        let base = registry.register_type(ClassEntry::new("Shape").into()).unwrap();
        let derived = registry
            .register_type(ClassEntry::new("Circle").with_base(base).into())
            .unwrap();

        let target = DataType::simple(base).rvalue_ref_to();
        let cost = bind_reference(&Argument::lvalue(DataType::simple(derived)), &target, &registry);
        assert!(!cost.converts());
    }
}
