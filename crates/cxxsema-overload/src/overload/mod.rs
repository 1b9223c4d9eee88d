//! Overload resolution for function calls.
//!
//! Selects the best matching function from a set of candidates based on
//! the implicit conversion sequences of the arguments.
//!
//! ## Algorithm
//!
//! 1. Filter candidates by argument count (considering default arguments
//!    and a trailing ellipsis)
//! 2. Build a [`ConversionCost`] per (argument, parameter) pair; any
//!    argument without a conversion removes the candidate
//! 3. For member calls, build the implicit-object cost (const objects
//!    exclude non-const methods; derived-to-base `this` adjustment is
//!    recorded but not penalized)
//! 4. Rank the viable candidates by per-argument domination and report
//!    ambiguity when no candidate beats every other

mod ranking;

pub use ranking::find_best_match;

use cxxsema_core::{
    Argument, DataType, FunctionKind, Qualifiers, SemaError, Span, TypeHash,
};
use cxxsema_registry::TypeRegistry;

use crate::conversion::{UdcMode, implicit_conversion_sequence};
use crate::cost::{ConversionCost, Rank, ReferenceBinding, SequenceCost};

/// Result of successful overload resolution.
#[derive(Debug, Clone)]
pub struct OverloadMatch {
    /// The selected function.
    pub func_hash: TypeHash,
    /// Cost of binding the implicit object parameter, for member calls.
    pub object_cost: Option<ConversionCost>,
    /// Conversion cost per parameter (`None` = default argument used).
    pub arg_costs: Vec<Option<ConversionCost>>,
}

/// Resolve an overloaded free-function call.
///
/// # Arguments
///
/// * `candidates` - function hashes to consider
/// * `args` - the call arguments
/// * `registry` - type and function storage
/// * `span` - call site, for error reporting
pub fn resolve_overload(
    candidates: &[TypeHash],
    args: &[Argument],
    registry: &TypeRegistry,
    span: Span,
) -> Result<OverloadMatch, SemaError> {
    resolve(candidates, None, args, registry, span)
}

/// Resolve an overloaded member-function call.
///
/// The object argument binds the implicit object parameter: a const object
/// only reaches const methods, and a derived object reaching a base-class
/// method records the inheritance distance without being penalized against
/// sibling candidates.
pub fn resolve_method_overload(
    candidates: &[TypeHash],
    object: &Argument,
    args: &[Argument],
    registry: &TypeRegistry,
    span: Span,
) -> Result<OverloadMatch, SemaError> {
    resolve(candidates, Some(object), args, registry, span)
}

fn resolve(
    candidates: &[TypeHash],
    object: Option<&Argument>,
    args: &[Argument],
    registry: &TypeRegistry,
    span: Span,
) -> Result<OverloadMatch, SemaError> {
    if candidates.is_empty() {
        return Err(SemaError::Internal {
            message: "no candidates for overload resolution".to_string(),
        });
    }

    // Fast path: single candidate.
    if candidates.len() == 1 {
        return try_match_candidate(candidates[0], object, args, registry)
            .ok_or_else(|| no_matching_overload_error(candidates, args, registry, span));
    }

    let viable: Vec<_> = candidates
        .iter()
        .filter_map(|&hash| try_match_candidate(hash, object, args, registry))
        .collect();

    if viable.is_empty() {
        return Err(no_matching_overload_error(candidates, args, registry, span));
    }

    ranking::find_best_match(&viable, registry, span)
}

/// Try to match arguments against a candidate function.
///
/// Returns `None` when the candidate is not viable: wrong arity, an
/// argument without a conversion sequence, or a const-mismatched object.
fn try_match_candidate(
    func_hash: TypeHash,
    object: Option<&Argument>,
    args: &[Argument],
    registry: &TypeRegistry,
) -> Option<OverloadMatch> {
    let func = registry.get_function(func_hash)?;
    let def = &func.def;

    let object_cost = match (object, def.owner) {
        (Some(obj), Some(owner)) if func.kind == FunctionKind::Method => {
            Some(implied_object_cost(obj, owner, def.is_const, registry)?)
        }
        _ => None,
    };

    // Argument count, considering defaults and a trailing ellipsis.
    if args.len() < def.required_params() {
        return None;
    }
    if !def.is_variadic && args.len() > def.params.len() {
        return None;
    }

    let mut arg_costs = Vec::with_capacity(args.len().max(def.params.len()));
    for (arg, param) in args.iter().zip(def.params.iter()) {
        let cost = implicit_conversion_sequence(arg, &param.data_type, UdcMode::Allowed, registry);
        if !cost.converts() {
            return None;
        }
        arg_costs.push(Some(cost));
    }

    // Arguments consumed by the ellipsis convert at the worst viable rank.
    for arg in args.iter().skip(def.params.len()) {
        arg_costs.push(Some(
            SequenceCost::new(arg.data_type, arg.data_type, Rank::Ellipsis).into(),
        ));
    }

    // Defaulted parameters the call did not provide.
    for _ in args.len()..def.params.len() {
        arg_costs.push(None);
    }

    Some(OverloadMatch {
        func_hash,
        object_cost,
        arg_costs,
    })
}

/// Cost of binding the implicit object parameter.
///
/// The object binds by reference: exact class gives an identity binding,
/// a base-class method records the derived-to-base distance (treated
/// covariantly by the comparison), and calling a const method on a
/// non-const object records a top-level qualification widening.
fn implied_object_cost(
    object: &Argument,
    owner: TypeHash,
    method_is_const: bool,
    registry: &TypeRegistry,
) -> Option<ConversionCost> {
    let object_type = object.data_type;

    // A const object cannot call a non-const method.
    if object_type.is_const() && !method_is_const {
        return None;
    }

    let distance = registry.inheritance_distance(object_type.type_hash, owner)?;
    let target = DataType::simple(owner);
    let mut cost = if distance == 0 {
        SequenceCost::new(object_type, target, Rank::Identity)
    } else {
        let mut cost = SequenceCost::new(object_type, target, Rank::Conversion);
        cost.set_inheritance_distance(distance);
        cost
    };
    cost.set_reference_binding(ReferenceBinding::LvalueRef);
    if method_is_const && !object_type.is_const() {
        cost.add_qualification_adjustment(0, Qualifiers::CONST);
    }
    cost.set_implied_object();
    Some(cost.into())
}

/// Build the error for a call no candidate accepts.
fn no_matching_overload_error(
    candidates: &[TypeHash],
    args: &[Argument],
    registry: &TypeRegistry,
    span: Span,
) -> SemaError {
    let name = candidates
        .first()
        .and_then(|&hash| registry.get_function(hash))
        .map(|f| f.def.name.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let args = args
        .iter()
        .map(|arg| registry.type_name(arg.data_type.type_hash))
        .collect::<Vec<_>>()
        .join(", ");

    SemaError::NoMatchingOverload { name, args, span }
}
