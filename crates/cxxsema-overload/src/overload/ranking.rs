//! Candidate ranking for overload resolution.
//!
//! Selects the best candidate from the viable set using the per-argument
//! domination rule: a candidate wins when none of its argument conversions
//! is worse than the rival's and at least one is strictly better. If no
//! candidate beats every other, the call is ambiguous.

use std::cmp::Ordering;

use cxxsema_core::{SemaError, Span};
use cxxsema_registry::TypeRegistry;

use super::OverloadMatch;

/// Find the best match from viable candidates.
///
/// # Returns
///
/// * `Ok(OverloadMatch)` - the candidate that beats every other
/// * `Err(SemaError::AmbiguousOverload)` - no candidate dominates
pub fn find_best_match(
    viable: &[OverloadMatch],
    registry: &TypeRegistry,
    span: Span,
) -> Result<OverloadMatch, SemaError> {
    assert!(!viable.is_empty());

    if viable.len() == 1 {
        return Ok(viable[0].clone());
    }

    // A single pass finds the only possible winner; a verification pass
    // confirms it actually beats every other candidate.
    let mut best = 0;
    for index in 1..viable.len() {
        if better_candidate(&viable[index], &viable[best]) {
            best = index;
        }
    }
    for (index, rival) in viable.iter().enumerate() {
        if index != best && !better_candidate(&viable[best], rival) {
            return Err(ambiguous_overload_error(&viable[best], rival, registry, span));
        }
    }

    Ok(viable[best].clone())
}

/// Whether candidate `a` is strictly better than `b`: no argument
/// conversion of `a` is worse, and at least one is strictly better. The
/// implicit-object conversion participates like any argument.
fn better_candidate(a: &OverloadMatch, b: &OverloadMatch) -> bool {
    let mut strictly_better = false;

    if let (Some(a_cost), Some(b_cost)) = (&a.object_cost, &b.object_cost) {
        match a_cost.compare(b_cost) {
            Ordering::Greater => return false,
            Ordering::Less => strictly_better = true,
            Ordering::Equal => {}
        }
    }

    for (a_cost, b_cost) in a.arg_costs.iter().zip(b.arg_costs.iter()) {
        // A `None` slot is a defaulted parameter the call never converts
        // into; it cannot differentiate candidates.
        let (Some(a_cost), Some(b_cost)) = (a_cost, b_cost) else {
            continue;
        };
        match a_cost.compare(b_cost) {
            Ordering::Greater => return false,
            Ordering::Less => strictly_better = true,
            Ordering::Equal => {}
        }
    }

    strictly_better
}

/// Build the error for an ambiguous overload.
fn ambiguous_overload_error(
    a: &OverloadMatch,
    b: &OverloadMatch,
    registry: &TypeRegistry,
    span: Span,
) -> SemaError {
    let name = registry
        .get_function(a.func_hash)
        .map(|f| f.def.name.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let candidates = format!(
        "{} and {}",
        format_candidate(a, registry),
        format_candidate(b, registry)
    );

    SemaError::AmbiguousOverload {
        name,
        candidates,
        span,
    }
}

/// Format a candidate as `name(param, param, ...)`.
fn format_candidate(m: &OverloadMatch, registry: &TypeRegistry) -> String {
    registry
        .get_function(m.func_hash)
        .map(|f| {
            let params: Vec<_> = f
                .def
                .params
                .iter()
                .map(|p| registry.type_name(p.data_type.type_hash))
                .collect();
            format!("{}({})", f.def.name, params.join(", "))
        })
        .unwrap_or_else(|| format!("{:?}", m.func_hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{ConversionCost, Rank, SequenceCost};
    use cxxsema_core::{DataType, TypeHash, builtins};

    fn cost(rank: Rank) -> ConversionCost {
        let int_ty = DataType::simple(builtins::INT);
        SequenceCost::new(int_ty, int_ty, rank).into()
    }

    fn candidate(name: &str, ranks: &[Rank]) -> OverloadMatch {
        OverloadMatch {
            func_hash: TypeHash::from_name(name),
            object_cost: None,
            arg_costs: ranks.iter().map(|&r| Some(cost(r))).collect(),
        }
    }

    #[test]
    fn single_viable_returns_it() {
        let m = candidate("f", &[Rank::Identity]);
        let registry = TypeRegistry::with_builtins();
        let result = find_best_match(&[m.clone()], &registry, Span::default());
        assert_eq!(result.unwrap().func_hash, m.func_hash);
    }

    #[test]
    fn dominating_candidate_wins() {
        let better = candidate("f1", &[Rank::Identity, Rank::Identity]);
        let worse = candidate("f2", &[Rank::Identity, Rank::Conversion]);
        let registry = TypeRegistry::with_builtins();

        let result =
            find_best_match(&[worse.clone(), better.clone()], &registry, Span::default());
        assert_eq!(result.unwrap().func_hash, better.func_hash);
    }

    #[test]
    fn split_decision_is_ambiguous() {
        // f1 wins on the first argument, f2 on the second.
        let f1 = candidate("f1", &[Rank::Identity, Rank::Conversion]);
        let f2 = candidate("f2", &[Rank::Conversion, Rank::Identity]);
        let registry = TypeRegistry::with_builtins();

        let result = find_best_match(&[f1, f2], &registry, Span::default());
        assert!(matches!(
            result,
            Err(SemaError::AmbiguousOverload { .. })
        ));
    }

    #[test]
    fn equal_candidates_are_ambiguous() {
        let f1 = candidate("f1", &[Rank::Conversion]);
        let f2 = candidate("f2", &[Rank::Conversion]);
        let registry = TypeRegistry::with_builtins();

        let result = find_best_match(&[f1, f2], &registry, Span::default());
        assert!(matches!(
            result,
            Err(SemaError::AmbiguousOverload { .. })
        ));
    }

    #[test]
    fn object_cost_participates_in_ranking() {
        // Binding a non-const object: the non-const method's object binding
        // is exact while the const method's widens const, and that
        // qualification difference decides the call.
        use crate::cost::ReferenceBinding;
        use cxxsema_core::Qualifiers;

        let int_ty = DataType::simple(builtins::INT);
        let mut near = SequenceCost::new(int_ty, int_ty, Rank::Identity);
        near.set_implied_object();
        near.set_reference_binding(ReferenceBinding::LvalueRef);
        let mut far = SequenceCost::new(int_ty, int_ty, Rank::Identity);
        far.set_implied_object();
        far.set_reference_binding(ReferenceBinding::LvalueRef);
        far.add_qualification_adjustment(0, Qualifiers::CONST);

        let f1 = OverloadMatch {
            func_hash: TypeHash::from_name("f1"),
            object_cost: Some(near.into()),
            arg_costs: vec![Some(cost(Rank::Identity))],
        };
        let f2 = OverloadMatch {
            func_hash: TypeHash::from_name("f2"),
            object_cost: Some(far.into()),
            arg_costs: vec![Some(cost(Rank::Identity))],
        };

        let registry = TypeRegistry::with_builtins();
        let result = find_best_match(&[f2, f1.clone()], &registry, Span::default());
        assert_eq!(result.unwrap().func_hash, f1.func_hash);
    }

    #[test]
    fn three_way_with_one_dominator() {
        let best = candidate("f1", &[Rank::Identity, Rank::Promotion]);
        let mid = candidate("f2", &[Rank::Identity, Rank::Conversion]);
        let worst = candidate("f3", &[Rank::Promotion, Rank::Conversion]);
        let registry = TypeRegistry::with_builtins();

        let result = find_best_match(&[mid, worst, best.clone()], &registry, Span::default());
        assert_eq!(result.unwrap().func_hash, best.func_hash);
    }
}
