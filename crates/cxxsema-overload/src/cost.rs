//! Conversion cost - the ranking value behind overload resolution.
//!
//! Every (argument, parameter) pair of every candidate function gets one
//! [`ConversionCost`] describing how the argument reaches the parameter
//! type. Candidates are then ranked by comparing costs pairwise.
//!
//! A cost is either `NoConversion` (the argument cannot reach the parameter
//! at all) or a [`SequenceCost`] carrying the rank of the implicit
//! conversion sequence plus the tie-break data the comparison rules need.
//! The split is deliberate: mutators exist only on `SequenceCost`, so the
//! "no conversion" sentinel cannot be refined by construction.
//!
//! Comparison is a partial preorder, not a total order: two costs can be
//! incomparable, which surfaces as `Ordering::Equal` and means "neither is
//! strictly better". In overload resolution that reads as ambiguity unless
//! another candidate wins outright.

use std::cmp::Ordering;

use cxxsema_core::{
    ConstantValue, DataType, Qualifiers, TypeHash, basic_kind, BasicKind, QUALIFICATION_DEPTH,
};

/// Rank of an implicit conversion sequence. Lower is better.
///
/// The ordering is the standard's: exact match beats promotion beats
/// conversion; a pointer-to-bool conversion ranks below other standard
/// conversions; any user-defined sequence ranks below any standard one;
/// ellipsis below that; `NoMatch` means no sequence exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Identity,
    Promotion,
    Conversion,
    ConversionPtrBool,
    UserDefined,
    Ellipsis,
    NoMatch,
}

/// Initialization contexts in which the choice of user-defined conversion
/// is postponed.
///
/// A cost carrying one of these (other than `None`) is structurally
/// incomparable; the deferral must be resolved before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeferredUdc {
    #[default]
    None,
    CopyInitOfClass,
    InitByConversion,
    ListInitOfClass,
    DirectListInitOfClass,
}

/// How the conversion target is a reference, and what bound to it.
/// Used only as a tie-break between otherwise equal costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceBinding {
    /// An rvalue reference bound to an rvalue.
    RvalueRefBindsRvalue,
    /// An lvalue reference binding.
    LvalueRef,
    /// Some other reference binding.
    OtherRef,
    /// The target is not a reference.
    #[default]
    NoRef,
}

/// Mask selecting the top-level (level 0) qualification-adjustment bits.
const TOP_LEVEL_QUAL_MASK: u32 = 0b111;

/// The cost of one conversion attempt.
///
/// `NoConversion` is the uniform "no sequence exists" value; it reports
/// rank [`Rank::NoMatch`] and compares worse than every viable sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionCost {
    /// No implicit conversion sequence exists.
    NoConversion,
    /// A viable sequence and its ranking data.
    Sequence(SequenceCost),
}

/// Ranking data of a viable implicit conversion sequence.
///
/// Built incrementally by the sequence builder: constructed at the rank of
/// the standard conversion discovered first, then refined as deeper parts
/// of the sequence are analyzed. Once built it is only read.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceCost {
    source: DataType,
    target: DataType,
    rank: Rank,
    /// Rank of the standard conversion applied after a user-defined
    /// conversion; meaningful only while `rank == UserDefined`.
    second_standard_rank: Rank,
    ambiguous_udc: bool,
    deferred_udc: DeferredUdc,
    /// 3 bits per indirection level, level 0 in the low bits; a set bit
    /// means that level's qualifiers were widened.
    qualification_adjustments: u32,
    /// Base-class hops between source and target class types.
    inheritance_distance: u16,
    reference_binding: ReferenceBinding,
    implied_object: bool,
    udc_function: Option<TypeHash>,
    selected_function: Option<TypeHash>,
    could_narrow: bool,
    /// The argument's value when it is a compile-time constant; consumed
    /// only by the narrowing check.
    constant_value: Option<ConstantValue>,
}

impl SequenceCost {
    /// A new sequence cost. Use [`ConversionCost::NoConversion`] for the
    /// "no conversion exists" case; a sequence is always viable.
    pub fn new(source: DataType, target: DataType, rank: Rank) -> Self {
        debug_assert!(
            rank != Rank::NoMatch,
            "a viable sequence cannot carry NoMatch; use ConversionCost::NoConversion"
        );
        Self {
            source,
            target,
            rank,
            second_standard_rank: Rank::Identity,
            ambiguous_udc: false,
            deferred_udc: DeferredUdc::None,
            qualification_adjustments: 0,
            inheritance_distance: 0,
            reference_binding: ReferenceBinding::NoRef,
            implied_object: false,
            udc_function: None,
            selected_function: None,
            could_narrow: false,
            constant_value: None,
        }
    }

    // === mutators used by the sequence builder ===

    /// Overwrite the sequence rank.
    pub fn set_rank(&mut self, rank: Rank) {
        debug_assert!(rank != Rank::NoMatch);
        self.rank = rank;
    }

    pub fn set_reference_binding(&mut self, binding: ReferenceBinding) {
        self.reference_binding = binding;
    }

    pub fn set_ambiguous_udc(&mut self, ambiguous: bool) {
        self.ambiguous_udc = ambiguous;
    }

    pub fn set_deferred_udc(&mut self, deferred: DeferredUdc) {
        self.deferred_udc = deferred;
    }

    pub fn set_inheritance_distance(&mut self, distance: u16) {
        self.inheritance_distance = distance;
    }

    /// Overwrite the qualification-adjustment bit-set.
    pub fn set_qualification_adjustments(&mut self, bits: u32) {
        self.qualification_adjustments = bits;
    }

    /// Record widened qualifiers at an indirection level. Levels beyond the
    /// tracked depth clamp to the deepest slot.
    pub fn add_qualification_adjustment(&mut self, level: usize, widened: Qualifiers) {
        let shift = 3 * level.min(QUALIFICATION_DEPTH - 1) as u32;
        self.qualification_adjustments |= u32::from(widened.bits()) << shift;
    }

    /// Append a user-defined conversion to the sequence.
    ///
    /// The rank accumulated so far describes the standard conversion
    /// trailing the user conversion; it is retained for intra-UDC
    /// tie-breaking while the overall rank collapses to
    /// [`Rank::UserDefined`]. A value that has passed through a user
    /// conversion is no longer a narrowing standard conversion, so the
    /// narrowing flag resets.
    pub fn set_user_defined_conversion(&mut self, function: TypeHash) {
        self.second_standard_rank = self.rank;
        self.rank = Rank::UserDefined;
        self.could_narrow = false;
        self.udc_function = Some(function);
    }

    /// Mark the conversion as potentially narrowing. Cleared only by
    /// [`Self::set_user_defined_conversion`].
    pub fn set_could_narrow(&mut self) {
        self.could_narrow = true;
    }

    /// Record a specifically targeted function (address-of-overloaded-
    /// function contexts). Carried for the caller; never compared.
    pub fn set_selected_function(&mut self, function: TypeHash) {
        self.selected_function = Some(function);
    }

    /// Mark this cost as ranking the binding of the implicit object
    /// parameter of a non-static member call.
    pub fn set_implied_object(&mut self) {
        self.implied_object = true;
    }

    /// Record the argument's compile-time-constant value, when known.
    pub fn set_constant_value(&mut self, value: Option<ConstantValue>) {
        self.constant_value = value;
    }

    pub fn source(&self) -> DataType {
        self.source
    }

    pub fn target(&self) -> DataType {
        self.target
    }
}

impl From<SequenceCost> for ConversionCost {
    fn from(cost: SequenceCost) -> Self {
        ConversionCost::Sequence(cost)
    }
}

impl ConversionCost {
    /// The sequence rank; `NoMatch` when no conversion exists.
    pub fn rank(&self) -> Rank {
        match self {
            ConversionCost::NoConversion => Rank::NoMatch,
            ConversionCost::Sequence(cost) => cost.rank,
        }
    }

    /// Whether a conversion exists at all.
    pub fn converts(&self) -> bool {
        self.rank() != Rank::NoMatch
    }

    pub fn is_ambiguous_udc(&self) -> bool {
        matches!(self, ConversionCost::Sequence(c) if c.ambiguous_udc)
    }

    pub fn deferred_udc(&self) -> DeferredUdc {
        match self {
            ConversionCost::NoConversion => DeferredUdc::None,
            ConversionCost::Sequence(cost) => cost.deferred_udc,
        }
    }

    pub fn is_deferred_udc(&self) -> bool {
        self.deferred_udc() != DeferredUdc::None
    }

    pub fn inheritance_distance(&self) -> u16 {
        match self {
            ConversionCost::NoConversion => 0,
            ConversionCost::Sequence(cost) => cost.inheritance_distance,
        }
    }

    pub fn reference_binding(&self) -> ReferenceBinding {
        match self {
            ConversionCost::NoConversion => ReferenceBinding::NoRef,
            ConversionCost::Sequence(cost) => cost.reference_binding,
        }
    }

    pub fn second_standard_rank(&self) -> Rank {
        match self {
            ConversionCost::NoConversion => Rank::Identity,
            ConversionCost::Sequence(cost) => cost.second_standard_rank,
        }
    }

    pub fn qualification_adjustments(&self) -> u32 {
        match self {
            ConversionCost::NoConversion => 0,
            ConversionCost::Sequence(cost) => cost.qualification_adjustments,
        }
    }

    pub fn is_implied_object(&self) -> bool {
        matches!(self, ConversionCost::Sequence(c) if c.implied_object)
    }

    /// The user-defined conversion function the sequence goes through.
    pub fn udc_function(&self) -> Option<TypeHash> {
        match self {
            ConversionCost::NoConversion => None,
            ConversionCost::Sequence(cost) => cost.udc_function,
        }
    }

    /// The specifically targeted function recorded for the caller.
    pub fn selected_function(&self) -> Option<TypeHash> {
        match self {
            ConversionCost::NoConversion => None,
            ConversionCost::Sequence(cost) => cost.selected_function,
        }
    }

    /// Whether this conversion must be flagged as narrowing under
    /// list-initialization rules.
    ///
    /// True when the sequence was marked potentially narrowing and cannot
    /// be excluded by value range: a known constant that provably fits the
    /// target (integers by width and signedness, `bool` by {0, 1},
    /// floating-point by exact representability) excludes narrowing; an
    /// unknown value is conservatively narrowing.
    pub fn is_narrowing_conversion(&self) -> bool {
        let ConversionCost::Sequence(cost) = self else {
            return false;
        };
        if !cost.could_narrow {
            return false;
        }
        let Some(target_kind) = basic_kind(cost.target.type_hash) else {
            return true;
        };
        match cost.constant_value {
            Some(value) => !constant_fits(value, target_kind),
            None => true,
        }
    }

    /// Compare two costs: `Less` means `self` is the better conversion.
    ///
    /// This is a partial preorder - `Equal` covers both "equally good" and
    /// "incomparable", and callers must treat it as "neither is strictly
    /// better". Costs with a pending deferred user-defined conversion must
    /// not reach this function.
    pub fn compare(&self, other: &ConversionCost) -> Ordering {
        assert!(
            !self.is_deferred_udc() && !other.is_deferred_udc(),
            "deferred user-defined-conversion costs are incomparable; resolve the deferral first"
        );

        // Covariant treatment of the implied object: a derived-to-base
        // adjustment of `this` does not count against the candidate.
        let implied_object_pair = self.is_implied_object() && other.is_implied_object();
        let mut own_rank = self.rank();
        let mut other_rank = other.rank();
        if implied_object_pair {
            if own_rank == Rank::Conversion {
                own_rank = Rank::Identity;
            }
            if other_rank == Rank::Conversion {
                other_rank = Rank::Identity;
            }
        }

        if own_rank != other_rank {
            return own_rank.cmp(&other_rank);
        }

        if own_rank == Rank::UserDefined {
            if self.is_ambiguous_udc() || other.is_ambiguous_udc() {
                return Ordering::Equal;
            }
            if self.udc_function() != other.udc_function() {
                // Different conversion functions cannot be ranked against
                // each other in this model.
                return Ordering::Equal;
            }
            let trailing = self.second_standard_rank().cmp(&other.second_standard_rank());
            if trailing != Ordering::Equal {
                return trailing;
            }
        }

        if !implied_object_pair {
            let distance = self
                .inheritance_distance()
                .cmp(&other.inheritance_distance());
            if distance != Ordering::Equal {
                return distance;
            }
        }

        // Prefer binding rvalue references to rvalues over binding lvalue
        // references.
        let own_binding = self.reference_binding();
        let other_binding = other.reference_binding();
        if own_binding == ReferenceBinding::LvalueRef
            && other_binding == ReferenceBinding::RvalueRefBindsRvalue
        {
            return Ordering::Greater;
        }
        if own_binding == ReferenceBinding::RvalueRefBindsRvalue
            && other_binding == ReferenceBinding::LvalueRef
        {
            return Ordering::Less;
        }

        // Qualification tie-break. Top-level qualifiers only matter for
        // reference bindings, never for by-value passing.
        let mut differing = self.qualification_adjustments() ^ other.qualification_adjustments();
        if own_binding == ReferenceBinding::NoRef && other_binding == ReferenceBinding::NoRef {
            differing &= !TOP_LEVEL_QUAL_MASK;
        }
        if differing != 0 {
            if self.qualification_adjustments() & differing == 0 {
                return Ordering::Less;
            }
            if other.qualification_adjustments() & differing == 0 {
                return Ordering::Greater;
            }
        }

        Ordering::Equal
    }
}

/// Whether a known constant value provably fits the target kind.
fn constant_fits(value: ConstantValue, target: BasicKind) -> bool {
    match value {
        ConstantValue::Int(v) => int_constant_fits(v, target),
        ConstantValue::Float(v) => float_constant_fits(v, target),
    }
}

fn int_constant_fits(v: i128, target: BasicKind) -> bool {
    if target.is_floating() {
        let approx = v as f64;
        if approx as i128 != v {
            return false;
        }
        return match target {
            BasicKind::Float => f64::from(approx as f32) == approx,
            _ => true,
        };
    }
    match target {
        BasicKind::Bool => v == 0 || v == 1,
        _ => {
            let width = target.bit_width();
            if target.is_signed() {
                let min = -(1i128 << (width - 1));
                let max = (1i128 << (width - 1)) - 1;
                (min..=max).contains(&v)
            } else {
                let max = (1i128 << width) - 1;
                (0..=max).contains(&v)
            }
        }
    }
}

fn float_constant_fits(v: f64, target: BasicKind) -> bool {
    if target.is_floating() {
        return match target {
            BasicKind::Float => f64::from(v as f32) == v,
            _ => true,
        };
    }
    if v.fract() != 0.0 {
        return false;
    }
    let truncated = v as i128;
    if truncated as f64 != v {
        return false;
    }
    int_constant_fits(truncated, target)
}
