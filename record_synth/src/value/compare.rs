//! Structural equality and fallible ordering for [`Value`].

use std::cmp::Ordering;
use std::sync::Arc;

use super::Value;
use crate::{SynthError, SynthResult};

/// 2^63, the first float above every `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Exact order of an integer against a float; `None` when the float is NaN.
///
/// No rounding happens: `2^53 + 1` orders above the float `2^53`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the float is truncated and range checked before the cast"
)]
pub(super) fn int_float_cmp(i: i64, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    if f >= I64_BOUND {
        return Some(Ordering::Less);
    }
    if f < -I64_BOUND {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    Some(
        i.cmp(&(whole as i64))
            .then_with(|| 0.0_f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal)),
    )
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(i), Self::Float(f)) | (Self::Float(f), Self::Int(i)) => {
                int_float_cmp(*i, *f) == Some(Ordering::Equal)
            }
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Instance(a), Self::Instance(b)) => a.equals(b),
            _ => false,
        }
    }
}

impl Value {
    /// Order `self` against `other` for the comparison operator `op`.
    ///
    /// Equal values are always `Equal`. Otherwise numbers compare
    /// numerically, strings and booleans within their kind, lists and tuples
    /// lexicographically, and instances through their generated ordering.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::ComparisonTypeMismatch`] when the two values have
    /// no defined order (different kinds, or a NaN operand).
    pub fn compare(&self, other: &Self, op: &'static str) -> SynthResult<Ordering> {
        if self == other {
            return Ok(Ordering::Equal);
        }
        let mismatch = || Arc::new(SynthError::comparison(op, self.kind(), other.kind()));
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Ok(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b).ok_or_else(mismatch),
            (Self::Int(a), Self::Float(b)) => int_float_cmp(*a, *b).ok_or_else(mismatch),
            (Self::Float(a), Self::Int(b)) => int_float_cmp(*b, *a)
                .map(Ordering::reverse)
                .ok_or_else(mismatch),
            (Self::Bool(a), Self::Bool(b)) => Ok(a.cmp(b)),
            (Self::Str(a), Self::Str(b)) => Ok(a.cmp(b)),
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => {
                compare_sequences(a, b, op)
            }
            (Self::Instance(a), Self::Instance(b)) => a.ordering(b, op),
            _ => Err(mismatch()),
        }
    }
}

/// Lexicographic ordering of two value sequences.
///
/// The first pair that is not equal decides; when one sequence is a prefix
/// of the other the shorter one orders first.
pub(crate) fn compare_sequences(
    left: &[Value],
    right: &[Value],
    op: &'static str,
) -> SynthResult<Ordering> {
    for (a, b) in left.iter().zip(right) {
        if a != b {
            return a.compare(b, op);
        }
    }
    Ok(left.len().cmp(&right.len()))
}
