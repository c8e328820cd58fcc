//! # xrr-distance
//!
//! **Tier 1 (Distance Functions)**
//!
//! Pure functions comparing two annotation values, independent of any dataset.
//! Every distance here is symmetric, non-negative, and zero on equal inputs.
//!
//! ## What belongs here
//! * The [`DistanceFunction`] capability
//! * Built-in variants: [`Nominal`], [`IntervalSquared`], and [`DistanceKind`] dispatch
//! * Numeric normalization for interval scales ([`IntervalValue`])
//!
//! ## Example
//! ```
//! use xrr_distance::{DistanceFunction, IntervalSquared, Nominal};
//!
//! assert_eq!(Nominal.distance("a", "b").unwrap(), 1.0);
//! assert_eq!(IntervalSquared.distance(&3, &1).unwrap(), 4.0);
//! assert_eq!(IntervalSquared::between(&-10i64, &3.5f32).unwrap(), 182.25);
//! ```

#![forbid(unsafe_code)]

use thiserror::Error;
pub use xrr_types::{Annotation, DistanceKind};

/// A value the distance function cannot compare.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceError {
    #[error("value '{value}' has no numeric interpretation")]
    NonNumeric { value: String },

    #[error("numeric distance input {value} is not finite")]
    NonFinite { value: f64 },

    #[error("distance {value} is negative")]
    Negative { value: f64 },
}

/// Measures disagreement between two annotations.
///
/// Implementations must be pure and `Sync`; the metric engine calls them from
/// several threads at once.
pub trait DistanceFunction<A: ?Sized>: Sync {
    fn distance(&self, a: &A, b: &A) -> Result<f64, DistanceError>;
}

impl<A: ?Sized, D: DistanceFunction<A> + ?Sized> DistanceFunction<A> for &D {
    fn distance(&self, a: &A, b: &A) -> Result<f64, DistanceError> {
        (**self).distance(a, b)
    }
}

// -------------------------
// Numeric normalization
// -------------------------

/// Conversion of an annotation to the common `f64` scale used by interval
/// distances.
pub trait IntervalValue {
    fn interval_value(&self) -> Result<f64, DistanceError>;
}

fn finite(value: f64) -> Result<f64, DistanceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DistanceError::NonFinite { value })
    }
}

macro_rules! interval_value_as_f64 {
    ($($t:ty),*) => {
        $(
            impl IntervalValue for $t {
                fn interval_value(&self) -> Result<f64, DistanceError> {
                    Ok(*self as f64)
                }
            }
        )*
    };
}

interval_value_as_f64!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl IntervalValue for f32 {
    fn interval_value(&self) -> Result<f64, DistanceError> {
        finite(f64::from(*self))
    }
}

impl IntervalValue for f64 {
    fn interval_value(&self) -> Result<f64, DistanceError> {
        finite(*self)
    }
}

impl IntervalValue for bool {
    fn interval_value(&self) -> Result<f64, DistanceError> {
        Err(DistanceError::NonNumeric {
            value: self.to_string(),
        })
    }
}

// Text is never parsed here; `Annotation::from_str` already classifies
// numeric-looking cells as `Int` or `Float`.
impl IntervalValue for str {
    fn interval_value(&self) -> Result<f64, DistanceError> {
        Err(DistanceError::NonNumeric {
            value: self.to_string(),
        })
    }
}

impl IntervalValue for String {
    fn interval_value(&self) -> Result<f64, DistanceError> {
        self.as_str().interval_value()
    }
}

impl IntervalValue for Annotation {
    fn interval_value(&self) -> Result<f64, DistanceError> {
        match self {
            Annotation::Int(v) => Ok(*v as f64),
            Annotation::Float(v) => finite(*v),
            Annotation::Text(v) => v.interval_value(),
            Annotation::Bool(v) => v.interval_value(),
        }
    }
}

impl<T: IntervalValue + ?Sized> IntervalValue for &T {
    fn interval_value(&self) -> Result<f64, DistanceError> {
        (**self).interval_value()
    }
}

// -------------------------
// Built-in distances
// -------------------------

/// Categorical distance: `0` when the labels are equal, `1` otherwise.
///
/// Equality is the label type's own `PartialEq`. For bare floats that means
/// `NaN` is at distance `1` from itself; use [`Annotation`], whose equality is
/// total, when such values can occur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nominal;

impl<A: PartialEq + ?Sized> DistanceFunction<A> for Nominal {
    fn distance(&self, a: &A, b: &A) -> Result<f64, DistanceError> {
        Ok(if a == b { 0.0 } else { 1.0 })
    }
}

/// Interval distance: the squared difference of the two numeric values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalSquared;

impl IntervalSquared {
    /// Squared difference of two possibly different numeric types.
    pub fn between<L, R>(a: &L, b: &R) -> Result<f64, DistanceError>
    where
        L: IntervalValue + ?Sized,
        R: IntervalValue + ?Sized,
    {
        let diff = a.interval_value()? - b.interval_value()?;
        finite(diff * diff)
    }
}

impl<A: IntervalValue + ?Sized> DistanceFunction<A> for IntervalSquared {
    fn distance(&self, a: &A, b: &A) -> Result<f64, DistanceError> {
        Self::between(a, b)
    }
}

impl<A: PartialEq + IntervalValue + ?Sized> DistanceFunction<A> for DistanceKind {
    fn distance(&self, a: &A, b: &A) -> Result<f64, DistanceError> {
        match self {
            DistanceKind::Nominal => Nominal.distance(a, b),
            DistanceKind::IntervalSquared => IntervalSquared.distance(a, b),
        }
    }
}

/// A caller-supplied distance closure.
#[derive(Debug, Clone, Copy)]
pub struct FnDistance<F>(F);

/// Wrap a closure as a [`DistanceFunction`]. Non-finite and negative results
/// are rejected.
pub fn from_fn<A, F>(f: F) -> FnDistance<F>
where
    A: ?Sized,
    F: Fn(&A, &A) -> f64 + Sync,
{
    FnDistance(f)
}

impl<A, F> DistanceFunction<A> for FnDistance<F>
where
    A: ?Sized,
    F: Fn(&A, &A) -> f64 + Sync,
{
    fn distance(&self, a: &A, b: &A) -> Result<f64, DistanceError> {
        let value = finite((self.0)(a, b))?;
        if value < 0.0 {
            return Err(DistanceError::Negative { value });
        }
        Ok(value)
    }
}
