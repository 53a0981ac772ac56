//! Relational constraints applied to a scalar quantity.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{GfError, GfResult};

/// Relational operator names accepted by [`GfConstraint`] constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    GreaterThan,
    LessThan,
    EqualTo,
    AbsoluteMaximum,
    AbsoluteMinimum,
    LocalMaximum,
    LocalMinimum,
    AdjustedAbsoluteMaximum,
    AdjustedAbsoluteMinimum,
}

impl Relation {
    pub const ALL: [Relation; 9] = [
        Relation::GreaterThan,
        Relation::LessThan,
        Relation::EqualTo,
        Relation::AbsoluteMaximum,
        Relation::AbsoluteMinimum,
        Relation::LocalMaximum,
        Relation::LocalMinimum,
        Relation::AdjustedAbsoluteMaximum,
        Relation::AdjustedAbsoluteMinimum,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Relation::GreaterThan => ">",
            Relation::LessThan => "<",
            Relation::EqualTo => "=",
            Relation::AbsoluteMaximum => "ABSMAX",
            Relation::AbsoluteMinimum => "ABSMIN",
            Relation::LocalMaximum => "LOCMAX",
            Relation::LocalMinimum => "LOCMIN",
            Relation::AdjustedAbsoluteMaximum => "ADJ_ABSMAX",
            Relation::AdjustedAbsoluteMinimum => "ADJ_ABSMIN",
        }
    }
}

impl FromStr for Relation {
    type Err = GfError;

    /// Parses an operator name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_uppercase();
        Relation::ALL
            .into_iter()
            .find(|r| r.as_str() == name)
            .ok_or_else(|| GfError::UnknownRelation(s.to_owned()))
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The condition a numeric search looks for.
///
/// Threshold variants compare the quantity against `reference + adjustment`.
/// Absolute extrema with a positive `adjustment` report every time the
/// quantity comes within `adjustment` of the extreme value instead of the
/// extreme points alone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GfConstraint {
    GreaterThan { reference: f64, adjustment: f64 },
    LessThan { reference: f64, adjustment: f64 },
    EqualTo { reference: f64, adjustment: f64 },
    AbsoluteMaximum { adjustment: f64 },
    AbsoluteMinimum { adjustment: f64 },
    LocalMaximum,
    LocalMinimum,
}

impl GfConstraint {
    pub const fn greater_than(reference: f64) -> Self {
        GfConstraint::GreaterThan {
            reference,
            adjustment: 0.0,
        }
    }

    pub const fn less_than(reference: f64) -> Self {
        GfConstraint::LessThan {
            reference,
            adjustment: 0.0,
        }
    }

    pub const fn equal_to(reference: f64) -> Self {
        GfConstraint::EqualTo {
            reference,
            adjustment: 0.0,
        }
    }

    pub const fn absolute_maximum() -> Self {
        GfConstraint::AbsoluteMaximum { adjustment: 0.0 }
    }

    pub const fn absolute_minimum() -> Self {
        GfConstraint::AbsoluteMinimum { adjustment: 0.0 }
    }

    pub const fn local_maximum() -> Self {
        GfConstraint::LocalMaximum
    }

    pub const fn local_minimum() -> Self {
        GfConstraint::LocalMinimum
    }

    /// Builds a threshold constraint from an operator name.
    ///
    /// # Errors
    ///
    /// [`GfError::NotApplicable`] unless `relation` is `>`, `<` or `=`.
    pub fn reference(relation: Relation, value: f64) -> GfResult<Self> {
        match relation {
            Relation::GreaterThan => Ok(Self::greater_than(value)),
            Relation::LessThan => Ok(Self::less_than(value)),
            Relation::EqualTo => Ok(Self::equal_to(value)),
            other => Err(GfError::NotApplicable {
                relation: other.as_str(),
                context: "a reference value",
            }),
        }
    }

    /// Builds an unadjusted extremum constraint from an operator name.
    pub fn extremum(relation: Relation) -> GfResult<Self> {
        match relation {
            Relation::AbsoluteMaximum => Ok(Self::absolute_maximum()),
            Relation::AbsoluteMinimum => Ok(Self::absolute_minimum()),
            Relation::LocalMaximum => Ok(Self::local_maximum()),
            Relation::LocalMinimum => Ok(Self::local_minimum()),
            other => Err(GfError::NotApplicable {
                relation: other.as_str(),
                context: "an extremum",
            }),
        }
    }

    /// Builds an absolute extremum constraint with an adjustment.
    ///
    /// # Errors
    ///
    /// [`GfError::InvalidAdjustment`] for a negative or non-finite
    /// adjustment; [`GfError::NotApplicable`] for relations other than
    /// absolute extrema.
    pub fn adjusted_extremum(relation: Relation, adjustment: f64) -> GfResult<Self> {
        check_extremum_adjustment(adjustment)?;
        match relation {
            Relation::AbsoluteMaximum | Relation::AdjustedAbsoluteMaximum => {
                Ok(GfConstraint::AbsoluteMaximum { adjustment })
            }
            Relation::AbsoluteMinimum | Relation::AdjustedAbsoluteMinimum => {
                Ok(GfConstraint::AbsoluteMinimum { adjustment })
            }
            other => Err(GfError::NotApplicable {
                relation: other.as_str(),
                context: "an adjusted extremum",
            }),
        }
    }

    /// Replaces the adjustment.
    ///
    /// Thresholds accept any finite offset; absolute extrema require a
    /// non-negative one; local extrema take none.
    pub fn with_adjustment(self, value: f64) -> GfResult<Self> {
        match self {
            GfConstraint::GreaterThan { reference, .. } => {
                check_finite(value)?;
                Ok(GfConstraint::GreaterThan {
                    reference,
                    adjustment: value,
                })
            }
            GfConstraint::LessThan { reference, .. } => {
                check_finite(value)?;
                Ok(GfConstraint::LessThan {
                    reference,
                    adjustment: value,
                })
            }
            GfConstraint::EqualTo { reference, .. } => {
                check_finite(value)?;
                Ok(GfConstraint::EqualTo {
                    reference,
                    adjustment: value,
                })
            }
            GfConstraint::AbsoluteMaximum { .. } => {
                Self::adjusted_extremum(Relation::AbsoluteMaximum, value)
            }
            GfConstraint::AbsoluteMinimum { .. } => {
                Self::adjusted_extremum(Relation::AbsoluteMinimum, value)
            }
            GfConstraint::LocalMaximum | GfConstraint::LocalMinimum => {
                Err(GfError::NotApplicable {
                    relation: self.relation().as_str(),
                    context: "an adjustment",
                })
            }
        }
    }

    /// Operator name of this constraint.
    pub fn relation(&self) -> Relation {
        match *self {
            GfConstraint::GreaterThan { .. } => Relation::GreaterThan,
            GfConstraint::LessThan { .. } => Relation::LessThan,
            GfConstraint::EqualTo { .. } => Relation::EqualTo,
            GfConstraint::AbsoluteMaximum { adjustment } if adjustment > 0.0 => {
                Relation::AdjustedAbsoluteMaximum
            }
            GfConstraint::AbsoluteMaximum { .. } => Relation::AbsoluteMaximum,
            GfConstraint::AbsoluteMinimum { adjustment } if adjustment > 0.0 => {
                Relation::AdjustedAbsoluteMinimum
            }
            GfConstraint::AbsoluteMinimum { .. } => Relation::AbsoluteMinimum,
            GfConstraint::LocalMaximum => Relation::LocalMaximum,
            GfConstraint::LocalMinimum => Relation::LocalMinimum,
        }
    }

    pub fn reference_value(&self) -> Option<f64> {
        match *self {
            GfConstraint::GreaterThan { reference, .. }
            | GfConstraint::LessThan { reference, .. }
            | GfConstraint::EqualTo { reference, .. } => Some(reference),
            _ => None,
        }
    }

    pub fn adjustment(&self) -> f64 {
        match *self {
            GfConstraint::GreaterThan { adjustment, .. }
            | GfConstraint::LessThan { adjustment, .. }
            | GfConstraint::EqualTo { adjustment, .. }
            | GfConstraint::AbsoluteMaximum { adjustment }
            | GfConstraint::AbsoluteMinimum { adjustment } => adjustment,
            GfConstraint::LocalMaximum | GfConstraint::LocalMinimum => 0.0,
        }
    }

    /// Threshold the quantity is compared against, for order constraints.
    pub fn target(&self) -> Option<f64> {
        self.reference_value().map(|r| r + self.adjustment())
    }

    pub fn is_order(&self) -> bool {
        matches!(
            self,
            GfConstraint::GreaterThan { .. }
                | GfConstraint::LessThan { .. }
                | GfConstraint::EqualTo { .. }
        )
    }

    pub fn is_extremum(&self) -> bool {
        !self.is_order()
    }

    pub fn is_adjusted_extremum(&self) -> bool {
        matches!(
            self,
            GfConstraint::AbsoluteMaximum { adjustment } | GfConstraint::AbsoluteMinimum { adjustment }
                if *adjustment > 0.0
        )
    }

    pub fn is_unadjusted_extremum(&self) -> bool {
        self.is_extremum() && !self.is_adjusted_extremum()
    }

    /// Rechecks the adjustment, e.g. after deserialization.
    pub fn validate(&self) -> GfResult<()> {
        match *self {
            GfConstraint::AbsoluteMaximum { adjustment }
            | GfConstraint::AbsoluteMinimum { adjustment } => {
                check_extremum_adjustment(adjustment)
            }
            GfConstraint::GreaterThan { adjustment, .. }
            | GfConstraint::LessThan { adjustment, .. }
            | GfConstraint::EqualTo { adjustment, .. } => check_finite(adjustment),
            GfConstraint::LocalMaximum | GfConstraint::LocalMinimum => Ok(()),
        }
    }
}

fn check_finite(adjustment: f64) -> GfResult<()> {
    if adjustment.is_finite() {
        Ok(())
    } else {
        Err(GfError::InvalidAdjustment(adjustment))
    }
}

fn check_extremum_adjustment(adjustment: f64) -> GfResult<()> {
    if adjustment.is_finite() && adjustment >= 0.0 {
        Ok(())
    } else {
        Err(GfError::InvalidAdjustment(adjustment))
    }
}

impl Display for GfConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.reference_value(), self.adjustment()) {
            (Some(reference), adj) if adj != 0.0 => {
                write!(f, "{} {} (adjusted by {})", self.relation(), reference, adj)
            }
            (Some(reference), _) => write!(f, "{} {}", self.relation(), reference),
            (None, adj) if adj > 0.0 => write!(f, "{} {}", self.relation(), adj),
            (None, _) => write!(f, "{}", self.relation()),
        }
    }
}
