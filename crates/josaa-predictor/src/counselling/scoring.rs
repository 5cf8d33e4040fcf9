//! Admission probability heuristic.
//!
//! Two estimates are blended: a logistic curve centred on the middle of the
//! historical cutoff window, and a piecewise table keyed on where the rank
//! falls relative to the opening and closing ranks.

use super::domain::ChanceLabel;

const SPREAD_DIVISOR: f64 = 10.0;
const MIN_SPREAD: f64 = 1.0;
const NEAR_MISS_MARGIN: f64 = 10.0;
const CUTOFF_MARGIN: f64 = 100.0;
const DOMINANT_IMPROVEMENT: f64 = 0.5;

/// Where a rank sits relative to a cutoff window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankRegion {
    /// Better than the opening rank; `improvement` is the relative margin.
    AheadOfOpening { improvement: f64 },
    AtOpening,
    /// Strictly inside the window; `position` is in (0, 1).
    WithinWindow { position: f64 },
    AtClosing,
    /// Past the closing rank by at most ten places.
    NearMiss,
    BeyondClosing,
}

impl RankRegion {
    /// Classifies `rank` against the window. Inverted windows never produce
    /// `WithinWindow`: any rank at or after the opening of an inverted window
    /// is past its closing rank.
    pub fn classify(rank: f64, opening: f64, closing: f64) -> Self {
        if rank < opening {
            Self::AheadOfOpening {
                improvement: (opening - rank) / opening,
            }
        } else if rank > closing {
            if rank <= closing + NEAR_MISS_MARGIN {
                Self::NearMiss
            } else {
                Self::BeyondClosing
            }
        } else if rank == opening {
            Self::AtOpening
        } else if rank == closing {
            Self::AtClosing
        } else {
            Self::WithinWindow {
                position: (rank - opening) / (closing - opening),
            }
        }
    }
}

pub fn logistic_estimate(rank: f64, opening: f64, closing: f64) -> f64 {
    let midpoint = (opening + closing) / 2.0;
    let spread = ((closing - opening) / SPREAD_DIVISOR).max(MIN_SPREAD);
    100.0 / (1.0 + ((rank - midpoint) / spread).exp())
}

pub fn piecewise_estimate(region: RankRegion) -> f64 {
    match region {
        RankRegion::AheadOfOpening { improvement } => {
            if improvement >= DOMINANT_IMPROVEMENT {
                99.0
            } else {
                96.0 + improvement * 6.0
            }
        }
        RankRegion::AtOpening => 95.0,
        RankRegion::WithinWindow { position } => window_descent(position),
        RankRegion::AtClosing => 15.0,
        RankRegion::NearMiss => 5.0,
        RankRegion::BeyondClosing => 0.0,
    }
}

// Linear segments meeting at 80 (0.2), 60 (0.5) and 40 (0.8).
fn window_descent(position: f64) -> f64 {
    if position <= 0.2 {
        94.0 - position * 70.0
    } else if position <= 0.5 {
        80.0 - (position - 0.2) / 0.3 * 20.0
    } else if position <= 0.8 {
        60.0 - (position - 0.5) / 0.3 * 20.0
    } else {
        40.0 - (position - 0.8) / 0.2 * 20.0
    }
}

/// Probability (0-100, two decimals) that `rank` is admitted to a seat whose
/// historical cutoffs were `opening` and `closing`.
///
/// Returns 0.0 instead of failing when the inputs or any intermediate value
/// are not finite, so one malformed row cannot poison a whole ranking.
pub fn admission_probability(rank: u32, opening: f64, closing: f64) -> f64 {
    if !opening.is_finite() || !closing.is_finite() || opening < 0.0 || closing < 0.0 {
        return 0.0;
    }

    let rank = f64::from(rank);
    let region = RankRegion::classify(rank, opening, closing);
    let logistic = logistic_estimate(rank, opening, closing);
    let piecewise = piecewise_estimate(region);

    let blended = match region {
        RankRegion::AheadOfOpening { improvement } if improvement > DOMINANT_IMPROVEMENT => {
            logistic.max(95.0)
        }
        RankRegion::AheadOfOpening { .. } => 0.4 * logistic + 0.6 * piecewise,
        RankRegion::AtOpening | RankRegion::WithinWindow { .. } | RankRegion::AtClosing => {
            0.7 * logistic + 0.3 * piecewise
        }
        RankRegion::NearMiss | RankRegion::BeyondClosing => {
            if rank > closing + CUTOFF_MARGIN {
                0.0
            } else {
                logistic.min(5.0)
            }
        }
    };

    if !blended.is_finite() {
        return 0.0;
    }

    round_to_cents(blended.clamp(0.0, 100.0))
}

pub fn chance_label(probability: f64) -> ChanceLabel {
    ChanceLabel::from_probability(probability)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
