//! Admission probability scoring and preference list generation.
//!
//! A request is validated into a [`SeatFilter`] and a rank, the cutoff table
//! is narrowed by the filter, and the [`CandidateSelector`] picks, scores and
//! orders the seats worth listing. When nothing matches, plausible seats are
//! synthesized from institute templates so callers always receive a list.

pub mod catalog;
pub mod domain;
pub mod fallback;
pub mod filter;
pub mod router;
pub mod scoring;
pub mod selection;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Category, ChanceLabel, CollegeType, Gender, PreferenceEntry, Quota, RoundToken, SeatRecord,
    UnknownValue, SENTINEL_RANK,
};
pub use filter::SeatFilter;
pub use router::preference_router;
pub use scoring::{admission_probability, chance_label, RankRegion};
pub use selection::{CandidateSelector, Selection, SelectionLimits, SelectionSource};
pub use service::{
    CutoffRepository, DataHealth, PredictionOutcome, PreferenceService, PreferenceServiceError,
    ProbabilityHistogram, RepositoryError,
};
pub use validation::{validate_request, PredictionRequest, PreferenceQuery, ValidationError};
