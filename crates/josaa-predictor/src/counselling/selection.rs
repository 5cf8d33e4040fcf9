use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::domain::{PreferenceEntry, SeatRecord};
use super::fallback::synthesize_seats;
use super::filter::SeatFilter;
use super::scoring::{admission_probability, chance_label};

/// Window spans and caps bounding how many seats reach the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionLimits {
    pub window_span: u32,
    pub near_top_cap: usize,
    pub straddle_cap: usize,
    pub near_bottom_cap: usize,
    pub nearest_cap: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            window_span: 200,
            near_top_cap: 10,
            straddle_cap: 20,
            near_bottom_cap: 20,
            nearest_cap: 20,
        }
    }
}

/// Origin of the rows in a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// Rows picked from the rank windows around the student's rank.
    Windows,
    /// Rows picked by closeness of opening rank after the windows came up empty.
    Nearest,
    /// Rows generated from institute templates because no seat matched.
    Synthesized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub entries: Vec<PreferenceEntry>,
    pub source: SelectionSource,
}

/// Deduplicated seats worth scoring for `rank`, together with how they were
/// found. When no seat falls in a rank window, every distinct seat is
/// ordered by opening-rank distance and the closest are kept, so the pool is
/// empty only when `seats` is empty.
pub fn candidate_pool<'a>(
    seats: &'a [SeatRecord],
    rank: u32,
    limits: &SelectionLimits,
) -> (Vec<&'a SeatRecord>, SelectionSource) {
    let lower = rank.saturating_sub(limits.window_span);
    let upper = rank.saturating_add(limits.window_span);

    let near_top = seats
        .iter()
        .filter(|seat| (lower..=rank).contains(&seat.opening_rank))
        .take(limits.near_top_cap);
    let straddling = seats
        .iter()
        .filter(|seat| seat.opening_rank <= rank && seat.closing_rank >= rank)
        .take(limits.straddle_cap);
    let near_bottom = seats
        .iter()
        .filter(|seat| (rank..=upper).contains(&seat.closing_rank))
        .take(limits.near_bottom_cap);

    let pool = unique(near_top.chain(straddling).chain(near_bottom));
    if !pool.is_empty() {
        return (pool, SelectionSource::Windows);
    }

    let mut nearest = unique(seats.iter());
    nearest.sort_by_key(|seat| seat.opening_rank.abs_diff(rank));
    nearest.truncate(limits.nearest_cap);
    (nearest, SelectionSource::Nearest)
}

fn unique<'a>(seats: impl Iterator<Item = &'a SeatRecord>) -> Vec<&'a SeatRecord> {
    let mut seen = HashSet::new();
    seats.filter(|seat| seen.insert(*seat)).collect()
}

/// Scores candidates, keeps those at or above `min_probability` when a
/// threshold is given, then orders them by descending probability and
/// numbers them from 1. Ties keep their candidate order. Seats with a
/// placeholder cutoff score 0.
pub fn rank_candidates<'a>(
    candidates: impl IntoIterator<Item = &'a SeatRecord>,
    rank: u32,
    min_probability: Option<f64>,
) -> Vec<PreferenceEntry> {
    let mut entries: Vec<PreferenceEntry> = candidates
        .into_iter()
        .map(|seat| {
            let probability = if seat.has_placeholder_rank() {
                0.0
            } else {
                admission_probability(
                    rank,
                    f64::from(seat.opening_rank),
                    f64::from(seat.closing_rank),
                )
            };
            PreferenceEntry {
                preference: 0,
                seat: seat.clone(),
                probability,
                chances: chance_label(probability),
            }
        })
        .filter(|entry| min_probability.map_or(true, |min| entry.probability >= min))
        .collect();

    entries.sort_by(|left, right| right.probability.total_cmp(&left.probability));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.preference = index + 1;
    }
    entries
}

/// Builds preference lists from a pre-filtered cutoff table.
#[derive(Debug, Clone, Default)]
pub struct CandidateSelector {
    limits: SelectionLimits,
}

impl CandidateSelector {
    pub fn new(limits: SelectionLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SelectionLimits {
        &self.limits
    }

    /// Ranked entries drawn from `seats` alone. Returns an empty list when
    /// `seats` is empty or when the threshold removes every candidate.
    pub fn select(
        &self,
        seats: &[SeatRecord],
        rank: u32,
        min_probability: f64,
    ) -> Vec<PreferenceEntry> {
        let (pool, _) = candidate_pool(seats, rank, &self.limits);
        rank_candidates(pool, rank, Some(min_probability))
    }

    /// Like [`select`](Self::select), but synthesizes template seats when
    /// `seats` yields no candidates at all. Synthesized rows are ranked
    /// without the probability threshold so the list is never empty.
    pub fn select_or_synthesize(
        &self,
        seats: &[SeatRecord],
        rank: u32,
        min_probability: f64,
        filter: &SeatFilter,
    ) -> Selection {
        let (pool, source) = candidate_pool(seats, rank, &self.limits);
        if pool.is_empty() {
            let synthesized = synthesize_seats(rank, filter);
            debug!(
                rank,
                synthesized = synthesized.len(),
                "no cutoff rows matched; synthesizing template seats"
            );
            return Selection {
                entries: rank_candidates(&synthesized, rank, None),
                source: SelectionSource::Synthesized,
            };
        }

        let candidates = pool.len();
        let entries = rank_candidates(pool, rank, Some(min_probability));
        debug!(
            rank,
            candidates,
            kept = entries.len(),
            ?source,
            "scored cutoff candidates"
        );
        Selection { entries, source }
    }
}
