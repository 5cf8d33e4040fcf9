use crate::infra::{load_table, resolve_cutoffs_path, InMemoryCutoffRepository};
use chrono::{DateTime, Utc};
use clap::Args;
use josaa_predictor::counselling::{
    catalog, ChanceLabel, PredictionOutcome, PredictionRequest, PreferenceService,
    ProbabilityHistogram, SelectionSource,
};
use josaa_predictor::error::AppError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

const BAR_WIDTH: usize = 40;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// JEE rank of the student
    #[arg(long)]
    pub(crate) rank: i64,
    /// Seat type, e.g. OPEN or OBC-NCL ("All" for every category)
    #[arg(long, default_value = "OPEN")]
    pub(crate) category: String,
    /// IIT, NIT, IIIT, GFTI or ALL
    #[arg(long, default_value = "ALL")]
    pub(crate) college_type: String,
    /// Academic program name ("All" for every program)
    #[arg(long, default_value = "All")]
    pub(crate) branch: String,
    /// Counselling round, 1-6
    #[arg(long, default_value = "1")]
    pub(crate) round: String,
    /// Quota code (AI, HS, OS, GO, JK, LA); empty for every quota
    #[arg(long, default_value = "")]
    pub(crate) quota: String,
    #[arg(long, default_value = "Gender-Neutral")]
    pub(crate) gender: String,
    /// Drop rows scoring below this probability
    #[arg(long, default_value_t = 0.0)]
    pub(crate) min_probability: f64,
    /// Cutoff CSV (defaults to APP_CUTOFFS_PATH)
    #[arg(long)]
    pub(crate) cutoffs: Option<PathBuf>,
    /// Print the report as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

impl PredictArgs {
    fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            jee_rank: self.rank,
            category: self.category.clone(),
            college_type: self.college_type.clone(),
            preferred_branch: self.branch.clone(),
            round_no: self.round.clone(),
            quota: self.quota.clone(),
            gender: self.gender.clone(),
            min_probability: self.min_probability,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct BranchesArgs {
    /// Cutoff CSV (defaults to APP_CUTOFFS_PATH)
    #[arg(long)]
    pub(crate) cutoffs: Option<PathBuf>,
}

/// One bar of the probability histogram; `upper` is exclusive except for
/// the last bucket, which also holds 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct HistogramBucket {
    pub(crate) lower: f64,
    pub(crate) upper: f64,
    pub(crate) count: usize,
}

#[derive(Debug, Serialize)]
struct PredictionReport<'a> {
    generated_at: DateTime<Utc>,
    rank: i64,
    #[serde(flatten)]
    outcome: &'a PredictionOutcome,
    buckets: Vec<HistogramBucket>,
}

pub(crate) fn histogram_buckets(histogram: &ProbabilityHistogram) -> Vec<HistogramBucket> {
    let bins = usize::from(histogram.nbinsx.max(1));
    let width = 100.0 / bins as f64;
    let mut buckets: Vec<HistogramBucket> = (0..bins)
        .map(|index| HistogramBucket {
            lower: index as f64 * width,
            upper: (index + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for probability in histogram.x.iter().copied().filter(|p| p.is_finite()) {
        let index = ((probability.clamp(0.0, 100.0) / width) as usize).min(bins - 1);
        buckets[index].count += 1;
    }
    buckets
}

fn source_label(source: SelectionSource) -> &'static str {
    match source {
        SelectionSource::Windows => "cutoff rows near your rank",
        SelectionSource::Nearest => "closest cutoff rows (no row within the rank windows)",
        SelectionSource::Synthesized => "estimated seats (no matching cutoff data)",
    }
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let cutoffs = resolve_cutoffs_path(args.cutoffs.clone())?;
    let table = load_table(cutoffs.as_deref())?;
    let service = PreferenceService::new(Arc::new(InMemoryCutoffRepository::new(table)));

    let outcome = service.predict(&args.to_request())?;

    if args.json {
        let report = PredictionReport {
            generated_at: Utc::now(),
            rank: args.rank,
            outcome: &outcome,
            buckets: histogram_buckets(&outcome.plot_data),
        };
        serde_json::to_writer_pretty(std::io::stdout().lock(), &report)
            .map_err(std::io::Error::from)?;
        println!();
    } else {
        render_prediction(args.rank, &outcome);
    }
    Ok(())
}

pub(crate) fn run_branches(args: BranchesArgs) -> Result<(), AppError> {
    let cutoffs = resolve_cutoffs_path(args.cutoffs)?;
    let table = load_table(cutoffs.as_deref())?;
    for branch in catalog::branches(&table) {
        println!("{branch}");
    }
    Ok(())
}

fn render_prediction(rank: i64, outcome: &PredictionOutcome) {
    println!(
        "Preference list for JEE rank {} ({} options, {})",
        rank,
        outcome.preferences.len(),
        source_label(outcome.source)
    );

    if outcome.preferences.is_empty() {
        println!("No option reached the requested minimum probability.");
        return;
    }

    println!(
        "{:>4}  {:<48} {:<40} {:>8} {:>8} {:>7}  {}",
        "#", "Institute", "Program", "Opening", "Closing", "Chance", "Outlook"
    );
    for entry in &outcome.preferences {
        println!(
            "{:>4}  {:<48} {:<40} {:>8} {:>8} {:>6.2}%  {}",
            entry.preference,
            truncate(&entry.seat.institute, 48),
            truncate(&entry.seat.academic_program, 40),
            entry.seat.opening_rank,
            entry.seat.closing_rank,
            entry.probability,
            entry.chances.label()
        );
    }

    let mut outlook: BTreeMap<ChanceLabel, usize> = BTreeMap::new();
    for entry in &outcome.preferences {
        *outlook.entry(entry.chances).or_default() += 1;
    }
    println!("\nOutlook summary:");
    for (label, count) in outlook {
        println!("- {}: {}", label.label(), count);
    }

    let buckets = histogram_buckets(&outcome.plot_data);
    let tallest = buckets.iter().map(|bucket| bucket.count).max().unwrap_or(0);
    println!("\nProbability histogram ({} bins):", outcome.plot_data.nbinsx);
    for bucket in buckets.iter().filter(|bucket| bucket.count > 0) {
        let bar = (bucket.count * BAR_WIDTH).div_ceil(tallest.max(1));
        println!(
            "  {:>5.1}-{:<5.1} {:>3} {}",
            bucket.lower,
            bucket.upper,
            bucket.count,
            "#".repeat(bar)
        );
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut shortened: String = value.chars().take(width.saturating_sub(1)).collect();
        shortened.push('…');
        shortened
    }
}
