use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::counselling::domain::{Category, CollegeType, Gender, RoundToken, SeatRecord};
use crate::counselling::service::{CutoffRepository, PreferenceService, RepositoryError};
use crate::counselling::validation::PredictionRequest;
use crate::cutoffs::CutoffTable;

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    table: CutoffTable,
}

impl MemoryRepository {
    pub(super) fn with_seats(seats: Vec<SeatRecord>) -> Self {
        Self {
            table: CutoffTable::new(seats),
        }
    }
}

impl CutoffRepository for MemoryRepository {
    fn snapshot(&self) -> Result<CutoffTable, RepositoryError> {
        Ok(self.table.clone())
    }
}

pub(super) struct UnavailableRepository;

impl CutoffRepository for UnavailableRepository {
    fn snapshot(&self) -> Result<CutoffTable, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }
}

pub(super) fn seat(
    institute: &str,
    college_type: CollegeType,
    program: &str,
    opening_rank: u32,
    closing_rank: u32,
) -> SeatRecord {
    let location = institute
        .rsplit(' ')
        .next()
        .unwrap_or_default()
        .to_string();
    SeatRecord {
        institute: institute.to_string(),
        college_type,
        location,
        academic_program: program.to_string(),
        category: Category::Open,
        round: RoundToken::new("1"),
        quota: college_type.default_quota(),
        gender: Gender::GenderNeutral,
        opening_rank,
        closing_rank,
    }
}

pub(super) fn cutoff_seats() -> Vec<SeatRecord> {
    vec![
        seat(
            "Indian Institute of Technology Bombay",
            CollegeType::Iit,
            "Computer Science and Engineering",
            1,
            66,
        ),
        seat(
            "Indian Institute of Technology Roorkee",
            CollegeType::Iit,
            "Civil Engineering",
            4200,
            5600,
        ),
        seat(
            "Indian Institute of Technology Guwahati",
            CollegeType::Iit,
            "Civil Engineering",
            5100,
            6900,
        ),
        seat(
            "Indian Institute of Technology Patna",
            CollegeType::Iit,
            "Civil Engineering",
            7000,
            9800,
        ),
        seat(
            "National Institute of Technology Warangal",
            CollegeType::Nit,
            "Civil Engineering",
            4800,
            5400,
        ),
    ]
}

pub(super) fn request(rank: i64, college_type: &str, branch: &str) -> PredictionRequest {
    PredictionRequest {
        jee_rank: rank,
        category: "OPEN".to_string(),
        college_type: college_type.to_string(),
        preferred_branch: branch.to_string(),
        round_no: "1".to_string(),
        quota: String::new(),
        gender: "Gender-Neutral".to_string(),
        min_probability: 0.0,
    }
}

pub(super) fn build_service() -> Arc<PreferenceService<MemoryRepository>> {
    Arc::new(PreferenceService::new(Arc::new(
        MemoryRepository::with_seats(cutoff_seats()),
    )))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
