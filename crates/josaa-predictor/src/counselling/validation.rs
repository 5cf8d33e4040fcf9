use serde::{Deserialize, Serialize};

use super::domain::{Category, CollegeType, Gender, Quota, RoundToken, UnknownValue};
use super::filter::{is_wildcard, SeatFilter};

/// Preference request as submitted by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub jee_rank: i64,
    pub category: String,
    pub college_type: String,
    pub preferred_branch: String,
    pub round_no: String,
    #[serde(default)]
    pub quota: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub min_probability: f64,
}

/// Request after validation: a positive rank, a threshold and the table
/// filter derived from the selector values.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceQuery {
    pub rank: u32,
    pub min_probability: f64,
    pub filter: SeatFilter,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("JEE rank must be a positive integer, got {0}")]
    InvalidRank(i64),
    #[error("invalid category: {0}")]
    Category(UnknownValue),
    #[error("invalid college type: {0}")]
    CollegeType(UnknownValue),
    #[error("round must be one of 1-6, got '{0}'")]
    InvalidRound(String),
    #[error("invalid quota: {0}")]
    Quota(UnknownValue),
    #[error("quota {quota} is not offered by {college_type} institutes")]
    QuotaNotOffered {
        quota: Quota,
        college_type: CollegeType,
    },
    #[error("invalid gender: {0}")]
    Gender(UnknownValue),
    #[error("minimum probability must lie within 0-100, got {0}")]
    InvalidMinProbability(f64),
}

fn optional<T>(
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, UnknownValue>,
    wrap: impl FnOnce(UnknownValue) -> ValidationError,
) -> Result<Option<T>, ValidationError> {
    if is_wildcard(value) {
        Ok(None)
    } else {
        parse(value).map(Some).map_err(wrap)
    }
}

pub fn validate_request(request: &PredictionRequest) -> Result<PreferenceQuery, ValidationError> {
    let rank = u32::try_from(request.jee_rank)
        .ok()
        .filter(|rank| *rank > 0)
        .ok_or(ValidationError::InvalidRank(request.jee_rank))?;

    let category = optional(&request.category, Category::parse, ValidationError::Category)?;
    let college_type = optional(
        &request.college_type,
        CollegeType::parse,
        ValidationError::CollegeType,
    )?;

    let round = RoundToken::new(&request.round_no);
    if !round.is_known() {
        return Err(ValidationError::InvalidRound(request.round_no.trim().to_string()));
    }

    let quota = optional(&request.quota, Quota::parse, ValidationError::Quota)?;
    if let (Some(quota), Some(college_type)) = (quota, college_type) {
        if !college_type.allowed_quotas().contains(&quota) {
            return Err(ValidationError::QuotaNotOffered {
                quota,
                college_type,
            });
        }
    }

    let gender = optional(&request.gender, Gender::parse, ValidationError::Gender)?;

    let min_probability = request.min_probability;
    if !(0.0..=100.0).contains(&min_probability) {
        return Err(ValidationError::InvalidMinProbability(min_probability));
    }

    let filter = SeatFilter {
        category,
        college_type,
        branch: None,
        round: Some(round),
        quota,
        gender,
    }
    .with_branch(&request.preferred_branch);

    Ok(PreferenceQuery {
        rank,
        min_probability,
        filter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PredictionRequest {
        PredictionRequest {
            jee_rank: 5000,
            category: "OPEN".to_string(),
            college_type: "NIT".to_string(),
            preferred_branch: "Civil Engineering".to_string(),
            round_no: "1".to_string(),
            quota: "OS".to_string(),
            gender: "Gender-Neutral".to_string(),
            min_probability: 0.0,
        }
    }

    #[test]
    fn valid_request_builds_filter() {
        let query = validate_request(&request()).expect("valid");
        assert_eq!(query.rank, 5000);
        assert_eq!(query.filter.college_type, Some(CollegeType::Nit));
        assert_eq!(query.filter.quota, Some(Quota::Os));
        assert_eq!(query.filter.branch.as_deref(), Some("Civil Engineering"));
        assert_eq!(query.filter.round, Some(RoundToken::new("1")));
    }

    #[test]
    fn wildcards_clear_filter_dimensions() {
        let mut request = request();
        request.category = "All".to_string();
        request.college_type = "ALL".to_string();
        request.preferred_branch = "All".to_string();
        request.quota = String::new();
        request.gender = String::new();

        let query = validate_request(&request).expect("valid");
        assert_eq!(query.filter.category, None);
        assert_eq!(query.filter.college_type, None);
        assert_eq!(query.filter.branch, None);
        assert_eq!(query.filter.quota, None);
        assert_eq!(query.filter.gender, None);
    }

    #[test]
    fn rejects_non_positive_rank() {
        let mut request = request();
        request.jee_rank = 0;
        assert_eq!(
            validate_request(&request),
            Err(ValidationError::InvalidRank(0))
        );
        request.jee_rank = -12;
        assert!(matches!(
            validate_request(&request),
            Err(ValidationError::InvalidRank(-12))
        ));
    }

    #[test]
    fn rejects_quota_not_offered_by_college_type() {
        let mut request = request();
        request.college_type = "IIT".to_string();
        request.quota = "HS".to_string();
        let error = validate_request(&request).expect_err("HS is not an IIT quota");
        assert_eq!(error.to_string(), "quota HS is not offered by IIT institutes");
    }

    #[test]
    fn rejects_unknown_round_and_values() {
        let mut bad_round = request();
        bad_round.round_no = "7".to_string();
        assert!(matches!(
            validate_request(&bad_round),
            Err(ValidationError::InvalidRound(_))
        ));

        let mut bad_category = request();
        bad_category.category = "GENERAL".to_string();
        assert!(matches!(
            validate_request(&bad_category),
            Err(ValidationError::Category(_))
        ));

        let mut bad_gender = request();
        bad_gender.gender = "Male".to_string();
        assert!(matches!(
            validate_request(&bad_gender),
            Err(ValidationError::Gender(_))
        ));

        let mut bad_threshold = request();
        bad_threshold.min_probability = 120.0;
        assert!(matches!(
            validate_request(&bad_threshold),
            Err(ValidationError::InvalidMinProbability(_))
        ));
    }

    #[test]
    fn min_probability_defaults_to_zero() {
        let request: PredictionRequest = serde_json::from_value(serde_json::json!({
            "jee_rank": 1500,
            "category": "OPEN",
            "college_type": "IIT",
            "preferred_branch": "All",
            "round_no": "6"
        }))
        .expect("deserializes");
        assert_eq!(request.min_probability, 0.0);
        assert!(validate_request(&request).is_ok());
    }
}
