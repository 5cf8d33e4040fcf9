use super::domain::{Category, CollegeType, Gender, Quota, RoundToken};
use crate::cutoffs::CutoffTable;

pub const WILDCARD: &str = "All";
pub const COLLEGE_TYPE_WILDCARD: &str = "ALL";

/// Offered when no cutoff data has been loaded.
pub const DEFAULT_BRANCHES: [&str; 10] = [
    "Computer Science and Engineering",
    "Electronics and Communication Engineering",
    "Mechanical Engineering",
    "Civil Engineering",
    "Electrical Engineering",
    "Chemical Engineering",
    "Aerospace Engineering",
    "Biotechnology",
    "Production and Industrial Engineering",
    "Metallurgical and Materials Engineering",
];

pub fn categories() -> Vec<&'static str> {
    std::iter::once(WILDCARD)
        .chain(Category::ordered().into_iter().map(Category::label))
        .collect()
}

pub fn college_types() -> Vec<&'static str> {
    std::iter::once(COLLEGE_TYPE_WILDCARD)
        .chain(CollegeType::ordered().into_iter().map(CollegeType::label))
        .collect()
}

pub fn rounds() -> Vec<&'static str> {
    RoundToken::KNOWN.to_vec()
}

pub fn genders() -> Vec<&'static str> {
    Gender::ordered().into_iter().map(Gender::label).collect()
}

pub fn quotas_for(college_type: CollegeType) -> Vec<&'static str> {
    college_type
        .allowed_quotas()
        .iter()
        .map(|quota| quota.label())
        .collect()
}

pub fn all_quotas() -> Vec<&'static str> {
    Quota::ordered().into_iter().map(Quota::label).collect()
}

/// Programs present in `table`, or the default list for an empty table.
pub fn branches(table: &CutoffTable) -> Vec<String> {
    let programs = table.programs();
    if programs.is_empty() {
        DEFAULT_BRANCHES.iter().map(|name| name.to_string()).collect()
    } else {
        programs
    }
}
