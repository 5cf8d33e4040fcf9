use super::domain::{Category, CollegeType, Gender, Quota, RoundToken, SeatRecord};

/// Equality filter applied to the cutoff table before selection. `None`
/// leaves a dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatFilter {
    pub category: Option<Category>,
    pub college_type: Option<CollegeType>,
    pub branch: Option<String>,
    pub round: Option<RoundToken>,
    pub quota: Option<Quota>,
    pub gender: Option<Gender>,
}

/// `true` for the "All"/"ALL" selector values and for blank input.
pub fn is_wildcard(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all")
}

impl SeatFilter {
    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = if is_wildcard(branch) {
            None
        } else {
            Some(branch.split_whitespace().collect::<Vec<_>>().join(" "))
        };
        self
    }

    pub fn matches(&self, seat: &SeatRecord) -> bool {
        self.category.map_or(true, |category| seat.category == category)
            && self
                .college_type
                .map_or(true, |college_type| seat.college_type == college_type)
            && self
                .branch
                .as_deref()
                .map_or(true, |branch| seat.academic_program.eq_ignore_ascii_case(branch))
            && self.round.as_ref().map_or(true, |round| &seat.round == round)
            && self.quota.map_or(true, |quota| seat.quota == quota)
            && self.gender.map_or(true, |gender| seat.gender.matches(gender))
    }

    /// Matching seats in source order.
    pub fn apply(&self, seats: &[SeatRecord]) -> Vec<SeatRecord> {
        seats
            .iter()
            .filter(|seat| self.matches(seat))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(program: &str, gender: Gender, round: &str) -> SeatRecord {
        SeatRecord {
            institute: "National Institute of Technology Warangal".to_string(),
            college_type: CollegeType::Nit,
            location: "Warangal".to_string(),
            academic_program: program.to_string(),
            category: Category::Open,
            round: RoundToken::new(round),
            quota: Quota::Os,
            gender,
            opening_rank: 1200,
            closing_rank: 3400,
        }
    }

    #[test]
    fn wildcards_leave_dimensions_open() {
        assert!(is_wildcard("All"));
        assert!(is_wildcard("ALL"));
        assert!(is_wildcard("  "));
        assert!(!is_wildcard("Allahabad"));

        let filter = SeatFilter::default().with_branch("all");
        assert_eq!(filter.branch, None);
        assert!(filter.matches(&seat("Civil Engineering", Gender::GenderNeutral, "1")));
    }

    #[test]
    fn branch_match_is_case_insensitive_equality() {
        let filter = SeatFilter::default().with_branch("computer  science and engineering");
        assert!(filter.matches(&seat(
            "Computer Science and Engineering",
            Gender::GenderNeutral,
            "1"
        )));
        assert!(!filter.matches(&seat(
            "Computer Science and Engineering (Dual Degree)",
            Gender::GenderNeutral,
            "1"
        )));
    }

    #[test]
    fn female_filter_accepts_supernumerary_seats() {
        let filter = SeatFilter {
            gender: Some(Gender::FemaleOnly),
            ..SeatFilter::default()
        };
        assert!(filter.matches(&seat("Civil Engineering", Gender::FemaleOnlySupernumerary, "2")));
        assert!(!filter.matches(&seat("Civil Engineering", Gender::GenderNeutral, "2")));
    }

    #[test]
    fn apply_keeps_source_order_and_exact_rounds() {
        let seats = vec![
            seat("Civil Engineering", Gender::GenderNeutral, "2"),
            seat("Mechanical Engineering", Gender::GenderNeutral, "1"),
            seat("Chemical Engineering", Gender::GenderNeutral, "2"),
        ];
        let filter = SeatFilter {
            round: Some(RoundToken::new("2")),
            quota: Some(Quota::Os),
            ..SeatFilter::default()
        };

        let matched = filter.apply(&seats);
        let programs: Vec<_> = matched.iter().map(|s| s.academic_program.as_str()).collect();
        assert_eq!(programs, vec!["Civil Engineering", "Chemical Engineering"]);
    }
}
