use super::domain::{Category, CollegeType, Gender, Quota, RoundToken, SeatRecord};
use super::filter::SeatFilter;

pub const DEFAULT_BRANCH: &str = "Computer Science and Engineering";

/// Fixed institute family used to synthesize plausible seats when the
/// cutoff table has nothing to offer.
#[derive(Debug)]
pub struct CollegeTemplate {
    pub college_type: CollegeType,
    pub name: &'static str,
    pub locations: &'static [&'static str],
}

static TEMPLATES: [CollegeTemplate; 4] = [
    CollegeTemplate {
        college_type: CollegeType::Iit,
        name: "Indian Institute of Technology",
        locations: &["Bombay", "Delhi", "Madras", "Kanpur", "Kharagpur", "Roorkee"],
    },
    CollegeTemplate {
        college_type: CollegeType::Nit,
        name: "National Institute of Technology",
        locations: &["Tiruchirappalli", "Warangal", "Surathkal", "Calicut", "Jaipur"],
    },
    CollegeTemplate {
        college_type: CollegeType::Iiit,
        name: "Indian Institute of Information Technology",
        locations: &["Allahabad", "Gwalior", "Jabalpur", "Kancheepuram", "Lucknow"],
    },
    CollegeTemplate {
        college_type: CollegeType::Gfti,
        name: "Government Funded Technical Institute",
        locations: &["Mesra", "Shibpur", "Tezpur", "Puducherry", "Silchar"],
    },
];

/// Template for the requested type. Without a type, the first template
/// whose institutes offer `quota` (IIT when no quota was requested).
pub fn template_for(
    college_type: Option<CollegeType>,
    quota: Option<Quota>,
) -> &'static CollegeTemplate {
    let found = match college_type {
        Some(wanted) => TEMPLATES
            .iter()
            .find(|template| template.college_type == wanted),
        None => TEMPLATES.iter().find(|template| {
            quota.map_or(true, |quota| {
                template.college_type.allowed_quotas().contains(&quota)
            })
        }),
    };
    found.unwrap_or(&TEMPLATES[0])
}

/// One seat per template location with cutoffs placed around `rank` on a
/// fixed offset schedule. Unconstrained filter dimensions fall back to
/// OPEN, round 1, the type's default quota and gender-neutral seats; a
/// quota the template's institutes do not offer is replaced by that default.
pub fn synthesize_seats(rank: u32, filter: &SeatFilter) -> Vec<SeatRecord> {
    let template = template_for(filter.college_type, filter.quota);
    let quota = filter
        .quota
        .filter(|quota| template.college_type.allowed_quotas().contains(quota))
        .unwrap_or_else(|| template.college_type.default_quota());
    let branch = filter
        .branch
        .clone()
        .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
    let rank = i64::from(rank);

    template
        .locations
        .iter()
        .zip(0_i64..)
        .map(|(location, index)| SeatRecord {
            institute: format!("{} {}", template.name, location),
            college_type: template.college_type,
            location: (*location).to_string(),
            academic_program: branch.clone(),
            category: filter.category.unwrap_or(Category::Open),
            round: filter
                .round
                .clone()
                .unwrap_or_else(|| RoundToken::new(RoundToken::FIRST)),
            quota,
            gender: filter.gender.unwrap_or(Gender::GenderNeutral),
            opening_rank: clamp_rank((rank - (1000 - index * 150)).max(100)),
            closing_rank: clamp_rank((rank + 200 + index * 100).max(500)),
        })
        .collect()
}

fn clamp_rank(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
