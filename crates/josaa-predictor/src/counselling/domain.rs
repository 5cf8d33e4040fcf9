use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank substituted for cutoff cells that are missing or cannot be parsed.
pub const SENTINEL_RANK: u32 = 9_999_999;

/// Raised when a label does not name any known counselling value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {kind} '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValue {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.trim().to_string(),
        }
    }
}

fn label_key(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CollegeType {
    Iit,
    Nit,
    Iiit,
    Gfti,
}

impl CollegeType {
    pub const fn ordered() -> [Self; 4] {
        [Self::Iit, Self::Nit, Self::Iiit, Self::Gfti]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Iit => "IIT",
            Self::Nit => "NIT",
            Self::Iiit => "IIIT",
            Self::Gfti => "GFTI",
        }
    }

    pub fn parse(value: &str) -> Result<Self, UnknownValue> {
        let key = label_key(value);
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(&key))
            .ok_or_else(|| UnknownValue::new("college type", value))
    }

    /// Quotas under which this kind of institute offers seats.
    pub const fn allowed_quotas(self) -> &'static [Quota] {
        match self {
            Self::Iit | Self::Iiit => &[Quota::Ai],
            Self::Nit => &[Quota::Hs, Quota::Os, Quota::Go, Quota::Jk, Quota::La],
            Self::Gfti => &[Quota::Ai, Quota::Hs, Quota::Os],
        }
    }

    pub const fn default_quota(self) -> Quota {
        match self {
            Self::Nit => Quota::Os,
            Self::Iit | Self::Iiit | Self::Gfti => Quota::Ai,
        }
    }
}

impl fmt::Display for CollegeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Seat type under which a cutoff is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Category {
    Open,
    OpenPwd,
    ObcNcl,
    ObcNclPwd,
    Ews,
    EwsPwd,
    Sc,
    ScPwd,
    St,
    StPwd,
}

impl Category {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::Open,
            Self::OpenPwd,
            Self::ObcNcl,
            Self::ObcNclPwd,
            Self::Ews,
            Self::EwsPwd,
            Self::Sc,
            Self::ScPwd,
            Self::St,
            Self::StPwd,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::OpenPwd => "OPEN (PwD)",
            Self::ObcNcl => "OBC-NCL",
            Self::ObcNclPwd => "OBC-NCL (PwD)",
            Self::Ews => "EWS",
            Self::EwsPwd => "EWS (PwD)",
            Self::Sc => "SC",
            Self::ScPwd => "SC (PwD)",
            Self::St => "ST",
            Self::StPwd => "ST (PwD)",
        }
    }

    pub fn parse(value: &str) -> Result<Self, UnknownValue> {
        let key = label_key(value);
        Self::ordered()
            .into_iter()
            .find(|category| label_key(category.label()) == key)
            .ok_or_else(|| UnknownValue::new("category", value))
    }
}

impl From<Category> for &'static str {
    fn from(value: Category) -> Self {
        value.label()
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Quota {
    Ai,
    Hs,
    Os,
    Go,
    Jk,
    La,
}

impl Quota {
    pub const fn ordered() -> [Self; 6] {
        [Self::Ai, Self::Hs, Self::Os, Self::Go, Self::Jk, Self::La]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ai => "AI",
            Self::Hs => "HS",
            Self::Os => "OS",
            Self::Go => "GO",
            Self::Jk => "JK",
            Self::La => "LA",
        }
    }

    pub fn parse(value: &str) -> Result<Self, UnknownValue> {
        let key = label_key(value);
        Self::ordered()
            .into_iter()
            .find(|quota| quota.label().eq_ignore_ascii_case(&key))
            .ok_or_else(|| UnknownValue::new("quota", value))
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gender pool of a seat. The supernumerary female pool is treated as the
/// same pool as `FemaleOnly` when matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Gender {
    GenderNeutral,
    FemaleOnly,
    FemaleOnlySupernumerary,
}

impl Gender {
    pub const fn ordered() -> [Self; 2] {
        [Self::GenderNeutral, Self::FemaleOnly]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GenderNeutral => "Gender-Neutral",
            Self::FemaleOnly => "Female-only",
            Self::FemaleOnlySupernumerary => "Female-only (including Supernumerary)",
        }
    }

    pub fn parse(value: &str) -> Result<Self, UnknownValue> {
        let key = label_key(value);
        if key == "gender-neutral" || key == "neutral" {
            Ok(Self::GenderNeutral)
        } else if key.starts_with("female-only") || key == "female" {
            if key.contains("supernumerary") {
                Ok(Self::FemaleOnlySupernumerary)
            } else {
                Ok(Self::FemaleOnly)
            }
        } else {
            Err(UnknownValue::new("gender", value))
        }
    }

    pub const fn is_female_only(self) -> bool {
        matches!(self, Self::FemaleOnly | Self::FemaleOnlySupernumerary)
    }

    pub const fn matches(self, requested: Gender) -> bool {
        self.is_female_only() == requested.is_female_only()
    }
}

impl From<Gender> for &'static str {
    fn from(value: Gender) -> Self {
        value.label()
    }
}

impl TryFrom<String> for Gender {
    type Error = UnknownValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counselling round as published ("1" through "6"). Rounds are compared as
/// text, never as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundToken(String);

impl RoundToken {
    pub const FIRST: &'static str = "1";
    pub const KNOWN: [&'static str; 6] = ["1", "2", "3", "4", "5", "6"];

    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }
}

impl fmt::Display for RoundToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One historical cutoff row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRecord {
    pub institute: String,
    pub college_type: CollegeType,
    pub location: String,
    #[serde(rename = "branch")]
    pub academic_program: String,
    pub category: Category,
    pub round: RoundToken,
    pub quota: Quota,
    pub gender: Gender,
    pub opening_rank: u32,
    pub closing_rank: u32,
}

impl SeatRecord {
    /// True when either cutoff was unreadable in the source data.
    pub fn has_placeholder_rank(&self) -> bool {
        self.opening_rank == SENTINEL_RANK || self.closing_rank == SENTINEL_RANK
    }
}

/// Ordinal bucket derived from an admission probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum ChanceLabel {
    VeryHigh,
    High,
    Moderate,
    Low,
    VeryLow,
    NoChance,
}

impl ChanceLabel {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 95.0 {
            Self::VeryHigh
        } else if probability >= 80.0 {
            Self::High
        } else if probability >= 60.0 {
            Self::Moderate
        } else if probability >= 40.0 {
            Self::Low
        } else if probability > 0.0 {
            Self::VeryLow
        } else {
            Self::NoChance
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High Chance",
            Self::High => "High Chance",
            Self::Moderate => "Moderate Chance",
            Self::Low => "Low Chance",
            Self::VeryLow => "Very Low Chance",
            Self::NoChance => "No Chance",
        }
    }
}

impl From<ChanceLabel> for &'static str {
    fn from(value: ChanceLabel) -> Self {
        value.label()
    }
}

/// A ranked row of the generated preference list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceEntry {
    pub preference: usize,
    #[serde(flatten)]
    pub seat: SeatRecord,
    pub probability: f64,
    pub chances: ChanceLabel,
}
