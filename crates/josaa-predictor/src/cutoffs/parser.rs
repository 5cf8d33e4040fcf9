use super::normalizer::normalize_text;
use crate::counselling::domain::{
    Category, CollegeType, Gender, Quota, RoundToken, SeatRecord, UnknownValue, SENTINEL_RANK,
};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct RejectedRow {
    pub(crate) line: u64,
    pub(crate) reason: UnknownValue,
}

#[derive(Debug, Default)]
pub(crate) struct ParsedCutoffs {
    pub(crate) seats: Vec<SeatRecord>,
    pub(crate) rejected: Vec<RejectedRow>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<ParsedCutoffs, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut parsed = ParsedCutoffs::default();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |position| position.line());
        let row: CutoffRow = record.deserialize(Some(&headers))?;
        match row.into_seat() {
            Ok(seat) => parsed.seats.push(seat),
            Err(reason) => parsed.rejected.push(RejectedRow { line, reason }),
        }
    }

    Ok(parsed)
}

#[derive(Debug, Deserialize)]
struct CutoffRow {
    #[serde(rename = "Institute")]
    institute: String,
    #[serde(rename = "College Type")]
    college_type: String,
    #[serde(rename = "Location", default)]
    location: String,
    #[serde(rename = "Academic Program Name")]
    academic_program: String,
    #[serde(rename = "Seat Type")]
    seat_type: String,
    #[serde(rename = "Round")]
    round: String,
    #[serde(rename = "Quota")]
    quota: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(
        rename = "Opening Rank",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    opening_rank: Option<String>,
    #[serde(
        rename = "Closing Rank",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    closing_rank: Option<String>,
}

impl CutoffRow {
    fn into_seat(self) -> Result<SeatRecord, UnknownValue> {
        Ok(SeatRecord {
            college_type: CollegeType::parse(&self.college_type)?,
            category: Category::parse(&self.seat_type)?,
            quota: Quota::parse(&self.quota)?,
            gender: Gender::parse(&self.gender)?,
            round: RoundToken::new(&self.round),
            institute: normalize_text(&self.institute),
            location: normalize_text(&self.location),
            academic_program: normalize_text(&self.academic_program),
            opening_rank: parse_rank(self.opening_rank.as_deref()),
            closing_rank: parse_rank(self.closing_rank.as_deref()),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Positive whole ranks are kept; anything else (blank, "123P", "n/a",
/// zero) becomes the sentinel. The selector scores such rows at 0.
fn parse_rank(value: Option<&str>) -> u32 {
    let Some(trimmed) = value.map(str::trim) else {
        return SENTINEL_RANK;
    };

    if let Ok(rank) = trimmed.parse::<u32>() {
        return if rank > 0 { rank } else { SENTINEL_RANK };
    }

    match trimmed.parse::<f64>() {
        Ok(rank)
            if rank >= 1.0 && rank.fract() == 0.0 && rank <= f64::from(u32::MAX) =>
        {
            rank as u32
        }
        _ => SENTINEL_RANK,
    }
}

#[cfg(test)]
pub(crate) fn parse_rank_for_tests(value: Option<&str>) -> u32 {
    parse_rank(value)
}
