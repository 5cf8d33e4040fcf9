mod normalizer;
mod parser;

use crate::counselling::domain::SeatRecord;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug)]
pub enum CutoffImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CutoffImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CutoffImportError::Io(err) => write!(f, "failed to read cutoff data: {}", err),
            CutoffImportError::Csv(err) => write!(f, "invalid cutoff CSV data: {}", err),
        }
    }
}

impl std::error::Error for CutoffImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CutoffImportError::Io(err) => Some(err),
            CutoffImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CutoffImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CutoffImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Immutable, cheaply clonable set of historical cutoff rows in source order.
#[derive(Debug, Clone)]
pub struct CutoffTable {
    seats: Arc<[SeatRecord]>,
}

impl Default for CutoffTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CutoffTable {
    pub fn new(seats: Vec<SeatRecord>) -> Self {
        Self {
            seats: Arc::from(seats),
        }
    }

    pub fn seats(&self) -> &[SeatRecord] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Distinct academic program names, sorted.
    pub fn programs(&self) -> Vec<String> {
        self.seats
            .iter()
            .map(|seat| seat.academic_program.as_str())
            .filter(|program| !program.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

pub struct CutoffImporter;

impl CutoffImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CutoffTable, CutoffImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        info!(path = %path.display(), seats = table.len(), "loaded cutoff table");
        Ok(table)
    }

    /// Rows naming an unknown college type, seat type, quota or gender are
    /// skipped; rank cells that cannot be parsed become the sentinel rank.
    pub fn from_reader<R: Read>(reader: R) -> Result<CutoffTable, CutoffImportError> {
        let parsed = parser::parse_records(reader)?;

        if let Some(first) = parsed.rejected.first() {
            warn!(
                skipped = parsed.rejected.len(),
                first_line = first.line,
                reason = %first.reason,
                "skipped cutoff rows with unrecognised values"
            );
        }

        Ok(CutoffTable::new(parsed.seats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counselling::domain::{
        Category, CollegeType, Gender, Quota, RoundToken, SENTINEL_RANK,
    };
    use std::io::Cursor;

    const HEADER: &str = "Institute,College Type,Location,Academic Program Name,Seat Type,Round,Quota,Gender,Opening Rank,Closing Rank\n";

    #[test]
    fn parse_rank_substitutes_sentinel() {
        assert_eq!(parser::parse_rank_for_tests(Some("1234")), 1234);
        assert_eq!(parser::parse_rank_for_tests(Some(" 77 ")), 77);
        assert_eq!(parser::parse_rank_for_tests(Some("812.0")), 812);
        assert_eq!(parser::parse_rank_for_tests(Some("123P")), SENTINEL_RANK);
        assert_eq!(parser::parse_rank_for_tests(Some("0")), SENTINEL_RANK);
        assert_eq!(parser::parse_rank_for_tests(Some("-5")), SENTINEL_RANK);
        assert_eq!(parser::parse_rank_for_tests(None), SENTINEL_RANK);
    }

    #[test]
    fn normalize_text_collapses_whitespace() {
        let normalized = normalizer::normalize_for_tests("\u{feff}Computer  Science   and Engineering ");
        assert_eq!(normalized, "Computer Science and Engineering");
        assert_eq!(
            normalizer::normalize_for_tests("Civil\u{a0}Engineering\u{200b}"),
            "Civil Engineering"
        );
        assert_eq!(normalizer::normalize_for_tests(" \u{2060} "), "");
    }

    #[test]
    fn importer_reads_rows_in_source_order() {
        let csv = format!(
            "{HEADER}\
Indian Institute of Technology Bombay,IIT,Bombay,Computer Science and Engineering,OPEN,1,AI,Gender-Neutral,1,66\n\
National Institute of Technology Warangal,NIT,Warangal,Civil Engineering,OBC-NCL,2,OS,Female-only (including Supernumerary),8500,11200\n"
        );
        let table = CutoffImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(table.len(), 2);
        let first = &table.seats()[0];
        assert_eq!(first.college_type, CollegeType::Iit);
        assert_eq!(first.category, Category::Open);
        assert_eq!(first.quota, Quota::Ai);
        assert_eq!((first.opening_rank, first.closing_rank), (1, 66));

        let second = &table.seats()[1];
        assert_eq!(second.gender, Gender::FemaleOnlySupernumerary);
        assert_eq!(second.round, RoundToken::new("2"));
        assert_eq!(second.category, Category::ObcNcl);
    }

    #[test]
    fn importer_keeps_rows_with_malformed_ranks() {
        let csv = format!(
            "{HEADER}Indian Institute of Technology Delhi,IIT,Delhi,Mathematics and Computing,SC (PwD),1,AI,Gender-Neutral,45P,\n"
        );
        let table = CutoffImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        let seat = &table.seats()[0];
        assert_eq!(seat.category, Category::ScPwd);
        assert_eq!(seat.opening_rank, SENTINEL_RANK);
        assert_eq!(seat.closing_rank, SENTINEL_RANK);
    }

    #[test]
    fn importer_skips_rows_with_unknown_values() {
        let csv = format!(
            "{HEADER}\
Some Private University,PRIVATE,Nowhere,Civil Engineering,OPEN,1,AI,Gender-Neutral,10,20\n\
Indian Institute of Technology Madras,IIT,Madras,Civil Engineering,OPEN,1,AI,Gender-Neutral,3000,5000\n"
        );
        let table = CutoffImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(table.len(), 1);
        assert_eq!(table.seats()[0].location, "Madras");
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = CutoffImporter::from_path("./does-not-exist.csv").expect_err("expected io error");

        match error {
            CutoffImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn programs_are_distinct_and_sorted() {
        let csv = format!(
            "{HEADER}\
IIT Bombay,IIT,Bombay,Mechanical Engineering,OPEN,1,AI,Gender-Neutral,900,2000\n\
IIT Delhi,IIT,Delhi,Civil Engineering,OPEN,1,AI,Gender-Neutral,3000,5000\n\
IIT Madras,IIT,Madras,Mechanical Engineering,OPEN,1,AI,Gender-Neutral,1500,2500\n"
        );
        let table = CutoffImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(
            table.programs(),
            vec!["Civil Engineering", "Mechanical Engineering"]
        );
    }
}
