use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing::{debug, info};

pub const USER_NAME_COLUMN: &str = "UserName";

/// One matching row, rendered as `"column: value"` strings in header order
/// with the user name column left out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConcertRecord(Vec<String>);

impl ConcertRecord {
    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

/// How the queried name is prepared before it is compared with the
/// lower-cased `UserName` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatching {
    /// Compare the query exactly as given, so `"Jack"` never matches
    #[default]
    AsGiven,
    /// Lower-case the query as well
    CaseInsensitive,
}

/// Reads concert rows for a user out of a CSV file
#[derive(Debug, Clone)]
pub struct ConcertLookup {
    path: PathBuf,
    matching: NameMatching,
}

impl ConcertLookup {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            matching: NameMatching::default(),
        }
    }

    pub fn with_matching(mut self, matching: NameMatching) -> Self {
        self.matching = matching;
        self
    }

    /// All concerts booked for `user_name`; an empty list when nobody matches
    pub fn lookup(&self, user_name: &str) -> Result<Vec<ConcertRecord>> {
        let reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open concert data {}", self.path.display()))?;
        let all_concerts = self
            .collect_matches(reader, user_name)
            .with_context(|| format!("Failed to read concert data {}", self.path.display()))?;

        info!("Found {} concerts for {}", all_concerts.len(), user_name);
        debug!("Concerts: {:?}", all_concerts);
        Ok(all_concerts)
    }

    fn collect_matches<R: Read>(
        &self,
        mut reader: csv::Reader<R>,
        user_name: &str,
    ) -> Result<Vec<ConcertRecord>> {
        let headers = reader.headers()?.clone();
        let user_column = headers
            .iter()
            .position(|header| header == USER_NAME_COLUMN)
            .ok_or_else(|| anyhow!("missing {} column", USER_NAME_COLUMN))?;

        let query = match self.matching {
            NameMatching::AsGiven => user_name.to_string(),
            NameMatching::CaseInsensitive => user_name.to_lowercase(),
        };

        let mut all_concerts = Vec::new();
        for row in reader.records() {
            let row = row?;
            let stored = row.get(user_column).unwrap_or_default();
            if stored.to_lowercase() != query {
                continue;
            }

            let fields = headers
                .iter()
                .zip(row.iter())
                .enumerate()
                .filter(|(index, _)| *index != user_column)
                .map(|(_, (key, value))| format!("{}: {}", key, value))
                .collect();
            all_concerts.push(ConcertRecord(fields));
        }
        Ok(all_concerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CONCERTS: &str = "\
UserName,Artist,Date
jack,Radiohead,2024-05-01
Jill,Portishead,2024-06-02
JACK,Massive Attack,2024-07-03
";

    fn lookup_for(contents: &str) -> (TempDir, ConcertLookup) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("concert_data.csv");
        fs::write(&path, contents).unwrap();
        (dir, ConcertLookup::new(path))
    }

    #[test]
    fn test_lookup_matches_lower_cased_rows() -> Result<()> {
        let (_dir, lookup) = lookup_for(CONCERTS);
        let concerts = lookup.lookup("jack")?;

        assert_eq!(concerts.len(), 2);
        assert_eq!(concerts[0].fields(), ["Artist: Radiohead", "Date: 2024-05-01"]);
        assert_eq!(
            concerts[1].fields(),
            ["Artist: Massive Attack", "Date: 2024-07-03"]
        );
        Ok(())
    }

    #[test]
    fn test_mixed_case_query_matches_nothing_by_default() -> Result<()> {
        let (_dir, lookup) = lookup_for(CONCERTS);
        assert!(lookup.lookup("Jack")?.is_empty());
        assert!(lookup.lookup("Jill")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_case_insensitive_matching() -> Result<()> {
        let (_dir, lookup) = lookup_for(CONCERTS);
        let lookup = lookup.with_matching(NameMatching::CaseInsensitive);

        assert_eq!(lookup.lookup("Jack")?.len(), 2);
        assert_eq!(
            lookup.lookup("JILL")?[0].fields(),
            ["Artist: Portishead", "Date: 2024-06-02"]
        );
        Ok(())
    }

    #[test]
    fn test_no_matches_is_empty() -> Result<()> {
        let (_dir, lookup) = lookup_for(CONCERTS);
        assert!(lookup.lookup("nobody")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_user_name_never_returned() -> Result<()> {
        let (_dir, lookup) = lookup_for("Venue,UserName,Artist\nO2,jack,Blur\n");
        let concerts = lookup.lookup("jack")?;

        assert_eq!(concerts[0].fields(), ["Venue: O2", "Artist: Blur"]);
        assert!(concerts
            .iter()
            .flat_map(|c| c.fields())
            .all(|field| !field.starts_with(USER_NAME_COLUMN)));
        Ok(())
    }

    #[test]
    fn test_record_serializes_as_string_list() -> Result<()> {
        let (_dir, lookup) = lookup_for(CONCERTS);
        let concerts = lookup.lookup("jack")?;
        assert_eq!(
            serde_json::to_value(&concerts[0])?,
            serde_json::json!(["Artist: Radiohead", "Date: 2024-05-01"])
        );
        Ok(())
    }

    #[test]
    fn test_missing_user_name_column() {
        let (_dir, lookup) = lookup_for("Name,Artist\njack,Radiohead\n");
        let err = lookup.lookup("jack").unwrap_err();
        assert!(format!("{:#}", err).contains("missing UserName column"));
    }

    #[test]
    fn test_missing_file() {
        let lookup = ConcertLookup::new("/no/such/concert_data.csv");
        assert!(lookup.lookup("jack").is_err());
    }
}
