use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;

use crate::error::PipelineError;
use crate::model::record::Record;
use crate::repository::traits::RoutineRepository;

const DEFAULT_DATA_FILE: &str = "data/routine_data.csv";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The sample dataset written on first launch.
const SAMPLE_ROWS: [(&str, &str, &str); 4] = [
    ("2025-07-01", "Sleep", "8"),
    ("2025-07-01", "Work", "9"),
    ("2025-07-02", "Sleep", "7"),
    ("2025-07-02", "Leisure", "3"),
];

/// File-backed repository over the routine CSV.
///
/// The constructor bootstraps a sample file when none exists yet; a second
/// construction with the file present is a no-op.
pub struct CsvRoutineRepository {
    file_path: PathBuf,
    created: bool,
}

impl CsvRoutineRepository {
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let mut created = false;

        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            write_sample(&path)?;
            created = true;
        }

        Ok(CsvRoutineRepository {
            file_path: path,
            created,
        })
    }

    /// True when this construction wrote the sample file.
    pub fn was_created(&self) -> bool {
        self.created
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

fn write_sample(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", "activity", "hours_spent"])?;
    for (date, activity, hours) in SAMPLE_ROWS {
        writer.write_record([date, activity, hours])?;
    }
    writer.flush()?;
    Ok(())
}

impl RoutineRepository for CsvRoutineRepository {
    fn load(&self) -> Result<Vec<Record>, PipelineError> {
        let file = File::open(&self.file_path).map_err(PipelineError::load)?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        let headers = reader.headers().map_err(PipelineError::load)?;
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let date_col = normalized.iter().position(|h| h == "date");
        let activity_col = normalized.iter().position(|h| h == "activity");
        let hours_col = normalized.iter().position(|h| h == "hours_spent");

        let (date_col, activity_col, hours_col) = match (date_col, activity_col, hours_col) {
            (Some(d), Some(a), Some(h)) => (d, a, h),
            _ => {
                let missing = [
                    ("date", date_col),
                    ("activity", activity_col),
                    ("hours_spent", hours_col),
                ]
                .iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
                return Err(PipelineError::Schema(missing));
            }
        };

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row.map_err(PipelineError::load)?;

            // Unparseable dates stay in the table as None; the row is
            // excluded from date-keyed views, nothing aborts.
            let date = row
                .get(date_col)
                .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok());

            let activity = row
                .get(activity_col)
                .unwrap_or_default()
                .trim()
                .to_string();

            let hours_raw = row.get(hours_col).unwrap_or_default().trim();
            let hours_spent: f64 = hours_raw.parse().map_err(|_| {
                // Line 1 is the header.
                PipelineError::load(format!(
                    "line {}: invalid hours_spent value {:?}",
                    i + 2,
                    hours_raw
                ))
            })?;

            records.push(Record {
                date,
                activity,
                hours_spent,
            });
        }

        Ok(records)
    }

    fn raw_rows(&self) -> Result<Vec<String>, PipelineError> {
        let file = File::open(&self.file_path).map_err(PipelineError::load)?;
        let rows: Result<Vec<String>, _> = BufReader::new(file).lines().collect();
        rows.map_err(PipelineError::load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn repo_with(content: &str) -> (tempfile::TempDir, CsvRoutineRepository) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("routine_data.csv");
        fs::write(&path, content).unwrap();
        let repo = CsvRoutineRepository::new(Some(path)).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_bootstrap_writes_sample() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("routine_data.csv");

        let repo = CsvRoutineRepository::new(Some(path.clone())).unwrap();
        assert!(repo.was_created());

        let records = repo.load().unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].activity, "Sleep");
        assert_eq!(records[0].hours_spent, 8.0);
        assert_eq!(
            records[0].date,
            Some(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap())
        );
    }

    #[test]
    fn test_bootstrap_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("routine_data.csv");

        let first = CsvRoutineRepository::new(Some(path.clone())).unwrap();
        assert!(first.was_created());
        let content_after_first = fs::read_to_string(&path).unwrap();

        let second = CsvRoutineRepository::new(Some(path.clone())).unwrap();
        assert!(!second.was_created());
        let content_after_second = fs::read_to_string(&path).unwrap();

        assert_eq!(content_after_first, content_after_second);
    }

    #[test]
    fn test_schema_error_lists_missing_columns() {
        let (_dir, repo) = repo_with("date,hours\n2025-07-01,8\n");
        let err = repo.load().unwrap_err();
        match err {
            PipelineError::Schema(missing) => {
                assert_eq!(missing, vec!["activity".to_string(), "hours_spent".to_string()]);
            }
            other => panic!("expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_normalization() {
        let (_dir, repo) = repo_with(" Date ,ACTIVITY, Hours_Spent \n2025-07-01,Sleep,8\n");
        let records = repo.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].activity, "Sleep");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let (_dir, repo) = repo_with("date,activity,hours_spent,notes\n2025-07-01,Sleep,8,fine\n");
        let records = repo.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hours_spent, 8.0);
    }

    #[test]
    fn test_unparseable_date_becomes_none() {
        let (_dir, repo) =
            repo_with("date,activity,hours_spent\nnot-a-date,Sleep,8\n2025-07-01,Work,9\n");
        let records = repo.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, None);
        assert_eq!(records[0].activity, "Sleep");
        assert!(records[1].date.is_some());
    }

    #[test]
    fn test_invalid_hours_is_load_error() {
        let (_dir, repo) = repo_with("date,activity,hours_spent\n2025-07-01,Sleep,lots\n");
        let err = repo.load().unwrap_err();
        assert!(matches!(err, PipelineError::Load(_)));
        assert!(format!("{}", err).contains("failed to read or process the CSV"));
    }

    #[test]
    fn test_ragged_row_is_load_error() {
        let (_dir, repo) = repo_with("date,activity,hours_spent\n2025-07-01,Sleep\n");
        let err = repo.load().unwrap_err();
        assert!(matches!(err, PipelineError::Load(_)));
    }

    #[test]
    fn test_raw_rows_are_verbatim() {
        let content = "date,activity,hours_spent\n2025-07-01,Sleep,8\n";
        let (_dir, repo) = repo_with(content);
        let rows = repo.raw_rows().unwrap();
        assert_eq!(
            rows,
            vec![
                "date,activity,hours_spent".to_string(),
                "2025-07-01,Sleep,8".to_string(),
            ]
        );
    }
}
