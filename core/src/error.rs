use thiserror::Error;

/// Fatal pipeline errors. Either of these aborts the whole render pass:
/// the UI shows the message and nothing else, no partial tables or charts.
///
/// Unparseable dates in individual rows are not errors; those rows are
/// loaded with a `None` date and simply drop out of date-keyed views.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The data file could not be read, or is not valid delimited text.
    #[error("failed to read or process the CSV: {0}")]
    Load(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Required columns are missing after header normalization.
    #[error("CSV must have these columns: {}", .0.join(", "))]
    Schema(Vec<String>),
}

impl PipelineError {
    pub fn load(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        PipelineError::Load(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_display_includes_cause() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = PipelineError::load(io_error);
        let display = format!("{}", error);
        assert!(display.contains("failed to read or process the CSV"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_schema_display_lists_columns() {
        let error = PipelineError::Schema(vec!["date".to_string(), "hours_spent".to_string()]);
        let display = format!("{}", error);
        assert!(display.contains("date, hours_spent"));
    }
}
