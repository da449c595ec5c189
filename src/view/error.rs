use thiserror::Error;

/// Failures answering a view request. All are caller/input errors; nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("No sample with label '{0}' in the dataset")]
    LabelNotFound(String),

    #[error("Sample index {index} out of range (dataset has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No data for selection: {0}")]
    EmptySelection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ViewError::LabelNotFound("32 Jan 2024 00:00".to_string());
        assert_eq!(
            error.to_string(),
            "No sample with label '32 Jan 2024 00:00' in the dataset"
        );
        assert_eq!(
            ViewError::EmptySelection("month 'Smarch'".to_string()).to_string(),
            "No data for selection: month 'Smarch'"
        );
    }
}
