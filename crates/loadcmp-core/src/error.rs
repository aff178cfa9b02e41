#[derive(Debug, thiserror::Error)]
pub enum LoadcmpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("No result files matching `results-*.json` found in {0}")]
    NoResults(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_results_display() {
        let err = LoadcmpError::NoResults("./results".to_string());
        assert_eq!(
            err.to_string(),
            "No result files matching `results-*.json` found in ./results"
        );
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LoadcmpError = io_err.into();
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn serde_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("not valid json").unwrap_err();
        let err: LoadcmpError = json_err.into();
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn error_is_debug() {
        let err = LoadcmpError::NoResults("x".to_string());
        let debug = format!("{:?}", err);
        assert!(debug.contains("NoResults"));
    }
}
