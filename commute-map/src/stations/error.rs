//! Station directory error types.

use crate::domain::InvalidCoordinate;

/// Errors that can occur while loading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Reading the station file failed
    #[error("failed to read station data: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid in the configured encoding
    #[error("station data is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The delimited data is malformed
    #[error("malformed station data: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header
    #[error("station data has no {0:?} column")]
    MissingColumn(&'static str),

    /// A row has an empty station identifier
    #[error("line {line}: missing station id")]
    InvalidId { line: u64 },

    /// A row has an unparsable coordinate
    #[error("line {line}: {source}")]
    InvalidCoordinate {
        line: u64,
        source: InvalidCoordinate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_decimal;

    #[test]
    fn error_display() {
        let err = StationError::MissingColumn("Globale ID");
        assert_eq!(err.to_string(), "station data has no \"Globale ID\" column");

        let err = StationError::InvalidId { line: 7 };
        assert_eq!(err.to_string(), "line 7: missing station id");

        let err = StationError::InvalidCoordinate {
            line: 3,
            source: parse_decimal("x").unwrap_err(),
        };
        assert_eq!(err.to_string(), "line 3: invalid coordinate: \"x\"");
    }
}
