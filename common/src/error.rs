//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// どのエラーもリクエスト単位で完結し、ストアの状態は変更されない。
#[derive(Error, Debug)]
pub enum Error {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Index out of range: {index} (pairs: {len})")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Malformed table: {0}")]
    MalformedTable(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::MalformedTable(e.to_string())
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_column_not_found() {
        let error = Error::ColumnNotFound("text_a".to_string());
        assert_eq!(format!("{}", error), "Column not found: text_a");
    }

    #[test]
    fn test_error_display_index_out_of_range() {
        let error = Error::IndexOutOfRange { index: -1, len: 3 };
        let display = format!("{}", error);
        assert!(display.contains("Index out of range"));
        assert!(display.contains("-1"));
        assert!(display.contains("3"));
    }

    #[test]
    fn test_error_from_csv() {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("a,b\nc".as_bytes());
        let csv_error = reader
            .records()
            .find_map(|r| r.err())
            .expect("ragged rows should fail without flexible mode");
        let error: Error = csv_error.into();
        assert!(matches!(error, Error::MalformedTable(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Export("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Export"));
        assert!(debug.contains("テスト"));
    }
}
