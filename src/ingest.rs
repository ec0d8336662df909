//! アップロードされた表の読み込み
//!
//! ファイル名の拡張子でExcelブックかCSVかを判定し、`DataTable`に変換する。

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use pair_annotator_common::{Cell, DataTable, Error as CoreError};
use std::io::Cursor;

/// Excelとして読む拡張子
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Workbook,
}

impl TableFormat {
    pub fn from_file_name(file_name: Option<&str>) -> Self {
        let extension = file_name
            .and_then(|name| std::path::Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension {
            Some(ext) if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) => TableFormat::Workbook,
            _ => TableFormat::Csv,
        }
    }
}

/// アップロードされたバイト列を表として読み込む
pub fn load_table(file_name: Option<&str>, bytes: Vec<u8>) -> Result<DataTable, CoreError> {
    let format = TableFormat::from_file_name(file_name);
    tracing::debug!(?file_name, ?format, size = bytes.len(), "parsing uploaded table");

    match format {
        TableFormat::Csv => DataTable::from_csv_reader(bytes.as_slice()),
        TableFormat::Workbook => read_workbook(bytes),
    }
}

/// 先頭シートを読み込む
///
/// calamineのRangeは最初の空でないセルから始まるため、ヘッダーはシートの1行目ではなく
/// 使用範囲の1行目になる（先頭の空行・空列は読み飛ばされる）。完全な空行は捨てる。
fn read_workbook(bytes: Vec<u8>) -> Result<DataTable, CoreError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| CoreError::MalformedTable(format!("Excel読み込みエラー: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CoreError::MalformedTable("シートがありません".into()))?
        .map_err(|e| CoreError::MalformedTable(format!("シート読み込みエラー: {}", e)))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| CoreError::MalformedTable("No columns to parse from file".into()))?
        .iter()
        .map(|data| to_cell(data).to_string())
        .collect();

    let rows = rows
        .map(|row| row.iter().map(to_cell).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(|c| *c != Cell::Empty))
        .collect();

    Ok(DataTable::new(headers, rows))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) => Cell::from_text(s),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pair_annotator_common::Table;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(TableFormat::from_file_name(Some("data.csv")), TableFormat::Csv);
        assert_eq!(TableFormat::from_file_name(Some("Book1.XLSX")), TableFormat::Workbook);
        assert_eq!(TableFormat::from_file_name(Some("sheet.ods")), TableFormat::Workbook);
        assert_eq!(TableFormat::from_file_name(Some("noext")), TableFormat::Csv);
        assert_eq!(TableFormat::from_file_name(None), TableFormat::Csv);
    }

    #[test]
    fn test_load_csv_table() {
        let table = load_table(Some("a.csv"), b"A,B\n1,2\n".to_vec()).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.cell(0, "B").unwrap().to_string(), "2");
    }

    #[test]
    fn test_invalid_workbook_is_malformed() {
        let result = load_table(Some("broken.xlsx"), b"not a zip".to_vec());
        assert!(matches!(result, Err(CoreError::MalformedTable(_))));
    }

    #[test]
    fn test_workbook_header_is_first_used_row() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        // 1行目とA列は空、ヘッダーはB2から
        sheet.write_string(1, 1, "left").unwrap();
        sheet.write_string(1, 2, "right").unwrap();
        sheet.write_string(2, 1, "p").unwrap();
        sheet.write_number(2, 2, 3.0).unwrap();
        sheet.write_string(4, 1, "q").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = load_table(Some("offset.xlsx"), bytes).unwrap();
        assert_eq!(table.headers(), &["left", "right"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, "right").unwrap().to_string(), "3");
        assert_eq!(table.cell(1, "left").unwrap().to_string(), "q");
    }

    #[test]
    fn test_to_cell() {
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::Float(2.0)).to_string(), "2");
        assert_eq!(to_cell(&Data::String(String::new())), Cell::Empty);
        assert_eq!(to_cell(&Data::String("yes".into())), Cell::Text("yes".into()));
    }
}
