//! 判定結果のエクスポート
//!
//! 列は常に `list1_item, list2_item, judgment` の3列。未判定は空欄。

use crate::error::{Error, Result};
use crate::types::PairsSnapshot;

/// ヘッダー行
pub const HEADER: [&str; 3] = ["list1_item", "list2_item", "judgment"];

/// ダウンロード時のファイル名（拡張子なし）
pub const FILE_STEM: &str = "annotation_results";

/// 結果CSVを生成
pub fn to_csv(snapshot: &PairsSnapshot) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(HEADER)
        .map_err(|e| Error::Export(e.to_string()))?;
    for (pair, judgment) in snapshot.rows() {
        writer
            .write_record([pair.left(), pair.right(), judgment.unwrap_or("")])
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))
}

/// 結果Excel(xlsx)をバッファに生成
#[cfg(feature = "excel")]
pub fn to_xlsx(snapshot: &PairsSnapshot) -> Result<Vec<u8>> {
    use rust_xlsxwriter::{Format, Workbook};

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("results")
        .map_err(|e| Error::Export(format!("シート名設定エラー: {}", e)))?;

    for (col, title) in HEADER.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header_format)
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    for (i, (pair, judgment)) in snapshot.rows().enumerate() {
        let row = (i + 1) as u32;
        worksheet
            .write_string(row, 0, pair.left())
            .and_then(|ws| ws.write_string(row, 1, pair.right()))
            .map_err(|e| Error::Export(e.to_string()))?;
        if let Some(judgment) = judgment {
            worksheet
                .write_string(row, 2, judgment)
                .map_err(|e| Error::Export(e.to_string()))?;
        }
    }

    worksheet.set_column_width(0, 30).map_err(|e| Error::Export(e.to_string()))?;
    worksheet.set_column_width(1, 30).map_err(|e| Error::Export(e.to_string()))?;
    worksheet.set_column_width(2, 15).map_err(|e| Error::Export(e.to_string()))?;

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Export(format!("Excel生成エラー: {}", e)))
}
