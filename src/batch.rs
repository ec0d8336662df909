//! サーバーを使わないペア作成
//!
//! テキストファイル2つをペアにして、判定欄が空の結果ファイルを書き出す。

use crate::error::Result;
use pair_annotator_common::{export, PairingStore};
use std::path::Path;

/// 出力がExcelかどうか（拡張子で判定）
fn is_xlsx(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false)
}

/// ペアを作って`output`に書き出し、ペア数を返す
pub fn pair_files(list1: &Path, list2: &Path, output: &Path) -> Result<usize> {
    let text1 = std::fs::read_to_string(list1)?;
    let text2 = std::fs::read_to_string(list2)?;

    let mut store = PairingStore::new();
    store.set_lists(&text1, &text2);
    let snapshot = store.results();

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    if is_xlsx(output) {
        std::fs::write(output, export::to_xlsx(&snapshot)?)?;
    } else {
        std::fs::write(output, export::to_csv(&snapshot)?)?;
    }

    Ok(store.len())
}
