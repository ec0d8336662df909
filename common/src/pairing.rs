//! ペアリングストア
//!
//! 2つのリストをインデックスで突き合わせたペアと、ペアごとの判定を保持する。
//! 再初期化（set_lists / set_from_table）は4つのフィールドを丸ごと置き換え、
//! 判定だけが record_judgment で個別に更新される。

use crate::error::{Error, Result};
use crate::table::{Cell, Table};
use crate::types::{Judgment, Pair, PairsSnapshot, Progress};

/// リスト・ペア・判定を保持するストア
///
/// 常に `pairs.len() == results.len()`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingStore {
    list1: Vec<String>,
    list2: Vec<String>,
    pairs: Vec<Pair>,
    results: Vec<Judgment>,
}

impl PairingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 改行区切りのテキスト2つからペアを作る
    pub fn set_lists(&mut self, text1: &str, text2: &str) {
        let list1 = split_lines(text1);
        let list2 = split_lines(text2);
        let pairs = zip_pairs(&list1, &list2);
        let results = vec![None; pairs.len()];
        self.replace(list1, list2, pairs, results);
    }

    /// 表の2列からペアを作る
    ///
    /// `annotation_column`が表にあればその値で判定を初期化する（欠損値は未判定）。
    /// 表に無い場合はエラーにせず、全件未判定とする。
    pub fn set_from_table<T: Table + ?Sized>(
        &mut self,
        table: &T,
        column1: &str,
        column2: &str,
        annotation_column: Option<&str>,
    ) -> Result<()> {
        let list1 = column_items(table, column1)?;
        let list2 = column_items(table, column2)?;
        let pairs = zip_pairs(&list1, &list2);

        let mut results: Vec<Judgment> = match annotation_column.and_then(|c| table.column(c)) {
            Some(cells) => cells
                .into_iter()
                .map(|cell| cell.and_then(Cell::to_judgment))
                .collect(),
            None => Vec::new(),
        };
        results.resize(pairs.len(), None);

        self.replace(list1, list2, pairs, results);
        Ok(())
    }

    /// 判定を記録する。範囲外のインデックスはエラーで、状態は変わらない
    pub fn record_judgment(&mut self, index: i64, judgment: impl Into<String>) -> Result<()> {
        let len = self.results.len();
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| self.results.get_mut(i))
            .ok_or(Error::IndexOutOfRange { index, len })?;
        *slot = Some(judgment.into());
        Ok(())
    }

    /// 現在のペアと判定
    pub fn pairs(&self) -> PairsSnapshot {
        self.snapshot()
    }

    /// 現在のペアと判定（`pairs`と同じ内容）
    pub fn results(&self) -> PairsSnapshot {
        self.snapshot()
    }

    /// 結果CSVを生成する
    pub fn export_csv(&self) -> Result<String> {
        crate::export::to_csv(&self.snapshot())
    }

    /// 全データを破棄して初期状態に戻す
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn list1(&self) -> &[String] {
        &self.list1
    }

    pub fn list2(&self) -> &[String] {
        &self.list2
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            judged: self.results.iter().filter(|j| j.is_some()).count(),
            total: self.results.len(),
        }
    }

    fn snapshot(&self) -> PairsSnapshot {
        PairsSnapshot {
            pairs: self.pairs.clone(),
            results: self.results.clone(),
        }
    }

    fn replace(
        &mut self,
        list1: Vec<String>,
        list2: Vec<String>,
        pairs: Vec<Pair>,
        results: Vec<Judgment>,
    ) {
        debug_assert_eq!(pairs.len(), results.len());
        self.list1 = list1;
        self.list2 = list2;
        self.pairs = pairs;
        self.results = results;
    }
}

/// 行ごとに分割し、前後の空白を除いて空行を捨てる
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// インデックスで突き合わせる。短い側は空文字で埋める
pub fn zip_pairs(list1: &[String], list2: &[String]) -> Vec<Pair> {
    let len = list1.len().max(list2.len());
    (0..len)
        .map(|i| {
            Pair::new(
                list1.get(i).cloned().unwrap_or_default(),
                list2.get(i).cloned().unwrap_or_default(),
            )
        })
        .collect()
}

fn column_items<T: Table + ?Sized>(table: &T, column: &str) -> Result<Vec<String>> {
    let cells = table
        .column(column)
        .ok_or_else(|| Error::ColumnNotFound(column.to_string()))?;
    Ok(cells
        .into_iter()
        .map(|cell| cell.map(Cell::to_string).unwrap_or_default())
        .collect())
}
