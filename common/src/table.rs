//! 表データモジュール
//!
//! アップロードされた表（CSV・Excel）を列名で引ける形で保持する。
//! ペアリングストアは`Table`トレイトだけに依存し、読み込み元のライブラリを知らない。

use crate::error::{Error, Result};
use std::fmt;
use std::io::Read;

/// 欠損値とみなす文字列（pandasの既定NA値と同じ集合）
pub const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// 表のセル値
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    /// CSVのフィールド文字列からセルを作る
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text.to_string())
        }
    }

    /// 欠損値（空・NaN・NA文字列）かどうか
    ///
    /// NA文字列は完全一致で比較する。`" NA "`や空白だけの値はラベルとして残る。
    pub fn is_null_like(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Float(f) => f.is_nan(),
            Cell::Text(s) => NULL_TOKENS.contains(&s.as_str()),
            Cell::Int(_) | Cell::Bool(_) => false,
        }
    }

    /// 判定ラベルとして読む。欠損値は`None`
    pub fn to_judgment(&self) -> Option<String> {
        if self.is_null_like() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// 列名でセルを引ける表
pub trait Table {
    fn has_column(&self, name: &str) -> bool;

    fn row_count(&self) -> usize;

    /// 行`row`の列`column`のセル。短い行で欠けている場合は`None`
    fn cell(&self, row: usize, column: &str) -> Option<&Cell>;

    /// 列を行順に取り出す。列が無ければ`None`
    fn column(&self, name: &str) -> Option<Vec<Option<&Cell>>> {
        if !self.has_column(name) {
            return None;
        }
        Some((0..self.row_count()).map(|row| self.cell(row, name)).collect())
    }
}

/// ヘッダー行＋データ行のインメモリ表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// CSVを読み込む（1行目はヘッダー、列数の揃わない行も許容）
    ///
    /// セルは型変換せず文字列のまま保持する（`"01"`は`"01"`のまま）。
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        if headers.is_empty() {
            return Err(Error::MalformedTable("No columns to parse from file".into()));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(Cell::from_text).collect());
        }

        Ok(Self { headers, rows })
    }

    /// CSV文字列から読み込み
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 同名の列が複数あれば先頭の列を使う
    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

impl Table for DataTable {
    fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }
}
