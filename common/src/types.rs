//! ペア・判定の型定義
//!
//! サーバーとCLIで共有される型:
//! - Pair: リスト1とリスト2の同じ位置の項目の組
//! - Judgment: ペアに付けた判定ラベル（未判定はNone）
//! - PairsSnapshot: APIが返す {pairs, results}

use serde::{Deserialize, Serialize};

/// ペアの判定。未判定は`None`
pub type Judgment = Option<String>;

/// 2つのリストの同じインデックスの項目の組
///
/// JSONでは `["left", "right"]` の2要素配列になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair(pub String, pub String);

impl Pair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self(left.into(), right.into())
    }

    pub fn left(&self) -> &str {
        &self.0
    }

    pub fn right(&self) -> &str {
        &self.1
    }
}

impl<L: Into<String>, R: Into<String>> From<(L, R)> for Pair {
    fn from((left, right): (L, R)) -> Self {
        Self::new(left, right)
    }
}

/// ある時点のペアと判定のスナップショット
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairsSnapshot {
    pub pairs: Vec<Pair>,
    pub results: Vec<Judgment>,
}

impl PairsSnapshot {
    /// (ペア, 判定) を順に返す
    pub fn rows(&self) -> impl Iterator<Item = (&Pair, Option<&str>)> {
        self.pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| (pair, self.results.get(i).and_then(|j| j.as_deref())))
    }
}

/// 判定の進捗
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub judged: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.judged == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_serializes_as_array() {
        let json = serde_json::to_string(&Pair::new("a", "x")).unwrap();
        assert_eq!(json, r#"["a","x"]"#);
    }

    #[test]
    fn test_snapshot_serialize() {
        let snapshot = PairsSnapshot {
            pairs: vec![Pair::new("p", "r"), Pair::new("q", "")],
            results: vec![Some("yes".to_string()), None],
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"pairs": [["p", "r"], ["q", ""]], "results": ["yes", null]})
        );
    }

    #[test]
    fn test_snapshot_rows() {
        let snapshot = PairsSnapshot {
            pairs: vec![Pair::new("a", "b"), Pair::new("c", "d")],
            results: vec![None, Some("match".to_string())],
        };
        let rows: Vec<_> = snapshot.rows().collect();
        assert_eq!(rows[0].1, None);
        assert_eq!(rows[1].0.left(), "c");
        assert_eq!(rows[1].1, Some("match"));
    }

    #[test]
    fn test_progress_complete() {
        assert!(Progress { judged: 0, total: 0 }.is_complete());
        assert!(!Progress { judged: 1, total: 2 }.is_complete());
    }
}
