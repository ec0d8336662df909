//! Pair Annotator
//!
//! 2つのリストをインデックス順にペアにし、ペアごとの判定を記録してCSVで書き出す
//! HTTPサーバーとCLI

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod server;

pub use pair_annotator_common as common;
