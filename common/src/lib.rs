//! Pair Annotator Common Library
//!
//! サーバーとCLIで共有されるペアリングストアと型

pub mod error;
pub mod types;
pub mod table;
pub mod pairing;
pub mod export;

pub use error::{Error, Result};
pub use types::{Judgment, Pair, PairsSnapshot, Progress};
pub use table::{Cell, DataTable, Table};
pub use pairing::PairingStore;
