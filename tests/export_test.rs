//! エクスポートテスト
//!
//! オフラインのペア作成と、Excel出力の再読み込みを検証

use pair_annotator::batch::pair_files;
use pair_annotator::common::{export, PairingStore, Table};
use pair_annotator::ingest::load_table;
use tempfile::tempdir;

/// テキストファイル2つからCSVを出力
#[test]
fn test_pair_files_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let list1 = dir.path().join("list1.txt");
    let list2 = dir.path().join("list2.txt");
    std::fs::write(&list1, "東京\n大阪\n\n名古屋\n").unwrap();
    std::fs::write(&list2, "Tokyo\nOsaka\n").unwrap();

    let output = dir.path().join("out").join("results.csv");
    let count = pair_files(&list1, &list2, &output).unwrap();
    assert_eq!(count, 3);

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        "list1_item,list2_item,judgment\n東京,Tokyo,\n大阪,Osaka,\n名古屋,,\n"
    );
}

/// 存在しない入力ファイルはエラー
#[test]
fn test_pair_files_missing_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = pair_files(
        &dir.path().join("nope1.txt"),
        &dir.path().join("nope2.txt"),
        &dir.path().join("out.csv"),
    );
    assert!(result.is_err());
}

/// Excelで書き出した結果をアップロードとして読み戻す
#[test]
fn test_xlsx_export_reimport() {
    let mut store = PairingStore::new();
    store.set_lists("p\nq", "r\ns");
    store.record_judgment(0, "yes").unwrap();

    let bytes = export::to_xlsx(&store.results()).unwrap();
    let table = load_table(Some("annotation_results.xlsx"), bytes).unwrap();
    assert!(table.has_column("list1_item"));
    assert_eq!(table.row_count(), 2);

    let mut reloaded = PairingStore::new();
    reloaded
        .set_from_table(&table, "list1_item", "list2_item", Some("judgment"))
        .unwrap();
    assert_eq!(reloaded.results(), store.results());
}

/// .xlsx指定ならExcelファイルを出力
#[test]
fn test_pair_files_xlsx() {
    let dir = tempdir().expect("Failed to create temp dir");
    let list1 = dir.path().join("a.txt");
    let list2 = dir.path().join("b.txt");
    std::fs::write(&list1, "x\n").unwrap();
    std::fs::write(&list2, "y\n").unwrap();

    let output = dir.path().join("results.xlsx");
    pair_files(&list1, &list2, &output).unwrap();

    let table = load_table(Some("results.xlsx"), std::fs::read(&output).unwrap()).unwrap();
    assert_eq!(table.cell(0, "list2_item").unwrap().to_string(), "y");
}
