//! Integration tests for block-graph reduction.

use std::path::PathBuf;
use untextract::{
    parse_file, reduce, Block, BlockType, DocumentGraph, Error, FormEntry, PageSelection,
    ReduceOptions, Reducer, TextNormalization, Untextract,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn table(id: &str, cell_ids: &[&str]) -> Block {
    Block::new(id, BlockType::Table).with_children(cell_ids.iter().copied())
}

#[test]
fn test_fixture_lines_in_order() {
    let graph = parse_file(fixture("analysis_response.json")).unwrap();
    let extraction = reduce(&graph);

    assert_eq!(
        extraction.lines,
        vec![
            "BRACKET, MOUNTING",
            "Weight:  12kg",
            "Material: AL 6061-T6",
            "SHEET 2 OF 2",
        ]
    );
}

#[test]
fn test_fixture_forms() {
    let graph = parse_file(fixture("analysis_response.json")).unwrap();
    let extraction = reduce(&graph);

    assert_eq!(
        extraction.forms,
        vec![
            FormEntry::new("Weight:", "12kg"),
            FormEntry::new("Material:", "AL 6061-T6"),
            FormEntry::new("Finish:", ""),
        ]
    );
}

#[test]
fn test_fixture_table() {
    let graph = parse_file(fixture("analysis_response.json")).unwrap();
    let extraction = reduce(&graph);

    assert_eq!(extraction.tables.len(), 1);
    let table = &extraction.tables[0];
    assert_eq!(table.source_id, "table-1");
    assert_eq!(table.page, Some(1));
    assert_eq!(
        table.to_grid(),
        vec![
            vec!["REV", "DESCRIPTION"],
            vec!["A", "Initial release"],
            vec!["B", ""],
        ]
    );
}

#[test]
fn test_fixture_page_selection() {
    let graph = parse_file(fixture("analysis_response.json")).unwrap();
    let options = ReduceOptions::new().with_pages(PageSelection::parse("2").unwrap());
    let extraction = Reducer::new(options).reduce(&graph);

    assert_eq!(extraction.lines, vec!["SHEET 2 OF 2"]);
    assert!(extraction.forms.is_empty());
    assert!(extraction.tables.is_empty());
}

#[test]
fn test_no_line_blocks_gives_no_lines() {
    let graph = DocumentGraph::from_blocks(vec![
        Block::word("w", "alone"),
        table("t", &[]),
        Block::key("k").with_children(["w"]),
    ]);
    assert!(reduce(&graph).lines.is_empty());
}

#[test]
fn test_lines_verbatim_and_textless_skipped() {
    let graph = DocumentGraph::from_blocks(vec![
        Block::line("l1", "  padded  text "),
        Block::new("l2", BlockType::Line),
        Block::line("l3", ""),
        Block::line("l4", "last"),
    ]);
    assert_eq!(reduce(&graph).lines, vec!["  padded  text ", "", "last"]);
}

#[test]
fn test_spec_table_example() {
    let graph = DocumentGraph::from_blocks(vec![
        table("t", &["c1", "c2", "c3"]),
        Block::cell("c1", 1, 1).with_children(["a"]),
        Block::cell("c2", 1, 2).with_children(["b"]),
        Block::cell("c3", 2, 1).with_children(["c"]),
        Block::word("a", "A"),
        Block::word("b", "B"),
        Block::word("c", "C"),
    ]);

    let extraction = reduce(&graph);
    assert_eq!(
        extraction.tables[0].to_grid(),
        vec![vec!["A", "B"], vec!["C", ""]]
    );
}

#[test]
fn test_tables_use_indices_not_order() {
    let graph = DocumentGraph::from_blocks(vec![
        table("t", &["c22", "c11", "c21", "c12"]),
        Block::cell("c22", 2, 2).with_children(["d"]),
        Block::cell("c11", 1, 1).with_children(["a"]),
        Block::cell("c21", 2, 1).with_children(["c"]),
        Block::cell("c12", 1, 2).with_children(["b"]),
        Block::word("a", "a"),
        Block::word("b", "b"),
        Block::word("c", "c"),
        Block::word("d", "d"),
    ]);

    assert_eq!(
        reduce(&graph).tables[0].to_grid(),
        vec![vec!["a", "b"], vec!["c", "d"]]
    );
}

#[test]
fn test_tables_are_rectangular() {
    let graph = DocumentGraph::from_blocks(vec![
        table("t1", &["a", "b", "c"]),
        Block::cell("a", 1, 1),
        Block::cell("b", 2, 3),
        Block::cell("c", 4, 2),
        table("t2", &["d"]),
        Block::cell("d", 7, 9),
    ]);

    let extraction = reduce(&graph);
    assert_eq!(extraction.tables.len(), 2);

    let t1 = &extraction.tables[0];
    assert!(t1.is_rectangular());
    assert_eq!(t1.column_count(), 3);
    assert_eq!(t1.row_count(), 3);
    assert_eq!(t1.column_indices, vec![1, 2, 3]);

    let t2 = &extraction.tables[1];
    assert_eq!(t2.to_grid(), vec![vec![""]]);
    assert_eq!(t2.row_indices, vec![7]);
}

#[test]
fn test_cell_without_words_is_empty_string() {
    let graph = DocumentGraph::from_blocks(vec![
        table("t", &["c1", "c2"]),
        Block::cell("c1", 1, 1).with_children(["ghost"]),
        Block::cell("c2", 1, 2).with_children(["sel"]),
        Block::new("sel", BlockType::SelectionElement),
    ]);
    assert_eq!(reduce(&graph).tables[0].to_grid(), vec![vec!["", ""]]);
}

#[test]
fn test_dangling_children_tolerated() {
    let graph = DocumentGraph::from_blocks(vec![
        table("t", &["missing-cell", "c"]),
        Block::cell("c", 1, 1).with_children(["missing-word", "w"]),
        Block::word("w", "kept"),
        Block::key("k").with_children(["missing-key-word"]),
    ]);

    let extraction = reduce(&graph);
    assert_eq!(extraction.tables[0].to_grid(), vec![vec!["kept"]]);
    assert_eq!(extraction.forms, vec![FormEntry::new("", "")]);
    assert_eq!(graph.dangling_references(), 3);
}

#[test]
fn test_spec_form_example() {
    let graph = DocumentGraph::from_blocks(vec![
        Block::key("k").with_children(["w1"]).with_value("v"),
        Block::value("v").with_children(["w2"]),
        Block::word("w1", "Weight"),
        Block::word("w2", "12kg"),
    ]);
    assert_eq!(reduce(&graph).forms, vec![FormEntry::new("Weight", "12kg")]);
}

#[test]
fn test_form_value_to_missing_block() {
    let graph = DocumentGraph::from_blocks(vec![
        Block::key("k").with_children(["w1", "w2"]).with_value("nowhere"),
        Block::word("w1", "Part"),
        Block::word("w2", "Number"),
    ]);
    assert_eq!(
        reduce(&graph).forms,
        vec![FormEntry::new("Part Number", "")]
    );
}

#[test]
fn test_forms_keep_discovery_order() {
    let graph = DocumentGraph::from_blocks(vec![
        Block::key("k2").with_children(["b"]),
        Block::value("v-orphan"),
        Block::key("k1").with_children(["a"]),
        Block::word("a", "first-seen-second"),
        Block::word("b", "first-seen-first"),
    ]);

    let keys: Vec<_> = reduce(&graph).forms.into_iter().map(|e| e.key).collect();
    assert_eq!(keys, vec!["first-seen-first", "first-seen-second"]);
}

#[test]
fn test_reduce_is_idempotent() {
    let graph = parse_file(fixture("analysis_response.json")).unwrap();
    let first = reduce(&graph);
    let second = reduce(&graph);
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_reduction_of_shared_graph() {
    let graph = parse_file(fixture("analysis_response.json")).unwrap();
    let expected = reduce(&graph);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| reduce(&graph))).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_nfkc_normalization() {
    let graph = DocumentGraph::from_blocks(vec![
        Block::line("l", "ＡＢＣ１２３"),
        Block::key("k").with_children(["w"]),
        Block::word("w", "\u{FB01}nish"),
    ]);
    let options = ReduceOptions::new().with_normalization(TextNormalization::Nfkc);
    let extraction = Reducer::new(options).reduce(&graph);

    assert_eq!(extraction.lines, vec!["ABC123"]);
    assert_eq!(extraction.forms[0].key, "finish");
}

#[test]
fn test_failed_job_never_reduced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("failed.json");
    std::fs::write(
        &path,
        r#"{"JobStatus": "FAILED", "StatusMessage": "UNSUPPORTED_DOCUMENT", "Blocks": []}"#,
    )
    .unwrap();

    let err = Untextract::new().parse(&path).err().unwrap();
    assert!(matches!(err, Error::JobFailed(ref m) if m == "UNSUPPORTED_DOCUMENT"));
}

#[test]
fn test_paginated_responses_merge() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("page-1.json");
    let second = dir.path().join("page-2.json");
    std::fs::write(
        &first,
        r#"{"JobStatus": "SUCCEEDED", "NextToken": "abc", "Blocks": [
            {"BlockType": "KEY_VALUE_SET", "Id": "k", "EntityTypes": ["KEY"],
             "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}, {"Type": "VALUE", "Ids": ["v"]}]},
            {"BlockType": "WORD", "Id": "w1", "Text": "Scale"}
        ]}"#,
    )
    .unwrap();
    std::fs::write(
        &second,
        r#"{"JobStatus": "SUCCEEDED", "Blocks": [
            {"BlockType": "KEY_VALUE_SET", "Id": "v", "EntityTypes": ["VALUE"],
             "Relationships": [{"Type": "CHILD", "Ids": ["w2"]}]},
            {"BlockType": "WORD", "Id": "w2", "Text": "1:2"}
        ]}"#,
    )
    .unwrap();

    let result = Untextract::new().parse_files(&[first, second]).unwrap();
    assert_eq!(result.extraction.forms, vec![FormEntry::new("Scale", "1:2")]);
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_parse_file_async() {
    let graph = untextract::parse_file_async(fixture("analysis_response.json"))
        .await
        .unwrap();
    assert_eq!(reduce(&graph).tables.len(), 1);
}
