use edda_core::{
    Document, DocxStore, EditorError, EditorService, FindQuery, Style, StyleCommand,
    StyledParagraph, StyledText,
};
use tempfile::tempdir;

fn service_with_text(lines: &[&str]) -> EditorService<DocxStore> {
    let mut doc = Document::new("Editor Fixture");
    for line in lines {
        let mut para = StyledParagraph::new();
        para.add(StyledText::new(*line, Style::default()));
        doc.push_paragraph(para);
    }
    EditorService::new(DocxStore::new(), doc)
}

#[test]
fn restyle_splits_runs_to_the_requested_span() {
    let mut editor = service_with_text(&["Hello world"]);
    editor.restyle(0, 0..5, &StyleCommand::Bold).unwrap();

    let paragraph = editor.document().paragraphs().next().unwrap();
    let runs: Vec<_> = paragraph.runs().collect();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].text, "Hello");
    assert!(runs[0].style.bold());
    assert!(!runs[1].style.bold());
}

#[test]
fn restyle_missing_paragraph_is_reported() {
    let mut editor = service_with_text(&["only one"]);
    let error = editor.restyle(3, 0..1, &StyleCommand::Bold).unwrap_err();
    assert!(matches!(error, EditorError::NoParagraph(3)));
}

#[test]
fn restyle_out_of_bounds_range_is_reported() {
    let mut editor = service_with_text(&["short"]);
    let error = editor.restyle(0, 0..99, &StyleCommand::Bold).unwrap_err();
    assert!(matches!(error, EditorError::Paragraph(_)));
}

#[test]
fn insert_and_delete_edit_the_held_document() {
    let mut editor = service_with_text(&["Hello world"]);

    editor.insert_text(0, 5, ",").unwrap();
    assert_eq!(editor.document().text(false), "Hello, world");

    editor.delete_range(0, 5..6).unwrap();
    assert_eq!(editor.document().text(false), "Hello world");
}

#[test]
fn append_paragraph_extends_the_document() {
    let mut editor = service_with_text(&["first"]);
    let mut para = StyledParagraph::new();
    para.add(StyledText::new("second", Style::default()));
    editor.append_paragraph(para);

    assert_eq!(editor.document().paragraph_count(), 2);
}

#[test]
fn find_delegates_to_document_search() {
    let editor = service_with_text(&["alpha beta", "beta gamma"]);
    let hits = editor.find(&FindQuery::new("beta"));

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].paragraph, 0);
    assert_eq!(hits[1].paragraph, 1);
}

#[test]
fn save_then_open_restores_the_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("editor.docx");

    let mut editor = service_with_text(&["Persist me"]);
    editor.restyle(0, 0..7, &StyleCommand::Italic).unwrap();
    editor.save(&path).unwrap();

    let reopened = EditorService::open(DocxStore::new(), &path).unwrap();
    assert_eq!(reopened.document().text(false), "Persist me");
    let paragraph = reopened.document().paragraphs().next().unwrap();
    let first_run = paragraph.runs().next().unwrap();
    assert_eq!(first_run.text, "Persist");
    assert!(first_run.style.italic());
}

#[test]
fn reload_replaces_in_memory_edits() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reload.docx");

    let mut editor = service_with_text(&["stable content"]);
    editor.save(&path).unwrap();

    editor.insert_text(0, 0, "scratch ").unwrap();
    assert!(editor.document().text(false).starts_with("scratch "));

    editor.reload(&path).unwrap();
    assert_eq!(editor.document().text(false), "stable content");
}
