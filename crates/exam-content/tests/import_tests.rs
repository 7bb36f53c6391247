mod common;

use common::{chapter_json, TestContent};
use exam_content::workspace::Workspace;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn write_zip(path: &Path, entries: &[(&str, String)]) {
    let file = fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    for (name, content) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

#[test]
fn test_import_directory_as_section() {
    let content = TestContent::new().unwrap();
    let bundle = TempDir::new().unwrap();
    let source = bundle.path().join("Data Structure");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("chapter2.json"), chapter_json(Some("Chapter 2 Trees"), 3)).unwrap();
    fs::write(source.join("chapter1.json"), chapter_json(Some("Chapter 1 Lists"), 2)).unwrap();

    let mut workspace = Workspace::open(content.root_path()).unwrap();
    let outcome = workspace.import_section(&source, None).unwrap();

    assert_eq!(outcome.section_id, "data_structure");
    assert!(outcome.registered);
    assert_eq!(outcome.files, 2);

    let section = workspace.section("data_structure").unwrap();
    assert_eq!(section.name, "Data Structure");
    assert_eq!(section.path, "data/data_structure");

    let (chapters, _) = workspace.chapters("data_structure").unwrap();
    let names: Vec<&str> = chapters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Lists", "Trees"]);
}

#[test]
fn test_import_zip_as_section() {
    let content = TestContent::new().unwrap();
    let bundle = TempDir::new().unwrap();
    let archive = bundle.path().join("java-advanced.zip");
    write_zip(
        &archive,
        &[
            ("chapter1.json", chapter_json(None, 4)),
            ("images/diagram.png", "png".to_string()),
        ],
    );

    let mut workspace = Workspace::open(content.root_path()).unwrap();
    let outcome = workspace.import_section(&archive, None).unwrap();

    assert_eq!(outcome.section_id, "java_advanced");
    assert!(content.exists("data/java_advanced/images/diagram.png"));
    assert_eq!(outcome.reconciliation.chapters[0].q, Some(4));
}

#[test]
fn test_reimport_replaces_section_directory() {
    let content = TestContent::new().unwrap();
    let bundle = TempDir::new().unwrap();
    let source = bundle.path().join("algo");
    fs::create_dir_all(&source).unwrap();
    fs::write(source.join("chapter1.json"), chapter_json(None, 1)).unwrap();

    let mut workspace = Workspace::open(content.root_path()).unwrap();
    workspace.import_section(&source, None).unwrap();
    content.write("algo", "leftover.json", "{}").unwrap();

    let outcome = workspace.import_section(&source, None).unwrap();
    assert!(!outcome.registered);
    assert!(!content.exists("data/algo/leftover.json"));
    assert_eq!(workspace.sections().len(), 1);
}

#[test]
fn test_import_chapters_into_section() {
    let content = TestContent::new().unwrap();
    content.register(&["java"]).unwrap();
    content.write("java", "chapter1.json", &chapter_json(None, 1)).unwrap();
    content
        .write("java", "chapters.json", r#"[{"id": "1", "name": "Mine", "q": 1, "file": "chapter1.json"}]"#)
        .unwrap();

    let bundle = TempDir::new().unwrap();
    let archive = bundle.path().join("more.ZIP");
    write_zip(&archive, &[("chapter2.json", chapter_json(Some("Chapter 2 Classes"), 6))]);

    let mut workspace = Workspace::open(content.root_path()).unwrap();
    let outcome = workspace.import_chapters("java", &archive).unwrap();

    assert_eq!(outcome.reconciliation.added, vec!["chapter2.json"]);
    let (chapters, _) = workspace.chapters("java").unwrap();
    assert_eq!(chapters[0].name, "Mine");
    assert_eq!(chapters[1].name, "Classes");
    assert_eq!(chapters[1].q, Some(6));
}

#[test]
fn test_import_single_chapter_file() {
    let content = TestContent::new().unwrap();
    content.register(&["java"]).unwrap();
    let bundle = TempDir::new().unwrap();
    let file = bundle.path().join("chapter7.json");
    fs::write(&file, chapter_json(None, 2)).unwrap();

    let mut workspace = Workspace::open(content.root_path()).unwrap();
    workspace.import_chapters("java", &file).unwrap();
    let (chapters, _) = workspace.chapters("java").unwrap();
    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].id, "7");
}

#[test]
fn test_import_into_unknown_section_fails_without_writing() {
    let content = TestContent::new().unwrap();
    let bundle = TempDir::new().unwrap();
    let file = bundle.path().join("chapter1.json");
    fs::write(&file, "{}").unwrap();

    let mut workspace = Workspace::open(content.root_path()).unwrap();
    assert!(workspace.import_chapters("nope", &file).is_err());
    assert!(!content.exists("data"));
}
