use knit::discover;
use knit::render::{self, DocOptions};
use knit::{parse_source, Declaration, TagKind, Unit};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/dw")
}

fn parse_tree(dir: &Path) -> Vec<Unit> {
    discover::walk_directory(dir, "dwl")
        .unwrap()
        .iter()
        .map(|s| s.parse("dwl").unwrap())
        .collect()
}

fn parse(text: &str) -> Unit {
    parse_source(Path::new("."), Path::new("sample.dwl"), "dwl", text)
}

#[test]
fn two_file_tree() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("dw/test")).unwrap();
    fs::write(dir.path().join("a.dwl"), "/** A. */\n%dw 2.0\n").unwrap();
    fs::write(
        dir.path().join("dw/test/myModule.dwl"),
        "/** Mine. */\n%dw 2.0\n/** One. */\nvar one = 1\n",
    )
    .unwrap();

    let units = parse_tree(dir.path());
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].module_path, ["a"]);
    assert_eq!(units[1].name, "myModule");
    assert_eq!(units[1].file_name, "myModule.dwl");
    assert_eq!(units[1].path, "dw/test/myModule.dwl");
    assert_eq!(units[1].qualified_name(), "dw::test::myModule");
    assert_eq!(units[1].variables().count(), 1);
}

#[test]
fn fixture_tree() {
    let units = parse_tree(&fixture_dir());
    let names: Vec<&str> = units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["math", "strings"]);

    let strings = &units[1];
    let decls: Vec<&str> = strings.declarations.iter().map(Declaration::name).collect();
    assert_eq!(decls, ["sep", "join", "upper"]);

    let table = strings.table.as_ref().unwrap();
    assert_eq!(table.columns, ["Function", "Purpose"]);
    assert_eq!(table.rows[1].fields, ["join", "Joins two strings, with a separator"]);

    let math = &units[0];
    let add = math.functions().next().unwrap();
    let params: Vec<&str> = add
        .comment
        .annotations_of(TagKind::Param)
        .map(|a| a.key.as_str())
        .collect();
    assert_eq!(params, ["a", "b"]);
    assert_eq!(add.table.as_ref().unwrap().rows[0].fields, ["1", "2", "3"]);

    let apply = math.functions().nth(1).unwrap();
    assert_eq!(apply.arguments[1].name, "callback");
    assert_eq!(apply.arguments[1].datatype, "(Number) -> Number");
}

#[test]
fn ordering_by_module_list() {
    let units = parse_tree(&fixture_dir());
    let list = vec!["strings".to_string(), "missing".to_string()];
    let ordered: Vec<&str> = render::ordered(&units, &list)
        .iter()
        .map(|u| u.name.as_str())
        .collect();
    assert_eq!(ordered, ["strings", "math"]);
}

#[test]
fn parsing_twice_gives_equal_units() {
    let path = fixture_dir().join("strings.dwl");
    let first = knit::parse_unit(&fixture_dir(), &path, "dwl").unwrap();
    let second = knit::parse_unit(&fixture_dir(), &path, "dwl").unwrap();
    assert_eq!(first, second);
}

#[test]
fn undocumented_declarations_are_not_reported() {
    let unit = parse("%dw 2.0\nfun hidden(a) = a\nvar alsoHidden = 1\n");
    assert!(unit.declarations.is_empty());
}

#[test]
fn plain_block_comments_document_nothing() {
    let unit = parse("/* not docs */\n%dw 2.0\n/**/\nfun f() = 1\n");
    assert!(unit.comment.is_empty());
    assert!(unit.declarations.is_empty());
}

#[test]
fn malformed_annotations_degrade_gracefully() {
    let unit = parse("/**\n * Text.\n * @\n * @p\n * @tbl\n */\nfun f(a) = a\n");
    let f = unit.functions().next().unwrap();
    assert_eq!(f.comment.text, "Text.");
    assert!(f.comment.annotations_of(TagKind::Return).next().is_none());
}

#[test]
fn every_format_renders_the_fixture_tree() {
    let units = parse_tree(&fixture_dir());
    let options = DocOptions {
        write_header_table: true,
        ..Default::default()
    };
    for format in ["markdown", "html", "text", "json"] {
        let renderer = render::create_renderer(format).unwrap();
        let out = renderer.write_document(&units, &options).unwrap();
        assert!(out.contains("math"), "{format} output lacks module name");
        assert!(out.contains("Joins two strings"), "{format} output lacks description");
    }
}
