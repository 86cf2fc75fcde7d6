//! Output-format tests for the union template.

use std::fs;

use goconst_core::{Symbol, TypeName};
use goconst_renderer::{Data, Field, RenderError, Renderer};
use tempfile::TempDir;

fn event_data(fields: Vec<Field>) -> Data {
    Data {
        package: None,
        union_name: "eventTypes".to_string(),
        type_name: "EventType".to_string(),
        fields,
    }
}

fn field(name: &str, doc: &str) -> Field {
    Field {
        name: name.to_string(),
        doc: doc.to_string(),
    }
}

fn render(data: &Data) -> String {
    Renderer::new()
        .expect("renderer")
        .render_to_string(data)
        .expect("render")
}

// ---------------------------------------------------------------------------
// Exact output
// ---------------------------------------------------------------------------

#[test]
fn basic_events() {
    let out = render(&event_data(vec![field("CREATED", "Thing was created")]));
    assert_eq!(
        out,
        "const eventTypes = [\n\t// Thing was created\n\t\"CREATED\",\n] as const;\ntype EventType = typeof eventTypes[number];\n"
    );
}

#[test]
fn no_fields() {
    let out = render(&event_data(vec![]));
    assert_eq!(
        out,
        "const eventTypes = [\n] as const;\ntype EventType = typeof eventTypes[number];\n"
    );
}

#[test]
fn user_invited_scenario_from_symbols() {
    let ty = TypeName::parse("eventType").unwrap();
    let symbols = vec![Symbol {
        name: "USER_INVITED".to_string(),
        doc: "User has been added to the system".to_string(),
        value: Some("user_invited".to_string()),
    }];
    let out = render(&Data::new(&ty, None, &symbols));
    let expected = "\
const eventTypes = [
\t// User has been added to the system
\t\"USER_INVITED\",
] as const;
type EventType = typeof eventTypes[number];
";
    assert_eq!(out, expected);
}

#[test]
fn multi_line_doc_becomes_multiple_comments() {
    let out = render(&event_data(vec![
        field(
            "USER_INVITED",
            "User has been added to the system\nIndicates that somthing foo",
        ),
        field("TASK_CREATED", "New task has been created on a project"),
    ]));
    let expected = "\
const eventTypes = [
\t// User has been added to the system
\t// Indicates that somthing foo
\t\"USER_INVITED\",
\t// New task has been created on a project
\t\"TASK_CREATED\",
] as const;
type EventType = typeof eventTypes[number];
";
    assert_eq!(out, expected);
}

#[test]
fn blank_doc_emits_no_comment() {
    let out = render(&event_data(vec![field("A", ""), field("B", "  \n ")]));
    assert!(!out.contains("//"), "no comment lines expected:\n{out}");
    assert!(out.contains("\t\"A\",\n\t\"B\",\n"));
}

#[test]
fn doc_text_is_not_escaped() {
    let out = render(&event_data(vec![field("A", "uses <tags> & \"quotes\"")]));
    assert!(out.contains("\t// uses <tags> & \"quotes\"\n"), "got:\n{out}");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn tag_line_count_matches_field_count() {
    for n in [0usize, 1, 5, 23] {
        let fields: Vec<Field> = (0..n)
            .map(|i| field(&format!("F{i}"), &format!("doc {i}\nmore {i}")))
            .collect();
        let out = render(&event_data(fields));
        let tags = out.lines().filter(|l| l.starts_with("\t\"")).count();
        let comments = out.lines().filter(|l| l.starts_with("\t// ")).count();
        assert_eq!(tags, n);
        assert_eq!(comments, 2 * n);
    }
}

#[test]
fn tags_keep_field_order() {
    let out = render(&event_data(vec![field("C", ""), field("A", ""), field("B", "")]));
    let tags: Vec<_> = out.lines().filter(|l| l.starts_with("\t\"")).collect();
    assert_eq!(tags, vec!["\t\"C\",", "\t\"A\",", "\t\"B\","]);
}

#[test]
fn fresh_renderers_are_byte_identical() {
    let data = event_data(vec![field("X", "doc"), field("Y", "")]);
    let mut first = Vec::new();
    let mut second = Vec::new();
    Renderer::new().unwrap().render(&data, &mut first).unwrap();
    Renderer::new().unwrap().render(&data, &mut second).unwrap();
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// User templates
// ---------------------------------------------------------------------------

#[test]
fn user_template_overrides_embedded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("enum.tera");
    fs::write(
        &path,
        "// {{ package }}\nexport enum {{ type_name }} {\n{% for f in fields %}  {{ f.name }} = \"{{ f.name }}\",\n{% endfor %}}\n",
    )
    .unwrap();

    let renderer = Renderer::with_template(&path).expect("custom template");
    let mut data = event_data(vec![field("A", ""), field("B", "")]);
    data.package = Some("example.com/app".to_string());
    let out = renderer.render_to_string(&data).unwrap();
    assert_eq!(
        out,
        "// example.com/app\nexport enum EventType {\n  A = \"A\",\n  B = \"B\",\n}\n"
    );
}

#[test]
fn user_template_can_use_split_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("docs.tera");
    fs::write(&path, "{% for f in fields %}{{ f.doc | split_lines | length }}{% endfor %}").unwrap();

    let renderer = Renderer::with_template(&path).unwrap();
    let out = renderer
        .render_to_string(&event_data(vec![field("A", "a\nb"), field("B", "")]))
        .unwrap();
    assert_eq!(out, "20\n", "missing trailing newline is added");
}

#[test]
fn broken_template_fails_at_construction() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.tera");
    fs::write(&path, "{% for f in fields %}unterminated").unwrap();

    let err = Renderer::with_template(&path).err().expect("parse must fail");
    assert!(matches!(err, RenderError::Tera(_)), "got: {err}");
}

#[test]
fn missing_template_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Renderer::with_template(&dir.path().join("nope.tera"))
        .err()
        .expect("read must fail");
    assert!(matches!(err, RenderError::Io { .. }), "got: {err}");
    assert!(err.to_string().contains("nope.tera"));
}

#[test]
fn undefined_variable_is_a_render_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("undefined.tera");
    fs::write(&path, "{{ not_a_field }}").unwrap();

    let renderer = Renderer::with_template(&path).unwrap();
    let mut sink = Vec::new();
    let err = renderer.render(&event_data(vec![]), &mut sink).unwrap_err();
    assert!(matches!(err, RenderError::Tera(_)), "got: {err}");
    assert!(sink.is_empty(), "nothing is written when rendering fails");
}
