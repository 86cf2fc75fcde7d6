use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const EVENT_UNION: &str = "const eventTypes = [
\t// User has been added to the system
\t// Indicates that somthing foo
\t\"USER_INVITED\",
\t// New task has been created on a project
\t\"TASK_CREATED\",
\t// Update to an existing task
\t\"TASK_UPDATED\",
\t// New file has been uploaded to the system
\t\"FILE_UPLOADED\",
] as const;
type EventType = typeof eventTypes[number];
";

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn goconst(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("goconst"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn prints_union_to_stdout() {
    goconst(&fixtures())
        .args(["--type", "eventType", "./testpackage"])
        .assert()
        .success()
        .stdout(EVENT_UNION);
}

#[test]
fn two_types_print_in_request_order() {
    let output = goconst(&fixtures())
        .args(["--type", "role,eventType", "./testpackage"])
        .output()
        .expect("run goconst");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("const roles = [\n\t// ADMIN is able to manage the account\n"));
    assert!(stdout.ends_with(EVENT_UNION));
    assert!(stdout.contains("type Role = typeof roles[number];\n"));
}

#[test]
fn writes_file_and_creates_directories() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("data/eventType.gen.ts");

    goconst(&fixtures())
        .args(["--type", "eventType", "--out"])
        .arg(&target)
        .arg("./testpackage")
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&target).unwrap(), EVENT_UNION);
}

#[test]
fn verbose_logs_go_to_stderr() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("role.gen.ts");

    goconst(&fixtures())
        .args(["-v", "--type", "role", "--out"])
        .arg(&target)
        .arg("./testpackage")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("3 constant(s)"));
}

#[test]
fn missing_type_flag_fails() {
    goconst(&fixtures())
        .arg("./testpackage")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--type"));
}

#[test]
fn no_packages_fails() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("empty")).unwrap();

    goconst(dir.path())
        .args(["--type", "role", "./empty"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("no packages matching ./empty"));
}

#[test]
fn require_docs_rejects_undocumented_constant() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("kinds.go"),
        "package kinds\n\ntype kind string\n\nconst (\n\t// Documented\n\tA kind = \"a\"\n\tB kind = \"b\"\n)\n",
    )
    .unwrap();

    goconst(dir.path())
        .args(["--type", "kind", "./kinds.go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\t\"B\",\n"));

    goconst(dir.path())
        .args(["--require-docs", "--type", "kind", "./kinds.go"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains(
            "documentation comment required for enumerated constant B",
        ));
}

#[test]
fn custom_template_is_used() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("names.tera");
    fs::write(
        &template,
        "{% for field in fields %}{{ field.name }}\n{% endfor %}",
    )
    .unwrap();

    goconst(&fixtures())
        .args(["--type", "role", "--template"])
        .arg(&template)
        .arg("./testpackage")
        .assert()
        .success()
        .stdout("ADMIN\nPROJECT_MANAGER\nPROJECT_MEMBER\n");
}
