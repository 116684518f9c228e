use std::fs;
use std::process::Command;
use tempfile::tempdir;

const MANAGEMENT_DOC: &str = r#"
openapi: 3.0.3
info:
  title: Okta Admin Management
  version: 2024.07.0
tags:
  - name: User
    description: Users in the org
  - name: Group
paths:
  /api/v1/users:
    get:
      operationId: listUsers
      tags: [User]
      parameters:
        - {name: q, in: query, schema: {type: string}}
        - {name: limit, in: query, schema: {type: integer, format: int32}}
  /api/v1/users/{id}:
    get:
      operationId: getUser
      tags: [User]
      parameters:
        - {name: id, in: path, required: true, schema: {type: string}}
  /api/v1/groups:
    post:
      operationId: addGroup
      tags: [Group]
      requestBody:
        required: true
        content:
          application/json:
            schema: {type: object}
"#;

fn okta() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_okta"));
    cmd.env_remove("OKTA_CLIENT_ORGURL")
        .env_remove("OKTA_CLIENT_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_gen_writes_command_modules() {
    let dir = tempdir().unwrap();
    let document = dir.path().join("management.yaml");
    let out = dir.path().join("generated");
    fs::write(&document, MANAGEMENT_DOC).unwrap();

    let output = okta()
        .args(["gen", "--openapi-path"])
        .arg(&document)
        .arg("--output-dir")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "3 written, 0 unchanged, 0 skipped"
    );

    let user = fs::read_to_string(out.join("user.rs")).unwrap();
    assert!(user.starts_with("// Code generated by okta gen. DO NOT EDIT."));
    assert!(user.contains("pub enum UserCommand"));
    let index = fs::read_to_string(out.join("mod.rs")).unwrap();
    assert!(index.contains("`Okta Admin Management`"));

    // A second run leaves everything in place.
    let again = okta()
        .args(["gen", "--openapi-path"])
        .arg(&document)
        .arg("--output-dir")
        .arg(&out)
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8_lossy(&again.stdout).trim(),
        "0 written, 3 unchanged, 0 skipped"
    );
}

#[test]
fn test_gen_unknown_tag_fails() {
    let dir = tempdir().unwrap();
    let document = dir.path().join("management.yaml");
    fs::write(&document, MANAGEMENT_DOC).unwrap();

    let output = okta()
        .args(["gen", "--tag", "Nope", "--openapi-path"])
        .arg(&document)
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_resource_command_without_org_url_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("okta.yaml");
    fs::write(&config, "okta:\n  client: {}\n").unwrap();

    let output = okta()
        .args(["user", "get", "00u1", "--config"])
        .arg(&config)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--org-url"));
}

#[test]
fn test_help_lists_commands() {
    let output = okta().arg("--help").output().unwrap();
    let help = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    for command in ["gen", "user", "group", "app"] {
        assert!(help.contains(command), "missing {} in help", command);
    }
}
