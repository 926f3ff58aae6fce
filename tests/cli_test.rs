//! CLI integration tests for the openapi-scaffold binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("openapi-scaffold"))
}

// Helper to create a temp document file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// A small pet-store document exercising definitions and tagged operations.
fn petstore() -> &'static str {
    r##"{
        "swagger": "2.0",
        "info": { "title": "Petstore", "version": "1.0" },
        "definitions": {
            "Pet": {
                "type": "object",
                "properties": {
                    "id": { "type": "string", "readOnly": true },
                    "name": { "type": "string" },
                    "status": {
                        "type": "string",
                        "enum": ["available", "pending", "sold"]
                    }
                },
                "required": ["name"]
            },
            "CreatePet": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "status": {
                        "type": "string",
                        "enum": ["available", "pending", "sold"]
                    }
                },
                "required": ["name"]
            }
        },
        "paths": {
            "/pets": {
                "get": {
                    "tags": ["pets"],
                    "operationId": "listPets",
                    "responses": {
                        "200": {
                            "schema": {
                                "type": "array",
                                "items": { "$ref": "#/definitions/Pet" }
                            }
                        }
                    }
                },
                "post": {
                    "tags": ["pets"],
                    "operationId": "createPet",
                    "parameters": [{
                        "name": "body",
                        "in": "body",
                        "schema": { "$ref": "#/definitions/CreatePet" }
                    }],
                    "responses": {
                        "201": { "schema": { "$ref": "#/definitions/Pet" } }
                    }
                }
            },
            "/pets/{petId}": {
                "get": {
                    "tags": ["pets"],
                    "operationId": "getPet",
                    "parameters": [{
                        "name": "petId",
                        "in": "path",
                        "type": "string"
                    }],
                    "responses": {
                        "200": { "schema": { "$ref": "#/definitions/Pet" } }
                    }
                },
                "delete": {
                    "tags": ["pets"],
                    "operationId": "deletePet",
                    "parameters": [{
                        "name": "petId",
                        "in": "path",
                        "type": "string"
                    }],
                    "responses": { "204": {} }
                }
            }
        }
    }"##
}

mod types_command {
    use super::*;

    #[test]
    fn emits_interfaces_for_all_definitions() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());

        cmd()
            .args(["types", doc.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("export interface Pet"))
            .stdout(predicate::str::contains("export interface CreatePet"))
            .stdout(predicate::str::contains("readonly id?: string;"));
    }

    #[test]
    fn emits_only_requested_names() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());

        cmd()
            .args(["types", doc.to_str().unwrap(), "Pet"])
            .assert()
            .success()
            .stdout(predicate::str::contains("export interface Pet"))
            .stdout(predicate::str::contains("CreatePet").not());
    }

    #[test]
    fn writes_to_output_file() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());
        let output = dir.path().join("types.ts");

        cmd()
            .args([
                "types",
                doc.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("export interface Pet"));
    }

    #[test]
    fn temporal_dates_render_as_date() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(
            &dir,
            "openapi.json",
            r#"{
                "swagger": "2.0",
                "definitions": {
                    "Event": {
                        "type": "object",
                        "properties": {
                            "at": { "type": "string", "format": "date-time" }
                        }
                    }
                }
            }"#,
        );

        cmd()
            .args(["types", doc.to_str().unwrap(), "--date-repr", "temporal"])
            .assert()
            .success()
            .stdout(predicate::str::contains("at?: Date;"));
    }

    #[test]
    fn colliding_sanitized_names_are_fatal() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(
            &dir,
            "openapi.json",
            r#"{
                "swagger": "2.0",
                "definitions": {
                    "User.Dto": { "type": "object", "properties": {} },
                    "User-Dto": { "type": "object", "properties": {} }
                }
            }"#,
        );

        cmd()
            .args(["types", doc.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("duplicate generated type name"));
    }

    #[test]
    fn unresolved_reference_warns_but_succeeds() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(
            &dir,
            "openapi.json",
            r##"{
                "swagger": "2.0",
                "definitions": {
                    "Order": {
                        "type": "object",
                        "properties": {
                            "buyer": { "$ref": "#/definitions/Missing" }
                        }
                    }
                }
            }"##,
        );

        cmd()
            .args(["types", doc.to_str().unwrap()])
            .assert()
            .success()
            .stderr(predicate::str::contains("[W001]"))
            .stdout(predicate::str::contains("unknown"));
    }
}

mod validators_command {
    use super::*;

    #[test]
    fn emits_zod_schemas_by_default() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());

        cmd()
            .args(["validators", doc.to_str().unwrap(), "Pet"])
            .assert()
            .success()
            .stdout(predicate::str::contains("export const PetSchema ="))
            .stdout(predicate::str::contains("z.object("));
    }

    #[test]
    fn query_location_coerces() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(
            &dir,
            "openapi.json",
            r#"{
                "swagger": "2.0",
                "definitions": {
                    "Page": {
                        "type": "object",
                        "properties": { "limit": { "type": "integer" } }
                    }
                }
            }"#,
        );

        cmd()
            .args([
                "validators",
                doc.to_str().unwrap(),
                "Page",
                "--location",
                "query",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("z.coerce.number().int()"));
    }

    #[test]
    fn yup_dialect() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());

        cmd()
            .args(["validators", doc.to_str().unwrap(), "Pet", "--dialect", "yup"])
            .assert()
            .success()
            .stdout(predicate::str::contains("yup.object("));
    }

    #[test]
    fn read_only_excluded_from_body_direction() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());

        cmd()
            .args(["validators", doc.to_str().unwrap(), "Pet"])
            .assert()
            .success()
            .stdout(predicate::str::contains("id:").not());

        cmd()
            .args([
                "validators",
                doc.to_str().unwrap(),
                "Pet",
                "--location",
                "response",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("id:"));
    }

    #[test]
    fn unknown_dialect_rejected() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());

        cmd()
            .args(["validators", doc.to_str().unwrap(), "--dialect", "joi"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unknown validator dialect"));
    }
}

mod resources_command {
    use super::*;

    #[test]
    fn discovers_pet_resource() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());

        cmd()
            .args(["resources", doc.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Pet (pets)"))
            .stdout(predicate::str::contains("create"))
            .stdout(predicate::str::contains("list"))
            .stdout(predicate::str::contains("read"))
            .stdout(predicate::str::contains("delete"));
    }

    #[test]
    fn json_format_is_parseable() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());

        let output = cmd()
            .args(["resources", doc.to_str().unwrap(), "--format", "json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let resources = parsed.as_array().unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0]["names"]["plural"], "pets");
        assert!(resources[0]["editable"].as_bool().unwrap());
    }

    #[test]
    fn no_resources_prints_shape_hint() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(
            &dir,
            "openapi.json",
            r#"{
                "swagger": "2.0",
                "definitions": {},
                "paths": {
                    "/health": {
                        "get": { "responses": { "200": {} } }
                    }
                }
            }"#,
        );

        cmd()
            .args(["resources", doc.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("No resources discovered"))
            .stdout(predicate::str::contains("tagged operation group"));
    }
}

mod forms_command {
    use super::*;

    #[test]
    fn emits_control_tree() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());

        let output = cmd()
            .args(["forms", doc.to_str().unwrap(), "CreatePet"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let form: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(form["kind"], "sub-group");
        let children = form["children"].as_array().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0]["name"], "name");
        // Three-value enum renders as a flat choice group.
        assert_eq!(children[1]["kind"], "choice-group");
    }

    #[test]
    fn checkbox_style_honored() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(
            &dir,
            "openapi.json",
            r#"{
                "swagger": "2.0",
                "definitions": {
                    "Flags": {
                        "type": "object",
                        "properties": { "active": { "type": "boolean" } }
                    }
                }
            }"#,
        );

        cmd()
            .args([
                "forms",
                doc.to_str().unwrap(),
                "Flags",
                "--boolean-control",
                "checkbox",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""kind": "checkbox""#));
    }

    #[test]
    fn non_object_schema_rejected() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(
            &dir,
            "openapi.json",
            r#"{
                "swagger": "2.0",
                "definitions": {
                    "Id": { "type": "string" }
                }
            }"#,
        );

        cmd()
            .args(["forms", doc.to_str().unwrap(), "Id"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("not an object"));
    }

    #[test]
    fn unknown_schema_rejected() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());

        cmd()
            .args(["forms", doc.to_str().unwrap(), "Missing"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("no schema named"));
    }
}

mod check_command {
    use super::*;

    #[test]
    fn valid_payload() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());
        let payload = write_temp_file(&dir, "payload.json", r#"{"name": "rex"}"#);

        cmd()
            .args([
                "check",
                doc.to_str().unwrap(),
                "Pet",
                payload.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Valid"));
    }

    #[test]
    fn missing_required_field() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());
        let payload = write_temp_file(&dir, "payload.json", r#"{}"#);

        cmd()
            .args([
                "check",
                doc.to_str().unwrap(),
                "Pet",
                payload.to_str().unwrap(),
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Check failed"));
    }

    #[test]
    fn json_output_invalid() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());
        let payload = write_temp_file(&dir, "payload.json", r#"{"name": 5}"#);

        cmd()
            .args([
                "check",
                doc.to_str().unwrap(),
                "Pet",
                payload.to_str().unwrap(),
                "--json",
            ])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(r#""valid":false"#))
            .stdout(predicate::str::contains(r#""errors":"#));
    }

    #[test]
    fn unknown_schema_name() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "openapi.json", petstore());
        let payload = write_temp_file(&dir, "payload.json", r#"{}"#);

        cmd()
            .args([
                "check",
                doc.to_str().unwrap(),
                "Missing",
                payload.to_str().unwrap(),
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("no schema named"));
    }
}

mod error_handling {
    use super::*;

    #[test]
    fn file_not_found() {
        cmd()
            .args(["types", "/nonexistent/openapi.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn invalid_json_document() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "bad.json", r#"{ not valid json"#);

        cmd()
            .args(["types", doc.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }

    #[test]
    fn document_without_schemas_or_paths() {
        let dir = TempDir::new().unwrap();
        let doc = write_temp_file(&dir, "empty.json", r#"{"swagger": "2.0"}"#);

        cmd()
            .args(["types", doc.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid document"));
    }
}

mod help_and_version {
    use super::*;

    #[test]
    fn help_flag() {
        cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Emit client artifacts"));
    }

    #[test]
    fn version_flag() {
        cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("openapi-scaffold"));
    }

    #[test]
    fn types_help() {
        cmd()
            .args(["types", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--date-repr"))
            .stdout(predicate::str::contains("--enum-naming"));
    }

    #[test]
    fn validators_help() {
        cmd()
            .args(["validators", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--location"))
            .stdout(predicate::str::contains("--dialect"));
    }
}

/// Remote document loading via a local mock server.
#[cfg(feature = "remote")]
mod remote {
    use super::*;

    #[test]
    fn types_from_url() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/openapi.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(petstore())
            .create();

        cmd()
            .args(["types", &format!("{}/openapi.json", server.url())])
            .assert()
            .success()
            .stdout(predicate::str::contains("export interface Pet"));

        mock.assert();
    }

    #[test]
    fn url_404_is_a_network_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/missing.json")
            .with_status(404)
            .create();

        cmd()
            .args(["types", &format!("{}/missing.json", server.url())])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("failed to fetch"));

        mock.assert();
    }
}
