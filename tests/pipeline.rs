//! End-to-end sync -> diff -> update -> impact over replayed fetches.
//!
//! 1. Record two versions of an API description into a cassette.
//! 2. Replay them through a `ServiceContext` with an in-memory filesystem.
//! 3. Check that the lock, the diff and the impact report follow the change.
//! 4. Replay the whole cassette a second time and assert determinism.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use swag::adapters::replaying::{ReplayingFetcher, ReplayingFileSystem};
use swag::cassette::{Cassette, CassetteRecorder, CassetteReplayer};
use swag::commands::update::Target;
use swag::commands::{diff, impact, sync, update, Project};
use swag::context::ServiceContext;
use swag::ports::filesystem::MemFs;
use swag::ports::FileSystem;

fn description(with_zip: bool) -> Value {
    let mut address = json!({ "properties": { "city": { "type": "string" } } });
    if with_zip {
        address["properties"]["zip"] = json!({ "type": "string", "description": "postal code" });
    }
    json!({
        "tags": [
            { "name": "用户 前端:[alice] 后端:bob;", "description": "User Controller" },
            { "name": "店铺", "description": "Shop Controller" }
        ],
        "paths": {
            "/user/{id}": {
                "get": {
                    "tags": ["用户 前端:[alice] 后端:bob;"],
                    "summary": "load a user",
                    "parameters": [{ "name": "id", "in": "path", "required": true, "type": "integer" }],
                    "responses": { "200": { "schema": { "$ref": "#/definitions/ResultDTO«User»" } } }
                }
            },
            "/shop/list": {
                "get": {
                    "tags": ["店铺"],
                    "summary": "list shops",
                    "responses": {
                        "200": { "schema": { "type": "array", "items": { "$ref": "#/definitions/Shop" } } }
                    }
                }
            }
        },
        "definitions": {
            "User": {
                "required": ["id"],
                "properties": {
                    "id": { "type": "integer" },
                    "address": { "$ref": "#/definitions/Address" }
                }
            },
            "Address": address,
            "Shop": {
                "properties": {
                    "owner": { "$ref": "#/definitions/User" },
                    "tags": { "type": "array", "items": { "type": "string" } }
                }
            }
        }
    })
}

fn record_cassette(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("swag_pipeline_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{name}.cassette.yaml"));

    let url = json!({ "url": "http://api/v2/api-docs" });
    let mut recorder = CassetteRecorder::new(&path, name);
    for doc in [description(false), description(true), description(true), description(true)] {
        recorder.record("fetch", "fetch", url.clone(), json!({ "Ok": doc }));
    }
    recorder.finish().expect("recording should succeed")
}

fn replaying_context(cassette_path: &Path) -> ServiceContext {
    let content = std::fs::read_to_string(cassette_path).unwrap();
    let cassette = Cassette::from_yaml(&content).unwrap();
    assert_eq!(cassette.origin, "http://api/v2/api-docs");

    let fs = MemFs::new();
    fs.write(Path::new("/project/swag-config.json"), r#"{"originUrl": "http://api/v2/api-docs"}"#)
        .unwrap();
    let replayer = Arc::new(Mutex::new(CassetteReplayer::new(&cassette)));
    ServiceContext::from_parts(Box::new(fs), Box::new(ReplayingFetcher::new(replayer)))
}

/// Runs the whole workflow, returning every command's output.
fn run_pipeline(ctx: &ServiceContext) -> Vec<String> {
    let project = Project::load(ctx, Path::new("/project")).unwrap();
    vec![
        sync::execute(ctx, &project).unwrap(),
        diff::execute(ctx, &project).unwrap(),
        update::execute(ctx, &project, &Target::Definition("Address".into())).unwrap(),
        diff::execute(ctx, &project).unwrap(),
        impact::execute(ctx, &project, "Address").unwrap(),
    ]
}

#[test]
fn sync_diff_update_impact_round_trip() {
    let cassette = record_cassette("round-trip");
    let ctx = replaying_context(&cassette);
    let outputs = run_pipeline(&ctx);

    assert!(outputs[0].starts_with("/project/service/swag.lock created (2 modules, 3 definitions)."));

    let diff_text = &outputs[1];
    assert!(diff_text.contains("  ~ Address\n      + zip"));
    assert!(diff_text.contains("      affects definitions: User, Shop"));
    assert!(diff_text.contains("      affects modules: user, shop"));
    assert!(diff_text.contains("2 modules affected."));

    assert_eq!(outputs[2], "Definition `Address` updated in the lock.");
    assert_eq!(outputs[3], "No changes since last sync.");

    let impact_text = &outputs[4];
    assert!(impact_text.contains("Direct dependents: User"));
    assert!(impact_text.contains("Transitive dependents: User, Shop"));
    assert!(impact_text.contains("Direct modules: (none)"));
    assert!(impact_text.contains("Transitive modules: user, shop"));

    let lock = ctx.fs.read_to_string(Path::new("/project/service/swag.lock")).unwrap();
    let lock: Value = serde_json::from_str(&lock).unwrap();
    let address = &lock["definitions"][1];
    assert_eq!(address["name"], "Address");
    assert_eq!(address["properties"][1]["description"], "postal code");
}

#[test]
fn replaying_twice_is_deterministic() {
    let cassette = record_cassette("determinism");
    let first = run_pipeline(&replaying_context(&cassette));
    let second = run_pipeline(&replaying_context(&cassette));
    assert_eq!(first, second);
}

#[test]
fn exhausted_cassette_fails_the_fetch() {
    let dir = std::env::temp_dir().join("swag_pipeline_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = CassetteRecorder::new(dir.join("empty.cassette.yaml"), "empty").finish().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let ctx = ServiceContext::replaying_cassette(&Cassette::from_yaml(&content).unwrap());
    let project = Project {
        root: PathBuf::from("/project"),
        config: swag::config::Config {
            origin_url: "http://api/v2/api-docs".into(),
            ..swag::config::Config::default()
        },
    };

    let err = sync::execute(&ctx, &project).unwrap_err();
    assert!(err.to_string().starts_with("failed to fetch http://api/v2/api-docs"));
}

#[test]
fn replaying_filesystem_serves_recorded_lock() {
    let dir = std::env::temp_dir().join("swag_pipeline_test");
    std::fs::create_dir_all(&dir).unwrap();
    let mut recorder = CassetteRecorder::new(dir.join("fs.cassette.yaml"), "fs");
    recorder.record("fs", "exists", json!({ "path": "/p/service/swag.lock" }), json!(true));
    recorder.record(
        "fs",
        "read_to_string",
        json!({ "path": "/p/service/swag.lock" }),
        json!({ "Ok": "{\"mods\": [], \"definitions\": [{\"name\": \"User\", \"properties\": []}]}" }),
    );
    let path = recorder.finish().unwrap();

    let cassette = Cassette::from_yaml(&std::fs::read_to_string(path).unwrap()).unwrap();
    let replayer = Arc::new(Mutex::new(CassetteReplayer::new(&cassette)));
    let ctx = ServiceContext::from_parts(
        Box::new(ReplayingFileSystem::new(Arc::clone(&replayer))),
        Box::new(ReplayingFetcher::new(replayer)),
    );
    let project =
        Project { root: PathBuf::from("/p"), config: swag::config::Config::default() };

    let text = impact::execute(&ctx, &project, "User").unwrap();
    assert!(text.starts_with("Definition: User"));
}
