//! Flattening through the real binary over egg-info directories

mod common;

use common::{TestEnvironment, json_output};
use predicates::prelude::*;
use serde_json::json;

#[test]
fn test_flatten_site() {
    let env = TestEnvironment::site();
    let output = env.calmjs().args(["flatten", "site"]).assert().success();

    assert_eq!(
        json_output(&output.get_output().stdout),
        json!({
            "name": "site",
            "dependencies": {
                "left-pad": "~1.1.1",
                "jquery": "~1.9.0",
                "backbone": "~1.3.0",
                "jquery-ui": "~1.12.0",
                "underscore": "~1.8.0",
            },
            "devDependencies": {"sinon": "~1.17.0"},
        })
    );
}

#[test]
fn test_flatten_output_is_stable() {
    let env = TestEnvironment::site();
    env.calmjs()
        .args(["flatten", "service"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "{\n    \"dependencies\": {\n        \"left-pad\": \"~1.1.1\",\n        \"underscore\": \"~1.8.0\"\n    },",
        ));
}

#[test]
fn test_flatten_direct() {
    let env = TestEnvironment::site();
    let output = env
        .calmjs()
        .args(["flatten", "site", "--direct"])
        .assert()
        .success();

    assert_eq!(
        json_output(&output.get_output().stdout),
        json!({
            "name": "site",
            "dependencies": {"underscore": "~1.8.0", "jquery": "~1.9.0"},
            "devDependencies": {},
        })
    );
}

#[test]
fn test_flatten_dep_key() {
    let env = TestEnvironment::site();
    let output = env
        .calmjs()
        .args(["flatten", "service", "--dep-key", "devDependencies"])
        .assert()
        .success();

    assert_eq!(
        json_output(&output.get_output().stdout),
        json!({"devDependencies": {"sinon": "~1.17.0"}})
    );
}

#[test]
fn test_flatten_nulled() {
    let env = TestEnvironment::new();
    env.add_egg_info(
        "lib",
        "1.0.0",
        &[],
        &[("default.json", r#"{"dependencies": {"jquery": "~3.0.0", "left-pad": "1.1.1"}}"#)],
    );
    env.add_egg_info(
        "app",
        "2.0",
        &["lib>=1.0.0"],
        &[("default.json", r#"{"dependencies": {"jquery": "~3.0.0", "left-pad": null}}"#)],
    );

    let output = env.calmjs().args(["flatten", "app"]).assert().success();
    assert_eq!(
        json_output(&output.get_output().stdout),
        json!({"dependencies": {"jquery": "~3.0.0"}, "devDependencies": {}})
    );
}

#[test]
fn test_flatten_newest_version_wins() {
    let env = TestEnvironment::new();
    env.add_egg_info(
        "uilib",
        "1.1.0",
        &[],
        &[("default.json", r#"{"dependencies": {"jquery": "~1.0.0"}}"#)],
    );
    env.add_egg_info(
        "uilib",
        "1.9.0",
        &[],
        &[("default.json", r#"{"dependencies": {"jquery": "~1.9.0"}}"#)],
    );
    env.add_egg_info("app", "2.0", &["uilib>=1.0"], &[]);

    let output = env.calmjs().args(["flatten", "app"]).assert().success();
    assert_eq!(
        json_output(&output.get_output().stdout),
        json!({"dependencies": {"jquery": "~1.9.0"}, "devDependencies": {}})
    );
}

#[test]
fn test_flatten_missing_package() {
    let env = TestEnvironment::new();
    let output = env.calmjs().args(["flatten", "nosuchpkg"]).assert().success();
    assert_eq!(
        json_output(&output.get_output().stdout),
        json!({"dependencies": {}, "devDependencies": {}})
    );
}

#[test]
fn test_flatten_missing_dependency_fails() {
    let env = TestEnvironment::new();
    env.add_egg_info("app", "2.0", &["uilib>=1.0"], &[]);

    env.calmjs()
        .args(["flatten", "app"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "The 'uilib>=1.0' distribution was not found and is required by app 2.0",
        ));
}

#[test]
fn test_flatten_alternative_filename() {
    let env = TestEnvironment::new();
    env.add_egg_info(
        "app",
        "2.0",
        &[],
        &[("bower.json", r#"{"dependencies": {"jquery": "~3.0.0"}}"#)],
    );

    let output = env
        .calmjs()
        .args(["flatten", "app", "--filename", "bower.json"])
        .assert()
        .success();
    assert_eq!(
        json_output(&output.get_output().stdout)["dependencies"],
        json!({"jquery": "~3.0.0"})
    );
}

#[test]
fn test_flatten_filename_from_config() {
    let env = TestEnvironment::new();
    env.add_egg_info(
        "app",
        "2.0",
        &[],
        &[("package.json", r#"{"dependencies": {"jquery": "~3.0.0"}}"#)],
    );
    env.write_file(
        "calmjs.yaml",
        "site_packages:\n  - site-packages\nfilename: package.json\ndep_keys: [dependencies]\n",
    );

    let output = common::calmjs_cmd(&env.path)
        .args(["flatten", "app"])
        .assert()
        .success();
    assert_eq!(
        json_output(&output.get_output().stdout),
        json!({"dependencies": {"jquery": "~3.0.0"}})
    );
}

#[test]
fn test_flatten_to_file() {
    let env = TestEnvironment::site();
    env.calmjs()
        .args(["flatten", "widget", "--output", "package.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&env.read_file("package.json")).expect("written JSON");
    assert_eq!(
        written["dependencies"],
        json!({"left-pad": "~1.1.1", "jquery": "~2.0.0", "underscore": "~1.7.0"})
    );
}

#[test]
fn test_flatten_invalid_names_are_skipped() {
    let env = TestEnvironment::site();
    let output = env
        .calmjs()
        .args(["flatten", "[dev]", "widget"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring invalid package names: [dev]"));
    assert_eq!(
        json_output(&output.get_output().stdout)["devDependencies"],
        json!({"sinon": "~1.15.0"})
    );
}

fn marker_guarded_env() -> TestEnvironment {
    let env = TestEnvironment::new();
    env.add_dist_info(
        "app",
        "1.0",
        &["lib ; python_version >= \"3\""],
        &[("default.json", r#"{"name": "app", "dependencies": {"underscore": "~1.8.0"}}"#)],
    );
    env.add_dist_info(
        "lib",
        "1.0",
        &[],
        &[("default.json", r#"{"dependencies": {"jquery": "~3.0.0"}}"#)],
    );
    env
}

#[test]
fn test_flatten_follows_marker_guarded_dependency() {
    let env = marker_guarded_env();

    env.calmjs()
        .args(["resolve", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib 1.0"));

    let output = env.calmjs().args(["flatten", "app"]).assert().success();
    assert_eq!(
        json_output(&output.get_output().stdout),
        json!({
            "name": "app",
            "dependencies": {"jquery": "~3.0.0", "underscore": "~1.8.0"},
            "devDependencies": {},
        })
    );
}

#[test]
fn test_flatten_markers_from_config() {
    let env = marker_guarded_env();
    env.write_file(
        "calmjs.yaml",
        "site_packages:\n  - site-packages\nmarkers:\n  python_version: '2.7'\n",
    );

    let output = common::calmjs_cmd(&env.path)
        .args(["flatten", "app"])
        .assert()
        .success();
    assert_eq!(
        json_output(&output.get_output().stdout)["dependencies"],
        json!({"underscore": "~1.8.0"})
    );
}
