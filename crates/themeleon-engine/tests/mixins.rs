//! Built-in mixins driven through real renders.

use std::fs;

use serde_json::{json, Value};
use themeleon_engine::{factory, Context, RenderError};

#[tokio::test]
async fn test_copy_merges_layers_with_overrides_winning() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("base");
    let over = tmp.path().join("override");
    fs::create_dir_all(base.join("assets")).unwrap();
    fs::create_dir_all(over.join("assets")).unwrap();
    fs::write(base.join("assets/app.css"), "base css").unwrap();
    fs::write(base.join("assets/app.js"), "base js").unwrap();
    fs::write(over.join("assets/app.css"), "override css").unwrap();
    fs::write(base.join("index.html"), "base index").unwrap();
    fs::write(over.join("index.html"), "override index").unwrap();

    let t = factory();
    let theme = t.theme(vec![base, over], |b| {
        b.call("copy", &[json!("assets")])?;
        b.call("copy", &[json!("index.html"), json!("pages/home.html")])
    });
    let out = tmp.path().join("out");

    let last = theme.render(&out, Context::new()).unwrap().await.unwrap();

    assert_eq!(last, json!({ "copied": 1 }));
    assert_eq!(fs::read_to_string(out.join("assets/app.css")).unwrap(), "override css");
    assert_eq!(fs::read_to_string(out.join("assets/app.js")).unwrap(), "base js");
    assert_eq!(
        fs::read_to_string(out.join("pages/home.html")).unwrap(),
        "override index"
    );
}

#[tokio::test]
async fn test_copy_missing_source_fails_render() {
    let tmp = tempfile::tempdir().unwrap();
    let t = factory();
    let theme = t.theme(tmp.path().join("theme"), |b| b.call("copy", &[json!("ghost")]));

    let err = theme
        .render(tmp.path().join("out"), Context::new())
        .unwrap()
        .await
        .unwrap_err();

    assert!(err.to_string().contains("'ghost' not found in any theme layer"));
    assert!(tmp.path().join("out").is_dir());
}

#[tokio::test]
async fn test_copy_whole_theme_into_its_own_subdirectory() {
    let tmp = tempfile::tempdir().unwrap();
    let theme_dir = tmp.path().join("theme");
    fs::create_dir_all(&theme_dir).unwrap();
    fs::write(theme_dir.join("index.html"), "hi").unwrap();
    let t = factory();
    let theme = t.theme(theme_dir.clone(), |b| b.call("copy", &[json!(".")]));
    let out = theme_dir.join("out");

    let last = theme.render(&out, Context::new()).unwrap().await.unwrap();

    assert_eq!(last, json!({ "copied": 1 }));
    assert_eq!(fs::read_to_string(out.join("index.html")).unwrap(), "hi");
    assert!(!out.join("out").exists());
}

#[tokio::test]
async fn test_write_and_mkdir() {
    let tmp = tempfile::tempdir().unwrap();
    let t = factory();
    let theme = t.theme("unused", |b| {
        b.call("mkdir", &[json!("empty/dir")])?;
        b.call("write", &[json!("notes/readme.txt"), json!("hello")])?;
        b.call("write", &[json!("data.json"), json!({ "k": [1, 2] })])
    });
    let out = tmp.path().join("out");

    theme.render(&out, Context::new()).unwrap().await.unwrap();

    assert!(out.join("empty/dir").is_dir());
    assert_eq!(fs::read_to_string(out.join("notes/readme.txt")).unwrap(), "hello");
    let data: Value = serde_json::from_str(&fs::read_to_string(out.join("data.json")).unwrap()).unwrap();
    assert_eq!(data, json!({ "k": [1, 2] }));
}

#[test]
fn test_bad_operation_arguments_fail_setup() {
    let t = factory();
    let theme = t.theme("unused", |b| b.call("write", &[json!(42)]));

    let err = theme.render("/unused/out", Context::new()).unwrap_err();
    let RenderError::Setup(inner) = err;
    assert_eq!(
        inner.to_string(),
        "operation 'write' expects a string argument at position 0"
    );
}

#[tokio::test]
async fn test_context_extension_by_name_with_args() {
    let tmp = tempfile::tempdir().unwrap();
    let t = factory();
    t.use_ext("context", &[json!("meta/ctx.json")]).unwrap();
    let theme = t.theme("unused", |b| b.call("dump_context", &[]));
    let out = tmp.path().join("out");
    let ctx = json!({ "name": "x", "items": [1, 2, 3] })
        .as_object()
        .cloned()
        .unwrap();

    theme.render(&out, ctx).unwrap().await.unwrap();

    let written: Value =
        serde_json::from_str(&fs::read_to_string(out.join("meta/ctx.json")).unwrap()).unwrap();
    assert_eq!(written, json!({ "name": "x", "items": [1, 2, 3] }));
    assert_eq!(t.extensions(), vec!["core", "context"]);
}

#[test]
fn test_context_constructor_rejects_empty_name() {
    let t = factory();
    let err = t.use_ext("context", &[json!("  ")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "extension constructor 'context' failed: context file name must not be empty"
    );
}
