//! End-to-end behaviour of the factory, registry and scheduler.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use themeleon_engine::{factory, Context, Mixin, RenderState};

fn ctx(value: Value) -> Context {
    value.as_object().cloned().unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
#[error("step {0} exploded")]
struct Boom(usize);

#[tokio::test]
async fn test_failure_short_circuits_with_original_error() {
    let tmp = tempfile::tempdir().unwrap();
    let ran = Arc::new(Mutex::new(Vec::new()));
    let t = factory();
    let ran_in_theme = Arc::clone(&ran);
    let theme = t.theme("theme", move |b| {
        for k in 0..6 {
            let ran = Arc::clone(&ran_in_theme);
            b.push(move |_| async move {
                ran.lock().unwrap().push(k);
                if k == 3 {
                    return Err(anyhow::Error::new(Boom(k)));
                }
                Ok(Value::Null)
            });
        }
        Ok(())
    });

    let completion = theme.render(tmp.path().join("out"), Context::new()).unwrap();
    let state = completion.state_handle();
    let err = completion.await.unwrap_err();

    assert_eq!(err.downcast_ref::<Boom>().map(|b| b.0), Some(3));
    assert_eq!(*ran.lock().unwrap(), vec![0, 1, 2, 3]);
    assert_eq!(state.get(), RenderState::Failed);
}

#[tokio::test]
async fn test_destination_exists_before_first_user_step() {
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("a/b/c");
    let t = factory();
    let theme = t.theme("theme", |b| {
        let dest = b.dest().to_path_buf();
        b.push_sync(move |prev| {
            anyhow::ensure!(dest.is_dir(), "destination missing");
            assert_eq!(prev, Value::Null);
            Ok(json!("checked"))
        });
        Ok(())
    });

    let result = theme.render(&dest, Context::new()).unwrap().await.unwrap();

    assert_eq!(result, json!("checked"));
    assert!(dest.is_dir());
}

#[tokio::test]
async fn test_guard_failure_is_a_step_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("file");
    std::fs::write(&blocker, "not a dir").unwrap();
    let ran = Arc::new(Mutex::new(false));
    let t = factory();
    let flag = Arc::clone(&ran);
    let theme = t.theme("theme", move |b| {
        let flag = Arc::clone(&flag);
        b.push_sync(move |_| {
            *flag.lock().unwrap() = true;
            Ok(Value::Null)
        });
        Ok(())
    });

    let err = theme.render(&blocker, Context::new()).unwrap().await.unwrap_err();

    assert!(err.downcast_ref::<themeleon_fs::FsError>().is_some());
    assert!(!*ran.lock().unwrap());
}

#[tokio::test]
async fn test_last_registration_wins() {
    let tmp = tempfile::tempdir().unwrap();
    let make = |tag: &'static str| {
        Mixin::new(tag).with_op("x", move |b, _| {
            b.push_sync(move |_| Ok(json!(tag)));
            Ok(())
        })
    };
    let t = factory();
    t.use_ext(make("a"), &[]).unwrap().use_ext(make("b"), &[]).unwrap();
    let theme = t.theme("theme", |b| b.call("x", &[]));

    let result = theme.render(tmp.path().join("out"), Context::new()).unwrap().await.unwrap();

    assert_eq!(result, json!("b"));
}

#[tokio::test]
async fn test_registry_is_shared_not_snapshotted() {
    let tmp = tempfile::tempdir().unwrap();
    let t = factory();
    let theme = t.theme("theme", |b| {
        if b.has_op("late") {
            b.call("late", &[])?;
        }
        Ok(())
    });

    let first = theme.render(tmp.path().join("one"), Context::new()).unwrap().await.unwrap();
    assert_eq!(first, Value::Null);

    t.use_ext(
        Mixin::new("late").with_op("late", |b, _| {
            b.push_sync(|_| Ok(json!("late")));
            Ok(())
        }),
        &[],
    )
    .unwrap();

    let second = theme.render(tmp.path().join("two"), Context::new()).unwrap().await.unwrap();
    assert_eq!(second, json!("late"));
}

#[tokio::test]
async fn test_concurrent_renders_keep_their_own_order() {
    let tmp = tempfile::tempdir().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    let t = factory();
    let shared = Arc::clone(&log);
    let theme = t.theme("theme", move |b| {
        let tag = b.ctx().get("tag").and_then(Value::as_str).unwrap_or("?").to_string();
        for i in 0..5 {
            let log = Arc::clone(&shared);
            let tag = tag.clone();
            b.push(move |_| async move {
                tokio::task::yield_now().await;
                log.lock().unwrap().push((tag, i));
                tokio::task::yield_now().await;
                Ok(Value::Null)
            });
        }
        Ok(())
    });

    let a = theme.render(tmp.path().join("a"), ctx(json!({ "tag": "a" }))).unwrap();
    let b = theme.render(tmp.path().join("b"), ctx(json!({ "tag": "b" }))).unwrap();
    let (ra, rb) = tokio::join!(tokio::spawn(a), tokio::spawn(b));
    ra.unwrap().unwrap();
    rb.unwrap().unwrap();

    let log = log.lock().unwrap();
    for tag in ["a", "b"] {
        let order: Vec<i32> = log.iter().filter(|(t, _)| t == tag).map(|(_, i)| *i).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4], "render {} out of order", tag);
    }
}

#[test]
fn test_theme_path_normalization() {
    let t = factory();
    let single = t.theme("base", |_| Ok(()));
    let layered = t.theme(vec!["base", "override"], |_| Ok(()));

    assert_eq!(single.path(), &[PathBuf::from("base")]);
    assert_eq!(
        layered.path(),
        &[PathBuf::from("base"), PathBuf::from("override")]
    );
}

#[tokio::test]
async fn test_repeated_renders_do_not_share_state() {
    let tmp = tempfile::tempdir().unwrap();
    let t = factory();
    let theme = t.theme("theme", |b| {
        let dest = b.dest().to_path_buf();
        b.push_sync(move |_| Ok(json!(dest)));
        Ok(())
    });
    let one = tmp.path().join("one");
    let two = tmp.path().join("two");

    let c1 = theme.render(&one, Context::new()).unwrap();
    let c2 = theme.render(&two, Context::new()).unwrap();
    let r2 = c2.await.unwrap();
    let r1 = c1.await.unwrap();

    assert_eq!(r1, json!(one));
    assert_eq!(r2, json!(two));
    assert!(one.is_dir());
    assert!(two.is_dir());
}

#[tokio::test]
async fn test_layered_theme_scenario() {
    let tmp = tempfile::tempdir().unwrap();
    let seen = Arc::new(Mutex::new(None));
    let t = factory();
    let slot = Arc::clone(&seen);
    let theme = t.theme(["base", "override"], move |b| {
        let ctx = Arc::clone(b.ctx());
        let slot = Arc::clone(&slot);
        b.push_sync(move |_| {
            *slot.lock().unwrap() = ctx.get("name").cloned();
            Ok(Value::Null)
        });
        Ok(())
    });
    let out = tmp.path().join("out");

    let completion = theme.render(&out, ctx(json!({ "name": "x" }))).unwrap();
    assert_eq!(completion.state(), RenderState::Pending);
    completion.await.unwrap();

    assert_eq!(*seen.lock().unwrap(), Some(json!("x")));
    assert!(out.is_dir());
}
