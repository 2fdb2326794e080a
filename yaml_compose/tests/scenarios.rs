//! End-to-end composition scenarios driven through the public API.

use anyhow::{Result, ensure};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use test_helpers::ComposeTree;
use yaml_compose::{ComposeError, Composer, MemoryFs};

const BASE: &str = "/srv/base.yaml";

fn layer(name: &str) -> String {
    format!("{BASE}.d/{name}")
}

fn compose(fs: MemoryFs, layers: &[&str]) -> Result<Value> {
    let out = Composer::with_fs(BASE, layers.iter().copied(), fs).compose()?;
    Ok(Value::Object(out))
}

#[fixture]
fn christmas() -> MemoryFs {
    MemoryFs::new().with_file(
        BASE,
        "doe: \"a deer\"\nxmas: true\nfrench-hens: [1, 2, 3]\n",
    )
}

#[rstest]
fn scalar_override_and_list_replacement(christmas: MemoryFs) -> Result<()> {
    let fs = christmas
        .with_file(layer("1-c.yaml"), "xmas: false\n")
        .with_file(layer("2-d.yaml"), "french-hens: [4, 5, 6]\n");
    let out = compose(fs, &["2-d.yaml", "1-c.yaml"])?;
    ensure!(
        out == json!({ "doe": "a deer", "xmas": false, "french-hens": [4, 5, 6] }),
        "unexpected output {out}"
    );
    Ok(())
}

#[rstest]
fn deep_merge_keeps_siblings_and_null_replaces() -> Result<()> {
    let fs = MemoryFs::new()
        .with_file(
            BASE,
            "app: { db: { host: base, pool: 10, ports: [5432] } }\nfeature: true\nkeep: value\n",
        )
        .with_file(
            layer("1-layer.yaml"),
            "app: { db: { host: layer, ports: [5433] } }\nfeature: null\n",
        );
    let out = compose(fs, &["1-layer.yaml"])?;
    ensure!(
        out == json!({
            "app": { "db": { "host": "layer", "pool": 10, "ports": [5433] } },
            "feature": null,
            "keep": "value",
        }),
        "unexpected output {out}"
    );
    Ok(())
}

#[rstest]
fn path_scoped_list_strategies() -> Result<()> {
    let fs = MemoryFs::new()
        .with_file(
            BASE,
            "app:\n  prepend-list: [b1, b2]\n  append-list: [b3]\n  override-list: [b4]\n",
        )
        .with_file(
            layer("1-lists.yaml"),
            concat!(
                "merge:\n",
                "  paths:\n",
                "    app.prepend-list: { list: prepend }\n",
                "    app.append-list: { list: append }\n",
                "    app.override-list: { list: override }\n",
                "---\n",
                "app:\n",
                "  prepend-list: [l1]\n",
                "  append-list: [l2]\n",
                "  override-list: [l3]\n",
            ),
        );
    let out = compose(fs, &["1-lists.yaml"])?;
    ensure!(
        out == json!({
            "app": {
                "prepend-list": ["l1", "b1", "b2"],
                "append-list": ["b3", "l2"],
                "override-list": ["l3"],
            }
        }),
        "unexpected output {out}"
    );
    ensure!(out.get("merge").is_none(), "metadata leaked into output");
    Ok(())
}

#[rstest]
fn escaped_dot_targets_a_dotted_key() -> Result<()> {
    let fs = MemoryFs::new()
        .with_file(BASE, "app:\n  \"db.main\":\n    ports: [5432]\n")
        .with_file(
            layer("1-ports.yaml"),
            concat!(
                "merge:\n",
                "  paths:\n",
                "    'app.db\\.main.ports': { list: append }\n",
                "---\n",
                "app:\n",
                "  \"db.main\":\n",
                "    ports: [5433]\n",
            ),
        );
    let out = compose(fs, &["1-ports.yaml"])?;
    ensure!(
        out == json!({ "app": { "db.main": { "ports": [5432, 5433] } } }),
        "unexpected output {out}"
    );
    Ok(())
}

#[rstest]
fn extract_path_merges_only_the_selected_subtree() -> Result<()> {
    let fs = MemoryFs::new()
        .with_file(BASE, "app: { db: { host: base, pool: 10 } }\nkeep: value\n")
        .with_file(
            layer("1-layer.yaml"),
            "noise: x\napp: { db: { host: layer } }\n",
        )
        .with_file(layer("2-unrelated.yaml"), "noise: y\n");
    let out = Composer::with_fs(BASE, ["1-layer.yaml", "2-unrelated.yaml"], fs)
        .extract_layer_path("app.db")
        .compose()?;
    let out = Value::Object(out);
    ensure!(
        out == json!({ "app": { "db": { "host": "layer", "pool": 10 } }, "keep": "value" }),
        "unexpected output {out}"
    );
    Ok(())
}

#[rstest]
#[case::no_separator("bad.yaml")]
#[case::empty_prefix("-bad.yaml")]
#[case::word_prefix("one-bad.yaml")]
fn invalid_layer_names_are_rejected(#[case] name: &str) {
    let err = Composer::with_fs(BASE, [name], MemoryFs::new())
        .run()
        .expect_err("invalid layer name must fail");
    assert!(matches!(err, ComposeError::LayerName(_)));
    assert!(err.to_string().contains("invalid layer file name"));
}

#[rstest]
fn defaults_and_paths_combine() -> Result<()> {
    let fs = MemoryFs::new()
        .with_file(BASE, "tags: [base]\nservers: { a: 1, b: 2 }\n")
        .with_file(
            layer("1-meta.yml"),
            concat!(
                "merge:\n",
                "  defaults: { list: append }\n",
                "  paths:\n",
                "    servers: { map: override }\n",
                "---\n",
                "tags: [layer]\n",
                "servers: { c: 3 }\n",
            ),
        );
    let out = compose(fs, &["1-meta.yml"])?;
    ensure!(
        out == json!({ "tags": ["base", "layer"], "servers": { "c": 3 } }),
        "unexpected output {out}"
    );
    Ok(())
}

#[rstest]
fn strategies_do_not_leak_between_layers() -> Result<()> {
    let fs = MemoryFs::new()
        .with_file(BASE, "tags: [base]\n")
        .with_file(
            layer("1-append.yaml"),
            "merge: { defaults: { list: append } }\n---\ntags: [one]\n",
        )
        .with_file(layer("2-plain.yaml"), "tags: [two]\n");
    let out = compose(fs, &["1-append.yaml", "2-plain.yaml"])?;
    ensure!(out == json!({ "tags": ["two"] }), "unexpected output {out}");
    Ok(())
}

#[rstest]
fn unknown_strategy_names_the_path_key() {
    let fs = MemoryFs::new().with_file(BASE, "a: 1\n").with_file(
        layer("1-bad.yaml"),
        "merge:\n  paths:\n    a: { list: shuffle }\n---\na: 2\n",
    );
    let err = Composer::with_fs(BASE, ["1-bad.yaml"], fs)
        .compose()
        .expect_err("unknown strategy must fail");
    let message = err.to_string();
    assert!(message.contains("invalid merge.paths.'a'"), "{message}");
    assert!(message.contains("shuffle"), "{message}");
}

#[rstest]
fn run_emits_yaml_in_insertion_order() -> Result<()> {
    let fs = MemoryFs::new()
        .with_file(BASE, "zeta: 1\nalpha: 2\n")
        .with_file(layer("1-add.yaml"), "middle: 3\n");
    let text = Composer::with_fs(BASE, ["1-add.yaml"], fs).run()?;
    let zeta = text.find("zeta").unwrap_or(usize::MAX);
    let alpha = text.find("alpha").unwrap_or(usize::MAX);
    let middle = text.find("middle").unwrap_or(usize::MAX);
    ensure!(zeta < alpha && alpha < middle, "keys out of order in {text:?}");
    let decoded: Value = serde_yaml::from_str(&text)?;
    ensure!(
        decoded == json!({ "zeta": 1, "alpha": 2, "middle": 3 }),
        "unexpected output {text:?}"
    );
    Ok(())
}

#[rstest]
fn run_output_with_a_mapping_after_a_sequence_parses_back() -> Result<()> {
    let fs = MemoryFs::new()
        .with_file(BASE, "tags: [base]\nservers: { primary: { host: a } }\n")
        .with_file(
            layer("1-more.yaml"),
            "merge:\n  defaults: { list: append }\n---\ntags: [layer]\nservers: { backup: { ports: [1] } }\n",
        );
    let text = Composer::with_fs(BASE, ["1-more.yaml"], fs).run()?;
    let decoded: Value = serde_yaml::from_str(&text)?;
    ensure!(
        decoded
            == json!({
                "tags": ["base", "layer"],
                "servers": { "primary": { "host": "a" }, "backup": { "ports": [1] } }
            }),
        "unexpected output {text}"
    );
    Ok(())
}

#[rstest]
fn metadata_with_null_data_never_reaches_the_output() -> Result<()> {
    let fs = MemoryFs::new()
        .with_file(BASE, "tags: [base]\n")
        .with_file(layer("1-meta.yaml"), "merge:\n  defaults: { list: append }\n---\n~\n");
    let out = compose(fs, &["1-meta.yaml"])?;
    ensure!(out == json!({ "tags": ["base"] }), "unexpected output {out}");
    Ok(())
}

#[rstest]
fn composes_from_the_host_filesystem() -> Result<()> {
    let tree = ComposeTree::new()?;
    tree.write_base("doe: a deer\nxmas: true\n")?
        .write_layer("10-late.yaml", "xmas: late\n")?
        .write_layer("2-early.yml", "xmas: early\nring: gold\n")?;
    let out = Composer::new(tree.base_path(), ["10-late.yaml", "2-early.yml"]).compose()?;
    ensure!(
        Value::Object(out) == json!({ "doe": "a deer", "xmas": "late", "ring": "gold" }),
        "numeric order should apply layer 10 last"
    );
    Ok(())
}
