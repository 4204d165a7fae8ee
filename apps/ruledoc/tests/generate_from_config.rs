use ruledoc::config::{resolve_effective, Overrides};
use ruledoc::generate::{load_plugin, run_generate};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const MANIFEST: &str = r#"{
  "name": "@acme/eslint-plugin",
  "rules": {
    "prefer-x": { "meta": { "type": "suggestion", "docs": { "description": "prefer x." }, "hasSuggestions": true } },
    "no-y": { "meta": { "type": "problem", "docs": { "description": "disallow y" }, "fixable": "whitespace" } },
    "helper": { "create": "not a rule" }
  },
  "configs": {
    "recommended": { "rules": { "@acme/no-y": ["error", {}] } },
    "all": [{ "rules": { "@acme/no-y": "error", "@acme/prefer-x": "warn" } }]
  }
}"#;

fn seed(root: &Path) {
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("docs/rules")).unwrap();
    fs::write(root.join("plugin.json"), MANIFEST).unwrap();
    fs::write(
        root.join("ruledoc.yaml"),
        "manifest: plugin.json\nsplitBy: meta.type\nruleListColumns: [name, configsError, configsWarn, fixable, hasSuggestions]\nconfigEmoji: [\"all\"]\n",
    )
    .unwrap();
    fs::write(root.join("docs/rules/prefer-x.md"), "Prefer x.\n").unwrap();
    fs::write(root.join("docs/rules/no-y.md"), "# no-y\n\nDetails.\n").unwrap();
    fs::write(
        root.join("README.md"),
        "# acme\n\n## Rules\n\n<!-- begin auto-generated rules list -->\n<!-- end auto-generated rules list -->\n",
    )
    .unwrap();
}

#[test]
fn test_generate_from_yaml_config_splits_list_and_is_stable() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    seed(root);

    let overrides = Overrides {
        repo_root: root.to_str().map(str::to_string),
        ..Overrides::default()
    };
    let settings = resolve_effective(&overrides).unwrap();
    let plugin = load_plugin(&settings).unwrap();
    let report = run_generate(&settings, &plugin).unwrap();
    // `helper` has no metadata and gets no doc.
    assert_eq!(report.actions.len(), 3);
    assert!(report.issues.is_empty());

    let readme = fs::read_to_string(root.join("README.md")).unwrap();
    assert!(readme.contains("\n### problem\n\n| Name | 💼 | ⚠️ | 🔧 |"));
    assert!(readme.contains("\n### suggestion\n\n"));
    assert!(readme.contains("| [no-y](docs/rules/no-y.md) | ✅ 💼 |  | 🔧 |  |"));
    assert!(readme.contains("| [prefer-x](docs/rules/prefer-x.md) |  | ⚠️ |  | 💡 |"));

    let doc = fs::read_to_string(root.join("docs/rules/prefer-x.md")).unwrap();
    // Suggestions alone do not trigger the combined fix notice.
    assert_eq!(
        doc,
        "# Prefer x (`@acme/prefer-x`)\n\n⚠️ This rule _warns_ in the `all` config.\n\n<!-- end auto-generated rule header -->\n\nPrefer x.\n"
    );

    let mut check = settings.clone();
    check.check = true;
    let again = run_generate(&check, &plugin).unwrap();
    assert_eq!(again.drifted().count(), 0);
}
