use daybook::config::Settings;
use daybook::domain::schemas::SchemaRegistry;
use daybook::domain::Collection;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_without_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;

    let settings = Settings::from_file(&temp_dir.path().join("daybook.toml"))?;
    assert_eq!(settings.bind_address(), "127.0.0.1:3000");
    assert_eq!(settings.log_level, "info");
    assert!(settings.storage.data_dir.is_none());
    assert!(settings.schemas.is_empty());

    Ok(())
}

#[test]
fn test_load_schema_overrides() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("schemas"))?;

    let daybook_toml = format!(
        r#"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 8080

[storage]
data_dir = "{data}"
schemas_dir = "{schemas}"
"#,
        data = root.join("data").display(),
        schemas = root.join("schemas").display(),
    );
    fs::write(root.join("daybook.toml"), daybook_toml)?;

    // A schema in JSON
    fs::write(
        root.join("schemas/todos.json"),
        r#"{ "title": { "type": "String", "required": true }, "done": "Boolean" }"#,
    )?;

    // A schema in YAML
    let journal_yaml = r#"
title:
  type: String
  required: true
body: Text
"#;
    fs::write(root.join("schemas/journal.yaml"), journal_yaml)?;

    // Ignored: not a schema file
    fs::write(root.join("schemas/README.md"), "notes")?;

    let settings = Settings::from_file(&root.join("daybook.toml"))?;
    assert_eq!(settings.bind_address(), "0.0.0.0:8080");
    assert_eq!(settings.log_level, "debug");
    assert_eq!(settings.schemas.len(), 2);

    let registry = SchemaRegistry::with_overrides(&settings.schemas)?;
    let journal: Vec<&String> = registry.get(Collection::Journal).as_object().unwrap().keys().collect();
    assert_eq!(journal, vec!["title", "body"]);
    assert_eq!(registry.get(Collection::Todos)["done"], "Boolean");
    // Planner keeps its built-in schema
    assert!(registry.get(Collection::Planner).get("day").is_some());

    Ok(())
}

#[test]
fn test_invalid_settings_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::write(root.join("daybook.toml"), "[server]\nport = 0\n")?;

    let err = Settings::from_file(&root.join("daybook.toml")).unwrap_err();
    assert!(err.to_string().contains("server.port"));

    Ok(())
}

#[test]
fn test_unknown_schema_override_rejected() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("schemas"))?;
    fs::write(
        root.join("daybook.toml"),
        format!("[storage]\nschemas_dir = \"{}\"\n", root.join("schemas").display()),
    )?;
    fs::write(root.join("schemas/notes.json"), r#"{ "title": "String" }"#)?;

    assert!(Settings::from_file(&root.join("daybook.toml")).is_err());

    Ok(())
}
