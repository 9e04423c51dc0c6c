use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

const SOURCE: &str = r#"
greeting = _i("hello")
again = _i("hello")
target = _i("world")
"#;

fn parse(content: &str) -> Result<Value> {
    Ok(serde_json::from_str(content)?)
}

#[test]
fn test_sync_merges_and_warns_about_stale_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app.py", SOURCE)?;
    test.write_file("lang/fr.json", r#"{"hello": "bonjour", "stale": "x"}"#)?;

    let output = test.run(&["app.py"])?;

    assert!(output.status.success());
    assert_snapshot!(stdout(&output), @r#"
    {
      "fr": {
        "hello": "bonjour",
        "world": "=============="
      }
    }
    "#);
    assert_eq!(
        stderr(&output),
        format!(
            "At {}:\nWARN: Message stale is no longer used!\n",
            test.path("lang/fr.json").display()
        )
    );
    assert_eq!(
        test.read_file("lang/fr.json")?,
        "{\n  \"hello\": \"bonjour\",\n  \"world\": \"==============\"\n}\n"
    );
    Ok(())
}

#[test]
fn test_sync_reads_stdin_with_continuations() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("lang/de.json", "{}")?;

    let output = test.run_with_stdin(&[], "label = _i(\"foo\\\nbar\")\n")?;

    assert!(output.status.success());
    assert_eq!(parse(&stdout(&output))?, json!({ "de": { "foobar": "==============" } }));
    assert_eq!(stderr(&output), "");
    Ok(())
}

#[test]
fn test_sync_dash_reads_stdin_between_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("a.py", "_i('from a')\n")?;
    test.write_file("b.py", "_i('from b')\n")?;
    test.write_file("lang/en.json", r#"{"from a": "A"}"#)?;

    let output = test.run_with_stdin(&["a.py", "-", "b.py"], "_i('from stdin')\n")?;

    assert!(output.status.success());
    assert_eq!(
        parse(&stdout(&output))?,
        json!({
            "en": {
                "from a": "A",
                "from b": "==============",
                "from stdin": "=============="
            }
        })
    );
    Ok(())
}

#[test]
fn test_sync_updates_every_catalog() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app.py", SOURCE)?;
    test.write_file("lang/fr.json", r#"{"hello": "bonjour"}"#)?;
    test.write_file("lang/ja.json", r#"{"world": "sekai"}"#)?;
    test.write_file("lang/README.md", "not a catalog")?;

    let output = test.run(&["app.py"])?;

    assert!(output.status.success());
    assert_eq!(
        parse(&stdout(&output))?,
        json!({
            "fr": { "hello": "bonjour", "world": "==============" },
            "ja": { "hello": "==============", "world": "sekai" }
        })
    );
    assert_eq!(
        parse(&test.read_file("lang/ja.json")?)?,
        json!({ "hello": "==============", "world": "sekai" })
    );
    assert_eq!(test.read_file("lang/README.md")?, "not a catalog");
    Ok(())
}

#[test]
fn test_sync_without_lang_dir_prints_empty_report() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app.py", SOURCE)?;

    let output = test.run(&["app.py"])?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "{}\n");
    assert_eq!(stderr(&output), "");
    Ok(())
}

#[test]
fn test_sync_malformed_catalog_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app.py", SOURCE)?;
    test.write_file("lang/de.json", r#"{"old": "alt"}"#)?;
    test.write_file("lang/fr.json", "{ this is not json")?;

    let output = test.run(&["app.py"])?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "");
    let err = stderr(&output);
    assert!(err.contains("WARN: Message old is no longer used!"));
    assert!(err.contains(&format!(
        "Error: Failed to parse catalog {}",
        test.path("lang/fr.json").display()
    )));
    // de.json sorts first and was already synced
    assert_eq!(
        parse(&test.read_file("lang/de.json")?)?,
        json!({ "hello": "==============", "world": "==============" })
    );
    assert_eq!(test.read_file("lang/fr.json")?, "{ this is not json");
    Ok(())
}

#[test]
fn test_sync_non_string_value_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app.py", SOURCE)?;
    test.write_file("lang/fr.json", r#"{"hello": {"nested": "value"}}"#)?;

    let output = test.run(&["app.py"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to parse catalog"));
    Ok(())
}

#[test]
fn test_missing_source_file_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["missing.py"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Failed to read source file: missing.py"));
    Ok(())
}

#[test]
fn test_dry_run_keeps_catalogs() -> Result<()> {
    let test = CliTest::new()?;
    let original = r#"{"hello": "bonjour", "stale": "x"}"#;
    test.write_file("app.py", SOURCE)?;
    test.write_file("lang/fr.json", original)?;

    let output = test.run(&["app.py", "--dry-run"])?;

    assert!(output.status.success());
    assert_eq!(
        parse(&stdout(&output))?,
        json!({ "fr": { "hello": "bonjour", "world": "==============" } })
    );
    assert!(stderr(&output).contains("WARN: Message stale is no longer used!"));
    assert_eq!(test.read_file("lang/fr.json")?, original);
    Ok(())
}

#[test]
fn test_template_prints_extraction_only() -> Result<()> {
    let test = CliTest::new()?;
    let original = r#"{"stale": "x"}"#;
    test.write_file("app.py", SOURCE)?;
    test.write_file("lang/fr.json", original)?;

    let output = test.run(&["app.py", "--template", "<lang_name>"])?;

    assert!(output.status.success());
    assert_snapshot!(stdout(&output), @r#"
    {
      "<lang_name>": {
        "hello": "==============",
        "world": "=============="
      }
    }
    "#);
    assert_eq!(stderr(&output), "");
    assert_eq!(test.read_file("lang/fr.json")?, original);
    Ok(())
}

#[test]
fn test_loose_mode_flag() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app.py", "print(\"Plain string\")\n_i(\"marked\")\n")?;
    test.write_file("lang/fr.json", "{}")?;

    let output = test.run(&["app.py", "--mode", "loose"])?;

    assert!(output.status.success());
    assert_eq!(
        parse(&stdout(&output))?,
        json!({ "fr": { "Plain string": "==============", "marked": "==============" } })
    );
    Ok(())
}

#[test]
fn test_marker_placeholder_and_lang_dir_flags() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("view.js", "t(\"Open\")\n_i(\"ignored\")\n")?;
    test.write_file("i18n/es.json", r#"{"Open": "Abrir"}"#)?;
    test.write_file("i18n/it.json", "{}")?;

    let output = test.run(&[
        "view.js",
        "--marker",
        "t",
        "--placeholder",
        "TODO",
        "--lang-dir",
        "i18n",
    ])?;

    assert!(output.status.success());
    assert_eq!(
        parse(&stdout(&output))?,
        json!({ "es": { "Open": "Abrir" }, "it": { "Open": "TODO" } })
    );
    Ok(())
}

#[test]
fn test_verbose_reports_progress() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app.py", SOURCE)?;
    test.write_file("lang/fr.json", r#"{"hello": "bonjour"}"#)?;

    let output = test.run(&["app.py", "--verbose"])?;

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Extracted 2 keys from 1 input (strict mode)"));
    assert!(err.contains(&format!(
        "Updated {} (fr, 2 keys)",
        test.path("lang/fr.json").display()
    )));
    Ok(())
}

#[test]
fn test_inputs_are_concatenated_as_one_stream() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("head.py", "label = _i(\"foo")?;
    test.write_file("tail.py", "bar\")\n")?;
    test.write_file("lang/fr.json", "{}")?;

    let output = test.run(&["head.py", "tail.py"])?;

    assert!(output.status.success());
    assert_eq!(parse(&stdout(&output))?, json!({ "fr": { "foobar": "==============" } }));
    Ok(())
}

#[test]
fn test_trailing_backslash_without_newline_keeps_last_line() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("lang/fr.json", "{}")?;

    let output = test.run_with_stdin(&[], "_i(\"kept\") \\")?;

    assert!(output.status.success());
    assert_eq!(parse(&stdout(&output))?, json!({ "fr": { "kept": "==============" } }));
    Ok(())
}

#[test]
fn test_lang_dir_from_environment() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app.py", "_i(\"hello\")\n")?;
    test.write_file("lang/fr.json", r#"{"ignored": "x"}"#)?;
    test.write_file("translations/nl.json", r#"{"hello": "hallo", "old": "oud"}"#)?;

    let output = test
        .command()
        .env("STRSYNC_LANG_DIR", "translations")
        .arg("app.py")
        .output()?;

    assert!(output.status.success());
    assert_eq!(parse(&stdout(&output))?, json!({ "nl": { "hello": "hallo" } }));
    assert_eq!(
        stderr(&output),
        format!(
            "At {}:\nWARN: Message old is no longer used!\n",
            test.path("translations/nl.json").display()
        )
    );
    assert_eq!(test.read_file("lang/fr.json")?, r#"{"ignored": "x"}"#);
    Ok(())
}
