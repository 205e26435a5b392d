use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, GUIDE, stderr, stdout};

fn keys_and_texts(payload: &Value) -> Vec<(String, String)> {
    payload["strings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            (
                s["key"].as_str().unwrap().to_string(),
                s["text"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn test_extract_single_file_prints_payload() -> Result<()> {
    let test = CliTest::with_file("docs/guide.mdx", GUIDE)?;

    let output = test.extract_command().arg("docs/guide.mdx").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let payload: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        keys_and_texts(&payload),
        vec![
            ("11-16".to_string(), "Guide".to_string()),
            ("24-29".to_string(), "Hello".to_string()),
            ("31-41".to_string(), "World text".to_string()),
        ]
    );
    assert_eq!(payload["strings"][0]["kind"], "title");
    assert_eq!(payload["strings"][0]["notes"], "frontmatter title");
    assert_eq!(payload["variants_enabled"], true);

    Ok(())
}

#[test]
fn test_extract_rewrites_locale_paths() -> Result<()> {
    let test = CliTest::with_file(
        "page.mdx",
        "import Intro from '/snippets/en/intro.mdx'\n\nSee [setup](/en/setup).\n",
    )?;

    let output = test.extract_command().arg("page.mdx").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let payload: Value = serde_json::from_str(&stdout(&output))?;
    let texts: Vec<String> = keys_and_texts(&payload).into_iter().map(|(_, t)| t).collect();
    assert_eq!(
        texts,
        vec![
            "/snippets/%%locale%%/intro.mdx".to_string(),
            "See [setup](/%%locale%%/setup).".to_string(),
        ]
    );

    Ok(())
}

#[test]
fn test_extract_directive_with_crlf() -> Result<()> {
    let test = CliTest::with_file(
        "note.md",
        "---\r\ntitle: Notes\r\n---\r\n\r\n:::note[Heads up]\r\nBe careful.\r\n:::\r\n",
    )?;

    let output = test.extract_command().arg("note.md").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let payload: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        keys_and_texts(&payload),
        vec![
            ("12-17".to_string(), "Notes".to_string()),
            ("34-42".to_string(), "Heads up".to_string()),
            ("45-56".to_string(), "Be careful.".to_string()),
        ]
    );
    assert_eq!(payload["strings"][1]["kind"], "directive_label");

    Ok(())
}

#[test]
fn test_extract_default_locale_override() -> Result<()> {
    let test = CliTest::with_file("page.mdx", "See [setup](/de/setup).\n")?;

    let output = test
        .extract_command()
        .args(["page.mdx", "--default-locale", "de"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let payload: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(payload["strings"][0]["text"], "See [setup](/%%locale%%/setup).");

    Ok(())
}

#[test]
fn test_extract_scans_source_root_into_output_dir() -> Result<()> {
    let test = CliTest::with_file("docs/guide.mdx", GUIDE)?;
    test.write_file("docs/nested/faq.md", "# FAQ\n")?;
    test.write_file("node_modules/pkg/README.md", "# Vendored\n")?;
    test.write_file("docs/notes.txt", "not a document")?;

    let output = test.extract_command().args(["-o", "payloads"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(test.root().join("payloads/docs/guide.mdx.json").exists());
    assert!(test.root().join("payloads/docs/nested/faq.md.json").exists());
    assert!(!test.root().join("payloads/node_modules").exists());
    assert!(!test.root().join("payloads/docs/notes.txt.json").exists());

    let faq: Value = serde_json::from_str(&test.read_file("payloads/docs/nested/faq.md.json")?)?;
    assert_eq!(
        keys_and_texts(&faq),
        vec![("2-5".to_string(), "FAQ".to_string())]
    );
    assert!(stderr(&output).contains("Extracted 4 strings from 2 documents"));

    Ok(())
}

#[test]
fn test_extract_respects_config_includes() -> Result<()> {
    let test = CliTest::with_file(".mdlocrc.json", r#"{ "includes": ["docs"] }"#)?;
    test.write_file("docs/a.mdx", "# A\n")?;
    test.write_file("blog/b.mdx", "# B\n")?;

    let output = test.extract_command().args(["-o", "out"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(test.root().join("out/docs/a.mdx.json").exists());
    assert!(!test.root().join("out/blog").exists());

    Ok(())
}

#[test]
fn test_extract_failed_document_is_reported() -> Result<()> {
    let test = CliTest::with_file("good.mdx", "# Good\n")?;
    test.write_file("bad.mdx", "<Accordion title=\"x\">\n\nno closing tag\n")?;

    let output = test.extract_command().args(["-o", "out"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(test.root().join("out/good.mdx.json").exists());
    assert!(!test.root().join("out/bad.mdx.json").exists());
    let err = stderr(&output);
    assert!(err.contains("bad.mdx"), "stderr: {}", err);
    assert!(err.contains("failed to parse document"), "stderr: {}", err);
    assert!(err.contains("1 document failed"), "stderr: {}", err);

    Ok(())
}

#[test]
fn test_extract_missing_file_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command().arg("missing.mdx").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to read file"));

    Ok(())
}

#[test]
fn test_extract_many_documents_requires_output_dir() -> Result<()> {
    let test = CliTest::with_file("a.mdx", "# A\n")?;
    test.write_file("b.mdx", "# B\n")?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--output-dir is required"));
    assert!(stdout(&output).is_empty());

    Ok(())
}

#[test]
fn test_extract_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".mdlocrc.json", r#"{ "placeholder": "%bad%" }"#)?;
    test.write_file("a.mdx", "# A\n")?;

    let output = test.extract_command().arg("a.mdx").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("placeholder"));

    Ok(())
}
