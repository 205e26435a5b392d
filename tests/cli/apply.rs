use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, GUIDE, stderr, stdout};

/// Extract `doc.mdx` and write a payload with every text passed through `translate`.
fn write_translated_payload(test: &CliTest, translate: impl Fn(&str) -> String) -> Result<()> {
    let output = test.extract_command().arg("doc.mdx").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let mut payload: Value = serde_json::from_str(&stdout(&output))?;
    for entry in payload["strings"].as_array_mut().unwrap() {
        let text = entry["text"].as_str().unwrap().to_string();
        entry["text"] = Value::String(translate(&text));
    }
    test.write_file("doc.fr.json", &serde_json::to_string_pretty(&payload)?)?;
    Ok(())
}

#[test]
fn test_apply_translated_payload() -> Result<()> {
    let test = CliTest::with_file("doc.mdx", GUIDE)?;
    write_translated_payload(&test, |text| match text {
        "Guide" => "Guía".to_string(),
        "Hello" => "Hola".to_string(),
        "World text" => "Texto del mundo".to_string(),
        other => other.to_string(),
    })?;

    let output = test.apply_command().args(["doc.mdx", "doc.fr.json"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "---\ntitle: Guía\n---\n\n# Hola\n\nTexto del mundo\n"
    );

    Ok(())
}

#[test]
fn test_apply_untranslated_payload_is_identity() -> Result<()> {
    let test = CliTest::with_file("doc.mdx", GUIDE)?;
    write_translated_payload(&test, str::to_string)?;

    let output = test.apply_command().args(["doc.mdx", "doc.fr.json"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), GUIDE);

    Ok(())
}

#[test]
fn test_apply_emphasize_to_output_file() -> Result<()> {
    let test = CliTest::with_file("doc.mdx", GUIDE)?;
    write_translated_payload(&test, str::to_string)?;

    let output = test
        .apply_command()
        .args(["doc.mdx", "doc.fr.json", "--emphasize", "-o", "doc.review.mdx"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Applied 3 change(s)"));
    assert_eq!(
        test.read_file("doc.review.mdx")?,
        "---\ntitle: «GUIDE»\n---\n\n# «HELLO»\n\n«WORLD TEXT»\n"
    );

    Ok(())
}

#[test]
fn test_apply_rejects_negative_offsets() -> Result<()> {
    let test = CliTest::with_file("doc.mdx", GUIDE)?;
    test.write_file(
        "bad.json",
        r#"{
            "translate_paths": [],
            "strings": [{"key": "k", "kind": "title", "text": "x", "span": {"start": -1, "end": 4}}]
        }"#,
    )?;

    let output = test
        .apply_command()
        .args(["doc.mdx", "bad.json", "-o", "out.mdx"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid range (-1, 4)"));
    assert!(!test.root().join("out.mdx").exists());

    Ok(())
}

#[test]
fn test_apply_rejects_out_of_bounds_range() -> Result<()> {
    let test = CliTest::with_file("doc.mdx", "short")?;
    test.write_file(
        "bad.json",
        r#"{
            "translate_paths": [],
            "strings": [{"key": "0-99", "kind": "content_block", "text": "x", "span": {"start": 0, "end": 99}}]
        }"#,
    )?;

    let output = test.apply_command().args(["doc.mdx", "bad.json"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid range (0, 99)"));
    assert!(stdout(&output).is_empty());

    Ok(())
}

#[test]
fn test_apply_missing_payload() -> Result<()> {
    let test = CliTest::with_file("doc.mdx", GUIDE)?;

    let output = test.apply_command().args(["doc.mdx", "nope.json"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read payload"));

    Ok(())
}
