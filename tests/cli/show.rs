use anyhow::Result;
use insta::assert_snapshot;
use serde_json::Value;

use crate::{CliTest, MESSAGES_DE, MESSAGES_FR_20, run};

#[test]
fn test_show_table() -> Result<()> {
    let test = CliTest::with_file("messages.de.xlf", MESSAGES_DE)?;

    let (code, stdout, _) = run(test.command().args(["show", "messages.de.xlf"]))?;

    assert_eq!(code, 0);
    assert_snapshot!(stdout, @r#"
    messages.de.xlf (XLIFF 1.2, en -> de)
      greeting  translated Hello {{ name }}! -> Hallo {{ name }}!
      farewell  initial    Goodbye
    2 of 2 unit(s)
    "#);

    Ok(())
}

#[test]
fn test_show_untranslated_only() -> Result<()> {
    let test = CliTest::with_file("messages.de.xlf", MESSAGES_DE)?;

    let (code, stdout, _) =
        run(test.command().args(["show", "messages.de.xlf", "--untranslated"]))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("farewell"));
    assert!(!stdout.contains("greeting"));
    assert!(stdout.contains("1 of 2 unit(s)"));

    Ok(())
}

#[test]
fn test_show_json() -> Result<()> {
    let test = CliTest::with_file("messages.fr.xlf", MESSAGES_FR_20)?;

    let (code, stdout, _) = run(test.command().args(["show", "messages.fr.xlf", "--json"]))?;

    assert_eq!(code, 0);
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["version"], "XLIFF 2.0");
    assert_eq!(value["sourceLanguage"], "en");
    assert_eq!(value["targetLanguage"], "fr");
    assert_eq!(value["units"][0]["id"], "title");
    assert_eq!(value["units"][0]["target"], "Bienvenue");
    assert_eq!(value["units"][0]["fragments"][0]["state"], "final");
    assert_eq!(value["units"][0]["unsupported"], false);

    Ok(())
}

#[test]
fn test_show_json_placeholders_are_fragments() -> Result<()> {
    let test = CliTest::with_file("messages.de.xlf", MESSAGES_DE)?;

    let (_, stdout, _) = run(test.command().args(["show", "messages.de.xlf", "--json"]))?;

    let value: Value = serde_json::from_str(&stdout)?;
    let fragments = value["units"][0]["fragments"]
        .as_array()
        .expect("fragments should be an array");
    let sources: Vec<&str> = fragments
        .iter()
        .map(|f| f["source"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(sources, vec!["Hello ", "{{ name }}", "!"]);
    assert_eq!(value["units"][0]["description"], "Shown on the start page");

    Ok(())
}

#[test]
fn test_show_rejects_non_xliff() -> Result<()> {
    let test = CliTest::with_file("icon.xlf", r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#)?;

    let (code, stdout, stderr) = run(test.command().args(["show", "icon.xlf"]))?;

    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("icon.xlf"));
    assert!(stderr.contains("not an XLIFF 1.2 or 2.0 document"));

    Ok(())
}
