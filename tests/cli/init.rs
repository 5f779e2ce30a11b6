use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, MESSAGES_FR_20, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    // 1. Parse as JSON
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    // 2. Verify expected fields and defaults
    assert_eq!(parsed["ignores"], Value::Array(Vec::new()));
    assert_eq!(parsed["alignStatePolicy"], "final");
    assert_eq!(parsed["alignedFilename"], "updated.xliff");
    assert_eq!(parsed["extensions"], serde_json::json!(["xlf", "xliff"]));

    // 3. Verify formatting (2-space indentation)
    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(test.command().arg("init"))?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "✓ Created .xlifferrc.json\n");
    assert!(test.root().join(".xlifferrc.json").exists());

    let content = test.read_file(".xlifferrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".xlifferrc.json", "{}")?;

    let (code, stdout, stderr) = run(test.command().arg("init"))?;

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains(".xlifferrc.json already exists"));
    assert_eq!(test.read_file(".xlifferrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    // Initialize config
    test.command().arg("init").output()?;

    test.write_file("locale/messages.fr.xlf", MESSAGES_FR_20)?;

    // Verify check command works with initialized config
    let output = test.check_command().output()?;
    assert!(
        output.status.success(),
        "Check command should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(())
}
