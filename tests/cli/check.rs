use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, MESSAGES_DE, MESSAGES_FR_20, run};

#[test]
fn test_untranslated_unit() -> Result<()> {
    let test = CliTest::with_file("messages.de.xlf", MESSAGES_DE)?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 0, "warnings alone do not fail the check");
    assert_snapshot!(stdout, @r#"
    warning: "farewell"  untranslated
      --> ./messages.de.xlf (unit #2)
       = note: ("Goodbye")

    ✘ 1 problems (0 errors, 1 warning)
    "#);

    Ok(())
}

#[test]
fn test_clean_files() -> Result<()> {
    let test = CliTest::with_file("src/locale/messages.fr.xlf", MESSAGES_FR_20)?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "✓ Checked 1 XLIFF file - no issues found\n");

    Ok(())
}

#[test]
fn test_parse_error_and_duplicate_fail() -> Result<()> {
    let test = CliTest::with_file("broken.xlf", "<xliff version=\"1.2\"><file>")?;
    test.write_file(
        "dupes.xliff",
        r#"<xliff version="2.0" srcLang="en" trgLang="de"><file id="f">
<unit id="a"><segment state="final"><source>A</source><target>A</target></segment></unit>
<unit id="a"><segment state="final"><source>B</source><target>B</target></segment></unit>
</file></xliff>"#,
    )?;

    let (code, stdout, stderr) = run(&mut test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("parse-error"));
    assert!(stdout.contains("--> ./broken.xlf"));
    assert!(stdout.contains("error: \"a\"  duplicate-id"));
    assert!(stdout.contains("--> ./dupes.xliff (unit #2)"));
    assert!(stdout.contains("2 problems (2 errors, 0 warnings)"));
    assert!(stderr.contains("1 file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_missing_target_language_and_unsupported() -> Result<()> {
    let test = CliTest::with_file(
        "messages.xlf",
        r#"<xliff version="1.2"><file source-language="en"><body>
<trans-unit id="bold"><source>Be <g id="1">bold</g></source><target state="final">Sei <g id="1">mutig</g></target></trans-unit>
</body></file></xliff>"#,
    )?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("warning: \"no target language\"  missing-target-language"));
    assert!(stdout.contains("= note: source language is en"));
    assert!(stdout.contains("warning: \"bold\"  unsupported"));
    assert!(!stdout.contains("untranslated"));

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".xlifferrc.json", r#"{ "ignores": ["**/dist/**"] }"#)?;
    test.write_file("dist/messages.xlf", "not xml at all")?;
    test.write_file("src/messages.fr.xlf", MESSAGES_FR_20)?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Checked 1 XLIFF file - no issues found"));

    Ok(())
}

#[test]
fn test_config_extensions() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".xlifferrc.json", r#"{ "extensions": ["xlf"] }"#)?;
    test.write_file("messages.xliff", "not xml at all")?;
    test.write_file("messages.fr.xlf", MESSAGES_FR_20)?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Checked 1 XLIFF file"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".xlifferrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let (code, _, stderr) = run(&mut test.check_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("ignores"));

    Ok(())
}

#[test]
fn test_check_single_file() -> Result<()> {
    let test = CliTest::with_file("messages.de.xlf", MESSAGES_DE)?;
    test.write_file("other.xlf", "broken")?;

    let (code, stdout, _) = run(test.check_command().arg("messages.de.xlf"))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("--> messages.de.xlf (unit #2)"));
    assert!(!stdout.contains("other.xlf"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(test.command().arg("--help"))?;

    assert_eq!(code, 0);
    for command in ["check", "show", "translate", "state", "lang", "align", "init", "serve"] {
        assert!(stdout.contains(command), "help should list {command}");
    }

    Ok(())
}
