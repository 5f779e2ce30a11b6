//! Tests for the set_translation, set_state and set_target_language tools

use rmcp::handler::server::wrapper::Parameters;
use xliffer::mcp::{
    XlifferMcpServer,
    types::{SetStateParams, SetTargetLanguageParams, SetTranslationParams},
};

use crate::{MESSAGES_DE, McpTestFixture, extract_tool_result_json};

fn translation(file_path: String, unit_id: &str, text: &str) -> SetTranslationParams {
    SetTranslationParams {
        file_path,
        unit_id: unit_id.to_string(),
        fragment_index: None,
        text: text.to_string(),
        output_path: None,
    }
}

// ============================================================
// set_translation
// ============================================================

#[tokio::test]
async fn test_set_translation() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(translation(
        fixture.path("messages.de.xlf"),
        "farewell",
        "Auf Wiedersehen",
    ));
    let result = server.set_translation(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["writtenTo"], fixture.path("messages.de.xlf"));
    assert_eq!(json_result["unit"]["id"], "farewell");
    assert_eq!(json_result["unit"]["target"], "Auf Wiedersehen");
    assert_eq!(json_result["unit"]["state"], "translated");

    let content = fixture.read_file("messages.de.xlf").unwrap();
    assert!(content.contains(
        r#"<source>Goodbye</source><target state="translated">Auf Wiedersehen</target>"#
    ));
}

#[tokio::test]
async fn test_set_translation_fragment_keeps_placeholder() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(SetTranslationParams {
        fragment_index: Some(2),
        ..translation(fixture.path("messages.de.xlf"), "greeting", "?")
    });
    let result = server.set_translation(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["unit"]["fragments"][2]["target"], "?");
    assert_eq!(json_result["unit"]["fragments"][1]["target"], "{{ name }}");

    let content = fixture.read_file("messages.de.xlf").unwrap();
    assert!(content.contains(
        r#"<target state="translated">Hallo <x id="INTERPOLATION" equiv-text="{{ name }}"/>?</target>"#
    ));
}

#[tokio::test]
async fn test_set_translation_to_output_path() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(SetTranslationParams {
        output_path: Some(fixture.path("messages.out.xlf")),
        ..translation(fixture.path("messages.de.xlf"), "farewell", "Tschüss")
    });
    let result = server.set_translation(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["writtenTo"], fixture.path("messages.out.xlf"));
    assert_eq!(fixture.read_file("messages.de.xlf").unwrap(), MESSAGES_DE);
    assert!(
        fixture
            .read_file("messages.out.xlf")
            .unwrap()
            .contains("Tschüss")
    );
}

#[tokio::test]
async fn test_set_translation_refuses_unsupported_unit() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(translation(
        fixture.path("messages.de.xlf"),
        "bold",
        "Sei mutig",
    ));
    let err = server.set_translation(params).await.unwrap_err();

    assert!(err.message.contains("inline markup"));
    assert_eq!(fixture.read_file("messages.de.xlf").unwrap(), MESSAGES_DE);
}

#[tokio::test]
async fn test_set_translation_fragment_out_of_range() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(SetTranslationParams {
        fragment_index: Some(5),
        ..translation(fixture.path("messages.de.xlf"), "farewell", "x")
    });
    let err = server.set_translation(params).await.unwrap_err();

    assert!(err.message.contains("no fragment #5"));
    assert_eq!(fixture.read_file("messages.de.xlf").unwrap(), MESSAGES_DE);
}

#[tokio::test]
async fn test_set_translation_unknown_unit() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(translation(fixture.path("messages.de.xlf"), "nope", "x"));
    let err = server.set_translation(params).await.unwrap_err();

    assert!(err.message.contains("no translation unit with id 'nope'"));
}

// ============================================================
// set_state
// ============================================================

#[tokio::test]
async fn test_set_state() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(SetStateParams {
        file_path: fixture.path("messages.de.xlf"),
        unit_id: "greeting".to_string(),
        state: "reviewed".to_string(),
        output_path: None,
    });
    let result = server.set_state(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["unit"]["state"], "reviewed");
    assert!(
        fixture
            .read_file("messages.de.xlf")
            .unwrap()
            .contains(r#"<target state="signed-off">Hallo"#)
    );
}

#[tokio::test]
async fn test_set_state_rejects_unknown_state() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(SetStateParams {
        file_path: fixture.path("messages.de.xlf"),
        unit_id: "greeting".to_string(),
        state: "signed-off".to_string(),
        output_path: None,
    });
    let err = server.set_state(params).await.unwrap_err();

    assert!(err.message.contains("unknown state 'signed-off'"));
    assert_eq!(fixture.read_file("messages.de.xlf").unwrap(), MESSAGES_DE);
}

// ============================================================
// set_target_language
// ============================================================

#[tokio::test]
async fn test_set_target_language() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(SetTargetLanguageParams {
        file_path: fixture.path("messages.de.xlf"),
        language: "de-CH".to_string(),
        output_path: None,
    });
    let result = server.set_target_language(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["targetLanguage"], "de-CH");
    assert_eq!(json_result["usualFormat"], true);
    assert!(
        fixture
            .read_file("messages.de.xlf")
            .unwrap()
            .contains(r#"target-language="de-CH""#)
    );
}

#[tokio::test]
async fn test_set_target_language_unusual_format() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(SetTargetLanguageParams {
        file_path: fixture.path("messages.de.xlf"),
        language: "German".to_string(),
        output_path: None,
    });
    let result = server.set_target_language(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    // Written anyway; the caller decides what to do with the hint.
    assert_eq!(json_result["targetLanguage"], "German");
    assert_eq!(json_result["usualFormat"], false);
}

#[tokio::test]
async fn test_set_target_language_rejects_empty() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(SetTargetLanguageParams {
        file_path: fixture.path("messages.de.xlf"),
        language: "  ".to_string(),
        output_path: None,
    });

    assert!(server.set_target_language(params).await.is_err());
    assert_eq!(fixture.read_file("messages.de.xlf").unwrap(), MESSAGES_DE);
}
