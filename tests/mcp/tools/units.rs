//! Tests for the list_units tool

use rmcp::handler::server::wrapper::Parameters;
use xliffer::mcp::{XlifferMcpServer, types::ListUnitsParams};

use crate::{MESSAGES_DE, McpTestFixture, assert_pagination, extract_tool_result_json};

fn list_params(file_path: String) -> ListUnitsParams {
    ListUnitsParams {
        file_path,
        untranslated_only: None,
        offset: None,
        limit: None,
    }
}

#[tokio::test]
async fn test_list_units() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(list_params(fixture.path("messages.de.xlf")));
    let result = server.list_units(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["version"], "XLIFF 1.2");
    assert_eq!(json_result["sourceLanguage"], "en");
    assert_eq!(json_result["targetLanguage"], "de");
    assert_eq!(json_result["totalCount"], 3);
    assert_pagination(&json_result, 0, 50, false);

    let units = json_result["units"].as_array().unwrap();
    let ids: Vec<&str> = units.iter().map(|u| u["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["greeting", "farewell", "bold"]);

    let greeting = &units[0];
    assert_eq!(greeting["state"], "final");
    assert_eq!(greeting["fragments"].as_array().unwrap().len(), 3);
    assert_eq!(greeting["fragments"][1]["source"], "{{ name }}");
    assert_eq!(greeting["fragments"][0]["target"], "Hallo ");
    assert_eq!(greeting["unsupported"], false);

    assert_eq!(units[1]["state"], "initial");
    assert_eq!(units[2]["unsupported"], true);
}

#[tokio::test]
async fn test_list_units_untranslated_only() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(ListUnitsParams {
        untranslated_only: Some(true),
        ..list_params(fixture.path("messages.de.xlf"))
    });
    let result = server.list_units(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 2);
    let units = json_result["units"].as_array().unwrap();
    assert_eq!(units[0]["id"], "farewell");
    assert_eq!(units[1]["id"], "bold");
}

#[tokio::test]
async fn test_list_units_pagination() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(ListUnitsParams {
        offset: Some(1),
        limit: Some(1),
        ..list_params(fixture.path("messages.de.xlf"))
    });
    let result = server.list_units(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 3);
    assert_eq!(json_result["units"].as_array().unwrap().len(), 1);
    assert_eq!(json_result["units"][0]["id"], "farewell");
    assert_pagination(&json_result, 1, 1, true);

    // Last page
    let params = Parameters(ListUnitsParams {
        offset: Some(2),
        limit: Some(1),
        ..list_params(fixture.path("messages.de.xlf"))
    });
    let result = server.list_units(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_pagination(&json_result, 2, 1, false);
}

#[tokio::test]
async fn test_list_units_limit_is_clamped() {
    let fixture = McpTestFixture::with_files(vec![("messages.de.xlf", MESSAGES_DE)]).unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(ListUnitsParams {
        limit: Some(10_000),
        ..list_params(fixture.path("messages.de.xlf"))
    });
    let result = server.list_units(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_pagination(&json_result, 0, 200, false);
}

#[tokio::test]
async fn test_list_units_missing_file() {
    let fixture = McpTestFixture::new().unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(list_params(fixture.path("missing.xlf")));
    let result = server.list_units(params).await;

    let err = result.unwrap_err();
    assert!(err.message.contains("missing.xlf"));
}

#[tokio::test]
async fn test_list_units_rejects_non_xliff() {
    let fixture = McpTestFixture::with_files(vec![(
        "icon.xlf",
        r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#,
    )])
    .unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(list_params(fixture.path("icon.xlf")));
    let result = server.list_units(params).await;

    assert!(result.is_err());
}
