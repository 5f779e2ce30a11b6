//! Tests for the get_config tool

use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use xliffer::mcp::{XlifferMcpServer, types::GetConfigParams};

use crate::{McpTestFixture, extract_tool_result_json};

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });
    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    let config = &json_result["config"];
    assert_eq!(config["ignores"], json!([]));
    assert_eq!(config["alignStatePolicy"], "final");
    assert_eq!(config["alignedFilename"], "updated.xliff");
    assert_eq!(config["extensions"], json!(["xlf", "xliff"]));
}

#[tokio::test]
async fn test_get_config_from_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "ignores": ["**/dist/**"],
            "alignStatePolicy": "carry",
        }))
        .unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });
    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["ignores"], json!(["**/dist/**"]));
    assert_eq!(json_result["config"]["alignStatePolicy"], "carry");
    // Unset fields keep their defaults.
    assert_eq!(json_result["config"]["alignedFilename"], "updated.xliff");
}

#[tokio::test]
async fn test_get_config_found_from_subdirectory() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({ "extensions": ["xlf"] }))
        .unwrap();
    fixture.write_file("src/locale/.keep", "").unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.path("src/locale"),
    });
    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["extensions"], json!(["xlf"]));
}

#[tokio::test]
async fn test_get_config_invalid_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_file(".xlifferrc.json", r#"{ "ignores": ["[invalid"] }"#)
        .unwrap();
    let server = XlifferMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });
    let result = server.get_config(params).await;

    assert!(result.is_err());
}
