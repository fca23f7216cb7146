//! MCP handler tests

#[cfg(test)]
mod tests {
    use crate::common::{stub_services, SlowStub};
    use grok_search::mcp::handlers::ProtocolHandlers;
    use grok_search::mcp::protocol::*;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn create_test_handlers(stub: SlowStub) -> (ProtocolHandlers, Arc<SlowStub>) {
        let stub = Arc::new(stub);
        (ProtocolHandlers::new(stub_services(Arc::clone(&stub))), stub)
    }

    fn request(id: i64, method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(id)),
            method: method.to_string(),
            params,
        }
    }

    fn call(id: i64, tool: &str, arguments: Value) -> JsonRpcRequest {
        request(
            id,
            "tools/call",
            Some(json!({"name": tool, "arguments": arguments})),
        )
    }

    fn result_text(response: &JsonRpcResponse) -> String {
        response.result.as_ref().unwrap()["content"][0]["text"]
            .as_str()
            .unwrap()
            .to_string()
    }

    fn is_error(response: &JsonRpcResponse) -> bool {
        response.result.as_ref().unwrap()["isError"] == json!(true)
    }

    #[tokio::test]
    async fn test_initialize_handler() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(0));

        let response = handlers
            .handle_initialize(request(
                1,
                "initialize",
                Some(json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {"name": "test", "version": "1.0"}
                })),
            ))
            .await
            .unwrap();

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "grok-search-mcp");
        assert_eq!(result["serverInfo"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_initialize_without_params() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(0));

        let response = handlers
            .handle_initialize(request(1, "initialize", None))
            .await
            .unwrap();

        assert_eq!(response.result.unwrap()["protocolVersion"], "2024-11-05");
    }

    #[tokio::test]
    async fn test_initialized_handler() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(0));
        assert!(!handlers.is_initialized());

        let response = handlers
            .handle_initialized(JsonRpcRequest {
                jsonrpc: "2.0".to_string(),
                id: None,
                method: "notifications/initialized".to_string(),
                params: None,
            })
            .await
            .unwrap();

        assert!(response.is_empty());
        assert!(handlers.is_initialized());
    }

    #[tokio::test]
    async fn test_tools_list_has_tools() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(0));

        let response = handlers
            .handle_tools_list(request(2, "tools/list", None))
            .await
            .unwrap();

        let result = response.result.unwrap();
        let names: Vec<&str> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();

        assert_eq!(
            names,
            vec!["get_config_info", "get_server_info", "web_fetch", "web_search"]
        );
    }

    #[tokio::test]
    async fn test_web_search_schema_advertises_limits() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(0));

        let response = handlers
            .handle_tools_list(request(2, "tools/list", None))
            .await
            .unwrap();
        let result = response.result.unwrap();
        let web_search = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["name"] == "web_search")
            .unwrap()
            .clone();

        let props = &web_search["inputSchema"]["properties"];
        assert_eq!(web_search["inputSchema"]["required"], json!(["query"]));
        assert_eq!(props["max_results"]["default"], 5);
        assert_eq!(props["max_results"]["maximum"], 20);
        assert_eq!(props["platform"]["type"], "string");
    }

    #[tokio::test]
    async fn test_web_search_call_returns_numbered_blocks() {
        let (handlers, stub) = create_test_handlers(SlowStub::returning(10));

        let response = handlers
            .handle_tools_call(call(
                3,
                "web_search",
                json!({"query": "rust ownership model", "max_results": 3}),
            ))
            .await
            .unwrap();

        assert!(!is_error(&response));
        let text = result_text(&response);
        assert!(text.starts_with("## Result 1: rust ownership model result 1"));
        assert!(text.contains("## Result 2:"));
        assert!(text.contains("## Result 3:"));
        assert!(!text.contains("## Result 4:"));
        assert_eq!(text.matches("\n\n---\n\n").count(), 2);
        assert!(text.contains("**Source:** example.com"));
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_web_search_call_with_platform() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(2));

        let response = handlers
            .handle_tools_call(call(
                3,
                "web_search",
                json!({"query": "rust async", "platform": "Reddit"}),
            ))
            .await
            .unwrap();

        assert!(!is_error(&response));
        let text = result_text(&response);
        assert_eq!(text.matches("**Source:** Reddit").count(), 2);
        assert!(!text.contains("**Source:** example.com"));
    }

    #[tokio::test]
    async fn test_web_search_no_results() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(0));

        let response = handlers
            .handle_tools_call(call(3, "web_search", json!({"query": "zxqv"})))
            .await
            .unwrap();

        assert!(!is_error(&response));
        assert_eq!(result_text(&response), "No results found.");
    }

    #[tokio::test]
    async fn test_web_search_empty_query_is_tool_error() {
        let (handlers, stub) = create_test_handlers(SlowStub::returning(3));

        let response = handlers
            .handle_tools_call(call(4, "web_search", json!({"query": "  "})))
            .await
            .unwrap();

        assert!(response.error.is_none());
        assert!(is_error(&response));
        assert!(result_text(&response).contains("Query cannot be empty"));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_web_search_out_of_range_is_tool_error() {
        let (handlers, stub) = create_test_handlers(SlowStub::returning(3));

        for max_results in [json!(0), json!(21)] {
            let response = handlers
                .handle_tools_call(call(
                    5,
                    "web_search",
                    json!({"query": "rust", "max_results": max_results}),
                ))
                .await
                .unwrap();
            assert!(is_error(&response));
        }

        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_web_search_provider_failure_is_tool_error() {
        let (handlers, _) = create_test_handlers(SlowStub::failing("HTTP 503: overloaded"));

        let response = handlers
            .handle_tools_call(call(6, "web_search", json!({"query": "rust"})))
            .await
            .unwrap();

        assert!(is_error(&response));
        assert_eq!(
            result_text(&response),
            "Search failed: HTTP 503: overloaded"
        );
    }

    #[tokio::test]
    async fn test_web_fetch_call() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(0));

        let response = handlers
            .handle_tools_call(call(
                7,
                "web_fetch",
                json!({"url": "https://example.com/post"}),
            ))
            .await
            .unwrap();

        assert!(!is_error(&response));
        assert!(result_text(&response).contains("source: https://example.com/post"));
    }

    #[tokio::test]
    async fn test_get_config_info_call_masks_key() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(0));

        let response = handlers
            .handle_tools_call(call(8, "get_config_info", Value::Null))
            .await
            .unwrap();

        let text = result_text(&response);
        assert!(text.contains("xai-****3456"));
        assert!(!text.contains("xai-test-key-123456"));
    }

    #[tokio::test]
    async fn test_get_server_info_lists_registered_tools() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(0));

        let response = handlers
            .handle_tools_call(call(9, "get_server_info", json!({})))
            .await
            .unwrap();

        let text = result_text(&response);
        assert!(text.contains("- web_search: Search the live web"));
        assert!(text.contains("- web_fetch:"));
        assert!(text.contains("- get_config_info:"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_protocol_error() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(0));

        let response = handlers
            .handle_tools_call(call(10, "switch_model", json!({"model": "grok-3"})))
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert!(error.message.contains("switch_model"));
    }

    #[tokio::test]
    async fn test_tools_call_missing_params() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(0));

        let response = handlers
            .handle_tools_call(request(11, "tools/call", None))
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert_eq!(error.message, "Missing params");
    }

    #[tokio::test]
    async fn test_ping() {
        let (handlers, _) = create_test_handlers(SlowStub::returning(0));

        let response = handlers.handle_ping(request(12, "ping", None)).await.unwrap();

        assert_eq!(response.id, Some(json!(12)));
        assert_eq!(response.result, Some(json!({})));
    }
}
