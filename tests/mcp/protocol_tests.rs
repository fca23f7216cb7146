//! MCP protocol unit tests

#[cfg(test)]
mod tests {
    use grok_search::mcp::protocol::*;
    use serde_json::json;

    #[test]
    fn test_parse_initialize_request() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {"tools": {}},
                "clientInfo": {
                    "name": "test",
                    "version": "1.0"
                }
            }
        }"#;

        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.method, "initialize");
        assert_eq!(req.jsonrpc, "2.0");
        assert!(!req.is_notification());

        let params: InitializeParams = serde_json::from_value(req.params.unwrap()).unwrap();
        assert_eq!(params.protocol_version.as_deref(), Some("2024-11-05"));
        assert_eq!(params.client_info.unwrap().name, "test");
    }

    #[test]
    fn test_parse_string_id() {
        let req: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc": "2.0", "id": "abc-1", "method": "ping"}"#)
                .unwrap();
        assert_eq!(req.id, Some(json!("abc-1")));
        assert!(req.params.is_none());
    }

    #[test]
    fn test_parse_tool_call_params() {
        let params: ToolCallParams = serde_json::from_value(json!({
            "name": "web_search",
            "arguments": {"query": "rust ownership model", "max_results": 3}
        }))
        .unwrap();

        assert_eq!(params.name, "web_search");
        assert_eq!(params.arguments["max_results"], 3);
    }

    #[test]
    fn test_tool_call_params_without_arguments() {
        let params: ToolCallParams =
            serde_json::from_value(json!({"name": "get_server_info"})).unwrap();
        assert!(params.arguments.is_null());
    }

    #[test]
    fn test_serialize_initialize_result() {
        let response = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "grok-search-mcp".to_string(),
                version: "0.3.0".to_string(),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["protocolVersion"], "2024-11-05");
        assert_eq!(json["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(json["serverInfo"]["name"], "grok-search-mcp");
    }

    #[test]
    fn test_serialize_tool_schema() {
        let schema = ToolSchema {
            name: "web_search".to_string(),
            description: "Search".to_string(),
            input_schema: json!({"type": "object"}),
        };

        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["inputSchema"]["type"], "object");
        assert!(json.get("input_schema").is_none());
    }

    #[test]
    fn test_success_response_omits_error() {
        let response = JsonRpcResponse::success(Some(json!(3)), json!({"ok": true}));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], 3);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PARSE_ERROR, -32700);
        assert_eq!(METHOD_NOT_FOUND, -32601);
        assert_eq!(INVALID_PARAMS, -32602);
        assert_eq!(SEARCH_FAILED, -32001);
        assert_eq!(FETCH_FAILED, -32002);
        assert_eq!(CONFIG_ERROR, -32003);
    }
}
