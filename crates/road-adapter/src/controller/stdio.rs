//! Standard I/O transport for MCP
//!
//! One JSON-RPC message per line in each direction. Requests are
//! handled one at a time in arrival order.

use shared::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::mcp::McpServer;

/// Serve requests from stdin until EOF
pub async fn run_stdio_server(server: &McpServer) -> Result<()> {
    info!("Starting stdio transport");
    serve(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Serve requests from any line-oriented reader/writer pair
pub async fn serve<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                server.handle_line(line).await
            }
            Err(e) => {
                warn!(error = %e, "Received a line that is not valid UTF-8");
                server.reject_line(e)
            }
        };

        if let Some(response) = response {
            debug!(bytes = response.len(), "Writing response");
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    info!("EOF reached, shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tools::report_tools;
    use crate::repository::InMemoryReportRepository;
    use road_usecase::{ReportQueryOptions, ReportService};
    use serde_json::Value;
    use shared::ServerSection;
    use std::sync::Arc;

    fn server() -> McpServer {
        let service = Arc::new(ReportService::new(
            InMemoryReportRepository::new(),
            ReportQueryOptions::default(),
        ));
        McpServer::new("test", "0.0.0", report_tools(service, &ServerSection::default()))
    }

    #[tokio::test]
    async fn test_session() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#, "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#, "\n",
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":"#,
            r#"{"name":"add_road_report","arguments":[37.7,-122.4,"pothole","high","deep"]}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":"#,
            r#"{"name":"get_all_reports"}}"#,
            "\n",
        );
        let mut output = Vec::new();

        serve(&server(), input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        // The notification and the blank line produce nothing
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["result"]["isError"], false);
        assert_eq!(
            responses[2]["result"]["content"][0]["text"],
            "1. pothole (high) - Comments: deep"
        );
    }

    #[tokio::test]
    async fn test_garbage_line_does_not_stop_server() {
        let input = "garbage\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n";
        let mut output = Vec::new();

        serve(&server(), input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("-32700"));
        assert!(lines[1].contains("\"result\""));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_server() {
        let input: &[u8] = b"\xff\xfe garbage\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n";
        let mut output = Vec::new();

        serve(&server(), input, &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert_eq!(responses[1]["id"], 1);
        assert_eq!(responses[1]["result"], serde_json::json!({}));
    }
}
