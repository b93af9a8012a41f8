//! Newline-delimited JSON-RPC over stdio

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};
use track_reward_core::{Result, RewardError};

use crate::RewardServer;
use crate::methods::handle_request;
use crate::rpc::Request;

/// Run the scoring server on stdin/stdout until EOF
pub async fn run(server: RewardServer) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    info!("Track reward server starting on stdio");
    serve(&server, reader, writer).await
}

/// Serve requests read line by line from `reader`, writing one response line per request
pub async fn serve<R, W>(server: &RewardServer, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let registry = server.registry();
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| RewardError::IoError(format!("Failed to read request: {}", e)))?;

        if bytes_read == 0 {
            info!("Client disconnected (EOF)");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!("Received: {}", trimmed);

        let request: Request = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                continue;
            }
        };

        let response = handle_request(&request, &registry, server.default_config()).await;
        if request.is_notification() {
            continue;
        }

        let response_json = serde_json::to_string(&response)?;
        debug!("Sending: {}", response_json);

        writer
            .write_all(response_json.as_bytes())
            .await
            .map_err(|e| RewardError::IoError(format!("Failed to write response: {}", e)))?;
        writer
            .write_all(b"\n")
            .await
            .map_err(|e| RewardError::IoError(format!("Failed to write newline: {}", e)))?;
        writer
            .flush()
            .await
            .map_err(|e| RewardError::IoError(format!("Failed to flush: {}", e)))?;
    }

    let streams = registry.read().await.count();
    if streams > 0 {
        info!("Shutting down with {} open streams", streams);
    }

    Ok(())
}
