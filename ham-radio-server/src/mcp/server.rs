//! Newline-delimited JSON-RPC 2.0 over a byte stream (stdio in production).

use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::dispatch::dispatch;
use super::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use super::tools::ToolContext;

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Chunk size used to skip the rest of an oversized message.
const DISCARD_CHUNK_BYTES: u64 = 64 * 1024;

/// Responses queued for the writer before readers wait.
const RESPONSE_QUEUE: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("response writer stopped: {0}")]
    Writer(#[from] tokio::task::JoinError),
}

/// MCP server over newline-delimited JSON-RPC.
///
/// `tools/call` requests each run on their own task, so a slow upstream
/// lookup does not hold up other requests. All responses go through a single
/// writer task, so lines are never interleaved; responses to concurrent tool
/// calls may arrive out of request order.
pub struct McpServer {
    ctx: ToolContext,
    initialized: bool,
}

impl McpServer {
    pub fn new(ctx: ToolContext) -> Self {
        Self {
            ctx,
            initialized: false,
        }
    }

    /// Serve stdin/stdout until stdin closes.
    pub async fn run_stdio(self) -> Result<(), ServerError> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve until `reader` reaches EOF, then wait for in-flight tool calls
    /// to finish writing.
    pub async fn serve<R, W>(mut self, reader: R, writer: W) -> Result<(), ServerError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(RESPONSE_QUEUE);
        let writer_task = tokio::spawn(write_responses(writer, rx));

        let read_result = self.read_requests(reader, &tx).await;
        drop(tx);

        let write_result = writer_task.await?;
        read_result?;
        write_result?;

        info!("client disconnected");
        Ok(())
    }

    async fn read_requests<R>(
        &mut self,
        reader: R,
        tx: &mpsc::Sender<JsonRpcResponse>,
    ) -> Result<(), ServerError>
    where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut raw = Vec::new();

        loop {
            match read_line(&mut reader, &mut raw).await? {
                Line::Eof => return Ok(()),
                Line::Message => {}
                Line::TooLong(n) => {
                    warn!(bytes = n, limit = MAX_MESSAGE_BYTES, "message too large");
                    send(tx, JsonRpcResponse::error(None, JsonRpcError::parse_error())).await;
                    continue;
                }
            }

            let Ok(text) = std::str::from_utf8(&raw) else {
                warn!("message is not valid UTF-8");
                send(tx, JsonRpcResponse::error(None, JsonRpcError::parse_error())).await;
                continue;
            };

            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }

            let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    warn!(error = %e, "unparsable request");
                    send(tx, JsonRpcResponse::error(None, JsonRpcError::parse_error())).await;
                    continue;
                }
            };

            if req.jsonrpc != "2.0" {
                send(
                    tx,
                    JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_request("Invalid Request"),
                    ),
                )
                .await;
                continue;
            }

            if !self.initialized && req.method != "initialize" {
                if req.id.is_some() {
                    send(
                        tx,
                        JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_request("Server not initialized"),
                        ),
                    )
                    .await;
                }
                continue;
            }

            debug!(method = %req.method, "request");

            if req.method == "tools/call" {
                let ctx = self.ctx.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(resp) = dispatch(&req, &ctx).await {
                        send(&tx, resp).await;
                    }
                });
                continue;
            }

            if let Some(resp) = dispatch(&req, &self.ctx).await {
                send(tx, resp).await;
            }

            if req.method == "initialize" {
                self.initialized = true;
            }
        }
    }
}

/// Result of reading one newline-delimited message.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Eof,
    /// `raw` holds the message
    Message,
    /// The message exceeded the limit and was skipped; carries its length
    TooLong(usize),
}

/// Read one message into `raw`, buffering at most `MAX_MESSAGE_BYTES + 1`
/// bytes. The remainder of an oversized message is read and dropped in
/// fixed-size chunks.
async fn read_line<R>(reader: &mut R, raw: &mut Vec<u8>) -> std::io::Result<Line>
where
    R: AsyncBufRead + Unpin,
{
    raw.clear();
    let limit = MAX_MESSAGE_BYTES as u64 + 1;
    let n = (&mut *reader).take(limit).read_until(b'\n', raw).await?;
    if n == 0 {
        return Ok(Line::Eof);
    }
    if n <= MAX_MESSAGE_BYTES {
        return Ok(Line::Message);
    }

    let mut total = n;
    let mut ended = raw.last() == Some(&b'\n');
    while !ended {
        raw.clear();
        let m = (&mut *reader)
            .take(DISCARD_CHUNK_BYTES)
            .read_until(b'\n', raw)
            .await?;
        total += m;
        ended = m == 0 || raw.last() == Some(&b'\n');
    }
    raw.clear();
    raw.shrink_to(MAX_MESSAGE_BYTES + 1);

    Ok(Line::TooLong(total))
}

async fn send(tx: &mpsc::Sender<JsonRpcResponse>, resp: JsonRpcResponse) {
    // Only fails once the writer has exited, which already carries the error
    let _ = tx.send(resp).await;
}

async fn write_responses<W>(
    mut writer: W,
    mut rx: mpsc::Receiver<JsonRpcResponse>,
) -> Result<(), ServerError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(resp) = rx.recv().await {
        let out = serde_json::to_string(&resp)?;
        writer.write_all(out.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
