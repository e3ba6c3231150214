use super::types::{RpcRequest, RpcResponse};
use crate::application::{Dispatcher, ErrorCode};
use crate::constants::{PROTOCOL_VERSION, SERVER_NAME};
use crate::infrastructure::upstream::ChatBackend;
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{
    self, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter,
};
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

type SharedWriter<W> = Arc<AsyncMutex<BufWriter<W>>>;

/// Why [`McpServer::serve`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    EndOfInput,
    Interrupted,
}

/// MCP server speaking newline-delimited JSON-RPC 2.0.
pub struct McpServer<B: ChatBackend> {
    dispatcher: Arc<Dispatcher<B>>,
}

impl<B: ChatBackend + 'static> McpServer<B> {
    pub fn new(dispatcher: Dispatcher<B>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Serve on the process's stdin/stdout until EOF or Ctrl-C.
    pub async fn serve_stdio(&self) -> Result<Shutdown, ServerError> {
        let shutdown = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Interrupt received, shutting down"),
                Err(err) => {
                    warn!(%err, "Unable to listen for interrupt signal");
                    std::future::pending::<()>().await;
                }
            }
        };
        self.serve(io::stdin(), io::stdout(), shutdown).await
    }

    /// Serve one connection until the reader hits EOF or `shutdown` resolves.
    ///
    /// Requests run concurrently. On EOF in-flight requests are allowed to
    /// finish; on shutdown they are aborted. The writer is flushed either way.
    /// Lines are read as raw bytes so that invalid UTF-8 is answered with a
    /// parse error instead of ending the session.
    pub async fn serve<R, W, F>(
        &self,
        reader: R,
        writer: W,
        shutdown: F,
    ) -> Result<Shutdown, ServerError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
        F: Future<Output = ()>,
    {
        let writer: SharedWriter<W> = Arc::new(AsyncMutex::new(BufWriter::new(writer)));
        let mut reader = BufReader::new(reader);
        // Partial input survives a cancelled `read_until`, so the buffer is
        // only taken once a read completes.
        let mut buf = Vec::new();
        let mut in_flight = JoinSet::new();
        tokio::pin!(shutdown);

        let reason = loop {
            tokio::select! {
                _ = &mut shutdown => break Shutdown::Interrupted,
                read = reader.read_until(b'\n', &mut buf) => {
                    let eof = read? == 0;
                    let line = std::mem::take(&mut buf);
                    if !line.iter().all(u8::is_ascii_whitespace) {
                        let dispatcher = Arc::clone(&self.dispatcher);
                        let writer = Arc::clone(&writer);
                        in_flight.spawn(async move {
                            if let Some(response) = process_line(dispatcher, line).await {
                                if let Err(err) = write_response(&writer, &response).await {
                                    warn!(%err, "Failed to write response");
                                }
                            }
                        });
                    }
                    if eof {
                        debug!("Input stream closed");
                        break Shutdown::EndOfInput;
                    }
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(err) = joined {
                        warn!(%err, "Request task ended abnormally");
                    }
                }
            }
        };

        if reason == Shutdown::Interrupted {
            in_flight.abort_all();
        }
        while let Some(joined) = in_flight.join_next().await {
            if let Err(err) = joined {
                if !err.is_cancelled() {
                    warn!(%err, "Request task ended abnormally");
                }
            }
        }

        writer.lock().await.flush().await?;
        Ok(reason)
    }
}

async fn process_line<B: ChatBackend + 'static>(
    dispatcher: Arc<Dispatcher<B>>,
    raw: Vec<u8>,
) -> Option<RpcResponse> {
    let request = match parse_request(&raw) {
        Ok(request) => request,
        Err(response) => return Some(response),
    };
    let id = request.id.clone();
    let notification = request.is_notification();
    let method = request.method.clone();

    // A panicking handler must still produce a reply instead of leaving the
    // client waiting.
    match tokio::spawn(route(dispatcher, request)).await {
        Ok(response) => response,
        Err(err) => {
            error!(method = method.as_str(), %err, "Request handler failed");
            (!notification).then(|| RpcResponse::error(id, ErrorCode::InternalError, "Internal error"))
        }
    }
}

fn parse_request(raw: &[u8]) -> Result<RpcRequest, RpcResponse> {
    let value: Value = serde_json::from_slice(raw).map_err(|err| {
        warn!(%err, "Received invalid JSON");
        RpcResponse::parse_error(format!("Parse error: {err}"))
    })?;
    let id = value.get("id").cloned().filter(|id| !id.is_null());

    let request: RpcRequest = serde_json::from_value(value)
        .map_err(|err| RpcResponse::invalid_request(id.clone(), format!("Invalid request: {err}")))?;
    if request.jsonrpc != "2.0" {
        return Err(RpcResponse::invalid_request(
            id,
            "Unsupported jsonrpc version (expected 2.0)",
        ));
    }
    if request.method.is_empty() {
        return Err(RpcResponse::invalid_request(id, "Missing method"));
    }
    Ok(request)
}

async fn route<B: ChatBackend>(
    dispatcher: Arc<Dispatcher<B>>,
    request: RpcRequest,
) -> Option<RpcResponse> {
    debug!(method = %request.method, "Received JSON-RPC message");

    if request.is_notification() {
        debug!(method = %request.method, "Notification acknowledged");
        return None;
    }

    let id = request.id.clone();
    let response = match request.method.as_str() {
        "initialize" => RpcResponse::success(id, initialize_result(request.params.as_ref())),
        "ping" => RpcResponse::success(id, json!({})),
        "tools/list" => RpcResponse::success(id, json!({ "tools": dispatcher.list_tools() })),
        "tools/call" => handle_tool_call(&dispatcher, id, request.params.as_ref()).await,
        "resources/list" => RpcResponse::success(id, json!({ "resources": [] })),
        other => {
            warn!(method = other, "Unknown JSON-RPC method");
            RpcResponse::method_not_found(id, other)
        }
    };
    Some(response)
}

fn initialize_result(params: Option<&Value>) -> Value {
    let protocol_version = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(PROTOCOL_VERSION);
    info!(protocol_version, "Client initialized session");

    json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {},
            "resources": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

async fn handle_tool_call<B: ChatBackend>(
    dispatcher: &Dispatcher<B>,
    id: Option<Value>,
    params: Option<&Value>,
) -> RpcResponse {
    let Some(name) = params.and_then(|p| p.get("name")).and_then(Value::as_str) else {
        return RpcResponse::error(id, ErrorCode::InvalidParams, "params.name must be a string");
    };
    let arguments = params.and_then(|p| p.get("arguments"));

    match dispatcher.call_tool(name, arguments).await {
        Ok(output) => match serde_json::to_value(&output) {
            Ok(result) => RpcResponse::success(id, result),
            Err(err) => RpcResponse::error(id, ErrorCode::InternalError, err.to_string()),
        },
        Err(err) => {
            debug!(tool = name, code = err.code().code(), %err, "Tool call failed");
            RpcResponse::from_mcp_error(id, &err)
        }
    }
}

async fn write_response<W>(writer: &SharedWriter<W>, response: &RpcResponse) -> Result<(), ServerError>
where
    W: AsyncWrite + Unpin,
{
    let mut encoded = serde_json::to_string(response)?;
    encoded.push('\n');

    let mut stream = writer.lock().await;
    stream.write_all(encoded.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}
