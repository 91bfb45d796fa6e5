//! HTTP server implementation.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinSet};
use tokio::signal;
use log::{debug, info, warn, error};

use crate::parser::{parse_request, Method};
use crate::router::{Handler, Router};
use crate::server::config::ServerConfig;
use crate::server::encoding::ContentNegotiator;
use crate::server::error::Error;

/// Terminal response when the body could not be encoded.
const ENCODING_FAILED: &[u8] = b"HTTP/1.1 500 Internal Server Error\r\n\r\n";
/// Terminal response when the client only accepts encodings we cannot produce.
const NOT_ACCEPTABLE: &[u8] = b"HTTP/1.1 406 Not Acceptable\r\n\r\n";
/// Terminal response when the handler's status cannot be serialized.
const UNSERIALIZABLE: &[u8] = b"HTTP/1.1 400 Malformed request\r\n\r\n";

/// State shared read-only by every connection task once serving starts.
struct Shared {
    config: ServerConfig,
    router: Router,
    context: Arc<HashMap<String, String>>,
}

/// An HTTP server.
///
/// Routes and context are added while the server is being built; `start`
/// consumes the server, so neither can change once connections are served.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    router: Router,
    context: HashMap<String, String>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            router: Router::new(),
            context: HashMap::new(),
        }
    }

    /// Add a route to the server.
    ///
    /// A pattern containing `[]`, or a verb and pattern that are already
    /// registered, is a configuration error.
    pub fn add_route<H: Handler>(&mut self, method: Method, pattern: &str, handler: H) -> Result<&mut Self, Error> {
        self.router.register(method, pattern, handler)?;
        Ok(self)
    }

    /// Replace the handler used when no route matches.
    pub fn set_not_found<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.router.set_not_found(handler);
        self
    }

    /// Add a value to the context every request carries.
    pub fn add_context(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.context.insert(name.into(), value.into());
        self
    }

    /// The router requests are dispatched through.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Display the registered endpoints.
    fn display_server_info(&self) {
        info!("Registered {count} route(s):", count = self.router.routes().len());
        for route in self.router.routes().iter() {
            info!("  {method} {pattern}", method = route.method, pattern = route.pattern);
        }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    ///
    /// The listener only finishes on a signal, so the returned handle is
    /// used to cancel it when the loop stops for any other reason.
    pub(crate) fn setup_ctrl_c_handler(shutdown_tx: mpsc::Sender<()>, tasks: &mut JoinSet<()>) -> AbortHandle {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        })
    }

    /// Spawn the task serving one accepted connection.
    ///
    /// The socket is moved into the task and dropped, closing it, when the
    /// task finishes on any path.
    fn spawn_connection(mut socket: TcpStream, addr: SocketAddr, shared: Arc<Shared>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            let result = Self::handle_connection(
                &mut socket,
                &shared.router,
                &shared.context,
                &shared.config,
            ).await;

            if let Err(e) = result {
                warn!("Connection from {addr} failed: {e}");
            }
        });
    }

    /// Whether an `accept` error means the listener itself is unusable.
    ///
    /// `EINVAL` (socket no longer listening) surfaces as `InvalidInput`.
    /// Everything else, including descriptor exhaustion and connections
    /// reset before they were accepted, is retried.
    pub(crate) fn is_fatal_accept_error(e: &std::io::Error) -> bool {
        e.kind() == std::io::ErrorKind::InvalidInput
    }

    /// Handle connection errors.
    async fn handle_connection_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if Self::is_fatal_accept_error(&e) {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        // For other errors, wait a bit before retrying
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Perform graceful shutdown.
    pub(crate) async fn perform_shutdown(tasks: &mut JoinSet<()>, signal_listener: AbortHandle) {
        signal_listener.abort();

        info!("Waiting for active connections to complete...");
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let _ = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                match res {
                    Err(e) if !e.is_cancelled() => error!("Task failed during shutdown: {e}"),
                    _ => {}
                }
            }
        }).await;

        info!("Server shutdown complete");
    }

    /// Start the server and listen for incoming connections.
    ///
    /// Runs until Ctrl+C or a fatal accept error.
    pub async fn start(self) -> Result<(), Error> {
        self.display_server_info();

        let listener = self.setup_listener().await?;

        let shared = Arc::new(Shared {
            config: self.config,
            router: self.router,
            context: Arc::new(self.context),
        });

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        // Use JoinSet to keep track of all spawned tasks
        let mut tasks = JoinSet::new();

        let signal_listener = Self::setup_ctrl_c_handler(shutdown_tx.clone(), &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            debug!("Accepted connection from {addr}");
                            Self::spawn_connection(socket, addr, shared.clone(), &mut tasks);
                        },
                        Err(e) => {
                            if Self::handle_connection_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks, signal_listener).await;

        Ok(())
    }

    /// The terminal response for a failed negotiation.
    ///
    /// Gzip into a `Vec` cannot fail, so `ENCODING_FAILED` is only reached
    /// by an encoder writing to a fallible sink. No connection test drives
    /// it; the mapping itself is tested directly.
    pub(crate) fn negotiation_failure_response(e: &Error) -> &'static [u8] {
        match e {
            Error::UnsupportedEncoding(_) => NOT_ACCEPTABLE,
            _ => ENCODING_FAILED,
        }
    }

    /// Handle a single connection: one read, then parse, route, encode,
    /// serialize and one write.
    ///
    /// Requests that fail to parse are dropped without a response. Encoding
    /// and serialization failures are answered with a fixed terminal
    /// response before the error is returned.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        router: &Router,
        context: &Arc<HashMap<String, String>>,
        config: &ServerConfig,
    ) -> Result<(), Error> {
        let mut buf = vec![0; config.max_request_size];

        // A single read; requests larger than the buffer are not reassembled
        let n = socket.read(&mut buf).await?;
        if n == 0 {
            debug!("Empty connection");
            return Ok(());
        }

        let mut request = parse_request(&buf[..n])?;
        request.inject_context(context.clone());

        let mut response = router.dispatch(&mut request);

        let negotiator = ContentNegotiator::new(config.unsupported_encoding);
        if let Err(e) = negotiator.negotiate(&request, &mut response) {
            socket.write_all(Self::negotiation_failure_response(&e)).await?;
            return Err(e);
        }

        let bytes = match response.serialize(config.header_framing) {
            Ok(bytes) => bytes,
            Err(e) => {
                socket.write_all(UNSERIALIZABLE).await?;
                return Err(e);
            }
        };

        socket.write_all(&bytes).await?;
        socket.flush().await?;
        Ok(())
    }
}
