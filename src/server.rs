use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use hyper::service::make_service_fn;
use hyper::service::service_fn;
use hyper::Body;
use hyper::Method;
use hyper::Request;
use hyper::Response;
use hyper::Server;
use hyper::StatusCode;
use tokio::sync::Mutex;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::intake::IntakeService;

/// HTTP server exposing the webhook intake endpoint.
///
/// # Protocol
/// - POST /webhook - Accept one form submission as JSON
/// - GET /health - Health check endpoint
///
/// Every webhook outcome answers 200 with one of the plain-text replies
/// ("Sucesso", "Busy", the duplicate notice, or "Erro: ..."); only unknown
/// routes get a non-200 status.
///
/// # Example POST /webhook payload:
/// ```json
/// {
///   "data": {
///     "cnpj": "12345678000199",
///     "razaoSocial": "Acme",
///     "emailEmpresa": "a@a.com"
///   }
/// }
/// ```
pub struct WebhookServer {
    /// Address to bind the HTTP server to (e.g., "127.0.0.1:8080")
    bind_addr: String,
    /// Parsed socket address
    socket_addr: SocketAddr,
    /// Actual bound address (set after server starts)
    actual_addr: Arc<Mutex<Option<SocketAddr>>>,
    /// The serialized intake pipeline behind the endpoint
    service: Arc<IntakeService>,
    /// Server shutdown signal
    shutdown_tx: Arc<Mutex<Option<tokio::sync::oneshot::Sender<()>>>>,
}

impl WebhookServer {
    /// Create a new webhook server for the given intake service.
    pub fn new(bind_addr: String, service: Arc<IntakeService>) -> Self {
        let socket_addr = bind_addr
            .parse()
            .unwrap_or_else(|_| "127.0.0.1:8080".parse().unwrap());

        Self {
            bind_addr,
            socket_addr,
            actual_addr: Arc::new(Mutex::new(None)),
            service,
            shutdown_tx: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the actual bound address (available after server starts).
    pub async fn actual_addr(&self) -> Option<SocketAddr> {
        *self.actual_addr.lock().await
    }

    /// Handle incoming HTTP requests.
    async fn handle_request(
        req: Request<Body>,
        service: Arc<IntakeService>,
    ) -> Result<Response<Body>, Infallible> {
        let method = req.method();
        let path = req.uri().path();

        debug!("HTTP request: {} {}", method, path);

        match (method, path) {
            // Health check endpoint
            (&Method::GET, "/health") => Ok(Response::builder()
                .status(StatusCode::OK)
                .body(Body::from(r#"{"status":"ok"}"#))
                .unwrap()),

            // Form submission intake
            (&Method::POST, "/webhook") => Self::handle_webhook(req, service).await,

            // 404 for all other routes
            _ => Ok(Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Body::from(r#"{"error":"not_found"}"#))
                .unwrap()),
        }
    }

    /// Run one submission through the intake service.
    async fn handle_webhook(
        req: Request<Body>,
        service: Arc<IntakeService>,
    ) -> Result<Response<Body>, Infallible> {
        let whole_body = match hyper::body::to_bytes(req.into_body()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to read request body: {}", e);
                return Ok(Response::builder()
                    .status(StatusCode::OK)
                    .header("content-type", "text/plain; charset=utf-8")
                    .body(Body::from(format!("Erro: {e}")))
                    .unwrap());
            }
        };

        let reply = service.handle(&whole_body).await;
        Ok(Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "text/plain; charset=utf-8")
            .body(Body::from(reply))
            .unwrap())
    }

    /// Start the server.
    pub async fn open(&mut self) -> Result<()> {
        info!("Starting webhook server on {}", self.bind_addr);

        let service = Arc::clone(&self.service);
        let make_svc = make_service_fn(move |_conn| {
            let service = Arc::clone(&service);
            async move {
                Ok::<_, Infallible>(service_fn(move |req| {
                    Self::handle_request(req, Arc::clone(&service))
                }))
            }
        });

        let server = Server::bind(&self.socket_addr).serve(make_svc);
        let addr = server.local_addr();

        {
            let mut actual_addr_guard = self.actual_addr.lock().await;
            *actual_addr_guard = Some(addr);
        }

        info!("Webhook server listening on http://{}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        {
            let mut shutdown_guard = self.shutdown_tx.lock().await;
            *shutdown_guard = Some(shutdown_tx);
        }

        tokio::spawn(async move {
            let graceful = server.with_graceful_shutdown(async {
                shutdown_rx.await.ok();
                info!("Webhook server shutdown signal received");
            });

            if let Err(e) = graceful.await {
                error!("Webhook server error: {}", e);
            } else {
                info!("Webhook server stopped gracefully");
            }
        });

        Ok(())
    }

    /// Stop the server.
    pub async fn close(&mut self) -> Result<()> {
        info!("Closing webhook server");

        let mut shutdown_guard = self.shutdown_tx.lock().await;
        if let Some(shutdown_tx) = shutdown_guard.take() {
            if shutdown_tx.send(()).is_err() {
                warn!("Failed to send shutdown signal (receiver already dropped)");
            }
        }

        info!("Webhook server closed");
        Ok(())
    }
}
