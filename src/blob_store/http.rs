use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use hyper::client::HttpConnector;
use hyper::{Body, Client, Method, Request};

use crate::traits::BlobStore;

/// HTTP blob storage: uploads artifact bytes to a remote endpoint with a
/// bearer token, matching the hosting platform's authenticated export
/// surface.
pub struct HttpBlobStore {
    base_url: String,
    auth_token: String,
    client: Client<HttpConnector>,
}

impl HttpBlobStore {
    pub fn new(base_url: String, auth_token: String) -> Self {
        Self {
            base_url,
            auth_token,
            client: Client::new(),
        }
    }

    /// Percent-encode the path segment: artifact names carry spaces,
    /// slashes and possibly accented company names.
    fn encode_name(name: &str) -> String {
        let mut out = String::with_capacity(name.len());
        for b in name.bytes() {
            match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                    out.push(b as char)
                }
                _ => out.push_str(&format!("%{b:02X}")),
            }
        }
        out
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    fn name(&self) -> &'static str {
        "http-blobs"
    }

    async fn create_file(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let uri = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            Self::encode_name(name)
        );
        let req = Request::builder()
            .method(Method::POST)
            .uri(&uri)
            .header("authorization", format!("Bearer {}", self.auth_token))
            .header("content-type", "application/octet-stream")
            .body(Body::from(bytes.to_vec()))
            .context("building blob upload request")?;

        let response = self
            .client
            .request(req)
            .await
            .with_context(|| format!("uploading blob to {uri}"))?;
        if !response.status().is_success() {
            bail!("blob upload to {} failed with status {}", uri, response.status());
        }
        tracing::debug!("HttpBlobStore: uploaded {} bytes to {}", bytes.len(), uri);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use hyper::service::{make_service_fn, service_fn};
    use hyper::{Response, Server, StatusCode};

    use super::*;

    #[derive(Debug, Clone)]
    struct Upload {
        path: String,
        auth: String,
        bytes: Vec<u8>,
    }

    /// One-shot upload target: records every request and answers with the
    /// given status.
    fn spawn_upload_target(
        status: StatusCode,
    ) -> (SocketAddr, Arc<Mutex<Vec<Upload>>>, tokio::sync::oneshot::Sender<()>) {
        let seen: Arc<Mutex<Vec<Upload>>> = Arc::new(Mutex::new(Vec::new()));
        let captured = seen.clone();
        let make_svc = make_service_fn(move |_| {
            let captured = captured.clone();
            async move {
                Ok::<_, hyper::Error>(service_fn(move |req: Request<Body>| {
                    let captured = captured.clone();
                    async move {
                        let path = req.uri().path().to_string();
                        let auth = req
                            .headers()
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default()
                            .to_string();
                        let bytes = hyper::body::to_bytes(req.into_body()).await?.to_vec();
                        captured.lock().unwrap().push(Upload { path, auth, bytes });
                        let mut response = Response::new(Body::empty());
                        *response.status_mut() = status;
                        Ok::<_, hyper::Error>(response)
                    }
                }))
            }
        });
        let server = Server::bind(&([127, 0, 0, 1], 0).into()).serve(make_svc);
        let addr = server.local_addr();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(server.with_graceful_shutdown(async {
            shutdown_rx.await.ok();
        }));
        (addr, seen, shutdown_tx)
    }

    #[test]
    fn names_are_percent_encoded() {
        assert_eq!(
            HttpBlobStore::encode_name("Acme - 12.345.678/0001-99.docx"),
            "Acme%20-%2012.345.678%2F0001-99.docx"
        );
    }

    #[tokio::test]
    async fn upload_carries_bearer_token_and_bytes() -> Result<()> {
        let (addr, seen, _shutdown) = spawn_upload_target(StatusCode::OK);

        let store = HttpBlobStore::new(format!("http://{addr}/artifacts"), "s3cret".to_string());
        store
            .create_file("Acme - 12.345.678/0001-99.docx", b"doc bytes")
            .await?;

        let uploads = seen.lock().unwrap().clone();
        assert_eq!(uploads.len(), 1);
        assert_eq!(
            uploads[0].path,
            "/artifacts/Acme%20-%2012.345.678%2F0001-99.docx"
        );
        assert_eq!(uploads[0].auth, "Bearer s3cret");
        assert_eq!(uploads[0].bytes, b"doc bytes");
        Ok(())
    }

    #[tokio::test]
    async fn rejected_upload_is_an_error() {
        let (addr, seen, _shutdown) = spawn_upload_target(StatusCode::FORBIDDEN);

        let store = HttpBlobStore::new(format!("http://{addr}/artifacts"), "wrong".to_string());
        let err = store
            .create_file("x.docx", b"doc bytes")
            .await
            .expect_err("403 must surface as an error");
        assert!(err.to_string().contains("403"));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
