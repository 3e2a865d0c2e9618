//! `HttpService` — concrete transport facade over a shared `reqwest::Client`.

use std::path::Path;

use bytes::Bytes;
use futures::StreamExt;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

pub use reqwest::header::HeaderMap;
pub use reqwest::Method;

use crate::error::{AppError, ErrorCode, Result};
use crate::http::{Connectivity, HttpProbe, ParamEncoding, ProgressSender, TransferProgress};

const USER_AGENT: &str = "TemplateCore/0.1.0";

/// Upload bodies are streamed in chunks of this size so progress can be
/// reported while bytes go onto the wire.
pub(crate) const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Transport facade. Owns one `reqwest::Client` and a connectivity probe;
/// every operation pre-flights the probe and short-circuits with
/// `NetworkUnavailable` when offline.
///
/// No request timeout is configured here — long transfers run at the
/// transport's defaults.
pub struct HttpService<C: Connectivity = HttpProbe> {
    client: reqwest::Client,
    connectivity: C,
}

impl HttpService<HttpProbe> {
    /// Facade with the default HTTP reachability probe pointed at `probe_url`.
    pub fn new(probe_url: &str) -> Result<Self> {
        Self::with_connectivity(HttpProbe::new(probe_url)?)
    }
}

impl<C: Connectivity> HttpService<C> {
    pub fn with_connectivity(connectivity: C) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            connectivity,
        })
    }

    /// Issue a request and parse the response body as JSON.
    ///
    /// Non-2xx responses and transport errors surface as `Network` failures;
    /// an empty body is `Code(NoDataReceived)`; a body that is not JSON is a
    /// `Json` failure.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        params: Option<&Value>,
        encoding: ParamEncoding,
        headers: Option<HeaderMap>,
    ) -> Result<Value> {
        self.ensure_reachable().await?;

        let resp = self
            .build_request(method, url, params, encoding, headers)
            .send()
            .await?
            .error_for_status()?;
        let body = resp.bytes().await?;
        if body.is_empty() {
            return Err(AppError::Code(ErrorCode::NoDataReceived));
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// Upload a byte buffer as a streaming request body.
    ///
    /// Cumulative progress (with the buffer length as total) is pushed into
    /// `progress` as chunks are pulled onto the wire. The transferred payload
    /// is not interpreted; a 2xx response is success.
    pub async fn upload_data(
        &self,
        method: Method,
        url: &str,
        headers: Option<HeaderMap>,
        data: Vec<u8>,
        progress: Option<ProgressSender>,
    ) -> Result<()> {
        self.ensure_reachable().await?;

        let body = reqwest::Body::wrap_stream(counted_chunk_stream(data, progress));
        let mut req = self.client.request(method, url);
        if let Some(headers) = headers {
            req = req.headers(headers);
        }
        req.body(body).send().await?.error_for_status()?;
        Ok(())
    }

    /// Upload a file: read it into memory, then delegate to the data path.
    pub async fn upload_file(
        &self,
        method: Method,
        url: &str,
        headers: Option<HeaderMap>,
        path: &Path,
        progress: Option<ProgressSender>,
    ) -> Result<()> {
        self.ensure_reachable().await?;

        let data = tokio::fs::read(path).await?;
        let body = reqwest::Body::wrap_stream(counted_chunk_stream(data, progress));
        let mut req = self.client.request(method, url);
        if let Some(headers) = headers {
            req = req.headers(headers);
        }
        req.body(body).send().await?.error_for_status()?;
        Ok(())
    }

    /// Download the response body to `dest`, streaming chunk by chunk.
    ///
    /// `total_bytes` in progress events comes from Content-Length and is
    /// `None` when the server does not announce one.
    pub async fn download(
        &self,
        method: Method,
        url: &str,
        params: Option<&Value>,
        encoding: ParamEncoding,
        headers: Option<HeaderMap>,
        dest: &Path,
        progress: Option<ProgressSender>,
    ) -> Result<()> {
        self.ensure_reachable().await?;

        let resp = self
            .build_request(method, url, params, encoding, headers)
            .send()
            .await?
            .error_for_status()?;
        let total = resp.content_length();

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written: u64 = 0;
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            if let Some(tx) = &progress {
                let _ = tx.send(TransferProgress {
                    bytes_transferred: written,
                    total_bytes: total,
                });
            }
        }
        file.flush().await?;
        Ok(())
    }

    async fn ensure_reachable(&self) -> Result<()> {
        if self.connectivity.is_reachable().await {
            Ok(())
        } else {
            Err(AppError::Code(ErrorCode::NetworkUnavailable))
        }
    }

    fn build_request(
        &self,
        method: Method,
        url: &str,
        params: Option<&Value>,
        encoding: ParamEncoding,
        headers: Option<HeaderMap>,
    ) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, url);
        if let Some(headers) = headers {
            req = req.headers(headers);
        }
        if let Some(params) = params {
            req = match encoding {
                ParamEncoding::Query => req.query(&query_pairs(params)),
                ParamEncoding::Form => req.form(&query_pairs(params)),
                ParamEncoding::Json => req.json(params),
            };
        }
        req
    }
}

/// Flatten a JSON object into string key/value pairs for query or form
/// encoding. String values go through verbatim, everything else via its JSON
/// rendering. Non-object values produce no pairs.
pub(crate) fn query_pairs(params: &Value) -> Vec<(String, String)> {
    match params {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Split `data` into upload-sized chunks.
pub(crate) fn chunk_bytes(mut data: Bytes, chunk_size: usize) -> Vec<Bytes> {
    let mut chunks = Vec::new();
    while !data.is_empty() {
        let take = chunk_size.min(data.len());
        chunks.push(data.split_to(take));
    }
    chunks
}

/// Stream of upload chunks that reports cumulative progress as each chunk is
/// consumed. The total is the buffer length, known up front.
pub(crate) fn counted_chunk_stream(
    data: Vec<u8>,
    progress: Option<ProgressSender>,
) -> impl futures::Stream<Item = std::io::Result<Bytes>> + Send + 'static {
    let total = data.len() as u64;
    let mut sent: u64 = 0;
    futures::stream::iter(chunk_bytes(Bytes::from(data), UPLOAD_CHUNK_SIZE)).map(move |chunk| {
        sent += chunk.len() as u64;
        if let Some(tx) = &progress {
            let _ = tx.send(TransferProgress {
                bytes_transferred: sent,
                total_bytes: Some(total),
            });
        }
        Ok(chunk)
    })
}
