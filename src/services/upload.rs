//! Upload service: thin parameter-forwarding wrapper over the transport
//! facade's upload operations. The transferred payload is not interpreted.

use std::path::Path;

use crate::error::Result;
use crate::http::{
    Connectivity, HeaderMap, HttpProbe, HttpService, Method, ProgressSender,
};

pub struct UploadService<C: Connectivity = HttpProbe> {
    http: HttpService<C>,
}

impl UploadService<HttpProbe> {
    /// Service with the default reachability probe pointed at `probe_url`.
    pub fn new(probe_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpService::new(probe_url)?,
        })
    }
}

impl<C: Connectivity> UploadService<C> {
    pub fn with_http(http: HttpService<C>) -> Self {
        Self { http }
    }

    /// Upload a byte buffer. Progress events carry cumulative bytes with the
    /// buffer length as total; the returned future is the single terminal
    /// outcome.
    pub async fn upload_data(
        &self,
        method: Method,
        url: &str,
        headers: Option<HeaderMap>,
        data: Vec<u8>,
        progress: Option<ProgressSender>,
    ) -> Result<()> {
        self.http.upload_data(method, url, headers, data, progress).await
    }

    /// Upload a local file.
    pub async fn upload_file(
        &self,
        method: Method,
        url: &str,
        headers: Option<HeaderMap>,
        path: &Path,
        progress: Option<ProgressSender>,
    ) -> Result<()> {
        self.http.upload_file(method, url, headers, path, progress).await
    }
}
