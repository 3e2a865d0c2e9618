//! Download service: thin parameter-forwarding wrapper over the transport
//! facade's download operation. The transferred payload is not interpreted.

use std::path::Path;

use crate::error::Result;
use crate::http::{
    Connectivity, HttpProbe, HttpService, Method, ParamEncoding, ProgressSender,
};

pub struct DownloadService<C: Connectivity = HttpProbe> {
    http: HttpService<C>,
}

impl DownloadService<HttpProbe> {
    /// Service with the default reachability probe pointed at `probe_url`.
    pub fn new(probe_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpService::new(probe_url)?,
        })
    }
}

impl<C: Connectivity> DownloadService<C> {
    pub fn with_http(http: HttpService<C>) -> Self {
        Self { http }
    }

    /// GET `url` and stream the body to `dest`. Progress events carry
    /// cumulative bytes with the Content-Length total when the server
    /// announces one.
    pub async fn download(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<ProgressSender>,
    ) -> Result<()> {
        self.http
            .download(
                Method::GET,
                url,
                None,
                ParamEncoding::Query,
                None,
                dest,
                progress,
            )
            .await
    }
}
