//! HTTP data source backed by the DCGM exporter adapter.

use dcgm_adapters::exporter::DcgmExporterAdapter;
use tokio::runtime::{Builder, Runtime};
use tracing::info;

use super::{ExpositionSource, FetchError};

/// A blocking source performing one HTTP GET per fetch.
///
/// The adapter is async; this source owns a current-thread runtime and
/// blocks on each scrape.
#[derive(Debug)]
pub struct HttpSource {
    adapter: DcgmExporterAdapter,
    runtime: Runtime,
    description: String,
}

impl HttpSource {
    pub fn new(adapter: DcgmExporterAdapter) -> Result<Self, FetchError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(FetchError::Runtime)?;
        let description = format!("http: {}", adapter.endpoint());
        Ok(Self {
            adapter,
            runtime,
            description,
        })
    }
}

impl ExpositionSource for HttpSource {
    fn fetch(&mut self) -> Result<String, FetchError> {
        info!(endpoint = %self.adapter.endpoint(), timeout = ?self.adapter.timeout(), "fetching snapshot");
        let text = self.runtime.block_on(self.adapter.scrape())?;
        Ok(text)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcgm_adapters::AdapterError;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer one request on a background thread with the given status and body.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{}/metrics", addr)
    }

    #[test]
    fn test_http_source_description() {
        let adapter = DcgmExporterAdapter::builder().build().unwrap();
        let source = HttpSource::new(adapter).unwrap();
        assert_eq!(source.description(), "http: http://localhost:9400/metrics");
    }

    #[test]
    fn test_http_source_fetch() {
        let body = "DCGM_FI_DEV_GPU_TEMP{gpu=\"0\"} 63\n";
        let url = serve_once("200 OK", body);

        let adapter = DcgmExporterAdapter::builder().endpoint(url).build().unwrap();
        let mut source = HttpSource::new(adapter).unwrap();

        assert_eq!(source.fetch().unwrap(), body);
    }

    #[test]
    fn test_http_source_bad_status() {
        let url = serve_once("500 Internal Server Error", "boom");

        let adapter = DcgmExporterAdapter::builder().endpoint(url).build().unwrap();
        let mut source = HttpSource::new(adapter).unwrap();

        let err = source.fetch().unwrap_err();
        assert!(
            matches!(err, FetchError::Http(AdapterError::Status { status: 500, .. })),
            "got {:?}",
            err
        );
    }
}
