// src/fetch/page.rs
// =============================================================================
// Fetches a single resource and returns it as UTF-8 text.
//
// Supported schemes:
// - http / https: a single GET request, no retries
// - file: read straight from the local filesystem
//
// Resource handling:
// - Each response body is read fully and dropped before fetch() returns
// - The HTTP client keeps no idle connections, so nothing opened for one
//   request outlives it
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, FetchResult};

// Sent with every request so site operators can tell who is crawling them
const USER_AGENT: &str = concat!("seedcrawl/", env!("CARGO_PKG_VERSION"));

// Anything that can turn a URL into page text
//
// Implementations report failures as FetchError; callers that need the
// "empty on failure" behaviour go through get_page().
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> FetchResult<String>;
}

// The real fetcher used by the CLI
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the HTTP client
    //
    // No timeout is configured: a single attempt with the transport's
    // defaults, exactly one request per call.
    pub fn new() -> FetchResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client })
    }

    async fn fetch_http(&self, url: &Url) -> FetchResult<String> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Decode strictly: a page that isn't valid UTF-8 counts as a failure
        let bytes = response.bytes().await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        match url.scheme() {
            "http" | "https" => self.fetch_http(url).await,
            "file" => fetch_file(url).await,
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }
}

// Reads a file:// URL from the local filesystem
async fn fetch_file(url: &Url) -> FetchResult<String> {
    let path = url.to_file_path().map_err(|_| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: "not a local file path".to_string(),
    })?;

    let bytes = tokio::fs::read(&path).await?;
    Ok(String::from_utf8(bytes)?)
}

// Fetches a page, never failing
//
// Parameters:
//   fetcher: where the content comes from
//   address: absolute URL of the page
//
// Returns: the page text, or "" if anything went wrong. The failure is
// logged with the address and the cause.
pub async fn get_page<F>(fetcher: &F, address: &str) -> String
where
    F: Fetch + ?Sized,
{
    let url = match Url::parse(address) {
        Ok(url) => url,
        Err(e) => {
            warn!(url = %address, error = %e, "Cannot fetch: not a valid URL");
            return String::new();
        }
    };

    match fetcher.fetch(&url).await {
        Ok(page) => {
            debug!(url = %address, bytes = page.len(), "Fetched page");
            page
        }
        Err(e) => {
            warn!(url = %address, error = %e, "Failed to fetch page");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_http_page() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/index.html")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<a href=\"/next\">next</a>")
            .expect(1)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = Url::parse(&format!("{}/index.html", server.url())).unwrap();
        let page = fetcher.fetch(&url).await.unwrap();

        assert_eq!(page, "<a href=\"/next\">next</a>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = Url::parse(&format!("{}/missing", server.url())).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_a_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/latin1")
            .with_status(200)
            .with_body(vec![0x63, 0x61, 0x66, 0xe9])
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = Url::parse(&format!("{}/latin1", server.url())).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
        // get_page turns the same failure into an empty page
        assert_eq!(get_page(&fetcher, url.as_str()).await, "");
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<p>local</p>").unwrap();

        let fetcher = HttpFetcher::new().unwrap();
        let url = Url::from_file_path(&path).unwrap();

        assert_eq!(fetcher.fetch(&url).await.unwrap(), "<p>local</p>");
    }

    #[tokio::test]
    async fn test_get_page_returns_empty_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Url::from_file_path(dir.path().join("nope.html")).unwrap();
        let fetcher = HttpFetcher::new().unwrap();

        assert_eq!(get_page(&fetcher, missing.as_str()).await, "");
        assert_eq!(get_page(&fetcher, "not a url").await, "");
        assert_eq!(get_page(&fetcher, "ftp://example.com/file").await, "");
    }
}
