// src/test_support.rs
// =============================================================================
// An in-memory web for tests.
//
// Each route maps an exact URL string to a response. Unknown URLs answer
// 404, which is also what a host without a robots.txt looks like.
// =============================================================================

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::fetch::Fetch;

enum Route {
    Page(String),
    Status(u16),
    Unreachable,
}

#[derive(Default)]
pub struct FakeWeb {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

impl FakeWeb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(url.to_string(), Route::Page(body.to_string()));
        self
    }

    pub fn status(mut self, url: &str, code: u16) -> Self {
        self.routes.insert(url.to_string(), Route::Status(code));
        self
    }

    pub fn unreachable(mut self, url: &str) -> Self {
        self.routes.insert(url.to_string(), Route::Unreachable);
        self
    }

    /// Every URL fetched so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|r| r.as_str() == url).count()
    }
}

#[async_trait]
impl Fetch for FakeWeb {
    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        self.requests.lock().unwrap().push(url.to_string());

        match self.routes.get(url.as_str()) {
            Some(Route::Page(body)) => Ok(body.clone()),
            Some(Route::Status(code)) => Err(FetchError::Status(*code)),
            Some(Route::Unreachable) => Err(FetchError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            None => Err(FetchError::Status(404)),
        }
    }
}
