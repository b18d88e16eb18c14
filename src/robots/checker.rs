// src/robots/checker.rs
// =============================================================================
// Decides whether the crawler is allowed to fetch an address.
//
// The checks run in this order:
// 1. mailto: and javascript: links are never fetchable
// 2. file: URLs are local, there is no robots.txt to ask, always allowed
// 3. Anything without a scheme and host is not an absolute URL, rejected
// 4. Everything else: fetch scheme://host/robots.txt and ask it
//    (an explicit port is kept: http://host:8080/robots.txt)
//
// Every failure ends in `false` (plus a log line), never in an error.
// =============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use super::policy::RobotsPolicy;
use crate::fetch::Fetch;

// Pseudo-schemes that never point at fetchable content
const BLOCKED_PREFIXES: [&str; 2] = ["mailto:", "javascript:"];

// Local files have no robots.txt, so they are always allowed
const LOCAL_FILE_PREFIX: &str = "file:";

pub struct PermissionChecker<F: ?Sized> {
    fetcher: Arc<F>,
    // Parsed policies keyed by robots.txt URL. Lives as long as one crawl.
    cache: RwLock<HashMap<String, Arc<RobotsPolicy>>>,
}

impl<F> PermissionChecker<F>
where
    F: Fetch + ?Sized,
{
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            cache: RwLock::new(HashMap::new()),
        }
    }

    // Checks whether the wildcard agent may fetch an address
    //
    // Parameters:
    //   address: the absolute URL we would like to crawl
    //
    // Returns: true if allowed. Never fails: invalid addresses and
    // unreachable policies both resolve to false after being logged.
    pub async fn is_permitted(&self, address: &str) -> bool {
        let lowered = address.to_ascii_lowercase();
        if BLOCKED_PREFIXES.iter().any(|prefix| lowered.starts_with(prefix)) {
            return false;
        }
        if lowered.starts_with(LOCAL_FILE_PREFIX) {
            return true;
        }

        let url = match Url::parse(address) {
            Ok(url) => url,
            Err(e) => {
                warn!(url = %address, reason = %e, "Not a valid absolute url");
                return false;
            }
        };

        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host,
            _ => {
                warn!(url = %address, reason = "missing host", "Not a valid absolute url");
                return false;
            }
        };

        let robots_url = match robots_location(&url, host) {
            Some(robots_url) => robots_url,
            None => {
                warn!(url = %address, "Could not build robots.txt location");
                return false;
            }
        };

        let Some(policy) = self.policy_for(&robots_url, address).await else {
            return false;
        };

        let allowed = policy.allows(&url);
        if !allowed {
            debug!(url = %address, robots = %robots_url, "Disallowed by robots.txt");
        }
        allowed
    }

    // Looks up the policy for a host, fetching it on first use
    //
    // Returns None when the policy could not be retrieved; that failure is
    // not cached, but every crawl only asks a bounded number of times.
    async fn policy_for(&self, robots_url: &Url, address: &str) -> Option<Arc<RobotsPolicy>> {
        if let Some(policy) = self.cache.read().await.get(robots_url.as_str()) {
            return Some(Arc::clone(policy));
        }

        debug!(robots = %robots_url, "Fetching robots.txt");
        let policy = match self.fetcher.fetch(robots_url).await {
            Ok(content) => RobotsPolicy::parse(&content),
            Err(e) => match e.status() {
                Some(401 | 403) => {
                    info!(robots = %robots_url, status = ?e.status(), "robots.txt access refused, treating host as off-limits");
                    RobotsPolicy::DisallowAll
                }
                Some(code) if (400..500).contains(&code) => {
                    debug!(robots = %robots_url, status = code, "No robots.txt, host is open");
                    RobotsPolicy::AllowAll
                }
                _ => {
                    warn!(robots = %robots_url, url = %address, error = %e, "Error accessing robot file");
                    return None;
                }
            },
        };

        let policy = Arc::new(policy);
        self.cache
            .write()
            .await
            .insert(robots_url.to_string(), Arc::clone(&policy));
        Some(policy)
    }
}

// Builds scheme://host[:port]/robots.txt for an address
fn robots_location(url: &Url, host: &str) -> Option<Url> {
    let location = match url.port() {
        Some(port) => format!("{}://{}:{}/robots.txt", url.scheme(), host, port),
        None => format!("{}://{}/robots.txt", url.scheme(), host),
    };
    Url::parse(&location).ok()
}
