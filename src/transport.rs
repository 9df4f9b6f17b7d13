//! HTTP fetch strategies.
//!
//! Two interchangeable strategies implement the [`Fetch`] trait:
//! - [`StandardFetch`]: plain GET with a desktop user agent
//! - [`ImpersonateFetch`]: GET that presents a Chrome 120 browser profile,
//!   used for the one source that turns away generic clients
//!
//! # Failure Model
//!
//! No error escapes this module. Timeouts, connection failures and bad
//! statuses are logged and reported as `None`. There is no retry: each
//! strategy sleeps a randomized politeness delay, sends exactly one request,
//! and returns whatever came back.

use crate::config::TransportSettings;
use rand::{Rng, rng};
use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, instrument};
use wreq_util::Emulation;

/// A strategy for downloading a page's raw HTML.
pub trait Fetch {
    /// Fetch `url` once. `None` means the fetch failed and was already logged.
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// Pick a delay uniformly from `[min_ms, max_ms]`.
fn politeness_delay(settings: &TransportSettings) -> Duration {
    let lo = settings.delay_min_ms.min(settings.delay_max_ms);
    let hi = settings.delay_min_ms.max(settings.delay_max_ms);
    Duration::from_millis(rng().random_range(lo..=hi))
}

/// Plain HTTP GET with a fixed desktop user agent.
///
/// Any non-success status counts as a failure.
#[derive(Debug)]
pub struct StandardFetch {
    client: Client,
    settings: TransportSettings,
}

impl StandardFetch {
    pub fn new(user_agent: &str, settings: TransportSettings) -> Result<Self, Box<dyn Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(settings.timeout())
            .build()?;
        Ok(Self { client, settings })
    }

    async fn try_fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Fetch for StandardFetch {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Option<String> {
        let delay = politeness_delay(&self.settings);
        debug!(?delay, "Politeness delay");
        sleep(delay).await;

        let t0 = Instant::now();
        match self.try_fetch(url).await {
            Ok(body) => {
                debug!(bytes = body.len(), elapsed_ms = t0.elapsed().as_millis(), "Fetched page");
                Some(body)
            }
            Err(e) => {
                error!(%url, error = %e, "Standard fetch failed");
                None
            }
        }
    }
}

/// GET that presents itself as desktop Chrome 120.
///
/// The client emulates Chrome's TLS handshake, HTTP/2 settings and
/// navigation headers, user agent included. Only a `200 OK` counts as
/// success.
pub struct ImpersonateFetch {
    client: wreq::Client,
    settings: TransportSettings,
}

impl fmt::Debug for ImpersonateFetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImpersonateFetch")
            .field("emulation", &"Chrome120")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ImpersonateFetch {
    pub fn new(settings: TransportSettings) -> Result<Self, Box<dyn Error>> {
        let client = wreq::Client::builder()
            .emulation(Emulation::Chrome120)
            .timeout(settings.timeout())
            .build()?;
        Ok(Self { client, settings })
    }

    async fn try_fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != wreq::StatusCode::OK {
            return Err(format!("unexpected status {status}").into());
        }
        Ok(response.text().await?)
    }
}

impl Fetch for ImpersonateFetch {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Option<String> {
        let delay = politeness_delay(&self.settings);
        debug!(?delay, "Politeness delay");
        sleep(delay).await;

        match self.try_fetch(url).await {
            Ok(body) => {
                debug!(bytes = body.len(), "Fetched page (impersonated)");
                Some(body)
            }
            Err(e) => {
                error!(%url, error = %e, "Impersonated fetch failed");
                None
            }
        }
    }
}
