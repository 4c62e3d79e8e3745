use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ApiError, FailureKind};

const LOCAL_BASE_URL: &str = "http://localhost:8000";
const SERVICE_BASE_URL: &str = "http://autovideo:8000";

/// Where the recognizer service runs. Chosen at startup, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Deployment {
    /// Local development server on the loopback interface.
    #[default]
    Local,
    /// The fixed internal service hostname.
    Service,
}

impl Deployment {
    pub fn base_url(self) -> &'static str {
        match self {
            Deployment::Local => LOCAL_BASE_URL,
            Deployment::Service => SERVICE_BASE_URL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Whole-request limit; `None` waits forever.
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    /// Settings for one of the fixed deployments.
    pub fn for_deployment(deployment: Deployment) -> Result<Self, ApiError> {
        Self::with_base_url(deployment.base_url())
    }

    /// Settings pointing at an explicit base URL, e.g. `http://10.0.0.5:8000/api`.
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Some(Duration::from_secs(300)),
        })
    }

    /// Resolves an endpoint below the base URL, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| ApiError::new(FailureKind::InvalidEndpoint, format!("{raw}: {err}")))?;
    match url.scheme() {
        "http" | "https" if !url.cannot_be_a_base() => Ok(url),
        scheme => Err(ApiError::new(
            FailureKind::InvalidEndpoint,
            format!("{raw}: unsupported scheme {scheme}"),
        )),
    }
}
