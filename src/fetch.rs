//! Fetching the published lineup page.

use thiserror::Error;
use tracing::info;

/// URL where the latest running order is published.
pub const RUNNING_ORDER_URL: &str = "http://www.metaldays.net/Line_up";

/// Failure to obtain the lineup page. Distinguished from extraction failures
/// so callers can report upstream problems as such.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned \"{status}\"")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// GET `url` and return the response body. Any status other than 200 is an
/// error.
pub async fn fetch_page(url: &str) -> Result<String, FetchError> {
    info!("fetching {}", url);

    let response = reqwest::get(url).await.map_err(|e| FetchError::Transport {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|e| FetchError::Transport {
        url: url.to_string(),
        source: e,
    })
}
