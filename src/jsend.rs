//! JSend envelope for the JSON output.
//!
//! The envelope follows the JSend specification: "success" carries the parsed
//! running order in `data`; "error" carries a human readable `message` and the
//! HTTP status code describing the failure in `code`. The "fail" status is
//! never produced here: no caller input is validated and the upstream API is
//! stateless.

use serde::{Deserialize, Serialize};

use md_lineup::{parse_running_order, RunningOrder, FESTIVAL_TZ};

use crate::fetch;

#[derive(Debug, Serialize, Deserialize)]
pub struct Jsend {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<RunningOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl Jsend {
    pub fn success(running_order: RunningOrder) -> Self {
        Jsend {
            status: "success".to_string(),
            data: Some(running_order),
            message: None,
            code: None,
        }
    }

    pub fn error(message: String, code: u16) -> Self {
        Jsend {
            status: "error".to_string(),
            data: None,
            message: Some(message),
            code: Some(code),
        }
    }
}

/// Fetch the running order at `url`, extract it, and wrap the outcome in a
/// JSend envelope together with the HTTP status it should be served with:
/// 502 when the upstream page cannot be fetched, 500 when extraction fails.
pub async fn running_order_response(url: &str, year: i32) -> (u16, Jsend) {
    let html = match fetch::fetch_page(url).await {
        Ok(html) => html,
        Err(e) => return (502, Jsend::error(e.to_string(), 502)),
    };

    match parse_running_order(year, FESTIVAL_TZ, &html).await {
        Ok(running_order) => (200, Jsend::success(running_order)),
        Err(e) => (500, Jsend::error(e.to_string(), 500)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error_fields() {
        let envelope = Jsend::success(RunningOrder { days: vec![] });

        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"status":"success","data":{"days":[]}}"#);
    }

    #[test]
    fn error_envelope_omits_data() {
        let envelope = Jsend::error(
            "unable to parse running order structure (day)".to_string(),
            500,
        );

        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(
            json,
            r#"{"status":"error","message":"unable to parse running order structure (day)","code":500}"#
        );
    }
}
