// src/aggregate/fetch.rs
use std::time::{Duration, Instant};

use metrics::histogram;

use crate::aggregate::error::FetchError;

/// Issue one GET and return the full body as text. Non-2xx is an error,
/// the deadline covers the whole exchange, and there is no retry.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    tracing::debug!(%url, "fetch start");
    let t0 = Instant::now();

    let body = tokio::time::timeout(timeout, send_and_read(client, url))
        .await
        .map_err(|_| FetchError::Timeout {
            url: url.to_string(),
            ms: timeout.as_millis() as u64,
        })??;

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("source_fetch_ms").record(ms);
    tracing::debug!(%url, elapsed_ms = ms as u64, bytes = body.len(), "fetch done");

    Ok(body)
}

async fn send_and_read(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let resp = client.get(url).send().await.map_err(|e| FetchError::Network {
        url: url.to_string(),
        source: e,
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    resp.text().await.map_err(|e| FetchError::Network {
        url: url.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let body = fetch(&client, &server.uri(), Duration::from_secs(5))
            .await
            .expect("fetch ok");
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn fetch_maps_non_2xx_to_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let err = fetch(&client, &server.uri(), Duration::from_secs(5))
            .await
            .expect_err("should fail");
        match err {
            FetchError::Status { status, .. } => assert_eq!(status, 503),
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_times_out_on_slow_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let err = fetch(&client, &server.uri(), Duration::from_millis(200))
            .await
            .expect_err("should time out");
        assert!(matches!(err, FetchError::Timeout { .. }));
    }
}
