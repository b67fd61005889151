//! Shared HTTP send loop with backoff for transient provider errors

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use tracing::{debug, warn};

use super::LlmError;

/// Maximum number of retries for transient errors
pub(crate) const MAX_RETRIES: u32 = 3;

/// Initial backoff delay for retries
pub(crate) const INITIAL_BACKOFF_MS: u64 = 1000;

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 500 | 502 | 503 | 504 | 529)
}

/// Map a transport error, separating out timeouts
pub(crate) fn network_error(e: reqwest::Error, timeout: Duration) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout(timeout)
    } else {
        LlmError::Network(e)
    }
}

/// Turn a non-success response into an error
async fn status_error(response: Response) -> LlmError {
    let status = response.status().as_u16();
    if status == 429 {
        debug!("status_error: rate limited (429)");
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return LlmError::RateLimited {
            retry_after: Duration::from_secs(retry_after),
        };
    }

    let message = response.text().await.unwrap_or_default();
    LlmError::ApiError { status, message }
}

/// Send a request built by `build`, retrying while the error is retryable
///
/// A 429 is returned immediately as `RateLimited`; other failures are
/// returned once [`LlmError::is_retryable`] says no or retries run out.
pub(crate) async fn send_with_retry<F>(build: F, timeout: Duration) -> Result<Response, LlmError>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt = 0;
    loop {
        let err = match build().send().await {
            Ok(response) if response.status().is_success() => {
                debug!(attempt, "send_with_retry: success");
                return Ok(response);
            }
            Ok(response) => status_error(response).await,
            Err(e) => network_error(e, timeout),
        };

        if !err.is_retryable() || attempt >= MAX_RETRIES {
            debug!(attempt, error = %err, "send_with_retry: giving up");
            return Err(err);
        }

        attempt += 1;
        let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempt - 1);
        warn!(attempt, backoff_ms = backoff, error = %err, "send_with_retry: retrying after transient error");
        tokio::time::sleep(Duration::from_millis(backoff)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const TOO_MANY: &str = "HTTP/1.1 429 Too Many Requests\r\nretry-after: 7\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";
    const BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request\r\ncontent-length: 3\r\nconnection: close\r\n\r\nbad";
    const UNAVAILABLE: &str = "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";
    const OK: &str = "HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}";

    /// Serve canned responses, one per connection, counting requests
    async fn serve(responses: Vec<&'static str>) -> (String, Arc<AtomicUsize>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        tokio::spawn(async move {
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });
        (format!("http://{}", addr), hits)
    }

    async fn send(url: &str) -> Result<Response, LlmError> {
        let http = reqwest::Client::new();
        send_with_retry(|| http.post(url).body("{}"), Duration::from_secs(5)).await
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(408));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(503));
        assert!(is_retryable_status(529));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(401));
        assert!(!is_retryable_status(429));
    }

    #[tokio::test]
    async fn test_rate_limit_returned_without_retry() {
        let (url, hits) = serve(vec![TOO_MANY, OK]).await;
        let err = send(&url).await.unwrap_err();

        assert!(matches!(err, LlmError::RateLimited { retry_after } if retry_after == Duration::from_secs(7)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_client_error_returned_without_retry() {
        let (url, hits) = serve(vec![BAD_REQUEST, OK]).await;
        let err = send(&url).await.unwrap_err();

        assert!(matches!(err, LlmError::ApiError { status: 400, ref message } if message == "bad"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_error_retried_until_success() {
        let (url, hits) = serve(vec![UNAVAILABLE, OK]).await;
        let response = send(&url).await.unwrap();

        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
