use crate::errors::{AnalysisError, TransportError};
use crate::models::{AnalysisResult, AnalyzeRequest, RawAnalysisResponse};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use tracing::{debug, warn};

/// One POST of a JSON body, returning the raw response body.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: &AnalyzeRequest) -> Result<String, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::Request(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AnalysisTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &AnalyzeRequest) -> Result<String, TransportError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // Non-2xx bodies are still read; the backend reports failures in JSON.
        let status = response.status();
        if !status.is_success() {
            debug!(%status, "analysis endpoint returned non-success status");
        }
        response.text().await.map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}

#[derive(Clone)]
pub struct AnalysisClient {
    transport: Arc<dyn AnalysisTransport>,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(transport: Arc<dyn AnalysisTransport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let request = AnalyzeRequest {
            text: text.to_string(),
        };
        let body = self
            .transport
            .post_json(&self.endpoint, &request)
            .await
            .inspect_err(|err| warn!("analysis request failed: {err}"))?;

        let raw: RawAnalysisResponse = serde_json::from_str(&body)
            .map_err(|err| AnalysisError::MalformedResponse(format!("invalid json: {err}")))?;
        AnalysisResult::try_from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedTransport {
        calls: AtomicUsize,
        sent: Mutex<Vec<String>>,
        reply: Result<String, String>,
    }

    impl CannedTransport {
        fn replying(body: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                sent: Mutex::new(Vec::new()),
                reply: Ok(body.to_string()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                sent: Mutex::new(Vec::new()),
                reply: Err(message.to_string()),
            })
        }
    }

    #[async_trait]
    impl AnalysisTransport for CannedTransport {
        async fn post_json(&self, _url: &str, body: &AnalyzeRequest) -> Result<String, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().push(body.text.clone());
            self.reply.clone().map_err(TransportError::Request)
        }
    }

    const LOVED: &str = r#"{"sentiment":"positive","polarity":0.8,"subjectivity":0.6,"confidence":92}"#;

    #[tokio::test]
    async fn blank_input_never_reaches_the_transport() {
        let transport = CannedTransport::replying(LOVED);
        let client = AnalysisClient::new(transport.clone(), "http://unused/analyze");

        assert_eq!(client.analyze("").await, Err(AnalysisError::EmptyInput));
        assert_eq!(client.analyze(" \n\t ").await, Err(AnalysisError::EmptyInput));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sends_trimmed_text_and_parses_result() {
        let transport = CannedTransport::replying(LOVED);
        let client = AnalysisClient::new(transport.clone(), "http://unused/analyze");

        let result = client.analyze("  I love this!  ").await.unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.confidence, 92.0);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert_eq!(transport.sent.lock().as_slice(), ["I love this!".to_string()]);
    }

    #[tokio::test]
    async fn transport_failure_is_a_connection_error() {
        let client = AnalysisClient::new(CannedTransport::failing("refused"), "http://unused/analyze");
        let err = client.analyze("hello").await.unwrap_err();
        assert!(matches!(err, AnalysisError::ConnectionError(_)));
        assert_eq!(err.user_message(), "Failed to connect to server");
    }

    #[tokio::test]
    async fn server_error_message_is_kept_verbatim() {
        let client = AnalysisClient::new(
            CannedTransport::replying(r#"{"error":"An error occurred: boom","sentiment":null}"#),
            "http://unused/analyze",
        );
        let err = client.analyze("hello").await.unwrap_err();
        assert_eq!(err, AnalysisError::ServerError("An error occurred: boom".into()));
        assert_eq!(err.user_message(), "An error occurred: boom");
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let client = AnalysisClient::new(
            CannedTransport::replying("<html>502 Bad Gateway</html>"),
            "http://unused/analyze",
        );
        let err = client.analyze("hello").await.unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
        assert!(err.is_server_class());
    }
}
