use std::future::Future;

use tracing::debug;

use crate::error::ApiError;

/// リクエスト本文を1回送り、応答本文をそのまま返す。
/// 本番はHTTP、テストではメモリ上の偽サーバーを差し込む
pub trait Transport: Send + Sync {
    fn post(&self, body: String) -> impl Future<Output = Result<String, ApiError>> + Send;
}

/// 単一エンドポイントへの POST (Content-Type: text/plain)。
/// リダイレクトは追従し、再試行・タイムアウトはしない
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn post(&self, body: String) -> Result<String, ApiError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        // HTTPステータスは見ない。本文がJSONかどうかで判断する
        debug!(status = %response.status(), "応答受信");
        response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }
}
