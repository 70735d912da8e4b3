use serde_json::Value;
use tracing::debug;

use velora_core::{ListQuery, Page};
use velora_session::{AuthHeader, SessionContext};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// REST client for `/api/<resource>` endpoints.
///
/// Wraps reqwest with the base URL, auth attachment, JSON decoding, and
/// error normalization. Each call is a single round trip; there are no
/// retries and no caching.
pub struct RestClient {
    http: reqwest::Client,
    config: ClientConfig,
    auth: Option<AuthHeader>,
}

impl RestClient {
    pub fn new(config: ClientConfig, auth: Option<AuthHeader>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(ApiError::Network)?;
        Ok(Self { http, config, auth })
    }

    /// Client authenticated as the session's current user.
    pub fn for_session(config: ClientConfig, session: &SessionContext) -> ApiResult<Self> {
        Self::new(config, session.auth_header())
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.config.base_url().as_str().trim_end_matches('/'), path)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, url);
        match &self.auth {
            Some(AuthHeader::Basic { username, password }) => {
                req = req.basic_auth(username, Some(password));
            }
            Some(AuthHeader::Bearer { token }) => {
                req = req.bearer_auth(token);
            }
            None => {}
        }
        req.header("Accept", "application/json")
    }

    /// `GET /api/<resource>` with pagination/search/filter query pairs.
    pub async fn list(&self, resource: &str, query: &ListQuery) -> ApiResult<Page<Value>> {
        let url = self.api_url(resource);
        debug!(resource, ?query, "list request");
        let resp = self
            .request(reqwest::Method::GET, &url)
            .query(&query.to_query_pairs())
            .send()
            .await
            .map_err(ApiError::Network)?;
        let body = handle_response(resp).await?;
        serde_json::from_value(body).map_err(ApiError::Decode)
    }

    /// `GET /api/<resource>/<id>`.
    pub async fn get_one(&self, resource: &str, id: &str) -> ApiResult<Value> {
        let url = self.api_url(&format!("{resource}/{id}"));
        let resp = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(ApiError::Network)?;
        handle_response(resp).await
    }

    /// `POST /api/<resource>`. Returns the created entity.
    pub async fn create(&self, resource: &str, body: &Value) -> ApiResult<Value> {
        let url = self.api_url(resource);
        debug!(resource, "create request");
        let resp = self
            .request(reqwest::Method::POST, &url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::Network)?;
        handle_response(resp).await
    }

    /// `PUT /api/<resource>/<id>` with a sparse body. Returns the updated
    /// entity.
    pub async fn update(&self, resource: &str, id: &str, body: &Value) -> ApiResult<Value> {
        let url = self.api_url(&format!("{resource}/{id}"));
        debug!(resource, id, "update request");
        let resp = self
            .request(reqwest::Method::PUT, &url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::Network)?;
        handle_response(resp).await
    }

    /// `DELETE /api/<resource>/<id>`.
    pub async fn delete(&self, resource: &str, id: &str) -> ApiResult<()> {
        let url = self.api_url(&format!("{resource}/{id}"));
        debug!(resource, id, "delete request");
        let resp = self
            .request(reqwest::Method::DELETE, &url)
            .send()
            .await
            .map_err(ApiError::Network)?;
        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }
        Ok(())
    }
}

/// Decode a response body, normalizing non-2xx statuses into
/// [`ApiError::Status`].
async fn handle_response(resp: reqwest::Response) -> ApiResult<Value> {
    if !resp.status().is_success() {
        return Err(status_error(resp).await);
    }
    let body = resp.text().await.map_err(ApiError::Network)?;
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(ApiError::Decode)
}

async fn status_error(resp: reqwest::Response) -> ApiError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let server_detail = extract_detail(&body);
    let message = match &server_detail {
        Some(detail) => format!("HTTP {status}: {detail}"),
        None if body.is_empty() => format!("HTTP {status}"),
        None => format!("HTTP {status}: {body}"),
    };
    ApiError::Status {
        status,
        message,
        server_detail,
    }
}

/// Error bodies carry a human-readable message under `detail` or `error`;
/// either key must be honored.
fn extract_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("detail")
        .or_else(|| json.get("error"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
