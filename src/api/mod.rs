//! HTTP client for the school-management backend.
//!
//! Every call goes through [`ApiClient::execute`], which attaches the bearer
//! token and turns a 401 into a cleared session plus a redirect to `/login`.
//! Endpoint functions live in per-resource groups (`client.admin().holidays()`).

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod schools;
pub mod super_admin;
pub mod teacher;

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::routing::{LOGIN_PATH, Navigator};
use crate::session::SessionContext;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use dashboard::DashboardApi;
pub use schools::SchoolsApi;
pub use super_admin::SuperAdminApi;
pub use teacher::TeacherApi;

const EXCEL_EXTENSIONS: &[&str] = &[".xlsx", ".xls"];

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Arc<SessionContext>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        session: Arc<SessionContext>,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            session,
            navigator,
        })
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn schools(&self) -> SchoolsApi<'_> {
        SchoolsApi::new(self)
    }

    pub fn super_admin(&self) -> SuperAdminApi<'_> {
        SuperAdminApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }

    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }

    pub fn teacher(&self) -> TeacherApi<'_> {
        TeacherApi::new(self)
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, path))
            .map_err(|e| ApiError::Decode(format!("invalid request url for {}: {}", path, e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, path: &str, query: &[(&str, String)]) -> ApiResult<RequestBuilder> {
        Ok(self.http.request(method, self.url(path, query)?))
    }

    /// Sends the request with the session's bearer token and applies the
    /// response checks shared by every endpoint.
    async fn execute(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let builder = match self.session.token().await? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            error!("request failed before a response arrived: {}", e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            warn!("backend answered 401; ending session");
            self.session.expire().await?;
            self.navigator.navigate(LOGIN_PATH);
            return Err(ApiError::Unauthorized {
                detail: extract_detail(&body),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(&body);
            return Err(if status.is_server_error() {
                ApiError::Server {
                    status: status.as_u16(),
                    detail,
                }
            } else {
                ApiError::Client {
                    status: status.as_u16(),
                    detail,
                }
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let body_text = response.text().await?;
        serde_json::from_str::<T>(&body_text).map_err(|e| {
            error!("failed to parse response body: {}", e);
            ApiError::Decode(e.to_string())
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.get_with(path, &[]).await
    }

    pub(crate) async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let response = self.execute(self.request(Method::GET, path, query)?).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::POST, path, &[])?.json(body))
            .await?;
        Self::decode(response).await
    }

    /// POST without a request body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.execute(self.request(Method::POST, path, &[])?).await?;
        Self::decode(response).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::PUT, path, &[])?.json(body))
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(self.request(Method::DELETE, path, &[])?).await?;
        Ok(())
    }

    /// Multipart upload of a spreadsheet as the `file` part.
    pub(crate) async fn upload_excel<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<T> {
        check_excel_name(file_name)?;

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")?;
        let form = Form::new().part("file", part);

        let response = self
            .execute(self.request(Method::POST, path, &[])?.multipart(form))
            .await?;
        Self::decode(response).await
    }
}

fn check_excel_name(file_name: &str) -> ApiResult<()> {
    let lower = file_name.to_ascii_lowercase();
    if EXCEL_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        Ok(())
    } else {
        Err(ApiError::InvalidUpload(
            "File must be an Excel file (.xlsx or .xls)".to_string(),
        ))
    }
}

/// Pulls the human-readable reason out of an error body.
///
/// Accepts `{"detail": "..."}`, a validation list
/// `{"detail": [{"msg": "..."}, ...]}`, or `{"message": "..."}`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    match value.get("detail") {
        Some(serde_json::Value::String(s)) => return Some(s.clone()),
        Some(serde_json::Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
        _ => {}
    }

    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
