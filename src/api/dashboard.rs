use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{PlatformStats, User};

pub struct DashboardApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DashboardApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> ApiResult<PlatformStats> {
        self.client.get("/dashboard/stats").await
    }

    pub async fn users(&self) -> ApiResult<Vec<User>> {
        self.client.get("/dashboard/users").await
    }

    pub async fn user(&self, id: i64) -> ApiResult<User> {
        self.client.get(&format!("/dashboard/users/{}", id)).await
    }
}
