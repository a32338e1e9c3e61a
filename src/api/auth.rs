use serde::Deserialize;
use tracing::info;

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{LoginRequest, SetPasswordRequest, SuperAdminSetupResponse, Token, User};
use crate::session::{decode_claims, user_from_claims};

#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login-json`. Returns the token and the user described by
    /// its claims; nothing is persisted.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<(Token, User)> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let token: Token = self.client.post("/auth/login-json", &req).await?;
        let claims = decode_claims(&token.access_token)?;
        let user = user_from_claims(&claims, email)?;
        Ok((token, user))
    }

    /// Logs in and records the result in the session context.
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<User> {
        let (token, user) = self.login(email, password).await?;
        self.client
            .session()
            .login(token.access_token, user.clone())
            .await?;
        Ok(user)
    }

    pub async fn sign_out(&self) -> ApiResult<()> {
        self.client.session().logout().await?;
        Ok(())
    }

    /// `POST /auth/set-password` with the token from an invitation email.
    pub async fn set_password(&self, token: &str, new_password: &str) -> ApiResult<serde_json::Value> {
        let req = SetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        self.client.post("/auth/set-password", &req).await
    }

    /// `POST /super-admin/setup`, the one-time bootstrap of the platform owner.
    pub async fn setup_super_admin(&self) -> ApiResult<SuperAdminSetupResponse> {
        let res: SuperAdminSetupResponse = self.client.post_empty("/super-admin/setup").await?;
        info!("super admin setup: {}", res.message);
        Ok(res)
    }

    pub async fn health(&self) -> ApiResult<HealthStatus> {
        self.client.get("/health").await
    }
}
