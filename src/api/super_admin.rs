use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{Acknowledgement, InviteAdminRequest};

pub struct SuperAdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SuperAdminApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /super/invite-admin`. The backend creates an ADMIN and emails a
    /// password-setup link.
    pub async fn invite_admin(&self, req: &InviteAdminRequest) -> ApiResult<Acknowledgement> {
        self.client.post("/super/invite-admin", req).await
    }
}
