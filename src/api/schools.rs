use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{NewSchoolRequest, School, SchoolAdmin, UpdateAdminRequest, UpdateSchoolRequest};

pub struct SchoolsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SchoolsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<School>> {
        self.client.get("/schools/").await
    }

    pub async fn get(&self, id: i64) -> ApiResult<School> {
        self.client.get(&format!("/schools/{}", id)).await
    }

    pub async fn create(&self, req: &NewSchoolRequest) -> ApiResult<School> {
        self.client.post("/schools/", req).await
    }

    pub async fn update(&self, id: i64, req: &UpdateSchoolRequest) -> ApiResult<School> {
        self.client.put(&format!("/schools/{}", id), req).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/schools/{}", id)).await
    }

    /// Admins of one school.
    pub async fn admins_of(&self, school_id: i64) -> ApiResult<Vec<SchoolAdmin>> {
        self.client.get(&format!("/schools/{}/admins", school_id)).await
    }

    /// Admins across every school.
    pub async fn admins(&self) -> ApiResult<Vec<SchoolAdmin>> {
        self.client.get("/schools/admins").await
    }

    pub async fn update_admin(&self, id: i64, req: &UpdateAdminRequest) -> ApiResult<SchoolAdmin> {
        self.client.put(&format!("/schools/admins/{}", id), req).await
    }

    pub async fn delete_admin(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/schools/admins/{}", id)).await
    }
}
