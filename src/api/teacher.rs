use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{Announcement, Class, TeacherStats, TimetableSlot};

pub struct TeacherApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TeacherApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> ApiResult<TeacherStats> {
        self.client.get("/teacher/dashboard/stats").await
    }

    /// Classes assigned to the signed-in teacher.
    pub async fn classes(&self) -> ApiResult<Vec<Class>> {
        self.client.get("/teacher/classes").await
    }

    pub async fn timetable(&self) -> ApiResult<Vec<TimetableSlot>> {
        self.client.get("/teacher/timetable").await
    }

    pub async fn announcements(&self) -> ApiResult<Vec<Announcement>> {
        self.client.get("/teacher/announcements").await
    }
}
