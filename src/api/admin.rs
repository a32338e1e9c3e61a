//! School admin operations under `/admin`. The backend scopes every call to
//! the signed-in admin's school.

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::*;

/// Optional filters for the people listings.
#[derive(Debug, Clone, Default)]
pub struct PeopleFilter {
    pub search: Option<String>,
    pub grade: Option<String>,
}

impl PeopleFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            grade: None,
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        if let Some(s) = self.search.as_ref().filter(|s| !s.is_empty()) {
            q.push(("search", s.clone()));
        }
        if let Some(g) = self.grade.as_ref().filter(|g| !g.is_empty()) {
            q.push(("grade", g.clone()));
        }
        q
    }
}

fn class_filter(class_id: Option<i64>) -> Vec<(&'static str, String)> {
    class_id.map(|id| vec![("class_id", id.to_string())]).unwrap_or_default()
}

pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> ApiResult<SchoolStats> {
        self.client.get("/admin/dashboard/stats").await
    }

    // teachers

    pub async fn teachers(&self, filter: &PeopleFilter) -> ApiResult<Vec<Teacher>> {
        self.client.get_with("/admin/teachers", &filter.query()).await
    }

    pub async fn create_teacher(&self, req: &NewTeacherRequest) -> ApiResult<Teacher> {
        self.client.post("/admin/teachers", req).await
    }

    pub async fn update_teacher(&self, id: i64, req: &UpdateTeacherRequest) -> ApiResult<Teacher> {
        self.client.put(&format!("/admin/teachers/{}", id), req).await
    }

    pub async fn delete_teacher(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/admin/teachers/{}", id)).await
    }

    pub async fn upload_teachers(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<ExcelUploadResponse> {
        self.client
            .upload_excel("/admin/teachers/upload-excel", file_name, bytes)
            .await
    }

    // students

    pub async fn students(&self, filter: &PeopleFilter) -> ApiResult<Vec<Student>> {
        self.client.get_with("/admin/students", &filter.query()).await
    }

    pub async fn create_student(&self, req: &NewStudentRequest) -> ApiResult<Student> {
        self.client.post("/admin/students", req).await
    }

    pub async fn update_student(&self, id: i64, req: &UpdateStudentRequest) -> ApiResult<Student> {
        self.client.put(&format!("/admin/students/{}", id), req).await
    }

    pub async fn delete_student(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/admin/students/{}", id)).await
    }

    pub async fn upload_students(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<ExcelUploadResponse> {
        self.client
            .upload_excel("/admin/students/upload-excel", file_name, bytes)
            .await
    }

    // parents

    pub async fn parents(&self, filter: &PeopleFilter) -> ApiResult<Vec<Parent>> {
        self.client.get_with("/admin/parents", &filter.query()).await
    }

    pub async fn create_parent(&self, req: &NewParentRequest) -> ApiResult<Parent> {
        self.client.post("/admin/parents", req).await
    }

    pub async fn update_parent(&self, id: i64, req: &UpdateParentRequest) -> ApiResult<Parent> {
        self.client.put(&format!("/admin/parents/{}", id), req).await
    }

    pub async fn delete_parent(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/admin/parents/{}", id)).await
    }

    pub async fn upload_parents(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<ExcelUploadResponse> {
        self.client
            .upload_excel("/admin/parents/upload-excel", file_name, bytes)
            .await
    }

    // subjects and classes

    pub async fn subjects(&self) -> ApiResult<Vec<Subject>> {
        self.client.get("/admin/subjects").await
    }

    pub async fn create_subject(&self, req: &NewSubjectRequest) -> ApiResult<Subject> {
        self.client.post("/admin/subjects", req).await
    }

    pub async fn classes(&self) -> ApiResult<Vec<Class>> {
        self.client.get("/admin/classes").await
    }

    pub async fn create_class(&self, req: &NewClassRequest) -> ApiResult<Class> {
        self.client.post("/admin/classes", req).await
    }

    pub async fn delete_class(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/admin/classes/{}", id)).await
    }

    pub async fn assign_student(&self, class_id: i64, student_id: i64) -> ApiResult<Acknowledgement> {
        self.client
            .post_empty(&format!("/admin/classes/{}/students/{}", class_id, student_id))
            .await
    }

    // timetable

    pub async fn timetable(&self, class_id: Option<i64>) -> ApiResult<Vec<TimetableSlot>> {
        self.client.get_with("/admin/timetable", &class_filter(class_id)).await
    }

    pub async fn create_timetable_slot(&self, req: &NewTimetableSlotRequest) -> ApiResult<TimetableSlot> {
        self.client.post("/admin/timetable", req).await
    }

    // holidays and events

    pub async fn holidays(&self) -> ApiResult<Vec<Holiday>> {
        self.client.get("/admin/holidays").await
    }

    pub async fn create_holiday(&self, req: &NewHolidayRequest) -> ApiResult<Holiday> {
        self.client.post("/admin/holidays", req).await
    }

    pub async fn update_holiday(&self, id: i64, req: &UpdateHolidayRequest) -> ApiResult<Holiday> {
        self.client.put(&format!("/admin/holidays/{}", id), req).await
    }

    pub async fn delete_holiday(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/admin/holidays/{}", id)).await
    }

    pub async fn events(&self) -> ApiResult<Vec<Event>> {
        self.client.get("/admin/events").await
    }

    pub async fn create_event(&self, req: &NewEventRequest) -> ApiResult<Event> {
        self.client.post("/admin/events", req).await
    }

    pub async fn update_event(&self, id: i64, req: &UpdateEventRequest) -> ApiResult<Event> {
        self.client.put(&format!("/admin/events/{}", id), req).await
    }

    pub async fn delete_event(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/admin/events/{}", id)).await
    }

    // announcements and lessons

    pub async fn announcements(&self, audience: Option<&str>) -> ApiResult<Vec<Announcement>> {
        let query: Vec<(&str, String)> = audience
            .map(|a| vec![("target_audience", a.to_string())])
            .unwrap_or_default();
        self.client.get_with("/admin/announcements", &query).await
    }

    pub async fn create_announcement(&self, req: &NewAnnouncementRequest) -> ApiResult<Announcement> {
        self.client.post("/admin/announcements", req).await
    }

    pub async fn delete_announcement(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/admin/announcements/{}", id)).await
    }

    /// Lessons with their lectures; read-only for admins.
    pub async fn lessons(&self, class_id: Option<i64>) -> ApiResult<Vec<Lesson>> {
        self.client.get_with("/admin/lessons", &class_filter(class_id)).await
    }

    // parent/student links

    pub async fn student_parents(&self, student_id: i64) -> ApiResult<Vec<StudentParentLink>> {
        self.client
            .get(&format!("/admin/students/{}/parents", student_id))
            .await
    }

    pub async fn parent_students(&self, parent_id: i64) -> ApiResult<Vec<StudentParentLink>> {
        self.client
            .get(&format!("/admin/parents/{}/students", parent_id))
            .await
    }

    pub async fn link_parent(&self, req: &NewLinkRequest) -> ApiResult<StudentParentLink> {
        self.client.post("/admin/parent-student/link", req).await
    }

    pub async fn unlink_parent(&self, link_id: i64) -> ApiResult<()> {
        self.client
            .delete(&format!("/admin/parent-student/link/{}", link_id))
            .await
    }

    pub async fn students_with_parents(&self, filter: &PeopleFilter) -> ApiResult<Vec<StudentWithParents>> {
        self.client
            .get_with("/admin/students-with-parents", &filter.query())
            .await
    }

    pub async fn parents_with_students(&self, filter: &PeopleFilter) -> ApiResult<Vec<ParentWithStudents>> {
        self.client
            .get_with("/admin/parents-with-students", &filter.query())
            .await
    }

    pub async fn parent_student_stats(&self) -> ApiResult<ParentStudentStats> {
        self.client.get("/admin/parent-student/stats").await
    }

    /// Students and their parents from one sheet.
    pub async fn upload_students_with_parents(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<ExcelUploadResponse> {
        self.client
            .upload_excel("/admin/parent-student/upload-combined-excel", file_name, bytes)
            .await
    }
}
