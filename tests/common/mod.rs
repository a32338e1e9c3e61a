#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;

use school_admin::api::ApiClient;
use school_admin::config::ClientConfig;
use school_admin::models::{
    Class, Holiday, LinkedPerson, LoginRequest, NewClassRequest, NewHolidayRequest, NewLinkRequest, Role,
    StudentParentLink, StudentWithParents, Subject, Teacher, User,
};
use school_admin::routing::LocationHistory;
use school_admin::session::{MemorySessionStore, SessionContext, StoredSession};
use school_admin::views::{Notice, Notifier};

/// Token the fake backend treats as expired.
pub const EXPIRED_TOKEN: &str = "expired";

#[derive(Debug, Clone, PartialEq)]
pub struct Logged {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct BackendState {
    pub requests: Mutex<Vec<Logged>>,
    pub holidays: Mutex<Vec<Holiday>>,
    pub classes: Mutex<Vec<Class>>,
    pub teachers: Mutex<Vec<Teacher>>,
    pub subjects: Mutex<Vec<Subject>>,
    pub links: Mutex<Vec<StudentParentLink>>,
    /// JSON bodies of PUT requests, in arrival order.
    pub updates: Mutex<Vec<serde_json::Value>>,
}

impl BackendState {
    pub fn requests(&self) -> Vec<Logged> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    /// `METHOD path` of every request.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn updates(&self) -> Vec<serde_json::Value> {
        self.updates.lock().unwrap().clone()
    }
}

pub fn link(id: i64, student_id: i64, parent_id: i64) -> StudentParentLink {
    StudentParentLink {
        id,
        student_id,
        parent_id,
        relationship_type: "Mother".to_string(),
        student_name: format!("Student {}", student_id),
        student_email: format!("s{}@school.test", student_id),
        parent_name: format!("Parent {}", parent_id),
        parent_email: format!("p{}@school.test", parent_id),
    }
}

pub struct FakeBackend {
    pub url: String,
    pub state: Arc<BackendState>,
}

type Shared = State<Arc<BackendState>>;

pub fn jwt(user_id: i64, role: Role, school_id: Option<i64>) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({ "sub": user_id.to_string(), "role": role, "school_id": school_id, "exp": 4102444800i64 })
            .to_string(),
    );
    format!("{}.{}.signature", header, payload)
}

async fn record(State(state): Shared, req: Request, next: Next) -> Response {
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().unwrap().push(Logged {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        authorization: authorization.clone(),
    });

    let expired = format!("Bearer {}", EXPIRED_TOKEN);
    if authorization.as_deref() == Some(expired.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Could not validate credentials" })),
        )
            .into_response();
    }
    next.run(req).await
}

fn bad_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Incorrect email or password" })),
    )
        .into_response()
}

async fn login(Json(req): Json<LoginRequest>) -> Response {
    let (id, role, school_id) = match req.email.as_str() {
        "super@platform.test" => (1, Role::SuperAdmin, None),
        "admin@school.test" => (7, Role::Admin, Some(1)),
        "teacher@school.test" => (12, Role::Teacher, Some(1)),
        _ => return bad_credentials(),
    };
    if req.password != "secret" {
        return bad_credentials();
    }
    Json(json!({ "access_token": jwt(id, role, school_id), "token_type": "bearer" })).into_response()
}

async fn list_holidays(State(state): Shared) -> Json<Vec<Holiday>> {
    Json(state.holidays.lock().unwrap().clone())
}

async fn create_holiday(State(state): Shared, Json(req): Json<NewHolidayRequest>) -> Json<Holiday> {
    let mut holidays = state.holidays.lock().unwrap();
    let holiday = Holiday {
        id: holidays.len() as i64 + 1,
        name: req.name,
        start_date: req.start_date,
        end_date: req.end_date,
        description: req.description,
    };
    holidays.push(holiday.clone());
    Json(holiday)
}

async fn update_holiday(State(state): Shared, Path(id): Path<i64>, Json(body): Json<serde_json::Value>) -> Response {
    state.updates.lock().unwrap().push(body.clone());
    let mut holidays = state.holidays.lock().unwrap();
    let Some(holiday) = holidays.iter_mut().find(|h| h.id == id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Holiday not found" }))).into_response();
    };
    if let Some(name) = body["name"].as_str() {
        holiday.name = name.to_string();
    }
    if let Some(description) = body["description"].as_str() {
        holiday.description = Some(description.to_string());
    }
    Json(holiday.clone()).into_response()
}

async fn delete_holiday(State(state): Shared, Path(id): Path<i64>) -> StatusCode {
    let mut holidays = state.holidays.lock().unwrap();
    let before = holidays.len();
    holidays.retain(|h| h.id != id);
    if holidays.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

/// Echoes a PUT on a person record back as the updated record.
async fn update_person(State(state): Shared, Path(id): Path<i64>, Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
    state.updates.lock().unwrap().push(body.clone());
    Json(json!({
        "id": id,
        "name": body["name"].as_str().unwrap_or("Unchanged"),
        "email": body["email"].as_str().unwrap_or("unchanged@school.test"),
        "school_id": 1
    }))
}

async fn update_event(State(state): Shared, Path(id): Path<i64>, Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
    state.updates.lock().unwrap().push(body.clone());
    Json(json!({
        "id": id,
        "title": body["title"].as_str().unwrap_or("Sports Day"),
        "event_date": body["event_date"].as_str().unwrap_or("2026-02-14")
    }))
}

async fn get_school(Path(id): Path<i64>) -> Json<serde_json::Value> {
    Json(json!({ "id": id, "name": "Green Valley", "address": "1 Hill Road", "phone": null, "email": null }))
}

async fn update_school(State(state): Shared, Path(id): Path<i64>, Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
    state.updates.lock().unwrap().push(body.clone());
    Json(json!({ "id": id, "name": body["name"].as_str().unwrap_or("Green Valley"), "address": null, "phone": null, "email": null }))
}

async fn school_admins(Path(id): Path<i64>) -> Json<serde_json::Value> {
    Json(json!([{ "id": 4, "name": "Asha Admin", "email": "admin@school.test", "school_id": id }]))
}

async fn get_user(Path(id): Path<i64>) -> Json<serde_json::Value> {
    Json(json!({ "id": id, "name": "Meera", "email": "meera@school.test", "role": "TEACHER", "school_id": 1 }))
}

async fn assign_student(Path((class_id, student_id)): Path<(i64, i64)>) -> Response {
    if student_id == 404 {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Student not found" }))).into_response();
    }
    Json(json!({ "success": true, "message": format!("Student {} added to class {}", student_id, class_id) }))
        .into_response()
}

async fn no_people() -> Json<Vec<serde_json::Value>> {
    Json(Vec::new())
}

async fn students_with_parents(State(state): Shared) -> Json<Vec<StudentWithParents>> {
    let links = state.links.lock().unwrap();
    let mut students: Vec<StudentWithParents> = Vec::new();
    for l in links.iter() {
        let parent = LinkedPerson {
            id: l.parent_id,
            name: l.parent_name.clone(),
            email: l.parent_email.clone(),
            relationship_type: l.relationship_type.clone(),
        };
        match students.iter_mut().find(|s| s.id == l.student_id) {
            Some(s) => s.linked_parents.push(parent),
            None => students.push(StudentWithParents {
                id: l.student_id,
                name: l.student_name.clone(),
                email: l.student_email.clone(),
                grade: None,
                school_id: Some(1),
                linked_parents: vec![parent],
            }),
        }
    }
    Json(students)
}

async fn parents_with_students() -> Json<serde_json::Value> {
    Json(json!([{ "id": 20, "name": "Parent 20", "email": "p20@school.test", "school_id": 1, "linked_students": [] }]))
}

async fn student_parents(State(state): Shared, Path(id): Path<i64>) -> Json<Vec<StudentParentLink>> {
    let links = state.links.lock().unwrap();
    Json(links.iter().filter(|l| l.student_id == id).cloned().collect())
}

async fn parent_students(State(state): Shared, Path(id): Path<i64>) -> Json<Vec<StudentParentLink>> {
    let links = state.links.lock().unwrap();
    Json(links.iter().filter(|l| l.parent_id == id).cloned().collect())
}

async fn create_link(State(state): Shared, Json(req): Json<NewLinkRequest>) -> Json<StudentParentLink> {
    let mut links = state.links.lock().unwrap();
    let id = links.iter().map(|l| l.id).max().unwrap_or(0) + 1;
    let mut created = link(id, req.student_id, req.parent_id);
    created.relationship_type = req.relationship_type;
    links.push(created.clone());
    Json(created)
}

async fn delete_link(State(state): Shared, Path(id): Path<i64>) -> Response {
    let mut links = state.links.lock().unwrap();
    let before = links.len();
    links.retain(|l| l.id != id);
    if links.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Link not found" }))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_classes(State(state): Shared) -> Json<Vec<Class>> {
    Json(state.classes.lock().unwrap().clone())
}

async fn create_class(State(state): Shared, Json(req): Json<NewClassRequest>) -> Response {
    let known_teacher = state
        .teachers
        .lock()
        .unwrap()
        .iter()
        .any(|t| t.id == req.teacher_id);
    if !known_teacher {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Teacher not found" }))).into_response();
    }
    let mut classes = state.classes.lock().unwrap();
    let class = Class {
        id: classes.len() as i64 + 1,
        name: req.name,
        grade: req.grade,
        subject_id: req.subject_id,
        teacher_id: req.teacher_id,
        academic_year: req.academic_year,
        school_id: Some(1),
    };
    classes.push(class.clone());
    Json(class).into_response()
}

async fn list_teachers(State(state): Shared) -> Json<Vec<Teacher>> {
    Json(state.teachers.lock().unwrap().clone())
}

async fn list_subjects(State(state): Shared) -> Json<Vec<Subject>> {
    Json(state.subjects.lock().unwrap().clone())
}

async fn create_subject() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>upstream crashed</html>").into_response()
}

async fn list_events() -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Invalid date range" }))).into_response()
}

async fn list_announcements() -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": [
            { "loc": ["query", "target_audience"], "msg": "field required" },
            { "loc": ["query", "limit"], "msg": "value is not a valid integer" }
        ] })),
    )
        .into_response()
}

async fn platform_stats() -> Json<serde_json::Value> {
    Json(json!({ "total_schools": 3, "total_admins": 4, "total_teachers": 20, "total_students": 300, "total_parents": 250 }))
}

async fn school_stats() -> Json<serde_json::Value> {
    Json(json!({ "total_teachers": 2, "total_students": 40, "total_classes": 5 }))
}

async fn link_stats() -> Json<serde_json::Value> {
    Json(json!({ "total_links": 31, "unlinked_students": 9, "unlinked_parents": 0 }))
}

async fn upload_teachers(mut multipart: Multipart) -> Response {
    let mut file_name = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            file_name = field.file_name().map(str::to_string);
        }
    }
    match file_name {
        Some(name) => Json(json!({
            "success": true,
            "message": format!("Imported {}", name),
            "success_count": 2,
            "failed_count": 0,
            "failed_rows": []
        }))
        .into_response(),
        None => (StatusCode::BAD_REQUEST, Json(json!({ "detail": "No file" }))).into_response(),
    }
}

pub async fn spawn_backend() -> FakeBackend {
    let state = Arc::new(BackendState::default());

    let app = Router::new()
        .route("/auth/login-json", post(login))
        .route("/dashboard/stats", get(platform_stats))
        .route("/admin/dashboard/stats", get(school_stats))
        .route("/admin/parent-student/stats", get(link_stats))
        .route("/admin/holidays", get(list_holidays).post(create_holiday))
        .route("/admin/holidays/{id}", put(update_holiday).delete(delete_holiday))
        .route("/admin/events/{id}", put(update_event))
        .route("/admin/teachers/{id}", put(update_person))
        .route("/admin/students", get(no_people))
        .route("/admin/students/{id}", put(update_person))
        .route("/admin/students/{id}/parents", get(student_parents))
        .route("/admin/parents", get(no_people))
        .route("/admin/parents/{id}", put(update_person))
        .route("/admin/parents/{id}/students", get(parent_students))
        .route("/admin/students-with-parents", get(students_with_parents))
        .route("/admin/parents-with-students", get(parents_with_students))
        .route("/admin/parent-student/link", post(create_link))
        .route("/admin/parent-student/link/{id}", axum::routing::delete(delete_link))
        .route("/admin/classes/{class_id}/students/{student_id}", post(assign_student))
        .route("/schools/{id}", get(get_school).put(update_school))
        .route("/schools/{id}/admins", get(school_admins))
        .route("/schools/admins/{id}", put(update_person))
        .route("/dashboard/users/{id}", get(get_user))
        .route("/admin/classes", get(list_classes).post(create_class))
        .route("/admin/teachers", get(list_teachers))
        .route("/admin/teachers/upload-excel", post(upload_teachers))
        .route("/admin/subjects", get(list_subjects).post(create_subject))
        .route("/admin/events", get(list_events))
        .route("/admin/announcements", get(list_announcements))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake backend");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake backend stopped");
    });

    FakeBackend {
        url: format!("http://{}", addr),
        state,
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

pub fn school_admin() -> User {
    User {
        id: 7,
        name: "Asha Admin".to_string(),
        email: "admin@school.test".to_string(),
        role: Role::Admin,
        school_id: Some(1),
    }
}

pub struct Harness {
    pub backend: FakeBackend,
    pub api: ApiClient,
    pub session: Arc<SessionContext>,
    pub navigator: Arc<LocationHistory>,
    pub notifier: Arc<RecordingNotifier>,
}

/// Client wired to a fresh fake backend, optionally already signed in.
pub async fn harness(stored: Option<StoredSession>) -> Harness {
    let backend = spawn_backend().await;
    let store = match stored {
        Some(s) => MemorySessionStore::with_session(s),
        None => MemorySessionStore::new(),
    };
    let session = Arc::new(
        SessionContext::init(Arc::new(store))
            .await
            .expect("Failed to init session"),
    );
    let navigator = Arc::new(LocationHistory::new("/admin"));
    let config = ClientConfig::new(&backend.url, "sqlite::memory:").expect("Failed to build config");
    let api = ApiClient::new(&config, session.clone(), navigator.clone()).expect("Failed to build client");

    Harness {
        backend,
        api,
        session,
        navigator,
        notifier: Arc::new(RecordingNotifier::default()),
    }
}

/// Harness signed in as a school admin with the given token.
pub async fn admin_harness(token: &str) -> Harness {
    harness(Some(StoredSession {
        token: token.to_string(),
        user: school_admin(),
    }))
    .await
}
