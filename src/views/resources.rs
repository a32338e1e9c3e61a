//! One [`Resource`] per backend collection the dashboards show.

use async_trait::async_trait;

use crate::api::ApiClient;
use crate::api::admin::PeopleFilter;
use crate::error::ApiResult;
use crate::models::*;
use crate::views::form::{FieldSpec, FormState, InputKind, ValidationError, optional, required};
use crate::views::resource::{
    CreateResource, Lookups, RemovableResource, Resource, UpdatableResource, lookup_label, opt,
};

pub const WEEKDAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const DEFAULT_RELATIONSHIP: &str = "Parent";

fn school_label(school_id: Option<i64>) -> String {
    school_id.map(|id| id.to_string()).unwrap_or_default()
}

// ---- super admin ----

pub struct Schools;

#[async_trait]
impl Resource for Schools {
    type Record = School;

    const TITLE: &'static str = "Schools";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Address", "Phone", "Email"];
    const FIELDS: &'static [FieldSpec] = &[
        required("name", "School name", InputKind::Text),
        optional("address", "Address", InputKind::LongText),
        optional("phone", "Phone", InputKind::Text),
        optional("email", "Email", InputKind::Email),
    ];

    async fn list(api: &ApiClient) -> ApiResult<Vec<School>> {
        api.schools().list().await
    }

    fn row(s: &School, _: &Lookups) -> Vec<String> {
        vec![s.id.to_string(), s.name.clone(), opt(&s.address), opt(&s.phone), opt(&s.email)]
    }
}

#[async_trait]
impl CreateResource for Schools {
    type Draft = NewSchoolRequest;
    const NOUN: &'static str = "School";

    fn draft(form: &FormState) -> Result<NewSchoolRequest, ValidationError> {
        Ok(NewSchoolRequest {
            name: form.text("name"),
            address: form.optional_text("address"),
            phone: form.optional_text("phone"),
            email: form.optional_text("email"),
        })
    }

    async fn create(api: &ApiClient, draft: &NewSchoolRequest) -> ApiResult<()> {
        api.schools().create(draft).await.map(|_| ())
    }
}

#[async_trait]
impl UpdatableResource for Schools {
    type Patch = UpdateSchoolRequest;
    const EDIT_FIELDS: &'static [FieldSpec] = &[
        optional("name", "School name", InputKind::Text),
        optional("address", "Address", InputKind::LongText),
        optional("phone", "Phone", InputKind::Text),
        optional("email", "Email", InputKind::Email),
    ];

    fn patch(form: &FormState) -> Result<UpdateSchoolRequest, ValidationError> {
        Ok(UpdateSchoolRequest {
            name: form.optional_text("name"),
            address: form.optional_text("address"),
            phone: form.optional_text("phone"),
            email: form.optional_text("email"),
        })
    }

    async fn update(api: &ApiClient, id: i64, patch: &UpdateSchoolRequest) -> ApiResult<()> {
        api.schools().update(id, patch).await.map(|_| ())
    }
}

#[async_trait]
impl RemovableResource for Schools {
    async fn remove(api: &ApiClient, id: i64) -> ApiResult<()> {
        api.schools().delete(id).await
    }
}

/// School administrators across the platform. New admins are invited, which
/// always yields the ADMIN role.
pub struct SchoolAdmins;

#[async_trait]
impl Resource for SchoolAdmins {
    type Record = SchoolAdmin;

    const TITLE: &'static str = "School Admins";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Email", "School"];
    const FIELDS: &'static [FieldSpec] = &[
        required("name", "Full name", InputKind::Text),
        required("email", "Email", InputKind::Email),
        required("school_id", "School", InputKind::Reference),
    ];

    async fn list(api: &ApiClient) -> ApiResult<Vec<SchoolAdmin>> {
        api.schools().admins().await
    }

    async fn lookups(api: &ApiClient) -> ApiResult<Lookups> {
        let schools = api.schools().list().await?;
        let mut lookups = Lookups::new();
        lookups.insert("schools", schools.into_iter().map(|s| (s.id, s.name)).collect());
        Ok(lookups)
    }

    fn row(a: &SchoolAdmin, lookups: &Lookups) -> Vec<String> {
        let school = match (&a.school_name, a.school_id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => lookup_label(lookups, "schools", id),
            (None, None) => String::new(),
        };
        vec![a.id.to_string(), a.name.clone(), a.email.clone(), school]
    }
}

#[async_trait]
impl CreateResource for SchoolAdmins {
    type Draft = InviteAdminRequest;
    const NOUN: &'static str = "Admin invitation";

    fn draft(form: &FormState) -> Result<InviteAdminRequest, ValidationError> {
        Ok(InviteAdminRequest {
            name: form.text("name"),
            email: form.text("email"),
            school_id: form.id("school_id")?,
        })
    }

    async fn create(api: &ApiClient, draft: &InviteAdminRequest) -> ApiResult<()> {
        api.super_admin().invite_admin(draft).await.map(|_| ())
    }
}

#[async_trait]
impl UpdatableResource for SchoolAdmins {
    type Patch = UpdateAdminRequest;
    const EDIT_FIELDS: &'static [FieldSpec] = &[
        optional("name", "Full name", InputKind::Text),
        optional("email", "Email", InputKind::Email),
    ];

    fn patch(form: &FormState) -> Result<UpdateAdminRequest, ValidationError> {
        Ok(UpdateAdminRequest {
            name: form.optional_text("name"),
            email: form.optional_text("email"),
        })
    }

    async fn update(api: &ApiClient, id: i64, patch: &UpdateAdminRequest) -> ApiResult<()> {
        api.schools().update_admin(id, patch).await.map(|_| ())
    }
}

#[async_trait]
impl RemovableResource for SchoolAdmins {
    async fn remove(api: &ApiClient, id: i64) -> ApiResult<()> {
        api.schools().delete_admin(id).await
    }
}

pub struct Users;

#[async_trait]
impl Resource for Users {
    type Record = User;

    const TITLE: &'static str = "Users";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Email", "Role", "School"];

    async fn list(api: &ApiClient) -> ApiResult<Vec<User>> {
        api.dashboard().users().await
    }

    fn row(u: &User, _: &Lookups) -> Vec<String> {
        vec![
            u.id.to_string(),
            u.name.clone(),
            u.email.clone(),
            u.role.to_string(),
            school_label(u.school_id),
        ]
    }
}

// ---- school admin: people ----

pub struct Teachers;

#[async_trait]
impl Resource for Teachers {
    type Record = Teacher;

    const TITLE: &'static str = "Teachers";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Email", "Subject"];
    const FIELDS: &'static [FieldSpec] = &[
        required("name", "Full name", InputKind::Text),
        required("email", "Email", InputKind::Email),
        optional("subject", "Subject", InputKind::Text),
    ];

    async fn list(api: &ApiClient) -> ApiResult<Vec<Teacher>> {
        api.admin().teachers(&PeopleFilter::default()).await
    }

    fn row(t: &Teacher, _: &Lookups) -> Vec<String> {
        vec![t.id.to_string(), t.name.clone(), t.email.clone(), opt(&t.subject)]
    }
}

#[async_trait]
impl CreateResource for Teachers {
    type Draft = NewTeacherRequest;
    const NOUN: &'static str = "Teacher";

    fn draft(form: &FormState) -> Result<NewTeacherRequest, ValidationError> {
        Ok(NewTeacherRequest {
            name: form.text("name"),
            email: form.text("email"),
            subject: form.optional_text("subject"),
        })
    }

    async fn create(api: &ApiClient, draft: &NewTeacherRequest) -> ApiResult<()> {
        api.admin().create_teacher(draft).await.map(|_| ())
    }
}

#[async_trait]
impl UpdatableResource for Teachers {
    type Patch = UpdateTeacherRequest;
    const EDIT_FIELDS: &'static [FieldSpec] = &[
        optional("name", "Full name", InputKind::Text),
        optional("email", "Email", InputKind::Email),
        optional("subject", "Subject", InputKind::Text),
    ];

    fn patch(form: &FormState) -> Result<UpdateTeacherRequest, ValidationError> {
        Ok(UpdateTeacherRequest {
            name: form.optional_text("name"),
            email: form.optional_text("email"),
            subject: form.optional_text("subject"),
        })
    }

    async fn update(api: &ApiClient, id: i64, patch: &UpdateTeacherRequest) -> ApiResult<()> {
        api.admin().update_teacher(id, patch).await.map(|_| ())
    }
}

#[async_trait]
impl RemovableResource for Teachers {
    async fn remove(api: &ApiClient, id: i64) -> ApiResult<()> {
        api.admin().delete_teacher(id).await
    }
}

pub struct Students;

#[async_trait]
impl Resource for Students {
    type Record = Student;

    const TITLE: &'static str = "Students";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Email", "Grade"];
    const FIELDS: &'static [FieldSpec] = &[
        required("name", "Full name", InputKind::Text),
        required("email", "Email", InputKind::Email),
        optional("grade", "Grade", InputKind::Text),
        optional("parent_email", "Parent email", InputKind::Email),
    ];

    async fn list(api: &ApiClient) -> ApiResult<Vec<Student>> {
        api.admin().students(&PeopleFilter::default()).await
    }

    fn row(s: &Student, _: &Lookups) -> Vec<String> {
        vec![s.id.to_string(), s.name.clone(), s.email.clone(), opt(&s.grade)]
    }
}

#[async_trait]
impl CreateResource for Students {
    type Draft = NewStudentRequest;
    const NOUN: &'static str = "Student";

    fn draft(form: &FormState) -> Result<NewStudentRequest, ValidationError> {
        Ok(NewStudentRequest {
            name: form.text("name"),
            email: form.text("email"),
            grade: form.optional_text("grade"),
            parent_email: form.optional_text("parent_email"),
        })
    }

    async fn create(api: &ApiClient, draft: &NewStudentRequest) -> ApiResult<()> {
        api.admin().create_student(draft).await.map(|_| ())
    }
}

#[async_trait]
impl UpdatableResource for Students {
    type Patch = UpdateStudentRequest;
    const EDIT_FIELDS: &'static [FieldSpec] = &[
        optional("name", "Full name", InputKind::Text),
        optional("email", "Email", InputKind::Email),
        optional("grade", "Grade", InputKind::Text),
    ];

    fn patch(form: &FormState) -> Result<UpdateStudentRequest, ValidationError> {
        Ok(UpdateStudentRequest {
            name: form.optional_text("name"),
            email: form.optional_text("email"),
            grade: form.optional_text("grade"),
        })
    }

    async fn update(api: &ApiClient, id: i64, patch: &UpdateStudentRequest) -> ApiResult<()> {
        api.admin().update_student(id, patch).await.map(|_| ())
    }
}

#[async_trait]
impl RemovableResource for Students {
    async fn remove(api: &ApiClient, id: i64) -> ApiResult<()> {
        api.admin().delete_student(id).await
    }
}

pub struct Parents;

#[async_trait]
impl Resource for Parents {
    type Record = Parent;

    const TITLE: &'static str = "Parents";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Email"];
    const FIELDS: &'static [FieldSpec] = &[
        required("name", "Full name", InputKind::Text),
        required("email", "Email", InputKind::Email),
        optional("student_email", "Student email", InputKind::Email),
    ];

    async fn list(api: &ApiClient) -> ApiResult<Vec<Parent>> {
        api.admin().parents(&PeopleFilter::default()).await
    }

    fn row(p: &Parent, _: &Lookups) -> Vec<String> {
        vec![p.id.to_string(), p.name.clone(), p.email.clone()]
    }
}

#[async_trait]
impl CreateResource for Parents {
    type Draft = NewParentRequest;
    const NOUN: &'static str = "Parent";

    fn draft(form: &FormState) -> Result<NewParentRequest, ValidationError> {
        Ok(NewParentRequest {
            name: form.text("name"),
            email: form.text("email"),
            student_email: form.optional_text("student_email"),
        })
    }

    async fn create(api: &ApiClient, draft: &NewParentRequest) -> ApiResult<()> {
        api.admin().create_parent(draft).await.map(|_| ())
    }
}

#[async_trait]
impl UpdatableResource for Parents {
    type Patch = UpdateParentRequest;
    const EDIT_FIELDS: &'static [FieldSpec] = &[
        optional("name", "Full name", InputKind::Text),
        optional("email", "Email", InputKind::Email),
    ];

    fn patch(form: &FormState) -> Result<UpdateParentRequest, ValidationError> {
        Ok(UpdateParentRequest {
            name: form.optional_text("name"),
            email: form.optional_text("email"),
        })
    }

    async fn update(api: &ApiClient, id: i64, patch: &UpdateParentRequest) -> ApiResult<()> {
        api.admin().update_parent(id, patch).await.map(|_| ())
    }
}

#[async_trait]
impl RemovableResource for Parents {
    async fn remove(api: &ApiClient, id: i64) -> ApiResult<()> {
        api.admin().delete_parent(id).await
    }
}

/// Every student-parent link, one row per link. The link id is what
/// removal takes.
pub struct ParentLinks;

#[async_trait]
impl Resource for ParentLinks {
    type Record = StudentParentLink;

    const TITLE: &'static str = "Parent Links";
    const COLUMNS: &'static [&'static str] = &["Link ID", "Student", "Parent", "Relationship"];
    const FIELDS: &'static [FieldSpec] = &[
        required("student_id", "Student", InputKind::Reference),
        required("parent_id", "Parent", InputKind::Reference),
        optional("relationship_type", "Relationship", InputKind::Text),
    ];

    async fn list(api: &ApiClient) -> ApiResult<Vec<StudentParentLink>> {
        let admin = api.admin();
        let students = admin.students_with_parents(&PeopleFilter::default()).await?;
        let mut links = Vec::new();
        for student in students.iter().filter(|s| !s.linked_parents.is_empty()) {
            links.extend(admin.student_parents(student.id).await?);
        }
        Ok(links)
    }

    async fn lookups(api: &ApiClient) -> ApiResult<Lookups> {
        let admin = api.admin();
        let filter = PeopleFilter::default();
        let (students, parents) = tokio::try_join!(admin.students(&filter), admin.parents(&filter))?;
        let mut lookups = Lookups::new();
        lookups.insert("students", students.into_iter().map(|s| (s.id, s.name)).collect());
        lookups.insert("parents", parents.into_iter().map(|p| (p.id, p.name)).collect());
        Ok(lookups)
    }

    fn row(l: &StudentParentLink, _: &Lookups) -> Vec<String> {
        vec![
            l.id.to_string(),
            format!("{} <{}>", l.student_name, l.student_email),
            format!("{} <{}>", l.parent_name, l.parent_email),
            l.relationship_type.clone(),
        ]
    }
}

#[async_trait]
impl CreateResource for ParentLinks {
    type Draft = NewLinkRequest;
    const NOUN: &'static str = "Parent link";

    fn draft(form: &FormState) -> Result<NewLinkRequest, ValidationError> {
        Ok(NewLinkRequest {
            student_id: form.id("student_id")?,
            parent_id: form.id("parent_id")?,
            relationship_type: form
                .optional_text("relationship_type")
                .unwrap_or_else(|| DEFAULT_RELATIONSHIP.to_string()),
        })
    }

    async fn create(api: &ApiClient, draft: &NewLinkRequest) -> ApiResult<()> {
        api.admin().link_parent(draft).await.map(|_| ())
    }
}

#[async_trait]
impl RemovableResource for ParentLinks {
    async fn remove(api: &ApiClient, id: i64) -> ApiResult<()> {
        api.admin().unlink_parent(id).await
    }
}

// ---- school admin: academics ----

pub struct Subjects;

#[async_trait]
impl Resource for Subjects {
    type Record = Subject;

    const TITLE: &'static str = "Subjects";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Code"];
    const FIELDS: &'static [FieldSpec] = &[
        required("name", "Subject name", InputKind::Text),
        optional("code", "Code", InputKind::Text),
    ];

    async fn list(api: &ApiClient) -> ApiResult<Vec<Subject>> {
        api.admin().subjects().await
    }

    fn row(s: &Subject, _: &Lookups) -> Vec<String> {
        vec![s.id.to_string(), s.name.clone(), opt(&s.code)]
    }
}

#[async_trait]
impl CreateResource for Subjects {
    type Draft = NewSubjectRequest;
    const NOUN: &'static str = "Subject";

    fn draft(form: &FormState) -> Result<NewSubjectRequest, ValidationError> {
        Ok(NewSubjectRequest {
            name: form.text("name"),
            code: form.optional_text("code"),
        })
    }

    async fn create(api: &ApiClient, draft: &NewSubjectRequest) -> ApiResult<()> {
        api.admin().create_subject(draft).await.map(|_| ())
    }
}

pub struct Classes;

#[async_trait]
impl Resource for Classes {
    type Record = Class;

    const TITLE: &'static str = "Classes";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Grade", "Subject", "Teacher", "Year"];
    const FIELDS: &'static [FieldSpec] = &[
        required("name", "Class name", InputKind::Text),
        required("grade", "Grade", InputKind::Text),
        required("subject_id", "Subject", InputKind::Reference),
        required("teacher_id", "Teacher", InputKind::Reference),
        required("academic_year", "Academic year", InputKind::Text),
    ];

    async fn list(api: &ApiClient) -> ApiResult<Vec<Class>> {
        api.admin().classes().await
    }

    async fn lookups(api: &ApiClient) -> ApiResult<Lookups> {
        let admin = api.admin();
        let filter = PeopleFilter::default();
        let (teachers, subjects) = tokio::try_join!(admin.teachers(&filter), admin.subjects())?;
        let mut lookups = Lookups::new();
        lookups.insert("teachers", teachers.into_iter().map(|t| (t.id, t.name)).collect());
        lookups.insert("subjects", subjects.into_iter().map(|s| (s.id, s.name)).collect());
        Ok(lookups)
    }

    fn row(c: &Class, lookups: &Lookups) -> Vec<String> {
        vec![
            c.id.to_string(),
            c.name.clone(),
            c.grade.clone(),
            lookup_label(lookups, "subjects", c.subject_id),
            lookup_label(lookups, "teachers", c.teacher_id),
            c.academic_year.clone(),
        ]
    }
}

#[async_trait]
impl CreateResource for Classes {
    type Draft = NewClassRequest;
    const NOUN: &'static str = "Class";

    fn draft(form: &FormState) -> Result<NewClassRequest, ValidationError> {
        Ok(NewClassRequest {
            name: form.text("name"),
            grade: form.text("grade"),
            subject_id: form.id("subject_id")?,
            teacher_id: form.id("teacher_id")?,
            academic_year: form.text("academic_year"),
        })
    }

    async fn create(api: &ApiClient, draft: &NewClassRequest) -> ApiResult<()> {
        api.admin().create_class(draft).await.map(|_| ())
    }
}

#[async_trait]
impl RemovableResource for Classes {
    async fn remove(api: &ApiClient, id: i64) -> ApiResult<()> {
        api.admin().delete_class(id).await
    }
}

pub struct Timetable;

#[async_trait]
impl Resource for Timetable {
    type Record = TimetableSlot;

    const TITLE: &'static str = "Timetable";
    const COLUMNS: &'static [&'static str] = &["ID", "Day", "Start", "End", "Class", "Subject", "Teacher", "Room"];
    const FIELDS: &'static [FieldSpec] = &[
        required("class_id", "Class", InputKind::Reference),
        required("subject_id", "Subject", InputKind::Reference),
        required("teacher_id", "Teacher", InputKind::Reference),
        required("day_of_week", "Day", InputKind::Choice(WEEKDAYS)),
        required("start_time", "Start time", InputKind::Time),
        required("end_time", "End time", InputKind::Time),
        optional("room", "Room", InputKind::Text),
    ];

    async fn list(api: &ApiClient) -> ApiResult<Vec<TimetableSlot>> {
        api.admin().timetable(None).await
    }

    async fn lookups(api: &ApiClient) -> ApiResult<Lookups> {
        let admin = api.admin();
        let filter = PeopleFilter::default();
        let (classes, subjects, teachers) =
            tokio::try_join!(admin.classes(), admin.subjects(), admin.teachers(&filter))?;
        let mut lookups = Lookups::new();
        lookups.insert("classes", classes.into_iter().map(|c| (c.id, c.name)).collect());
        lookups.insert("subjects", subjects.into_iter().map(|s| (s.id, s.name)).collect());
        lookups.insert("teachers", teachers.into_iter().map(|t| (t.id, t.name)).collect());
        Ok(lookups)
    }

    fn row(s: &TimetableSlot, lookups: &Lookups) -> Vec<String> {
        slot_row(s, lookups)
    }
}

fn slot_row(s: &TimetableSlot, lookups: &Lookups) -> Vec<String> {
    vec![
        s.id.to_string(),
        s.day_of_week.clone(),
        s.start_time.clone(),
        s.end_time.clone(),
        lookup_label(lookups, "classes", s.class_id),
        lookup_label(lookups, "subjects", s.subject_id),
        lookup_label(lookups, "teachers", s.teacher_id),
        opt(&s.room),
    ]
}

#[async_trait]
impl CreateResource for Timetable {
    type Draft = NewTimetableSlotRequest;
    const NOUN: &'static str = "Timetable slot";

    fn draft(form: &FormState) -> Result<NewTimetableSlotRequest, ValidationError> {
        Ok(NewTimetableSlotRequest {
            class_id: form.id("class_id")?,
            subject_id: form.id("subject_id")?,
            teacher_id: form.id("teacher_id")?,
            day_of_week: form.text("day_of_week"),
            start_time: form.text("start_time"),
            end_time: form.text("end_time"),
            room: form.optional_text("room"),
        })
    }

    async fn create(api: &ApiClient, draft: &NewTimetableSlotRequest) -> ApiResult<()> {
        api.admin().create_timetable_slot(draft).await.map(|_| ())
    }
}

pub struct Lessons;

#[async_trait]
impl Resource for Lessons {
    type Record = Lesson;

    const TITLE: &'static str = "Lessons";
    const COLUMNS: &'static [&'static str] = &["ID", "Title", "Class", "Date", "Lectures"];

    async fn list(api: &ApiClient) -> ApiResult<Vec<Lesson>> {
        api.admin().lessons(None).await
    }

    async fn lookups(api: &ApiClient) -> ApiResult<Lookups> {
        let classes = api.admin().classes().await?;
        let mut lookups = Lookups::new();
        lookups.insert("classes", classes.into_iter().map(|c| (c.id, c.name)).collect());
        Ok(lookups)
    }

    fn row(l: &Lesson, lookups: &Lookups) -> Vec<String> {
        vec![
            l.id.to_string(),
            l.title.clone(),
            lookup_label(lookups, "classes", l.class_id),
            l.lesson_date.clone(),
            l.lectures.len().to_string(),
        ]
    }
}

// ---- school admin: calendar and announcements ----

pub struct Holidays;

#[async_trait]
impl Resource for Holidays {
    type Record = Holiday;

    const TITLE: &'static str = "Holidays";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Start", "End", "Description"];
    const FIELDS: &'static [FieldSpec] = &[
        required("name", "Holiday name", InputKind::Text),
        required("start_date", "Start date", InputKind::Date),
        required("end_date", "End date", InputKind::Date),
        optional("description", "Description", InputKind::LongText),
    ];

    async fn list(api: &ApiClient) -> ApiResult<Vec<Holiday>> {
        api.admin().holidays().await
    }

    fn row(h: &Holiday, _: &Lookups) -> Vec<String> {
        vec![
            h.id.to_string(),
            h.name.clone(),
            h.start_date.to_string(),
            h.end_date.to_string(),
            opt(&h.description),
        ]
    }
}

#[async_trait]
impl CreateResource for Holidays {
    type Draft = NewHolidayRequest;
    const NOUN: &'static str = "Holiday";

    fn draft(form: &FormState) -> Result<NewHolidayRequest, ValidationError> {
        Ok(NewHolidayRequest {
            name: form.text("name"),
            start_date: form.date("start_date")?,
            end_date: form.date("end_date")?,
            description: form.optional_text("description"),
        })
    }

    async fn create(api: &ApiClient, draft: &NewHolidayRequest) -> ApiResult<()> {
        api.admin().create_holiday(draft).await.map(|_| ())
    }
}

#[async_trait]
impl UpdatableResource for Holidays {
    type Patch = UpdateHolidayRequest;
    const EDIT_FIELDS: &'static [FieldSpec] = &[
        optional("name", "Holiday name", InputKind::Text),
        optional("start_date", "Start date", InputKind::Date),
        optional("end_date", "End date", InputKind::Date),
        optional("description", "Description", InputKind::LongText),
    ];

    fn patch(form: &FormState) -> Result<UpdateHolidayRequest, ValidationError> {
        Ok(UpdateHolidayRequest {
            name: form.optional_text("name"),
            start_date: form.optional_date("start_date")?,
            end_date: form.optional_date("end_date")?,
            description: form.optional_text("description"),
        })
    }

    async fn update(api: &ApiClient, id: i64, patch: &UpdateHolidayRequest) -> ApiResult<()> {
        api.admin().update_holiday(id, patch).await.map(|_| ())
    }
}

#[async_trait]
impl RemovableResource for Holidays {
    async fn remove(api: &ApiClient, id: i64) -> ApiResult<()> {
        api.admin().delete_holiday(id).await
    }
}

pub struct Events;

#[async_trait]
impl Resource for Events {
    type Record = Event;

    const TITLE: &'static str = "Events";
    const COLUMNS: &'static [&'static str] = &["ID", "Title", "Date", "Time", "Type", "Description"];
    const FIELDS: &'static [FieldSpec] = &[
        required("title", "Event title", InputKind::Text),
        required("event_date", "Date", InputKind::Date),
        optional("event_time", "Time", InputKind::Time),
        optional("event_type", "Type", InputKind::Text),
        optional("description", "Description", InputKind::LongText),
    ];

    async fn list(api: &ApiClient) -> ApiResult<Vec<Event>> {
        api.admin().events().await
    }

    fn row(e: &Event, _: &Lookups) -> Vec<String> {
        vec![
            e.id.to_string(),
            e.title.clone(),
            e.event_date.to_string(),
            opt(&e.event_time),
            opt(&e.event_type),
            opt(&e.description),
        ]
    }
}

#[async_trait]
impl CreateResource for Events {
    type Draft = NewEventRequest;
    const NOUN: &'static str = "Event";

    fn draft(form: &FormState) -> Result<NewEventRequest, ValidationError> {
        Ok(NewEventRequest {
            title: form.text("title"),
            description: form.optional_text("description"),
            event_date: form.date("event_date")?,
            event_time: form.optional_text("event_time"),
            event_type: form.optional_text("event_type"),
        })
    }

    async fn create(api: &ApiClient, draft: &NewEventRequest) -> ApiResult<()> {
        api.admin().create_event(draft).await.map(|_| ())
    }
}

#[async_trait]
impl UpdatableResource for Events {
    type Patch = UpdateEventRequest;
    const EDIT_FIELDS: &'static [FieldSpec] = &[
        optional("title", "Event title", InputKind::Text),
        optional("event_date", "Date", InputKind::Date),
        optional("event_time", "Time", InputKind::Time),
        optional("event_type", "Type", InputKind::Text),
        optional("description", "Description", InputKind::LongText),
    ];

    fn patch(form: &FormState) -> Result<UpdateEventRequest, ValidationError> {
        Ok(UpdateEventRequest {
            title: form.optional_text("title"),
            description: form.optional_text("description"),
            event_date: form.optional_date("event_date")?,
            event_time: form.optional_text("event_time"),
            event_type: form.optional_text("event_type"),
        })
    }

    async fn update(api: &ApiClient, id: i64, patch: &UpdateEventRequest) -> ApiResult<()> {
        api.admin().update_event(id, patch).await.map(|_| ())
    }
}

#[async_trait]
impl RemovableResource for Events {
    async fn remove(api: &ApiClient, id: i64) -> ApiResult<()> {
        api.admin().delete_event(id).await
    }
}

pub struct Announcements;

#[async_trait]
impl Resource for Announcements {
    type Record = Announcement;

    const TITLE: &'static str = "Announcements";
    const COLUMNS: &'static [&'static str] = &["ID", "Title", "Audience", "Published", "Content"];
    const FIELDS: &'static [FieldSpec] = &[
        required("title", "Title", InputKind::Text),
        required("content", "Content", InputKind::LongText),
        required("target_audience", "Audience", InputKind::Choice(TARGET_AUDIENCES)),
    ];

    async fn list(api: &ApiClient) -> ApiResult<Vec<Announcement>> {
        api.admin().announcements(None).await
    }

    fn row(a: &Announcement, _: &Lookups) -> Vec<String> {
        announcement_row(a)
    }
}

fn announcement_row(a: &Announcement) -> Vec<String> {
    vec![
        a.id.to_string(),
        a.title.clone(),
        a.target_audience.clone(),
        opt(&a.published_at),
        a.content.clone(),
    ]
}

#[async_trait]
impl CreateResource for Announcements {
    type Draft = NewAnnouncementRequest;
    const NOUN: &'static str = "Announcement";

    fn draft(form: &FormState) -> Result<NewAnnouncementRequest, ValidationError> {
        Ok(NewAnnouncementRequest {
            title: form.text("title"),
            content: form.text("content"),
            target_audience: form.text("target_audience"),
        })
    }

    async fn create(api: &ApiClient, draft: &NewAnnouncementRequest) -> ApiResult<()> {
        api.admin().create_announcement(draft).await.map(|_| ())
    }
}

#[async_trait]
impl RemovableResource for Announcements {
    async fn remove(api: &ApiClient, id: i64) -> ApiResult<()> {
        api.admin().delete_announcement(id).await
    }
}

// ---- teacher ----

pub struct TeacherClasses;

#[async_trait]
impl Resource for TeacherClasses {
    type Record = Class;

    const TITLE: &'static str = "My Classes";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Grade", "Year"];

    async fn list(api: &ApiClient) -> ApiResult<Vec<Class>> {
        api.teacher().classes().await
    }

    fn row(c: &Class, _: &Lookups) -> Vec<String> {
        vec![c.id.to_string(), c.name.clone(), c.grade.clone(), c.academic_year.clone()]
    }
}

pub struct TeacherTimetable;

#[async_trait]
impl Resource for TeacherTimetable {
    type Record = TimetableSlot;

    const TITLE: &'static str = "My Timetable";
    const COLUMNS: &'static [&'static str] = &["ID", "Day", "Start", "End", "Class", "Subject", "Teacher", "Room"];

    async fn list(api: &ApiClient) -> ApiResult<Vec<TimetableSlot>> {
        api.teacher().timetable().await
    }

    async fn lookups(api: &ApiClient) -> ApiResult<Lookups> {
        let classes = api.teacher().classes().await?;
        let mut lookups = Lookups::new();
        lookups.insert("classes", classes.into_iter().map(|c| (c.id, c.name)).collect());
        Ok(lookups)
    }

    fn row(s: &TimetableSlot, lookups: &Lookups) -> Vec<String> {
        slot_row(s, lookups)
    }
}

pub struct TeacherAnnouncements;

#[async_trait]
impl Resource for TeacherAnnouncements {
    type Record = Announcement;

    const TITLE: &'static str = "Announcements";
    const COLUMNS: &'static [&'static str] = &["ID", "Title", "Audience", "Published", "Content"];

    async fn list(api: &ApiClient) -> ApiResult<Vec<Announcement>> {
        api.teacher().announcements().await
    }

    fn row(a: &Announcement, _: &Lookups) -> Vec<String> {
        announcement_row(a)
    }
}
