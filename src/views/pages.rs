//! Maps each routed [`Page`] to the resource or overview that renders it.

use std::sync::Arc;

use tracing::{error, info};

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Acknowledgement, ExcelUploadResponse, ParentStudentStats, PlatformStats, SchoolStats, TeacherStats,
};
use crate::routing::Page;
use crate::views::ViewError;
use crate::views::form::FieldSpec;
use crate::views::notify::{Notice, Notifier};
use crate::views::resource::{
    CreateResource, Lookups, RemovableResource, Resource, ResourceView, UpdatableResource,
};
use crate::views::resources::*;
use crate::views::table::Table;

#[derive(Clone)]
pub struct PageContext {
    pub api: ApiClient,
    pub notifier: Arc<dyn Notifier>,
}

impl PageContext {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    fn view<R: Resource>(&self) -> ResourceView<R> {
        ResourceView::new(self.api.clone(), self.notifier.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: &'static str,
    pub sections: Vec<Table>,
    /// Fields of the page's create form, if it has one.
    pub form: &'static [FieldSpec],
}

impl PageView {
    fn of<R: Resource>(view: &ResourceView<R>) -> Self {
        Self {
            title: R::TITLE,
            sections: vec![view.table()],
            form: R::FIELDS,
        }
    }
}

pub fn form_fields(page: Page) -> &'static [FieldSpec] {
    match page {
        Page::Schools => Schools::FIELDS,
        Page::SchoolAdmins => SchoolAdmins::FIELDS,
        Page::Teachers => Teachers::FIELDS,
        Page::Students => Students::FIELDS,
        Page::Parents => Parents::FIELDS,
        Page::ParentLinks => ParentLinks::FIELDS,
        Page::Subjects => Subjects::FIELDS,
        Page::Classes => Classes::FIELDS,
        Page::Timetable => Timetable::FIELDS,
        Page::Holidays => Holidays::FIELDS,
        Page::Events => Events::FIELDS,
        Page::Announcements => Announcements::FIELDS,
        Page::PlatformOverview
        | Page::Users
        | Page::SchoolOverview
        | Page::Lessons
        | Page::TeacherOverview
        | Page::TeacherClasses
        | Page::TeacherTimetable
        | Page::TeacherAnnouncements => &[],
    }
}

/// Fields of the page's edit form; empty when records cannot be edited.
pub fn edit_fields(page: Page) -> &'static [FieldSpec] {
    match page {
        Page::Schools => Schools::EDIT_FIELDS,
        Page::SchoolAdmins => SchoolAdmins::EDIT_FIELDS,
        Page::Teachers => Teachers::EDIT_FIELDS,
        Page::Students => Students::EDIT_FIELDS,
        Page::Parents => Parents::EDIT_FIELDS,
        Page::Holidays => Holidays::EDIT_FIELDS,
        Page::Events => Events::EDIT_FIELDS,
        _ => &[],
    }
}

async fn listing<R: Resource>(ctx: &PageContext) -> Result<PageView, ViewError> {
    let mut view = ctx.view::<R>();
    if let Err(e) = view.mount().await {
        error!("failed to load {}: {}", R::TITLE, e);
        return Err(e.into());
    }
    Ok(PageView::of(&view))
}

async fn create<R: CreateResource>(ctx: &PageContext, values: &[(String, String)]) -> Result<PageView, ViewError> {
    let mut view = ctx.view::<R>();
    view.form_mut()
        .set_all(values.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
    view.submit().await?;
    Ok(PageView::of(&view))
}

async fn patch<R: UpdatableResource>(
    ctx: &PageContext,
    id: i64,
    values: &[(String, String)],
) -> Result<PageView, ViewError> {
    let mut view = ctx.view::<R>();
    let mut form = view.edit_form();
    form.set_all(values.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
    view.update(id, &form).await?;
    Ok(PageView::of(&view))
}

async fn delete<R: RemovableResource>(ctx: &PageContext, id: i64) -> Result<PageView, ViewError> {
    let mut view = ctx.view::<R>();
    view.remove(id).await?;
    Ok(PageView::of(&view))
}

fn records_table<R: Resource>(caption: impl Into<String>, records: &[R::Record]) -> Table {
    let lookups = Lookups::new();
    let mut table = Table::new(caption, R::COLUMNS);
    for record in records {
        table.push(R::row(record, &lookups));
    }
    table
}

fn platform_table(s: &PlatformStats) -> Table {
    Table::key_values(
        "Platform",
        &[
            ("Schools", s.total_schools.to_string()),
            ("School admins", s.total_admins.to_string()),
            ("Teachers", s.total_teachers.to_string()),
            ("Students", s.total_students.to_string()),
            ("Parents", s.total_parents.to_string()),
        ],
    )
}

fn school_table(s: &SchoolStats) -> Table {
    Table::key_values(
        "School",
        &[
            ("Teachers", s.total_teachers.to_string()),
            ("Students", s.total_students.to_string()),
            ("Parents", s.total_parents.to_string()),
            ("Classes", s.total_classes.to_string()),
            ("Lessons", s.total_lessons.to_string()),
            ("Classes today", s.todays_classes.to_string()),
            ("Upcoming holidays", s.upcoming_holidays.to_string()),
            ("Upcoming events", s.upcoming_events.to_string()),
        ],
    )
}

fn links_table(s: &ParentStudentStats) -> Table {
    Table::key_values(
        "Parent links",
        &[
            ("Links", s.total_links.to_string()),
            ("Students without a parent", s.unlinked_students.to_string()),
            ("Parents without a student", s.unlinked_parents.to_string()),
        ],
    )
}

fn teacher_table(s: &TeacherStats) -> Table {
    Table::key_values(
        "My teaching",
        &[
            ("Classes", s.total_classes.to_string()),
            ("Students", s.total_students.to_string()),
            ("Classes today", s.todays_classes.to_string()),
            ("Lessons", s.total_lessons.to_string()),
        ],
    )
}

fn overview(title: &'static str, sections: Vec<Table>) -> PageView {
    PageView {
        title,
        sections,
        form: &[],
    }
}

/// Loads everything the page shows.
pub async fn render(page: Page, ctx: &PageContext) -> Result<PageView, ViewError> {
    match page {
        Page::PlatformOverview => {
            let stats = ctx.api.dashboard().stats().await?;
            Ok(overview("Overview", vec![platform_table(&stats)]))
        }
        Page::SchoolOverview => {
            let admin = ctx.api.admin();
            let (stats, links) = tokio::try_join!(admin.stats(), admin.parent_student_stats())?;
            Ok(overview("Overview", vec![school_table(&stats), links_table(&links)]))
        }
        Page::TeacherOverview => {
            let stats = ctx.api.teacher().stats().await?;
            Ok(overview("Overview", vec![teacher_table(&stats)]))
        }
        Page::Schools => listing::<Schools>(ctx).await,
        Page::SchoolAdmins => listing::<SchoolAdmins>(ctx).await,
        Page::Users => listing::<Users>(ctx).await,
        Page::Teachers => listing::<Teachers>(ctx).await,
        Page::Students => listing::<Students>(ctx).await,
        Page::Parents => listing::<Parents>(ctx).await,
        Page::ParentLinks => listing::<ParentLinks>(ctx).await,
        Page::Subjects => listing::<Subjects>(ctx).await,
        Page::Classes => listing::<Classes>(ctx).await,
        Page::Timetable => listing::<Timetable>(ctx).await,
        Page::Holidays => listing::<Holidays>(ctx).await,
        Page::Events => listing::<Events>(ctx).await,
        Page::Announcements => listing::<Announcements>(ctx).await,
        Page::Lessons => listing::<Lessons>(ctx).await,
        Page::TeacherClasses => listing::<TeacherClasses>(ctx).await,
        Page::TeacherTimetable => listing::<TeacherTimetable>(ctx).await,
        Page::TeacherAnnouncements => listing::<TeacherAnnouncements>(ctx).await,
    }
}

/// Fills the page's create form with `values` and submits it.
pub async fn submit(page: Page, ctx: &PageContext, values: &[(String, String)]) -> Result<PageView, ViewError> {
    match page {
        Page::Schools => create::<Schools>(ctx, values).await,
        Page::SchoolAdmins => create::<SchoolAdmins>(ctx, values).await,
        Page::Teachers => create::<Teachers>(ctx, values).await,
        Page::Students => create::<Students>(ctx, values).await,
        Page::Parents => create::<Parents>(ctx, values).await,
        Page::ParentLinks => create::<ParentLinks>(ctx, values).await,
        Page::Subjects => create::<Subjects>(ctx, values).await,
        Page::Classes => create::<Classes>(ctx, values).await,
        Page::Timetable => create::<Timetable>(ctx, values).await,
        Page::Holidays => create::<Holidays>(ctx, values).await,
        Page::Events => create::<Events>(ctx, values).await,
        Page::Announcements => create::<Announcements>(ctx, values).await,
        Page::PlatformOverview
        | Page::Users
        | Page::SchoolOverview
        | Page::Lessons
        | Page::TeacherOverview
        | Page::TeacherClasses
        | Page::TeacherTimetable
        | Page::TeacherAnnouncements => Err(ViewError::Unsupported(page_name(page))),
    }
}

/// Applies `values` as a partial update of record `id`.
pub async fn edit(
    page: Page,
    ctx: &PageContext,
    id: i64,
    values: &[(String, String)],
) -> Result<PageView, ViewError> {
    match page {
        Page::Schools => patch::<Schools>(ctx, id, values).await,
        Page::SchoolAdmins => patch::<SchoolAdmins>(ctx, id, values).await,
        Page::Teachers => patch::<Teachers>(ctx, id, values).await,
        Page::Students => patch::<Students>(ctx, id, values).await,
        Page::Parents => patch::<Parents>(ctx, id, values).await,
        Page::Holidays => patch::<Holidays>(ctx, id, values).await,
        Page::Events => patch::<Events>(ctx, id, values).await,
        _ => Err(ViewError::Unsupported(page_name(page))),
    }
}

async fn school_details(ctx: &PageContext, id: i64) -> ApiResult<PageView> {
    let schools = ctx.api.schools();
    let (school, admins) = tokio::try_join!(schools.get(id), schools.admins_of(id))?;
    let caption = school.name.clone();
    Ok(overview(
        Schools::TITLE,
        vec![
            records_table::<Schools>(caption, &[school]),
            records_table::<SchoolAdmins>(SchoolAdmins::TITLE, &admins),
        ],
    ))
}

async fn user_details(ctx: &PageContext, id: i64) -> ApiResult<PageView> {
    let user = ctx.api.dashboard().user(id).await?;
    let caption = user.email.clone();
    Ok(overview(Users::TITLE, vec![records_table::<Users>(caption, &[user])]))
}

async fn student_details(ctx: &PageContext, id: i64) -> ApiResult<PageView> {
    let links = ctx.api.admin().student_parents(id).await?;
    Ok(overview(
        Students::TITLE,
        vec![records_table::<ParentLinks>(format!("Parents of student {}", id), &links)],
    ))
}

async fn parent_details(ctx: &PageContext, id: i64) -> ApiResult<PageView> {
    let links = ctx.api.admin().parent_students(id).await?;
    Ok(overview(
        Parents::TITLE,
        vec![records_table::<ParentLinks>(format!("Children of parent {}", id), &links)],
    ))
}

/// One record together with the records attached to it.
pub async fn details(page: Page, ctx: &PageContext, id: i64) -> Result<PageView, ViewError> {
    let result = match page {
        Page::Schools => school_details(ctx, id).await,
        Page::Users => user_details(ctx, id).await,
        Page::Students => student_details(ctx, id).await,
        Page::Parents => parent_details(ctx, id).await,
        _ => return Err(ViewError::Unsupported(page_name(page))),
    };
    result.map_err(|e| {
        error!("failed to load {} {}: {}", page_name(page), id, e);
        ViewError::from(e)
    })
}

/// Enrols a student in a class.
pub async fn assign_student(
    ctx: &PageContext,
    class_id: i64,
    student_id: i64,
) -> Result<Acknowledgement, ViewError> {
    match ctx.api.admin().assign_student(class_id, student_id).await {
        Ok(ack) => {
            info!("student {} assigned to class {}", student_id, class_id);
            let message = if ack.message.is_empty() {
                format!("Student {} assigned to class {}.", student_id, class_id)
            } else {
                ack.message.clone()
            };
            ctx.notifier.alert(&Notice::Success(message));
            Ok(ack)
        }
        Err(e) => Err(report_failure(ctx, "assign", e)),
    }
}

pub async fn remove(page: Page, ctx: &PageContext, id: i64) -> Result<PageView, ViewError> {
    match page {
        Page::Schools => delete::<Schools>(ctx, id).await,
        Page::SchoolAdmins => delete::<SchoolAdmins>(ctx, id).await,
        Page::Teachers => delete::<Teachers>(ctx, id).await,
        Page::Students => delete::<Students>(ctx, id).await,
        Page::Parents => delete::<Parents>(ctx, id).await,
        Page::ParentLinks => delete::<ParentLinks>(ctx, id).await,
        Page::Classes => delete::<Classes>(ctx, id).await,
        Page::Holidays => delete::<Holidays>(ctx, id).await,
        Page::Events => delete::<Events>(ctx, id).await,
        Page::Announcements => delete::<Announcements>(ctx, id).await,
        _ => Err(ViewError::Unsupported(page_name(page))),
    }
}

/// Bulk import from a spreadsheet, for the pages that accept one.
pub async fn upload(
    page: Page,
    ctx: &PageContext,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<ExcelUploadResponse, ViewError> {
    let admin = ctx.api.admin();
    let result = match page {
        Page::Teachers => admin.upload_teachers(file_name, bytes).await,
        Page::Students => admin.upload_students(file_name, bytes).await,
        Page::Parents => admin.upload_parents(file_name, bytes).await,
        Page::ParentLinks => admin.upload_students_with_parents(file_name, bytes).await,
        _ => return Err(ViewError::Unsupported(page_name(page))),
    };

    match result {
        Ok(res) => {
            info!(
                "{} import: {} ok, {} failed",
                page_name(page),
                res.success_count,
                res.failed_count
            );
            let message = if res.failed_count > 0 {
                format!("{} ({} rows failed)", res.message, res.failed_count)
            } else {
                res.message.clone()
            };
            ctx.notifier.alert(&Notice::Success(message));
            Ok(res)
        }
        Err(e) => Err(report_failure(ctx, "upload", e)),
    }
}

fn report_failure(ctx: &PageContext, action: &str, err: ApiError) -> ViewError {
    if !err.is_unauthorized() {
        error!("{} failed: {}", action, err);
        ctx.notifier.alert(&Notice::Failure(err.user_message()));
    }
    ViewError::Api(err)
}

fn page_name(page: Page) -> &'static str {
    match page {
        Page::PlatformOverview | Page::SchoolOverview | Page::TeacherOverview => "Overview",
        Page::Schools => Schools::TITLE,
        Page::SchoolAdmins => SchoolAdmins::TITLE,
        Page::Users => Users::TITLE,
        Page::Teachers => Teachers::TITLE,
        Page::Students => Students::TITLE,
        Page::Parents => Parents::TITLE,
        Page::ParentLinks => ParentLinks::TITLE,
        Page::Subjects => Subjects::TITLE,
        Page::Classes => Classes::TITLE,
        Page::Timetable => Timetable::TITLE,
        Page::Holidays => Holidays::TITLE,
        Page::Events => Events::TITLE,
        Page::Announcements => Announcements::TITLE,
        Page::Lessons => Lessons::TITLE,
        Page::TeacherClasses => TeacherClasses::TITLE,
        Page::TeacherTimetable => TeacherTimetable::TITLE,
        Page::TeacherAnnouncements => TeacherAnnouncements::TITLE,
    }
}
