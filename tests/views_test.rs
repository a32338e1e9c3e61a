mod common;

use chrono::NaiveDate;
use common::{EXPIRED_TOKEN, admin_harness, link};
use serde_json::json;
use school_admin::models::{Holiday, Subject, Teacher};
use school_admin::routing::{LOGIN_PATH, Navigator, Page};
use school_admin::views::resources::{Classes, Holidays, ParentLinks};
use school_admin::views::{Notice, PageContext, ResourceView, ViewError, pages};

fn seed_staff(h: &common::Harness) {
    h.backend.state.teachers.lock().unwrap().push(Teacher {
        id: 3,
        name: "Ravi Kumar".to_string(),
        email: "ravi@school.test".to_string(),
        subject: Some("Maths".to_string()),
        school_id: Some(1),
    });
    h.backend.state.subjects.lock().unwrap().push(Subject {
        id: 5,
        name: "Mathematics".to_string(),
        code: Some("MATH".to_string()),
        school_id: Some(1),
    });
}

fn seed_holiday(h: &common::Harness) {
    h.backend.state.holidays.lock().unwrap().push(Holiday {
        id: 1,
        name: "Winter".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 12, 22).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
        description: None,
    });
}

#[tokio::test]
async fn test_empty_holiday_form_is_not_sent() {
    let h = admin_harness("tok-1").await;
    let mut view = ResourceView::<Holidays>::new(h.api.clone(), h.notifier.clone());

    let err = view.submit().await.expect_err("empty form must be rejected");

    match err {
        ViewError::Invalid(e) => assert_eq!(e.missing_fields(), vec!["name", "start_date", "end_date"]),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(h.backend.state.requests().is_empty());
    assert!(h.notifier.notices().is_empty());
}

#[tokio::test]
async fn test_created_holiday_appears_after_refetch() {
    let h = admin_harness("tok-1").await;
    let mut view = ResourceView::<Holidays>::new(h.api.clone(), h.notifier.clone());
    view.mount().await.expect("Failed to mount holidays");
    assert!(view.records().is_empty());

    view.form_mut()
        .set_all([
            ("name", "Winter Break"),
            ("start_date", "2025-12-22"),
            ("end_date", "2026-01-02"),
        ])
        .expect("Failed to fill form");
    view.submit().await.expect("Failed to create holiday");

    assert_eq!(view.records().len(), 1);
    assert_eq!(view.records()[0].name, "Winter Break");
    assert_eq!(
        view.records()[0].start_date,
        NaiveDate::from_ymd_opt(2025, 12, 22).unwrap()
    );
    assert!(view.form().is_empty());
    assert_eq!(
        h.notifier.notices(),
        vec![Notice::Success("Holiday created successfully!".to_string())]
    );

    let paths = h.backend.state.paths();
    assert_eq!(paths.last().map(String::as_str), Some("/admin/holidays"));
    assert_eq!(h.backend.state.requests().iter().filter(|r| r.method == "POST").count(), 1);
}

#[tokio::test]
async fn test_failed_class_create_alerts_detail_and_keeps_form() {
    let h = admin_harness("tok-1").await;
    seed_staff(&h);
    let mut view = ResourceView::<Classes>::new(h.api.clone(), h.notifier.clone());
    view.mount().await.expect("Failed to mount classes");

    view.form_mut()
        .set_all([
            ("name", "7A"),
            ("grade", "7"),
            ("subject_id", "5"),
            ("teacher_id", "99"),
            ("academic_year", "2025-2026"),
        ])
        .expect("Failed to fill form");

    let err = view.submit().await.expect_err("unknown teacher must fail");

    assert!(matches!(err, ViewError::Api(_)));
    assert_eq!(
        h.notifier.notices(),
        vec![Notice::Failure("Teacher not found".to_string())]
    );
    assert_eq!(view.form().value("name"), "7A");
    assert_eq!(view.form().value("teacher_id"), "99");
    assert!(view.records().is_empty());
}

#[tokio::test]
async fn test_mounting_classes_loads_related_collections() {
    let h = admin_harness("tok-1").await;
    seed_staff(&h);
    let mut view = ResourceView::<Classes>::new(h.api.clone(), h.notifier.clone());
    view.mount().await.expect("Failed to mount classes");

    let mut paths = h.backend.state.paths();
    paths.sort();
    assert_eq!(paths, vec!["/admin/classes", "/admin/subjects", "/admin/teachers"]);

    view.form_mut()
        .set_all([
            ("name", "7A"),
            ("grade", "7"),
            ("subject_id", "5"),
            ("teacher_id", "3"),
            ("academic_year", "2025-2026"),
        ])
        .expect("Failed to fill form");
    view.submit().await.expect("Failed to create class");

    let table = view.table();
    assert_eq!(table.column("Teacher"), vec!["Ravi Kumar"]);
    assert_eq!(table.column("Subject"), vec!["Mathematics"]);
}

#[tokio::test]
async fn test_expired_session_on_submit_gives_no_notice() {
    let h = admin_harness(EXPIRED_TOKEN).await;
    let mut view = ResourceView::<Holidays>::new(h.api.clone(), h.notifier.clone());
    view.form_mut()
        .set_all([
            ("name", "Founders Day"),
            ("start_date", "2026-03-01"),
            ("end_date", "2026-03-01"),
        ])
        .expect("Failed to fill form");

    let err = view.submit().await.expect_err("expired token must fail");

    assert!(matches!(err, ViewError::Api(ref e) if e.is_unauthorized()));
    assert!(h.notifier.notices().is_empty());
    assert_eq!(h.navigator.current(), LOGIN_PATH);
}

#[tokio::test]
async fn test_school_overview_renders_counters() {
    let h = admin_harness("tok-1").await;
    let ctx = PageContext::new(h.api.clone(), h.notifier.clone());

    let view = pages::render(Page::SchoolOverview, &ctx)
        .await
        .expect("Failed to render overview");

    assert_eq!(view.sections.len(), 2);
    assert_eq!(view.sections[0].rows[1], vec!["Students".to_string(), "40".to_string()]);
    assert_eq!(view.sections[1].rows[0], vec!["Links".to_string(), "31".to_string()]);
    assert!(view.form.is_empty());
}

#[tokio::test]
async fn test_read_only_pages_have_no_form() {
    let h = admin_harness("tok-1").await;
    let ctx = PageContext::new(h.api.clone(), h.notifier.clone());

    let err = pages::submit(Page::Users, &ctx, &[("name".to_string(), "x".to_string())])
        .await
        .expect_err("users page has no form");

    assert!(matches!(err, ViewError::Unsupported("Users")));
    assert!(pages::form_fields(Page::Lessons).is_empty());
    assert!(h.backend.state.requests().is_empty());
}

#[tokio::test]
async fn test_page_submit_rejects_unknown_field() {
    let h = admin_harness("tok-1").await;
    let ctx = PageContext::new(h.api.clone(), h.notifier.clone());

    let err = pages::submit(
        Page::Holidays,
        &ctx,
        &[("role".to_string(), "SUPER_ADMIN".to_string())],
    )
    .await
    .expect_err("unknown field must be rejected");

    assert!(matches!(err, ViewError::Invalid(_)));
    assert!(h.backend.state.requests().is_empty());
}

#[tokio::test]
async fn test_removed_holiday_disappears_after_refetch() {
    let h = admin_harness("tok-1").await;
    seed_holiday(&h);
    let mut view = ResourceView::<Holidays>::new(h.api.clone(), h.notifier.clone());
    view.mount().await.expect("Failed to mount holidays");
    assert_eq!(view.records().len(), 1);

    view.remove(1).await.expect("Failed to delete holiday");

    assert!(view.records().is_empty());
    assert_eq!(
        h.notifier.notices(),
        vec![Notice::Success("Deleted record 1.".to_string())]
    );
    let calls = h.backend.state.calls();
    assert_eq!(
        calls[calls.len() - 2..],
        ["DELETE /admin/holidays/1".to_string(), "GET /admin/holidays".to_string()]
    );
}

#[tokio::test]
async fn test_failed_remove_alerts_and_keeps_records() {
    let h = admin_harness("tok-1").await;
    seed_holiday(&h);
    let mut view = ResourceView::<Holidays>::new(h.api.clone(), h.notifier.clone());
    view.mount().await.expect("Failed to mount holidays");

    let err = view.remove(9).await.expect_err("unknown holiday must fail");

    assert!(matches!(err, ViewError::Api(ref e) if e.status() == Some(404)));
    assert_eq!(h.notifier.notices().len(), 1);
    assert!(matches!(h.notifier.notices()[0], Notice::Failure(_)));
    assert_eq!(view.records().len(), 1);
}

#[tokio::test]
async fn test_expired_session_on_remove_gives_no_notice() {
    let h = admin_harness(EXPIRED_TOKEN).await;
    seed_holiday(&h);
    let mut view = ResourceView::<Holidays>::new(h.api.clone(), h.notifier.clone());

    let err = view.remove(1).await.expect_err("expired token must fail");

    assert!(matches!(err, ViewError::Api(ref e) if e.is_unauthorized()));
    assert!(h.notifier.notices().is_empty());
    assert_eq!(h.navigator.current(), LOGIN_PATH);
    assert_eq!(h.backend.state.holidays.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_page_upload_announces_import() {
    let h = admin_harness("tok-1").await;
    let ctx = PageContext::new(h.api.clone(), h.notifier.clone());

    let res = pages::upload(Page::Teachers, &ctx, "teachers.xlsx", vec![0x50, 0x4b, 0x03, 0x04])
        .await
        .expect("Failed to upload sheet");

    assert_eq!(res.success_count, 2);
    assert_eq!(
        h.notifier.notices(),
        vec![Notice::Success("Imported teachers.xlsx".to_string())]
    );
    assert_eq!(h.backend.state.calls(), vec!["POST /admin/teachers/upload-excel"]);
}

#[tokio::test]
async fn test_page_upload_rejected_file_alerts() {
    let h = admin_harness("tok-1").await;
    let ctx = PageContext::new(h.api.clone(), h.notifier.clone());

    let err = pages::upload(Page::Teachers, &ctx, "teachers.pdf", vec![1, 2, 3])
        .await
        .expect_err("pdf must be rejected");

    assert!(matches!(err, ViewError::Api(_)));
    assert_eq!(
        h.notifier.notices(),
        vec![Notice::Failure("File must be an Excel file (.xlsx or .xls)".to_string())]
    );
    assert!(h.backend.state.requests().is_empty());
    assert!(matches!(
        pages::upload(Page::Holidays, &ctx, "h.xlsx", Vec::new()).await,
        Err(ViewError::Unsupported("Holidays"))
    ));
}

#[tokio::test]
async fn test_parent_links_list_each_link_and_unlink_by_id() {
    let h = admin_harness("tok-1").await;
    h.backend
        .state
        .links
        .lock()
        .unwrap()
        .extend([link(1, 10, 20), link(2, 10, 21), link(3, 11, 20)]);
    let mut view = ResourceView::<ParentLinks>::new(h.api.clone(), h.notifier.clone());
    view.mount().await.expect("Failed to mount parent links");

    let table = view.table();
    assert_eq!(table.column("Link ID"), vec!["1", "2", "3"]);
    assert_eq!(table.column("Parent")[1], "Parent 21 <p21@school.test>");

    view.remove(2).await.expect("Failed to unlink parent");

    assert_eq!(view.table().column("Link ID"), vec!["1", "3"]);
    assert_eq!(
        h.notifier.notices(),
        vec![Notice::Success("Deleted record 2.".to_string())]
    );
    assert!(
        h.backend
            .state
            .calls()
            .contains(&"DELETE /admin/parent-student/link/2".to_string())
    );
}

#[tokio::test]
async fn test_edited_holiday_sends_only_filled_fields() {
    let h = admin_harness("tok-1").await;
    seed_holiday(&h);
    let mut view = ResourceView::<Holidays>::new(h.api.clone(), h.notifier.clone());
    view.mount().await.expect("Failed to mount holidays");

    let mut form = view.edit_form();
    form.set("name", "Winter Break").expect("Failed to fill form");
    view.update(1, &form).await.expect("Failed to update holiday");

    assert_eq!(h.backend.state.updates(), vec![json!({ "name": "Winter Break" })]);
    assert_eq!(view.records()[0].name, "Winter Break");
    assert_eq!(
        h.notifier.notices(),
        vec![Notice::Success("Holiday updated successfully!".to_string())]
    );
    let calls = h.backend.state.calls();
    assert_eq!(
        calls[calls.len() - 2..],
        ["PUT /admin/holidays/1".to_string(), "GET /admin/holidays".to_string()]
    );
}

#[tokio::test]
async fn test_empty_or_invalid_edit_is_not_sent() {
    let h = admin_harness("tok-1").await;
    let mut view = ResourceView::<Holidays>::new(h.api.clone(), h.notifier.clone());

    let empty = view.edit_form();
    assert!(matches!(view.update(1, &empty).await, Err(ViewError::NothingToUpdate)));

    let mut bad_date = view.edit_form();
    bad_date.set("end_date", "next week").expect("Failed to fill form");
    assert!(matches!(view.update(1, &bad_date).await, Err(ViewError::Invalid(_))));

    assert!(h.backend.state.requests().is_empty());
    assert!(h.notifier.notices().is_empty());
}

#[tokio::test]
async fn test_page_edit_puts_record() {
    let h = admin_harness("tok-1").await;
    let ctx = PageContext::new(h.api.clone(), h.notifier.clone());

    pages::edit(
        Page::Teachers,
        &ctx,
        3,
        &[("email".to_string(), "ravi.k@school.test".to_string())],
    )
    .await
    .expect("Failed to edit teacher");

    assert_eq!(
        h.backend.state.calls(),
        vec!["PUT /admin/teachers/3", "GET /admin/teachers"]
    );
    assert_eq!(h.backend.state.updates(), vec![json!({ "email": "ravi.k@school.test" })]);
    assert_eq!(
        h.notifier.notices(),
        vec![Notice::Success("Teacher updated successfully!".to_string())]
    );
    assert_eq!(pages::edit_fields(Page::Teachers).len(), 3);
    assert!(pages::edit_fields(Page::Lessons).is_empty());

    let err = pages::edit(Page::Lessons, &ctx, 1, &[]).await.expect_err("lessons are read-only");
    assert!(matches!(err, ViewError::Unsupported("Lessons")));
}

#[tokio::test]
async fn test_school_details_include_its_admins() {
    let h = admin_harness("tok-1").await;
    let ctx = PageContext::new(h.api.clone(), h.notifier.clone());

    let view = pages::details(Page::Schools, &ctx, 2)
        .await
        .expect("Failed to load school");

    assert_eq!(view.sections.len(), 2);
    assert_eq!(view.sections[0].caption, "Green Valley");
    assert_eq!(view.sections[0].column("Address"), vec!["1 Hill Road"]);
    assert_eq!(view.sections[1].column("Email"), vec!["admin@school.test"]);
    let mut calls = h.backend.state.calls();
    calls.sort();
    assert_eq!(calls, vec!["GET /schools/2", "GET /schools/2/admins"]);
}

#[tokio::test]
async fn test_person_details_list_their_links() {
    let h = admin_harness("tok-1").await;
    h.backend
        .state
        .links
        .lock()
        .unwrap()
        .extend([link(1, 10, 20), link(3, 11, 20)]);
    let ctx = PageContext::new(h.api.clone(), h.notifier.clone());

    let parent = pages::details(Page::Parents, &ctx, 20)
        .await
        .expect("Failed to load parent");
    assert_eq!(parent.sections[0].column("Link ID"), vec!["1", "3"]);

    let student = pages::details(Page::Students, &ctx, 11)
        .await
        .expect("Failed to load student");
    assert_eq!(student.sections[0].column("Link ID"), vec!["3"]);

    let user = pages::details(Page::Users, &ctx, 12)
        .await
        .expect("Failed to load user");
    assert_eq!(user.sections[0].column("Role"), vec!["TEACHER"]);

    assert_eq!(
        h.backend.state.calls(),
        vec![
            "GET /admin/parents/20/students",
            "GET /admin/students/11/parents",
            "GET /dashboard/users/12",
        ]
    );
}

#[tokio::test]
async fn test_assign_student_reports_outcome() {
    let h = admin_harness("tok-1").await;
    let ctx = PageContext::new(h.api.clone(), h.notifier.clone());

    let ack = pages::assign_student(&ctx, 1, 4)
        .await
        .expect("Failed to assign student");
    assert!(ack.success);

    let err = pages::assign_student(&ctx, 1, 404)
        .await
        .expect_err("unknown student must fail");
    assert!(matches!(err, ViewError::Api(_)));

    assert_eq!(
        h.notifier.notices(),
        vec![
            Notice::Success("Student 4 added to class 1".to_string()),
            Notice::Failure("Student not found".to_string()),
        ]
    );
    assert_eq!(
        h.backend.state.calls(),
        vec!["POST /admin/classes/1/students/4", "POST /admin/classes/1/students/404"]
    );
}
