//! Which screens exist for which role.
//!
//! A signed-in user maps to exactly one [`Dashboard`]; each dashboard owns a
//! fixed route table under its own mount point, so a path from one table can
//! never resolve under another role.

pub mod layout;
pub mod navigator;

use thiserror::Error;

use crate::models::{Role, User};

pub use layout::{Header, Layout, LayoutView, MenuItem, Shell, ACCESS_DENIED};
pub use navigator::{LocationHistory, Navigator};

pub const LOGIN_PATH: &str = "/login";
pub const SET_PASSWORD_PATH: &str = "/set-password";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    #[error("No dashboard is available for role {0}")]
    NoDashboard(Role),

    #[error("Role {0} requires a school assignment")]
    MissingSchool(Role),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Already signed in as {0}")]
    AlreadySignedIn(String),

    #[error("{0} is not a dashboard page")]
    NotADashboardPage(&'static str),

    #[error("No page at {0}")]
    NotFound(String),

    #[error("{0}")]
    AccessDenied(&'static str),
}

/// Every screen the application can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    // super admin
    PlatformOverview,
    Schools,
    SchoolAdmins,
    Users,
    // school admin
    SchoolOverview,
    Teachers,
    Students,
    Parents,
    ParentLinks,
    Subjects,
    Classes,
    Timetable,
    Holidays,
    Events,
    Announcements,
    Lessons,
    // teacher
    TeacherOverview,
    TeacherClasses,
    TeacherTimetable,
    TeacherAnnouncements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub label: &'static str,
    pub page: Page,
}

const fn route(path: &'static str, label: &'static str, page: Page) -> Route {
    Route { path, label, page }
}

pub const SUPER_ADMIN_ROUTES: &[Route] = &[
    route("/super-admin", "Overview", Page::PlatformOverview),
    route("/super-admin/schools", "Schools", Page::Schools),
    route("/super-admin/admins", "School Admins", Page::SchoolAdmins),
    route("/super-admin/users", "Users", Page::Users),
];

pub const SCHOOL_ADMIN_ROUTES: &[Route] = &[
    route("/admin", "Overview", Page::SchoolOverview),
    route("/admin/teachers", "Teachers", Page::Teachers),
    route("/admin/students", "Students", Page::Students),
    route("/admin/parents", "Parents", Page::Parents),
    route("/admin/parent-links", "Parent Links", Page::ParentLinks),
    route("/admin/subjects", "Subjects", Page::Subjects),
    route("/admin/classes", "Classes", Page::Classes),
    route("/admin/timetable", "Timetable", Page::Timetable),
    route("/admin/holidays", "Holidays", Page::Holidays),
    route("/admin/events", "Events", Page::Events),
    route("/admin/announcements", "Announcements", Page::Announcements),
    route("/admin/lessons", "Lessons", Page::Lessons),
];

pub const TEACHER_ROUTES: &[Route] = &[
    route("/teacher", "Overview", Page::TeacherOverview),
    route("/teacher/classes", "My Classes", Page::TeacherClasses),
    route("/teacher/timetable", "Timetable", Page::TeacherTimetable),
    route("/teacher/announcements", "Announcements", Page::TeacherAnnouncements),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dashboard {
    SuperAdmin,
    SchoolAdmin { school_id: i64 },
    Teacher { school_id: i64 },
}

impl Dashboard {
    pub fn for_user(user: &User) -> Result<Self, RoutingError> {
        match user.role {
            Role::SuperAdmin => Ok(Dashboard::SuperAdmin),
            Role::Admin => user
                .school_id
                .map(|school_id| Dashboard::SchoolAdmin { school_id })
                .ok_or(RoutingError::MissingSchool(user.role)),
            Role::Teacher => user
                .school_id
                .map(|school_id| Dashboard::Teacher { school_id })
                .ok_or(RoutingError::MissingSchool(user.role)),
            Role::Parent | Role::Student => Err(RoutingError::NoDashboard(user.role)),
        }
    }

    pub fn routes(&self) -> &'static [Route] {
        match self {
            Dashboard::SuperAdmin => SUPER_ADMIN_ROUTES,
            Dashboard::SchoolAdmin { .. } => SCHOOL_ADMIN_ROUTES,
            Dashboard::Teacher { .. } => TEACHER_ROUTES,
        }
    }

    pub fn home(&self) -> &'static str {
        self.routes()[0].path
    }

    pub fn shell(&self) -> Shell {
        match self {
            Dashboard::SuperAdmin => Shell::SuperAdmin,
            Dashboard::SchoolAdmin { .. } => Shell::SchoolAdmin,
            Dashboard::Teacher { .. } => Shell::Teacher,
        }
    }

    pub fn resolve(&self, path: &str) -> Option<Page> {
        let path = normalize(path);
        self.routes()
            .iter()
            .find(|r| r.path == path)
            .map(|r| r.page)
    }
}

/// What to show for a path given the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    SetPassword { token: Option<String> },
    Redirect(&'static str),
    Page { dashboard: Dashboard, page: Page },
    NotFound,
    NoDashboard(RoutingError),
}

/// A dashboard page that passed its shell's layout gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mounted {
    pub dashboard: Dashboard,
    pub page: Page,
    pub frame: LayoutView,
}

pub struct AppRouter;

impl AppRouter {
    pub fn route(user: Option<&User>, path: &str) -> Screen {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let path = normalize(path);

        if path == SET_PASSWORD_PATH {
            let token = query.and_then(|q| {
                q.split('&')
                    .filter_map(|kv| kv.split_once('='))
                    .find(|(k, _)| *k == "token")
                    .map(|(_, v)| v.to_string())
            });
            return Screen::SetPassword { token };
        }

        let Some(user) = user else {
            return Screen::Login;
        };
        if path == LOGIN_PATH {
            return Screen::Login;
        }

        let dashboard = match Dashboard::for_user(user) {
            Ok(d) => d,
            Err(e) => return Screen::NoDashboard(e),
        };

        if path == "/" || path == "/dashboard" {
            return Screen::Redirect(dashboard.home());
        }

        match dashboard.resolve(path) {
            Some(page) => Screen::Page { dashboard, page },
            None => Screen::NotFound,
        }
    }

    /// Routes `path`, follows a single redirect, and renders the layout gate
    /// of the resulting dashboard. Anything other than a page is an error.
    pub fn mount(user: Option<&User>, path: &str) -> Result<Mounted, RoutingError> {
        let (screen, path) = match Self::route(user, path) {
            Screen::Redirect(home) => (Self::route(user, home), home),
            other => (other, path),
        };

        match screen {
            Screen::Page { dashboard, page } => match Layout::render(dashboard.shell(), user, path) {
                LayoutView::AccessDenied { message } => Err(RoutingError::AccessDenied(message)),
                frame => Ok(Mounted {
                    dashboard,
                    page,
                    frame,
                }),
            },
            Screen::Login => match user {
                Some(user) => Err(RoutingError::AlreadySignedIn(user.email.clone())),
                None => Err(RoutingError::NotSignedIn),
            },
            Screen::SetPassword { .. } => Err(RoutingError::NotADashboardPage(SET_PASSWORD_PATH)),
            Screen::NoDashboard(e) => Err(e),
            Screen::NotFound | Screen::Redirect(_) => Err(RoutingError::NotFound(path.to_string())),
        }
    }
}

pub(crate) fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}
