//! Frame around every dashboard page: header plus sidebar.
//!
//! The layout is also the client-side gate. A shell renders only for the
//! role it belongs to; anyone else gets the access-denied view no matter
//! which path they asked for.

use crate::models::{Role, User};
use crate::routing::{normalize, Route, SCHOOL_ADMIN_ROUTES, SUPER_ADMIN_ROUTES, TEACHER_ROUTES};
use crate::session::RoleFlags;

pub const ACCESS_DENIED: &str = "Access denied. You do not have permission to view this page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    SuperAdmin,
    SchoolAdmin,
    Teacher,
}

impl Shell {
    pub fn title(&self) -> &'static str {
        match self {
            Shell::SuperAdmin => "Super Admin Dashboard",
            Shell::SchoolAdmin => "School Admin Dashboard",
            Shell::Teacher => "Teacher Dashboard",
        }
    }

    fn menu(&self) -> &'static [Route] {
        match self {
            Shell::SuperAdmin => SUPER_ADMIN_ROUTES,
            Shell::SchoolAdmin => SCHOOL_ADMIN_ROUTES,
            Shell::Teacher => TEACHER_ROUTES,
        }
    }

    fn permits(&self, flags: RoleFlags) -> bool {
        match self {
            Shell::SuperAdmin => flags.is_super_admin,
            Shell::SchoolAdmin => flags.is_admin,
            Shell::Teacher => flags.is_teacher,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: &'static str,
    pub user_name: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutView {
    AccessDenied { message: &'static str },
    Frame { header: Header, sidebar: Vec<MenuItem> },
}

impl LayoutView {
    pub fn is_denied(&self) -> bool {
        matches!(self, LayoutView::AccessDenied { .. })
    }
}

pub struct Layout;

impl Layout {
    pub fn render(shell: Shell, user: Option<&User>, current_path: &str) -> LayoutView {
        let flags = RoleFlags::for_user(user);
        let user = match user {
            Some(u) if shell.permits(flags) => u,
            _ => {
                return LayoutView::AccessDenied {
                    message: ACCESS_DENIED,
                };
            }
        };

        let current_path = normalize(
            current_path
                .split_once('?')
                .map_or(current_path, |(path, _)| path),
        );
        let sidebar = shell
            .menu()
            .iter()
            .map(|r| MenuItem {
                label: r.label,
                path: r.path,
                active: r.path == current_path,
            })
            .collect();

        let user_name = if user.name.is_empty() {
            user.email.clone()
        } else {
            user.name.clone()
        };

        LayoutView::Frame {
            header: Header {
                title: shell.title(),
                user_name,
                role: user.role,
            },
            sidebar,
        }
    }
}
