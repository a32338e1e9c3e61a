//! Dashboard pages: a create form, a table, and a notice after each mutation.

pub mod form;
pub mod notify;
pub mod pages;
pub mod resource;
pub mod resources;
pub mod table;

use thiserror::Error;

use crate::error::ApiError;

pub use form::{FieldProblem, FieldSpec, FormState, InputKind, ValidationError};
pub use notify::{ConsoleNotifier, Notice, Notifier};
pub use pages::{PageContext, PageView};
pub use resource::{CreateResource, Lookups, RemovableResource, Resource, ResourceView, UpdatableResource};
pub use table::Table;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Form is invalid: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Nothing to update: fill in at least one field")]
    NothingToUpdate,

    #[error("{0} does not support this action")]
    Unsupported(&'static str),
}
