use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::views::ViewError;
use crate::views::form::{FieldSpec, FormState, ValidationError};
use crate::views::notify::{Notice, Notifier};
use crate::views::table::Table;

/// Related records keyed by collection name, as `(id, label)` pairs. Used
/// for select options and for showing names instead of ids.
pub type Lookups = BTreeMap<&'static str, Vec<(i64, String)>>;

pub fn lookup_label(lookups: &Lookups, collection: &str, id: i64) -> String {
    lookups
        .get(collection)
        .and_then(|items| items.iter().find(|(i, _)| *i == id))
        .map(|(_, label)| label.clone())
        .unwrap_or_else(|| id.to_string())
}

pub(crate) fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// A backend collection shown as a table.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    type Record: Clone + Send + Sync;

    const TITLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Create-form fields; empty for read-only listings.
    const FIELDS: &'static [FieldSpec] = &[];

    async fn list(api: &ApiClient) -> ApiResult<Vec<Self::Record>>;

    async fn lookups(_api: &ApiClient) -> ApiResult<Lookups> {
        Ok(Lookups::new())
    }

    fn row(record: &Self::Record, lookups: &Lookups) -> Vec<String>;
}

#[async_trait]
pub trait CreateResource: Resource {
    type Draft: Send + Sync;

    /// Used in the success notice, e.g. "Holiday created successfully".
    const NOUN: &'static str;

    fn draft(form: &FormState) -> Result<Self::Draft, ValidationError>;

    async fn create(api: &ApiClient, draft: &Self::Draft) -> ApiResult<()>;
}

/// A resource whose records can be edited in place. Only the fields the
/// user filled in are sent.
#[async_trait]
pub trait UpdatableResource: CreateResource {
    type Patch: Send + Sync;

    /// Edit-form fields; all optional.
    const EDIT_FIELDS: &'static [FieldSpec];

    fn patch(form: &FormState) -> Result<Self::Patch, ValidationError>;

    async fn update(api: &ApiClient, id: i64, patch: &Self::Patch) -> ApiResult<()>;
}

#[async_trait]
pub trait RemovableResource: Resource {
    async fn remove(api: &ApiClient, id: i64) -> ApiResult<()>;
}

/// Form plus table for one resource. Holds only a transient copy of the
/// records; every mutation is followed by a refetch.
pub struct ResourceView<R: Resource> {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    records: Vec<R::Record>,
    lookups: Lookups,
    form: FormState,
    _resource: PhantomData<R>,
}

impl<R: Resource> ResourceView<R> {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            records: Vec::new(),
            lookups: Lookups::new(),
            form: FormState::new(R::FIELDS),
            _resource: PhantomData,
        }
    }

    /// Loads the listing and its related collections concurrently.
    pub async fn mount(&mut self) -> ApiResult<()> {
        let (records, lookups) = tokio::try_join!(R::list(&self.api), R::lookups(&self.api))?;
        self.records = records;
        self.lookups = lookups;
        Ok(())
    }

    pub async fn refresh(&mut self) -> ApiResult<()> {
        self.records = R::list(&self.api).await?;
        Ok(())
    }

    pub fn records(&self) -> &[R::Record] {
        &self.records
    }

    pub fn lookups(&self) -> &Lookups {
        &self.lookups
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new(R::TITLE, R::COLUMNS);
        for record in &self.records {
            table.push(R::row(record, &self.lookups));
        }
        table
    }

    /// Logs the failure and raises the failure notice. A 401 has already
    /// sent the user to the login screen, so it gets no notice.
    fn report(&self, action: &str, err: ApiError) -> ViewError {
        if err.is_unauthorized() {
            warn!("{} {}: session expired", action, R::TITLE);
        } else {
            error!("failed to {} {}: {}", action, R::TITLE, err);
            self.notifier.alert(&Notice::Failure(err.user_message()));
        }
        ViewError::Api(err)
    }
}

impl<R: CreateResource> ResourceView<R> {
    /// Validates the form, creates the record, and reloads the listing.
    /// On failure the form keeps what the user entered.
    pub async fn submit(&mut self) -> Result<(), ViewError> {
        self.form.check_validity()?;
        let draft = R::draft(&self.form)?;

        if let Err(e) = R::create(&self.api, &draft).await {
            return Err(self.report("create", e));
        }

        info!("{} created", R::NOUN);
        self.form.reset();
        self.notifier
            .alert(&Notice::Success(format!("{} created successfully!", R::NOUN)));

        if let Err(e) = self.refresh().await {
            return Err(self.report("reload", e));
        }
        Ok(())
    }
}

impl<R: UpdatableResource> ResourceView<R> {
    pub fn edit_form(&self) -> FormState {
        FormState::new(R::EDIT_FIELDS)
    }

    /// Validates the edit form, updates record `id`, and reloads the listing.
    pub async fn update(&mut self, id: i64, form: &FormState) -> Result<(), ViewError> {
        if form.is_empty() {
            return Err(ViewError::NothingToUpdate);
        }
        form.check_validity()?;
        let patch = R::patch(form)?;

        if let Err(e) = R::update(&self.api, id, &patch).await {
            return Err(self.report("update", e));
        }

        info!("{} {} updated", R::NOUN, id);
        self.notifier
            .alert(&Notice::Success(format!("{} updated successfully!", R::NOUN)));

        if let Err(e) = self.refresh().await {
            return Err(self.report("reload", e));
        }
        Ok(())
    }
}

impl<R: RemovableResource> ResourceView<R> {
    pub async fn remove(&mut self, id: i64) -> Result<(), ViewError> {
        if let Err(e) = R::remove(&self.api, id).await {
            return Err(self.report("delete", e));
        }

        self.notifier
            .alert(&Notice::Success(format!("Deleted record {}.", id)));

        if let Err(e) = self.refresh().await {
            return Err(self.report("reload", e));
        }
        Ok(())
    }
}
