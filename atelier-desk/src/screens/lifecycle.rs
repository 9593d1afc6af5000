//! Resource screen lifecycle
//!
//! Every list screen follows the same loop: load the list (plus any
//! auxiliary reads) → open a form → validate locally → submit → reload.
//! [`Resource`] adapts one entity to that loop and [`ResourceScreen`] owns
//! the screen state.
//!
//! - Load runs the list read and the auxiliary reads concurrently. Any
//!   failure sets the banner. A failed list read keeps the previous rows; the
//!   auxiliary data is replaced by what did load, so a failed piece is empty.
//! - Submit is blocked while the form has field errors; nothing is sent.
//! - A successful mutation reloads exactly once, then closes the modal.
//! - A failed mutation keeps the modal open with the form intact.

use async_trait::async_trait;
use atelier_client::{ClientError, ClientResult};
use shared::FieldErrors;

/// A page of list rows; `total` is set when the backend reports one
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items, total: None }
    }
}

/// Auxiliary data of a screen, possibly partial
#[derive(Debug)]
pub struct AuxLoad<A> {
    pub data: A,
    pub error: Option<ClientError>,
}

impl<A: Default> Default for AuxLoad<A> {
    fn default() -> Self {
        Self {
            data: A::default(),
            error: None,
        }
    }
}

/// Adapter between one entity and the screen lifecycle
#[async_trait]
pub trait Resource: Send + Sync {
    type Summary: Clone + Send + Sync;
    type Detail: Clone + Send + Sync;
    type Form: Clone + Send + Sync;
    type Aux: Default + Send + Sync;

    /// Used in logs
    fn name(&self) -> &'static str;

    fn id_of(summary: &Self::Summary) -> i64;

    async fn list(&self) -> ClientResult<Listing<Self::Summary>>;

    /// Reads issued alongside the list (dropdown options, statistics...)
    async fn load_aux(&self) -> AuxLoad<Self::Aux> {
        AuxLoad::default()
    }

    /// Blank form for "create"
    fn new_form(&self) -> Self::Form;

    async fn fetch(&self, id: i64) -> ClientResult<Self::Detail>;

    fn to_form(&self, detail: &Self::Detail) -> Self::Form;

    /// `editing` is the record id when the form edits an existing record
    fn validate(&self, form: &Self::Form, aux: &Self::Aux, editing: Option<i64>) -> FieldErrors;

    async fn create(&self, form: &Self::Form, aux: &Self::Aux) -> ClientResult<()>;

    async fn update(&self, id: i64, form: &Self::Form, aux: &Self::Aux) -> ClientResult<()>;

    async fn delete(&self, id: i64) -> ClientResult<()>;

    fn delete_prompt(&self, _id: i64) -> String {
        "Êtes-vous sûr de vouloir supprimer cet élément ?".to_string()
    }
}

/// Yes/no question asked before destructive actions
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    pub fn editing(self) -> Option<i64> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        }
    }
}

/// Open create/edit dialog
#[derive(Debug, Clone)]
pub struct FormModal<F> {
    pub mode: FormMode,
    pub form: F,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Field errors present; nothing sent
    Blocked,
    Saved,
    /// Server or transport failure; banner set, modal kept
    Failed,
    /// No modal was open
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed,
}

/// State of one list screen
pub struct ResourceScreen<R: Resource> {
    pub resource: R,
    pub items: Vec<R::Summary>,
    pub aux: R::Aux,
    pub total: Option<u64>,
    pub loading: bool,
    /// Banner message
    pub error: Option<String>,
    pub modal: Option<FormModal<R::Form>>,
    /// Record shown in the details view
    pub detail: Option<R::Detail>,
}

impl<R: Resource> ResourceScreen<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            items: Vec::new(),
            aux: R::Aux::default(),
            total: None,
            loading: false,
            error: None,
            modal: None,
            detail: None,
        }
    }

    /// Fetch the list and the auxiliary data concurrently
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        let (listing, aux) = tokio::join!(self.resource.list(), self.resource.load_aux());

        self.aux = aux.data;
        match listing {
            Ok(listing) => {
                tracing::debug!(resource = self.resource.name(), count = listing.items.len(), "List loaded");
                self.items = listing.items;
                self.total = listing.total;
            }
            Err(e) => {
                tracing::error!(resource = self.resource.name(), error = %e, "List load failed");
                self.error = Some(e.user_message());
            }
        }
        if let Some(e) = aux.error {
            tracing::warn!(resource = self.resource.name(), error = %e, "Auxiliary load failed");
            if self.error.is_none() {
                self.error = Some(e.user_message());
            }
        }

        self.loading = false;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn find(&self, id: i64) -> Option<&R::Summary> {
        self.items.iter().find(|item| R::id_of(item) == id)
    }

    pub fn open_create(&mut self) {
        self.modal = Some(FormModal {
            mode: FormMode::Create,
            form: self.resource.new_form(),
            errors: FieldErrors::new(),
        });
    }

    /// Fetch the full record and open it for editing
    pub async fn open_edit(&mut self, id: i64) -> bool {
        match self.resource.fetch(id).await {
            Ok(detail) => {
                self.modal = Some(FormModal {
                    mode: FormMode::Edit(id),
                    form: self.resource.to_form(&detail),
                    errors: FieldErrors::new(),
                });
                true
            }
            Err(e) => {
                tracing::error!(resource = self.resource.name(), id, error = %e, "Failed to load record");
                self.error = Some(e.user_message());
                false
            }
        }
    }

    /// Fetch the full record for the details view
    pub async fn view(&mut self, id: i64) -> bool {
        match self.resource.fetch(id).await {
            Ok(detail) => {
                self.detail = Some(detail);
                true
            }
            Err(e) => {
                self.error = Some(e.user_message());
                false
            }
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Mutable access to the open form; field errors are cleared on edit
    pub fn form_mut(&mut self) -> Option<&mut R::Form> {
        self.modal.as_mut().map(|modal| {
            modal.errors = FieldErrors::new();
            &mut modal.form
        })
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.modal.as_ref().map(|modal| &modal.errors)
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let Some(modal) = self.modal.as_mut() else {
            return SubmitOutcome::Idle;
        };

        let errors = self
            .resource
            .validate(&modal.form, &self.aux, modal.mode.editing());
        if !errors.is_empty() {
            tracing::debug!(resource = self.resource.name(), errors = %errors, "Form blocked");
            modal.errors = errors;
            return SubmitOutcome::Blocked;
        }
        modal.errors = FieldErrors::new();

        let result = match modal.mode {
            FormMode::Create => self.resource.create(&modal.form, &self.aux).await,
            FormMode::Edit(id) => self.resource.update(id, &modal.form, &self.aux).await,
        };

        match result {
            Ok(()) => {
                self.load().await;
                self.modal = None;
                SubmitOutcome::Saved
            }
            Err(e) => {
                tracing::error!(resource = self.resource.name(), error = %e, "Save failed");
                self.error = Some(e.user_message());
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn delete(&mut self, id: i64, confirm: &dyn Confirm) -> DeleteOutcome {
        if !confirm.confirm(&self.resource.delete_prompt(id)) {
            return DeleteOutcome::Cancelled;
        }
        match self.resource.delete(id).await {
            Ok(()) => {
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::error!(resource = self.resource.name(), id, error = %e, "Delete failed");
                self.error = Some(e.user_message());
                DeleteOutcome::Failed
            }
        }
    }

    /// Record a failure of a resource-specific action in the banner
    pub(crate) fn report(&mut self, action: &str, error: ClientError) {
        tracing::error!(resource = self.resource.name(), action, error = %error, "Action failed");
        self.error = Some(error.user_message());
    }
}
