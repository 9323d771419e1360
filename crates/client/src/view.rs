//! State and actions of one entity management screen.

use std::collections::BTreeMap;

use bizdesk_core::types::DbId;

use crate::api::{ApiClient, Choice};
use crate::error::ClientError;
use crate::form::FormModel;

/// What a management screen for `R` renders: the current rows, the form,
/// which row (if any) is being edited, the error banner and, for purchases
/// and sales, the options of their selection inputs.
///
/// Every action talks to the server and then refetches; nothing is updated
/// optimistically. A failed action replaces the error banner, a successful
/// one leaves it alone.
#[derive(Debug)]
pub struct EntityView<R: FormModel> {
    api: ApiClient,
    rows: Vec<R>,
    form: R::Form,
    editing_id: Option<DbId>,
    error: String,
    choices: BTreeMap<&'static str, Vec<Choice>>,
}

impl<R: FormModel> EntityView<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            rows: Vec::new(),
            form: R::Form::default(),
            editing_id: None,
            error: String::new(),
            choices: BTreeMap::new(),
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn form(&self) -> &R::Form {
        &self.form
    }

    /// The form as the inputs write into it.
    pub fn form_mut(&mut self) -> &mut R::Form {
        &mut self.form
    }

    pub fn editing_id(&self) -> Option<DbId> {
        self.editing_id
    }

    /// Current banner text; empty when there is nothing to show.
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Options loaded for one of [`FormModel::REFERENCES`].
    pub fn choices(&self, collection: &str) -> &[Choice] {
        self.choices.get(collection).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Load the rows and every referenced collection.
    pub async fn mount(&mut self) {
        self.refresh().await;
        for &collection in R::REFERENCES {
            match self.api.choices(collection).await {
                Ok(choices) => {
                    self.choices.insert(collection, choices);
                }
                Err(e) => self.fail(format!("Failed to fetch {collection}"), &e),
            }
        }
    }

    /// Refetch the row list.
    pub async fn refresh(&mut self) {
        match self.api.list::<R>().await {
            Ok(rows) => self.rows = rows,
            Err(e) => self.fail(format!("Failed to fetch {}", R::COLLECTION), &e),
        }
    }

    /// Save the form: a PUT when a row is being edited, otherwise a POST.
    ///
    /// On success the list is refetched and the form and editing identity
    /// are reset. On failure both are kept so the user can correct them.
    pub async fn submit(&mut self) {
        let result = match self.editing_id {
            Some(id) => self.api.update::<R>(id, &self.form).await.map(drop),
            None => self.api.create::<R>(&self.form).await.map(drop),
        };

        match result {
            Ok(()) => {
                self.refresh().await;
                self.reset_form();
            }
            Err(e) => self.fail(format!("Failed to save {}", R::NOUN), &e),
        }
    }

    /// Start editing `row`: copy its writable fields into the form.
    pub fn edit(&mut self, row: &R) {
        self.form = row.to_form();
        self.editing_id = Some(row.id());
    }

    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    /// Delete the row with this identity, then refetch.
    pub async fn delete(&mut self, id: DbId) {
        match self.api.delete::<R>(id).await {
            Ok(_) => self.refresh().await,
            Err(e) => self.fail(format!("Failed to delete {}", R::NOUN), &e),
        }
    }

    fn reset_form(&mut self) {
        self.form = R::Form::default();
        self.editing_id = None;
    }

    fn fail(&mut self, action: String, err: &ClientError) {
        tracing::warn!(error = %err, "{action}");
        self.error = format!("{action}: {}", err.detail());
    }
}
