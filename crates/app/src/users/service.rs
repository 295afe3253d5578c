//! Users service: the admin user table.

use sphere_core::{
    error::{FormError, GatewayError},
    form::{FormFlow, FormState},
    store::{RemoteCollectionStore, Sort, SortDirection},
};

use super::{
    models::{PasswordReset, User, UserId},
    repository::UsersRepository,
};

#[derive(Debug)]
pub struct UsersService<R: UsersRepository> {
    repository: R,
    store: RemoteCollectionStore<User>,
    reset_form: FormFlow<PasswordReset>,
}

impl<R: UsersRepository> UsersService<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        let mut store = RemoteCollectionStore::new();
        store.declare_filter("username", |u: &User| u.username.clone());

        Self {
            repository,
            store,
            reset_form: FormFlow::new(),
        }
    }

    /// Fetch all accounts, replacing local state wholesale.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the local list is left empty.
    pub async fn load(&mut self) -> Result<(), GatewayError> {
        let fetched = self.repository.list().await;
        self.store.ingest(fetched)
    }

    /// All accounts in fetch order.
    pub fn users(&self) -> &[User] {
        self.store.items()
    }

    /// The filtered, sorted projection.
    pub fn view(&self) -> Vec<&User> {
        self.store.view()
    }

    /// Search by username substring.
    pub fn search(&mut self, term: impl Into<String>) {
        self.store.set_filter("username", term);
    }

    /// Toggle the merit-points ordering on the current view.
    pub fn sort_by_merit_points(&mut self, enabled: bool) {
        if enabled {
            self.store.set_sort(Sort::new(
                |a: &User, b: &User| a.merit_points.cmp(&b.merit_points),
                SortDirection::Descending,
            ));
        } else {
            self.store.clear_sort();
        }
    }

    /// Suspend an account; the local row flips inactive on success.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; local state is untouched.
    pub async fn suspend(&mut self, id: UserId) -> Result<(), GatewayError> {
        self.repository.suspend(id).await?;
        self.set_active(id, false);
        Ok(())
    }

    /// Reactivate an account; the local row flips active on success.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; local state is untouched.
    pub async fn activate(&mut self, id: UserId) -> Result<(), GatewayError> {
        self.repository.activate(id).await?;
        self.set_active(id, true);
        Ok(())
    }

    fn set_active(&mut self, id: UserId, is_active: bool) {
        if let Some(mut user) = self.store.get(id).cloned() {
            user.is_active = is_active;
            self.store.apply_update(user);
        }
    }

    /// Remove an account; the local row disappears only on success.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; local state is untouched.
    pub async fn delete(&mut self, id: UserId) -> Result<(), GatewayError> {
        self.repository.delete(id).await?;
        self.store.remove(id);
        Ok(())
    }

    /// The password-reset draft for the selected user.
    pub fn reset_draft(&self) -> &PasswordReset {
        self.reset_form.draft()
    }

    /// State of the password-reset form.
    pub fn reset_form_state(&self) -> FormState {
        self.reset_form.state()
    }

    /// Mutate the password-reset draft.
    pub fn edit_reset_draft(&mut self, mutate: impl FnOnce(&mut PasswordReset)) {
        self.reset_form.update(mutate);
    }

    /// Submit the password reset for `id`.
    ///
    /// # Errors
    ///
    /// Validation failures send nothing; gateway failures preserve the
    /// draft for another attempt.
    pub async fn reset_password(&mut self, id: UserId) -> Result<(), FormError> {
        let target = ResetTarget {
            repository: &self.repository,
            id,
        };
        self.reset_form.submit(&target).await
    }
}

struct ResetTarget<'a, R> {
    repository: &'a R,
    id: UserId,
}

#[async_trait::async_trait]
impl<R: UsersRepository> sphere_core::form::SubmitTarget<PasswordReset, ()>
    for ResetTarget<'_, R>
{
    async fn submit(&self, draft: PasswordReset) -> Result<(), GatewayError> {
        self.repository.reset_password(self.id, draft).await
    }
}
