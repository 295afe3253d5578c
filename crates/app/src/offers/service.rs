//! Offers service.

use sphere_core::{
    editor::{CommitOutcome, OptimisticEditor, RowState},
    error::{EditError, FormError, GatewayError},
    form::{FormFlow, FormState},
    store::RemoteCollectionStore,
};
use thiserror::Error;

use super::{
    models::{NewOffer, NewOfferBooking, Offer, OfferId},
    repository::OffersRepository,
};

/// Failures specific to offer booking.
#[derive(Debug, Error)]
pub enum OffersServiceError {
    /// Booking was requested for an unknown offer id.
    #[error("offer not found")]
    NotFound,

    /// The offer has no slots left; no request was issued.
    #[error("offer is sold out")]
    SoldOut,

    /// The booking reached the backend and failed there.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug)]
pub struct OffersService<R: OffersRepository> {
    repository: R,
    store: RemoteCollectionStore<Offer>,
    editor: OptimisticEditor<Offer>,
    create_form: FormFlow<NewOffer>,
}

impl<R: OffersRepository> OffersService<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        let mut store = RemoteCollectionStore::new();
        store.declare_filter("name", |o: &Offer| o.offer_name.clone());
        store.declare_exact_filter("id", |o: &Offer| o.id.to_string());

        Self {
            repository,
            store,
            editor: OptimisticEditor::new(),
            create_form: FormFlow::new(),
        }
    }

    /// Fetch all offers, replacing local state wholesale.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the local list is left empty.
    pub async fn load(&mut self) -> Result<(), GatewayError> {
        self.store.load(&self.repository).await
    }

    /// All offers in fetch order.
    pub fn offers(&self) -> &[Offer] {
        self.store.items()
    }

    /// The filtered projection.
    pub fn view(&self) -> Vec<&Offer> {
        self.store.view()
    }

    /// Search by offer name substring.
    pub fn search(&mut self, term: impl Into<String>) {
        self.store.set_filter("name", term);
    }

    /// Admin lookup by exact id.
    pub fn filter_id(&mut self, id: impl Into<String>) {
        self.store.set_filter("id", id);
    }

    /// Book one slot of an offer.
    ///
    /// Sold-out offers never produce a request: the check is cheap locally
    /// and the action would be disabled in any front-end. On success the
    /// local slot count is decremented.
    ///
    /// # Errors
    ///
    /// [`OffersServiceError::SoldOut`] locally, or the gateway failure.
    pub async fn book(&mut self, id: OfferId) -> Result<(), OffersServiceError> {
        let offer = self.store.get(id).ok_or(OffersServiceError::NotFound)?;
        if !offer.bookable() {
            return Err(OffersServiceError::SoldOut);
        }

        self.repository
            .book(NewOfferBooking { offer_id: id })
            .await?;

        let mut booked = self
            .store
            .get(id)
            .cloned()
            .ok_or(OffersServiceError::NotFound)?;
        booked.slots_limit -= 1;
        self.store.apply_update(booked);

        Ok(())
    }

    /// Edit state of one admin row.
    pub fn row_state(&self, id: OfferId) -> RowState {
        self.editor.row_state(id)
    }

    /// Mark a row editable.
    pub fn begin_edit(&mut self, id: OfferId) -> bool {
        self.editor.begin_edit(&self.store, id)
    }

    /// Stage a field-level change on an editable row.
    ///
    /// # Errors
    ///
    /// See [`OptimisticEditor::stage`].
    pub fn stage(
        &mut self,
        id: OfferId,
        mutate: impl FnOnce(&mut Offer),
    ) -> Result<(), EditError> {
        self.editor.stage(&mut self.store, id, mutate)
    }

    /// Persist a staged row.
    ///
    /// # Errors
    ///
    /// See [`OptimisticEditor::commit`].
    pub async fn commit(&mut self, id: OfferId) -> Result<CommitOutcome, EditError> {
        self.editor
            .commit(&mut self.store, &self.repository, id)
            .await
    }

    /// Delete an offer remotely, then locally on success.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; local state is untouched.
    pub async fn delete(&mut self, id: OfferId) -> Result<(), GatewayError> {
        self.editor
            .delete(&mut self.store, &self.repository, id)
            .await
    }

    /// The "add offer" draft.
    pub fn draft(&self) -> &NewOffer {
        self.create_form.draft()
    }

    /// State of the "add offer" form.
    pub fn form_state(&self) -> FormState {
        self.create_form.state()
    }

    /// Mutate the "add offer" draft.
    pub fn edit_draft(&mut self, mutate: impl FnOnce(&mut NewOffer)) {
        self.create_form.update(mutate);
    }

    /// Submit the draft; on success the draft resets and the list reloads.
    ///
    /// # Errors
    ///
    /// Returns the submission failure; the draft is preserved.
    pub async fn create(&mut self) -> Result<Offer, FormError> {
        let created = self.create_form.submit(&self.repository).await?;
        self.load().await.ok();
        Ok(created)
    }
}
