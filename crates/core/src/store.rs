//! Locally cached remote collection with derived projections.

use std::cmp::Ordering;

use crate::{entity::Entity, error::GatewayError, gateway::CollectionGateway};

/// How multiple active filters combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Every active filter must match. The default.
    #[default]
    Intersect,

    /// Only the last-declared filter with a non-empty query applies; the
    /// others are ignored while it is active.
    LastWins,
}

/// How a text filter compares its query against a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Case-insensitive substring containment.
    Substring,

    /// Exact, case-sensitive equality. Used for id lookups.
    Exact,
}

/// Sort direction for a collection projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// An ordering applied to the *filtered* view of a collection.
#[derive(Debug, Clone, Copy)]
pub struct Sort<T> {
    compare: fn(&T, &T) -> Ordering,
    direction: SortDirection,
}

impl<T> Sort<T> {
    /// Sort by the given comparison in the given direction.
    pub fn new(compare: fn(&T, &T) -> Ordering, direction: SortDirection) -> Self {
        Self { compare, direction }
    }

    fn ordering(&self, a: &T, b: &T) -> Ordering {
        let ord = (self.compare)(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

#[derive(Debug)]
struct TextFilter<T> {
    name: &'static str,
    kind: MatchKind,
    extract: fn(&T) -> String,
    query: String,
}

impl<T> TextFilter<T> {
    fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    fn matches(&self, record: &T) -> bool {
        let haystack = (self.extract)(record);
        match self.kind {
            MatchKind::Substring => haystack
                .to_lowercase()
                .contains(&self.query.to_lowercase()),
            MatchKind::Exact => haystack == self.query,
        }
    }
}

/// The authoritative local copy of one remote collection.
///
/// `load` replaces the contents wholesale; the base order is the fetch
/// order and nothing in this type ever reorders it. Filtering and sorting
/// produce a derived [`view`](Self::view) computed on access, so a sort
/// survives later filter changes without being re-applied by the caller.
#[derive(Debug)]
pub struct RemoteCollectionStore<T: Entity> {
    items: Vec<T>,
    filters: Vec<TextFilter<T>>,
    mode: FilterMode,
    sort: Option<Sort<T>>,
}

impl<T: Entity> Default for RemoteCollectionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> RemoteCollectionStore<T> {
    /// An empty store with intersecting filters.
    pub fn new() -> Self {
        Self::with_filter_mode(FilterMode::default())
    }

    /// An empty store with the given filter combination mode.
    pub fn with_filter_mode(mode: FilterMode) -> Self {
        Self {
            items: Vec::new(),
            filters: Vec::new(),
            mode,
            sort: None,
        }
    }

    /// Fetch the full collection and replace local state wholesale.
    ///
    /// There is no incremental merge: the view reflects last-fetch-consistent
    /// data. A failed load leaves the collection empty; it is not retried.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure after clearing the collection.
    pub async fn load(
        &mut self,
        gateway: &(dyn CollectionGateway<T> + '_),
    ) -> Result<(), GatewayError> {
        let fetched = gateway.list().await;
        self.ingest(fetched)
    }

    /// Replace the collection from an already-completed fetch.
    ///
    /// This is the primitive [`load`](Self::load) is built on; resources
    /// whose endpoints do not fit [`CollectionGateway`] call it directly
    /// with the same contract: success replaces wholesale, failure leaves
    /// the collection empty.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure after clearing the collection.
    pub fn ingest(&mut self, fetched: Result<Vec<T>, GatewayError>) -> Result<(), GatewayError> {
        match fetched {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(error) => {
                self.items.clear();
                tracing::warn!(error = %error, "collection load failed");
                Err(error)
            }
        }
    }

    /// The base collection, in fetch order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of records in the base collection.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the base collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Declare a substring filter over a text field.
    ///
    /// Declaration order matters under [`FilterMode::LastWins`].
    pub fn declare_filter(&mut self, name: &'static str, extract: fn(&T) -> String) {
        self.filters.push(TextFilter {
            name,
            kind: MatchKind::Substring,
            extract,
            query: String::new(),
        });
    }

    /// Declare an exact-match filter, typically over the rendered id.
    pub fn declare_exact_filter(&mut self, name: &'static str, extract: fn(&T) -> String) {
        self.filters.push(TextFilter {
            name,
            kind: MatchKind::Exact,
            extract,
            query: String::new(),
        });
    }

    /// Set the query for a declared filter. An empty query deactivates it.
    /// Unknown names are ignored.
    pub fn set_filter(&mut self, name: &str, query: impl Into<String>) {
        let query = query.into();
        if let Some(filter) = self.filters.iter_mut().find(|f| f.name == name) {
            filter.query = query;
        }
    }

    /// Deactivate every filter.
    pub fn clear_filters(&mut self) {
        for filter in &mut self.filters {
            filter.query.clear();
        }
    }

    /// Apply an ordering to the filtered view.
    pub fn set_sort(&mut self, sort: Sort<T>) {
        self.sort = Some(sort);
    }

    /// Drop the ordering; the view falls back to fetch order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// The filtered, sorted projection of the collection.
    ///
    /// Computed on access; the base collection is never mutated. The sort is
    /// stable, so records that compare equal keep their fetch order.
    pub fn view(&self) -> Vec<&T> {
        let mut view: Vec<&T> = self
            .items
            .iter()
            .filter(|item| self.filters_match(item))
            .collect();

        if let Some(sort) = &self.sort {
            view.sort_by(|a, b| sort.ordering(a, b));
        }

        view
    }

    fn filters_match(&self, record: &T) -> bool {
        match self.mode {
            FilterMode::Intersect => self
                .filters
                .iter()
                .filter(|f| f.is_active())
                .all(|f| f.matches(record)),
            FilterMode::LastWins => self
                .filters
                .iter()
                .rev()
                .find(|f| f.is_active())
                .is_none_or(|f| f.matches(record)),
        }
    }

    /// Merge one record back by id, in place, preserving order.
    ///
    /// Returns `false` when no record with that id is present.
    pub fn apply_update(&mut self, record: T) -> bool {
        match self.get_mut(record.id()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Remove a record locally. Returns `false` when it was not present.
    pub fn remove(&mut self, id: T::Id) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }
}
