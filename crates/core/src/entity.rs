//! Collection entities.

use std::fmt::Debug;
use std::hash::Hash;

/// A record that can live in a [`RemoteCollectionStore`].
///
/// Every entity carries a unique id; all merging, removal and per-row edit
/// state is keyed on it.
///
/// [`RemoteCollectionStore`]: crate::store::RemoteCollectionStore
pub trait Entity: Clone + Send + Sync + 'static {
    /// Unique identifier type for this entity.
    type Id: Copy + Eq + Hash + Ord + Debug + Send + Sync + 'static;

    /// The entity's unique id.
    fn id(&self) -> Self::Id;
}
