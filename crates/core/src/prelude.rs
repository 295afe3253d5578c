//! Sphere Core prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    editor::{CommitOutcome, OptimisticEditor, RollbackPolicy, RowState},
    entity::Entity,
    error::{EditError, FormError, GatewayError, ValidationError, ValidationErrors},
    form::{FormFlow, FormState, SubmitTarget, Validate},
    gateway::CollectionGateway,
    inflight::{InflightRegistry, guarded},
    store::{FilterMode, MatchKind, RemoteCollectionStore, Sort, SortDirection},
};
