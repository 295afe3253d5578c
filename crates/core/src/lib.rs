//! Sphere Core
//!
//! Reusable building blocks for views that manage a remote collection of
//! records over a REST backend: a locally cached collection with derived
//! filter/sort projections, an optimistic per-row editor with explicit
//! rollback policies, and a draft-based form submission flow.
//!
//! The local collection is never the system of record. It holds the last
//! fetched snapshot, projections never mutate it, and edits are merged back
//! by id without reordering.

pub mod editor;
pub mod entity;
pub mod error;
pub mod fixtures;
pub mod form;
pub mod gateway;
pub mod inflight;
pub mod prelude;
pub mod store;
