//! Deterministic fixtures for tests and examples.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;

use crate::{entity::Entity, error::GatewayError, gateway::CollectionGateway};

/// A minimal record for exercising the collection primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    /// Unique id.
    pub id: i64,
    /// Display name, used by substring filters.
    pub name: String,
    /// Category-style tag.
    pub tag: String,
    /// 1–5 rating, used by sort fixtures.
    pub rating: u8,
}

impl SampleRecord {
    /// Build a record with rating 1.
    pub fn new(id: i64, name: &str, tag: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            tag: tag.to_string(),
            rating: 1,
        }
    }

    /// Build a record with an explicit rating.
    pub fn rated(id: i64, name: &str, tag: &str, rating: u8) -> Self {
        Self {
            rating,
            ..Self::new(id, name, tag)
        }
    }
}

impl Entity for SampleRecord {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Ten records with a mix of names, tags and ratings.
pub fn sample_records() -> Vec<SampleRecord> {
    vec![
        SampleRecord::rated(1, "disco sphere", "decor", 5),
        SampleRecord::rated(2, "mirror sphere", "decor", 3),
        SampleRecord::rated(3, "glitter garland", "decor", 4),
        SampleRecord::rated(4, "strobe light", "lighting", 2),
        SampleRecord::rated(5, "sphere stand", "hardware", 1),
        SampleRecord::rated(6, "fog machine", "effects", 4),
        SampleRecord::rated(7, "neon sign", "lighting", 5),
        SampleRecord::rated(8, "party horn", "favors", 2),
        SampleRecord::rated(9, "confetti cannon", "effects", 3),
        SampleRecord::rated(10, "disco ball pedestal", "hardware", 1),
    ]
}

/// An in-memory [`CollectionGateway`] with a switchable failure mode.
///
/// When marked unavailable every call is rejected with a 503, which is
/// enough to exercise the store's and editor's failure paths without a
/// network in sight.
#[derive(Debug)]
pub struct InMemoryGateway<T: Entity> {
    records: Mutex<Vec<T>>,
    unavailable: AtomicBool,
}

impl<T: Entity> InMemoryGateway<T> {
    /// A gateway seeded with the given records.
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Toggle the failure mode.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of the gateway-side records.
    pub fn records(&self) -> Vec<T> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Append a record on the gateway side, the way a create endpoint
    /// would.
    pub fn push(&self, record: T) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }

    fn check_available(&self) -> Result<(), GatewayError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(GatewayError::Rejected {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn with_records<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R, GatewayError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| GatewayError::Rejected {
                status: 500,
                message: "fixture poisoned".to_string(),
            })?;
        Ok(f(&mut records))
    }
}

#[async_trait]
impl<T: Entity> CollectionGateway<T> for InMemoryGateway<T> {
    async fn list(&self) -> Result<Vec<T>, GatewayError> {
        self.check_available()?;
        self.with_records(|records| records.clone())
    }

    async fn update(&self, record: T) -> Result<T, GatewayError> {
        self.check_available()?;
        self.with_records(|records| {
            match records.iter_mut().find(|r| r.id() == record.id()) {
                Some(slot) => {
                    *slot = record.clone();
                    Ok(record)
                }
                None => Err(GatewayError::Rejected {
                    status: 404,
                    message: "record not found".to_string(),
                }),
            }
        })?
    }

    async fn delete(&self, id: T::Id) -> Result<(), GatewayError> {
        self.check_available()?;
        self.with_records(|records| {
            let before = records.len();
            records.retain(|r| r.id() != id);
            if records.len() == before {
                Err(GatewayError::Rejected {
                    status: 404,
                    message: "record not found".to_string(),
                })
            } else {
                Ok(())
            }
        })?
    }
}
