//! Error taxonomy shared across the collection primitives.

use thiserror::Error;

/// A failure reported by a [`CollectionGateway`] call.
///
/// [`CollectionGateway`]: crate::gateway::CollectionGateway
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a usable response.
    #[error("transport failure")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The server answered with a non-success status and a message.
    #[error("request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code reported by the server.
        status: u16,
        /// Server-provided rejection message.
        message: String,
    },

    /// The request was superseded by a newer one for the same key.
    #[error("request superseded")]
    Superseded,
}

impl GatewayError {
    /// Wrap an arbitrary transport-level error.
    pub fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(source))
    }
}

/// A single failed validation check on a draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Draft field the check applies to.
    pub field: &'static str,
    /// Human-readable description of the failed check.
    pub message: String,
}

impl ValidationError {
    /// Build a validation error for `field`.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All validation failures found on a draft, surfaced together.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    /// Individual failed checks, in declaration order.
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// An empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed check.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(ValidationError::new(field, message));
    }

    /// Whether no checks failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Finish a validation pass: `Ok(())` when no checks failed.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one check failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed")?;
        for error in &self.errors {
            write!(f, "; {}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A failure surfaced by [`FormFlow::submit`].
///
/// [`FormFlow::submit`]: crate::form::FormFlow::submit
#[derive(Debug, Error)]
pub enum FormError {
    /// The draft failed client-side validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// The submission reached the gateway and failed there.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// A misuse of the per-row editor surfaced to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// The row is not currently in the `Editing` state.
    #[error("row is not being edited")]
    NotEditing,

    /// The record left the local collection since the edit began.
    #[error("record is no longer in the collection")]
    Missing,
}
