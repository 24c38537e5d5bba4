//! Process-wide runtime state
//!
//! State that exists once per process is constructed explicitly at startup and
//! installed into an [`InitOnce`] cell. A second install is an error instead
//! of a silent no-op, and reading before install is an error instead of a lazy
//! initialization.

use std::sync::OnceLock;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Runtime state errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The cell was already installed
    #[error("{0} is already initialized")]
    AlreadyInitialized(&'static str),

    /// The cell was read before being installed
    #[error("{0} is not initialized")]
    NotInitialized(&'static str),
}

/// Result type for runtime state operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// A named cell that can be installed exactly once
///
/// # Examples
/// ```
/// use app_state::{InitOnce, RuntimeError};
///
/// static GREETING: InitOnce<String> = InitOnce::new("greeting");
///
/// assert!(GREETING.get().is_err());
/// GREETING.install("hello".to_string()).unwrap();
/// assert_eq!(GREETING.get().unwrap(), "hello");
/// assert_eq!(
///     GREETING.install("again".to_string()),
///     Err(RuntimeError::AlreadyInitialized("greeting"))
/// );
/// ```
#[derive(Debug)]
pub struct InitOnce<T> {
    name: &'static str,
    cell: OnceLock<T>,
}

impl<T> InitOnce<T> {
    /// Create an empty cell
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceLock::new(),
        }
    }

    /// Install the value
    pub fn install(&self, value: T) -> Result<&T> {
        self.cell
            .set(value)
            .map_err(|_| RuntimeError::AlreadyInitialized(self.name))?;
        tracing::debug!(name = self.name, "installed process state");
        self.get()
    }

    /// Get the installed value
    pub fn get(&self) -> Result<&T> {
        self.cell.get().ok_or(RuntimeError::NotInitialized(self.name))
    }

    /// Check if the value was installed
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Name used in errors and logs
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Facts about the running process
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    started_at: Instant,
    version: &'static str,
}

impl RuntimeInfo {
    /// Capture the runtime info now
    pub fn new(version: &'static str) -> Self {
        Self {
            started_at: Instant::now(),
            version,
        }
    }

    /// Time since startup
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Application version
    pub fn version(&self) -> &'static str {
        self.version
    }
}
