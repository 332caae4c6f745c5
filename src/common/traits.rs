//! Trait definitions for the engine's external seams

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::Result;
use crate::catalog::PlayerCatalog;

/// Source of wall-clock time for lockout evaluation
///
/// Injected so tests and what-if scenarios can pin "now".
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Trait for anything that can produce a player catalog snapshot
///
/// Implementations load the full catalog each time; the store swaps the
/// result in atomically.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load a fresh catalog snapshot
    async fn load(&self) -> Result<PlayerCatalog>;

    /// Human-readable description used in logs
    fn describe(&self) -> String;
}
