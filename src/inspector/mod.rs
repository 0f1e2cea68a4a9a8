pub mod fixture;
pub mod http;
pub mod snapshot;

pub use fixture::FixtureInspector;
pub use http::HttpInspector;
pub use snapshot::{CategoryReport, ResourceSnapshot, ServiceInventory};

use async_trait::async_trait;

use crate::errors::WardenError;

/// Source of the per-account resource inventory the analysis runs against.
///
/// An implementation returns a snapshot with per-category fault isolation:
/// one category failing to load records that category's error and leaves the
/// others intact. A hard `Err` means no inventory at all could be produced.
#[async_trait]
pub trait ResourceInspector: Send + Sync {
    async fn snapshot(
        &self,
        account_id: &str,
        region: &str,
    ) -> Result<ResourceSnapshot, WardenError>;

    fn name(&self) -> &str;
}
