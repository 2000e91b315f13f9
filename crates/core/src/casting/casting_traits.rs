//! Traits for casting type repository and service.

use async_trait::async_trait;

use crate::Result;

use super::{CastingType, NewCastingSeries, NewCastingType, SeriesRate};

/// Repository trait for casting type persistence.
#[async_trait]
pub trait CastingRepositoryTrait: Send + Sync {
    fn get_casting_types(&self) -> Result<Vec<CastingType>>;
    fn get_casting_type(&self, id: &str) -> Result<Option<CastingType>>;
    async fn create_casting_type(&self, casting_type: NewCastingType) -> Result<CastingType>;
    /// Replaces name and series of an existing type.
    async fn update_casting_type(&self, casting_type: CastingType) -> Result<CastingType>;
    async fn delete_casting_type(&self, id: &str) -> Result<usize>;
}

/// Service trait for casting type business logic.
#[async_trait]
pub trait CastingServiceTrait: Send + Sync {
    fn get_casting_types(&self) -> Result<Vec<CastingType>>;
    fn get_casting_type(&self, id: &str) -> Result<CastingType>;
    async fn create_casting_type(&self, casting_type: NewCastingType) -> Result<CastingType>;
    async fn update_casting_type(&self, casting_type: CastingType) -> Result<CastingType>;
    async fn delete_casting_type(&self, id: &str) -> Result<usize>;

    // Series operations
    async fn add_series(&self, type_id: &str, series: NewCastingSeries) -> Result<CastingType>;
    async fn remove_series(&self, type_id: &str, series_id: &str) -> Result<CastingType>;
    fn resolve_series(&self, type_id: &str, series_id: &str) -> Result<SeriesRate>;
}
