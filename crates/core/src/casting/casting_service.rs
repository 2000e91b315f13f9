//! Casting type service implementation.

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{DatabaseError, ValidationError};
use crate::Result;

use super::{
    CastingRepositoryTrait, CastingSeries, CastingServiceTrait, CastingType, NewCastingSeries,
    NewCastingType, SeriesRate,
};

pub struct CastingService {
    repository: Arc<dyn CastingRepositoryTrait>,
}

impl CastingService {
    pub fn new(repository: Arc<dyn CastingRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn require(&self, id: &str) -> Result<CastingType> {
        self.repository
            .get_casting_type(id)?
            .ok_or_else(|| DatabaseError::NotFound(format!("Casting type {}", id)).into())
    }

    fn validate_type(casting_type: &CastingType) -> Result<()> {
        if casting_type.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        let mut names = std::collections::HashSet::new();
        for series in &casting_type.series {
            Self::validate_series(&series.name, series.rate)?;
            if !names.insert(series.name.trim().to_lowercase()) {
                return Err(ValidationError::InvalidInput(format!(
                    "Series \"{}\" already exists in {}",
                    series.name.trim(),
                    casting_type.name
                ))
                .into());
            }
        }
        Ok(())
    }

    fn validate_series(name: &str, rate: Decimal) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("series name".to_string()).into());
        }
        if rate < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Series \"{}\" has a negative rate",
                name.trim()
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl CastingServiceTrait for CastingService {
    fn get_casting_types(&self) -> Result<Vec<CastingType>> {
        self.repository.get_casting_types()
    }

    fn get_casting_type(&self, id: &str) -> Result<CastingType> {
        self.require(id)
    }

    async fn create_casting_type(&self, casting_type: NewCastingType) -> Result<CastingType> {
        if casting_type.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        self.repository.create_casting_type(casting_type).await
    }

    async fn update_casting_type(&self, casting_type: CastingType) -> Result<CastingType> {
        Self::validate_type(&casting_type)?;
        self.repository.update_casting_type(casting_type).await
    }

    async fn delete_casting_type(&self, id: &str) -> Result<usize> {
        self.repository.delete_casting_type(id).await
    }

    async fn add_series(&self, type_id: &str, series: NewCastingSeries) -> Result<CastingType> {
        let mut casting_type = self.require(type_id)?;
        casting_type.series.push(CastingSeries {
            id: Uuid::new_v4().to_string(),
            name: series.name.trim().to_string(),
            rate: series.rate,
        });
        Self::validate_type(&casting_type)?;
        debug!("Adding series {} to {}", series.name, casting_type.name);
        self.repository.update_casting_type(casting_type).await
    }

    async fn remove_series(&self, type_id: &str, series_id: &str) -> Result<CastingType> {
        let mut casting_type = self.require(type_id)?;
        let before = casting_type.series.len();
        casting_type.series.retain(|s| s.id != series_id);
        if casting_type.series.len() == before {
            return Err(DatabaseError::NotFound(format!("Series {}", series_id)).into());
        }
        self.repository.update_casting_type(casting_type).await
    }

    fn resolve_series(&self, type_id: &str, series_id: &str) -> Result<SeriesRate> {
        let casting_type = self.require(type_id)?;
        let series = casting_type.find_series(series_id).ok_or_else(|| {
            DatabaseError::NotFound(format!("Series {} in {}", series_id, casting_type.name))
        })?;
        Ok(SeriesRate {
            type_name: casting_type.name.clone(),
            series_name: series.name.clone(),
            rate: series.rate,
        })
    }
}
