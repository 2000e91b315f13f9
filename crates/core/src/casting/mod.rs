//! Casting types and series: the "Type → Series" rate selection used by the
//! casting group formula.

mod casting_model;
mod casting_service;
mod casting_traits;

pub use casting_model::{
    CastingSeries, CastingType, NewCastingSeries, NewCastingType, SeriesRate, SeriesSelection,
};
pub use casting_service::CastingService;
pub use casting_traits::{CastingRepositoryTrait, CastingServiceTrait};
