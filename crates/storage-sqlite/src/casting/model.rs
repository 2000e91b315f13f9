//! Database model for casting types. Series live in a JSON column on the type row.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use valvequote_core::casting::CastingType;

#[derive(Queryable, Identifiable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::casting_types)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CastingTypeDB {
    pub id: String,
    pub name: String,
    pub series: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<CastingTypeDB> for CastingType {
    type Error = StorageError;

    fn try_from(db: CastingTypeDB) -> Result<Self, Self::Error> {
        Ok(CastingType {
            series: serde_json::from_str(&db.series)?,
            id: db.id,
            name: db.name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl TryFrom<&CastingType> for CastingTypeDB {
    type Error = StorageError;

    fn try_from(domain: &CastingType) -> Result<Self, Self::Error> {
        Ok(CastingTypeDB {
            id: domain.id.clone(),
            name: domain.name.clone(),
            series: serde_json::to_string(&domain.series)?,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        })
    }
}
