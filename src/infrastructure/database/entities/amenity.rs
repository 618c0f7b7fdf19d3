//! Amenity entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "amenities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub amenity_name: String,
    pub amenity_type: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        super::property_amenity::Relation::Property.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::property_amenity::Relation::Amenity.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
