//! Property entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub property_name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub zipcode: Option<String>,
    pub description: Option<String>,
    pub total_shares: i32,
    pub guest_capacity: i32,
    pub is_active: bool,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::property_code::Entity")]
    Codes,
    #[sea_orm(has_many = "super::property_image::Entity")]
    Images,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::property_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Codes.def()
    }
}

impl Related<super::property_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::amenity::Entity> for Entity {
    fn to() -> RelationDef {
        super::property_amenity::Relation::Amenity.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::property_amenity::Relation::Property.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
