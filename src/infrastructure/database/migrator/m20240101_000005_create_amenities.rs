//! Create amenities and property_amenities tables

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_users::Users;
use super::m20240101_000004_create_properties::Properties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Amenities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Amenities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Amenities::AmenityName).string().not_null())
                    .col(ColumnDef::new(Amenities::AmenityType).string())
                    .col(ColumnDef::new(Amenities::Description).string())
                    .col(ColumnDef::new(Amenities::CreatedBy).integer().null())
                    .col(ColumnDef::new(Amenities::UpdatedBy).integer().null())
                    .col(
                        ColumnDef::new(Amenities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Amenities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_amenities_created_by")
                            .from(Amenities::Table, Amenities::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_amenities_updated_by")
                            .from(Amenities::Table, Amenities::UpdatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_amenities_amenity_name")
                    .table(Amenities::Table)
                    .col(Amenities::AmenityName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PropertyAmenities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyAmenities::PropertyId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyAmenities::AmenityId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PropertyAmenities::PropertyId)
                            .col(PropertyAmenities::AmenityId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_amenities_property_id")
                            .from(PropertyAmenities::Table, PropertyAmenities::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_amenities_amenity_id")
                            .from(PropertyAmenities::Table, PropertyAmenities::AmenityId)
                            .to(Amenities::Table, Amenities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyAmenities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Amenities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Amenities {
    Table,
    Id,
    AmenityName,
    AmenityType,
    Description,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum PropertyAmenities {
    Table,
    PropertyId,
    AmenityId,
}
