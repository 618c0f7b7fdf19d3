//! Create property_images table

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
                    .table(PropertyImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PropertyImages::PropertyId).integer().not_null())
                    .col(ColumnDef::new(PropertyImages::FileName).string().not_null())
                    .col(ColumnDef::new(PropertyImages::OriginalName).string().not_null())
                    .col(
                        ColumnDef::new(PropertyImages::SizeBytes)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(PropertyImages::CreatedBy).integer().null())
                    .col(
                        ColumnDef::new(PropertyImages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_images_property_id")
                            .from(PropertyImages::Table, PropertyImages::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_images_created_by")
                            .from(PropertyImages::Table, PropertyImages::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_property_images_property_id")
                    .table(PropertyImages::Table)
                    .col(PropertyImages::PropertyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyImages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PropertyImages {
    Table,
    Id,
    PropertyId,
    FileName,
    OriginalName,
    SizeBytes,
    CreatedBy,
    CreatedAt,
}
