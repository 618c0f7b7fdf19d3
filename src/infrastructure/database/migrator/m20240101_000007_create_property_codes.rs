//! Create property_codes table

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
                    .table(PropertyCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyCodes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PropertyCodes::PropertyId).integer().not_null())
                    .col(ColumnDef::new(PropertyCodes::CodeType).string().not_null())
                    .col(ColumnDef::new(PropertyCodes::Code).string().not_null())
                    .col(ColumnDef::new(PropertyCodes::Description).string())
                    .col(ColumnDef::new(PropertyCodes::CreatedBy).integer().null())
                    .col(ColumnDef::new(PropertyCodes::UpdatedBy).integer().null())
                    .col(
                        ColumnDef::new(PropertyCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyCodes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_codes_property_id")
                            .from(PropertyCodes::Table, PropertyCodes::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_codes_created_by")
                            .from(PropertyCodes::Table, PropertyCodes::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_codes_updated_by")
                            .from(PropertyCodes::Table, PropertyCodes::UpdatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // One code per type per property
        manager
            .create_index(
                Index::create()
                    .name("idx_property_codes_property_type")
                    .table(PropertyCodes::Table)
                    .col(PropertyCodes::PropertyId)
                    .col(PropertyCodes::CodeType)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PropertyCodes {
    Table,
    Id,
    PropertyId,
    CodeType,
    Code,
    Description,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}
