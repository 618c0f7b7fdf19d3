//! Create properties table

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Properties::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Properties::PropertyName).string().not_null())
                    .col(ColumnDef::new(Properties::Address).string().not_null())
                    .col(ColumnDef::new(Properties::City).string().not_null())
                    .col(ColumnDef::new(Properties::State).string())
                    .col(ColumnDef::new(Properties::Country).string().not_null())
                    .col(ColumnDef::new(Properties::Zipcode).string())
                    .col(ColumnDef::new(Properties::Description).text())
                    .col(
                        ColumnDef::new(Properties::TotalShares)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Properties::GuestCapacity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Properties::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Properties::CreatedBy).integer().null())
                    .col(ColumnDef::new(Properties::UpdatedBy).integer().null())
                    .col(
                        ColumnDef::new(Properties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Properties::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_created_by")
                            .from(Properties::Table, Properties::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_updated_by")
                            .from(Properties::Table, Properties::UpdatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_property_name")
                    .table(Properties::Table)
                    .col(Properties::PropertyName)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Properties {
    Table,
    Id,
    PropertyName,
    Address,
    City,
    State,
    Country,
    Zipcode,
    Description,
    TotalShares,
    GuestCapacity,
    IsActive,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}
