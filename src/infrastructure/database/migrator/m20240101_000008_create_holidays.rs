//! Create holidays table

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
                    .table(Holidays::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Holidays::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Holidays::Name).string().not_null())
                    .col(ColumnDef::new(Holidays::Year).integer().not_null())
                    .col(ColumnDef::new(Holidays::StartDate).date().not_null())
                    .col(ColumnDef::new(Holidays::EndDate).date().not_null())
                    .col(ColumnDef::new(Holidays::CreatedBy).integer().null())
                    .col(ColumnDef::new(Holidays::UpdatedBy).integer().null())
                    .col(
                        ColumnDef::new(Holidays::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Holidays::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_holidays_created_by")
                            .from(Holidays::Table, Holidays::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_holidays_updated_by")
                            .from(Holidays::Table, Holidays::UpdatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_holidays_year")
                    .table(Holidays::Table)
                    .col(Holidays::Year)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Holidays::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Holidays {
    Table,
    Id,
    Name,
    Year,
    StartDate,
    EndDate,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}
