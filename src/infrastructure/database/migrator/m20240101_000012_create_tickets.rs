//! Create tickets table

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
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tickets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tickets::Category).string().not_null())
                    .col(ColumnDef::new(Tickets::PropertyId).integer().null())
                    .col(ColumnDef::new(Tickets::UserId).integer().null())
                    .col(ColumnDef::new(Tickets::Name).string().not_null())
                    .col(ColumnDef::new(Tickets::Email).string().not_null())
                    .col(ColumnDef::new(Tickets::Phone).string())
                    .col(ColumnDef::new(Tickets::Subject).string().not_null())
                    .col(ColumnDef::new(Tickets::Message).text().not_null())
                    .col(
                        ColumnDef::new(Tickets::Status)
                            .string()
                            .not_null()
                            .default("Open"),
                    )
                    .col(ColumnDef::new(Tickets::UpdatedBy).integer().null())
                    .col(
                        ColumnDef::new(Tickets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tickets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_property_id")
                            .from(Tickets::Table, Tickets::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_user_id")
                            .from(Tickets::Table, Tickets::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_updated_by")
                            .from(Tickets::Table, Tickets::UpdatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_status")
                    .table(Tickets::Table)
                    .col(Tickets::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Tickets {
    Table,
    Id,
    Category,
    PropertyId,
    UserId,
    Name,
    Email,
    Phone,
    Subject,
    Message,
    Status,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}
