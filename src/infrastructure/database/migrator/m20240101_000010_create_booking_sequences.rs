//! Create booking_sequences table

use sea_orm_migration::prelude::*;

use super::m20240101_000004_create_properties::Properties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookingSequences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookingSequences::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BookingSequences::PropertyId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BookingSequences::Year).integer().not_null())
                    .col(
                        ColumnDef::new(BookingSequences::LastValue)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BookingSequences::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_sequences_property_id")
                            .from(BookingSequences::Table, BookingSequences::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_sequences_property_year")
                    .table(BookingSequences::Table)
                    .col(BookingSequences::PropertyId)
                    .col(BookingSequences::Year)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingSequences::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BookingSequences {
    Table,
    Id,
    PropertyId,
    Year,
    LastValue,
    UpdatedAt,
}
