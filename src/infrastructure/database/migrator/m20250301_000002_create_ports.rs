//! Create ports table
//!
//! Availability is a projection over bookings, never a stored column.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ports::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ports::Location).string().not_null())
                    .col(ColumnDef::new(Ports::Latitude).double().not_null())
                    .col(ColumnDef::new(Ports::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(Ports::ChargerOptions)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Ports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Ports::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Ports {
    Table,
    Id,
    Location,
    Latitude,
    Longitude,
    ChargerOptions,
    CreatedAt,
    UpdatedAt,
}
