//! Create bookings table
//!
//! The unique index on (port_id, booking_date, time_slot) is the
//! authoritative double-booking guard: of two concurrent creates for the
//! same slot, the database rejects exactly one.

use sea_orm_migration::prelude::*;

use super::m20250301_000002_create_ports::Ports;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Bookings::Reference)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Bookings::CustomerName).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerEmail).string().not_null())
                    .col(ColumnDef::new(Bookings::PortId).string().not_null())
                    .col(ColumnDef::new(Bookings::VehicleType).string().not_null())
                    .col(ColumnDef::new(Bookings::VehicleModel).string().not_null())
                    .col(ColumnDef::new(Bookings::ChargerType).string().not_null())
                    .col(ColumnDef::new(Bookings::BookingDate).date().not_null())
                    .col(ColumnDef::new(Bookings::TimeSlot).string().not_null())
                    .col(ColumnDef::new(Bookings::BatteryKwh).double().not_null())
                    .col(ColumnDef::new(Bookings::DurationHours).double().not_null())
                    .col(ColumnDef::new(Bookings::Cost).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::PaymentStatus)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_port")
                            .from(Bookings::Table, Bookings::PortId)
                            .to(Ports::Table, Ports::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_slot")
                    .table(Bookings::Table)
                    .col(Bookings::PortId)
                    .col(Bookings::BookingDate)
                    .col(Bookings::TimeSlot)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_customer_email")
                    .table(Bookings::Table)
                    .col(Bookings::CustomerEmail)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    Reference,
    CustomerName,
    CustomerEmail,
    PortId,
    VehicleType,
    VehicleModel,
    ChargerType,
    BookingDate,
    TimeSlot,
    BatteryKwh,
    DurationHours,
    Cost,
    PaymentStatus,
    CreatedAt,
}
