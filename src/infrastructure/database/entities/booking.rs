//! Booking entity

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Human-readable reference, e.g. "EV0001"
    #[sea_orm(unique)]
    pub reference: String,

    pub customer_name: String,
    pub customer_email: String,
    pub port_id: String,

    pub vehicle_type: String,
    pub vehicle_model: String,
    pub charger_type: String,

    pub booking_date: NaiveDate,
    /// Start time "HH:MM", one of the fixed slot set
    pub time_slot: String,

    pub battery_kwh: f64,
    pub duration_hours: f64,
    pub cost: i64,

    /// "pending" or "paid"
    pub payment_status: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::port::Entity",
        from = "Column::PortId",
        to = "super::port::Column::Id"
    )]
    Port,
}

impl Related<super::port::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Port.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
