//! SeaORM implementation of PortRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder,
    Set,
};

use crate::domain::port::{ChargerOption, Port, PortRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::port;

pub struct SeaOrmPortRepository {
    db: DatabaseConnection,
}

impl SeaOrmPortRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: port::Model) -> DomainResult<Port> {
    let charger_options: Vec<ChargerOption> =
        serde_json::from_str(&m.charger_options).map_err(|e| {
            DomainError::Validation(format!(
                "Corrupt charger_options for port {}: {}",
                m.id, e
            ))
        })?;
    Ok(Port {
        id: m.id,
        location: m.location,
        latitude: m.latitude,
        longitude: m.longitude,
        charger_options,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(p: Port) -> DomainResult<port::ActiveModel> {
    let charger_options = serde_json::to_string(&p.charger_options)
        .map_err(|e| DomainError::Internal(format!("Database error: {}", e)))?;
    Ok(port::ActiveModel {
        id: Set(p.id),
        location: Set(p.location),
        latitude: Set(p.latitude),
        longitude: Set(p.longitude),
        charger_options: Set(charger_options),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

// ── PortRepository impl ─────────────────────────────────────────

#[async_trait]
impl PortRepository for SeaOrmPortRepository {
    async fn save(&self, p: Port) -> DomainResult<()> {
        debug!("Saving port: {}", p.id);

        let id = p.id.clone();
        let model = domain_to_active(p)?;
        model.insert(&self.db).await.map_err(|e| {
            if super::is_unique_violation(&e) {
                DomainError::Conflict(format!("Port '{}' already exists", id))
            } else {
                db_err(e)
            }
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Port>> {
        let model = port::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Port>> {
        let models = port::Entity::find()
            .order_by_asc(port::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, p: Port) -> DomainResult<()> {
        debug!("Updating port: {}", p.id);

        let existing = port::Entity::find_by_id(&p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::not_found("Port", "id", p.id));
        }

        let model = domain_to_active(p)?;
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = port::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Port", "id", id));
        }
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        port::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
