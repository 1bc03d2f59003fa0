//! SeaORM implementation of FeedbackRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::feedback::{Feedback, FeedbackRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::feedback;

pub struct SeaOrmFeedbackRepository {
    db: DatabaseConnection,
}

impl SeaOrmFeedbackRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: feedback::Model) -> Feedback {
    Feedback {
        id: m.id,
        name: m.name,
        email: m.email,
        message: m.message,
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl FeedbackRepository for SeaOrmFeedbackRepository {
    async fn save(&self, name: &str, email: &str, message: &str) -> DomainResult<Feedback> {
        let model = feedback::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            message: Set(message.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_all(&self) -> DomainResult<Vec<Feedback>> {
        let models = feedback::Entity::find()
            .order_by_desc(feedback::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = feedback::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Feedback", "id", id.to_string()));
        }
        Ok(())
    }
}
