use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::{Quadricycle, QuadricycleStatus, Review, ReviewUpdate};
use crate::utils::errors::{conflict_error, not_found_error, AppError};

// Filas tal cual están en SQLite
#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
struct QuadricycleRow {
    id: String,
    model: String,
    purchase_date: NaiveDate,
    client_name: String,
    whatsapp: String,
    status: String,
}

#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
struct ReviewRow {
    quad_id: String,
    review_number: u32,
    label: String,
    scheduled_date: NaiveDate,
    is_completed: bool,
    is_refused: bool,
    days_from_previous: i64,
    observation: Option<String>,
    refusal_reason: Option<String>,
    responsible: Option<String>,
    km: Option<String>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.review_number,
            label: row.label,
            scheduled_date: row.scheduled_date,
            is_completed: row.is_completed,
            is_refused: row.is_refused,
            days_from_previous: row.days_from_previous,
            observation: row.observation,
            refusal_reason: row.refusal_reason,
            responsible: row.responsible,
            km: row.km,
        }
    }
}

pub struct QuadricycleRepository {
    pool: SqlitePool,
}

impl QuadricycleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Todos los vehículos, el más reciente primero, con sus revisiones en orden
    pub async fn find_all(&self) -> Result<Vec<Quadricycle>, AppError> {
        let quads = sqlx::query_as::<_, QuadricycleRow>(
            "SELECT id, model, purchaseDate, clientName, whatsapp, status FROM quadricycles ORDER BY rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let reviews = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT quadId, reviewNumber, label, scheduledDate, isCompleted, isRefused,
                   daysFromPrevious, observation, refusalReason, responsible, km
            FROM reviews
            ORDER BY quadId, reviewNumber ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_quad: HashMap<String, Vec<Review>> = HashMap::new();
        for row in reviews {
            by_quad.entry(row.quad_id.clone()).or_default().push(row.into());
        }

        quads
            .into_iter()
            .map(|row| {
                let status = row
                    .status
                    .parse::<QuadricycleStatus>()
                    .map_err(AppError::Internal)?;
                Ok(Quadricycle {
                    reviews: by_quad.remove(&row.id).unwrap_or_default(),
                    id: row.id,
                    model: row.model,
                    purchase_date: row.purchase_date,
                    client_name: row.client_name,
                    whatsapp: row.whatsapp,
                    status,
                })
            })
            .collect()
    }

    /// Vehículo y revisiones en una sola transacción
    pub async fn insert(&self, quad: &Quadricycle) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO quadricycles (id, model, purchaseDate, clientName, whatsapp, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&quad.id)
        .bind(&quad.model)
        .bind(quad.purchase_date)
        .bind(&quad.client_name)
        .bind(&quad.whatsapp)
        .bind(quad.status.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
                conflict_error("Quadricycle", "id", &quad.id)
            } else {
                AppError::Database(e)
            }
        })?;

        for review in &quad.reviews {
            sqlx::query(
                r#"
                INSERT INTO reviews (quadId, reviewNumber, label, scheduledDate, isCompleted, isRefused,
                                     daysFromPrevious, observation, refusalReason, responsible, km)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&quad.id)
            .bind(review.id)
            .bind(&review.label)
            .bind(review.scheduled_date)
            .bind(review.is_completed)
            .bind(review.is_refused)
            .bind(review.days_from_previous)
            .bind(&review.observation)
            .bind(&review.refusal_reason)
            .bind(&review.responsible)
            .bind(&review.km)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn update_status(&self, id: &str, status: QuadricycleStatus) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE quadricycles SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Quadricycle", id));
        }
        Ok(())
    }

    /// Las revisiones se van por ON DELETE CASCADE
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM quadricycles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Quadricycle", id));
        }
        Ok(())
    }

    /// UPDATE parcial: solo se escriben las columnas presentes en `update`
    pub async fn update_review(
        &self,
        quad_id: &str,
        review_number: u32,
        update: &ReviewUpdate,
    ) -> Result<(), AppError> {
        if update.is_empty() {
            let exists: i64 = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM reviews WHERE quadId = ? AND reviewNumber = ?)",
            )
            .bind(quad_id)
            .bind(review_number)
            .fetch_one(&self.pool)
            .await?;

            if exists == 0 {
                return Err(review_not_found(quad_id, review_number));
            }
            return Ok(());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE reviews SET ");
        {
            let mut set = builder.separated(", ");
            if let Some(value) = update.is_completed {
                set.push("isCompleted = ").push_bind_unseparated(value);
            }
            if let Some(value) = update.is_refused {
                set.push("isRefused = ").push_bind_unseparated(value);
            }
            if let Some(value) = &update.observation {
                set.push("observation = ").push_bind_unseparated(value.clone());
            }
            if let Some(value) = &update.refusal_reason {
                set.push("refusalReason = ").push_bind_unseparated(value.clone());
            }
            if let Some(value) = &update.responsible {
                set.push("responsible = ").push_bind_unseparated(value.clone());
            }
            if let Some(value) = &update.km {
                set.push("km = ").push_bind_unseparated(value.clone());
            }
        }
        builder
            .push(" WHERE quadId = ")
            .push_bind(quad_id)
            .push(" AND reviewNumber = ")
            .push_bind(review_number);

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(review_not_found(quad_id, review_number));
        }
        Ok(())
    }
}

fn review_not_found(quad_id: &str, review_number: u32) -> AppError {
    AppError::NotFound(format!(
        "Review {} of quadricycle '{}' not found",
        review_number, quad_id
    ))
}
