//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the persistence ports from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use emotion_assessment_core::domain::{
    AnonymizedAssessment, Assessment, StoragePreference, UnknownVariant, User,
};
use emotion_assessment_core::ports::{
    PersistError, PersistResult, PersistenceStore, RemoteArchive, UserDirectory,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the persistence ports.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
    default_preference: StoragePreference,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`. Unknown users are registered with `default_preference`.
    pub fn new(pool: PgPool, default_preference: StoragePreference) -> Self {
        Self {
            pool,
            default_preference,
        }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PersistError {
    PersistError::Unexpected(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    user_id: Uuid,
    data_storage_preference: String,
}
impl UserRecord {
    fn to_domain(self) -> PersistResult<User> {
        let preference = self
            .data_storage_preference
            .parse::<StoragePreference>()
            .map_err(|e| PersistError::Unexpected(e.to_string()))?;
        Ok(User {
            id: self.user_id,
            data_storage_preference: preference,
        })
    }
}

#[derive(FromRow)]
struct AssessmentRecord {
    id: Uuid,
    user_id: Uuid,
    input_text: String,
    input_type: String,
    assessment_timestamp: DateTime<Utc>,
    positive_score: f64,
    negative_score: f64,
    stress_level: f64,
    anxiety_level: f64,
    risk_level: String,
    report_text: String,
}
impl AssessmentRecord {
    fn to_domain(self) -> PersistResult<Assessment> {
        let id = self.id;
        let invalid =
            |e: UnknownVariant| PersistError::Unexpected(format!("Corrupt assessment {}: {}", id, e));
        let input_type = self.input_type.parse().map_err(invalid)?;
        let risk_level = self.risk_level.parse().map_err(invalid)?;
        Ok(Assessment {
            id: self.id,
            user_id: self.user_id,
            input_text: self.input_text,
            input_type,
            timestamp: self.assessment_timestamp,
            positive_score: self.positive_score,
            negative_score: self.negative_score,
            stress_level: self.stress_level,
            anxiety_level: self.anxiety_level,
            risk_level,
            report_text: self.report_text,
        })
    }
}

//=========================================================================================
// `PersistenceStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl PersistenceStore for DbAdapter {
    async fn save(&self, assessment: &Assessment) -> PersistResult<()> {
        sqlx::query(
            "INSERT INTO assessments (id, user_id, input_text, input_type, assessment_timestamp, \
             positive_score, negative_score, stress_level, anxiety_level, risk_level, report_text) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(assessment.id)
        .bind(assessment.user_id)
        .bind(&assessment.input_text)
        .bind(assessment.input_type.as_str())
        .bind(assessment.timestamp)
        .bind(assessment.positive_score)
        .bind(assessment.negative_score)
        .bind(assessment.stress_level)
        .bind(assessment.anxiety_level)
        .bind(assessment.risk_level.as_str())
        .bind(&assessment.report_text)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn fetch_by_user(&self, user_id: Uuid) -> PersistResult<Vec<Assessment>> {
        let records = sqlx::query_as::<_, AssessmentRecord>(
            "SELECT id, user_id, input_text, input_type, assessment_timestamp, positive_score, \
             negative_score, stress_level, anxiety_level, risk_level, report_text \
             FROM assessments WHERE user_id = $1 ORDER BY assessment_timestamp DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        records.into_iter().map(|r| r.to_domain()).collect()
    }

    async fn delete_by_id(&self, id: Uuid) -> PersistResult<()> {
        let result = sqlx::query("DELETE FROM assessments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PersistError::NotFound(format!("Assessment {} not found", id)));
        }
        Ok(())
    }
}

//=========================================================================================
// `UserDirectory` Trait Implementation
//=========================================================================================

#[async_trait]
impl UserDirectory for DbAdapter {
    async fn get_user(&self, user_id: Uuid) -> PersistResult<User> {
        sqlx::query(
            "INSERT INTO users (user_id, data_storage_preference) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(self.default_preference.as_str())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, data_storage_preference FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PersistError::NotFound(format!("User {} not found", user_id)),
            _ => unexpected(e),
        })?;

        record.to_domain()
    }

    async fn set_storage_preference(
        &self,
        user_id: Uuid,
        preference: StoragePreference,
    ) -> PersistResult<()> {
        sqlx::query(
            "INSERT INTO users (user_id, data_storage_preference) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET data_storage_preference = EXCLUDED.data_storage_preference",
        )
        .bind(user_id)
        .bind(preference.as_str())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }
}

//=========================================================================================
// `RemoteArchive` Trait Implementation
//=========================================================================================

#[async_trait]
impl RemoteArchive for DbAdapter {
    async fn save_full(&self, assessment: &Assessment) -> PersistResult<()> {
        sqlx::query(
            "INSERT INTO remote_assessments (id, user_id, input_text, input_type, \
             assessment_timestamp, positive_score, negative_score, stress_level, anxiety_level, \
             risk_level, report_text) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(assessment.id)
        .bind(assessment.user_id)
        .bind(&assessment.input_text)
        .bind(assessment.input_type.as_str())
        .bind(assessment.timestamp)
        .bind(assessment.positive_score)
        .bind(assessment.negative_score)
        .bind(assessment.stress_level)
        .bind(assessment.anxiety_level)
        .bind(assessment.risk_level.as_str())
        .bind(&assessment.report_text)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn save_anonymous(&self, record: &AnonymizedAssessment) -> PersistResult<()> {
        sqlx::query(
            "INSERT INTO anonymous_assessments \
             (positive_score, negative_score, stress_level, anxiety_level, risk_level) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.positive_score)
        .bind(record.negative_score)
        .bind(record.stress_level)
        .bind(record.anxiety_level)
        .bind(record.risk_level.as_str())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }
}
