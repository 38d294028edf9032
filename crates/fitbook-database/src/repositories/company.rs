//! Company repository.

use sqlx::PgPool;
use uuid::Uuid;

use fitbook_core::result::AppResult;
use fitbook_entity::company::{Company, RegisterCompany, UpdateCompany};

use super::map_sqlx_err;

/// Repository for company profiles.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    /// Create a new company repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a company by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("Failed to find company", e))
    }

    /// Find the company owned by a user. One company per user.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Company>> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("Failed to find company by user", e))
    }

    /// Register a company. The unique constraint on `user_id` rejects a
    /// second registration by the same user.
    pub async fn create(&self, data: &RegisterCompany) -> AppResult<Option<Company>> {
        let result = sqlx::query_as::<_, Company>(
            "INSERT INTO companies \
             (user_id, company_name, contact_email, description, phone, website, address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.company_name)
        .bind(&data.contact_email)
        .bind(&data.description)
        .bind(&data.phone)
        .bind(&data.website)
        .bind(&data.address)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(company) => Ok(Some(company)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Ok(None),
            Err(e) => Err(map_sqlx_err("Failed to register company", e)),
        }
    }

    /// Apply a partial update to a company profile.
    pub async fn update(&self, id: Uuid, data: &UpdateCompany) -> AppResult<Option<Company>> {
        sqlx::query_as::<_, Company>(
            "UPDATE companies SET \
             company_name = COALESCE($2, company_name), \
             contact_email = COALESCE($3, contact_email), \
             description = COALESCE($4, description), \
             phone = COALESCE($5, phone), \
             website = COALESCE($6, website), \
             address = COALESCE($7, address), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.company_name)
        .bind(&data.contact_email)
        .bind(&data.description)
        .bind(&data.phone)
        .bind(&data.website)
        .bind(&data.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to update company", e))
    }
}
