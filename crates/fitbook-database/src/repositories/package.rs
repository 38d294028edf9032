//! Package repository.

use sqlx::PgPool;
use uuid::Uuid;

use fitbook_core::result::AppResult;
use fitbook_entity::package::{CreatePackage, Package, UpdatePackage};

use super::map_sqlx_err;

/// Repository for packages.
#[derive(Debug, Clone)]
pub struct PackageRepository {
    pool: PgPool,
}

impl PackageRepository {
    /// Create a new package repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a package by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Package>> {
        sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_err("Failed to find package", e))
    }

    /// List a company's purchasable packages.
    pub async fn list_active_for_company(&self, company_id: Uuid) -> AppResult<Vec<Package>> {
        sqlx::query_as::<_, Package>(
            "SELECT * FROM packages WHERE company_id = $1 AND is_active = TRUE \
             ORDER BY price_cents ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to list active packages", e))
    }

    /// List every package a company owns, including deactivated ones.
    pub async fn list_for_company(&self, company_id: Uuid) -> AppResult<Vec<Package>> {
        sqlx::query_as::<_, Package>(
            "SELECT * FROM packages WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to list company packages", e))
    }

    /// Create a package.
    pub async fn create(&self, data: &CreatePackage) -> AppResult<Package> {
        sqlx::query_as::<_, Package>(
            "INSERT INTO packages \
             (company_id, name, description, kind, class_count, duration_days, price_cents) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.company_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.kind)
        .bind(data.class_count)
        .bind(data.duration_days)
        .bind(data.price_cents)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to create package", e))
    }

    /// Apply a partial update to a package.
    pub async fn update(&self, id: Uuid, data: &UpdatePackage) -> AppResult<Option<Package>> {
        sqlx::query_as::<_, Package>(
            "UPDATE packages SET \
             name = COALESCE($2, name), \
             description = COALESCE($3, description), \
             price_cents = COALESCE($4, price_cents), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price_cents)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to update package", e))
    }

    /// Soft-deactivate a package so it can no longer be purchased.
    /// Outstanding entitlements keep referencing it.
    pub async fn deactivate(&self, id: Uuid) -> AppResult<Option<Package>> {
        sqlx::query_as::<_, Package>(
            "UPDATE packages SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_err("Failed to deactivate package", e))
    }
}
