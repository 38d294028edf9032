//! Package catalog: purchasable bundles a company offers.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use fitbook_core::error::AppError;
use fitbook_core::result::AppResult;
use fitbook_database::repositories::package::PackageRepository;
use fitbook_entity::package::{CreatePackage, Package, UpdatePackage};

use crate::context::RequestContext;

/// Manages company package catalogs.
#[derive(Debug, Clone)]
pub struct PackageService {
    package_repo: Arc<PackageRepository>,
}

impl PackageService {
    /// Creates a new package service.
    pub fn new(package_repo: Arc<PackageRepository>) -> Self {
        Self { package_repo }
    }

    /// Fetch a single package.
    pub async fn get(&self, package_id: Uuid) -> AppResult<Package> {
        self.package_repo
            .find_by_id(package_id)
            .await?
            .ok_or_else(|| AppError::not_found("Package not found"))
    }

    /// List a company's packages. The owning company and admins see the
    /// full catalog; everyone else (including anonymous callers) sees only
    /// purchasable packages.
    pub async fn list_for_company(
        &self,
        ctx: Option<&RequestContext>,
        company_id: Uuid,
    ) -> AppResult<Vec<Package>> {
        match ctx {
            Some(ctx) if ctx.can_manage_company(company_id) => {
                self.package_repo.list_for_company(company_id).await
            }
            _ => self.package_repo.list_active_for_company(company_id).await,
        }
    }

    /// Create a package in the acting company's catalog.
    pub async fn create(&self, ctx: &RequestContext, data: CreatePackage) -> AppResult<Package> {
        if !ctx.can_manage_company(data.company_id) {
            return Err(AppError::authorization(
                "Not allowed to create packages for this company",
            ));
        }
        Package::check_kind_fields(data.kind, data.class_count, data.duration_days)?;
        if data.price_cents < 0 {
            return Err(AppError::validation("Price must not be negative"));
        }

        let package = self.package_repo.create(&data).await?;
        info!(package_id = %package.id, company_id = %package.company_id, "Package created");
        Ok(package)
    }

    /// Update a package's name, description, or price.
    ///
    /// The kind and its sizing fields are immutable; outstanding
    /// entitlements were minted from them.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        package_id: Uuid,
        data: UpdatePackage,
    ) -> AppResult<Package> {
        let package = self.get(package_id).await?;
        if !ctx.can_manage_company(package.company_id) {
            return Err(AppError::authorization(
                "Not allowed to modify this package",
            ));
        }
        if let Some(price) = data.price_cents {
            if price < 0 {
                return Err(AppError::validation("Price must not be negative"));
            }
        }

        self.package_repo
            .update(package_id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Package not found"))
    }

    /// Deactivate a package so it can no longer be purchased.
    /// Outstanding entitlements are unaffected.
    pub async fn deactivate(&self, ctx: &RequestContext, package_id: Uuid) -> AppResult<Package> {
        let package = self.get(package_id).await?;
        if !ctx.can_manage_company(package.company_id) {
            return Err(AppError::authorization(
                "Not allowed to deactivate this package",
            ));
        }

        let package = self
            .package_repo
            .deactivate(package_id)
            .await?
            .ok_or_else(|| AppError::not_found("Package not found"))?;
        info!(package_id = %package.id, "Package deactivated");
        Ok(package)
    }
}
