//! Company profiles: registration and maintenance.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use fitbook_core::error::AppError;
use fitbook_core::result::AppResult;
use fitbook_database::repositories::company::CompanyRepository;
use fitbook_entity::company::{Company, RegisterCompany, UpdateCompany};

use crate::context::RequestContext;

/// Manages company profiles.
#[derive(Debug, Clone)]
pub struct CompanyService {
    company_repo: Arc<CompanyRepository>,
}

impl CompanyService {
    /// Creates a new company service.
    pub fn new(company_repo: Arc<CompanyRepository>) -> Self {
        Self { company_repo }
    }

    /// Fetch a single company profile.
    pub async fn get(&self, company_id: Uuid) -> AppResult<Company> {
        self.company_repo
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| AppError::not_found("Company not found"))
    }

    /// Fetch the company owned by the acting user.
    pub async fn get_own(&self, ctx: &RequestContext) -> AppResult<Company> {
        self.company_repo
            .find_by_user(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("No company registered for this user"))
    }

    /// Register a company for the acting user. Each user owns at most one.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        mut data: RegisterCompany,
    ) -> AppResult<Company> {
        // The owner is always the authenticated caller, never client input.
        data.user_id = ctx.user_id;

        let company = self
            .company_repo
            .create(&data)
            .await?
            .ok_or_else(|| AppError::conflict("A company is already registered for this user"))?;

        info!(company_id = %company.id, user_id = %ctx.user_id, "Company registered");
        Ok(company)
    }

    /// Update a company profile. Allowed for the owner and admins.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        company_id: Uuid,
        data: UpdateCompany,
    ) -> AppResult<Company> {
        let company = self.get(company_id).await?;
        if !ctx.is_admin() && company.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "Not allowed to modify this company",
            ));
        }

        self.company_repo
            .update(company_id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Company not found"))
    }
}
