//! Company handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use fitbook_entity::company::{RegisterCompany, UpdateCompany};

use crate::dto::request::{RegisterCompanyRequest, UpdateCompanyRequest};
use crate::dto::response::{ApiResponse, CompanyResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validate_body;
use crate::state::AppState;

/// GET /api/companies/{id}
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CompanyResponse>>, ApiError> {
    let company = state.company_service.get(id).await?;
    Ok(Json(ApiResponse::ok(company.into())))
}

/// POST /api/companies
pub async fn register_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RegisterCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyResponse>>, ApiError> {
    validate_body(&req)?;

    let company = state
        .company_service
        .register(
            &auth,
            RegisterCompany {
                user_id: auth.user_id,
                company_name: req.company_name,
                contact_email: req.contact_email,
                description: req.description,
                phone: req.phone,
                website: req.website,
                address: req.address,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(company.into())))
}

/// PUT /api/companies/me
pub async fn update_own_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<CompanyResponse>>, ApiError> {
    let company = state.company_service.get_own(&auth).await?;
    let updated = state
        .company_service
        .update(
            &auth,
            company.id,
            UpdateCompany {
                company_name: req.company_name,
                contact_email: req.contact_email,
                description: req.description,
                phone: req.phone,
                website: req.website,
                address: req.address,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(updated.into())))
}
