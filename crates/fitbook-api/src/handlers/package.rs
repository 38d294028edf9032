//! Package handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use fitbook_core::error::AppError;
use fitbook_entity::package::{CreatePackage, UpdatePackage};

use crate::dto::request::{CreatePackageRequest, UpdatePackageRequest};
use crate::dto::response::{ApiResponse, PackageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, MaybeAuthUser};
use crate::handlers::validate_body;
use crate::state::AppState;

/// GET /api/companies/{id}/packages
///
/// Public endpoint; an anonymous caller sees purchasable packages only.
pub async fn list_company_packages(
    State(state): State<AppState>,
    MaybeAuthUser(ctx): MaybeAuthUser,
    Path(company_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<PackageResponse>>>, ApiError> {
    let packages = state
        .package_service
        .list_for_company(ctx.as_ref(), company_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        packages.into_iter().map(PackageResponse::from).collect(),
    )))
}

/// POST /api/packages
pub async fn create_package(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePackageRequest>,
) -> Result<Json<ApiResponse<PackageResponse>>, ApiError> {
    validate_body(&req)?;

    let company_id = auth
        .company_id
        .ok_or_else(|| AppError::authorization("Only companies can create packages"))?;

    let package = state
        .package_service
        .create(
            &auth,
            CreatePackage {
                company_id,
                name: req.name,
                description: req.description,
                kind: req.kind,
                class_count: req.class_count,
                duration_days: req.duration_days,
                price_cents: req.price_cents,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(package.into())))
}

/// PUT /api/packages/{id}
pub async fn update_package(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePackageRequest>,
) -> Result<Json<ApiResponse<PackageResponse>>, ApiError> {
    let package = state
        .package_service
        .update(
            &auth,
            id,
            UpdatePackage {
                name: req.name,
                description: req.description,
                price_cents: req.price_cents,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(package.into())))
}

/// POST /api/packages/{id}/deactivate
pub async fn deactivate_package(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PackageResponse>>, ApiError> {
    let package = state.package_service.deactivate(&auth, id).await?;
    Ok(Json(ApiResponse::ok(package.into())))
}
