//! Payment verification: turns a settled checkout session into an entitlement.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use fitbook_core::error::AppError;
use fitbook_core::result::AppResult;
use fitbook_core::traits::payment::{CheckoutProvider, CheckoutSession};
use fitbook_database::repositories::entitlement::EntitlementRepository;
use fitbook_database::repositories::package::PackageRepository;
use fitbook_entity::entitlement::{CreateEntitlement, Entitlement};
use fitbook_entity::package::{Package, PackageKind};

use crate::context::RequestContext;

/// Request to verify a checkout session and mint the purchased entitlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    /// Provider-side checkout session identifier.
    pub checkout_session_id: String,
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentResult {
    /// The entitlement backing this payment.
    pub entitlement: Entitlement,
    /// Whether this call minted the entitlement (`false` on a retried
    /// verification of an already-reconciled payment).
    pub created: bool,
}

/// Reconciles provider payments into entitlements.
///
/// Verification is idempotent on the provider's payment intent: however many
/// times a client retries, exactly one entitlement exists per settled payment.
#[derive(Debug)]
pub struct PaymentService {
    provider: Arc<dyn CheckoutProvider>,
    entitlement_repo: Arc<EntitlementRepository>,
    package_repo: Arc<PackageRepository>,
}

impl PaymentService {
    /// Creates a new payment service.
    pub fn new(
        provider: Arc<dyn CheckoutProvider>,
        entitlement_repo: Arc<EntitlementRepository>,
        package_repo: Arc<PackageRepository>,
    ) -> Self {
        Self {
            provider,
            entitlement_repo,
            package_repo,
        }
    }

    /// Verify a checkout session with the provider and mint the entitlement.
    pub async fn verify_and_reconcile(
        &self,
        ctx: &RequestContext,
        req: VerifyPaymentRequest,
    ) -> AppResult<VerifyPaymentResult> {
        let session = self
            .provider
            .fetch_checkout_session(&req.checkout_session_id)
            .await?;

        if !session.is_paid() {
            return Err(AppError::invalid_payment(format!(
                "Checkout session is not settled (status: {})",
                session.payment_status
            )));
        }

        let payment_reference = session
            .payment_intent
            .clone()
            .ok_or_else(|| AppError::invalid_payment("Checkout session has no payment intent"))?;

        let package_id = Self::metadata_uuid(&session, "package_id")?;
        let buyer_id = Self::metadata_uuid(&session, "user_id")?;
        let company_id = Self::metadata_uuid(&session, "company_id")?;

        // The session's metadata names the buyer; only that user may redeem it.
        if buyer_id != ctx.user_id {
            return Err(AppError::authorization(
                "Checkout session belongs to a different user",
            ));
        }

        let package = self
            .package_repo
            .find_by_id(package_id)
            .await?
            .ok_or_else(|| AppError::not_found("Package not found"))?;

        if package.company_id != company_id {
            return Err(AppError::invalid_payment(
                "Checkout session metadata does not match the package's company",
            ));
        }

        let (remaining, total, expires_at) = Self::allotment(&package)?;

        let (entitlement, created) = self
            .entitlement_repo
            .create_idempotent(&CreateEntitlement {
                user_id: buyer_id,
                package_id,
                company_id,
                payment_reference,
                remaining_classes: remaining,
                total_classes: total,
                expires_at,
            })
            .await?;

        info!(
            entitlement_id = %entitlement.id,
            package_id = %package_id,
            user_id = %buyer_id,
            created,
            "Payment reconciled"
        );

        Ok(VerifyPaymentResult {
            entitlement,
            created,
        })
    }

    /// List the acting user's entitlements.
    pub async fn list_entitlements(&self, ctx: &RequestContext) -> AppResult<Vec<Entitlement>> {
        self.entitlement_repo.list_for_user(ctx.user_id).await
    }

    /// Compute the entitlement fields granted by a package at purchase time.
    fn allotment(
        package: &Package,
    ) -> AppResult<(Option<i32>, Option<i32>, Option<chrono::DateTime<Utc>>)> {
        match package.kind {
            PackageKind::ClassCount => {
                let count = package.class_count.ok_or_else(|| {
                    AppError::internal("class_count package is missing its class count")
                })?;
                Ok((Some(count), Some(count), None))
            }
            PackageKind::TimeBased => {
                let days = package.duration_days.ok_or_else(|| {
                    AppError::internal("time_based package is missing its duration")
                })?;
                Ok((None, None, Some(Utc::now() + Duration::days(days as i64))))
            }
        }
    }

    /// Parse a required UUID out of the session metadata.
    fn metadata_uuid(session: &CheckoutSession, key: &str) -> AppResult<Uuid> {
        session
            .metadata_value(key)
            .ok_or_else(|| {
                AppError::invalid_payment(format!("Checkout session metadata is missing {key}"))
            })?
            .parse()
            .map_err(|_| {
                AppError::invalid_payment(format!(
                    "Checkout session metadata has a malformed {key}"
                ))
            })
    }
}
