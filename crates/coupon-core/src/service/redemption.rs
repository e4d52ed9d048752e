// Redemption controller
// Moves a claim from unused to used exactly once

use std::sync::Arc;

use chrono::Utc;
use coupon_common::{CouponError, validate_id};
use coupon_persistence::{ClaimInfo, PersistenceService};
use tracing::{error, info};

#[derive(Clone)]
pub struct RedemptionController {
    persistence: Arc<dyn PersistenceService>,
}

impl RedemptionController {
    pub fn new(persistence: Arc<dyn PersistenceService>) -> Self {
        Self { persistence }
    }

    /// Redeem the customer's earliest unused claim on `coupon_id`
    ///
    /// The used flag is flipped with a conditional update, so of two
    /// concurrent redemptions of the same claim only one succeeds; the other
    /// gets `NotRedeemable`.
    pub async fn redeem(&self, customer_id: &str, coupon_id: &str) -> Result<ClaimInfo, CouponError> {
        let customer_id = validate_id("customer_id", customer_id)?;
        let coupon_id = validate_id("coupon_id", coupon_id)?;

        let claim = self
            .persistence
            .claim_find_unused(customer_id, coupon_id)
            .await
            .map_err(|e| {
                error!(customer_id, coupon_id, error = %e, "Failed to look up claim");
                CouponError::database(e)
            })?;

        let Some(claim) = claim else {
            info!(customer_id, coupon_id, "Redemption rejected, no unused claim");
            return Err(CouponError::NotRedeemable);
        };

        let used_at = Utc::now();
        let transitioned = self
            .persistence
            .claim_mark_used(&claim.id, used_at)
            .await
            .map_err(|e| {
                error!(customer_id, coupon_id, claim_id = %claim.id, error = %e, "Failed to mark claim used");
                CouponError::database(e)
            })?;

        if !transitioned {
            info!(customer_id, coupon_id, claim_id = %claim.id, "Redemption lost race, claim already used");
            return Err(CouponError::NotRedeemable);
        }

        info!(customer_id, coupon_id, claim_id = %claim.id, "Coupon redeemed");
        Ok(ClaimInfo {
            used: true,
            used_at: Some(used_at),
            ..claim
        })
    }
}
