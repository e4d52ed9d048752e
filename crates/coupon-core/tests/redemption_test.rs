//! Redemption controller behavior against in-memory stores

mod common;

use std::sync::Arc;

use common::{UnreachablePersistence, fixture};
use coupon_common::CouponError;
use coupon_core::RedemptionController;
use coupon_persistence::ClaimPersistence;

#[tokio::test]
async fn test_claim_then_use_then_use_again() {
    let f = fixture(2).await;
    let claim = f.claims.claim(&f.customer_id, &f.coupon_id).await.unwrap();

    let redeemed = f
        .redemptions
        .redeem(&f.customer_id, &f.coupon_id)
        .await
        .unwrap();

    assert_eq!(redeemed.id, claim.id);
    assert!(redeemed.used);
    assert!(redeemed.used_at.is_some());

    let stored = f.persistence.claims_for_coupon(&f.coupon_id);
    assert_eq!(stored.len(), 1);
    assert!(stored[0].used);
    assert_eq!(stored[0].used_at, redeemed.used_at);

    assert_eq!(
        f.redemptions.redeem(&f.customer_id, &f.coupon_id).await,
        Err(CouponError::NotRedeemable)
    );
}

#[tokio::test]
async fn test_never_claimed_is_not_redeemable() {
    let f = fixture(2).await;

    assert_eq!(
        f.redemptions.redeem(&f.customer_id, &f.coupon_id).await,
        Err(CouponError::NotRedeemable)
    );
}

#[tokio::test]
async fn test_duplicate_claims_redeem_earliest_first() {
    let f = fixture(3).await;
    let first = f.claims.claim(&f.customer_id, &f.coupon_id).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = f.claims.claim(&f.customer_id, &f.coupon_id).await.unwrap();

    let redeemed = f
        .redemptions
        .redeem(&f.customer_id, &f.coupon_id)
        .await
        .unwrap();
    assert_eq!(redeemed.id, first.id);

    let remaining = f
        .persistence
        .claim_find_unused(&f.customer_id, &f.coupon_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(remaining.id, second.id);

    assert!(f.redemptions.redeem(&f.customer_id, &f.coupon_id).await.is_ok());
    assert_eq!(
        f.redemptions.redeem(&f.customer_id, &f.coupon_id).await,
        Err(CouponError::NotRedeemable)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_redemptions_transition_once() {
    let f = fixture(1).await;
    f.claims.claim(&f.customer_id, &f.coupon_id).await.unwrap();
    let redemptions = Arc::new(f.redemptions.clone());

    let mut handles = Vec::new();
    for _ in 0..10 {
        let redemptions = redemptions.clone();
        let customer_id = f.customer_id.clone();
        let coupon_id = f.coupon_id.clone();
        handles.push(tokio::spawn(async move {
            redemptions.redeem(&customer_id, &coupon_id).await
        }));
    }

    let results: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| *r == Err(CouponError::NotRedeemable))
    );
}

#[tokio::test]
async fn test_redeem_validates_ids() {
    let f = fixture(1).await;

    assert!(matches!(
        f.redemptions.redeem("", &f.coupon_id).await,
        Err(CouponError::InvalidRequest(_))
    ));
    assert!(matches!(
        f.redemptions.redeem(&f.customer_id, "").await,
        Err(CouponError::InvalidRequest(_))
    ));
}

#[tokio::test]
async fn test_unreachable_database_is_database_error() {
    let redemptions = RedemptionController::new(Arc::new(UnreachablePersistence));

    assert!(matches!(
        redemptions.redeem("c1", "k1").await,
        Err(CouponError::DatabaseError(_))
    ));
}
