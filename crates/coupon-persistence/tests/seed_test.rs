//! Seeding and reference data tests against the in-memory backend

use coupon_persistence::{
    ClaimIssue, ClaimPersistence, CouponPersistence, CustomerPersistence, DiscountKind,
    MemoryPersistService, PersistenceService, StorageMode, seed_if_empty,
};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_seed_inserts_reference_data_once() {
    let service = MemoryPersistService::new();

    assert!(seed_if_empty(&service).await.unwrap());
    assert!(!seed_if_empty(&service).await.unwrap());

    let customers = service.customer_find_all().await.unwrap();
    assert_eq!(customers.len(), 2);
    assert!(customers.iter().any(|c| c.name == "王小龜"));
    assert!(customers.iter().any(|c| c.name == "周星星"));

    let coupons = service.coupon_find_all().await.unwrap();
    assert_eq!(coupons.len(), 2);
    for coupon in &coupons {
        assert_eq!(coupon.total_issued, 5);
        assert_eq!(coupon.remaining, 5);
        assert!(coupon.expires_at > chrono::Utc::now());
    }

    let cashback = coupons
        .iter()
        .find(|c| c.name == "NT$500 Cashback")
        .unwrap();
    assert_eq!(cashback.discount_type, DiscountKind::Price);
    assert_eq!(cashback.discount_value, Decimal::new(500, 0));
}

#[tokio::test]
async fn test_seeded_coupon_is_claimable() {
    let service = MemoryPersistService::new();
    seed_if_empty(&service).await.unwrap();

    let customer = service.customer_find_all().await.unwrap().remove(0);
    let coupon = service.coupon_find_all().await.unwrap().remove(0);

    let issue = service
        .claim_issue(&customer.id, &coupon.id, chrono::Utc::now())
        .await
        .unwrap();
    assert!(matches!(issue, ClaimIssue::Issued(_)));
    assert_eq!(service.remaining(&coupon.id), Some(4));
}

#[tokio::test]
async fn test_memory_backend_reports_mode() {
    let service = MemoryPersistService::new();
    assert_eq!(service.storage_mode(), StorageMode::Memory);
    assert!(service.health_check().await.is_ok());
}
