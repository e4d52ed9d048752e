//! Domain model types for the persistence abstraction layer
//!
//! These types are used as return values from the persistence traits,
//! decoupled from specific storage backends.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::{coupon, customer, customer_coupon};

/// Maximum length of a customer display name
pub const CUSTOMER_NAME_MAX_LENGTH: usize = 20;

/// Generate a new opaque row identifier (random 128-bit, hyphenated)
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Customer information returned from persistence
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub id: String,
    pub name: String,
}

impl From<customer::Model> for CustomerInfo {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Kind of discount a coupon grants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Fixed amount off
    Price,
    /// Percentage off
    Percentage,
}

impl DiscountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiscountKind::Price => "price",
            DiscountKind::Percentage => "percentage",
        }
    }
}

impl std::fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DiscountKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(DiscountKind::Price),
            "percentage" => Ok(DiscountKind::Percentage),
            other => Err(anyhow::anyhow!("unknown discount type '{}'", other)),
        }
    }
}

/// Coupon information returned from persistence
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponInfo {
    pub id: String,
    pub name: String,
    pub discount_type: DiscountKind,
    pub discount_value: Decimal,
    pub total_issued: i32,
    pub remaining: i32,
    pub expires_at: DateTime<Utc>,
}

impl TryFrom<coupon::Model> for CouponInfo {
    type Error = anyhow::Error;

    fn try_from(model: coupon::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            discount_type: model.discount_type.parse()?,
            id: model.id,
            name: model.name,
            discount_value: model.discount_value,
            total_issued: model.total_issued,
            remaining: model.remaining,
            expires_at: model.expires_at,
        })
    }
}

/// Parameters for creating a coupon
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewCoupon {
    pub name: String,
    pub discount_type: DiscountKind,
    pub discount_value: Decimal,
    pub total_issued: i32,
    pub expires_at: DateTime<Utc>,
}

impl NewCoupon {
    /// Check creation invariants: non-empty name, positive value and stock
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("coupon name must not be empty");
        }
        if self.discount_value <= Decimal::ZERO {
            anyhow::bail!("discount value must be positive");
        }
        if self.total_issued <= 0 {
            anyhow::bail!("total issued must be positive");
        }
        Ok(())
    }
}

/// Validate a new customer display name
pub fn validate_customer_name(name: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("customer name must not be empty");
    }
    if name.chars().count() > CUSTOMER_NAME_MAX_LENGTH {
        anyhow::bail!(
            "customer name exceeds {} characters",
            CUSTOMER_NAME_MAX_LENGTH
        );
    }
    Ok(())
}

/// Claim (customer coupon ownership) record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimInfo {
    pub id: String,
    pub customer_id: String,
    pub coupon_id: String,
    pub used: bool,
    pub claimed_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

impl From<customer_coupon::Model> for ClaimInfo {
    fn from(model: customer_coupon::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            coupon_id: model.coupon_id,
            used: model.used,
            claimed_at: model.claimed_at,
            used_at: model.used_at,
        }
    }
}

/// Claim joined with its customer and coupon
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDetail {
    #[serde(flatten)]
    pub claim: ClaimInfo,
    pub customer: Option<CustomerInfo>,
    pub coupon: Option<CouponInfo>,
}

/// Outcome of the claim transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClaimIssue {
    /// Stock decremented and claim row inserted
    Issued(ClaimInfo),
    /// Coupon unknown or no stock left; nothing changed
    SoldOut,
    /// Coupon in stock but the customer does not exist; nothing changed
    UnknownCustomer,
}

/// Storage mode for the persistence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageMode {
    /// External database (MySQL/PostgreSQL via SeaORM)
    ExternalDb,
    /// In-process tables, for tests and infrastructure-free runs
    Memory,
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageMode::ExternalDb => write!(f, "external"),
            StorageMode::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "external" | "external_db" | "mysql" => Ok(StorageMode::ExternalDb),
            "memory" | "mem" => Ok(StorageMode::Memory),
            other => Err(anyhow::anyhow!("unknown persistence mode '{}'", other)),
        }
    }
}
