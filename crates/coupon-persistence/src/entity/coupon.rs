//! Coupon entity
//!
//! `remaining` is only ever decremented by the claim transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
    /// Discount kind: `price` (fixed amount) or `percentage`
    pub discount_type: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub discount_value: Decimal,
    pub total_issued: i32,
    pub remaining: i32,
    pub expires_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::customer_coupon::Entity")]
    CustomerCoupon,
}

impl Related<super::customer_coupon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerCoupon.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
