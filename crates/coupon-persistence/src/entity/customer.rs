//! Customer entity
//!
//! Created once at onboarding, immutable afterwards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique, column_type = "String(StringLen::N(20))")]
    pub name: String,
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
