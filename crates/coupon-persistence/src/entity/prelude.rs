pub use super::coupon::Entity as Coupon;
pub use super::customer::Entity as Customer;
pub use super::customer_coupon::Entity as CustomerCoupon;
