//! Customer persistence trait

use async_trait::async_trait;

use crate::model::CustomerInfo;

/// Customer reference data operations
#[async_trait]
pub trait CustomerPersistence: Send + Sync {
    /// List all customers
    async fn customer_find_all(&self) -> anyhow::Result<Vec<CustomerInfo>>;

    /// Count customers
    async fn customer_count(&self) -> anyhow::Result<u64>;

    /// Create a customer with a fresh id; names are unique
    async fn customer_create(&self, name: &str) -> anyhow::Result<CustomerInfo>;
}
