//! Table creation for the external database backend

use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};

use crate::entity::{coupon, customer, customer_coupon};

/// Create the coupon tables if they do not exist yet
///
/// Parents are created before `customer_coupons` so its foreign keys resolve.
pub async fn sync_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    create_table(db, customer::Entity).await?;
    create_table(db, coupon::Entity).await?;
    create_table(db, customer_coupon::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> anyhow::Result<()> {
    let table = entity.table_name().to_owned();
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;

    tracing::debug!(table = %table, "table ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm::DbBackend;

    use super::*;

    #[test]
    fn test_customer_name_column_is_bounded() {
        let stmt = Schema::new(DbBackend::MySql).create_table_from_entity(customer::Entity);
        let sql = DbBackend::MySql.build(&stmt).sql;
        assert!(sql.contains("`name` varchar(20)"), "{}", sql);
    }
}
