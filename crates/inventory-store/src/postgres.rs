use async_trait::async_trait;
use common::{Money, ProductId, TransactionId, UserId};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    InventoryTransaction, NewProduct, NewTransaction, Product, ProductChanges, Result, StoreError,
    TransactionQuery, TransactionType,
    store::{ProductStore, TransactionStore},
};

const TRANSACTION_COLUMNS: &str =
    "id, created_at, product_id, user_id, type, quantity_change, notes";

const PRODUCT_COLUMNS: &str = "id, name, description, price_cents, created_at, updated_at";

/// Runs the database migrations for both stores.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// PostgreSQL-backed ledger implementation.
#[derive(Clone)]
pub struct PostgresTransactionStore {
    pool: PgPool,
}

impl PostgresTransactionStore {
    /// Creates a new PostgreSQL ledger.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_transaction(row: PgRow) -> Result<InventoryTransaction> {
        let tag: String = row.try_get("type")?;
        let transaction_type = tag
            .parse::<TransactionType>()
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;

        Ok(InventoryTransaction {
            id: TransactionId::new(row.try_get("id")?),
            created_at: row.try_get("created_at")?,
            product_id: ProductId::new(row.try_get("product_id")?),
            user_id: UserId::new(row.try_get("user_id")?),
            transaction_type,
            quantity_change: row.try_get("quantity_change")?,
            notes: row.try_get("notes")?,
        })
    }
}

#[async_trait]
impl TransactionStore for PostgresTransactionStore {
    #[tracing::instrument(skip(self))]
    async fn append(&self, transaction: NewTransaction) -> Result<InventoryTransaction> {
        // A single INSERT is atomic; no explicit transaction needed.
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO inventory_transactions (product_id, user_id, type, quantity_change, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(transaction.product_id.as_i64())
        .bind(transaction.user_id.as_i64())
        .bind(transaction.transaction_type.as_str())
        .bind(transaction.quantity_change)
        .bind(&transaction.notes)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_transaction(row)
    }

    async fn list_by_product(&self, product_id: ProductId) -> Result<Vec<InventoryTransaction>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM inventory_transactions
            WHERE product_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(product_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_transaction).collect()
    }

    async fn sum_quantity_by_product(&self, product_id: ProductId) -> Result<i64> {
        // SUM over an empty set is NULL; COALESCE turns it into 0.
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantity_change), 0)::BIGINT FROM inventory_transactions WHERE product_id = $1",
        )
        .bind(product_id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn query(&self, query: TransactionQuery) -> Result<Vec<InventoryTransaction>> {
        let mut sql = format!("SELECT {TRANSACTION_COLUMNS} FROM inventory_transactions WHERE 1=1");
        let mut param_count = 0;

        // Build dynamic query
        if query.product_id.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND product_id = ${param_count}"));
        }
        if query.user_id.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND user_id = ${param_count}"));
        }
        if query.transaction_types.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND type = ANY(${param_count})"));
        }
        if query.from_timestamp.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND created_at >= ${param_count}"));
        }
        if query.to_timestamp.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND created_at <= ${param_count}"));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

        if query.limit.is_some() {
            param_count += 1;
            sql.push_str(&format!(" LIMIT ${param_count}"));
        }
        if query.offset.is_some() {
            param_count += 1;
            sql.push_str(&format!(" OFFSET ${param_count}"));
        }

        // Bind in the same order the placeholders were numbered
        let mut sqlx_query = sqlx::query(&sql);

        if let Some(id) = query.product_id {
            sqlx_query = sqlx_query.bind(id.as_i64());
        }
        if let Some(id) = query.user_id {
            sqlx_query = sqlx_query.bind(id.as_i64());
        }
        if let Some(types) = query.transaction_types {
            let tags: Vec<String> = types.iter().map(|t| t.as_str().to_string()).collect();
            sqlx_query = sqlx_query.bind(tags);
        }
        if let Some(from_ts) = query.from_timestamp {
            sqlx_query = sqlx_query.bind(from_ts);
        }
        if let Some(to_ts) = query.to_timestamp {
            sqlx_query = sqlx_query.bind(to_ts);
        }
        // Values past i64::MAX cannot match more rows than the table holds.
        if let Some(limit) = query.limit {
            sqlx_query = sqlx_query.bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }
        if let Some(offset) = query.offset {
            sqlx_query = sqlx_query.bind(i64::try_from(offset).unwrap_or(i64::MAX));
        }

        let rows = sqlx_query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_transaction).collect()
    }
}

/// PostgreSQL-backed product catalog.
#[derive(Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    /// Creates a new PostgreSQL product catalog.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        Ok(Product {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: Money::from_cents(row.try_get("price_cents")?),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_product).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, product: NewProduct) -> Result<Product> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO products (name, description, price_cents)
            VALUES ($1, $2, $3)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_product(row)
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, id: ProductId, changes: ProductChanges) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE products
            SET name = $2, description = $3, price_cents = $4, updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id.as_i64())
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.price.cents())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_product).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
