//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::carts::models::CartLine;

const FIND_ACTIVE_LINE_SQL: &str = include_str!("sql/find_active_line.sql");
const INSERT_LINE_SQL: &str = include_str!("sql/insert_line.sql");
const UPDATE_QUANTITY_SQL: &str = include_str!("sql/update_quantity.sql");
const DELETE_LINE_SQL: &str = include_str!("sql/delete_line.sql");
const LIST_OPEN_LINES_SQL: &str = include_str!("sql/list_open_lines.sql");
const FIND_USER_NAME_SQL: &str = include_str!("sql/find_user_name.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Look up the single open line matching (user, name, price) exactly.
    pub(crate) async fn find_active_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_uuid: Uuid,
        item_name: &str,
        item_price: Decimal,
    ) -> Result<Option<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(FIND_ACTIVE_LINE_SQL)
            .bind(user_uuid)
            .bind(item_name)
            .bind(item_price)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn insert_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
        user_uuid: Uuid,
        item_name: &str,
        item_price: Decimal,
        item_quantity: i32,
    ) -> Result<CartLine, sqlx::Error> {
        query_as::<Postgres, CartLine>(INSERT_LINE_SQL)
            .bind(uuid)
            .bind(user_uuid)
            .bind(item_name)
            .bind(item_price)
            .bind(item_quantity)
            .fetch_one(&mut **tx)
            .await
    }

    /// Overwrite a line's quantity, scoped to the owning user's open
    /// lines. Returns the updated line, or `None` when nothing matched.
    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line_uuid: Uuid,
        user_uuid: Uuid,
        item_quantity: i32,
    ) -> Result<Option<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(UPDATE_QUANTITY_SQL)
            .bind(line_uuid)
            .bind(user_uuid)
            .bind(item_quantity)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line_uuid: Uuid,
        user_uuid: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LINE_SQL)
            .bind(line_uuid)
            .bind(user_uuid)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_open_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_uuid: Uuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(LIST_OPEN_LINES_SQL)
            .bind(user_uuid)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_uuid: Uuid,
    ) -> Result<Option<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(FIND_USER_NAME_SQL)
            .bind(user_uuid)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            item_name: row.try_get("item_name")?,
            item_price: row.try_get("item_price")?,
            item_quantity: row.try_get("item_quantity")?,
            bought: row.try_get("bought")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
