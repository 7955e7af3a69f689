//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::orders::models::{OrderLine, OrderSession};

const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const INSERT_ORDER_LINE_SQL: &str = include_str!("sql/insert_order_line.sql");
const MARK_LINES_BOUGHT_SQL: &str = include_str!("sql/mark_lines_bought.sql");
const LIST_HISTORY_SQL: &str = include_str!("sql/list_history.sql");
const FIND_USER_NAME_SQL: &str = include_str!("sql/find_user_name.sql");

/// One joined (session, line) row of a user's history.
#[derive(Debug, Clone)]
pub(crate) struct HistoryRow {
    pub(crate) session_uuid: Uuid,
    pub(crate) ordered_at: Timestamp,
    pub(crate) line_uuid: Uuid,
    pub(crate) item_name: String,
    pub(crate) item_price: Decimal,
    pub(crate) item_quantity: i32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
        user_uuid: Uuid,
    ) -> Result<OrderSession, sqlx::Error> {
        query_as::<Postgres, OrderSession>(CREATE_SESSION_SQL)
            .bind(uuid)
            .bind(user_uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn insert_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
        session_uuid: Uuid,
        item_name: &str,
        item_price: Decimal,
        item_quantity: i32,
    ) -> Result<OrderLine, sqlx::Error> {
        query_as::<Postgres, OrderLine>(INSERT_ORDER_LINE_SQL)
            .bind(uuid)
            .bind(session_uuid)
            .bind(item_name)
            .bind(item_price)
            .bind(item_quantity)
            .fetch_one(&mut **tx)
            .await
    }

    /// Flip every open line for the user to bought, including any that
    /// raced in after the checkout snapshot was taken.
    pub(crate) async fn mark_lines_bought(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_uuid: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_LINES_BOUGHT_SQL)
            .bind(user_uuid)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// The user's history as flat (session, line) rows, newest session
    /// first. Sessions with no lines do not appear.
    pub(crate) async fn list_history(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_uuid: Uuid,
    ) -> Result<Vec<HistoryRow>, sqlx::Error> {
        query_as::<Postgres, HistoryRow>(LIST_HISTORY_SQL)
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

impl<'r> FromRow<'r, PgRow> for OrderSession {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            ordered_at: row.try_get::<SqlxTimestamp, _>("ordered_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            session_uuid: row.try_get("session_uuid")?,
            item_name: row.try_get("item_name")?,
            item_price: row.try_get("item_price")?,
            item_quantity: row.try_get("item_quantity")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for HistoryRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            session_uuid: row.try_get("session_uuid")?,
            ordered_at: row.try_get::<SqlxTimestamp, _>("ordered_at")?.to_jiff(),
            line_uuid: row.try_get("line_uuid")?,
            item_name: row.try_get("item_name")?,
            item_price: row.try_get("item_price")?,
            item_quantity: row.try_get("item_quantity")?,
        })
    }
}
