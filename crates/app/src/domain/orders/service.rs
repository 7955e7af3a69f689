//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::repository::PgCartsRepository,
        orders::{
            errors::OrdersServiceError,
            models::{OrderHistory, OrderHistorySession, OrderLine, OrderSession},
            repository::PgOrdersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(&self, user_uuid: Uuid) -> Result<OrderSession, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository
            .find_user_name(&mut tx, user_uuid)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let open_lines = self
            .carts_repository
            .list_open_lines(&mut tx, user_uuid)
            .await?;

        let session = self
            .repository
            .create_session(&mut tx, Uuid::now_v7(), user_uuid)
            .await?;

        for line in &open_lines {
            self.repository
                .insert_order_line(
                    &mut tx,
                    Uuid::now_v7(),
                    session.uuid,
                    &line.item_name,
                    line.item_price,
                    line.item_quantity,
                )
                .await?;
        }

        self.repository.mark_lines_bought(&mut tx, user_uuid).await?;

        tx.commit().await?;

        Ok(session)
    }

    async fn order_history(&self, user_uuid: Uuid) -> Result<OrderHistory, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let user_name = self
            .repository
            .find_user_name(&mut tx, user_uuid)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let rows = self.repository.list_history(&mut tx, user_uuid).await?;

        tx.commit().await?;

        // Rows arrive sorted by session, so grouping is a single pass.
        let mut sessions: Vec<OrderHistorySession> = Vec::new();

        for row in rows {
            if sessions.last().map(|session| session.uuid) != Some(row.session_uuid) {
                sessions.push(OrderHistorySession {
                    uuid: row.session_uuid,
                    ordered_at: row.ordered_at,
                    items: Vec::new(),
                });
            }

            if let Some(session) = sessions.last_mut() {
                session.items.push(OrderLine {
                    uuid: row.line_uuid,
                    session_uuid: row.session_uuid,
                    item_name: row.item_name,
                    item_price: row.item_price,
                    item_quantity: row.item_quantity,
                });
            }
        }

        Ok(OrderHistory {
            user_name,
            user_uuid,
            sessions,
        })
    }
}

#[automock]
#[async_trait]
/// Checkout and purchase history.
pub trait OrdersService: Send + Sync {
    /// Freeze the user's open cart lines into a new order session and
    /// mark them bought, atomically.
    async fn checkout(&self, user_uuid: Uuid) -> Result<OrderSession, OrdersServiceError>;

    /// The user's sessions with their lines, newest first. Sessions
    /// that captured no lines are omitted.
    async fn order_history(&self, user_uuid: Uuid) -> Result<OrderHistory, OrdersServiceError>;
}
