//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::carts::{
        errors::CartsServiceError,
        models::{AddItemOutcome, CartLine, CartView, NewCartLine, SetQuantityOutcome},
        repository::PgCartsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add_item(
        &self,
        user_uuid: Uuid,
        line: NewCartLine,
    ) -> Result<AddItemOutcome, CartsServiceError> {
        if line.item_price < Decimal::ZERO {
            return Err(CartsServiceError::NegativePrice);
        }

        if line.item_quantity <= 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        // Exact (name, price) match: one open line per tuple, so a
        // repeat add merges quantities instead of duplicating rows.
        let existing = self
            .repository
            .find_active_line(&mut tx, user_uuid, &line.item_name, line.item_price)
            .await?;

        let outcome = match existing {
            Some(found) => {
                let merged_quantity = found
                    .item_quantity
                    .checked_add(line.item_quantity)
                    .ok_or(CartsServiceError::InvalidQuantity)?;

                let merged = self
                    .repository
                    .update_quantity(&mut tx, found.uuid, user_uuid, merged_quantity)
                    .await?
                    .ok_or(CartsServiceError::NotFound)?;

                AddItemOutcome::QuantityUpdated(merged)
            }
            None => {
                let created = self
                    .repository
                    .insert_line(
                        &mut tx,
                        Uuid::now_v7(),
                        user_uuid,
                        &line.item_name,
                        line.item_price,
                        line.item_quantity,
                    )
                    .await?;

                AddItemOutcome::Added(created)
            }
        };

        tx.commit().await?;

        Ok(outcome)
    }

    async fn set_quantity(
        &self,
        user_uuid: Uuid,
        line_uuid: Uuid,
        quantity: i32,
    ) -> Result<SetQuantityOutcome, CartsServiceError> {
        if quantity < 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let outcome = if quantity == 0 {
            self.repository
                .delete_line(&mut tx, line_uuid, user_uuid)
                .await?;

            SetQuantityOutcome::Removed
        } else {
            // A miss (unknown id, foreign line, already bought) is a
            // no-op success; this route never reports not-found.
            self.repository
                .update_quantity(&mut tx, line_uuid, user_uuid, quantity)
                .await?;

            SetQuantityOutcome::Updated
        };

        tx.commit().await?;

        Ok(outcome)
    }

    async fn remove_item(&self, user_uuid: Uuid, line_uuid: Uuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository
            .delete_line(&mut tx, line_uuid, user_uuid)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn view_cart(&self, user_uuid: Uuid) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let user_name = self
            .repository
            .find_user_name(&mut tx, user_uuid)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let items = self.repository.list_open_lines(&mut tx, user_uuid).await?;

        tx.commit().await?;

        let total = items
            .iter()
            .map(|line| line.item_price * Decimal::from(line.item_quantity))
            .sum();

        Ok(CartView {
            user_name,
            user_uuid,
            items,
            total,
        })
    }
}

#[automock]
#[async_trait]
/// CRUD over a user's open cart lines.
pub trait CartsService: Send + Sync {
    /// Add an item, merging into an existing open (name, price) line.
    async fn add_item(
        &self,
        user_uuid: Uuid,
        line: NewCartLine,
    ) -> Result<AddItemOutcome, CartsServiceError>;

    /// Overwrite a line's quantity; zero deletes, negative is rejected.
    async fn set_quantity(
        &self,
        user_uuid: Uuid,
        line_uuid: Uuid,
        quantity: i32,
    ) -> Result<SetQuantityOutcome, CartsServiceError>;

    /// Delete a line outright.
    async fn remove_item(&self, user_uuid: Uuid, line_uuid: Uuid) -> Result<(), CartsServiceError>;

    /// The user's open lines plus the summed total.
    async fn view_cart(&self, user_uuid: Uuid) -> Result<CartView, CartsServiceError>;
}
