//! RemoveCartLineHandler - Command handler removing a line (idempotent).

use std::sync::Arc;

use crate::domain::cart::{CartError, CartView};
use crate::domain::foundation::{ProductId, UserId};
use crate::ports::CartRepository;

use super::CartPresenter;

#[derive(Debug, Clone)]
pub struct RemoveCartLineCommand {
    pub user_id: UserId,
    pub product_id: ProductId,
}

pub struct RemoveCartLineHandler {
    carts: Arc<dyn CartRepository>,
    presenter: CartPresenter,
}

impl RemoveCartLineHandler {
    pub fn new(carts: Arc<dyn CartRepository>, presenter: CartPresenter) -> Self {
        Self { carts, presenter }
    }

    /// Removes the line. An absent line or cart is not an error.
    pub async fn handle(&self, cmd: RemoveCartLineCommand) -> Result<CartView, CartError> {
        let cart = self
            .carts
            .remove_lines(&cmd.user_id, &[cmd.product_id])
            .await?;
        tracing::debug!(owner = %cmd.user_id, product_id = %cmd.product_id, "cart line removed");
        self.presenter.present(cart).await
    }
}
