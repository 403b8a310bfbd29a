//! SetCartLineQuantityHandler - Command handler replacing a line's quantity.

use std::sync::Arc;

use crate::domain::cart::{CartError, CartView};
use crate::domain::foundation::{ProductId, Quantity, UserId};
use crate::ports::CartRepository;

use super::CartPresenter;

/// Command to replace the quantity of an existing line.
#[derive(Debug, Clone)]
pub struct SetCartLineQuantityCommand {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i64,
}

pub struct SetCartLineQuantityHandler {
    carts: Arc<dyn CartRepository>,
    presenter: CartPresenter,
}

impl SetCartLineQuantityHandler {
    pub fn new(carts: Arc<dyn CartRepository>, presenter: CartPresenter) -> Self {
        Self { carts, presenter }
    }

    pub async fn handle(&self, cmd: SetCartLineQuantityCommand) -> Result<CartView, CartError> {
        let quantity = Quantity::new(cmd.quantity)?;
        let cart = self
            .carts
            .set_line_quantity(&cmd.user_id, &cmd.product_id, quantity)
            .await?;
        tracing::debug!(
            owner = %cmd.user_id,
            product_id = %cmd.product_id,
            quantity = quantity.get(),
            "cart line quantity set"
        );
        self.presenter.present(cart).await
    }
}
