//! AddCartLineHandler - Command handler for merge-adding a product.

use std::sync::Arc;

use crate::domain::cart::{CartError, CartView};
use crate::domain::foundation::{ProductId, Quantity, UserId};
use crate::ports::{CartRepository, ProductRepository};

use super::CartPresenter;

/// Command to add a quantity of a product to the caller's cart.
#[derive(Debug, Clone)]
pub struct AddCartLineCommand {
    pub user_id: UserId,
    pub product_id: ProductId,
    /// Raw requested quantity; must be ≥ 1.
    pub quantity: i64,
}

/// Handler for adding cart lines.
pub struct AddCartLineHandler {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
    presenter: CartPresenter,
}

impl AddCartLineHandler {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        products: Arc<dyn ProductRepository>,
        presenter: CartPresenter,
    ) -> Self {
        Self {
            carts,
            products,
            presenter,
        }
    }

    pub async fn handle(&self, cmd: AddCartLineCommand) -> Result<CartView, CartError> {
        let quantity = Quantity::new(cmd.quantity)?;

        if self.products.resolve(&cmd.product_id).await?.is_none() {
            return Err(CartError::ProductNotFound(cmd.product_id));
        }

        let cart = self
            .carts
            .add_line(&cmd.user_id, &cmd.product_id, quantity)
            .await?;
        tracing::debug!(
            owner = %cmd.user_id,
            product_id = %cmd.product_id,
            quantity = quantity.get(),
            "cart line added"
        );

        self.presenter.present(cart).await
    }
}
