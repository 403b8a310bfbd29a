//! ClearCartHandler - Command handler emptying the caller's cart.

use std::sync::Arc;

use crate::domain::cart::{CartError, CartView};
use crate::domain::foundation::UserId;
use crate::ports::CartRepository;

use super::CartPresenter;

#[derive(Debug, Clone)]
pub struct ClearCartCommand {
    pub user_id: UserId,
}

pub struct ClearCartHandler {
    carts: Arc<dyn CartRepository>,
    presenter: CartPresenter,
}

impl ClearCartHandler {
    pub fn new(carts: Arc<dyn CartRepository>, presenter: CartPresenter) -> Self {
        Self { carts, presenter }
    }

    pub async fn handle(&self, cmd: ClearCartCommand) -> Result<CartView, CartError> {
        let cart = self.carts.clear(&cmd.user_id).await?;
        tracing::debug!(owner = %cmd.user_id, "cart cleared");
        self.presenter.present(cart).await
    }
}
