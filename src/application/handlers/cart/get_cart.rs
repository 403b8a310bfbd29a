//! GetCartHandler - Query handler returning the caller's cart.

use std::sync::Arc;

use crate::domain::cart::{CartError, CartView};
use crate::domain::foundation::UserId;
use crate::ports::CartRepository;

use super::CartPresenter;

/// Query for the caller's cart.
#[derive(Debug, Clone)]
pub struct GetCartQuery {
    pub user_id: UserId,
}

/// Returns the existing cart, or a freshly created empty one.
pub struct GetCartHandler {
    carts: Arc<dyn CartRepository>,
    presenter: CartPresenter,
}

impl GetCartHandler {
    pub fn new(carts: Arc<dyn CartRepository>, presenter: CartPresenter) -> Self {
        Self { carts, presenter }
    }

    pub async fn handle(&self, query: GetCartQuery) -> Result<CartView, CartError> {
        let cart = self.carts.find_or_create(&query.user_id).await?;
        self.presenter.present(cart).await
    }
}
