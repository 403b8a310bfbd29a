//! Read-time join of a stored cart with the catalog.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::try_join_all;

use crate::domain::cart::{Cart, CartError, CartView, DanglingLinePolicy};
use crate::ports::{CartRepository, ProductRepository};

/// Turns stored carts into `CartView`s.
///
/// Products are resolved concurrently. Under `DanglingLinePolicy::Drop`,
/// lines whose product is gone are removed from the stored cart; a failure
/// to remove them is logged and does not fail the read.
#[derive(Clone)]
pub struct CartPresenter {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
    policy: DanglingLinePolicy,
}

impl CartPresenter {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        products: Arc<dyn ProductRepository>,
        policy: DanglingLinePolicy,
    ) -> Self {
        Self {
            carts,
            products,
            policy,
        }
    }

    pub async fn present(&self, cart: Cart) -> Result<CartView, CartError> {
        let lookups = cart
            .lines()
            .iter()
            .map(|line| self.products.resolve(&line.product_id));
        let resolved = try_join_all(lookups).await?;
        let products: HashMap<_, _> = resolved
            .into_iter()
            .flatten()
            .map(|snapshot| (snapshot.id, snapshot))
            .collect();

        let (view, dangling) = CartView::build(&cart, &products, self.policy);

        if !dangling.is_empty() && self.policy == DanglingLinePolicy::Drop {
            tracing::debug!(
                owner = %cart.owner(),
                count = dangling.len(),
                "dropping cart lines for missing products"
            );
            if let Err(err) = self.carts.remove_lines(cart.owner(), &dangling).await {
                tracing::warn!(owner = %cart.owner(), error = %err, "failed to drop dangling cart lines");
            }
        }

        Ok(view)
    }
}
