//! Client-side cart mirror.
//!
//! Keeps the cart a user agent displays. As a guest, entries live in local
//! storage. Once signed in, the server cart is the source of truth and every
//! change goes through the `CartGateway`; the view is replaced wholesale by
//! whatever the server returns.

use std::sync::Arc;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::cart::{CartView, MirrorEntry};
use crate::domain::catalog::ProductSnapshot;
use crate::domain::foundation::{ErrorCode, Money, ProductId, Quantity};
use crate::domain::order::{Order, ShippingAddress};
use crate::ports::{CartGateway, LocalCartStore, OrderSubmission, SubmittedLine};

use super::MirrorError;

/// What happens to the guest cart when the user signs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginCartPolicy {
    /// Show the server cart; guest entries stay in local storage untouched.
    #[default]
    Replace,
    /// Push every guest entry to the server cart, then clear local storage.
    Merge,
}

enum MirrorState {
    Guest,
    Authenticated { token: SecretString },
}

/// The cart mirror. One instance per user agent.
pub struct CartMirror {
    gateway: Arc<dyn CartGateway>,
    local: Arc<dyn LocalCartStore>,
    login_policy: LoginCartPolicy,
    state: MirrorState,
    entries: Vec<MirrorEntry>,
}

impl CartMirror {
    /// Starts as a guest with whatever is saved locally.
    pub async fn load(
        gateway: Arc<dyn CartGateway>,
        local: Arc<dyn LocalCartStore>,
        login_policy: LoginCartPolicy,
    ) -> Result<Self, MirrorError> {
        let entries = local.load().await?;
        Ok(Self {
            gateway,
            local,
            login_policy,
            state: MirrorState::Guest,
            entries,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn entries(&self) -> &[MirrorEntry] {
        &self.entries
    }

    pub fn entry(&self, product_id: &ProductId) -> Option<&MirrorEntry> {
        self.entries.iter().find(|e| &e.product_id == product_id)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, MirrorState::Authenticated { .. })
    }

    /// Sum of derived unit price times quantity, recomputed on every call.
    pub fn total(&self) -> Money {
        self.entries.iter().map(MirrorEntry::line_total).sum()
    }

    /// Total number of units across entries.
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity.get())).sum()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Switches to the server cart.
    ///
    /// On failure the mirror stays a guest. Under `Merge`, each guest entry
    /// is dropped from local storage as soon as the server has taken it, so
    /// a retried login pushes only what is left. Entries whose product no
    /// longer exists are skipped.
    pub async fn login(&mut self, token: SecretString) -> Result<(), MirrorError> {
        if self.login_policy == LoginCartPolicy::Merge {
            self.push_guest_entries(&token).await?;
        }

        let view = self.gateway.fetch_cart(&token).await?;

        if self.login_policy == LoginCartPolicy::Merge {
            if let Err(err) = self.local.remove().await {
                tracing::warn!(error = %err, "merged guest cart but could not clear local copy");
            }
        }

        tracing::debug!(
            policy = ?self.login_policy,
            lines = view.lines.len(),
            "cart mirror signed in"
        );
        self.state = MirrorState::Authenticated { token };
        self.replace_view(&view);
        Ok(())
    }

    async fn push_guest_entries(&mut self, token: &SecretString) -> Result<(), MirrorError> {
        while let Some(entry) = self.entries.first().cloned() {
            match self
                .gateway
                .add_line(token, &entry.product_id, entry.quantity)
                .await
            {
                Ok(_) => {}
                Err(err) if err.code == ErrorCode::ProductNotFound => {
                    tracing::warn!(
                        product_id = %entry.product_id,
                        "dropping guest entry for a product that no longer exists"
                    );
                }
                Err(err) => return Err(err.into()),
            }
            let remaining = self.entries[1..].to_vec();
            self.persist_guest(remaining).await?;
        }
        Ok(())
    }

    /// Returns to guest mode and reloads the locally saved cart.
    pub async fn logout(&mut self) -> Result<(), MirrorError> {
        self.state = MirrorState::Guest;
        self.entries = self.local.load().await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds one unit of a product, merging with an existing entry.
    pub async fn add(&mut self, product: &ProductSnapshot) -> Result<(), MirrorError> {
        match &self.state {
            MirrorState::Authenticated { token } => {
                let view = self
                    .gateway
                    .add_line(token, &product.id, Quantity::ONE)
                    .await?;
                self.replace_view(&view);
                Ok(())
            }
            MirrorState::Guest => {
                let mut next = self.entries.clone();
                match next.iter_mut().find(|e| e.product_id == product.id) {
                    Some(entry) => {
                        entry.quantity = entry
                            .quantity
                            .checked_add(Quantity::ONE)
                            .map_err(|e| MirrorError::InvalidArgument(e.to_string()))?;
                    }
                    None => next.push(MirrorEntry::from_product(product, Quantity::ONE)),
                }
                self.persist_guest(next).await
            }
        }
    }

    /// Replaces the quantity of an entry. Unknown entries are ignored in guest mode.
    pub async fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<(), MirrorError> {
        match &self.state {
            MirrorState::Authenticated { token } => {
                let view = self
                    .gateway
                    .set_line_quantity(token, product_id, quantity)
                    .await?;
                self.replace_view(&view);
                Ok(())
            }
            MirrorState::Guest => {
                let mut next = self.entries.clone();
                if let Some(entry) = next.iter_mut().find(|e| &e.product_id == product_id) {
                    entry.quantity = quantity;
                }
                self.persist_guest(next).await
            }
        }
    }

    pub async fn remove(&mut self, product_id: &ProductId) -> Result<(), MirrorError> {
        match &self.state {
            MirrorState::Authenticated { token } => {
                let view = self.gateway.remove_line(token, product_id).await?;
                self.replace_view(&view);
                Ok(())
            }
            MirrorState::Guest => {
                let next = self
                    .entries
                    .iter()
                    .filter(|e| &e.product_id != product_id)
                    .cloned()
                    .collect();
                self.persist_guest(next).await
            }
        }
    }

    /// Lowers an entry by one unit; at one unit the entry is removed instead.
    pub async fn decrement(&mut self, product_id: &ProductId) -> Result<(), MirrorError> {
        let Some(quantity) = self.entry(product_id).map(|e| e.quantity) else {
            return Ok(());
        };
        match quantity.decremented() {
            Some(lower) => self.update_quantity(product_id, lower).await,
            None => self.remove(product_id).await,
        }
    }

    pub async fn clear(&mut self) -> Result<(), MirrorError> {
        match &self.state {
            MirrorState::Authenticated { token } => {
                let view = self.gateway.clear(token).await?;
                self.replace_view(&view);
                Ok(())
            }
            MirrorState::Guest => {
                self.local.remove().await?;
                self.entries.clear();
                Ok(())
            }
        }
    }

    /// Submits the current entries as an order. Refused while the cart
    /// still shows products the catalog no longer has.
    ///
    /// Each entry's derived unit price is captured as the line price and the
    /// computed total is sent along for the server to check.
    pub async fn checkout(&mut self, address: ShippingAddress) -> Result<Order, MirrorError> {
        let MirrorState::Authenticated { token } = &self.state else {
            return Err(MirrorError::Unauthorized);
        };
        let unresolved: Vec<String> = self
            .entries
            .iter()
            .filter(|e| !e.resolved)
            .map(|e| e.product_id.to_string())
            .collect();
        if !unresolved.is_empty() {
            return Err(MirrorError::InvalidArgument(format!(
                "remove unavailable products before checkout: {}",
                unresolved.join(", ")
            )));
        }

        let submission = OrderSubmission {
            items: self
                .entries
                .iter()
                .map(|e| SubmittedLine {
                    product_id: e.product_id,
                    quantity: e.quantity,
                    price: e.unit_price(),
                })
                .collect(),
            total_amount: Some(self.total()),
            shipping_address: address,
        };

        let order = self.gateway.place_order(token, &submission).await?;
        tracing::info!(order_id = %order.id(), "checkout complete");
        self.entries.clear();
        Ok(order)
    }

    fn replace_view(&mut self, view: &CartView) {
        self.entries = view.lines.iter().map(MirrorEntry::from_line_view).collect();
    }

    async fn persist_guest(&mut self, next: Vec<MirrorEntry>) -> Result<(), MirrorError> {
        self.local.save(&next).await?;
        self.entries = next;
        Ok(())
    }
}
