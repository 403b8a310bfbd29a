//! Cart aggregate entity.
//!
//! One cart exists per authenticated user. Lines reference catalog products
//! by id only; display fields are joined in at read time (see `CartView`).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, OwnedByUser, ProductId, Quantity, Timestamp, UserId,
};

/// One product reference plus quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

impl CartLine {
    pub fn new(product_id: ProductId, quantity: Quantity) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Cart aggregate - a user's in-progress selection.
///
/// # Invariants
///
/// - at most one line per `product_id`
/// - every quantity is ≥ 1
/// - `updated_at` moves forward on every effective mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    owner: UserId,
    lines: Vec<CartLine>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Cart {
    /// Create an empty cart for a user.
    pub fn new(owner: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            owner,
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a cart from persistence (no validation).
    pub fn reconstitute(
        owner: UserId,
        lines: Vec<CartLine>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            owner,
            lines,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line for a product, if present.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Merge-add: increments an existing line or appends a new one.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the merged quantity overflows
    pub fn add_line(&mut self, product_id: ProductId, quantity: Quantity) -> Result<(), DomainError> {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(quantity)?;
            }
            None => self.lines.push(CartLine::new(product_id, quantity)),
        }
        self.touch();
        Ok(())
    }

    /// Replaces the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// - `CartLineNotFound` if no line exists for the product
    pub fn set_line_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> Result<(), DomainError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| &l.product_id == product_id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CartLineNotFound, "Item not found in cart")
                    .with_detail("product_id", product_id.to_string())
            })?;
        line.quantity = quantity;
        self.touch();
        Ok(())
    }

    /// Removes the line for a product. Returns false (and changes nothing) if absent.
    pub fn remove_line(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        let removed = self.lines.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Removes every line referencing one of `product_ids`.
    pub fn remove_lines(&mut self, product_ids: &[ProductId]) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| !product_ids.contains(&l.product_id));
        let removed = before - self.lines.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }

    /// Empties the cart; the cart itself persists.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = self.updated_at.advance_from(Timestamp::now());
    }
}

impl OwnedByUser for Cart {
    fn owner_id(&self) -> &UserId {
        &self.owner
    }

    fn not_found_code(&self) -> ErrorCode {
        ErrorCode::CartNotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn qty(n: i64) -> Quantity {
        Quantity::new(n).unwrap()
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new(user());
        assert!(cart.is_empty());
        assert_eq!(cart.created_at(), cart.updated_at());
    }

    #[test]
    fn add_then_add_same_product_merges() {
        let p1 = ProductId::new();
        let mut cart = Cart::new(user());

        cart.add_line(p1, qty(2)).unwrap();
        assert_eq!(cart.lines(), &[CartLine::new(p1, qty(2))]);

        cart.add_line(p1, qty(3)).unwrap();
        assert_eq!(cart.lines(), &[CartLine::new(p1, qty(5))]);
    }

    #[test]
    fn add_distinct_products_keeps_insertion_order() {
        let (p1, p2) = (ProductId::new(), ProductId::new());
        let mut cart = Cart::new(user());
        cart.add_line(p2, qty(1)).unwrap();
        cart.add_line(p1, qty(1)).unwrap();
        let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![p2, p1]);
    }

    #[test]
    fn set_line_quantity_replaces() {
        let p1 = ProductId::new();
        let mut cart = Cart::new(user());
        cart.add_line(p1, qty(5)).unwrap();
        cart.set_line_quantity(&p1, qty(1)).unwrap();
        assert_eq!(cart.line(&p1).unwrap().quantity, qty(1));
    }

    #[test]
    fn set_line_quantity_fails_for_missing_line() {
        let mut cart = Cart::new(user());
        let err = cart.set_line_quantity(&ProductId::new(), qty(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartLineNotFound);
    }

    #[test]
    fn remove_absent_line_is_noop() {
        let p1 = ProductId::new();
        let mut cart = Cart::new(user());
        cart.add_line(p1, qty(1)).unwrap();
        let snapshot = cart.clone();

        assert!(!cart.remove_line(&ProductId::new()));
        assert_eq!(cart, snapshot);
    }

    #[test]
    fn remove_line_twice_equals_once() {
        let (p1, p2) = (ProductId::new(), ProductId::new());
        let mut cart = Cart::new(user());
        cart.add_line(p1, qty(1)).unwrap();
        cart.add_line(p2, qty(1)).unwrap();

        cart.remove_line(&p1);
        let once = cart.clone();
        cart.remove_line(&p1);
        assert_eq!(cart, once);
    }

    #[test]
    fn clear_empties_and_touches() {
        let mut cart = Cart::new(user());
        cart.add_line(ProductId::new(), qty(1)).unwrap();
        let before = *cart.updated_at();
        cart.clear();
        assert!(cart.is_empty());
        assert!(before.is_before(cart.updated_at()));
    }

    #[test]
    fn mutations_refresh_updated_at() {
        let p1 = ProductId::new();
        let mut cart = Cart::new(user());
        let t0 = *cart.updated_at();
        cart.add_line(p1, qty(1)).unwrap();
        let t1 = *cart.updated_at();
        cart.set_line_quantity(&p1, qty(4)).unwrap();
        let t2 = *cart.updated_at();
        assert!(t0.is_before(&t1));
        assert!(t1.is_before(&t2));
    }

    #[test]
    fn non_owner_sees_cart_not_found() {
        let cart = Cart::new(user());
        let err = cart
            .check_ownership(&UserId::new("u2").unwrap())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CartNotFound);
    }

    proptest! {
        #[test]
        fn merge_add_sums_into_single_line(adds in prop::collection::vec(1i64..1_000, 1..30)) {
            let p1 = ProductId::new();
            let mut cart = Cart::new(user());
            for n in &adds {
                cart.add_line(p1, qty(*n)).unwrap();
            }
            prop_assert_eq!(cart.lines().len(), 1);
            prop_assert_eq!(i64::from(cart.lines()[0].quantity.get()), adds.iter().sum::<i64>());
        }

        #[test]
        fn lines_stay_unique_per_product(picks in prop::collection::vec((0usize..4, 1i64..50), 1..40)) {
            let products: Vec<ProductId> = (0..4).map(|_| ProductId::new()).collect();
            let mut cart = Cart::new(user());
            for (idx, n) in &picks {
                cart.add_line(products[*idx], qty(*n)).unwrap();
            }
            let mut ids: Vec<_> = cart.lines().iter().map(|l| l.product_id).collect();
            let len = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), len);
        }
    }
}
