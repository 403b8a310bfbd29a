//! Order aggregate entity.
//!
//! An order is an immutable snapshot of what was bought and at what price.
//! Only its status changes after placement.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::line_total;
use crate::domain::foundation::{
    DomainError, ErrorCode, Money, OrderId, OwnedByUser, ProductId, Quantity, Timestamp, UserId,
};

use super::{OrderStatus, PaymentMethod, ShippingAddress, StatusTransitionPolicy};

/// A priced line captured at placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub unit_price: Money,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: Quantity, unit_price: Money) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> Money {
        line_total(self.unit_price, self.quantity)
    }
}

/// Order aggregate.
///
/// # Invariants
///
/// - `lines` is non-empty
/// - `total_amount` equals the sum of `unit_price × quantity`
/// - lines, total, address and owner never change after placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    owner: UserId,
    lines: Vec<OrderLine>,
    total_amount: Money,
    shipping_address: ShippingAddress,
    payment_method: PaymentMethod,
    status: OrderStatus,
    placed_at: Timestamp,
    updated_at: Timestamp,
}

impl Order {
    /// Places a new pending, cash-on-delivery order.
    ///
    /// The total is computed from the lines. A caller-supplied total must
    /// match it exactly.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `lines` is empty, the address is incomplete,
    ///   or `claimed_total` differs from the computed total
    pub fn place(
        owner: UserId,
        lines: Vec<OrderLine>,
        claimed_total: Option<Money>,
        shipping_address: ShippingAddress,
    ) -> Result<Self, DomainError> {
        if lines.is_empty() {
            return Err(DomainError::invalid_argument(
                "items",
                "cannot place empty order",
            ));
        }
        shipping_address.validate()?;

        let total_amount: Money = lines.iter().map(OrderLine::line_total).sum();
        if let Some(claimed) = claimed_total {
            if claimed != total_amount {
                return Err(DomainError::invalid_argument(
                    "totalAmount",
                    format!(
                        "total mismatch: submitted {} but items sum to {}",
                        claimed, total_amount
                    ),
                ));
            }
        }

        let now = Timestamp::now();
        Ok(Self {
            id: OrderId::new(),
            owner,
            lines,
            total_amount,
            shipping_address,
            payment_method: PaymentMethod::CashOnDelivery,
            status: OrderStatus::Pending,
            placed_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an order from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: OrderId,
        owner: UserId,
        lines: Vec<OrderLine>,
        total_amount: Money,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
        status: OrderStatus,
        placed_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            lines,
            total_amount,
            shipping_address,
            payment_method,
            status,
            placed_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn shipping_address(&self) -> &ShippingAddress {
        &self.shipping_address
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn placed_at(&self) -> &Timestamp {
        &self.placed_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Changes the status under the given policy.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the policy rejects the transition
    pub fn update_status(
        &mut self,
        new_status: OrderStatus,
        policy: StatusTransitionPolicy,
    ) -> Result<(), DomainError> {
        self.status = policy.apply(self.status, new_status)?;
        self.updated_at = self.updated_at.advance_from(Timestamp::now());
        Ok(())
    }
}

impl OwnedByUser for Order {
    fn owner_id(&self) -> &UserId {
        &self.owner
    }

    fn not_found_code(&self) -> ErrorCode {
        ErrorCode::OrderNotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Asha Rao".into(),
            address_line1: "12 Workshop Lane".into(),
            address_line2: Some("Unit 4".into()),
            city: "Pune".into(),
            state: "MH".into(),
            pincode: "411001".into(),
            phone: "9800000000".into(),
        }
    }

    fn line(units: u32, qty: i64) -> OrderLine {
        OrderLine::new(
            ProductId::new(),
            Quantity::new(qty).unwrap(),
            Money::from_units(units),
        )
    }

    #[test]
    fn place_computes_total_and_defaults() {
        let order = Order::place(user(), vec![line(10, 2), line(5, 1)], None, address()).unwrap();

        assert_eq!(order.total_amount(), Money::from_units(25));
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.payment_method(), PaymentMethod::CashOnDelivery);
        assert_eq!(order.placed_at(), order.updated_at());
    }

    #[test]
    fn place_accepts_matching_claimed_total() {
        let order = Order::place(
            user(),
            vec![line(10, 2)],
            Some(Money::from_units(20)),
            address(),
        );
        assert!(order.is_ok());
    }

    #[test]
    fn place_rejects_total_mismatch() {
        let err = Order::place(
            user(),
            vec![line(10, 2)],
            Some(Money::from_units(1)),
            address(),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert_eq!(err.details.get("field").map(String::as_str), Some("totalAmount"));
    }

    #[test]
    fn place_rejects_empty_lines() {
        let err = Order::place(user(), vec![], None, address()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(err.message.contains("empty order"));
    }

    #[test]
    fn place_rejects_incomplete_address() {
        let bad = ShippingAddress {
            city: String::new(),
            ..address()
        };
        let err = Order::place(user(), vec![line(1, 1)], None, bad).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn zero_priced_lines_are_allowed() {
        let order = Order::place(user(), vec![line(0, 3)], None, address()).unwrap();
        assert!(order.total_amount().is_zero());
    }

    #[test]
    fn strict_policy_rejects_backwards_move() {
        let mut order = Order::place(user(), vec![line(1, 1)], None, address()).unwrap();
        order
            .update_status(OrderStatus::Confirmed, StatusTransitionPolicy::Strict)
            .unwrap();
        let err = order
            .update_status(OrderStatus::Pending, StatusTransitionPolicy::Strict)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert_eq!(order.status(), OrderStatus::Confirmed);
    }

    #[test]
    fn status_update_leaves_lines_untouched() {
        let mut order = Order::place(user(), vec![line(7, 2)], None, address()).unwrap();
        let lines = order.lines().to_vec();
        let before = *order.updated_at();

        order
            .update_status(OrderStatus::Shipped, StatusTransitionPolicy::Permissive)
            .unwrap();

        assert_eq!(order.lines(), lines.as_slice());
        assert_eq!(order.total_amount(), Money::from_units(14));
        assert!(before.is_before(order.updated_at()));
    }

    #[test]
    fn other_users_see_order_not_found() {
        let order = Order::place(user(), vec![line(1, 1)], None, address()).unwrap();
        let err = order
            .check_ownership(&UserId::new("intruder").unwrap())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }
}
