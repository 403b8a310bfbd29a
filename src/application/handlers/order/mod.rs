//! Order command and query handlers.

mod get_order;
mod list_all_orders;
mod list_user_orders;
mod place_order;
mod update_order_status;

pub use get_order::{GetOrderHandler, GetOrderQuery};
pub use list_all_orders::ListAllOrdersHandler;
pub use list_user_orders::{ListUserOrdersHandler, ListUserOrdersQuery};
pub use place_order::{OrderItemInput, PlaceOrderCommand, PlaceOrderHandler};
pub use update_order_status::{UpdateOrderStatusCommand, UpdateOrderStatusHandler};
