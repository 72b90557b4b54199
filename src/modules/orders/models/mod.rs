pub mod order;
pub mod order_item;

pub use order::{
    CreateOrderRequest, DeliveryRegion, HalfInvoiceType, Order, OrderStatus, PaymentMethod,
    ShippingMode, UpdateOrderRequest, UpdateOrderStatusRequest,
};
pub use order_item::{CreateOrderItemRequest, OrderItem};
