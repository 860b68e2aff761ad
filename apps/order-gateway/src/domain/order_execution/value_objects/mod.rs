//! Order execution value objects.

mod execution_report;
mod order_status;
mod routing_decision;
mod trade_type;

pub use execution_report::ExecutionReport;
pub use order_status::OrderStatus;
pub use routing_decision::RoutingDecision;
pub use trade_type::{InstructionAmount, OrderSide, TradeType};
