//! Execution report DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::{ExecutionReport, OrderStatus};
use crate::domain::shared::{ExecutionId, MarketOrderId, Money, OrderId, Quantity, Timestamp};

/// Inbound execution report as decoded from the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReportDto {
    /// Client order ID.
    pub client_order_id: String,
    /// Market order ID.
    pub market_order_id: Option<String>,
    /// Execution ID.
    pub execution_id: String,
    /// Raw order status code.
    pub status_code: String,
    /// Cumulative quantity.
    pub cumulative_quantity: Decimal,
    /// Last fill quantity.
    pub last_quantity: Decimal,
    /// Last fill price.
    pub last_price: Decimal,
    /// Average price.
    pub average_price: Decimal,
}

impl ExecutionReportDto {
    /// Convert to the domain report, stamped with the current time.
    #[must_use]
    pub fn into_domain(self) -> ExecutionReport {
        ExecutionReport {
            client_order_id: OrderId::new(self.client_order_id),
            market_order_id: self.market_order_id.map(MarketOrderId::new),
            execution_id: ExecutionId::new(self.execution_id),
            status_code: self.status_code,
            cumulative_quantity: Quantity::new(self.cumulative_quantity),
            last_quantity: Quantity::new(self.last_quantity),
            last_price: Money::new(self.last_price),
            average_price: Money::new(self.average_price),
            transact_time: Timestamp::now(),
        }
    }
}

/// What happened to an execution report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "disposition", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportDisposition {
    /// Report applied.
    Applied {
        /// Status after the report.
        status: OrderStatus,
        /// Whether the order was archived.
        archived: bool,
    },
    /// Order in flight, report not applied.
    Ignored {
        /// Why the report was ignored.
        reason: String,
    },
    /// No order in flight with this ID.
    UnknownOrder,
}
