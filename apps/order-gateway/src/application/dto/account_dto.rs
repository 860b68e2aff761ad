//! Account and order read models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::cash_reserve::{Account, CashReserve};
use crate::domain::order_execution::{Order, OrderSide, OrderStatus, TradeType};
use crate::domain::shared::Timestamp;

/// Reserve snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveDto {
    /// Instrument.
    pub symbol: String,
    /// Balance.
    pub balance: Decimal,
    /// Opening balance.
    pub starting_balance: Decimal,
    /// Cash committed to in-flight orders.
    pub pending_reduction: Decimal,
    /// `balance - pending_reduction`.
    pub available: Decimal,
    /// Low-balance threshold.
    pub low_balance_threshold: Decimal,
    /// Per-order cap.
    pub max_per_order: Decimal,
    /// Whether a low-balance alert is outstanding.
    pub alert_sent: bool,
    /// Last mutation time.
    pub updated_at: Timestamp,
}

impl ReserveDto {
    /// Create from domain reserve.
    #[must_use]
    pub fn from_reserve(reserve: &CashReserve) -> Self {
        Self {
            symbol: reserve.key().symbol.to_string(),
            balance: reserve.balance().amount(),
            starting_balance: reserve.starting_balance().amount(),
            pending_reduction: reserve.pending_reduction().amount(),
            available: reserve.available().amount(),
            low_balance_threshold: reserve.low_balance_threshold().amount(),
            max_per_order: reserve.max_per_order().amount(),
            alert_sent: reserve.alert_sent(),
            updated_at: reserve.updated_at(),
        }
    }
}

/// Account snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshotDto {
    /// Account.
    pub account_id: String,
    /// Sum of reserve balances.
    pub total_balance: Decimal,
    /// Reserves ordered by symbol.
    pub reserves: Vec<ReserveDto>,
    /// When the account first traded.
    pub opened_at: Timestamp,
}

impl AccountSnapshotDto {
    /// Create from domain account.
    #[must_use]
    pub fn from_account(account: &Account) -> Self {
        Self {
            account_id: account.id().to_string(),
            total_balance: account.total_balance().amount(),
            reserves: account.reserves().map(ReserveDto::from_reserve).collect(),
            opened_at: account.opened_at(),
        }
    }
}

/// One fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionDto {
    /// Execution ID.
    pub execution_id: String,
    /// Quantity.
    pub quantity: Decimal,
    /// Price.
    pub price: Decimal,
    /// Side.
    pub side: OrderSide,
    /// Time.
    pub executed_at: Timestamp,
}

/// Order read model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    /// Client order ID.
    pub client_order_id: String,
    /// Market order ID.
    pub market_order_id: Option<String>,
    /// Account.
    pub account_id: String,
    /// Instrument.
    pub symbol: String,
    /// Trade type.
    pub trade_type: TradeType,
    /// Status.
    pub status: OrderStatus,
    /// Requested quantity.
    pub requested_quantity: Decimal,
    /// Requested value.
    pub requested_value: Decimal,
    /// Quantity sent to the market.
    pub sent_quantity: Decimal,
    /// Value sent to the market.
    pub sent_value: Decimal,
    /// Executed quantity.
    pub executed_quantity: Decimal,
    /// Executed value.
    pub executed_value: Decimal,
    /// Cash reserved against the order.
    pub cash_allocated: Decimal,
    /// Fills.
    pub executions: Vec<ExecutionDto>,
    /// Diagnostic notes.
    pub notes: Vec<String>,
    /// Created at.
    pub created_at: Timestamp,
    /// Market acknowledgement time.
    pub submitted_at: Option<Timestamp>,
    /// Last execution time.
    pub last_execution_at: Option<Timestamp>,
}

impl OrderDto {
    /// Create from domain Order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            client_order_id: order.client_order_id().to_string(),
            market_order_id: order.market_order_id().map(ToString::to_string),
            account_id: order.account_id().to_string(),
            symbol: order.symbol().to_string(),
            trade_type: order.trade_type(),
            status: order.status(),
            requested_quantity: order.requested_quantity().amount(),
            requested_value: order.requested_value().amount(),
            sent_quantity: order.sent_quantity().amount(),
            sent_value: order.sent_value().amount(),
            executed_quantity: order.executed_quantity().amount(),
            executed_value: order.executed_value().amount(),
            cash_allocated: order.cash_allocated().amount(),
            executions: order
                .executions()
                .iter()
                .map(|e| ExecutionDto {
                    execution_id: e.id.to_string(),
                    quantity: e.quantity.amount(),
                    price: e.price.amount(),
                    side: e.side,
                    executed_at: e.executed_at,
                })
                .collect(),
            notes: order.notes().to_vec(),
            created_at: order.created_at(),
            submitted_at: order.submitted_at(),
            last_execution_at: order.last_execution_at(),
        }
    }
}
