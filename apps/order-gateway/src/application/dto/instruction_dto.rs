//! Instruction DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::{InstructionAmount, OrderSide, TradeType};
use crate::domain::shared::{AccountId, Money, OrderId, Quantity, Symbol};
use crate::error::{ErrorCode, GatewayError};

/// Inbound order instruction as decoded from the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Account.
    pub account_id: String,
    /// Instrument symbol.
    pub symbol: String,
    /// Client-assigned order ID.
    pub client_order_id: String,
    /// Side.
    pub side: OrderSide,
    /// Share quantity, for share-based trades.
    pub quantity: Option<Decimal>,
    /// Cash amount, for dollar-based trades.
    pub cash_amount: Option<Decimal>,
}

/// An instruction that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInstruction {
    /// Account.
    pub account_id: AccountId,
    /// Instrument.
    pub symbol: Symbol,
    /// Client order ID.
    pub client_order_id: OrderId,
    /// Trade type derived from side and amount basis.
    pub trade_type: TradeType,
    /// Requested amount.
    pub amount: InstructionAmount,
}

impl Instruction {
    /// Check required fields and derive the trade type.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INSTRUCTION` if an ID is empty, the symbol is
    /// malformed, or not exactly one positive amount is present.
    pub fn validate(&self) -> Result<ValidatedInstruction, GatewayError> {
        if self.account_id.trim().is_empty() {
            return Err(GatewayError::invalid_instruction("account id is required"));
        }
        if self.client_order_id.trim().is_empty() {
            return Err(GatewayError::invalid_instruction(
                "client order id is required",
            ));
        }
        let symbol = Symbol::parse(&self.symbol)?;

        let amount = match (self.quantity, self.cash_amount) {
            (Some(quantity), None) => {
                let quantity = Quantity::new(quantity);
                quantity.validate_for_order()?;
                InstructionAmount::Shares(quantity)
            }
            (None, Some(cash)) => {
                let cash = Money::new(cash);
                cash.validate_for_order()?;
                InstructionAmount::Dollars(cash)
            }
            (Some(_), Some(_)) => {
                return Err(GatewayError::invalid_instruction(
                    "instruction carries both quantity and cash amount",
                ));
            }
            (None, None) => {
                return Err(GatewayError::invalid_instruction(
                    "instruction carries neither quantity nor cash amount",
                ));
            }
        };

        Ok(ValidatedInstruction {
            account_id: AccountId::new(self.account_id.trim()),
            symbol,
            client_order_id: OrderId::new(self.client_order_id.trim()),
            trade_type: TradeType::from_parts(self.side, &amount),
            amount,
        })
    }
}

/// Inbound cancel instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelInstruction {
    /// Client order ID of the cancel request itself.
    pub client_order_id: String,
    /// Client order ID of the order to cancel.
    pub original_client_order_id: String,
}

/// Status token on a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    /// Instruction accepted.
    Accepted,
    /// Instruction rejected.
    Rejected,
}

impl ResponseStatus {
    /// Wire token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }
}

/// Outbound response to an instruction or cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionResponse {
    /// Client order ID the response answers.
    pub client_order_id: String,
    /// Market order ID, once assigned.
    pub market_order_id: Option<String>,
    /// Success flag.
    pub success: bool,
    /// Status token.
    pub status: ResponseStatus,
    /// Human-readable message.
    pub message: String,
    /// Cash the reserve contributed.
    pub cash_covered: Decimal,
    /// Reserve balance after the instruction, when known.
    pub reserve_balance: Option<Decimal>,
    /// Error code for rejections.
    pub error_code: Option<ErrorCode>,
}

impl InstructionResponse {
    /// Accepted response.
    #[must_use]
    pub fn accepted(client_order_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            client_order_id: client_order_id.into(),
            market_order_id: None,
            success: true,
            status: ResponseStatus::Accepted,
            message: message.into(),
            cash_covered: Decimal::ZERO,
            reserve_balance: None,
            error_code: None,
        }
    }

    /// Rejected response carrying the error's code and message.
    #[must_use]
    pub fn rejected(client_order_id: impl Into<String>, error: &GatewayError) -> Self {
        Self {
            client_order_id: client_order_id.into(),
            market_order_id: None,
            success: false,
            status: ResponseStatus::Rejected,
            message: error.message().to_string(),
            cash_covered: Decimal::ZERO,
            reserve_balance: None,
            error_code: Some(error.code()),
        }
    }

    /// Set the market order ID.
    #[must_use]
    pub fn with_market_order_id(mut self, market_order_id: Option<String>) -> Self {
        self.market_order_id = market_order_id;
        self
    }

    /// Set cash covered.
    #[must_use]
    pub const fn with_cash_covered(mut self, cash_covered: Money) -> Self {
        self.cash_covered = cash_covered.amount();
        self
    }

    /// Set the reserve balance.
    #[must_use]
    pub const fn with_reserve_balance(mut self, balance: Option<Money>) -> Self {
        self.reserve_balance = match balance {
            Some(b) => Some(b.amount()),
            None => None,
        };
        self
    }
}
