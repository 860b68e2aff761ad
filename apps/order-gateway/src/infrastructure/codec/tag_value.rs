//! Tag=value encoding.
//!
//! Fields are `tag=value` pairs separated by `|` or SOH. FIX tag numbers
//! are reused where FIX has one:
//!
//! | Tag | Field |
//! |-----|-------|
//! | 35 | message type (`D`, `F`, `8`, `U1`, `U2`, `U3`) |
//! | 1 | account |
//! | 55 | symbol |
//! | 11 | client order ID |
//! | 41 | original client order ID |
//! | 54 | side (`1` buy, `2` sell) |
//! | 38 | share quantity |
//! | 152 | cash amount |
//! | 37 | market order ID |
//! | 17 | execution ID |
//! | 39 | order status |
//! | 14 / 32 / 31 / 6 | cumulative qty / last qty / last price / average price |
//! | 58 | text |
//! | 5001-5004 | success flag, status token, cash covered, reserve balance |

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::application::dto::{
    CancelInstruction, ExecutionReportDto, Instruction, InstructionResponse,
};
use crate::domain::order_execution::OrderSide;
use crate::error::GatewayError;

/// FIX field separator.
pub const SOH: char = '\x01';

const MSG_TYPE: u32 = 35;
const ACCOUNT: u32 = 1;
const AVG_PX: u32 = 6;
const CL_ORD_ID: u32 = 11;
const CUM_QTY: u32 = 14;
const EXEC_ID: u32 = 17;
const LAST_PX: u32 = 31;
const LAST_QTY: u32 = 32;
const ORDER_ID: u32 = 37;
const ORDER_QTY: u32 = 38;
const ORD_STATUS: u32 = 39;
const ORIG_CL_ORD_ID: u32 = 41;
const SIDE: u32 = 54;
const SYMBOL: u32 = 55;
const TEXT: u32 = 58;
const CASH_ORDER_QTY: u32 = 152;
const SUCCESS: u32 = 5001;
const STATUS_TOKEN: u32 = 5002;
const CASH_COVERED: u32 = 5003;
const RESERVE_BALANCE: u32 = 5004;

/// Decoding error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Nothing to decode.
    #[error("Empty message")]
    Empty,

    /// Field is not `tag=value` with a numeric tag.
    #[error("Malformed field '{field}'")]
    MalformedField {
        /// Offending field.
        field: String,
    },

    /// Tag appears more than once.
    #[error("Tag {tag} appears more than once")]
    DuplicateTag {
        /// Repeated tag.
        tag: u32,
    },

    /// Tag present with no value.
    #[error("Tag {tag} has an empty value")]
    EmptyValue {
        /// Tag.
        tag: u32,
    },

    /// Required tag absent.
    #[error("Missing required tag {tag}")]
    MissingTag {
        /// Tag.
        tag: u32,
    },

    /// Value does not parse.
    #[error("Invalid value '{value}' for tag {tag}")]
    InvalidValue {
        /// Tag.
        tag: u32,
        /// Raw value.
        value: String,
    },

    /// Message type not handled by the gateway.
    #[error("Unsupported message type '{0}'")]
    UnsupportedMessageType(String),
}

impl From<CodecError> for GatewayError {
    fn from(err: CodecError) -> Self {
        Self::invalid_instruction(err.to_string())
    }
}

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// `35=D`
    NewInstruction(Instruction),
    /// `35=F`
    Cancel(CancelInstruction),
    /// `35=8`
    ExecutionReport(ExecutionReportDto),
    /// `35=U1`
    AccountSnapshot {
        /// Account.
        account_id: String,
    },
    /// `35=U2`
    PendingOrders {
        /// Account.
        account_id: String,
    },
    /// `35=U3`
    TradeHistory {
        /// Account.
        account_id: String,
    },
}

impl InboundMessage {
    /// Client order ID the message refers to, if any.
    #[must_use]
    pub fn client_order_id(&self) -> Option<&str> {
        match self {
            Self::NewInstruction(i) => Some(&i.client_order_id),
            Self::Cancel(c) => Some(&c.client_order_id),
            Self::ExecutionReport(r) => Some(&r.client_order_id),
            Self::AccountSnapshot { .. } | Self::PendingOrders { .. } | Self::TradeHistory { .. } => {
                None
            }
        }
    }
}

struct Fields(BTreeMap<u32, String>);

impl Fields {
    fn parse(line: &str) -> Result<Self, CodecError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields = BTreeMap::new();

        for field in line.split(['|', SOH]).filter(|f| !f.trim().is_empty()) {
            let (tag, value) = field
                .split_once('=')
                .ok_or_else(|| CodecError::MalformedField {
                    field: field.to_string(),
                })?;
            let tag = tag
                .trim()
                .parse::<u32>()
                .map_err(|_| CodecError::MalformedField {
                    field: field.to_string(),
                })?;
            let value = value.trim();
            if value.is_empty() {
                return Err(CodecError::EmptyValue { tag });
            }
            if fields.insert(tag, value.to_string()).is_some() {
                return Err(CodecError::DuplicateTag { tag });
            }
        }

        if fields.is_empty() {
            return Err(CodecError::Empty);
        }
        Ok(Self(fields))
    }

    fn optional(&self, tag: u32) -> Option<&str> {
        self.0.get(&tag).map(String::as_str)
    }

    fn required(&self, tag: u32) -> Result<String, CodecError> {
        self.optional(tag)
            .map(str::to_string)
            .ok_or(CodecError::MissingTag { tag })
    }

    fn optional_decimal(&self, tag: u32) -> Result<Option<Decimal>, CodecError> {
        self.optional(tag)
            .map(|value| {
                Decimal::from_str(value).map_err(|_| CodecError::InvalidValue {
                    tag,
                    value: value.to_string(),
                })
            })
            .transpose()
    }

    fn decimal_or_zero(&self, tag: u32) -> Result<Decimal, CodecError> {
        Ok(self.optional_decimal(tag)?.unwrap_or(Decimal::ZERO))
    }
}

/// Decode one message.
///
/// # Errors
///
/// Returns error on malformed, duplicate or empty fields, a missing
/// required tag, a non-numeric amount or an unknown message type.
pub fn decode(line: &str) -> Result<InboundMessage, CodecError> {
    let fields = Fields::parse(line)?;
    let msg_type = fields.required(MSG_TYPE)?;

    match msg_type.as_str() {
        "D" => {
            let side_code = fields.required(SIDE)?;
            let side = OrderSide::from_fix_code(&side_code).ok_or(CodecError::InvalidValue {
                tag: SIDE,
                value: side_code,
            })?;
            Ok(InboundMessage::NewInstruction(Instruction {
                account_id: fields.required(ACCOUNT)?,
                symbol: fields.required(SYMBOL)?,
                client_order_id: fields.required(CL_ORD_ID)?,
                side,
                quantity: fields.optional_decimal(ORDER_QTY)?,
                cash_amount: fields.optional_decimal(CASH_ORDER_QTY)?,
            }))
        }
        "F" => Ok(InboundMessage::Cancel(CancelInstruction {
            client_order_id: fields.required(CL_ORD_ID)?,
            original_client_order_id: fields.required(ORIG_CL_ORD_ID)?,
        })),
        "8" => Ok(InboundMessage::ExecutionReport(ExecutionReportDto {
            client_order_id: fields.required(CL_ORD_ID)?,
            market_order_id: fields.optional(ORDER_ID).map(str::to_string),
            execution_id: fields.required(EXEC_ID)?,
            status_code: fields.required(ORD_STATUS)?,
            cumulative_quantity: fields
                .optional_decimal(CUM_QTY)?
                .ok_or(CodecError::MissingTag { tag: CUM_QTY })?,
            last_quantity: fields.decimal_or_zero(LAST_QTY)?,
            last_price: fields.decimal_or_zero(LAST_PX)?,
            average_price: fields.decimal_or_zero(AVG_PX)?,
        })),
        "U1" => Ok(InboundMessage::AccountSnapshot {
            account_id: fields.required(ACCOUNT)?,
        }),
        "U2" => Ok(InboundMessage::PendingOrders {
            account_id: fields.required(ACCOUNT)?,
        }),
        "U3" => Ok(InboundMessage::TradeHistory {
            account_id: fields.required(ACCOUNT)?,
        }),
        other => Err(CodecError::UnsupportedMessageType(other.to_string())),
    }
}

/// Encode a response with `|` separators.
///
/// Field values never contain the separator; `|` in a message is replaced
/// with `/`.
#[must_use]
pub fn encode_response(response: &InstructionResponse) -> String {
    let mut out = String::new();
    push(&mut out, CL_ORD_ID, &response.client_order_id);
    if let Some(market_order_id) = &response.market_order_id {
        push(&mut out, ORDER_ID, market_order_id);
    }
    push(&mut out, SUCCESS, if response.success { "Y" } else { "N" });
    push(&mut out, STATUS_TOKEN, response.status.as_str());
    push(&mut out, TEXT, &response.message.replace(['|', SOH], "/"));
    push(&mut out, CASH_COVERED, &response.cash_covered.to_string());
    if let Some(balance) = response.reserve_balance {
        push(&mut out, RESERVE_BALANCE, &balance.to_string());
    }
    out
}

fn push(out: &mut String, tag: u32, value: &str) {
    if !out.is_empty() {
        out.push('|');
    }
    // Writing to a String cannot fail.
    let _ = write!(out, "{tag}={value}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test]
    fn decodes_share_instruction() {
        let msg = decode("35=D|1=ACC-1|55=AAPL|11=ord-1|54=2|38=10.25").unwrap();
        let InboundMessage::NewInstruction(instruction) = msg else {
            panic!("expected instruction");
        };
        assert_eq!(instruction.side, OrderSide::Sell);
        assert_eq!(instruction.quantity, Some(dec!(10.25)));
        assert_eq!(instruction.cash_amount, None);
    }

    #[test]
    fn decodes_soh_separated_cash_instruction() {
        let line = format!("35=D{SOH}1=ACC-1{SOH}55=AAPL{SOH}11=ord-1{SOH}54=1{SOH}152=50{SOH}");
        let InboundMessage::NewInstruction(instruction) = decode(&line).unwrap() else {
            panic!("expected instruction");
        };
        assert_eq!(instruction.side, OrderSide::Buy);
        assert_eq!(instruction.cash_amount, Some(dec!(50)));
    }

    #[test]
    fn decodes_execution_report() {
        let msg = decode("35=8|11=ord-1|37=M-1|17=E-1|39=1|14=5|32=5|31=10.10|6=10.10").unwrap();
        let InboundMessage::ExecutionReport(report) = msg else {
            panic!("expected report");
        };
        assert_eq!(report.status_code, "1");
        assert_eq!(report.market_order_id.as_deref(), Some("M-1"));
        assert_eq!(report.cumulative_quantity, dec!(5));
        assert_eq!(report.average_price, dec!(10.10));
    }

    #[test]
    fn decodes_cancel_and_admin_reads() {
        assert_eq!(
            decode("35=F|11=cxl-1|41=ord-1").unwrap(),
            InboundMessage::Cancel(CancelInstruction {
                client_order_id: "cxl-1".to_string(),
                original_client_order_id: "ord-1".to_string(),
            })
        );
        assert_eq!(
            decode("35=U3|1=ACC-1").unwrap(),
            InboundMessage::TradeHistory {
                account_id: "ACC-1".to_string()
            }
        );
    }

    #[test_case("" => CodecError::Empty ; "empty")]
    #[test_case("35=D|55" => CodecError::MalformedField { field: "55".to_string() } ; "no equals")]
    #[test_case("35=D|x=1" => CodecError::MalformedField { field: "x=1".to_string() } ; "non numeric tag")]
    #[test_case("35=D|55=AAPL|55=MSFT" => CodecError::DuplicateTag { tag: 55 } ; "duplicate tag")]
    #[test_case("35=D|55=" => CodecError::EmptyValue { tag: 55 } ; "empty value")]
    #[test_case("55=AAPL" => CodecError::MissingTag { tag: 35 } ; "no message type")]
    #[test_case("35=D|1=A|55=AAPL|11=o|54=2|38=ten" => CodecError::InvalidValue { tag: 38, value: "ten".to_string() } ; "non numeric quantity")]
    #[test_case("35=D|1=A|55=AAPL|11=o|54=5|38=1" => CodecError::InvalidValue { tag: 54, value: "5".to_string() } ; "bad side")]
    #[test_case("35=Z|1=A" => CodecError::UnsupportedMessageType("Z".to_string()) ; "unknown type")]
    fn rejects_bad_messages(line: &str) -> CodecError {
        decode(line).unwrap_err()
    }

    #[test]
    fn both_amounts_fail_instruction_validation() {
        let InboundMessage::NewInstruction(instruction) =
            decode("35=D|1=ACC-1|55=AAPL|11=ord-1|54=2|38=1|152=10").unwrap()
        else {
            panic!("expected instruction");
        };
        let err = instruction.validate().unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidInstruction);
    }

    #[test]
    fn codec_errors_are_invalid_instructions() {
        let err: GatewayError = CodecError::Empty.into();
        assert_eq!(err.code(), ErrorCode::InvalidInstruction);
    }

    #[test]
    fn encodes_accepted_response() {
        let response = InstructionResponse::accepted("ord-1", "Routed 10 | covered 2.50")
            .with_market_order_id(Some("M-1".to_string()))
            .with_cash_covered(crate::domain::shared::Money::new(dec!(2.50)))
            .with_reserve_balance(Some(crate::domain::shared::Money::new(dec!(100))));

        assert_eq!(
            encode_response(&response),
            "11=ord-1|37=M-1|5001=Y|5002=Accepted|58=Routed 10 / covered 2.50|5003=2.50|5004=100"
        );
    }

    #[test]
    fn encodes_rejected_response() {
        let response =
            InstructionResponse::rejected("cxl-1", &GatewayError::order_not_found("ord-9"));
        assert_eq!(
            encode_response(&response),
            "11=cxl-1|5001=N|5002=Rejected|58=order not found|5003=0"
        );
    }
}
