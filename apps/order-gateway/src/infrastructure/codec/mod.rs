//! Instruction Codec
//!
//! `tag=value` wire format shared with the order-management source.

mod tag_value;

pub use tag_value::{CodecError, InboundMessage, SOH, decode, encode_response};
