//! Application Use Cases

mod account_query;
mod apply_execution_report;
mod cancel_order;
mod submit_instruction;

pub use account_query::AccountQueryUseCase;
pub use apply_execution_report::ApplyExecutionReportUseCase;
pub use cancel_order::CancelOrderUseCase;
pub use submit_instruction::SubmitInstructionUseCase;
