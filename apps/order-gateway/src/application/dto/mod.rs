//! Data Transfer Objects

mod account_dto;
mod instruction_dto;
mod report_dto;

pub use account_dto::{AccountSnapshotDto, ExecutionDto, OrderDto, ReserveDto};
pub use instruction_dto::{
    CancelInstruction, Instruction, InstructionResponse, ResponseStatus, ValidatedInstruction,
};
pub use report_dto::{ExecutionReportDto, ReportDisposition};
