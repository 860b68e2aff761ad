//! Price Oracle Adapters

mod static_oracle;

pub use static_oracle::StaticPriceOracle;
