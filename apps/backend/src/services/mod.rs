pub mod balance;
pub mod gateway;
pub mod market;
