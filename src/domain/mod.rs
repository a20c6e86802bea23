//! Domain layer — typed REST sub-clients and their wire formats.

pub mod account;
pub mod market;
pub mod order;
pub mod stream;
pub mod wallet;
