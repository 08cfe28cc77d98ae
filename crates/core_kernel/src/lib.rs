//! Core Kernel - Foundational types for the invoice tracker
//!
//! This crate provides the building blocks shared by the billing domain and
//! its adapters:
//! - Money types with precise decimal arithmetic
//! - `INV-` invoice identifiers
//! - Calendar-date helpers and an injectable clock
//! - The error type every storage port reports with

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{Clock, SystemClock, FixedClock, calendar_day, same_month};
pub use identifiers::{InvoiceId, InvoiceIdError};
pub use ports::{PortError, DomainPort};
