//! Plain data shapes for SMC accounts: the local record, the wire object the
//! API returns, and the payload sent on create/update.

pub mod account;

pub use account::*;
