//! # SMC Provider
//!
//! Reconciles declaratively described SMC accounts (user or group identities
//! on a Stormshield Management Center) with the appliance's REST API.
//!
//! - **[model]**: the local [`Account`](model::Account) record and its wire shapes.
//! - **[account_resource]**: the lifecycle controller (Create, Read, Update,
//!   Delete, Import), field mapping, validation and the error taxonomy.
//! - **[accounts_source]**: read-only listing and lookup.
//! - **[clients]**: the [`AccountClient`](clients::AccountClient) wrapper over the generic client.
//! - **[lifecycle]**: configuration and provider bootstrap.

pub mod account_resource;
pub mod accounts_source;
pub mod clients;
pub mod lifecycle;
pub mod model;
