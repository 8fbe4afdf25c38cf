//! # exposr core
//!
//! The host enumeration pipeline: query each target through a [`lookup::HostLookup`]
//! with credential failover, keep the services that are actually reachable, and shape
//! the outcome into report rows.

pub mod engine;
pub mod lookup;
pub mod models;
pub mod network;
pub mod report;
