//! Herald Core
//!
//! Core types and pure logic for the Herald build-trigger service.
//!
//! This crate contains:
//! - Domain types: Build coordinates, resource descriptors, run requests
//! - DTOs: Inbound webhook payloads and manual build requests
//! - Event classification and normalization into a [`BuildCoordinate`]
//! - The resource descriptor factory and run request construction
//!
//! Nothing in here talks to the network; the webhook service owns all I/O.

pub mod config;
pub mod domain;
pub mod dto;
pub mod error;
pub mod event;
pub mod factory;
pub mod normalize;

pub use config::{DispatchConfig, NamingPolicy};
pub use domain::coordinate::BuildCoordinate;
pub use error::EventError;
pub use event::{EventKind, TriggerEvent};
