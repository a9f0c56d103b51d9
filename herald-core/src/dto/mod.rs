//! Data Transfer Objects for inbound requests
//!
//! Wire shapes of the events Herald accepts. Only the fields the normalizer
//! reads are modelled; everything else in a webhook body is ignored.

pub mod build;
pub mod webhook;
