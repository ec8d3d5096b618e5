//! openEO Core
//!
//! Core types and abstractions for the openEO GRASS driver.
//!
//! This crate contains:
//! - Domain types: Core business entities (Job, CollectionInformation, etc.)
//! - DTOs: Data transfer objects for the driver's REST boundary

pub mod domain;
pub mod dto;
