//! Core domain types
//!
//! This module contains the core domain structures used across the driver.
//! These types represent the fundamental business entities and are shared
//! between the registries (for persistence) and the REST boundary.

pub mod collection;
pub mod job;
