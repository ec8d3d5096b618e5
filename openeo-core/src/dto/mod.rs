//! Data Transfer Objects for the driver's REST boundary
//!
//! This module contains DTOs exchanged between clients, the driver, and the
//! execution engine. DTOs are lightweight representations of domain entities
//! optimized for network transfer.

pub mod job;
