//! # HealtSync Backend
//!
//! Scheduling backend for a small clinic: doctors publish availability,
//! patients book appointments, doctors write medical records, and staff
//! read appointment reports.
//!
//! ## Architecture
//!
//! - [`models`]: domain entities with typed ids
//! - [`db`]: generic repository, in-memory and PostgreSQL backends, factory
//! - [`services`]: validation, booking, accounts, notifications, reports
//! - [`routes`]: per-resource DTOs and entity mapping
//! - [`api`]: re-exports of every wire type
//! - [`config`]: `healtsync.toml` plus environment overrides
//! - [`http`]: axum server, JWT authentication, handlers

// RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
