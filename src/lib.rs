//! # MentorHub Rust Backend
//!
//! Program type service for the MentorHub scheduling application.
//!
//! This crate provides the CRUD surface for "program type" records
//! (course/program metadata: type name, description, duration, scheduling
//! limits) backed by a swappable storage layer. The backend exposes a REST
//! API via Axum for the React frontend.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Shared domain types (ids, program types, users)
//! - [`db`]: Database operations, repository pattern, and persistence layer
//! - [`http`]: Axum-based HTTP server, bearer-token auth and request handlers

pub mod api;

pub mod db;

#[cfg(feature = "http-server")]
pub mod http;
