//! Library exports for the PDF hosting and notification services
//!
//! This module exposes internal components for the binaries and for testing.

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod notification;
pub mod route;
pub mod state;
pub mod store;
pub mod upstream;
