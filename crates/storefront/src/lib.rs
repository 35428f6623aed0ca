//! GameHub Storefront library.
//!
//! This crate provides the storefront pages as a library, allowing them to
//! be tested and reused. The `gamehub` binary is a thin CLI over it.
//!
//! # Modules
//!
//! - [`catalog`] - GameHub catalog API client
//! - [`pages`] - Home, product, checkout and confirmation pages
//! - [`storage`] - File-backed persistence for the cart and last order
//! - [`state`] - Shared application state
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod pages;
pub mod state;
pub mod storage;
