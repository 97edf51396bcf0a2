//! Maven repository access: the artifact fetcher interface consumed by the
//! resolver, plus an HTTP implementation with retries, authentication and
//! checksum verification.

pub mod auth;
pub mod checksum;
pub mod download;
pub mod fetcher;
pub mod repository;
