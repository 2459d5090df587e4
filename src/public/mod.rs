//! Public (WAN) address lookup over HTTP.
//!
//! This module provides types and traits for:
//! - Lookup settings ([`ResolverConfig`])
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Single-attempt public IP lookup ([`PublicIpFetcher`], [`fetch_public_ip`])

mod client;
mod config;
mod error;
mod fetcher;
mod request;


pub use client::{ReqwestClient, USER_AGENT};
pub use config::ResolverConfig;
pub use error::{HttpError, LookupError};
pub use fetcher::{IpLookupResult, PublicIpFetcher, fetch_public_ip};
pub use request::{HttpClient, HttpRequest, HttpResponse};
