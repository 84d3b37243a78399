//! AWS SQS queue implementation
//!
//! Talks to SQS, or to any SQS-compatible endpoint such as ElasticMQ when an endpoint
//! override is configured.

#![cfg(feature = "sqs")]

mod client;
mod config;

pub use client::SqsQueue;
pub use config::SqsConfig;
