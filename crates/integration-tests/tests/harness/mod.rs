//! Shared fixtures for the black-box HTTP tests
//!
//! Each test binary uses a different subset of the helpers.
#![allow(dead_code)]

pub mod config;
pub mod mock_llm;
pub mod mock_whisper;
pub mod server;
