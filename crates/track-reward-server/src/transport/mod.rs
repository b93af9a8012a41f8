//! Transports for the scoring service

pub mod stdio;
