//! Completion session concepts shared by the gateway port and its adapters

pub mod stream;
