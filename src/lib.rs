//! local-ip: show the machine's primary local IP address.
//!
//! A library for reading network interface data from system tools,
//! picking the single best local address, and keeping it refreshed
//! for display and copying.

pub mod config;
pub mod indicator;
pub mod network;
