//! `kv-rs` CLI Tools.
//!
//! ## Getting started
//!
//! ```doc
//! ❯ ./kvcli
//!
//! ██  ██  █        █
//! ██ ██   ██      ██
//! ███      ██    ██
//! ██ ██     ██  ██
//! ██  ██     ████  KV Storage CLI
//!
//! Welcome to kvcli.
//!
//! kvcli > c1 begin
//! OK, tx 1
//!
//! kvcli > c1 set order_key xxx
//! OK
//!
//! kvcli > c1 get order_key
//! xxx
//!
//! kvcli > c1 commit
//! OK
//! ```

pub mod config;
pub mod rusty;
pub mod session;
pub mod trace;
