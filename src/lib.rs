//! StackPlus application shell
//!
//! Configuration, page navigation and the per-frame systems that drive a
//! [`stackplus_core::GameSession`].

pub mod app;
pub mod config;
pub mod systems;
