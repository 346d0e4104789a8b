//! feedview
//!
//! Terminal client for a small social network. Pages (home, notifications,
//! search, profiles) keep their loaded lists and scroll offsets in a
//! session-scoped navigation cache, so going back or switching tabs shows
//! the same content at the same place without refetching.
//!
//! The crate follows a Pure Core / Impure Shell split: [`nav_cache`],
//! [`model`], [`pages`] and [`state`] are deterministic and take time as an
//! argument; [`view`] owns the terminal and the event loop.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod nav_cache;
pub mod pages;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;
