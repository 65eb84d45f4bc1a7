//! Scenario test utilities
//!
//! In-memory repository fakes over one shared store, plus scripted
//! doubles for the Telegram gateway, the browser, and OAuth providers.
//! The scenario suites under `tests/` exercise the identity reconcilers,
//! the admin control plane, and the reels pipeline end to end without a
//! database or network.

pub mod doubles;
pub mod fakes;

pub use doubles::{ScriptedBrowser, ScriptedGateway, ScriptedOAuthClient};
pub use fakes::InMemoryStore;
