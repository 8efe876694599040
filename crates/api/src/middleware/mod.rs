//! Request context extractors.
//!
//! - [`identity::Player`] -- The calling user, `"anonymous"` when unknown.
//! - [`identity::GameSession`] -- The post hosting the game, if any.

pub mod identity;
