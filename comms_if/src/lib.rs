//! # Communications interface crate.
//!
//! Provides all common communications interfaces for the software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Message definitions for the navigation data feeds (pose, base path, lookahead window)
pub mod nav;

/// Network module
pub mod net;
