//! Keyboard focus routing for a multi-lot production grid.
//!
//! The host renders the surface and implements [`locator::ElementLocator`]
//! and [`action::ActionHost`]; [`nav::FocusRouter`] decides, per key event,
//! whether and where focus moves.

pub mod action;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod locator;
pub mod nav;
pub mod replay;
pub mod surface;
