// src/menu/mod.rs
//! Context-menu module - item descriptors and the AVFS provider.

pub mod item;
pub mod provider;

pub use item::MenuItem;
pub use provider::{Activation, AvfsMenuProvider, MenuProvider};
