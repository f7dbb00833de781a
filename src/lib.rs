//! Pokedex - PokeAPI catalog browser
//!
//! The library exposes the store and its collaborators so the binary and the
//! integration tests share one implementation.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod filter;
pub mod logging;
pub mod reducer;
pub mod sprite;
pub mod sprite_backend;
pub mod state;
pub mod store;
