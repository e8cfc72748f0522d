//! Interactive seat map for theater and hall bookings.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It lays out
//! a venue's seats from configuration, draws them on a 2D canvas, and turns
//! pointer, touch, and wheel input into pan/zoom, seat selection, and occupant
//! tooltips. The host page mounts a [`web::SeatMapWidget`] on a canvas and
//! forwards DOM events to it.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Gesture state machine and dispatch ([`engine::EngineCore`]) |
//! | [`layout`] | Seat records, occupancy data, and the layout builder |
//! | [`camera`] | Pan/zoom view transform and coordinate conversions |
//! | [`input`] | Gesture states and tap detection |
//! | [`hit`] | Hit-testing pointer positions against seats |
//! | [`selection`] | Capacity- and adjacency-limited seat selection |
//! | [`tooltip`] | Occupant tooltip placement |
//! | [`render`] | Scene drawing through the [`render::Surface`] trait |
//! | [`viewport`] | Responsive canvas sizing |
//! | [`config`] | JSON configuration and venue presets |
//! | [`error`] | Crate error type |
//! | [`logging`] | `tracing` output to the browser console |
//! | [`web`] | `wasm-bindgen` widget and the canvas [`render::Surface`] |
//! | [`consts`] | Shared numeric constants (layout metrics, zoom limits, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod hit;
pub mod input;
pub mod layout;
pub mod logging;
pub mod render;
pub mod selection;
pub mod tooltip;
pub mod viewport;
pub mod web;
