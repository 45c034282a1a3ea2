// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests assert with unwrap freely
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Touch and mouse interaction for 3D model showcases.
//!
//! Partview turns a raw pointer stream into an orbiting, zoomable model
//! view with tap-to-inspect annotations: a tap on a model part ray-tests
//! the scene, finds the part's metadata and slides in an animated popup.
//!
//! # Key entry points
//!
//! - [`engine::ShowcaseEngine`] - the per-frame driver
//! - [`input::InputProcessor`] - pointer events to [`engine::Command`]s,
//!   with tap-versus-drag classification
//! - [`camera::OrbitCameraController`] - damped orbit, roll and FOV zoom
//! - [`picking::PickDispatcher`] - tap to annotation lookup
//! - [`popup::PopupAnimator`] - popup placement and slide/fade state machine
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Frame model
//!
//! Everything is single-threaded and frame-driven. The host queues input
//! events as they arrive and calls [`engine::ShowcaseEngine::tick`] once
//! per rendered frame with a [`util::frame_timing::FrameTick`].

pub mod camera;
pub mod engine;
pub mod error;
pub mod input;
pub mod options;
pub mod picking;
pub mod popup;
pub mod replay;
pub mod util;
