//! Headless diagram viewer: response classification and pan/zoom state.
//!
//! This crate owns the only stateful logic of the Diagramify client. A raw
//! response body from the diagram-generation API is classified into a typed
//! [`artifact::RenderableArtifact`], installed into a [`engine::ViewerCore`],
//! and then manipulated by pointer and wheel input. The host layer (CLI, web
//! page, native window) is responsible only for delivering input events and
//! applying the resulting [`render::SurfaceStyle`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`artifact`] | Artifact types and the response normalizer |
//! | [`engine`] | [`engine::ViewerCore`]: artifact ownership and the drag/zoom state machine |
//! | [`camera`] | Points, viewport scale/offset, and the composed transform |
//! | [`input`] | Input event types and the drag state |
//! | [`render`] | Style description handed to the render surface |
//! | [`consts`] | Zoom limits and step sizes |

pub mod artifact;
pub mod camera;
pub mod consts;
pub mod engine;
pub mod input;
pub mod render;
