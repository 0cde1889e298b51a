//! Renderer-facing frame data
//!
//! No GPU code lives here. A backend captures a [`RenderFrame`] after each
//! tick and uploads its `Pod` records directly.

pub mod frame;

pub use frame::{FrameGlobals, ObstacleInstance, ProjectileInstance, RenderFrame, tunnel_polyline};
