pub mod config;
pub mod contact;
pub mod content;
pub mod interaction;
pub mod intro;
pub mod magnetic;
pub mod motion;
pub mod nav;
pub mod projection;
pub mod reveal;
pub mod scene;
pub mod scroll;
pub mod section;
pub mod smooth_scroll;
pub mod telemetry;
pub mod timeline;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;
