pub mod animation;
pub mod background;
pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod curve;
pub mod error;
pub mod host;
pub mod interaction;
pub mod noise;
pub mod scheduler;
pub mod surface;

pub static CURVES_WGSL: &str = include_str!("../shaders/curves.wgsl");

pub use animation::*;
pub use background::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use curve::*;
pub use error::*;
pub use host::*;
pub use interaction::*;
pub use noise::*;
pub use scheduler::*;
pub use surface::*;
