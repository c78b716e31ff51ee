mod component;
mod controller;
mod details;
mod model;
mod positions;
mod render;
mod state;
mod style;
mod surface;
mod types;
mod viewport;

pub use component::IntelGraphCanvas;
pub use types::GraphData;
