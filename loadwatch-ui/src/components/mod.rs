//! Page Components
//!
//! Each component attaches to server-rendered elements:
//!
//! - **chart**: load chart under `#server-select` / `#load-chart`
//! - **star_field**: animation on `.star-canvas`, FPS in `#fps-counter`

pub mod chart;
pub mod star_field;
