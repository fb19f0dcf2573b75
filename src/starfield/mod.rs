//! Star-field animation
//!
//! A decorative particle simulation for a canvas footer:
//!
//! - **particle**: stars with bounded trails and flash pulses
//! - **field**: the population, canvas bounds and frame entry points
//! - **fps**: once-per-second frame rate estimate
//! - **surface**: the drawing abstraction hosts implement
//!
//! # Frame cycle
//!
//! ```text
//! host frame(now_ms)
//!   → StarField::tick(now_ms)   count frame, update every star
//!   → StarField::draw(surface)  background, trails, bodies, flashes
//! ```
//!
//! # Example
//!
//! ```rust
//! use loadwatch::starfield::{RecordingSurface, StarField};
//! use loadwatch::StarfieldConfig;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut field = StarField::new(
//!     StarfieldConfig::default(),
//!     800.0,
//!     120.0,
//!     StdRng::seed_from_u64(7),
//! )
//! .unwrap();
//!
//! let mut surface = RecordingSurface::new();
//! for frame in 1..=120 {
//!     field.tick(frame as f64 * 1000.0 / 60.0);
//!     field.draw(&mut surface);
//! }
//! assert_eq!(field.fps(), 60);
//! ```

pub mod field;
pub mod fps;
pub mod particle;
pub mod surface;

pub use field::{FieldStats, StarField};
pub use fps::{FpsCounter, INITIAL_FPS};
pub use particle::{Flash, FlashPhase, Star, TrailPoint};
pub use surface::{DrawCommand, RecordingSurface, Surface};
