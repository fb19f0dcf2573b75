//! Star field
//!
//! Owns the star population, canvas bounds, random source and FPS counter.
//! The host drives it by calling [`StarField::tick`] once per frame and
//! [`StarField::draw`] with whatever surface it renders to.

use rand::Rng;

use super::fps::FpsCounter;
use super::particle::Star;
use super::surface::Surface;
use crate::config::{ConfigError, StarfieldConfig};

/// Snapshot of the field for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStats {
    pub stars: usize,
    pub active_flashes: usize,
    pub mean_trail_length: f64,
    pub max_trail_length: usize,
    pub frames: u64,
    pub fps: u32,
}

impl std::fmt::Display for FieldStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} stars, {} flashing, trail avg {:.1} / max {}, {} frames, {} fps",
            self.stars,
            self.active_flashes,
            self.mean_trail_length,
            self.max_trail_length,
            self.frames,
            self.fps
        )
    }
}

pub struct StarField<R> {
    config: StarfieldConfig,
    width: f64,
    height: f64,
    stars: Vec<Star>,
    rng: R,
    fps: FpsCounter,
    frames: u64,
}

impl<R: Rng> StarField<R> {
    /// Seed `config.star_count` stars over a `width` x `height` canvas
    pub fn new(config: StarfieldConfig, width: f64, height: f64, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let stars = (0..config.star_count)
            .map(|_| Star::random(&mut rng, &config, width, height))
            .collect();

        tracing::debug!(
            stars = config.star_count,
            width,
            height,
            "star field seeded"
        );

        Ok(Self {
            config,
            width,
            height,
            stars,
            rng,
            fps: FpsCounter::new(),
            frames: 0,
        })
    }

    /// Adopt new canvas bounds; stars are kept and wrap against them
    pub fn resize(&mut self, width: f64, height: f64) {
        if width != self.width || height != self.height {
            tracing::debug!(width, height, "star field resized");
        }
        self.width = width;
        self.height = height;
    }

    /// Advance every star by one frame
    pub fn update(&mut self) {
        let (width, height) = (self.width, self.height);
        for star in &mut self.stars {
            star.update(&mut self.rng, &self.config, width, height);
        }
        self.frames += 1;
    }

    /// One host frame at `now_ms`: count it for the FPS estimate, then update.
    ///
    /// Returns the new FPS estimate when a second boundary was crossed.
    pub fn tick(&mut self, now_ms: f64) -> Option<u32> {
        let published = self.fps.record_frame(now_ms);
        self.update();
        published
    }

    /// Clear to the background colour and draw every star
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(&self.config.background, self.width, self.height);
        for star in &self.stars {
            star.draw(surface, &self.config);
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Last published FPS estimate
    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Frames updated since seeding
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn stats(&self) -> FieldStats {
        let trail_total: usize = self.stars.iter().map(|s| s.trail().len()).sum();
        FieldStats {
            stars: self.stars.len(),
            active_flashes: self.stars.iter().filter(|s| s.flash().is_active()).count(),
            mean_trail_length: if self.stars.is_empty() {
                0.0
            } else {
                trail_total as f64 / self.stars.len() as f64
            },
            max_trail_length: self.stars.iter().map(|s| s.trail().len()).max().unwrap_or(0),
            frames: self.frames,
            fps: self.fps.fps(),
        }
    }
}
