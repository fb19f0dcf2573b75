//! Star particles
//!
//! A star drifts with a constant velocity, remembers its recent positions in
//! a bounded trail and occasionally pulses with a white flash.

use rand::Rng;
use std::collections::VecDeque;

use super::surface::Surface;
use crate::config::StarfieldConfig;

/// Past position kept for trail rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
}

/// Direction of a flash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashPhase {
    #[default]
    Idle,
    Growing,
    Fading,
}

/// Transient brightness pulse
///
/// Progress climbs from 0 to 1 by a fixed step, falls back to 0, then the
/// flash is idle until started again.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Flash {
    progress: f64,
    phase: FlashPhase,
    scale: f64,
}

impl Flash {
    /// Begin growing with the given radius multiplier
    pub fn start(&mut self, scale: f64) {
        self.phase = FlashPhase::Growing;
        self.scale = scale;
    }

    /// Move progress one step in the current direction
    pub fn advance(&mut self, step: f64) {
        match self.phase {
            FlashPhase::Idle => {}
            FlashPhase::Growing => {
                self.progress += step;
                if self.progress >= 1.0 {
                    self.progress = 1.0;
                    self.phase = FlashPhase::Fading;
                }
            }
            FlashPhase::Fading => {
                self.progress -= step;
                if self.progress <= 0.0 {
                    self.progress = 0.0;
                    self.phase = FlashPhase::Idle;
                }
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase != FlashPhase::Idle
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn phase(&self) -> FlashPhase {
        self.phase
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// A single star
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub size: f64,
    pub alpha: f64,
    pub color: String,
    trail: VecDeque<TrailPoint>,
    flash: Flash,
}

/// Uniform sample in `[lo, hi)`; degenerate ranges return `lo`
fn uniform<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}

impl Star {
    /// Seed a star somewhere on a `width` x `height` canvas
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        config: &StarfieldConfig,
        width: f64,
        height: f64,
    ) -> Self {
        let size = uniform(rng, config.size_range);
        let x = rng.gen::<f64>() * width;
        let y = rng.gen::<f64>() * height;
        let speed_x = uniform(rng, config.speed_x_range);
        let speed_y = uniform(rng, config.speed_y_range);
        let alpha = uniform(rng, config.alpha_range);
        let color = config.palette[rng.gen_range(0..config.palette.len())].clone();

        Self {
            x,
            y,
            speed_x,
            speed_y,
            size,
            alpha,
            color,
            trail: VecDeque::with_capacity(config.max_trail_length + 1),
            flash: Flash::default(),
        }
    }

    /// Oldest position first
    pub fn trail(&self) -> &VecDeque<TrailPoint> {
        &self.trail
    }

    pub fn flash(&self) -> &Flash {
        &self.flash
    }

    /// Advance one frame on a `width` x `height` canvas
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &StarfieldConfig,
        width: f64,
        height: f64,
    ) {
        self.trail.push_back(TrailPoint {
            x: self.x,
            y: self.y,
        });
        while self.trail.len() > config.max_trail_length {
            self.trail.pop_front();
        }

        self.x += self.speed_x;
        self.y += self.speed_y;

        if !self.flash.is_active() && rng.gen::<f64>() < config.flash_chance {
            let scale = uniform(rng, config.flash_scale_range);
            self.flash.start(scale);
        }
        self.flash.advance(config.flash_step);

        self.wrap(rng, width, height);
    }

    fn wrap<R: Rng + ?Sized>(&mut self, rng: &mut R, width: f64, height: f64) {
        // Falling off the bottom respawns at the top with a fresh trail
        if self.y > height {
            self.y = 0.0;
            self.x = rng.gen::<f64>() * width;
            self.trail.clear();
        }
        if self.y < 0.0 {
            self.y = height;
        }
        if self.x > width {
            self.x = 0.0;
        }
        if self.x < 0.0 {
            self.x = width;
        }
    }

    /// Draw trail, body and flash
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, config: &StarfieldConfig) {
        let len = self.trail.len() as f64;
        for (i, point) in self.trail.iter().enumerate() {
            let t = i as f64 / len;
            surface.fill_circle(
                point.x,
                point.y,
                self.size * t,
                &self.color,
                self.alpha * t * config.trail_alpha,
            );
        }

        surface.fill_circle(self.x, self.y, self.size, &self.color, self.alpha);

        let progress = self.flash.progress();
        if progress > 0.0 {
            surface.fill_circle(
                self.x,
                self.y,
                self.size * self.flash.scale() * progress,
                &config.flash_color,
                progress * config.flash_alpha,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starfield::surface::{DrawCommand, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still_config() -> StarfieldConfig {
        StarfieldConfig {
            flash_chance: 0.0,
            ..StarfieldConfig::default()
        }
    }

    fn star_at(x: f64, y: f64, speed_x: f64, speed_y: f64) -> Star {
        let mut rng = StdRng::seed_from_u64(1);
        let mut star = Star::random(&mut rng, &still_config(), 100.0, 100.0);
        star.x = x;
        star.y = y;
        star.speed_x = speed_x;
        star.speed_y = speed_y;
        star
    }

    #[test]
    fn test_random_star_within_ranges() {
        let config = StarfieldConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let star = Star::random(&mut rng, &config, 640.0, 120.0);
            assert!((0.0..640.0).contains(&star.x));
            assert!((0.0..120.0).contains(&star.y));
            assert!((0.5..1.7).contains(&star.size));
            assert!((-0.25..0.25).contains(&star.speed_x));
            assert!((0.1..0.4).contains(&star.speed_y));
            assert!((0.3..1.0).contains(&star.alpha));
            assert!(config.palette.contains(&star.color));
            assert!(star.trail().is_empty());
            assert!(!star.flash().is_active());
        }
    }

    #[test]
    fn test_random_star_on_empty_canvas() {
        let mut rng = StdRng::seed_from_u64(7);
        let star = Star::random(&mut rng, &StarfieldConfig::default(), 0.0, 0.0);
        assert_eq!((star.x, star.y), (0.0, 0.0));
    }

    #[test]
    fn test_trail_is_bounded() {
        let config = still_config();
        let mut rng = StdRng::seed_from_u64(3);
        let mut star = star_at(10.0, 10.0, 0.0, 0.0);

        for frame in 1..=100 {
            star.update(&mut rng, &config, 100.0, 100.0);
            assert_eq!(star.trail().len(), frame.min(config.max_trail_length));
        }
    }

    #[test]
    fn test_trail_records_previous_position() {
        let config = still_config();
        let mut rng = StdRng::seed_from_u64(3);
        let mut star = star_at(10.0, 20.0, 1.0, 2.0);

        star.update(&mut rng, &config, 100.0, 100.0);
        assert_eq!(star.trail().back(), Some(&TrailPoint { x: 10.0, y: 20.0 }));
        assert_eq!((star.x, star.y), (11.0, 22.0));
    }

    #[test]
    fn test_bottom_exit_respawns_at_top() {
        let config = still_config();
        let mut rng = StdRng::seed_from_u64(11);
        let mut star = star_at(50.0, 99.0, 0.0, 0.0);
        for _ in 0..3 {
            star.update(&mut rng, &config, 100.0, 100.0);
        }
        assert_eq!(star.trail().len(), 3);

        star.speed_y = 1.5;
        star.update(&mut rng, &config, 100.0, 100.0);
        assert_eq!(star.y, 0.0);
        assert!((0.0..100.0).contains(&star.x));
        assert!(star.trail().is_empty());
    }

    #[test]
    fn test_horizontal_wrap_keeps_trail() {
        let config = still_config();
        let mut rng = StdRng::seed_from_u64(5);

        let mut star = star_at(0.1, 50.0, -0.2, 0.0);
        star.update(&mut rng, &config, 100.0, 100.0);
        assert_eq!(star.x, 100.0);
        assert_eq!(star.trail().len(), 1);

        let mut star = star_at(99.9, 50.0, 0.2, 0.0);
        star.update(&mut rng, &config, 100.0, 100.0);
        assert_eq!(star.x, 0.0);
        assert_eq!(star.trail().len(), 1);
    }

    #[test]
    fn test_top_wrap_keeps_trail() {
        let config = still_config();
        let mut rng = StdRng::seed_from_u64(5);
        let mut star = star_at(50.0, 0.1, 0.0, -0.2);

        star.update(&mut rng, &config, 100.0, 100.0);
        assert_eq!(star.y, 100.0);
        assert_eq!(star.trail().len(), 1);
    }

    #[test]
    fn test_flash_cycle() {
        let mut flash = Flash::default();
        flash.advance(0.05);
        assert_eq!(flash.progress(), 0.0);
        assert_eq!(flash.phase(), FlashPhase::Idle);

        flash.start(2.0);
        let mut last = 0.0;
        let mut frames = 0;
        while flash.phase() == FlashPhase::Growing {
            flash.advance(0.05);
            assert!(flash.progress() >= last);
            last = flash.progress();
            frames += 1;
        }
        assert_eq!(flash.progress(), 1.0);
        assert_eq!(flash.phase(), FlashPhase::Fading);
        assert!((20..=21).contains(&frames));

        while flash.phase() == FlashPhase::Fading {
            flash.advance(0.05);
            assert!(flash.progress() <= last);
            last = flash.progress();
        }
        assert_eq!(flash.progress(), 0.0);
        assert!(!flash.is_active());

        flash.advance(0.05);
        assert_eq!(flash.progress(), 0.0);
    }

    #[test]
    fn test_certain_flash_starts_on_first_frame() {
        let config = StarfieldConfig {
            flash_chance: 1.0,
            ..StarfieldConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let mut star = star_at(10.0, 10.0, 0.0, 0.0);

        star.update(&mut rng, &config, 100.0, 100.0);
        assert_eq!(star.flash().phase(), FlashPhase::Growing);
        assert!((star.flash().progress() - 0.05).abs() < 1e-12);
        assert!((1.0..3.0).contains(&star.flash().scale()));
    }

    #[test]
    fn test_draw_order_and_scaling() {
        let config = still_config();
        let mut rng = StdRng::seed_from_u64(2);
        let mut star = star_at(10.0, 10.0, 1.0, 0.0);
        star.size = 1.0;
        star.alpha = 1.0;
        for _ in 0..4 {
            star.update(&mut rng, &config, 100.0, 100.0);
        }

        let mut surface = RecordingSurface::new();
        surface.clear(&config.background, 100.0, 100.0);
        star.draw(&mut surface, &config);

        let circles: Vec<_> = surface.circles().cloned().collect();
        // 4 trail points + body, no flash
        assert_eq!(circles.len(), 5);

        let radii: Vec<f64> = circles
            .iter()
            .map(|c| match c {
                DrawCommand::Circle { radius, .. } => *radius,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(radii, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        match &circles[2] {
            DrawCommand::Circle { x, alpha, .. } => {
                assert_eq!(*x, 12.0);
                assert!((alpha - 0.5 * 0.6).abs() < 1e-12);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_draw_flash_overlay() {
        let config = StarfieldConfig {
            flash_chance: 1.0,
            ..StarfieldConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let mut star = star_at(10.0, 10.0, 0.0, 0.0);
        star.update(&mut rng, &config, 100.0, 100.0);

        let mut surface = RecordingSurface::new();
        star.draw(&mut surface, &config);

        match surface.circles().last() {
            Some(DrawCommand::Circle {
                radius,
                color,
                alpha,
                ..
            }) => {
                let progress = star.flash().progress();
                assert_eq!(color, "#ffffff");
                assert!((radius - star.size * star.flash().scale() * progress).abs() < 1e-12);
                assert!((alpha - progress * 0.7).abs() < 1e-12);
            }
            other => panic!("expected flash circle, got {:?}", other),
        }
    }
}
