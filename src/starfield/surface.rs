//! Drawing surface abstraction
//!
//! The star field only needs two primitives: fill the whole canvas with a
//! colour and fill a circle. The browser implements them on a 2D canvas
//! context; [`RecordingSurface`] keeps the commands of the last frame in
//! memory for headless hosts and tests.

/// Minimal 2D drawing target
pub trait Surface {
    /// Fill the whole `width` x `height` area with `color`
    fn clear(&mut self, color: &str, width: f64, height: f64);

    /// Fill a circle centred at `(x, y)`
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str, alpha: f64);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: String,
        width: f64,
        height: f64,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: String,
        alpha: f64,
    },
}

/// Surface that records the commands issued since the last `clear`
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the current frame, starting with its `Clear`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of `clear` calls seen so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Circles drawn in the current frame
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    /// Circles of the current frame drawn in `color`
    pub fn circles_with_color<'a>(&'a self, color: &'a str) -> impl Iterator<Item = &'a DrawCommand> {
        self.circles().filter(move |c| match c {
            DrawCommand::Circle { color: c, .. } => c == color,
            _ => false,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: &str, width: f64, height: f64) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear {
            color: color.to_string(),
            width,
            height,
        });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str, alpha: f64) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color: color.to_string(),
            alpha,
        });
    }
}
