//! Render surface abstraction
//!
//! The scene is described as a flat list of 2D draw commands. A browser
//! canvas, a test recorder or anything else that can paint rectangles,
//! circles, polygons, lines and text can sit behind [`Surface`].

use glam::Vec2;

use crate::color::Color;
use crate::sim::collision::Rect;

/// Gradient color stop (`offset` in 0-1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Fill style
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient between two points
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<ColorStop>,
    },
    /// Radial gradient between two concentric circles
    Radial {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: Vec<ColorStop>,
    },
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// Soft halo drawn around a filled shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Color,
}

/// One drawing operation, in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface; starts a new frame
    Clear(Color),
    FillRect {
        rect: Rect,
        paint: Paint,
        glow: Option<Glow>,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        paint: Paint,
        glow: Option<Glow>,
    },
    /// Closed polygon
    FillPolygon {
        points: Vec<Vec2>,
        paint: Paint,
    },
    StrokePolygon {
        points: Vec<Vec2>,
        color: Color,
        line_width: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    Text {
        text: String,
        /// Centre of the baseline
        pos: Vec2,
        color: Color,
        /// CSS font shorthand
        font: String,
    },
}

/// Something the scene can be drawn onto
pub trait Surface {
    fn draw(&mut self, command: &DrawCommand);
}

/// Surface that keeps the commands of the most recent frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands drawn since the last `Clear`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started (one per `Clear`)
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Take the current frame's commands, leaving the recorder empty
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn draw(&mut self, command: &DrawCommand) {
        if matches!(command, DrawCommand::Clear(_)) {
            self.commands.clear();
            self.frames += 1;
        }
        self.commands.push(command.clone());
    }
}
