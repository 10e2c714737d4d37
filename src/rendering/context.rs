use crate::{
    core::geo::Point,
    rendering::style::{Color, LineRenderStyle, NoticeStyle, PointRenderStyle, TextStyle},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Corner an overlay notice is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeAnchor {
    TopLeft,
    TopRight,
}

/// Commands that can be issued to the render context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Rect {
        min: Point,
        max: Point,
        fill: Color,
    },
    Line {
        points: Vec<Point>,
        style: LineRenderStyle,
    },
    Circle {
        center: Point,
        style: PointRenderStyle,
    },
    Text {
        position: Point,
        text: String,
        style: TextStyle,
    },
    Notice {
        anchor: NoticeAnchor,
        lines: Vec<String>,
        style: NoticeStyle,
    },
}

/// Display list for one drawing surface.
///
/// Commands are recorded in paint order; a backend (SVG, a canvas, a GPU
/// pipeline) replays them.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub width: f64,
    pub height: f64,
    drawing_queue: Vec<DrawCommand>,
}

impl RenderContext {
    /// Create a new render context
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(MapError::Render(format!(
                "invalid surface size {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            drawing_queue: Vec::new(),
        })
    }

    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Begin a frame
    pub fn begin_frame(&mut self) {
        self.drawing_queue.clear();
    }

    pub fn fill_rect(&mut self, min: Point, max: Point, fill: Color) -> Result<()> {
        if min.x > max.x || min.y > max.y {
            return Err(MapError::Render("invalid rectangle bounds".to_string()));
        }
        self.drawing_queue.push(DrawCommand::Rect { min, max, fill });
        Ok(())
    }

    /// Render a polyline through `points`
    pub fn render_line(&mut self, points: &[Point], style: &LineRenderStyle) -> Result<()> {
        if points.len() < 2 {
            return Err(MapError::Render(format!(
                "a line needs at least two points, got {}",
                points.len()
            )));
        }
        self.drawing_queue.push(DrawCommand::Line {
            points: points.to_vec(),
            style: style.clone(),
        });
        Ok(())
    }

    /// Render a filled circle
    pub fn render_circle(&mut self, center: Point, style: &PointRenderStyle) -> Result<()> {
        if !(style.radius > 0.0) {
            return Err(MapError::Render(format!(
                "circle radius must be positive, got {}",
                style.radius
            )));
        }
        self.drawing_queue.push(DrawCommand::Circle {
            center,
            style: style.clone(),
        });
        Ok(())
    }

    pub fn render_text(&mut self, position: Point, text: impl Into<String>, style: &TextStyle) {
        self.drawing_queue.push(DrawCommand::Text {
            position,
            text: text.into(),
            style: style.clone(),
        });
    }

    pub fn render_notice(&mut self, anchor: NoticeAnchor, lines: &[&str], style: &NoticeStyle) {
        self.drawing_queue.push(DrawCommand::Notice {
            anchor,
            lines: lines.iter().map(|line| line.to_string()).collect(),
            style: style.clone(),
        });
    }

    /// Get the current drawing queue
    pub fn get_drawing_queue(&self) -> &[DrawCommand] {
        &self.drawing_queue
    }

    /// Texts in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.drawing_queue.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Clear the drawing queue
    pub fn clear_queue(&mut self) {
        self.drawing_queue.clear();
    }
}
