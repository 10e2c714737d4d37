//! Paint order for the schematic accident map.

use crate::{
    core::{geo::Point, map::AccidentMap},
    rendering::{
        context::{NoticeAnchor, RenderContext},
        style::MapStyle,
    },
    Result,
};

pub const INFO_NOTICE: [&str; 2] = [
    "This is a simplified map visualization.",
    "In a production app, integrate with Google Maps, Mapbox, or Leaflet.",
];

pub const FALLBACK_NOTICE: [&str; 1] =
    ["Using simulated location. Geolocation access is restricted in this environment."];

pub const USER_LABEL: &str = "Your Location";
pub const ACCIDENT_LABEL: &str = "Accident";

/// Builds the display list for an [`AccidentMap`]
pub struct MapScene<'a> {
    map: &'a AccidentMap,
    style: &'a MapStyle,
}

impl<'a> MapScene<'a> {
    pub fn new(map: &'a AccidentMap, style: &'a MapStyle) -> Self {
        Self { map, style }
    }

    /// Paints the whole map into `ctx`, replacing anything queued before
    pub fn render(&self, ctx: &mut RenderContext) -> Result<()> {
        ctx.begin_frame();
        self.render_background(ctx)?;
        self.render_route(ctx)?;
        self.render_markers(ctx)?;
        self.render_labels(ctx);
        self.render_notices(ctx);
        Ok(())
    }

    fn render_background(&self, ctx: &mut RenderContext) -> Result<()> {
        let style = self.style;
        ctx.fill_rect(Point::new(0.0, 0.0), ctx.size(), style.background)?;

        for y in road_positions(style.road_offset, style.road_spacing, ctx.height) {
            ctx.render_line(&[Point::new(0.0, y), Point::new(ctx.width, y)], &style.road)?;
        }
        for x in road_positions(style.road_offset, style.road_spacing, ctx.width) {
            ctx.render_line(&[Point::new(x, 0.0), Point::new(x, ctx.height)], &style.road)?;
        }
        Ok(())
    }

    fn render_route(&self, ctx: &mut RenderContext) -> Result<()> {
        ctx.render_line(&[self.map.user_px(), self.map.accident_px()], &self.style.route)
    }

    fn render_markers(&self, ctx: &mut RenderContext) -> Result<()> {
        // accident drawn last so it stays on top when the two overlap
        ctx.render_circle(self.map.user_px(), &self.style.user_marker)?;
        ctx.render_circle(self.map.accident_px(), &self.style.accident_marker)
    }

    fn render_labels(&self, ctx: &mut RenderContext) {
        let style = self.style;
        ctx.render_text(
            self.map.user_px().add(&style.label_offset),
            USER_LABEL,
            &style.label,
        );
        ctx.render_text(
            self.map.accident_px().add(&style.label_offset),
            ACCIDENT_LABEL,
            &style.label,
        );

        let margin = style.summary_margin;
        ctx.render_text(
            Point::new(margin, ctx.height - margin),
            self.map.estimate().to_string(),
            &style.summary,
        );
    }

    fn render_notices(&self, ctx: &mut RenderContext) {
        ctx.render_notice(NoticeAnchor::TopLeft, &INFO_NOTICE, &self.style.info_notice);
        if self.map.show_fallback_notice() {
            ctx.render_notice(
                NoticeAnchor::TopRight,
                &FALLBACK_NOTICE,
                &self.style.fallback_notice,
            );
        }
    }
}

/// Road positions along one axis: `offset`, `offset + spacing`, ... below `extent`
fn road_positions(offset: f64, spacing: f64, extent: f64) -> impl Iterator<Item = f64> {
    let count = if spacing > 0.0 && extent > offset {
        ((extent - offset) / spacing).ceil() as usize
    } else {
        0
    };
    (0..count)
        .map(move |i| offset + i as f64 * spacing)
        .filter(move |p| *p < extent)
}
