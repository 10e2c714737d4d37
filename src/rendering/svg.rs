//! SVG backend for a recorded display list.

use crate::{
    core::geo::Point,
    rendering::{
        context::{DrawCommand, NoticeAnchor, RenderContext},
        style::{Color, NoticeStyle},
    },
    Result,
};
use std::fmt::{self, Write};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Average glyph width relative to font size, used to size notice panels
const GLYPH_WIDTH_RATIO: f64 = 0.55;
const LINE_HEIGHT_RATIO: f64 = 1.4;

pub fn to_svg(ctx: &RenderContext) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_svg(ctx, &mut out);
    out
}

pub fn save_svg(ctx: &RenderContext, path: impl AsRef<std::path::Path>) -> Result<()> {
    std::fs::write(path, to_svg(ctx))?;
    Ok(())
}

pub fn write_svg<W: Write>(ctx: &RenderContext, out: &mut W) -> fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(ctx.width),
        h = num(ctx.height)
    )?;

    for command in ctx.get_drawing_queue() {
        match command {
            DrawCommand::Rect { min, max, fill } => {
                write_rect(out, *min, max.subtract(min), *fill)?;
            }
            DrawCommand::Line { points, style } => {
                let path = points
                    .iter()
                    .map(|p| format!("{},{}", num(p.x), num(p.y)))
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(
                    out,
                    r#"  <polyline points="{}" fill="none" stroke="{}"{} stroke-width="{}"/>"#,
                    path,
                    style.color.to_hex_rgb(),
                    opacity_attr("stroke-opacity", style.color),
                    num(style.width as f64)
                )?;
            }
            DrawCommand::Circle { center, style } => {
                writeln!(
                    out,
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"{}/>"#,
                    num(center.x),
                    num(center.y),
                    num(style.radius as f64),
                    style.fill_color.to_hex_rgb(),
                    opacity_attr("fill-opacity", style.fill_color)
                )?;
            }
            DrawCommand::Text {
                position,
                text,
                style,
            } => {
                write_text(out, *position, text, style.size as f64, &style.font_family, style.color)?;
            }
            DrawCommand::Notice {
                anchor,
                lines,
                style,
            } => write_notice(out, ctx.width, *anchor, lines, style)?,
        }
    }

    writeln!(out, "</svg>")
}

fn write_rect<W: Write>(out: &mut W, origin: Point, size: Point, fill: Color) -> fmt::Result {
    writeln!(
        out,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}/>"#,
        num(origin.x),
        num(origin.y),
        num(size.x),
        num(size.y),
        fill.to_hex_rgb(),
        opacity_attr("fill-opacity", fill)
    )
}

fn write_text<W: Write>(
    out: &mut W,
    position: Point,
    text: &str,
    size: f64,
    family: &str,
    color: Color,
) -> fmt::Result {
    writeln!(
        out,
        r#"  <text x="{}" y="{}" font-family="{}" font-size="{}px" fill="{}">{}</text>"#,
        num(position.x),
        num(position.y),
        escape(family),
        num(size),
        color.to_hex_rgb(),
        escape(text)
    )
}

fn write_notice<W: Write>(
    out: &mut W,
    surface_width: f64,
    anchor: NoticeAnchor,
    lines: &[String],
    style: &NoticeStyle,
) -> fmt::Result {
    let font = style.text.size as f64;
    let padding = style.padding as f64;
    let line_height = font * LINE_HEIGHT_RATIO;
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let size = Point::new(
        longest as f64 * font * GLYPH_WIDTH_RATIO + 2.0 * padding,
        lines.len() as f64 * line_height + 2.0 * padding,
    );
    let origin = match anchor {
        NoticeAnchor::TopLeft => Point::new(0.0, 0.0),
        NoticeAnchor::TopRight => Point::new((surface_width - size.x).max(0.0), 0.0),
    };

    writeln!(out, "  <g>")?;
    write_rect(out, origin, size, style.background)?;
    for (i, line) in lines.iter().enumerate() {
        let baseline = origin.y + padding + font + i as f64 * line_height;
        write_text(
            out,
            Point::new(origin.x + padding, baseline),
            line,
            font,
            &style.text.font_family,
            style.text.color,
        )?;
    }
    writeln!(out, "  </g>")
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.a == 255 {
        String::new()
    } else {
        format!(r#" {}="{}""#, name, num(color.opacity() as f64))
    }
}

/// Two decimals, trailing zeros trimmed
fn num(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::AlertMapOptions, geo::LatLng, map::AccidentMap};
    use crate::location::UserLocation;
    use crate::rendering::{scene::MapScene, style::TextStyle};

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(400.0), "400");
        assert_eq!(num(299.999999), "300");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a < b & "c""#), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_text_is_escaped() {
        let mut ctx = RenderContext::new(100.0, 50.0).unwrap();
        ctx.render_text(Point::new(1.0, 2.0), "<b>", &TextStyle::new(Color::BLACK, 12.0));
        let svg = to_svg(&ctx);

        assert!(svg.contains("&lt;b&gt;"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn test_accident_map_svg() {
        let options = AlertMapOptions::default();
        let accident = LatLng::new(30.275224, 77.989081);
        let user = UserLocation::fallback_for(&accident, &options.fallback);
        let map = AccidentMap::new(accident, user, Point::new(800.0, 500.0), &options);
        let mut ctx = RenderContext::new(800.0, 500.0).unwrap();
        MapScene::new(&map, &options.style).render(&mut ctx).unwrap();

        let svg = to_svg(&ctx);
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="500""#));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r##"<circle cx="400" cy="250" r="10" fill="#ef4444"/>"##));
        assert!(svg.contains(r##"<circle cx="300" cy="350" r="8" fill="#3b82f6"/>"##));
        assert!(svg.contains("Distance: 2.7 miles | ETA: 8 minutes"));
        assert!(svg.contains("Using simulated location."));
        assert!(svg.contains(r#"fill-opacity="0.8""#));
    }
}
