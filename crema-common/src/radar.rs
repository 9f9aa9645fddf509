//! Flavor radar projection
//!
//! Maps a [`FlavorProfile`] onto a five-spoke polar chart sized for an
//! arbitrary square canvas. Axis 0 (acidity) points straight up and the
//! remaining axes follow clockwise at equal `2π/5` spacing:
//!
//! - `angle_i = i × 2π/5 − π/2`
//! - `r = (v / 5) × radius`, with `radius = radius_ratio × size/2`
//! - `x = center + r × cos(angle_i)`, `y = center + r × sin(angle_i)`
//!
//! Screen coordinates grow downward, so increasing angle is clockwise on
//! screen. Projection is pure: the same `(profile, size)` always produces
//! bit-identical geometry.

use crate::flavor::{FlavorAxis, FlavorProfile, MAX_VALUE};
use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Number of spokes on the radar
pub const AXIS_COUNT: usize = 5;

/// Default share of the half-size used by the outer ring
///
/// The remaining margin is reserved for axis labels.
pub const DEFAULT_RADIUS_RATIO: f64 = 0.65;

/// Default distance of labels beyond the outer ring (pixels)
pub const DEFAULT_LABEL_OFFSET: f64 = 20.0;

const GRID_STROKE: &str = "#C69C6D";
const POLYGON_STROKE: &str = "#5D4037";
const DOT_RADIUS: f64 = 3.0;

/// Point in canvas pixels (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Straight segment (axis spoke)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

/// Concentric grid ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// Projector settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarConfig {
    /// Outer ring radius as a fraction of half the canvas size
    pub radius_ratio: f64,
    /// Label distance beyond the outer ring, in pixels
    pub label_offset: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            radius_ratio: DEFAULT_RADIUS_RATIO,
            label_offset: DEFAULT_LABEL_OFFSET,
        }
    }
}

/// Everything a renderer needs to draw one radar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarGeometry {
    /// Canvas edge length the geometry was computed for
    pub size: f64,
    pub center: Point,
    /// Radius of the outer (level 5) ring
    pub radius: f64,
    /// Data polygon, one vertex per axis in radar order
    pub polygon: [Point; AXIS_COUNT],
    /// Spokes from center to each axis' level 5 point
    pub axis_lines: [Line; AXIS_COUNT],
    /// Grid rings for levels 1 through 5, innermost first
    pub grid_circles: [Circle; AXIS_COUNT],
    /// Where to anchor each axis label
    pub label_anchors: [Point; AXIS_COUNT],
}

impl RadarGeometry {
    /// Polygon vertices formatted for an SVG `points` attribute
    pub fn polygon_points(&self) -> String {
        self.polygon
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Projects flavor profiles onto radar geometry
#[derive(Debug, Clone, Copy, Default)]
pub struct RadarProjector {
    config: RadarConfig,
}

impl RadarProjector {
    pub fn new(config: RadarConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    /// Compute polygon, spokes, grid rings and label anchors
    ///
    /// A non-finite or non-positive `size` is treated as zero, which
    /// collapses every point onto the origin instead of producing NaN.
    pub fn project(&self, profile: &FlavorProfile, size: f64) -> RadarGeometry {
        let size = if size.is_finite() && size > 0.0 { size } else { 0.0 };
        let half = size / 2.0;
        let center = Point::new(half, half);
        let radius = half * self.config.radius_ratio;
        let max = f64::from(MAX_VALUE);

        let values = profile.values();
        let polygon: [Point; AXIS_COUNT] =
            std::array::from_fn(|i| polar(center, f64::from(values[i]) / max * radius, i));
        let axis_lines: [Line; AXIS_COUNT] = std::array::from_fn(|i| Line {
            from: center,
            to: polar(center, radius, i),
        });
        let grid_circles: [Circle; AXIS_COUNT] = std::array::from_fn(|level| Circle {
            center,
            radius: (level + 1) as f64 / max * radius,
        });
        let label_anchors: [Point; AXIS_COUNT] =
            std::array::from_fn(|i| polar(center, radius + self.config.label_offset, i));

        RadarGeometry {
            size,
            center,
            radius,
            polygon,
            axis_lines,
            grid_circles,
            label_anchors,
        }
    }
}

/// Project with the default configuration
pub fn project(profile: &FlavorProfile, size: f64) -> RadarGeometry {
    RadarProjector::default().project(profile, size)
}

/// Angle of axis `index` in radians (0 points up, clockwise on screen)
pub fn axis_angle(index: usize) -> f64 {
    index as f64 * (TAU / AXIS_COUNT as f64) - FRAC_PI_2
}

fn polar(center: Point, r: f64, index: usize) -> Point {
    let angle = axis_angle(index);
    Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
}

/// Render geometry as a standalone SVG document
///
/// Layers, bottom to top: grid rings, spokes, filled data polygon, vertex
/// dots, axis labels in `language`.
pub fn render_svg(geometry: &RadarGeometry, language: Language) -> String {
    let size = geometry.size;
    let c = geometry.center;
    let mut lines = vec![format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    )];

    lines.extend(geometry.grid_circles.iter().map(|ring| {
        format!(
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{GRID_STROKE}" stroke-opacity="0.2" stroke-width="1"/>"#,
            c.x, c.y, ring.radius
        )
    }));
    lines.extend(geometry.axis_lines.iter().map(|spoke| {
        format!(
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{GRID_STROKE}" stroke-opacity="0.2" stroke-width="1"/>"#,
            spoke.from.x, spoke.from.y, spoke.to.x, spoke.to.y
        )
    }));
    lines.push(format!(
        r#"  <polygon points="{}" fill="{GRID_STROKE}" fill-opacity="0.4" stroke="{POLYGON_STROKE}" stroke-width="1.5"/>"#,
        geometry.polygon_points()
    ));
    lines.extend(geometry.polygon.iter().map(|vertex| {
        format!(
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{DOT_RADIUS}" fill="{POLYGON_STROKE}"/>"#,
            vertex.x, vertex.y
        )
    }));
    lines.extend(
        FlavorAxis::ALL
            .iter()
            .zip(&geometry.label_anchors)
            .map(|(axis, anchor)| {
                format!(
                    r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="middle" font-size="10">{}</text>"#,
                    anchor.x,
                    anchor.y,
                    language.axis_label(*axis)
                )
            }),
    );
    lines.push("</svg>".to_string());

    let mut svg = lines.join("\n");
    svg.push('\n');
    svg
}
