// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node self content and point-containment predicates.
//!
//! Everything here is pure and works in node-local coordinates. The pick
//! traversal maps the query point into each node's space and then asks
//! [`contains_self`] or [`contains_region`].
//!
//! ## Self containment
//!
//! - [`NodeKind::Container`] never hits itself; only its children can be hit.
//! - [`NodeKind::Path`] hits inside its fill (under its [`FillRule`]) when the
//!   fill paint is visible, or within half the stroke width of its outline when
//!   the stroke paint is visible (a zero-width visible stroke is a hairline).
//!   With neither paint visible, its bounding box decides.
//! - [`NodeKind::Text`] and [`NodeKind::Image`] are opaque primitives hit by their bounds.

use kurbo::{
    Affine, BezPath, Circle, Ellipse, Line, ParamCurveNearest, PathEl, PathSeg, Point, Rect,
    RoundedRect, Shape as _,
};

/// Flattening tolerance for curved outlines in stroke tests.
const PATH_TOLERANCE: f64 = 1e-3;

/// Accuracy for nearest-point queries on curved segments.
const NEAREST_ACCURACY: f64 = 1e-6;

/// Half width used for visible strokes whose width is zero (hairlines).
const HAIRLINE_HALF_WIDTH: f64 = 0.5;

/// Rule deciding which points a self-intersecting fill covers.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FillRule {
    /// Inside when the winding number is non-zero.
    #[default]
    NonZero,
    /// Inside when the winding number is odd.
    EvenOdd,
}

impl FillRule {
    /// Returns true if `winding` counts as inside under this rule.
    pub const fn is_inside(self, winding: i32) -> bool {
        match self {
            Self::NonZero => winding != 0,
            Self::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Paint intent of a fill or stroke.
///
/// Picking never reads pixels; it only needs to know whether the paint would
/// put anything on screen.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Paint {
    /// Nothing is painted.
    #[default]
    None,
    /// A paint with the given overall alpha in `0.0..=1.0`.
    Solid {
        /// Overall opacity of the paint.
        alpha: f32,
    },
}

impl Paint {
    /// Fully opaque paint.
    pub const OPAQUE: Self = Self::Solid { alpha: 1.0 };

    /// Returns true if this paint puts anything on screen.
    pub fn is_visible(self) -> bool {
        match self {
            Self::None => false,
            Self::Solid { alpha } => alpha > 0.0,
        }
    }
}

/// Geometry used for self content, clips, and pointer areas.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Rounded rectangle.
    RoundedRect(RoundedRect),
    /// Circle.
    Circle(Circle),
    /// Ellipse, possibly rotated.
    Ellipse(Ellipse),
    /// Line segment. Encloses no area, so it is only hit by its stroke.
    Line(Line),
    /// Arbitrary path.
    Path(BezPath),
}

impl From<Rect> for Shape {
    fn from(r: Rect) -> Self {
        Self::Rect(r)
    }
}

impl From<RoundedRect> for Shape {
    fn from(r: RoundedRect) -> Self {
        Self::RoundedRect(r)
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Ellipse> for Shape {
    fn from(e: Ellipse) -> Self {
        Self::Ellipse(e)
    }
}

impl From<Line> for Shape {
    fn from(l: Line) -> Self {
        Self::Line(l)
    }
}

impl From<BezPath> for Shape {
    fn from(p: BezPath) -> Self {
        Self::Path(p)
    }
}

impl Shape {
    /// Axis-aligned bounds in local coordinates.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Rect(r) => r.bounding_box(),
            Self::RoundedRect(r) => r.bounding_box(),
            Self::Circle(c) => c.bounding_box(),
            Self::Ellipse(e) => e.bounding_box(),
            Self::Line(l) => l.bounding_box(),
            Self::Path(p) => p.bounding_box(),
        }
    }

    /// Winding number of the outline around `pt`.
    pub fn winding(&self, pt: Point) -> i32 {
        match self {
            Self::Rect(r) => r.winding(pt),
            Self::RoundedRect(r) => r.winding(pt),
            Self::Circle(c) => c.winding(pt),
            Self::Ellipse(e) => e.winding(pt),
            Self::Line(l) => l.winding(pt),
            Self::Path(p) => p.winding(pt),
        }
    }

    /// Returns true if `pt` is inside the fill under `rule`.
    pub fn contains_with_rule(&self, pt: Point, rule: FillRule) -> bool {
        if !self.bounding_box().contains(pt) {
            return false;
        }
        rule.is_inside(self.winding(pt))
    }

    /// Returns true if `pt` is inside the fill under [`FillRule::NonZero`].
    pub fn contains(&self, pt: Point) -> bool {
        self.contains_with_rule(pt, FillRule::NonZero)
    }

    /// Returns true if `pt` lies within `half_width` of the outline.
    ///
    /// Joins and caps are treated as round.
    pub fn stroke_contains(&self, pt: Point, half_width: f64) -> bool {
        if half_width <= 0.0 {
            return false;
        }
        let limit = half_width * half_width;
        let near = |seg: PathSeg| seg.nearest(pt, NEAREST_ACCURACY).distance_sq <= limit;
        match self {
            Self::Rect(r) => r.path_segments(PATH_TOLERANCE).any(near),
            Self::RoundedRect(r) => r.path_segments(PATH_TOLERANCE).any(near),
            Self::Circle(c) => c.path_segments(PATH_TOLERANCE).any(near),
            Self::Ellipse(e) => e.path_segments(PATH_TOLERANCE).any(near),
            Self::Line(l) => near(PathSeg::Line(*l)),
            Self::Path(p) => p.segments().any(near),
        }
    }

    /// Returns true if every coordinate of the shape is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Rect(r) => rect_is_finite(*r),
            Self::RoundedRect(r) => {
                let radii = r.radii();
                rect_is_finite(r.rect())
                    && radii.top_left.is_finite()
                    && radii.top_right.is_finite()
                    && radii.bottom_right.is_finite()
                    && radii.bottom_left.is_finite()
            }
            Self::Circle(c) => point_is_finite(c.center) && c.radius.is_finite(),
            Self::Ellipse(e) => {
                let radii = e.radii();
                point_is_finite(e.center())
                    && radii.x.is_finite()
                    && radii.y.is_finite()
                    && e.rotation().is_finite()
            }
            Self::Line(l) => point_is_finite(l.p0) && point_is_finite(l.p1),
            Self::Path(p) => p.elements().iter().all(|el| match *el {
                PathEl::MoveTo(p0) | PathEl::LineTo(p0) => point_is_finite(p0),
                PathEl::QuadTo(p0, p1) => point_is_finite(p0) && point_is_finite(p1),
                PathEl::CurveTo(p0, p1, p2) => {
                    point_is_finite(p0) && point_is_finite(p1) && point_is_finite(p2)
                }
                PathEl::ClosePath => true,
            }),
        }
    }
}

/// A shape with fill and stroke paint.
#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    /// Outline in node-local coordinates.
    pub shape: Shape,
    /// Fill paint.
    pub fill: Paint,
    /// Stroke paint.
    pub stroke: Paint,
    /// Full stroke width in local units.
    pub stroke_width: f64,
    /// Rule used for fill containment.
    pub fill_rule: FillRule,
}

impl PathNode {
    /// An opaque filled shape without a stroke.
    pub fn filled(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            fill: Paint::OPAQUE,
            stroke: Paint::None,
            stroke_width: 0.0,
            fill_rule: FillRule::NonZero,
        }
    }

    /// An opaque stroked outline without a fill.
    pub fn stroked(shape: impl Into<Shape>, stroke_width: f64) -> Self {
        Self {
            shape: shape.into(),
            fill: Paint::None,
            stroke: Paint::OPAQUE,
            stroke_width,
            fill_rule: FillRule::NonZero,
        }
    }

    /// Replace the fill rule.
    #[must_use]
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// Half the stroke width, or `None` when the stroke paints nothing.
    ///
    /// A visible stroke without a positive width is a hairline.
    fn stroke_half_width(&self) -> Option<f64> {
        if !self.stroke.is_visible() {
            return None;
        }
        if self.stroke_width > 0.0 {
            Some(self.stroke_width * 0.5)
        } else {
            Some(HAIRLINE_HALF_WIDTH)
        }
    }

    /// Bounds of the painted area, including the stroke.
    pub fn bounds(&self) -> Rect {
        let hw = self.stroke_half_width().unwrap_or(0.0);
        self.shape.bounding_box().inflate(hw, hw)
    }

    /// Self containment for a painted shape.
    pub fn contains(&self, pt: Point) -> bool {
        let bounds = self.bounds();
        if !bounds.contains(pt) {
            return false;
        }
        let fill = self.fill.is_visible();
        let stroke = self.stroke_half_width();
        if !fill && stroke.is_none() {
            // Nothing painted; fall back to the bounding box.
            return true;
        }
        (fill && self.shape.contains_with_rule(pt, self.fill_rule))
            || stroke.is_some_and(|hw| self.shape.stroke_contains(pt, hw))
    }
}

/// Self content of a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum NodeKind {
    /// Grouping node without self content.
    #[default]
    Container,
    /// Painted shape.
    Path(PathNode),
    /// Text run, hit by its glyph bounds.
    Text {
        /// Glyph bounds in local coordinates.
        bounds: Rect,
    },
    /// Raster image, hit by its bounds.
    Image {
        /// Image bounds in local coordinates.
        bounds: Rect,
    },
}

impl NodeKind {
    /// Local bounds of the self content, if any.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Container => None,
            Self::Path(path) => Some(path.bounds()),
            Self::Text { bounds } | Self::Image { bounds } => Some(*bounds),
        }
    }
}

/// Returns true if `pt` (node-local) hits the node's own content.
pub fn contains_self(kind: &NodeKind, pt: Point) -> bool {
    match kind {
        NodeKind::Container => false,
        NodeKind::Path(path) => path.contains(pt),
        NodeKind::Text { bounds } | NodeKind::Image { bounds } => bounds.contains(pt),
    }
}

/// Containment test for clips and pointer areas.
///
/// Returns `None` when the region has non-finite coordinates; callers decide
/// what an invalid region means for them.
pub fn contains_region(shape: &Shape, pt: Point) -> Option<bool> {
    if !shape.is_finite() {
        return None;
    }
    Some(shape.contains(pt))
}

/// Inverse of `affine`, or `None` when it is not invertible.
pub fn invert(affine: Affine) -> Option<Affine> {
    let det = affine.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let inverse = affine.inverse();
    inverse.is_finite().then_some(inverse)
}

fn point_is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn rect_is_finite(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((x0, y0));
        path.line_to((x1, y0));
        path.line_to((x1, y1));
        path.line_to((x0, y1));
        path.close_path();
        path
    }

    #[test]
    fn filled_rect_hit_and_miss() {
        let node = PathNode::filled(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(node.contains(Point::new(5.0, 5.0)));
        assert!(!node.contains(Point::new(11.0, 5.0)));
    }

    #[test]
    fn fill_rule_even_odd_excludes_overlap() {
        // Two nested squares wound the same way: the inner one has winding 2.
        let mut path = square(0.0, 0.0, 10.0, 10.0);
        path.extend(square(2.0, 2.0, 8.0, 8.0).elements().iter().copied());
        let non_zero = PathNode::filled(path.clone());
        let even_odd = PathNode::filled(path).with_fill_rule(FillRule::EvenOdd);

        let inner = Point::new(5.0, 5.0);
        let ring = Point::new(1.0, 1.0);
        assert!(non_zero.contains(inner));
        assert!(!even_odd.contains(inner), "even-odd should punch a hole");
        assert!(even_odd.contains(ring));
    }

    #[test]
    fn stroke_only_misses_interior() {
        let node = PathNode::stroked(Circle::new((0.0, 0.0), 10.0), 2.0);
        assert!(node.contains(Point::new(10.5, 0.0)), "on the outline");
        assert!(node.contains(Point::new(0.0, -9.2)), "inside the stroke width");
        assert!(!node.contains(Point::new(0.0, 0.0)), "unfilled interior");
        assert!(!node.contains(Point::new(12.0, 0.0)), "outside the stroke");
    }

    #[test]
    fn hairline_stroke_hits_only_its_outline() {
        let ring = PathNode::stroked(Circle::new((0.0, 0.0), 10.0), 0.0);
        assert!(!ring.contains(Point::new(0.0, 0.0)), "unfilled interior");
        assert!(!ring.contains(Point::new(-9.5, -9.5)), "bounding box corner");
        assert!(ring.contains(Point::new(10.0, 0.0)));
        assert!(ring.contains(Point::new(0.0, 10.4)));
        assert!(!ring.contains(Point::new(0.0, 11.0)));
        assert_eq!(ring.bounds(), Rect::new(-10.5, -10.5, 10.5, 10.5));
    }

    #[test]
    fn stroke_and_fill_union() {
        let mut node = PathNode::filled(Rect::new(0.0, 0.0, 10.0, 10.0));
        node.stroke = Paint::OPAQUE;
        node.stroke_width = 4.0;
        assert!(node.contains(Point::new(5.0, 5.0)));
        assert!(node.contains(Point::new(-1.5, 5.0)), "outer half of the stroke");
        assert!(!node.contains(Point::new(-2.5, 5.0)));
    }

    #[test]
    fn unpainted_shape_falls_back_to_bounds() {
        let mut node = PathNode::filled(Circle::new((0.0, 0.0), 10.0));
        node.fill = Paint::Solid { alpha: 0.0 };
        // Corner of the bounding box lies outside the circle itself.
        assert!(node.contains(Point::new(-9.5, -9.5)));
        assert!(!node.contains(Point::new(-10.5, 0.0)));
    }

    #[test]
    fn line_is_hit_only_by_stroke() {
        let line = Line::new((0.0, 0.0), (10.0, 0.0));
        let filled = PathNode::filled(line);
        assert!(!filled.contains(Point::new(5.0, 0.0)), "a line encloses no area");
        let stroked = PathNode::stroked(line, 2.0);
        assert!(stroked.contains(Point::new(5.0, 0.5)));
        assert!(!stroked.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn container_never_hits_itself() {
        assert!(!contains_self(&NodeKind::Container, Point::ZERO));
        let text = NodeKind::Text {
            bounds: Rect::new(0.0, 0.0, 40.0, 12.0),
        };
        assert!(contains_self(&text, Point::new(20.0, 6.0)));
        assert!(!contains_self(&text, Point::new(20.0, 13.0)));
    }

    #[test]
    fn invalid_region_is_reported() {
        let bad = Shape::Rect(Rect::new(0.0, 0.0, f64::NAN, 10.0));
        assert_eq!(contains_region(&bad, Point::new(1.0, 1.0)), None);
        let mut path = square(0.0, 0.0, 10.0, 10.0);
        path.line_to((f64::INFINITY, 0.0));
        assert_eq!(contains_region(&Shape::Path(path), Point::new(1.0, 1.0)), None);
        let good = Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(contains_region(&good, Point::new(1.0, 1.0)), Some(true));
        assert_eq!(contains_region(&good, Point::new(11.0, 1.0)), Some(false));
    }

    #[test]
    fn zero_size_region_contains_nothing() {
        let empty = Shape::Rect(Rect::ZERO);
        assert_eq!(contains_region(&empty, Point::ZERO), Some(false));
    }

    #[test]
    fn invert_rejects_degenerate() {
        assert!(invert(Affine::scale(0.0)).is_none());
        assert!(invert(Affine::scale_non_uniform(1.0, 0.0)).is_none());
        assert!(invert(Affine::scale(f64::NAN)).is_none());
        let tf = Affine::translate(Vec2::new(5.0, -3.0)) * Affine::scale(2.0);
        let inv = invert(tf).expect("invertible");
        let p = inv * (tf * Point::new(1.0, 2.0));
        assert!((p.x - 1.0).abs() < 1e-12 && (p.y - 2.0).abs() < 1e-12);
    }
}
