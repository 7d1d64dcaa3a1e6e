//! Axis-aligned bounding box algebra.
//!
//! Boxes arrive from detectors in several conventions. Every [`BoundingBox`]
//! stores its corners in one canonical form, bottom-left origin `xyxy`
//! (`x_min, y_min, x_max, y_max`), and remembers the convention it was
//! declared in so derived boxes are handed back the way the caller expects.
//!
//! In a top-left convention the anchor point is the box's top-left corner on
//! a y-up plane: `XYXY_TL` is `(left, top, right, bottom)` and `XYWH_TL` is
//! `(left, top, width, height)`.

use std::fmt;
use std::str::FromStr;

use image::DynamicImage;

use crate::error::GeometryError;

/// How the four numbers of a box are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Two corners: `(x1, y1, x2, y2)`
    Xyxy,
    /// Anchor corner plus size: `(x, y, w, h)`
    Xywh,
}

/// Which corner the anchor coordinates refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    BottomLeft,
    TopLeft,
}

/// A box coordinate convention: layout scheme plus vertical origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxType {
    pub scheme: Scheme,
    pub origin: Origin,
}

impl BoxType {
    pub const XYXY_BL: BoxType = BoxType::new(Scheme::Xyxy, Origin::BottomLeft);
    pub const XYXY_TL: BoxType = BoxType::new(Scheme::Xyxy, Origin::TopLeft);
    pub const XYWH_BL: BoxType = BoxType::new(Scheme::Xywh, Origin::BottomLeft);
    pub const XYWH_TL: BoxType = BoxType::new(Scheme::Xywh, Origin::TopLeft);

    pub const fn new(scheme: Scheme, origin: Origin) -> Self {
        Self { scheme, origin }
    }

    pub fn is_xyxy(&self) -> bool {
        self.scheme == Scheme::Xyxy
    }

    pub fn is_xywh(&self) -> bool {
        self.scheme == Scheme::Xywh
    }

    pub fn is_tl(&self) -> bool {
        self.origin == Origin::TopLeft
    }

    pub fn is_bl(&self) -> bool {
        self.origin == Origin::BottomLeft
    }
}

impl Default for BoxType {
    fn default() -> Self {
        Self::XYXY_BL
    }
}

impl FromStr for BoxType {
    type Err = String;

    /// Parse names like `xyxy`, `xyxy-tl`, `xywh_bl` (case-insensitive).
    /// The origin defaults to bottom-left when omitted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        let (scheme, origin) = match normalized.split_once('-') {
            Some((scheme, origin)) => (scheme, origin),
            None => (normalized.as_str(), "bl"),
        };
        let scheme = match scheme {
            "xyxy" => Scheme::Xyxy,
            "xywh" => Scheme::Xywh,
            other => return Err(format!("unknown box scheme '{other}'")),
        };
        let origin = match origin {
            "bl" => Origin::BottomLeft,
            "tl" => Origin::TopLeft,
            other => return Err(format!("unknown box origin '{other}'")),
        };
        Ok(Self::new(scheme, origin))
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    x: f64,
    y: f64,
    xmax: f64,
    ymax: f64,
    box_type: BoxType,
}

impl BoundingBox {
    /// Build a box from four numbers laid out per `box_type`.
    pub fn new(points: [f64; 4], box_type: BoxType) -> Self {
        let [x, y, xmax, ymax] = normalize_points(points, box_type);
        Self {
            x,
            y,
            xmax,
            ymax,
            box_type,
        }
    }

    /// Build a box from a slice, rejecting anything but exactly four values.
    pub fn from_slice(points: &[f64], box_type: BoxType) -> Result<Self, GeometryError> {
        let points: [f64; 4] = points
            .try_into()
            .map_err(|_| GeometryError::PointCount(points.len()))?;
        Ok(Self::new(points, box_type))
    }

    /// Canonical bottom-left corners, used for all arithmetic.
    fn canonical(x: f64, y: f64, xmax: f64, ymax: f64) -> Self {
        Self::new([x, y, xmax, ymax], BoxType::XYXY_BL)
    }

    pub fn box_type(&self) -> BoxType {
        self.box_type
    }

    /// The four numbers in the box's declared convention.
    pub fn points(&self) -> [f64; 4] {
        self.points_as(self.box_type)
    }

    /// The four numbers in an arbitrary convention.
    pub fn points_as(&self, box_type: BoxType) -> [f64; 4] {
        let (w, h) = self.dimensions();
        match (box_type.scheme, box_type.origin) {
            (Scheme::Xyxy, Origin::BottomLeft) => [self.x, self.y, self.xmax, self.ymax],
            (Scheme::Xywh, Origin::BottomLeft) => [self.x, self.y, w, h],
            (Scheme::Xyxy, Origin::TopLeft) => [self.x, self.ymax, self.xmax, self.y],
            (Scheme::Xywh, Origin::TopLeft) => [self.x, self.ymax, w, h],
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// Corner coordinates as a flat `[x1, y1, x2, y1, x2, y2, x1, y2]`.
    pub fn polygon(&self) -> [f64; 8] {
        [
            self.x, self.y, self.xmax, self.y, self.xmax, self.ymax, self.x, self.ymax,
        ]
    }

    /// Closed vertex loop: the four corners with the first repeated.
    pub fn vertices(&self) -> [(f64, f64); 5] {
        [
            (self.x, self.y),
            (self.xmax, self.y),
            (self.xmax, self.ymax),
            (self.x, self.ymax),
            (self.x, self.y),
        ]
    }

    pub fn width(&self) -> f64 {
        (self.xmax - self.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.ymax - self.y).abs()
    }

    pub fn dimensions(&self) -> (f64, f64) {
        (self.width(), self.height())
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True when the boxes overlap with nonzero area. Touching edges do not count.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        (self.xmax > other.x && other.xmax > self.x)
            && (self.ymax > other.y && other.ymax > self.y)
    }

    /// True when `other` lies fully inside this box (boundary inclusive).
    pub fn contains(&self, other: &BoundingBox) -> bool {
        (self.x <= other.x && self.y <= other.y)
            && (self.xmax >= other.xmax && self.ymax >= other.ymax)
    }

    /// Exact coordinate equality, regardless of declared convention.
    pub fn equals(&self, other: &BoundingBox) -> bool {
        (self.x == other.x && self.y == other.y)
            && (self.xmax == other.xmax && self.ymax == other.ymax)
    }

    /// Cut the box's region out of an image.
    ///
    /// Coordinates are truncated to integers and clamped at zero; the far
    /// edges are clamped to the image bounds.
    pub fn crop(&self, image: &DynamicImage) -> DynamicImage {
        let clamp = |v: f64| (v.trunc() as i64).max(0) as u32;
        let (x1, y1) = (clamp(self.x), clamp(self.y));
        let (x2, y2) = (clamp(self.xmax), clamp(self.ymax));
        image.crop_imm(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
    }

    /// Re-express the same rectangle in another convention.
    pub fn convert(&self, to_type: BoxType) -> BoundingBox {
        BoundingBox::new(self.points_as(to_type), to_type)
    }

    /// Grow or shrink the box around its own center.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is not strictly positive.
    pub fn scale(&self, factor: f64) -> BoundingBox {
        assert!(factor > 0.0, "scale factor must be > 0, got {factor}");

        let dx = (factor * self.width() - self.width()) / 2.0;
        let dy = (factor * self.height() - self.height()) / 2.0;
        Self::canonical(self.x - dx, self.y - dy, self.xmax + dx, self.ymax + dy)
            .convert(self.box_type)
    }

    /// Translate by whole multiples of the box size, e.g. `tile(1.0, 0.0)`
    /// is the right-hand neighbour in a grid of equal boxes.
    pub fn tile(&self, dx: f64, dy: f64) -> BoundingBox {
        let (w, h) = self.dimensions();
        let (ox, oy) = (dx * w, dy * h);
        Self::canonical(self.x + ox, self.y + oy, self.xmax + ox, self.ymax + oy)
            .convert(self.box_type)
    }

    /// The overlapping region, or `None` when the boxes do not intersect.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }

        let merged = Self::canonical(
            self.x.max(other.x),
            self.y.max(other.y),
            self.xmax.min(other.xmax),
            self.ymax.min(other.ymax),
        );
        Some(merged.convert(self.box_type))
    }

    /// The bounding rectangle of two **overlapping** boxes.
    ///
    /// Unlike a general bounding union, this returns `None` whenever the
    /// boxes do not intersect. Detection merging relies on that: only
    /// overlapping detections are ever combined into one.
    pub fn union(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }

        let merged = Self::canonical(
            self.x.min(other.x),
            self.y.min(other.y),
            self.xmax.max(other.xmax),
            self.ymax.max(other.ymax),
        );
        Some(merged.convert(self.box_type))
    }

    /// Intersection over union; `0.0` for disjoint boxes.
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        match self.intersection(other) {
            Some(inter) => {
                let overlap = inter.area();
                overlap / (self.area() + other.area() - overlap)
            }
            None => 0.0,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {}), ({}, {})]",
            self.x, self.y, self.xmax, self.ymax
        )
    }
}

/// Convert four numbers in `from_type` into canonical bottom-left corners.
fn normalize_points(points: [f64; 4], from_type: BoxType) -> [f64; 4] {
    let [a, b, c, d] = points;
    let (x1, y1, x2, y2) = match (from_type.scheme, from_type.origin) {
        (Scheme::Xyxy, _) => (a, b, c, d),
        (Scheme::Xywh, Origin::BottomLeft) => (a, b, a + c, b + d),
        (Scheme::Xywh, Origin::TopLeft) => (a, b - d, a + c, b),
    };
    [x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)]
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [BoxType; 4] = [
        BoxType::XYXY_BL,
        BoxType::XYXY_TL,
        BoxType::XYWH_BL,
        BoxType::XYWH_TL,
    ];

    fn bl(x: f64, y: f64, xmax: f64, ymax: f64) -> BoundingBox {
        BoundingBox::new([x, y, xmax, ymax], BoxType::XYXY_BL)
    }

    fn assert_points_close(a: [f64; 4], b: [f64; 4]) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_normalize_each_convention() {
        let expected = [2.0, 3.0, 6.0, 8.0];
        assert_points_close(
            BoundingBox::new([2.0, 3.0, 6.0, 8.0], BoxType::XYXY_BL).points_as(BoxType::XYXY_BL),
            expected,
        );
        assert_points_close(
            BoundingBox::new([2.0, 8.0, 6.0, 3.0], BoxType::XYXY_TL).points_as(BoxType::XYXY_BL),
            expected,
        );
        assert_points_close(
            BoundingBox::new([2.0, 3.0, 4.0, 5.0], BoxType::XYWH_BL).points_as(BoxType::XYXY_BL),
            expected,
        );
        assert_points_close(
            BoundingBox::new([2.0, 8.0, 4.0, 5.0], BoxType::XYWH_TL).points_as(BoxType::XYXY_BL),
            expected,
        );
    }

    #[test]
    fn test_from_slice_rejects_wrong_count() {
        assert_eq!(
            BoundingBox::from_slice(&[1.0, 2.0, 3.0], BoxType::XYXY_BL).unwrap_err(),
            GeometryError::PointCount(3)
        );
        assert!(BoundingBox::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0], BoxType::XYXY_BL).is_err());
        assert!(BoundingBox::from_slice(&[1.0, 2.0, 3.0, 4.0], BoxType::XYXY_BL).is_ok());
    }

    #[test]
    fn test_convert_round_trip() {
        let inputs = [
            ([0.0, 0.0, 10.0, 5.0], BoxType::XYXY_BL),
            ([1.5, 9.0, 7.25, 2.0], BoxType::XYXY_TL),
            ([-3.0, 4.0, 2.5, 6.0], BoxType::XYWH_BL),
            ([10.0, 20.0, 30.0, 40.0], BoxType::XYWH_TL),
        ];
        for (points, declared) in inputs {
            let b = BoundingBox::new(points, declared);
            for target in ALL_TYPES {
                let converted = b.convert(target);
                assert!((converted.width() - b.width()).abs() < 1e-9);
                assert!((converted.height() - b.height()).abs() < 1e-9);
                assert_points_close(converted.convert(declared).points(), points);
            }
        }
    }

    #[test]
    fn test_derived_attributes() {
        let b = bl(1.0, 2.0, 4.0, 6.0);
        assert_eq!(b.width(), 3.0);
        assert_eq!(b.height(), 4.0);
        assert_eq!(b.area(), 12.0);
        assert_eq!(b.polygon(), [1.0, 2.0, 4.0, 2.0, 4.0, 6.0, 1.0, 6.0]);
        let v = b.vertices();
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], v[4]);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = bl(0.0, 0.0, 5.0, 5.0);
        let b = bl(5.0, 0.0, 10.0, 5.0);
        assert!(!a.intersects(&b));
        assert!(a.intersection(&b).is_none());
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let outer = bl(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains(&bl(0.0, 0.0, 10.0, 10.0)));
        assert!(outer.contains(&bl(2.0, 2.0, 3.0, 3.0)));
        assert!(!outer.contains(&bl(2.0, 2.0, 11.0, 3.0)));
    }

    #[test]
    fn test_equals_ignores_convention() {
        let a = bl(0.0, 0.0, 4.0, 2.0);
        assert!(a.equals(&a.convert(BoxType::XYWH_TL)));
        assert!(!a.equals(&bl(0.0, 0.0, 4.0, 3.0)));
    }

    #[test]
    fn test_intersection_keeps_receiver_convention() {
        let a = BoundingBox::new([0.0, 0.0, 4.0, 4.0], BoxType::XYWH_BL);
        let b = bl(2.0, 2.0, 6.0, 6.0);
        let inter = a.intersection(&b).unwrap();
        assert_eq!(inter.box_type(), BoxType::XYWH_BL);
        assert_points_close(inter.points(), [2.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_union_only_for_overlapping_boxes() {
        let a = bl(0.0, 0.0, 4.0, 4.0);
        let overlapping = bl(2.0, 2.0, 6.0, 6.0);
        let disjoint = bl(10.0, 10.0, 12.0, 12.0);
        let touching = bl(4.0, 0.0, 8.0, 4.0);

        let u = a.union(&overlapping).unwrap();
        assert_points_close(u.points(), [0.0, 0.0, 6.0, 6.0]);
        assert!(a.union(&disjoint).is_none());
        assert!(a.union(&touching).is_none());

        for other in [overlapping, disjoint, touching] {
            assert_eq!(a.union(&other).is_some(), a.intersects(&other));
        }
    }

    #[test]
    fn test_iou_symmetry_and_identity() {
        let a = bl(0.0, 0.0, 4.0, 4.0);
        let b = bl(2.0, 0.0, 6.0, 4.0);
        assert!((a.iou(&b) - b.iou(&a)).abs() < 1e-12);
        assert!((a.iou(&b) - 8.0 / 24.0).abs() < 1e-12);
        assert_eq!(a.iou(&a), 1.0);
    }

    #[test]
    fn test_scale_around_center() {
        let b = bl(2.0, 2.0, 4.0, 4.0);
        assert_points_close(b.scale(1.0).points(), b.points());
        assert_points_close(b.scale(2.0).points(), [1.0, 1.0, 5.0, 5.0]);
        assert_points_close(b.scale(0.5).points(), [2.5, 2.5, 3.5, 3.5]);
    }

    #[test]
    #[should_panic(expected = "scale factor")]
    fn test_scale_rejects_non_positive_factor() {
        bl(0.0, 0.0, 1.0, 1.0).scale(0.0);
    }

    #[test]
    fn test_tile_translates_by_box_size() {
        let b = BoundingBox::new([0.0, 0.0, 3.0, 2.0], BoxType::XYWH_BL);
        let right = b.tile(1.0, 0.0);
        assert_eq!(right.box_type(), BoxType::XYWH_BL);
        assert_points_close(right.points(), [3.0, 0.0, 3.0, 2.0]);
        let diag = b.tile(-1.0, 1.0);
        assert_points_close(diag.points_as(BoxType::XYXY_BL), [-3.0, 2.0, 0.0, 4.0]);
        assert!(!b.intersects(&right));
    }

    #[test]
    fn test_crop_clamps_and_truncates() {
        let img = DynamicImage::new_rgb8(20, 10);
        let cropped = bl(-5.0, 2.9, 8.7, 6.2).crop(&img);
        assert_eq!(cropped.width(), 8);
        assert_eq!(cropped.height(), 4);

        let overflow = bl(15.0, 5.0, 40.0, 40.0).crop(&img);
        assert_eq!(overflow.width(), 5);
        assert_eq!(overflow.height(), 5);
    }

    #[test]
    fn test_box_type_from_str() {
        assert_eq!("xyxy".parse::<BoxType>().unwrap(), BoxType::XYXY_BL);
        assert_eq!("XYWH_TL".parse::<BoxType>().unwrap(), BoxType::XYWH_TL);
        assert_eq!("xyxy-tl".parse::<BoxType>().unwrap(), BoxType::XYXY_TL);
        assert!("xy".parse::<BoxType>().is_err());
        assert!("xyxy-br".parse::<BoxType>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(bl(0.0, 1.0, 2.0, 3.0).to_string(), "[(0, 1), (2, 3)]");
    }
}
