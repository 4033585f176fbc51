//! Geometry primitives and the pure placement math.
//!
//! Coordinates are global desktop pixels, `i32` as reported by the host.

/// A point in global desktop coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

/// An axis-aligned rectangle: a monitor's region or a window's frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width; may be 0 or transiently invalid right after window creation.
    pub w: i32,
    /// Height; same caveat as `w`.
    pub h: i32,
}

impl Rect {
    /// Construct a rectangle from origin and size.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// True when both dimensions are positive.
    pub const fn has_size(&self) -> bool {
        self.w > 0 && self.h > 0
    }
}

/// Half-open containment: `x <= px < x+w`, same for y.
#[inline]
pub fn point_in_rect(px: i32, py: i32, r: &Rect) -> bool {
    px >= r.x && px < r.x + r.w && py >= r.y && py < r.y + r.h
}

/// Origin that centers `frame` within `region`.
///
/// Floor division, so an odd slack lands one pixel toward the region origin.
/// A frame larger than the region yields a negative offset; centering never
/// clamps.
#[inline]
pub fn centered_origin(frame: &Rect, region: &Rect) -> Point {
    Point {
        x: region.x + (region.w - frame.w).div_euclid(2),
        y: region.y + (region.h - frame.h).div_euclid(2),
    }
}

/// Origin that preserves `frame`'s offset from `source`'s origin relative to
/// `target`'s origin, clamped per axis so the frame stays inside `target`.
///
/// When the frame exceeds the target on an axis the clamp collapses to the
/// target origin on that axis.
#[inline]
pub fn relative_reposition(frame: &Rect, source: &Rect, target: &Rect) -> Point {
    Point {
        x: clamp_axis(target.x + (frame.x - source.x), target.x, target.w, frame.w),
        y: clamp_axis(target.y + (frame.y - source.y), target.y, target.h, frame.h),
    }
}

#[inline]
fn clamp_axis(desired: i32, origin: i32, region_size: i32, frame_size: i32) -> i32 {
    let max = origin + (region_size - frame_size).max(0);
    desired.clamp(origin, max)
}

/// True when `frame`'s origin is within `tolerance` of `target` on both axes.
///
/// The host rounds positions during placement, so "already there" is a
/// tolerance check, not equality.
#[inline]
pub fn approx_at(frame: &Rect, target: Point, tolerance: i32) -> bool {
    (frame.x - target.x).abs() <= tolerance && (frame.y - target.y).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_half_open() {
        let r = Rect::new(100, 50, 800, 600);
        assert!(point_in_rect(100, 50, &r));
        assert!(point_in_rect(899, 649, &r));
        assert!(!point_in_rect(900, 50, &r));
        assert!(!point_in_rect(100, 650, &r));
        assert!(!point_in_rect(99, 50, &r));
    }

    #[test]
    fn centering_floors_odd_slack() {
        let region = Rect::new(0, 0, 1920, 1080);
        let frame = Rect::new(0, 0, 401, 301);
        let p = centered_origin(&frame, &region);
        assert_eq!((p.x, p.y), (759, 389));
    }

    #[test]
    fn centering_is_idempotent() {
        let region = Rect::new(1920, 0, 1920, 1080);
        let frame = Rect::new(50, 50, 400, 300);
        let p = centered_origin(&frame, &region);
        let moved = Rect::new(p.x, p.y, frame.w, frame.h);
        assert_eq!(centered_origin(&moved, &region), p);
    }

    #[test]
    fn centering_oversized_frame_goes_negative() {
        let region = Rect::new(0, 0, 1280, 720);
        let frame = Rect::new(0, 0, 1400, 800);
        let p = centered_origin(&frame, &region);
        assert_eq!((p.x, p.y), (-60, -40));
    }

    #[test]
    fn relative_reposition_is_pure_translation_between_equal_regions() {
        let source = Rect::new(0, 0, 1920, 1080);
        let target = Rect::new(1920, 0, 1920, 1080);
        let frame = Rect::new(50, 50, 800, 600);
        let p = relative_reposition(&frame, &source, &target);
        assert_eq!((p.x, p.y), (1970, 50));
    }

    #[test]
    fn relative_reposition_clamps_to_smaller_target() {
        let source = Rect::new(0, 0, 2560, 1440);
        let target = Rect::new(2560, 0, 1280, 720);
        // Near the bottom-right of the large monitor; must not hang off the
        // small one.
        let frame = Rect::new(2000, 1100, 500, 300);
        let p = relative_reposition(&frame, &source, &target);
        assert_eq!((p.x, p.y), (2560 + 1280 - 500, 720 - 300));
    }

    #[test]
    fn relative_reposition_collapses_to_origin_when_frame_too_big() {
        let source = Rect::new(0, 0, 1920, 1080);
        let target = Rect::new(1920, 0, 1280, 720);
        let frame = Rect::new(100, 100, 1500, 900);
        let p = relative_reposition(&frame, &source, &target);
        assert_eq!((p.x, p.y), (1920, 0));
    }

    #[test]
    fn relative_reposition_never_escapes_fitting_axis() {
        let source = Rect::new(0, 0, 1920, 1080);
        let target = Rect::new(-1920, 0, 1920, 1080);
        for fx in [-500, 0, 300, 1700, 2500] {
            let frame = Rect::new(fx, 200, 400, 300);
            let p = relative_reposition(&frame, &source, &target);
            assert!(p.x >= target.x);
            assert!(p.x + frame.w <= target.x + target.w);
        }
    }

    #[test]
    fn approx_at_uses_inclusive_tolerance() {
        let frame = Rect::new(760, 390, 400, 300);
        assert!(approx_at(&frame, Point { x: 761, y: 389 }, 1));
        assert!(!approx_at(&frame, Point { x: 762, y: 390 }, 1));
    }
}
