//! Axis-aligned collision helpers
//!
//! Everything in the round is either a point (worm segments), a circle
//! (pickup radius) or an axis-aligned box (tiles, targets). Boxes are given
//! as top-left corner plus dimensions and include their edges.

use glam::Vec2;

/// Point inside a box, edges included
#[inline]
pub fn point_in_box(point: Vec2, top_left: Vec2, dims: Vec2) -> bool {
    let bottom_right = top_left + dims;
    point.x >= top_left.x
        && point.x <= bottom_right.x
        && point.y >= top_left.y
        && point.y <= bottom_right.y
}

/// Point within `radius` of `center`, boundary included
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}

/// The four corners of a box: top-left, top-right, bottom-left, bottom-right
#[inline]
pub fn box_corners(top_left: Vec2, dims: Vec2) -> [Vec2; 4] {
    [
        top_left,
        Vec2::new(top_left.x + dims.x, top_left.y),
        Vec2::new(top_left.x, top_left.y + dims.y),
        top_left + dims,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_box_includes_edges() {
        let origin = Vec2::new(32.0, 32.0);
        let dims = Vec2::splat(32.0);

        assert!(point_in_box(Vec2::new(48.0, 48.0), origin, dims));
        assert!(point_in_box(Vec2::new(32.0, 64.0), origin, dims));
        assert!(!point_in_box(Vec2::new(31.9, 48.0), origin, dims));
        assert!(!point_in_box(Vec2::new(48.0, 64.1), origin, dims));
    }

    #[test]
    fn test_point_in_circle() {
        let center = Vec2::new(10.0, 10.0);
        assert!(point_in_circle(Vec2::new(13.0, 14.0), center, 5.0));
        assert!(!point_in_circle(Vec2::new(14.0, 14.0), center, 5.0));
    }

    #[test]
    fn test_box_corners() {
        let corners = box_corners(Vec2::new(1.0, 2.0), Vec2::new(10.0, 20.0));
        assert_eq!(corners[0], Vec2::new(1.0, 2.0));
        assert_eq!(corners[1], Vec2::new(11.0, 2.0));
        assert_eq!(corners[2], Vec2::new(1.0, 22.0));
        assert_eq!(corners[3], Vec2::new(11.0, 22.0));
    }
}
