//! Conversions between plain coordinate lists and `geo` types.

use geo::{Coord, LineString, Polygon};

/// Build a closed exterior ring from an open vertex list.
pub fn ring_from_coords(pts: &[(f64, f64)]) -> LineString<f64> {
    let mut ring: Vec<Coord<f64>> = pts.iter().map(|&(x, y)| Coord { x, y }).collect();
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last()) {
        if *last != first {
            ring.push(first);
        }
    }
    LineString::new(ring)
}

/// Hole-free polygon from an open vertex list.
pub fn polygon_from_coords(pts: &[(f64, f64)]) -> Polygon<f64> {
    Polygon::new(ring_from_coords(pts), vec![])
}

/// Hole-free polygon from integer pixel coordinates.
pub fn polygon_from_pixels(pts: &[(i32, i32)]) -> Polygon<f64> {
    let coords: Vec<(f64, f64)> = pts.iter().map(|&(x, y)| (x as f64, y as f64)).collect();
    polygon_from_coords(&coords)
}

/// Exterior vertices of a polygon, without the closing duplicate.
pub fn exterior_coords(poly: &Polygon<f64>) -> Vec<(f64, f64)> {
    let ring = &poly.exterior().0;
    let n = ring.len();
    let take = if n > 1 && ring[0] == ring[n - 1] { n - 1 } else { n };
    ring[..take].iter().map(|c| (c.x, c.y)).collect()
}
