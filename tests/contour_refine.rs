use geo::{Area, Polygon};
use hierseg::algorithms::refine::refine_band;
use hierseg::geometry::convert::{exterior_coords, polygon_from_coords, polygon_from_pixels};
use hierseg::geometry::ops::widen_stroke;
use hierseg::{SelectionUnion, SliceRaster};

fn flat_raster(width: u32, height: u32, value: u8) -> Vec<u8> {
    vec![value; width as usize * height as usize * 3]
}

fn horizontal_band() -> Polygon<f64> {
    widen_stroke(&[(20.0, 20.0), (35.0, 20.0)], 5.0).expect("band")
}

#[test]
fn flat_image_leaves_the_band_in_place() {
    let data = flat_raster(60, 40, 128);
    let raster = SliceRaster::new(60, 40, &data).unwrap();
    let band = horizontal_band();
    let refined = refine_band(&band, &raster, 4.0, &SelectionUnion::new()).expect("refined");

    // No contrast anywhere, so every vertex keeps its starting position.
    let band_area = band.unsigned_area();
    let refined_area: f64 = refined.0.iter().map(|p| p.unsigned_area()).sum();
    assert!((refined_area - band_area).abs() < band_area * 0.2);
}

#[test]
fn band_inside_the_selection_snaps_onto_it() {
    let data = flat_raster(60, 40, 0);
    let raster = SliceRaster::new(60, 40, &data).unwrap();
    let mut selection = SelectionUnion::new();
    selection.apply_stroke(
        &polygon_from_pixels(&[(5, 5), (55, 5), (55, 35), (5, 35)]),
        true,
    );

    let band = horizontal_band();
    let refined = refine_band(&band, &raster, 4.0, &selection).expect("refined");
    assert!(!refined.0.is_empty());
    for poly in &refined.0 {
        for pos in exterior_coords(poly) {
            assert!(
                selection.contains_point(pos),
                "early-accepted vertices stay inside the selection"
            );
        }
    }
}

#[test]
fn degenerate_band_refines_to_nothing() {
    let data = flat_raster(10, 10, 0);
    let raster = SliceRaster::new(10, 10, &data).unwrap();
    let line = polygon_from_coords(&[(2.0, 2.0), (7.0, 2.0)]);
    assert!(refine_band(&line, &raster, 3.0, &SelectionUnion::new()).is_none());
}

#[test]
fn empty_raster_refines_to_nothing() {
    let raster = SliceRaster::new(0, 0, &[]).unwrap();
    let band = horizontal_band();
    assert!(refine_band(&band, &raster, 4.0, &SelectionUnion::new()).is_none());
}

#[test]
fn zero_radius_march_keeps_every_vertex() {
    let data = flat_raster(60, 40, 50);
    let raster = SliceRaster::new(60, 40, &data).unwrap();
    let band = horizontal_band();
    let refined = refine_band(&band, &raster, 0.0, &SelectionUnion::new()).expect("refined");
    let band_area = band.unsigned_area();
    let refined_area: f64 = refined.0.iter().map(|p| p.unsigned_area()).sum();
    assert!((refined_area - band_area).abs() < band_area * 0.2);
}
