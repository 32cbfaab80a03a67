use hierseg::{BuildError, RawRegion, SegTree};

fn region(level: i32, boundary: Vec<(i32, i32)>) -> RawRegion {
    RawRegion {
        contrast_level: level,
        boundary,
    }
}

#[test]
fn empty_input_is_a_build_error() {
    assert!(matches!(
        SegTree::build(&[]),
        Err(BuildError::NoUsableRegions)
    ));
}

#[test]
fn only_undersized_regions_is_a_build_error() {
    let regions = vec![
        region(3, vec![(0, 0)]),
        region(2, vec![(0, 0), (10, 10)]),
        region(1, vec![]),
    ];
    assert!(matches!(
        SegTree::build(&regions),
        Err(BuildError::NoUsableRegions)
    ));
}

#[test]
fn discarded_regions_still_contribute_their_level() {
    let regions = vec![
        region(4, vec![(0, 0), (100, 0), (100, 100), (0, 100)]),
        region(2, vec![(5, 5), (6, 6)]), // too small, level still recorded
    ];
    let tree = SegTree::build(&regions).expect("build");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.contrast_levels(), &[4, 2]);
}

#[test]
fn self_intersecting_boundary_is_repaired() {
    // Bowtie loop plus a container so the repaired parts have a parent.
    let regions = vec![
        region(5, vec![(-10, -10), (30, -10), (30, 30), (-10, 30)]),
        region(2, vec![(0, 0), (20, 20), (20, 0), (0, 20)]),
    ];
    let tree = SegTree::build(&regions).expect("build");
    assert!(tree.len() >= 2, "repair must keep usable geometry");
    for id in 0..tree.len() as u32 {
        assert!(
            tree.node(id).unwrap().boundary().len() >= 3,
            "no node may carry a degenerate boundary"
        );
    }
}
