use geo::{Area, Contains};
use hierseg::model::SYNTHETIC_ROOT_LEVEL;
use hierseg::{RawRegion, SegTree};

fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
}

fn region(level: i32, boundary: Vec<(i32, i32)>) -> RawRegion {
    RawRegion {
        contrast_level: level,
        boundary,
    }
}

fn nested_regions() -> Vec<RawRegion> {
    vec![
        region(5, rect(0, 0, 100, 100)),
        region(3, rect(10, 10, 40, 40)),
        region(3, rect(60, 60, 90, 90)),
        region(1, rect(15, 15, 25, 25)),
    ]
}

#[test]
fn nested_squares_build_the_expected_hierarchy() {
    let tree = SegTree::build(&nested_regions()).expect("build");
    assert_eq!(tree.len(), 4);

    let root = tree.node(tree.root()).unwrap();
    assert_eq!(root.contrast_level, 5);
    assert_eq!(root.children.len(), 2, "both mid squares hang off the root");

    let leaf_parents: Vec<usize> = (0..tree.len() as u32)
        .filter(|&id| {
            tree.node(id)
                .unwrap()
                .children
                .iter()
                .any(|&c| tree.node(c).unwrap().contrast_level == 1)
        })
        .map(|id| id as usize)
        .collect();
    assert_eq!(leaf_parents.len(), 1, "the leaf has exactly one parent");
    assert_eq!(
        tree.node(leaf_parents[0] as u32).unwrap().contrast_level,
        3,
        "the leaf hangs off the mid square that contains it"
    );
}

#[test]
fn every_child_lies_inside_its_parent() {
    let tree = SegTree::build(&nested_regions()).expect("build");
    for id in 0..tree.len() as u32 {
        let parent = tree.node(id).unwrap();
        for &child in &parent.children {
            let child = tree.node(child).unwrap();
            assert!(
                parent.polygon.contains(&child.polygon),
                "child escaped its parent"
            );
        }
    }
}

#[test]
fn disjoint_roots_get_a_synthetic_hull_root() {
    let regions = vec![
        region(2, rect(0, 0, 30, 30)),
        region(2, rect(70, 0, 100, 30)),
    ];
    let tree = SegTree::build(&regions).expect("build");
    assert_eq!(tree.len(), 3);

    let root = tree.node(tree.root()).unwrap();
    assert_eq!(root.contrast_level, SYNTHETIC_ROOT_LEVEL);
    assert_eq!(root.children.len(), 2);
    for &child in &root.children {
        let child = tree.node(child).unwrap();
        assert!(root.polygon.contains(&child.polygon));
    }
    // The hull spans the gap between the two squares.
    assert!(root.polygon.unsigned_area() > 2.0 * 900.0);
}

#[test]
fn unsorted_input_is_reordered_before_linking() {
    let mut regions = nested_regions();
    regions.reverse(); // smallest first
    let tree = SegTree::build(&regions).expect("build");
    assert_eq!(tree.len(), 4);
    let root = tree.node(tree.root()).unwrap();
    assert_eq!(root.contrast_level, 5);
    assert_eq!(root.children.len(), 2);
}

#[test]
fn contrast_levels_are_sorted_descending() {
    let tree = SegTree::build(&nested_regions()).expect("build");
    assert_eq!(tree.contrast_levels(), &[5, 3, 1]);
}
