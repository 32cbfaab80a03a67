use serde_json::json;

use hierseg::{PersistError, RawRegion, SegTree};

fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
}

fn region(level: i32, boundary: Vec<(i32, i32)>) -> RawRegion {
    RawRegion {
        contrast_level: level,
        boundary,
    }
}

fn sample_tree() -> SegTree {
    SegTree::build(&[
        region(5, rect(0, 0, 100, 100)),
        region(3, rect(10, 10, 40, 40)),
        region(3, rect(60, 60, 90, 90)),
        region(1, rect(15, 15, 25, 25)),
    ])
    .expect("build")
}

#[test]
fn records_round_trip_preserves_the_tree() {
    let tree = sample_tree();
    let records = tree.to_records();
    let restored = SegTree::from_records(&records).expect("restore");

    assert_eq!(restored.len(), tree.len());
    assert_eq!(restored.contrast_levels(), tree.contrast_levels());

    let (a, b) = (tree.node(tree.root()).unwrap(), restored.node(restored.root()).unwrap());
    assert_eq!(a.children.len(), b.children.len());
    assert_eq!(a.contrast_level, b.contrast_level);
    assert_eq!(a.boundary(), b.boundary());
}

#[test]
fn restored_tree_supports_selection() {
    let records = sample_tree().to_records();
    let mut restored = SegTree::from_records(&records).expect("restore");
    restored.toggle_at_level((20.0, 20.0), 3);
    assert!(restored.selected_contains((20.0, 20.0)));
}

#[test]
fn empty_record_list_is_rejected() {
    assert!(matches!(
        SegTree::from_records(&json!([])),
        Err(PersistError::Empty)
    ));
}

#[test]
fn non_array_value_is_rejected() {
    assert!(matches!(
        SegTree::from_records(&json!("nope")),
        Err(PersistError::BadLevelList)
    ));
}

#[test]
fn malformed_level_list_is_rejected() {
    let value = json!([{"polygon": [], "children": 0, "contrast_level": 1}]);
    assert!(matches!(
        SegTree::from_records(&value),
        Err(PersistError::BadLevelList)
    ));
}

#[test]
fn missing_children_records_are_rejected() {
    let value = json!([
        [3, 1],
        {
            "polygon": [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]],
            "children": 2,
            "contrast_level": 3
        },
        {
            "polygon": [[1.0, 1.0], [4.0, 1.0], [4.0, 4.0], [1.0, 4.0]],
            "children": 0,
            "contrast_level": 1
        }
    ]);
    assert!(matches!(
        SegTree::from_records(&value),
        Err(PersistError::Truncated)
    ));
}

#[test]
fn malformed_node_record_reports_its_index() {
    let value = json!([[2], {"children": 0}]);
    assert!(matches!(
        SegTree::from_records(&value),
        Err(PersistError::BadNodeRecord(1))
    ));
}
