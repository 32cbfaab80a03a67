//! Flat JSON persistence for the containment tree.
//!
//! The exported value is an array: record 0 is the sorted contrast-level
//! list, the remaining records are the tree nodes in pre-order. A node
//! record carries its child count, so the pre-order positions alone
//! reconstruct the hierarchy.

use serde_json::Value;

use crate::error::PersistError;
use crate::model::{NodeId, NodeRecord};
use crate::SegTree;

pub fn to_records_impl(tree: &SegTree) -> Value {
    let mut records: Vec<Value> = vec![Value::from(tree.levels.clone())];
    push_node(tree, tree.root, &mut records);
    Value::Array(records)
}

fn push_node(tree: &SegTree, id: NodeId, records: &mut Vec<Value>) {
    let node = &tree.nodes[id as usize];
    let record = NodeRecord {
        polygon: node.boundary(),
        children: node.children.len(),
        contrast_level: node.contrast_level,
    };
    // NodeRecord carries no collections that fail to serialize.
    records.push(serde_json::to_value(record).unwrap_or(Value::Null));
    for &child in &node.children {
        push_node(tree, child, records);
    }
}

pub fn from_records_impl(value: &Value) -> Result<SegTree, PersistError> {
    let records = match value {
        Value::Array(records) if !records.is_empty() => records,
        Value::Array(_) => return Err(PersistError::Empty),
        _ => return Err(PersistError::BadLevelList),
    };
    let levels: Vec<i32> =
        serde_json::from_value(records[0].clone()).map_err(|_| PersistError::BadLevelList)?;

    let mut nodes = Vec::with_capacity(records.len() - 1);
    let mut cursor = 1usize;
    let root = read_node(records, &mut cursor, &mut nodes)?;
    Ok(SegTree { nodes, root, levels })
}

fn read_node(
    records: &[Value],
    cursor: &mut usize,
    nodes: &mut Vec<crate::model::SegNode>,
) -> Result<NodeId, PersistError> {
    let index = *cursor;
    let value = records.get(index).ok_or(PersistError::Truncated)?;
    let record: NodeRecord =
        serde_json::from_value(value.clone()).map_err(|_| PersistError::BadNodeRecord(index))?;
    *cursor += 1;

    let id = nodes.len() as NodeId;
    nodes.push(record.to_node());
    for _ in 0..record.children {
        let child = read_node(records, cursor, nodes)?;
        nodes[id as usize].children.push(child);
    }
    Ok(id)
}
