//! Read-only lookups from coded values to labels.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use dispatch_core::{Entity, RecordId};

use crate::order::OrderSummary;

/// One flat dictionary row (`sysDictType/dataList` and the `pcUser` lists).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictEntry {
    pub id: RecordId,
    #[serde(default)]
    pub dict_type_id: Option<i64>,
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub order_no: i64,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub remark: Option<String>,
}

impl DictEntry {
    /// Numeric key used when orders reference this entry.
    pub fn key(&self) -> i64 {
        self.value.trim().parse().unwrap_or(self.id.get())
    }
}

impl Entity for DictEntry {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Order entries the way the portal lists them.
pub fn sort_entries(entries: &mut [DictEntry]) {
    entries.sort_by_key(|e| (e.order_no, e.id));
}

/// Which flat list to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DictKind {
    /// `sysDictType/dataList?code=`
    System { code: String },
    DesignerTypes,
    Software,
    Platforms,
    ProductTypes,
    /// `pcUser/designTypeList?type=`
    DesignTypes { kind: String },
}

/// Node of the order-type tree from `dicData/orderTypes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTypeNode {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub sort: Option<i64>,
    #[serde(default)]
    pub is_case_show: Option<i64>,
    #[serde(default)]
    pub refer_amount: Option<f64>,
    #[serde(default)]
    pub refer_content: Option<String>,
    #[serde(default)]
    pub is_state: Option<i64>,
    #[serde(default, deserialize_with = "children_or_empty")]
    pub childrens: Vec<OrderTypeNode>,
}

fn children_or_empty<'de, D>(deserializer: D) -> Result<Vec<OrderTypeNode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<OrderTypeNode>>::deserialize(deserializer)?.unwrap_or_default())
}

impl OrderTypeNode {
    /// Pre-order walk of this node and its descendants.
    pub fn walk(&self) -> Vec<&OrderTypeNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.childrens.iter().rev());
        }
        out
    }

    pub fn is_leaf(&self) -> bool {
        self.childrens.is_empty()
    }
}

/// Query string of `dicData/orderTypes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTypeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hide: Option<bool>,
}

/// Label index over the order-type tree and the platform list.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    order_types: HashMap<i64, String>,
    platforms: HashMap<i64, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every node of `roots`. When an id repeats, the first node in
    /// depth-first order keeps its label.
    pub fn with_order_types(mut self, roots: &[OrderTypeNode]) -> Self {
        for node in roots.iter().flat_map(OrderTypeNode::walk) {
            self.order_types
                .entry(node.id)
                .or_insert_with(|| node.name.clone());
        }
        self
    }

    pub fn with_platforms(mut self, entries: &[DictEntry]) -> Self {
        for entry in entries {
            self.platforms
                .entry(entry.key())
                .or_insert_with(|| entry.label.clone());
        }
        self
    }

    pub fn order_type_label(&self, id: i64) -> Option<&str> {
        self.order_types.get(&id).map(String::as_str)
    }

    pub fn platform_label(&self, id: i64) -> Option<&str> {
        self.platforms.get(&id).map(String::as_str)
    }

    /// Fill in order-type and platform names the server left empty.
    ///
    /// Returns `true` when a name was filled.
    pub fn decorate(&self, order: &mut OrderSummary) -> bool {
        let mut changed = fill(
            &mut order.order_type_name,
            order.order_type_id.and_then(|id| self.order_type_label(id)),
        );
        changed |= fill(
            &mut order.plat_type_name,
            order.plat_type_id.and_then(|id| self.platform_label(id)),
        );
        changed
    }
}

fn fill(slot: &mut Option<String>, label: Option<&str>) -> bool {
    let empty = slot.as_deref().is_none_or(|s| s.trim().is_empty());
    match label {
        Some(label) if empty => {
            *slot = Some(label.to_string());
            true
        }
        _ => false,
    }
}
