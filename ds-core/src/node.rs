//! # Node 模块
//!
//! 节点标识与路径记录。
//!
//! 每个数据结构实例为自己创建的节点分配唯一的 [`NodeId`]，
//! 动画层只通过 ID 追踪节点，不持有节点本身。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点 ID
///
/// 同一个数据结构实例内唯一，且不会被复用（`clear` 之后也不会）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 被访问节点的快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    /// 节点 ID
    pub id: NodeId,
    /// 访问时节点的值
    pub value: i32,
}

impl NodeRef {
    pub fn new(id: NodeId, value: i32) -> Self {
        Self { id, value }
    }
}

/// 访问路径（按访问顺序）
pub type Path = Vec<NodeRef>;

/// 节点 ID 分配器
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 分配下一个 ID
    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// 二叉树形状的只读视图
///
/// 布局算法只依赖这个 trait，BST、AVL 以及按下标组织的堆共用同一套布局。
pub trait TreeView: Sized {
    /// 当前节点
    fn node(&self) -> NodeRef;
    /// 左孩子
    fn left(&self) -> Option<Self>;
    /// 右孩子
    fn right(&self) -> Option<Self>;

    /// 前序遍历收集所有节点
    fn preorder(&self) -> Vec<NodeRef> {
        let mut out = Vec::new();
        collect_preorder(self, &mut out);
        out
    }

    /// 收集所有父子边（父 -> 子），前序
    fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut out = Vec::new();
        collect_edges(self, &mut out);
        out
    }
}

fn collect_preorder<T: TreeView>(view: &T, out: &mut Vec<NodeRef>) {
    out.push(view.node());
    if let Some(left) = view.left() {
        collect_preorder(&left, out);
    }
    if let Some(right) = view.right() {
        collect_preorder(&right, out);
    }
}

fn collect_edges<T: TreeView>(view: &T, out: &mut Vec<(NodeId, NodeId)>) {
    let parent = view.node().id;
    if let Some(left) = view.left() {
        out.push((parent, left.node().id));
        collect_edges(&left, out);
    }
    if let Some(right) = view.right() {
        out.push((parent, right.node().id));
        collect_edges(&right, out);
    }
}

/// 把值列表格式化为 `[ a, b, c ]`，空列表为 `[ Empty ]`
pub(crate) fn format_values<I>(values: I, separator: &str) -> String
where
    I: IntoIterator<Item = i32>,
{
    let items: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
    if items.is_empty() {
        "[ Empty ]".to_string()
    } else {
        format!("[ {} ]", items.join(separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(), NodeId(0));
        assert_eq!(ids.allocate(), NodeId(1));
        assert_eq!(ids.allocate(), NodeId(2));
    }

    #[test]
    fn test_format_values() {
        assert_eq!(format_values(Vec::new(), ", "), "[ Empty ]");
        assert_eq!(format_values(vec![1, 2, 3], ", "), "[ 1, 2, 3 ]");
        assert_eq!(format_values(vec![4, 5], " -> "), "[ 4 -> 5 ]");
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(7).to_string(), "#7");
    }
}
