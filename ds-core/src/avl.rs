//! # AVL 模块
//!
//! 自平衡二叉搜索树。路径记录规则与 [`crate::bst`] 相同，
//! 另外在回溯时更新高度并按需旋转，所有旋转按发生顺序（自底向上）记录。

use std::cmp::Ordering;
use std::fmt;

use crate::node::{IdAllocator, NodeId, NodeRef, Path, TreeView, format_values};
use crate::outcome::{Outcome, Rotation};

/// AVL 节点
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    value: i32,
    /// 子树高度，叶子为 1
    height: i32,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(id: NodeId, value: i32) -> Self {
        Self {
            id,
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// 平衡因子：左子树高度减右子树高度
    pub fn balance(&self) -> i32 {
        height_of(&self.left) - height_of(&self.right)
    }

    fn snapshot(&self) -> NodeRef {
        NodeRef::new(self.id, self.value)
    }

    fn update_height(&mut self) {
        self.height = 1 + height_of(&self.left).max(height_of(&self.right));
    }
}

impl TreeView for &Node {
    fn node(&self) -> NodeRef {
        self.snapshot()
    }

    fn left(&self) -> Option<Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<Self> {
        self.right.as_deref()
    }
}

fn height_of(node: &Option<Box<Node>>) -> i32 {
    node.as_ref().map_or(0, |n| n.height)
}

fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// 一次插入/删除过程中收集的信息
#[derive(Default)]
struct Walk {
    path: Path,
    rotations: Vec<Rotation>,
    inserted: Option<NodeRef>,
    removed: Option<NodeRef>,
    successor: Option<NodeRef>,
}

/// AVL 树
#[derive(Debug, Clone, Default)]
pub struct AvlTree {
    root: Option<Box<Node>>,
    ids: IdAllocator,
    len: usize,
}

impl AvlTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入值，必要时旋转
    pub fn insert(&mut self, value: i32) -> Outcome {
        let mut walk = Walk::default();
        let root = self.root.take();
        self.root = Some(insert_at(root, value, &mut self.ids, &mut walk));

        match walk.inserted {
            Some(node) => {
                self.len += 1;
                Outcome::Inserted {
                    path: walk.path,
                    node,
                    rotations: walk.rotations,
                }
            }
            None => Outcome::Duplicate { path: walk.path },
        }
    }

    /// 删除值，必要时旋转
    ///
    /// 双孩子节点的处理与 BST 相同：节点保留 ID、换成后继的值。
    pub fn remove(&mut self, value: i32) -> Outcome {
        let mut walk = Walk::default();
        let root = self.root.take();
        self.root = remove_at(root, value, &mut walk);

        match walk.removed {
            Some(removed) => {
                self.len -= 1;
                Outcome::Removed {
                    path: walk.path,
                    removed,
                    successor: walk.successor,
                    rotations: walk.rotations,
                }
            }
            None => Outcome::NotFound { path: walk.path },
        }
    }

    pub fn search(&self, value: i32) -> Outcome {
        let mut path = Path::new();
        let mut cursor = self.root.as_deref();

        while let Some(node) = cursor {
            path.push(node.snapshot());
            match value.cmp(&node.value) {
                Ordering::Less => cursor = node.left.as_deref(),
                Ordering::Greater => cursor = node.right.as_deref(),
                Ordering::Equal => {
                    let node = node.snapshot();
                    return Outcome::Found { path, node };
                }
            }
        }

        Outcome::NotFound { path }
    }

    pub fn contains(&self, value: i32) -> bool {
        matches!(self.search(value), Outcome::Found { .. })
    }

    pub fn clear(&mut self) -> Outcome {
        let removed = self.nodes();
        self.root = None;
        self.len = 0;
        Outcome::Cleared { removed }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// 树高，即根节点记录的高度
    pub fn height(&self) -> usize {
        height_of(&self.root).max(0) as usize
    }

    pub fn nodes(&self) -> Vec<NodeRef> {
        self.root().map(|root| root.preorder()).unwrap_or_default()
    }

    pub fn inorder(&self) -> Vec<i32> {
        fn walk(node: Option<&Node>, out: &mut Vec<i32>) {
            if let Some(n) = node {
                walk(n.left.as_deref(), out);
                out.push(n.value);
                walk(n.right.as_deref(), out);
            }
        }
        let mut out = Vec::with_capacity(self.len);
        walk(self.root(), &mut out);
        out
    }
}

impl fmt::Display for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_values(self.inorder(), ", "))
    }
}

fn insert_at(
    node: Option<Box<Node>>,
    value: i32,
    ids: &mut IdAllocator,
    walk: &mut Walk,
) -> Box<Node> {
    let Some(mut node) = node else {
        let fresh = Node::new(ids.allocate(), value);
        walk.path.push(fresh.snapshot());
        walk.inserted = Some(fresh.snapshot());
        return Box::new(fresh);
    };

    walk.path.push(node.snapshot());
    match value.cmp(&node.value) {
        Ordering::Less => node.left = Some(insert_at(node.left.take(), value, ids, walk)),
        Ordering::Greater => node.right = Some(insert_at(node.right.take(), value, ids, walk)),
        Ordering::Equal => return node,
    }

    rebalance_after_insert(node, value, walk)
}

/// 插入后的再平衡：用新值与孩子值比较判断失衡形态
fn rebalance_after_insert(mut node: Box<Node>, value: i32, walk: &mut Walk) -> Box<Node> {
    node.update_height();
    let balance = node.balance();
    let left_value = node.left.as_ref().map(|n| n.value);
    let right_value = node.right.as_ref().map(|n| n.value);

    if balance > 1 && left_value.is_some_and(|lv| value < lv) {
        walk.rotations.push(Rotation::Right);
        return rotate_right(node);
    }
    if balance < -1 && right_value.is_some_and(|rv| value > rv) {
        walk.rotations.push(Rotation::Left);
        return rotate_left(node);
    }
    if balance > 1 && left_value.is_some_and(|lv| value > lv) {
        walk.rotations.push(Rotation::LeftRight);
        node.left = node.left.take().map(rotate_left);
        return rotate_right(node);
    }
    if balance < -1 && right_value.is_some_and(|rv| value < rv) {
        walk.rotations.push(Rotation::RightLeft);
        node.right = node.right.take().map(rotate_right);
        return rotate_left(node);
    }

    node
}

fn remove_at(node: Option<Box<Node>>, value: i32, walk: &mut Walk) -> Option<Box<Node>> {
    let mut node = node?;
    walk.path.push(node.snapshot());

    match value.cmp(&node.value) {
        Ordering::Less => node.left = remove_at(node.left.take(), value, walk),
        Ordering::Greater => node.right = remove_at(node.right.take(), value, walk),
        Ordering::Equal => {
            walk.removed = Some(node.snapshot());
            match (node.left.take(), node.right.take()) {
                (Some(left), Some(right)) => {
                    let mut cursor = Some(right.as_ref());
                    let mut successor = node.snapshot();
                    while let Some(candidate) = cursor {
                        walk.path.push(candidate.snapshot());
                        successor = candidate.snapshot();
                        cursor = candidate.left.as_deref();
                    }
                    walk.successor = Some(successor);
                    node.value = successor.value;
                    node.left = Some(left);
                    node.right = detach_min(right, walk);
                }
                (Some(child), None) | (None, Some(child)) => return Some(child),
                (None, None) => return None,
            }
        }
    }

    Some(rebalance_after_remove(node, walk))
}

/// 摘除子树最小节点，沿途再平衡
fn detach_min(mut node: Box<Node>, walk: &mut Walk) -> Option<Box<Node>> {
    match node.left.take() {
        Some(left) => {
            node.left = detach_min(left, walk);
            Some(rebalance_after_remove(node, walk))
        }
        None => node.right.take(),
    }
}

/// 删除后的再平衡：依据孩子的平衡因子判断失衡形态
fn rebalance_after_remove(mut node: Box<Node>, walk: &mut Walk) -> Box<Node> {
    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        let left_balance = node.left.as_ref().map_or(0, |n| n.balance());
        if left_balance >= 0 {
            walk.rotations.push(Rotation::Right);
        } else {
            walk.rotations.push(Rotation::LeftRight);
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        let right_balance = node.right.as_ref().map_or(0, |n| n.balance());
        if right_balance <= 0 {
            walk.rotations.push(Rotation::Left);
        } else {
            walk.rotations.push(Rotation::RightLeft);
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}
