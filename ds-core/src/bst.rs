//! # BST 模块
//!
//! 二叉搜索树。所有操作都会记录访问路径，供动画层逐个高亮。
//!
//! 不允许重复值：插入已存在的值返回 [`Outcome::Duplicate`]，树保持不变。

use std::cmp::Ordering;
use std::fmt;

use crate::node::{IdAllocator, NodeId, NodeRef, Path, TreeView, format_values};
use crate::outcome::Outcome;

/// BST 节点
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    value: i32,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(id: NodeId, value: i32) -> Self {
        Self {
            id,
            value,
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

    fn snapshot(&self) -> NodeRef {
        NodeRef::new(self.id, self.value)
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

/// 二叉搜索树
#[derive(Debug, Clone, Default)]
pub struct Bst {
    root: Option<Box<Node>>,
    ids: IdAllocator,
    len: usize,
}

impl Bst {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入值
    ///
    /// 沿途经过的节点依次进入路径；成功时新节点也会追加到路径末尾。
    pub fn insert(&mut self, value: i32) -> Outcome {
        let mut path = Path::new();
        let mut slot = &mut self.root;

        while let Some(node) = slot {
            path.push(node.snapshot());
            match value.cmp(&node.value) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => return Outcome::Duplicate { path },
            }
        }

        let node = Node::new(self.ids.allocate(), value);
        let snapshot = node.snapshot();
        *slot = Some(Box::new(node));
        self.len += 1;
        path.push(snapshot);

        Outcome::Inserted {
            path,
            node: snapshot,
            rotations: Vec::new(),
        }
    }

    /// 删除值
    ///
    /// 双孩子节点：把中序后继的值复制进来（节点保留自己的 ID），
    /// 再从右子树摘除后继。寻找后继时经过的节点也进入路径。
    pub fn remove(&mut self, value: i32) -> Outcome {
        let mut path = Path::new();
        match remove_from(&mut self.root, value, &mut path) {
            Some((removed, successor)) => {
                self.len -= 1;
                Outcome::Removed {
                    path,
                    removed,
                    successor,
                    rotations: Vec::new(),
                }
            }
            None => Outcome::NotFound { path },
        }
    }

    /// 查找值
    pub fn search(&self, value: i32) -> Outcome {
        let mut path = Path::new();
        let mut cursor = self.root.as_deref();

        while let Some(node) = cursor {
            path.push(node.snapshot());
            cursor = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => {
                    return Outcome::Found {
                        path,
                        node: node.snapshot(),
                    };
                }
            };
        }

        Outcome::NotFound { path }
    }

    pub fn contains(&self, value: i32) -> bool {
        matches!(self.search(value), Outcome::Found { .. })
    }

    /// 清空整棵树，返回前序排列的被移除节点
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

    /// 树高（空树为 0，单节点为 1）
    pub fn height(&self) -> usize {
        fn height_of(node: Option<&Node>) -> usize {
            match node {
                Some(n) => 1 + height_of(n.left.as_deref()).max(height_of(n.right.as_deref())),
                None => 0,
            }
        }
        height_of(self.root())
    }

    /// 前序排列的全部节点
    pub fn nodes(&self) -> Vec<NodeRef> {
        self.root().map(|root| root.preorder()).unwrap_or_default()
    }

    /// 中序遍历的值
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

impl fmt::Display for Bst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_values(self.inorder(), ", "))
    }
}

/// 在 `slot` 为根的子树中删除 `value`
///
/// 返回 (被删除值所在节点, 接替的后继)。
fn remove_from(
    slot: &mut Option<Box<Node>>,
    value: i32,
    path: &mut Path,
) -> Option<(NodeRef, Option<NodeRef>)> {
    let node = slot.as_mut()?;
    path.push(node.snapshot());

    match value.cmp(&node.value) {
        Ordering::Less => remove_from(&mut node.left, value, path),
        Ordering::Greater => remove_from(&mut node.right, value, path),
        Ordering::Equal => {
            let removed = node.snapshot();

            if node.left.is_some() && node.right.is_some() {
                let mut cursor = node.right.as_deref();
                let mut successor = None;
                while let Some(candidate) = cursor {
                    path.push(candidate.snapshot());
                    successor = Some(candidate.snapshot());
                    cursor = candidate.left.as_deref();
                }
                let successor = successor?;
                node.value = successor.value;
                detach_min(&mut node.right);
                Some((removed, Some(successor)))
            } else {
                let child = node.left.take().or_else(|| node.right.take());
                *slot = child;
                Some((removed, None))
            }
        }
    }
}

/// 摘除子树中的最小节点，用它的右孩子顶替
fn detach_min(slot: &mut Option<Box<Node>>) -> Option<Box<Node>> {
    if slot.as_ref()?.left.is_some() {
        return detach_min(&mut slot.as_mut()?.left);
    }
    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min)
}
