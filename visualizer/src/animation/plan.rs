//! # Plan 模块
//!
//! 把一次操作的 [`Outcome`] 翻译成按顺序播放的动画步骤。
//!
//! 所有时长以基准步骤时长 `D` 为单位（默认 0.5 秒），
//! 收尾的颜色复位固定为 0.1 秒，清空时每个节点淡出 0.15 秒。

use crate::animation::step::{AnimationStep, StepKind};
use crate::layout::Layout;
use crate::theme::Theme;
use ds_core::{Action, ActionKind, NodeRef, Outcome};

/// 收尾复位时长（秒）
const RESET_TIME: f32 = 0.1;
/// 清空时每个节点的淡出时长（秒）
const CLEAR_FADE_TIME: f32 = 0.15;

/// 动画计划生成器
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    step: f32,
    theme: &'a Theme,
}

impl<'a> Planner<'a> {
    pub fn new(step_duration: f32, theme: &'a Theme) -> Self {
        Self {
            step: step_duration,
            theme,
        }
    }

    /// 为一次操作生成步骤
    ///
    /// `layout` 是操作之后的布局；`moves` 表示该布局会移动场景中已有的节点。
    pub fn plan(
        &self,
        action: &Action,
        outcome: &Outcome,
        layout: &Layout,
        moves: bool,
    ) -> Vec<AnimationStep> {
        match outcome {
            Outcome::Inserted { path, node, .. } => self.insert(path, *node, layout, moves),
            Outcome::Duplicate { path } => self.duplicate(path),
            Outcome::Removed {
                path,
                removed,
                successor,
                ..
            } => self.delete(path, *removed, *successor, layout),
            Outcome::NotFound { path } if action.kind() == ActionKind::Search => {
                self.search(path, None)
            }
            Outcome::NotFound { path } => self.not_found(path),
            Outcome::Found { path, node } => self.search(path, Some(*node)),
            Outcome::Peeked { node } => self.peek(*node),
            Outcome::HeapInserted { sift, node } => {
                self.heap_insert(sift, *node, layout, moves)
            }
            Outcome::HeapRemoved { sift, removed } => self.heap_remove(sift, *removed, layout),
            Outcome::Empty => self.empty(),
            Outcome::Cleared { removed } => self.clear(removed),
        }
    }

    /// 插入：已有节点先移到新布局（旋转、链表头插等），再沿路径高亮并淡入新节点
    ///
    /// 新节点在移动结束前保持透明，不会和还没让开的节点叠在一起。
    pub fn insert(
        &self,
        path: &[NodeRef],
        node: NodeRef,
        layout: &Layout,
        moves: bool,
    ) -> Vec<AnimationStep> {
        let d = self.step;
        let mut steps = vec![AnimationStep::new(StepKind::Attach(layout.clone()), 0.0)];
        if moves {
            steps.push(AnimationStep::new(StepKind::MoveNodes(layout.clone()), d));
        }
        self.trace_path(&mut steps, path, 0.7 * d, true);
        steps.push(AnimationStep::new(StepKind::ResetColors, 0.2 * d));
        steps.push(AnimationStep::new(StepKind::FadeIn(node.id), d));
        steps.push(AnimationStep::new(StepKind::Pause, 0.5 * d));
        steps.push(AnimationStep::new(StepKind::ResetColors, RESET_TIME));
        steps
    }

    /// 重复插入：沿路径高亮，闪烁已存在的节点
    pub fn duplicate(&self, path: &[NodeRef]) -> Vec<AnimationStep> {
        let d = self.step;
        let mut steps = Vec::new();
        self.trace_path(&mut steps, path, 0.5 * d, false);
        if let Some(last) = path.last() {
            steps.push(AnimationStep::new(StepKind::FlashNode(last.id), 1.5 * d));
        }
        steps.push(AnimationStep::new(StepKind::ResetColors, RESET_TIME));
        steps
    }

    /// 删除：高亮路径，标红被删节点，标绿后继，淡出被摘除的节点后整体移动
    pub fn delete(
        &self,
        path: &[NodeRef],
        removed: NodeRef,
        successor: Option<NodeRef>,
        layout: &Layout,
    ) -> Vec<AnimationStep> {
        let d = self.step;
        let mut steps = Vec::new();
        self.trace_path(&mut steps, path, 0.5 * d, false);

        steps.push(AnimationStep::new(
            StepKind::ColorChange {
                node: removed.id,
                color: self.theme.node_delete.fill,
            },
            d,
        ));
        let detached = match successor {
            Some(next) if next.id != removed.id => {
                steps.push(AnimationStep::new(
                    StepKind::ColorChange {
                        node: next.id,
                        color: self.theme.node_found.fill,
                    },
                    d,
                ));
                next
            }
            _ => removed,
        };
        steps.push(AnimationStep::new(StepKind::Pause, 0.3 * d));
        steps.push(AnimationStep::new(StepKind::FadeOut(detached.id), 0.5 * d));
        steps.push(AnimationStep::new(StepKind::MoveNodes(layout.clone()), d));
        steps.push(AnimationStep::new(StepKind::ResetColors, RESET_TIME));
        steps
    }

    /// 删除时未找到
    pub fn not_found(&self, path: &[NodeRef]) -> Vec<AnimationStep> {
        let d = self.step;
        let mut steps = Vec::new();
        self.trace_path(&mut steps, path, 0.5 * d, false);
        steps.push(AnimationStep::new(StepKind::Pause, d));
        steps.push(AnimationStep::new(StepKind::ResetColors, RESET_TIME));
        steps
    }

    /// 查找：沿路径高亮，找到时标绿
    pub fn search(&self, path: &[NodeRef], found: Option<NodeRef>) -> Vec<AnimationStep> {
        let d = self.step;
        let mut steps = Vec::new();
        self.trace_path(&mut steps, path, 0.6 * d, true);
        match found {
            Some(node) => steps.push(AnimationStep::new(
                StepKind::ColorChange {
                    node: node.id,
                    color: self.theme.node_found.fill,
                },
                1.5 * d,
            )),
            None => steps.push(AnimationStep::new(StepKind::Pause, 0.5 * d)),
        }
        steps.push(AnimationStep::new(StepKind::ResetColors, RESET_TIME));
        steps
    }

    /// 查看端点元素
    pub fn peek(&self, node: NodeRef) -> Vec<AnimationStep> {
        vec![
            AnimationStep::new(
                StepKind::ColorChange {
                    node: node.id,
                    color: self.theme.node_found.fill,
                },
                2.0 * self.step,
            ),
            AnimationStep::new(StepKind::ResetColors, RESET_TIME),
        ]
    }

    /// 空结构上的弹出/查看
    pub fn empty(&self) -> Vec<AnimationStep> {
        vec![AnimationStep::new(StepKind::Pause, 0.5 * self.step)]
    }

    /// 清空：逐个淡出，最后同步到空布局
    pub fn clear(&self, removed: &[NodeRef]) -> Vec<AnimationStep> {
        if removed.is_empty() {
            return Vec::new();
        }
        let mut steps: Vec<AnimationStep> = removed
            .iter()
            .map(|node| AnimationStep::new(StepKind::FadeOut(node.id), CLEAR_FADE_TIME))
            .collect();
        steps.push(AnimationStep::new(StepKind::MoveNodes(Layout::empty()), 0.0));
        steps
    }

    /// 堆插入：被上浮挤开的元素先移到新槽位，再淡入新元素并高亮上浮经过的槽位
    pub fn heap_insert(
        &self,
        sift: &[usize],
        node: NodeRef,
        layout: &Layout,
        moves: bool,
    ) -> Vec<AnimationStep> {
        let d = self.step;
        let mut steps = vec![AnimationStep::new(StepKind::Attach(layout.clone()), 0.0)];
        if moves {
            steps.push(AnimationStep::new(StepKind::MoveNodes(layout.clone()), d));
        }
        steps.push(AnimationStep::new(StepKind::FadeIn(node.id), d));
        self.trace_slots(&mut steps, sift, layout);
        steps.push(AnimationStep::new(StepKind::ResetColors, RESET_TIME));
        steps
    }

    /// 堆删除：标红并淡出被删元素，高亮下沉经过的槽位，再移动到最终位置
    pub fn heap_remove(
        &self,
        sift: &[usize],
        removed: NodeRef,
        layout: &Layout,
    ) -> Vec<AnimationStep> {
        let d = self.step;
        let mut steps = vec![
            AnimationStep::new(
                StepKind::ColorChange {
                    node: removed.id,
                    color: self.theme.node_delete.fill,
                },
                d,
            ),
            AnimationStep::new(StepKind::FadeOut(removed.id), 0.5 * d),
        ];
        self.trace_slots(&mut steps, sift, layout);
        steps.push(AnimationStep::new(StepKind::MoveNodes(layout.clone()), d));
        steps.push(AnimationStep::new(StepKind::ResetColors, RESET_TIME));
        steps
    }

    /// 逐个高亮路径节点，`edges` 为真时在节点之间高亮边（0.3D）
    fn trace_path(&self, steps: &mut Vec<AnimationStep>, path: &[NodeRef], each: f32, edges: bool) {
        for (i, node) in path.iter().enumerate() {
            steps.push(AnimationStep::new(StepKind::HighlightNode(node.id), each));
            if edges && i > 0 {
                steps.push(AnimationStep::new(
                    StepKind::HighlightEdge {
                        from: path[i - 1].id,
                        to: node.id,
                    },
                    0.3 * self.step,
                ));
            }
        }
    }

    /// 高亮槽位上（操作之后）的节点，越界的槽位跳过
    fn trace_slots(&self, steps: &mut Vec<AnimationStep>, sift: &[usize], layout: &Layout) {
        for id in sift.iter().filter_map(|&slot| layout.slot(slot)) {
            steps.push(AnimationStep::new(StepKind::HighlightNode(id), 0.5 * self.step));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use ds_core::{NodeId, Structure, StructureKind};

    fn names(steps: &[AnimationStep]) -> Vec<&'static str> {
        steps.iter().map(|s| s.kind.name()).collect()
    }

    fn node(id: u32, value: i32) -> NodeRef {
        NodeRef::new(NodeId(id), value)
    }

    #[test]
    fn test_insert_plan() {
        let theme = Theme::dark();
        let planner = Planner::new(0.5, &theme);
        let path = [node(0, 50), node(1, 30)];
        let steps = planner.insert(&path, node(1, 30), &Layout::empty(), false);

        assert_eq!(
            names(&steps),
            vec![
                "attach",
                "highlight-node",
                "highlight-node",
                "highlight-edge",
                "reset-colors",
                "fade-in",
                "pause",
                "reset-colors",
            ]
        );
        assert_eq!(steps[1].duration, 0.35);
        assert_eq!(steps[3].duration, 0.15);
        assert_eq!(steps[4].duration, 0.1);
        assert_eq!(steps[5].duration, 0.5);
        assert_eq!(steps[7].duration, 0.1);
    }

    #[test]
    fn test_insert_moves_before_trace_and_fade() {
        let theme = Theme::dark();
        let planner = Planner::new(0.5, &theme);
        let steps = planner.insert(&[node(0, 1)], node(3, 2), &Layout::empty(), true);

        assert_eq!(
            names(&steps),
            vec![
                "attach",
                "move-nodes",
                "highlight-node",
                "reset-colors",
                "fade-in",
                "pause",
                "reset-colors",
            ]
        );
        assert_eq!(steps[1].duration, 0.5);
    }

    #[test]
    fn test_delete_plan_with_successor() {
        let theme = Theme::dark();
        let planner = Planner::new(0.5, &theme);
        let steps = planner.delete(
            &[node(0, 50), node(2, 70), node(5, 60)],
            node(0, 50),
            Some(node(5, 60)),
            &Layout::empty(),
        );

        assert_eq!(
            names(&steps),
            vec![
                "highlight-node",
                "highlight-node",
                "highlight-node",
                "color-change",
                "color-change",
                "pause",
                "fade-out",
                "move-nodes",
                "reset-colors",
            ]
        );
        assert_eq!(
            steps[3].kind,
            StepKind::ColorChange {
                node: NodeId(0),
                color: theme.node_delete.fill
            }
        );
        // 被摘除的是后继节点
        assert_eq!(steps[6].kind, StepKind::FadeOut(NodeId(5)));
        assert_eq!(steps[6].duration, 0.25);
    }

    #[test]
    fn test_search_plans() {
        let theme = Theme::dark();
        let planner = Planner::new(0.5, &theme);

        let found = planner.search(&[node(0, 5), node(1, 3)], Some(node(1, 3)));
        assert_eq!(
            names(&found),
            vec![
                "highlight-node",
                "highlight-node",
                "highlight-edge",
                "color-change",
                "reset-colors"
            ]
        );
        assert_eq!(found[3].duration, 0.75);

        let missing = planner.search(&[node(0, 5)], None);
        assert_eq!(names(&missing), vec!["highlight-node", "pause", "reset-colors"]);
        assert_eq!(missing[1].duration, 0.25);
    }

    #[test]
    fn test_not_found_depends_on_action() {
        let theme = Theme::dark();
        let planner = Planner::new(0.5, &theme);
        let outcome = Outcome::NotFound {
            path: vec![node(0, 5)],
        };

        let on_delete = planner.plan(&Action::Delete(9), &outcome, &Layout::empty(), false);
        assert_eq!(on_delete[1].kind, StepKind::Pause);
        assert_eq!(on_delete[1].duration, 0.5);

        let on_search = planner.plan(&Action::Search(9), &outcome, &Layout::empty(), false);
        assert_eq!(on_search[1].duration, 0.25);
    }

    #[test]
    fn test_duplicate_and_clear() {
        let theme = Theme::dark();
        let planner = Planner::new(0.5, &theme);

        let dup = planner.duplicate(&[node(0, 5)]);
        assert_eq!(names(&dup), vec!["highlight-node", "flash-node", "reset-colors"]);
        assert_eq!(dup[1].duration, 0.75);

        let clear = planner.clear(&[node(0, 5), node(1, 3)]);
        assert_eq!(names(&clear), vec!["fade-out", "fade-out", "move-nodes"]);
        assert_eq!(clear[0].duration, 0.15);
        assert!(planner.clear(&[]).is_empty());
    }

    #[test]
    fn test_heap_plans_follow_slots() {
        let theme = Theme::dark();
        let planner = Planner::new(0.5, &theme);

        let mut structure = Structure::new(StructureKind::MinHeap);
        structure.apply(&Action::Insert(5)).unwrap();
        structure.apply(&Action::Insert(8)).unwrap();
        let outcome = structure.apply(&Action::Insert(1)).unwrap();
        let layout = Layout::compute(&structure, &LayoutConfig::default());

        let steps = planner.plan(&Action::Insert(1), &outcome, &layout, true);
        assert_eq!(&names(&steps)[..3], &["attach", "move-nodes", "fade-in"]);
        let highlighted: Vec<NodeId> = steps
            .iter()
            .filter_map(|s| match s.kind {
                StepKind::HighlightNode(id) => Some(id),
                _ => None,
            })
            .collect();
        // 1 从槽位 2 上浮到槽位 0
        assert_eq!(highlighted, vec![layout.order[2], layout.order[0]]);
        assert_eq!(names(&steps).last(), Some(&"reset-colors"));

        // 没有元素被挤开时不移动
        let outcome = structure.apply(&Action::Insert(9)).unwrap();
        let steps = planner.plan(&Action::Insert(9), &outcome, &layout, false);
        assert!(!names(&steps).contains(&"move-nodes"));

        let outcome = structure.apply(&Action::ExtractMin).unwrap();
        let layout = Layout::compute(&structure, &LayoutConfig::default());
        let steps = planner.plan(&Action::ExtractMin, &outcome, &layout, true);
        assert_eq!(&names(&steps)[..2], &["color-change", "fade-out"]);
    }

    #[test]
    fn test_peek_and_empty() {
        let theme = Theme::dark();
        let planner = Planner::new(0.5, &theme);

        let peek = planner.plan(&Action::Peek, &Outcome::Peeked { node: node(4, 9) }, &Layout::empty(), false);
        assert_eq!(peek[0].duration, 1.0);
        assert_eq!(names(&peek), vec!["color-change", "reset-colors"]);

        let empty = planner.plan(&Action::Pop, &Outcome::Empty, &Layout::empty(), false);
        assert_eq!(empty, vec![AnimationStep::new(StepKind::Pause, 0.25)]);
    }
}
