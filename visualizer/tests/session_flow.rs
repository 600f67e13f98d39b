//! # 会话流程集成测试
//!
//! 测试 脚本 → Session → Visualizer → Scene 的执行链路。
//! 全部 headless 运行，不依赖窗口或渲染设备。

use ds_core::{Action, Parser, StructureKind};
use visualizer::{
    AppConfig, Layout, MessageKind, SceneSnapshot, ScriptRunner, Session, SessionError,
};

const DT: f32 = 1.0 / 60.0;

fn run_script(kind: StructureKind, text: &str) -> (Session, visualizer::RunReport) {
    let script = Parser::new().parse("flow.ops", text).unwrap();
    let mut session = Session::new(kind, AppConfig::default());
    let report = ScriptRunner::new(DT).run(&mut session, &script);
    (session, report)
}

fn feedback(report: &visualizer::RunReport) -> Vec<&str> {
    report.feedback.iter().map(|f| f.text.as_str()).collect()
}

/// 动画结束后，场景与结构的布局一致
fn assert_scene_matches_layout(session: &mut Session) {
    for _ in 0..600 {
        session.tick(DT);
    }
    let layout = Layout::compute(session.structure(), &session.config().layout);
    let scene = session.visualizer().scene();

    assert_eq!(scene.len(), layout.len());
    assert!(scene.is_settled());
    for visual in scene.nodes() {
        assert_eq!(Some(visual.target), layout.position(visual.id));
        assert_eq!(visual.alpha, 1.0);
        assert!(!visual.highlighted);
    }
    assert_eq!(scene.edges().len(), layout.edges.len());
    for (from, to) in &layout.edges {
        assert!(scene.edge(*from, *to).is_some());
    }
}

/// 测试二叉搜索树的完整流程
#[test]
fn test_bst_flow() {
    let (mut session, report) = run_script(
        StructureKind::Bst,
        "insert 50\ninsert 30\ninsert 70\ninsert 20\ninsert 40\n\
         insert 30\nsearch 40\nsearch 45\ndelete 30\ndelete 99",
    );

    assert_eq!(
        feedback(&report),
        vec![
            "Inserted: 50",
            "Inserted: 30",
            "Inserted: 70",
            "Inserted: 20",
            "Inserted: 40",
            "Error: 30 already exists!",
            "Found: 40",
            "45 not found.",
            "Deleted: 30",
            "Error: 99 not found!",
        ]
    );
    assert_eq!(session.contents(), "[ 20, 40, 50, 70 ]");
    assert_eq!(session.history().mutation_count(), 6);
    assert_scene_matches_layout(&mut session);
}

/// 测试 AVL 旋转后的最终形态
#[test]
fn test_avl_rotations_flow() {
    let (mut session, report) = run_script(
        StructureKind::Avl,
        "insert 30\ninsert 20\ninsert 10\ninsert 40\ninsert 50",
    );
    assert_eq!(report.actions, 5);
    assert_eq!(session.contents(), "[ 10, 20, 30, 40, 50 ]");

    // 根节点是 20，位于绘图区顶部中央
    let layout = Layout::compute(session.structure(), &session.config().layout);
    let root = layout.order[0];
    let root_node = session.visualizer().scene().node(root).unwrap();
    assert_eq!(root_node.value, 20);
    assert_scene_matches_layout(&mut session);
}

/// 测试最小堆
#[test]
fn test_heap_flow() {
    let (mut session, report) = run_script(
        StructureKind::MinHeap,
        "insert 40\ninsert 20\ninsert 30\ninsert 10\ninsert 5\npeek\nextract-min",
    );

    let texts = feedback(&report);
    assert_eq!(texts[5], "Min element: 5");
    assert_eq!(texts[6], "Extracted min: 5");
    assert_eq!(session.contents(), "[ 10, 20, 30, 40 ]");
    assert_scene_matches_layout(&mut session);

    let (session, report) = run_script(StructureKind::MinHeap, "extract-min\nclear");
    assert_eq!(
        feedback(&report),
        vec!["Error: Heap is empty!", "Heap is already empty."]
    );
    assert!(session.visualizer().scene().is_empty());
}

/// 测试线性结构
#[test]
fn test_linear_flows() {
    let (mut list, report) = run_script(
        StructureKind::LinkedList,
        "insert-tail 3\ninsert-head 1\ninsert-tail 7\ndelete 1\ndelete 42",
    );
    assert_eq!(
        feedback(&report),
        vec![
            "Inserted at tail: 3",
            "Inserted at head: 1",
            "Inserted at tail: 7",
            "Deleted: 1",
            "Error: Value not found!",
        ]
    );
    assert_eq!(list.contents(), "[ 3 -> 7 ]");
    assert_scene_matches_layout(&mut list);

    let (mut stack, report) = run_script(
        StructureKind::Stack,
        "push 1\npush 2\npush 3\npeek\nsearch 1\npop",
    );
    assert_eq!(
        &feedback(&report)[3..],
        &["Top element: 3", "Found at position 3 from top", "Popped: 3"]
    );
    assert_scene_matches_layout(&mut stack);

    let (mut queue, report) = run_script(
        StructureKind::Queue,
        "enqueue 10\nenqueue 20\npeek-rear\ndequeue\ndequeue\ndequeue",
    );
    assert_eq!(
        &feedback(&report)[2..],
        &["Rear element: 20", "Dequeued: 10", "Dequeued: 20", "Error: Queue is empty!"]
    );
    assert!(queue.structure().is_empty());
    assert_scene_matches_layout(&mut queue);
}

/// 测试清空后场景为空
#[test]
fn test_clear_empties_scene() {
    let (session, report) = run_script(StructureKind::Bst, "insert 2\ninsert 1\ninsert 3\nclear");
    assert_eq!(feedback(&report).last(), Some(&"Tree cleared!"));
    assert!(session.visualizer().scene().is_empty());
    assert!(session.visualizer().scene().edges().is_empty());
}

/// 测试动画播放期间拒绝操作
#[test]
fn test_busy_while_animating() {
    let mut session = Session::new(StructureKind::Stack, AppConfig::default());
    session.perform(Action::Push(1)).unwrap();
    assert!(!session.can_interact());

    let err = session.perform(Action::Push(2)).unwrap_err();
    assert!(matches!(err, SessionError::Busy));
    assert_eq!(session.contents(), "Top -> [ 1 ] <- Bottom");

    session.run_until_idle(DT);
    assert!(session.can_interact());
    session.perform(Action::Push(2)).unwrap();
}

/// 测试速度只影响播放时长
#[test]
fn test_speed_changes_duration() {
    let script = "insert 5\ninsert 3\ninsert 8";
    let (_, normal) = run_script(StructureKind::Bst, script);
    let (_, fast) = run_script(StructureKind::Bst, &format!("speed 3\n{script}"));
    assert!(fast.frames < normal.frames);
}

/// 测试导出快照
#[test]
fn test_export_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.export.output_dir = dir.path().to_path_buf();

    let script = Parser::new()
        .parse("export.ops", "insert 5\ninsert 3\ninsert 8\nexport")
        .unwrap();
    let mut session = Session::new(StructureKind::Avl, config);
    let report = ScriptRunner::new(DT).run(&mut session, &script);

    let path = dir.path().join("avl_export.json");
    assert_eq!(report.exports, vec![path.clone()]);
    let last = report.feedback.last().unwrap();
    assert_eq!(last.text, "Exported to avl_export.json");
    assert_eq!(last.kind, MessageKind::Success);

    let snapshot = SceneSnapshot::read(&path).unwrap();
    assert_eq!(snapshot.kind, StructureKind::Avl);
    assert_eq!(snapshot.contents, "[ 3, 5, 8 ]");
    assert_eq!(snapshot.nodes.len(), 3);
    assert_eq!(snapshot.edges.len(), 2);
}

/// 测试切换结构
#[test]
fn test_switch_structure() {
    let mut session = Session::new(StructureKind::Bst, AppConfig::default());
    session.set_speed(2.0);
    session.perform(Action::Insert(1)).unwrap();

    session.switch_structure(StructureKind::Queue);
    assert_eq!(session.kind(), StructureKind::Queue);
    assert!(session.structure().is_empty());
    assert!(session.can_interact());
    assert_eq!(session.speed(), 2.0);

    assert!(matches!(
        session.perform(Action::Insert(1)),
        Err(SessionError::Structure(_))
    ));
}
