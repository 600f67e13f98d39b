//! # Runner 模块
//!
//! headless 执行操作脚本：每个操作之后以固定帧间隔把动画播完，
//! 收集每一步的反馈消息。

use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::AnimationConfig;
use crate::message::MessageKind;
use crate::session::{MAX_IDLE_FRAMES, Session};
use ds_core::{Script, ScriptCommand};

/// 一条反馈
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackLine {
    /// 脚本行号
    pub line: usize,
    pub kind: MessageKind,
    pub text: String,
}

/// 执行结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// 成功执行的操作数
    pub actions: usize,
    /// 被拒绝的操作数（结构不支持）
    pub rejected: usize,
    /// 推进的总帧数
    pub frames: usize,
    /// 成功导出的文件
    pub exports: Vec<PathBuf>,
    /// 导出失败次数
    pub failed_exports: usize,
    pub feedback: Vec<FeedbackLine>,
}

/// 脚本执行器
#[derive(Debug, Clone, Copy)]
pub struct ScriptRunner {
    frame_delta: f32,
}

impl ScriptRunner {
    pub fn new(frame_delta: f32) -> Self {
        Self {
            frame_delta: frame_delta.max(f32::EPSILON),
        }
    }

    pub fn from_config(config: &AnimationConfig) -> Self {
        Self::new(config.frame_delta())
    }

    pub fn frame_delta(&self) -> f32 {
        self.frame_delta
    }

    /// 执行整份脚本
    pub fn run(&self, session: &mut Session, script: &Script) -> RunReport {
        let mut report = RunReport::default();
        info!(script = %script.id, commands = script.len(), "开始执行脚本");

        for line in &script.commands {
            match &line.command {
                ScriptCommand::Action(action) => match session.perform(*action) {
                    Ok(_) => {
                        report.actions += 1;
                        collect_feedback(session, line.line, &mut report);
                        report.frames += session.run_until_idle(self.frame_delta);
                    }
                    Err(err) => {
                        warn!(line = line.line, action = %action, error = %err, "操作被拒绝");
                        report.rejected += 1;
                    }
                },
                ScriptCommand::Speed(factor) => {
                    let actual = session.set_speed(*factor);
                    info!(line = line.line, speed = actual, "调整速度");
                }
                ScriptCommand::Wait(seconds) => {
                    let frames = (seconds / self.frame_delta).ceil() as usize;
                    if frames > MAX_IDLE_FRAMES {
                        warn!(line = line.line, seconds, "等待时间过长，截断");
                    }
                    let frames = frames.min(MAX_IDLE_FRAMES);
                    for _ in 0..frames {
                        session.tick(self.frame_delta);
                    }
                    report.frames += frames;
                }
                ScriptCommand::Export(file) => {
                    let result = match file {
                        Some(name) => session.export_named(name),
                        None => session.export(),
                    };
                    match result {
                        Ok(path) => report.exports.push(path),
                        Err(err) => {
                            warn!(line = line.line, error = %err, "导出失败");
                            report.failed_exports += 1;
                        }
                    }
                    collect_feedback(session, line.line, &mut report);
                }
            }
        }

        info!(
            actions = report.actions,
            rejected = report.rejected,
            frames = report.frames,
            "脚本执行完成"
        );
        report
    }
}

fn collect_feedback(session: &Session, line: usize, report: &mut RunReport) {
    if let Some(message) = session.messages().current() {
        info!(line, kind = %message.kind, "{}", message.text);
        report.feedback.push(FeedbackLine {
            line,
            kind: message.kind,
            text: message.text.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ds_core::{Parser, ScriptLine, StructureKind};

    fn script(text: &str) -> Script {
        Parser::new().parse("test.ops", text).unwrap()
    }

    #[test]
    fn test_run_collects_feedback() {
        let mut session = Session::new(StructureKind::Avl, AppConfig::default());
        let script = script("structure avl\ninsert 30\ninsert 20\ninsert 10\ninsert 10\nsearch 20");
        let report = ScriptRunner::new(1.0 / 60.0).run(&mut session, &script);

        assert_eq!(report.actions, 5);
        assert_eq!(report.rejected, 0);
        assert!(report.frames > 0);
        let texts: Vec<&str> = report.feedback.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Inserted: 30",
                "Inserted: 20",
                "Inserted: 10",
                "Error: 10 already exists!",
                "Found: 20"
            ]
        );
        assert_eq!(report.feedback[3].line, 5);
        assert_eq!(session.contents(), "[ 10, 20, 30 ]");
        assert!(session.can_interact());
    }

    #[test]
    fn test_unsupported_actions_are_counted() {
        let mut session = Session::new(StructureKind::Queue, AppConfig::default());
        let report = ScriptRunner::new(0.1).run(&mut session, &script("enqueue 1\npush 2\npop"));
        assert_eq!(report.actions, 1);
        assert_eq!(report.rejected, 2);
    }

    #[test]
    fn test_speed_and_wait() {
        let mut session = Session::new(StructureKind::Stack, AppConfig::default());
        let report = ScriptRunner::new(0.1).run(&mut session, &script("speed 9\nwait 1"));
        assert_eq!(session.speed(), 3.0);
        assert_eq!(report.frames, 10);
    }

    #[test]
    fn test_wait_frames_are_capped() {
        let mut session = Session::new(StructureKind::Stack, AppConfig::default());
        let mut script = Script::new("built.ops");
        script.commands.push(ScriptLine {
            line: 1,
            command: ScriptCommand::Wait(1e30),
        });

        let report = ScriptRunner::new(1.0).run(&mut session, &script);
        assert_eq!(report.frames, MAX_IDLE_FRAMES);
    }

    #[test]
    fn test_export_rejects_paths_outside_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.export.output_dir = dir.path().join("out");
        let mut session = Session::new(StructureKind::Queue, config);

        let report = ScriptRunner::new(1.0 / 30.0).run(
            &mut session,
            &script("enqueue 1\nexport ../escaped.json\nexport /tmp/escaped.json"),
        );
        assert_eq!(report.failed_exports, 2);
        assert!(report.exports.is_empty());
        assert!(!dir.path().join("escaped.json").exists());
        assert_eq!(report.feedback.last().map(|f| f.text.as_str()), Some("Export failed!"));
    }

    #[test]
    fn test_export_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.export.output_dir = dir.path().to_path_buf();
        let mut session = Session::new(StructureKind::Stack, config);

        let report = ScriptRunner::new(1.0 / 30.0).run(
            &mut session,
            &script("export\npush 1\nexport\nexport custom.json"),
        );
        assert_eq!(report.failed_exports, 1);
        assert_eq!(
            report.exports,
            vec![
                dir.path().join("stack_export.json"),
                dir.path().join("custom.json")
            ]
        );
        assert_eq!(report.feedback[0].text, "Cannot export empty stack!");
        assert!(dir.path().join("custom.json").exists());
    }
}
