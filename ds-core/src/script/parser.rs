//! # Parser 模块
//!
//! 逐行解析操作脚本。
//!
//! ## 规则
//!
//! - `#` 之后为注释，空行忽略
//! - 关键字大小写不敏感
//! - `structure` 只能出现在第一条指令之前，且只能出现一次
//! - 出错时继续解析后续行，所有错误都带行号记录下来

use crate::error::ParseError;
use crate::input::{ActionKind, parse_value};
use crate::script::ast::{Script, ScriptCommand, ScriptLine};
use crate::structure::StructureKind;

/// `wait` 允许的最长等待（秒）
pub const MAX_WAIT_SECONDS: f32 = 3600.0;

/// 操作脚本解析器
#[derive(Debug, Default)]
pub struct Parser {
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析脚本，遇到错误时返回第一个错误
    pub fn parse(&mut self, script_id: &str, text: &str) -> Result<Script, ParseError> {
        let script = self.parse_lenient(script_id, text);
        match self.errors.first() {
            Some(err) => Err(err.clone()),
            None => Ok(script),
        }
    }

    /// 容错解析：跳过无效行，错误可通过 [`Parser::errors`] 取得
    pub fn parse_lenient(&mut self, script_id: &str, text: &str) -> Script {
        self.errors.clear();
        let mut script = Script::new(script_id);

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = strip_comment(raw).trim();
            if content.is_empty() {
                continue;
            }

            if let Err(err) = self.parse_line(line, content, &mut script) {
                self.errors.push(err);
            }
        }

        script
    }

    /// 上一次解析收集到的错误
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    fn parse_line(&self, line: usize, content: &str, script: &mut Script) -> Result<(), ParseError> {
        let mut tokens = content.split_whitespace();
        let keyword = tokens.next().unwrap_or_default();
        let args: Vec<&str> = tokens.collect();
        let lowered = keyword.to_ascii_lowercase();

        let command = match lowered.as_str() {
            "structure" => {
                let arg = single_arg(line, keyword, "kind", &args)?;
                if !script.commands.is_empty() {
                    return Err(ParseError::LateStructure { line });
                }
                if script.structure.is_some() {
                    return Err(ParseError::InvalidLine {
                        line,
                        message: "重复的 structure 指令".to_string(),
                    });
                }
                let kind = arg
                    .parse::<StructureKind>()
                    .map_err(|message| ParseError::InvalidParameter {
                        line,
                        param: "kind".to_string(),
                        message,
                    })?;
                script.structure = Some(kind);
                return Ok(());
            }
            "speed" => {
                let arg = single_arg(line, keyword, "factor", &args)?;
                let factor = parse_seconds(line, "factor", arg)?;
                if factor <= 0.0 {
                    return Err(ParseError::InvalidParameter {
                        line,
                        param: "factor".to_string(),
                        message: "速度必须大于 0".to_string(),
                    });
                }
                ScriptCommand::Speed(factor)
            }
            "wait" => {
                let arg = single_arg(line, keyword, "seconds", &args)?;
                let seconds = parse_seconds(line, "seconds", arg)?;
                if seconds > MAX_WAIT_SECONDS {
                    return Err(ParseError::InvalidParameter {
                        line,
                        param: "seconds".to_string(),
                        message: format!("等待时间不能超过 {} 秒", MAX_WAIT_SECONDS),
                    });
                }
                ScriptCommand::Wait(seconds)
            }
            "export" => match args.as_slice() {
                [] => ScriptCommand::Export(None),
                [file] => ScriptCommand::Export(Some((*file).to_string())),
                _ => return Err(extra_args(line, keyword)),
            },
            _ => {
                let kind = lowered
                    .parse::<ActionKind>()
                    .map_err(|_| ParseError::UnknownCommand {
                        line,
                        command: keyword.to_string(),
                    })?;

                let value = if kind.needs_value() {
                    let arg = single_arg(line, keyword, "value", &args)?;
                    let value = parse_value(arg).map_err(|e| ParseError::InvalidParameter {
                        line,
                        param: "value".to_string(),
                        message: e.to_string(),
                    })?;
                    Some(value)
                } else {
                    if !args.is_empty() {
                        return Err(extra_args(line, keyword));
                    }
                    None
                };

                let action = kind.with_value(value).map_err(|e| ParseError::InvalidLine {
                    line,
                    message: e.to_string(),
                })?;
                ScriptCommand::Action(action)
            }
        };

        script.commands.push(ScriptLine { line, command });
        Ok(())
    }
}

fn strip_comment(raw: &str) -> &str {
    match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    }
}

/// 取唯一参数
fn single_arg<'a>(
    line: usize,
    command: &str,
    param: &str,
    args: &[&'a str],
) -> Result<&'a str, ParseError> {
    match args {
        [arg] => Ok(*arg),
        [] => Err(ParseError::MissingParameter {
            line,
            command: command.to_string(),
            param: param.to_string(),
        }),
        _ => Err(extra_args(line, command)),
    }
}

fn extra_args(line: usize, command: &str) -> ParseError {
    ParseError::InvalidLine {
        line,
        message: format!("'{}' 的参数过多", command),
    }
}

/// 解析非负有限的秒数/倍率
fn parse_seconds(line: usize, param: &str, text: &str) -> Result<f32, ParseError> {
    let invalid = |message: String| ParseError::InvalidParameter {
        line,
        param: param.to_string(),
        message,
    };
    let value = text
        .parse::<f32>()
        .map_err(|_| invalid(format!("'{}' 不是合法的数字", text)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!("'{}' 超出范围", text)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Action;

    fn parse(text: &str) -> Result<Script, ParseError> {
        Parser::new().parse("test.ops", text)
    }

    #[test]
    fn test_parse_full_script() {
        let text = r#"
# 演示 AVL 旋转
structure avl
speed 2
insert 30
insert 20
INSERT 10   # 触发右旋
wait 0.5
search 10
export avl.json
"#;
        let script = parse(text).unwrap();

        assert_eq!(script.id, "test.ops");
        assert_eq!(script.structure, Some(StructureKind::Avl));
        assert_eq!(script.len(), 7);
        assert_eq!(script.commands[0].command, ScriptCommand::Speed(2.0));
        assert_eq!(script.commands[3].line, 7);
        assert_eq!(
            script.commands[3].command,
            ScriptCommand::Action(Action::Insert(10))
        );
        assert_eq!(
            script.commands[6].command,
            ScriptCommand::Export(Some("avl.json".to_string()))
        );
        assert_eq!(script.actions().count(), 4);
    }

    #[test]
    fn test_bare_actions() {
        let script = parse("structure queue\nenqueue 1\npeek-rear\ndequeue\nclear\nexport").unwrap();
        let actions: Vec<Action> = script.actions().copied().collect();
        assert_eq!(
            actions,
            vec![Action::Enqueue(1), Action::PeekRear, Action::Dequeue, Action::Clear]
        );
        assert_eq!(script.commands[4].command, ScriptCommand::Export(None));
    }

    #[test]
    fn test_unknown_command() {
        let err = parse("insert 1\nrotate 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownCommand {
                line: 2,
                command: "rotate".to_string()
            }
        );
    }

    #[test]
    fn test_missing_and_invalid_values() {
        assert!(matches!(
            parse("push"),
            Err(ParseError::MissingParameter { line: 1, ref param, .. }) if param == "value"
        ));
        assert!(matches!(
            parse("\n\npush 12abc"),
            Err(ParseError::InvalidParameter { line: 3, ref param, .. }) if param == "value"
        ));
        assert!(matches!(parse("pop 3"), Err(ParseError::InvalidLine { line: 1, .. })));
        assert!(matches!(
            parse("speed -1"),
            Err(ParseError::InvalidParameter { ref param, .. }) if param == "factor"
        ));
        assert!(matches!(parse("speed 0"), Err(ParseError::InvalidParameter { .. })));
        assert!(matches!(parse("wait soon"), Err(ParseError::InvalidParameter { .. })));
    }

    #[test]
    fn test_wait_is_bounded() {
        assert!(matches!(
            parse("wait 1e30"),
            Err(ParseError::InvalidParameter { line: 1, ref param, .. }) if param == "seconds"
        ));
        assert!(matches!(parse("wait 3601"), Err(ParseError::InvalidParameter { .. })));
        assert_eq!(
            parse("wait 3600").unwrap().commands[0].command,
            ScriptCommand::Wait(MAX_WAIT_SECONDS)
        );
    }

    #[test]
    fn test_structure_rules() {
        assert_eq!(
            parse("insert 1\nstructure bst"),
            Err(ParseError::LateStructure { line: 2 })
        );
        assert!(matches!(
            parse("structure bst\nstructure avl"),
            Err(ParseError::InvalidLine { line: 2, .. })
        ));
        assert!(matches!(
            parse("structure graph"),
            Err(ParseError::InvalidParameter { ref param, .. }) if param == "kind"
        ));
    }

    #[test]
    fn test_lenient_collects_all_errors() {
        let mut parser = Parser::new();
        let script = parser.parse_lenient("demo", "insert 1\nfly\ninsert x\ninsert 2");

        assert_eq!(script.len(), 2);
        let lines: Vec<usize> = parser
            .errors()
            .iter()
            .map(|e| match e {
                ParseError::UnknownCommand { line, .. } | ParseError::InvalidParameter { line, .. } => *line,
                other => panic!("unexpected error: {:?}", other),
            })
            .collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn test_error_messages() {
        insta::assert_debug_snapshot!(parse("insert"), @r#"
        Err(
            MissingParameter {
                line: 1,
                command: "insert",
                param: "value",
            },
        )
        "#);
    }
}
