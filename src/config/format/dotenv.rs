//! .env 格式解析器 (简单原则：语法交给 dotenvy，这里只做错误定位)

use crate::error::{EnvError, ParseError, Result};

/// .env 格式解析器
pub struct DotenvParser;

impl DotenvParser {
    /// 解析 .env 内容，按源顺序返回键值对（保留重复键）
    ///
    /// 语法规则由 dotenvy 提供：
    /// - 忽略空行和 # 注释
    /// - 支持 `export` 前缀、单/双引号与多行值
    /// - 支持 `${VAR}` 变量替换
    ///
    /// # Errors
    ///
    /// - 内容包含 NUL 字节，或语法错误：`EnvError::Parse`
    /// - 读取失败或内容不是合法 UTF-8：`EnvError::Io`
    pub fn parse(content: &[u8]) -> Result<Vec<(String, String)>> {
        if let Some(err) = Self::find_nul(content) {
            return Err(EnvError::Parse(err));
        }

        let mut vars = Vec::new();
        for item in dotenvy::from_read_iter(content) {
            match item {
                Ok(pair) => vars.push(pair),
                Err(dotenvy::Error::LineParse(line, idx)) => {
                    return Err(EnvError::Parse(Self::locate(content, &line, idx)));
                }
                Err(dotenvy::Error::Io(err)) => {
                    return Err(EnvError::io("cannot read env content", err));
                }
                Err(other) => {
                    return Err(EnvError::io(
                        "cannot read env content",
                        std::io::Error::other(other.to_string()),
                    ));
                }
            }
        }

        Ok(vars)
    }

    /// NUL 不能出现在环境变量中，提前拒绝
    fn find_nul(content: &[u8]) -> Option<ParseError> {
        let offset = content.iter().position(|&b| b == 0)?;
        let before = &content[..offset];
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |pos| pos + 1);
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let column = String::from_utf8_lossy(&before[line_start..]).chars().count();

        Some(ParseError {
            token: Some('\0'),
            line,
            column,
        })
    }

    /// 把 dotenvy 报告的 (行内容, 字节偏移) 换算为行号与字符列
    fn locate(content: &[u8], line: &str, idx: usize) -> ParseError {
        let token = line.get(idx..).and_then(|rest| rest.chars().next());
        let column = line.get(..idx).map_or(idx, |head| head.chars().count());

        let first = line.lines().next().unwrap_or_default().trim_end();
        let text = String::from_utf8_lossy(content);
        let line_no = text
            .lines()
            .position(|l| l.trim_end() == first)
            .or_else(|| text.lines().position(|l| !first.is_empty() && l.contains(first)))
            .map_or(1, |pos| pos + 1);

        ParseError {
            token,
            line: line_no,
            column,
        }
    }
}
