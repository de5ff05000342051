//! 页码范围模块
//!
//! 这里的"页"指内容文档列表中的文件，从1开始编号，范围两端都包含在内。

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VocabError};

/// 页码范围，两端都可省略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRange {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl PageRange {
    /// 覆盖全部文件的范围
    pub fn full() -> Self {
        Self::default()
    }

    /// 创建范围，两端都给出时要求 start <= end
    pub fn new(start: Option<usize>, end: Option<usize>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(VocabError::InvalidPageRange(format!(
                    "起始页码不能大于结束页码 ({}-{})",
                    s, e
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// 解析页码范围字符串
    ///
    /// 支持的格式: `"5"`、`"5-10"`、`"5-"`、`"-10"`。空字符串表示全部文件。
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::full());
        }

        match input.split_once('-') {
            None => {
                let page = parse_bound(input, input)?;
                Self::new(Some(page), Some(page))
            }
            Some((start, end)) => {
                let start = start.trim();
                let end = end.trim();
                let start = (!start.is_empty()).then(|| parse_bound(start, input)).transpose()?;
                let end = (!end.is_empty()).then(|| parse_bound(end, input)).transpose()?;
                Self::new(start, end)
            }
        }
    }

    pub fn is_full(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// 把范围映射到长度为 `total` 的列表上，返回从1开始的闭区间
    ///
    /// 起始页码缺省为1（0按1处理），结束页码缺省或超出时截断为 `total`。
    /// 起始页码超过 `total` 时返回 `VocabError::PageOutOfRange`。
    /// 返回的结束位置可能小于起始位置，表示选中的文件为空。
    pub fn resolve(&self, total: usize) -> Result<(usize, usize)> {
        let start = self.start.unwrap_or(1).max(1);
        if start > total {
            return Err(VocabError::PageOutOfRange { start, total });
        }
        let end = self.end.unwrap_or(total).min(total);
        Ok((start, end))
    }

    /// 从列表中选出范围内的元素
    pub fn select<'a, T>(&self, items: &'a [T]) -> Result<&'a [T]> {
        let (start, end) = self.resolve(items.len())?;
        if end < start {
            return Ok(&[]);
        }
        Ok(&items[start - 1..end])
    }
}

fn parse_bound(bound: &str, input: &str) -> Result<usize> {
    bound
        .parse::<usize>()
        .map_err(|_| VocabError::InvalidPageRange(input.to_string()))
}

impl FromStr for PageRange {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(s), Some(e)) if s == e => write!(f, "第 {} 个文件", s),
            (Some(s), Some(e)) => write!(f, "第 {} 到第 {} 个文件", s, e),
            (Some(s), None) => write!(f, "从第 {} 个文件开始到结束", s),
            (None, Some(e)) => write!(f, "从开始到第 {} 个文件", e),
            (None, None) => write!(f, "全部文件"),
        }
    }
}
