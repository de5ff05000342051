//! 内容提取模块
//!
//! 按给定顺序读取内容文档并拼接成一段文本。

use std::io::{Read, Seek};

use log::warn;

use crate::config::DecodePolicy;
use crate::epub::archive::Archive;

/// 拼接后的内容及处理记录
#[derive(Debug, Clone, Default)]
pub struct ExtractedContent {
    /// 每个文件的内容后跟一个换行符
    pub text: String,
    /// 读取失败而跳过的文件
    pub skipped: Vec<String>,
}

impl ExtractedContent {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// 读取并拼接内容文档
///
/// 压缩包中不存在或无法读取的文件记录警告后跳过，不会中断整个提取过程。
///
/// # 参数
/// * `archive` - 已打开的压缩包
/// * `files` - 要读取的文件路径（已按阅读顺序排好）
/// * `policy` - 遇到非法字节时的处理方式
pub fn extract_content<R: Read + Seek>(
    archive: &mut Archive<R>,
    files: &[String],
    policy: DecodePolicy,
) -> ExtractedContent {
    let mut content = ExtractedContent::default();

    for file in files {
        match archive.read_text(file, policy) {
            Ok(text) => {
                content.text.push_str(&text);
                content.text.push('\n');
            }
            Err(e) => {
                warn!("跳过文件 {}: {}", file, e);
                content.skipped.push(file.clone());
            }
        }
    }

    content
}
