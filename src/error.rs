use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::epub::EpubError;

pub type Result<T> = std::result::Result<T, VocabError>;

/// 单词提取流程的错误类型
#[derive(Error, Debug)]
pub enum VocabError {
    #[error("{0}")]
    Epub(#[from] EpubError),

    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("无效的页码范围: {0}")]
    InvalidPageRange(String),

    #[error("起始页码 {start} 超出范围（总共 {total} 个文件）")]
    PageOutOfRange { start: usize, total: usize },

    #[error("无法提取文件内容")]
    NoContent,

    #[error("未找到任何英文单词")]
    NoWords,

    #[error("配置文件错误: {0}")]
    Config(String),

    #[error("写入文件 {} 失败: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("读取单词表 {} 失败: {}", .path.display(), .source)]
    ReadList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
