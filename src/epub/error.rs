use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EpubError>;

/// EPUB结构相关的错误类型
///
/// 这些错误大多在库内部被恢复（回退到遍历压缩包），
/// 只有打开压缩包本身失败时才会传递给调用方。
#[derive(Error, Debug)]
pub enum EpubError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("Zip文件错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML解析错误: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("container.xml解析错误: {0}")]
    ContainerParseError(String),

    #[error("OPF文件解析错误: {0}")]
    OpfParseError(String),

    #[error("压缩包中不存在文件: {0}")]
    MissingEntry(String),
}
