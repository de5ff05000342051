pub mod error;
pub mod archive;
pub mod container;
pub mod opf;
pub mod resolver;
pub mod content;

// 重新导出错误处理
pub use error::{EpubError, Result};

// 重新导出压缩包读取器
pub use archive::Archive;

// 重新导出容器相关
pub use container::{Container, RootFile, CONTAINER_PATH};

// 重新导出OPF相关
pub use opf::{
    Package,
    PackageManifest,
    ManifestItem,
    SpineOrder,
    SpineItem,
};

// 重新导出脊柱解析和内容提取
pub use resolver::{ContentFileList, ContentSource, content_files, fallback_content_files};
pub use content::{ExtractedContent, extract_content};
