//! 清单模块
//!
//! 提供EPUB包中文件清单的结构定义，以及把href解析为压缩包内路径的规则。

use std::collections::HashMap;

/// 清单项信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    /// 项目ID
    pub id: String,
    /// 原始href（相对于OPF文件）
    pub href: String,
    /// 解析后的压缩包内路径
    pub path: String,
    /// 媒体类型（可能缺失）
    pub media_type: Option<String>,
}

impl ManifestItem {
    /// 创建清单项，`href` 相对于 `base_dir` 解析
    pub fn new(id: String, href: String, base_dir: &str, media_type: Option<String>) -> Self {
        let path = resolve_href(base_dir, &href);
        Self { id, href, path, media_type }
    }

    /// 是否为HTML类内容文档（按扩展名判断，不区分大小写）
    pub fn is_html_like(&self) -> bool {
        is_html_like(&self.path)
    }
}

/// 包清单：item-id 到清单项的映射，构建后不再修改
#[derive(Debug, Clone, Default)]
pub struct PackageManifest {
    items: HashMap<String, ManifestItem>,
}

impl PackageManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加清单项，重复的ID保留第一次出现的项
    pub(crate) fn insert(&mut self, item: ManifestItem) {
        self.items.entry(item.id.clone()).or_insert(item);
    }

    pub fn get(&self, id: &str) -> Option<&ManifestItem> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 判断路径是否以 `.html`、`.xhtml` 或 `.htm` 结尾（不区分大小写）
pub fn is_html_like(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".html") || lower.ends_with(".xhtml") || lower.ends_with(".htm")
}

/// 把href解析为压缩包内的规范路径
///
/// 反斜杠统一为正斜杠，去掉 `#片段`，并折叠 `.` 和 `..` 路径段。
/// 超出压缩包根目录的 `..` 直接丢弃。
pub fn resolve_href(base_dir: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or_default().replace('\\', "/");

    let joined = if href.starts_with('/') || base_dir.is_empty() {
        href
    } else {
        format!("{}/{}", base_dir.replace('\\', "/"), href)
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}
