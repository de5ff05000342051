//! 脊柱解析模块
//!
//! 沿着 container.xml → OPF → 清单 → 脊柱 这条链恢复内容文档的阅读顺序。
//! 任何一步失败都不会向调用方报错，只记录日志并返回空列表，由调用方回退到遍历压缩包。

use std::io::{Read, Seek};

use log::{debug, warn};

use crate::config::DecodePolicy;
use crate::epub::archive::Archive;
use crate::epub::container::{CONTAINER_PATH, Container};
use crate::epub::error::{EpubError, Result};
use crate::epub::opf::{Package, is_html_like};

/// 内容文件列表的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// 按OPF脊柱顺序
    Spine,
    /// 按压缩包原始顺序遍历HTML文件（不保证是阅读顺序）
    Fallback,
}

/// 有序的内容文档路径列表
#[derive(Debug, Clone)]
pub struct ContentFileList {
    pub files: Vec<String>,
    pub source: ContentSource,
    /// OPF中的书名（回退模式下可能仍然能拿到）
    pub title: Option<String>,
}

impl ContentFileList {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// 查找OPF包文件路径
///
/// 优先读取container.xml；没有container.xml或其中找不到包文件时，
/// 取压缩包中第一个以 `.opf` 结尾的条目。
pub fn locate_package<R: Read + Seek>(archive: &mut Archive<R>) -> Option<String> {
    match read_container(archive) {
        Ok(container) => {
            if let Some(path) = container.get_opf_path() {
                debug!("container.xml指向OPF文件: {}", path);
                return Some(path.to_string());
            }
            warn!("container.xml中没有OPF文件引用，改为在压缩包中查找");
        }
        Err(EpubError::MissingEntry(_)) => debug!("缺少{}，改为在压缩包中查找OPF文件", CONTAINER_PATH),
        Err(e) => warn!("无法解析{}: {}，改为在压缩包中查找OPF文件", CONTAINER_PATH, e),
    }

    archive
        .list_files()
        .iter()
        .find(|name| name.ends_with(".opf"))
        .cloned()
}

fn read_container<R: Read + Seek>(archive: &mut Archive<R>) -> Result<Container> {
    let content = archive.read_text(CONTAINER_PATH, DecodePolicy::Replace)?;
    Container::parse_xml(&content)
}

/// 定位并解析OPF包文件，失败时记录日志并返回None
pub fn resolve_package<R: Read + Seek>(archive: &mut Archive<R>) -> Option<Package> {
    let opf_path = locate_package(archive)?;

    let parsed = archive
        .read_text(&opf_path, DecodePolicy::Replace)
        .and_then(|content| Package::parse_xml(&content, &opf_path));

    match parsed {
        Ok(package) => {
            debug!(
                "OPF解析完成: {} 个清单项, {} 个脊柱项",
                package.manifest.len(),
                package.spine.len()
            );
            Some(package)
        }
        Err(e) => {
            warn!("获取EPUB结构时出错 ({}): {}", opf_path, e);
            None
        }
    }
}

/// 回退方案：按压缩包原始顺序列出所有HTML类文件（排除META-INF/）
pub fn fallback_content_files<R: Read + Seek>(archive: &Archive<R>) -> Vec<String> {
    archive
        .list_files()
        .iter()
        .filter(|name| !name.starts_with("META-INF/") && is_html_like(name))
        .cloned()
        .collect()
}

/// 得到内容文档列表：优先脊柱顺序，得不到时回退到遍历压缩包
pub fn content_files<R: Read + Seek>(archive: &mut Archive<R>) -> ContentFileList {
    let package = resolve_package(archive);
    let title = package.as_ref().and_then(|p| p.title.clone());

    let files = package.map(|p| p.content_paths()).unwrap_or_default();
    if !files.is_empty() {
        return ContentFileList { files, source: ContentSource::Spine, title };
    }

    warn!("无法获取EPUB结构，将提取所有HTML文件");
    ContentFileList {
        files: fallback_content_files(archive),
        source: ContentSource::Fallback,
        title,
    }
}
