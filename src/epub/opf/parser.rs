//! OPF解析器模块
//!
//! 提供OPF（Open Packaging Format）包文件的XML解析功能。
//! 只关心清单、脊柱和书名，其余元数据一律忽略。

use crate::epub::error::{EpubError, Result};
use crate::epub::opf::{
    manifest::{ManifestItem, PackageManifest},
    spine::{SpineItem, SpineOrder},
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// OPF文件解析结果
#[derive(Debug, Clone)]
pub struct Package {
    /// 书名(dc:title)
    pub title: Option<String>,
    /// 清单
    pub manifest: PackageManifest,
    /// 脊柱(阅读顺序)
    pub spine: SpineOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Metadata,
    Manifest,
    Spine,
}

impl Package {
    /// 解析OPF文件内容
    ///
    /// 清单项的href相对于OPF文件所在目录解析。元素按本地名称匹配，
    /// 属性顺序无关；文档中途出现语法错误时保留已经解析出的内容。
    ///
    /// # 参数
    /// * `xml_content` - OPF文件的XML内容
    /// * `opf_path` - OPF文件在压缩包中的路径
    ///
    /// # 返回值
    /// * `Result<Package>` - 解析后的包信息
    pub fn parse_xml(xml_content: &str, opf_path: &str) -> Result<Package> {
        let base_dir = opf_directory(opf_path);

        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().check_end_names = false;

        let mut title: Option<String> = None;
        let mut manifest = PackageManifest::new();
        let mut spine = SpineOrder::new();

        let mut section = Section::None;
        let mut in_title = false;
        let mut title_text = String::new();

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    if manifest.is_empty() && spine.is_empty() {
                        return Err(EpubError::OpfParseError(format!("XML解析错误: {}", e)));
                    }
                    log::warn!("OPF文件在位置 {} 处格式错误，使用已解析的内容: {}", reader.buffer_position(), e);
                    break;
                }
            };

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let is_empty = matches!(event, Event::Empty(_));
                    match e.local_name().as_ref() {
                        b"metadata" if !is_empty => section = Section::Metadata,
                        b"manifest" if !is_empty => section = Section::Manifest,
                        b"spine" if !is_empty => section = Section::Spine,
                        b"title" if section == Section::Metadata && !is_empty && title.is_none() =>
                        {
                            in_title = true;
                            title_text.clear();
                        }
                        b"item" if section == Section::Manifest => {
                            if let Some(item) = Self::parse_manifest_item(e, &base_dir) {
                                manifest.insert(item);
                            }
                        }
                        b"itemref" if section == Section::Spine => {
                            if let Some(item) = Self::parse_spine_item(e) {
                                spine.push(item);
                            }
                        }
                        _ => {}
                    }
                }
                Event::Text(ref e) if in_title => match e.unescape() {
                    Ok(text) => title_text.push_str(&text),
                    Err(_) => title_text.push_str(&String::from_utf8_lossy(e)),
                },
                Event::CData(ref e) if in_title => {
                    title_text.push_str(&String::from_utf8_lossy(e));
                }
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"metadata" | b"manifest" | b"spine" => section = Section::None,
                    b"title" if in_title => {
                        in_title = false;
                        let text = title_text.trim();
                        if !text.is_empty() {
                            title = Some(text.to_string());
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Package { title, manifest, spine })
    }

    /// 解析清单项，缺少id或href时返回None
    fn parse_manifest_item(e: &BytesStart, base_dir: &str) -> Option<ManifestItem> {
        let id = attribute(e, b"id").filter(|v| !v.is_empty())?;
        let href = attribute(e, b"href").filter(|v| !v.is_empty())?;
        let media_type = attribute(e, b"media-type");
        Some(ManifestItem::new(id, href, base_dir, media_type))
    }

    /// 解析脊柱项
    fn parse_spine_item(e: &BytesStart) -> Option<SpineItem> {
        let idref = attribute(e, b"idref").filter(|v| !v.is_empty())?;
        let linear = attribute(e, b"linear").is_none_or(|v| v != "no");
        Some(SpineItem::with_linear(idref, linear))
    }

    /// 按脊柱顺序得到HTML类内容文档的路径列表
    pub fn content_paths(&self) -> Vec<String> {
        self.spine.content_paths(&self.manifest)
    }
}

/// 读取属性值（按本地名称匹配，实体解码失败时退回原始字节）
fn attribute(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .map(|attr| match attr.unescape_value() {
            Ok(value) => value.trim().to_string(),
            Err(_) => String::from_utf8_lossy(&attr.value).trim().to_string(),
        })
}

/// OPF文件所在目录（根目录时为空字符串）
fn opf_directory(opf_path: &str) -> String {
    match opf_path.rfind('/') {
        Some(pos) => opf_path[..pos].to_string(),
        None => String::new(),
    }
}
