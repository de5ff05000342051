use crate::epub::error::{EpubError, Result};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// 容器描述文件的固定路径
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

const PACKAGE_MEDIA_TYPE: &str = "application/oebps-package+xml";

/// container.xml中的rootfile信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootFile {
    pub full_path: String,
    /// 缺失media-type属性时为空字符串
    pub media_type: String,
}

impl RootFile {
    fn is_opf(&self) -> bool {
        self.full_path.to_ascii_lowercase().ends_with(".opf")
    }
}

/// container.xml的解析结果
#[derive(Debug, Clone)]
pub struct Container {
    pub rootfiles: Vec<RootFile>,
}

impl Container {
    /// 解析container.xml内容
    ///
    /// 按元素本地名称查找 `rootfile`，忽略命名空间前缀和属性顺序。
    /// 不检查结束标签是否匹配，遇到语法错误时保留已经解析出的条目。
    ///
    /// # 参数
    /// * `xml_content` - container.xml的文件内容
    ///
    /// # 返回值
    /// * `Result<Container>` - 一个rootfile都没有找到时返回错误
    pub fn parse_xml(xml_content: &str) -> Result<Container> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().check_end_names = false;

        let mut rootfiles = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                    if e.local_name().as_ref() == b"rootfile" =>
                {
                    let mut full_path = String::new();
                    let mut media_type = String::new();

                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).trim().to_string();
                        match attr.key.local_name().as_ref() {
                            b"full-path" => full_path = value,
                            b"media-type" => media_type = value,
                            _ => {}
                        }
                    }

                    if !full_path.is_empty() {
                        rootfiles.push(RootFile { full_path, media_type });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    if rootfiles.is_empty() {
                        return Err(e.into());
                    }
                    log::warn!("container.xml在位置 {} 处格式错误，使用已解析的条目", reader.buffer_position());
                    break;
                }
                _ => {}
            }
        }

        if rootfiles.is_empty() {
            return Err(EpubError::ContainerParseError("没有找到任何rootfile条目".to_string()));
        }

        Ok(Container { rootfiles })
    }

    /// 获取包文件（OPF）的路径
    ///
    /// 只考虑路径以 `.opf` 结尾的条目，其中优先选择media-type为包文件类型的。
    pub fn get_opf_path(&self) -> Option<&str> {
        let opf_files: Vec<&RootFile> = self.rootfiles.iter().filter(|rf| rf.is_opf()).collect();

        opf_files
            .iter()
            .copied()
            .find(|rf| rf.media_type == PACKAGE_MEDIA_TYPE)
            .or_else(|| opf_files.first().copied())
            .map(|rf| rf.full_path.as_str())
    }
}
