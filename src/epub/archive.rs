use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use log::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::config::DecodePolicy;
use crate::epub::error::{EpubError, Result};

const EXPECTED_MIMETYPE: &str = "application/epub+zip";

/// 以只读方式打开的EPUB压缩包
///
/// 条目名称在打开时按压缩包中的原始顺序记录下来，之后的所有查询都基于这份列表。
/// 文件句柄由 `Archive` 独占，离开作用域时自动关闭（包括出错返回的路径）。
pub struct Archive<R = File> {
    archive: ZipArchive<R>,
    names: Vec<String>,
}

impl Archive<File> {
    /// 从文件路径打开EPUB压缩包
    ///
    /// # 参数
    /// * `path` - epub文件的路径
    ///
    /// # 返回值
    /// * `Result<Archive>` - 压缩包无法打开或不是zip格式时返回错误
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Archive<File>> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> Archive<R> {
    /// 从任意可读可定位的数据源打开压缩包
    pub fn from_reader(reader: R) -> Result<Archive<R>> {
        let mut archive = ZipArchive::new(reader)?;

        let mut names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            match archive.by_index(i) {
                Ok(file) => names.push(file.name().to_string()),
                Err(e) => warn!("跳过无法读取的压缩包条目 #{}: {}", i, e),
            }
        }

        let mut epub = Archive { archive, names };
        epub.check_mimetype();

        Ok(epub)
    }

    /// 检查mimetype文件
    ///
    /// 只做提示，不影响后续处理：很多单词书的打包并不规范。
    fn check_mimetype(&mut self) {
        match self.read_bytes("mimetype") {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                let content = content.trim();
                if content == EXPECTED_MIMETYPE {
                    debug!("mimetype检查通过");
                } else {
                    warn!("mimetype不是{}，找到: {}", EXPECTED_MIMETYPE, content);
                }
            }
            Err(_) => warn!("缺少mimetype文件，按普通zip压缩包继续处理"),
        }
    }

    /// 按压缩包原始顺序列出所有条目
    pub fn list_files(&self) -> &[String] {
        &self.names
    }

    /// 检查条目是否存在
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// 读取指定条目的二进制内容
    ///
    /// # 参数
    /// * `name` - 条目路径（区分大小写，使用正斜杠）
    ///
    /// # 返回值
    /// * `Result<Vec<u8>>` - 条目不存在时返回 `EpubError::MissingEntry`
    pub fn read_bytes(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Err(EpubError::MissingEntry(name.to_string())),
            Err(e) => return Err(e.into()),
        };
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// 读取指定条目并解码为文本
    ///
    /// 解码永远不会因为非法字节失败，非法字节按 `policy` 替换或丢弃。
    pub fn read_text(&mut self, name: &str, policy: DecodePolicy) -> Result<String> {
        let bytes = self.read_bytes(name)?;
        Ok(policy.decode(strip_bom(&bytes)))
    }
}

/// 去掉UTF-8 BOM
fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data)
}
