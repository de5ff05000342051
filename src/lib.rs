pub mod config;
pub mod epub;
pub mod error;
pub mod range;
pub mod wordlist;
pub mod words;

use std::path::Path;

// === 核心API重新导出 ===

/// 错误处理
pub use error::{Result, VocabError};

/// EPUB压缩包与结构解析
pub use epub::{Archive, ContentFileList, ContentSource, EpubError, ExtractedContent, Package};

/// 配置
pub use config::{DecodePolicy, ExtractorConfig, FilterConfig, TranslationScript, VocabularyConfig};

/// 页码范围
pub use range::PageRange;

/// 单词提取
pub use words::{ExtractionTier, WordExtraction, WordExtractor, extract_words};

/// 单词表读写
pub use wordlist::{
    common_words, default_output_path, find_common_words, read_word_list, write_word_list,
};

// === 库信息 ===

/// 版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 描述
pub const DESCRIPTION: &str = "从EPUB单词书中提取英文单词的工具库";

/// 选中范围内单个文件的处理情况
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// 在内容文件列表中的位置（从1开始）
    pub position: usize,
    pub path: String,
    /// 是否读取成功
    pub read: bool,
}

/// 一次提取的完整结果
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// 书名
    pub title: Option<String>,
    /// 内容文件列表的来源
    pub source: ContentSource,
    /// 内容文件总数
    pub total_files: usize,
    /// 选中的文件
    pub files: Vec<FileStatus>,
    /// 拼接后内容的字符数
    pub content_length: usize,
    pub extraction: WordExtraction,
}

impl ExtractionReport {
    pub fn words(&self) -> &[String] {
        &self.extraction.words
    }
}

/// 打开EPUB文件
pub fn open<P: AsRef<Path>>(path: P) -> Result<Archive> {
    Ok(Archive::open(path)?)
}

/// 列出EPUB的内容文件（脊柱顺序，失败时回退到压缩包顺序）
pub fn list_content_files<P: AsRef<Path>>(path: P) -> Result<ContentFileList> {
    let mut archive = open(path)?;
    Ok(epub::content_files(&mut archive))
}

/// 从EPUB文件的指定范围提取单词
///
/// 依次执行：解析阅读顺序 → 按页码范围选择文件 → 拼接内容 → 两级单词提取。
///
/// # 参数
/// * `path` - EPUB文件路径
/// * `range` - 页码范围
/// * `config` - 提取配置
///
/// # 返回值
/// * `Result<ExtractionReport>` - 起始页码超出范围、没有可用内容或没有找到单词时返回错误
pub fn extract_epub_words<P: AsRef<Path>>(
    path: P,
    range: &PageRange,
    config: &ExtractorConfig,
) -> Result<ExtractionReport> {
    let mut archive = open(path)?;
    let list = epub::content_files(&mut archive);
    if list.is_empty() {
        return Err(VocabError::NoContent);
    }

    let (start, _) = range.resolve(list.len())?;
    let selected = range.select(&list.files)?;

    let content = epub::extract_content(&mut archive, selected, config.decoding.on_invalid);
    drop(archive);

    if content.is_empty() {
        return Err(VocabError::NoContent);
    }

    let files = selected
        .iter()
        .enumerate()
        .map(|(i, path)| FileStatus {
            position: start + i,
            path: path.clone(),
            read: !content.skipped.contains(path),
        })
        .collect();

    let extraction = WordExtractor::new(config.clone()).extract(&content.text);
    if extraction.words.is_empty() {
        return Err(VocabError::NoWords);
    }

    Ok(ExtractionReport {
        title: list.title,
        source: list.source,
        total_files: list.files.len(),
        files,
        content_length: content.text.chars().count(),
        extraction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    const CONTAINER: &str = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
    <rootfiles>
        <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
    </rootfiles>
</container>"#;

    const OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="2.0" xmlns="http://www.idpf.org/2007/opf">
    <metadata xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>四级词汇</dc:title></metadata>
    <manifest>
        <item id="intro" href="Text/intro.xhtml" media-type="application/xhtml+xml"/>
        <item id="u1" href="Text/unit1.xhtml" media-type="application/xhtml+xml"/>
        <item id="u2" href="Text/unit2.xhtml" media-type="application/xhtml+xml"/>
    </manifest>
    <spine>
        <itemref idref="intro"/>
        <itemref idref="u1"/>
        <itemref idref="u2"/>
    </spine>
</package>"#;

    const INTRO: &str = r#"<html><body><p>How to use this book wisely</p></body></html>"#;

    const UNIT1: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">
<html xmlns="http://www.w3.org/1999/xhtml"><head><title/>
<script type="text/javascript" src="../Misc/page.js"/></head><body>
<p class="bodytext">abandon <span class="yinbiao">/əˈbændən/</span> v. 放弃</p>
<p class="bodytext"><span class="text-title1">搭配</span> give up 放弃</p>
</body></html>"#;

    const UNIT2: &str = r#"<html><body>
<p class="bodytext">ability <span class="yinbiao">/əˈbɪləti/</span> n. 能力</p>
<p class="bodytext">abandon <span class="yinbiao">/əˈbændən/</span> v. 放弃</p>
</body></html>"#;

    /// 在临时目录中创建测试用的EPUB文件
    fn create_test_epub(dir: &Path) -> PathBuf {
        let path = dir.join("words.epub");
        let file = File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);

        let entries = [
            ("mimetype", "application/epub+zip"),
            ("META-INF/container.xml", CONTAINER),
            ("OEBPS/content.opf", OPF),
            ("OEBPS/Text/unit2.xhtml", UNIT2),
            ("OEBPS/Text/unit1.xhtml", UNIT1),
            ("OEBPS/Text/intro.xhtml", INTRO),
        ];
        for (name, content) in entries {
            zip.start_file(name, FileOptions::<()>::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();

        path
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!DESCRIPTION.is_empty());
    }

    #[test]
    fn test_list_content_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_test_epub(dir.path());

        let list = list_content_files(&path).unwrap();
        assert_eq!(list.source, ContentSource::Spine);
        assert_eq!(list.title.as_deref(), Some("四级词汇"));
        assert_eq!(
            list.files,
            vec!["OEBPS/Text/intro.xhtml", "OEBPS/Text/unit1.xhtml", "OEBPS/Text/unit2.xhtml"]
        );
    }

    #[test]
    fn test_extract_whole_book() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_test_epub(dir.path());

        let report =
            extract_epub_words(&path, &PageRange::full(), &ExtractorConfig::default()).unwrap();
        assert_eq!(report.total_files, 3);
        assert_eq!(report.files.len(), 3);
        assert!(report.files.iter().all(|f| f.read));
        assert_eq!(report.extraction.tier, ExtractionTier::Structured);
        assert_eq!(report.extraction.raw_count, 4);
        assert_eq!(report.words(), ["abandon", "give up", "ability"]);
    }

    #[test]
    fn test_extract_page_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_test_epub(dir.path());

        let range = PageRange::parse("3-").unwrap();
        let report = extract_epub_words(&path, &range, &ExtractorConfig::default()).unwrap();
        assert_eq!(report.files[0].position, 3);
        assert_eq!(report.words(), ["ability", "abandon"]);

        let range = PageRange::parse("1").unwrap();
        let report = extract_epub_words(&path, &range, &ExtractorConfig::default()).unwrap();
        assert_eq!(report.extraction.tier, ExtractionTier::Generic);
        assert_eq!(report.words(), ["how", "to", "use", "this", "book", "wisely"]);
    }

    #[test]
    fn test_page_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_test_epub(dir.path());

        let range = PageRange::parse("4-").unwrap();
        let result = extract_epub_words(&path, &range, &ExtractorConfig::default());
        assert!(matches!(result, Err(VocabError::PageOutOfRange { start: 4, total: 3 })));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_epub_words(
            dir.path().join("none.epub"),
            &PageRange::full(),
            &ExtractorConfig::default(),
        );
        assert!(matches!(result, Err(VocabError::Epub(EpubError::Io(_)))));
    }
}
