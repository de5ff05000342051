//! 通用提取（备用方案）
//!
//! 找不到结构化词条时，去掉所有标记后按英文单词的形状切分文本。

use once_cell::sync::Lazy;
use regex::Regex;

static XML_DECLARATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<\?xml.*?\?>").unwrap());
static DOCTYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<!DOCTYPE[^>]*>").unwrap());
static STYLE_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static OTHER_ENTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[a-zA-Z0-9#]+;").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static WORD_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-zA-Z]+(?:[-'][a-zA-Z]+)*\b").unwrap());

/// 替换为字面字符的命名实体，按顺序替换
const NAMED_ENTITIES: [(&str, &str); 13] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&nbsp;", " "),
    ("&mdash;", "-"),
    ("&ndash;", "-"),
    ("&rsquo;", "'"),
    ("&lsquo;", "'"),
    ("&rdquo;", "\""),
    ("&ldquo;", "\""),
    ("&hellip;", "..."),
];

/// 清理HTML/XHTML标记和字符实体，返回单行纯文本
pub fn clean_html_content(content: &str) -> String {
    let content = XML_DECLARATION.replace_all(content, "");
    let content = DOCTYPE.replace_all(&content, "");
    let content = STYLE_BLOCK.replace_all(&content, "");
    let content = SCRIPT_BLOCK.replace_all(&content, "");
    let mut content = TAG.replace_all(&content, " ").into_owned();

    for (entity, replacement) in NAMED_ENTITIES {
        if content.contains(entity) {
            content = content.replace(entity, replacement);
        }
    }

    let content = OTHER_ENTITY.replace_all(&content, " ");
    let content = WHITESPACE.replace_all(&content, " ");

    content.trim().to_string()
}

/// 按英文单词形状切分：字母串，中间可以用单个连字符或撇号连接
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}
