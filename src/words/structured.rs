//! 结构化词条提取
//!
//! 识别单词书排版中两种常见的词条段落：
//!
//! * 单词词条：`<p class="bodytext">abandon <span class="yinbiao">/əˈbændən/</span> v. 放弃</p>`
//! * 搭配词条：`<p class="bodytext"><span class="text-title1">搭配</span> give up 放弃</p>`
//!
//! class名称的匹配不区分大小写，提取出的文本保持原样。
//!
//! 内容文档是XHTML，而scraper按HTML5规则解析：`<title/>`、`<script src=".."/>`
//! 这类自闭合写法会被当成开始标签，吞掉后面的所有内容。解析前先把非空元素的
//! 自闭合写法展开成成对的标签。

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use scraper::{ElementRef, Html};
use scraper::node::Node;

use crate::config::VocabularyConfig;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+(?:[-'][A-Za-z]+)*$").unwrap());

static PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z]+(?:\s+[A-Za-z]+|\s*[-'][A-Za-z]+)*)").unwrap());

static SELF_CLOSING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([A-Za-z][A-Za-z0-9:_-]*)((?:\s[^<>]*?)?)\s*/>").unwrap());

/// HTML中本来就没有结束标签的元素
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// 词条形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryShape {
    /// 单词后紧跟音标
    Pronunciation,
    /// 搭配标签后跟短语和释义
    Collocation,
}

/// 一个识别出的词条
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub text: String,
    pub shape: EntryShape,
}

/// 按文档顺序提取所有结构化词条
pub fn extract_vocabulary_entries(html: &str, config: &VocabularyConfig) -> Vec<VocabularyEntry> {
    let html = expand_self_closing(html);
    let document = Html::parse_document(&html);
    let mut entries = Vec::new();

    for node in document.root_element().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if element.value().name() != "p" || !has_class(element, &config.body_class) {
            continue;
        }

        if let Some(text) = match_pronunciation_entry(element, config) {
            entries.push(VocabularyEntry { text, shape: EntryShape::Pronunciation });
        } else if let Some(text) = match_collocation_entry(element, config) {
            entries.push(VocabularyEntry { text, shape: EntryShape::Collocation });
        }
    }

    entries
}

/// 段落以单词开头，后面紧跟音标span
fn match_pronunciation_entry(paragraph: ElementRef, config: &VocabularyConfig) -> Option<String> {
    let mut children = paragraph
        .children()
        .filter(|node| !is_skippable(node.value(), node.has_children()));

    let word = children.next()?.value().as_text()?.trim();
    if !WORD.is_match(word) {
        return None;
    }

    let span = ElementRef::wrap(children.next()?)?;
    let is_pronunciation =
        span.value().name() == "span" && has_class(span, &config.pronunciation_class);
    is_pronunciation.then(|| word.to_string())
}

/// 段落以搭配标签span开头，后面是短语，短语之后紧接释义文字
fn match_collocation_entry(paragraph: ElementRef, config: &VocabularyConfig) -> Option<String> {
    let mut children = paragraph
        .children()
        .filter(|node| !is_skippable(node.value(), node.has_children()))
        .skip_while(|node| node.value().as_text().is_some_and(|t| t.trim().is_empty()));

    let label = ElementRef::wrap(children.next()?)?;
    if label.value().name() != "span" || !has_class(label, &config.label_class) {
        return None;
    }

    let rest: String = children
        .map(|node| match node.value() {
            Node::Text(text) => String::from(&**text),
            Node::Element(_) => ElementRef::wrap(node)
                .map(|e| e.text().collect::<String>())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .collect();

    let phrase = PHRASE.captures(&rest)?.get(1)?;
    let cue = rest[phrase.end()..].trim_start().chars().next()?;

    config.is_translation_char(cue).then(|| phrase.as_str().to_string())
}

/// 把 `<title/>`、`<a id="p1"/>` 这类非空元素的自闭合写法展开为 `<title></title>`
fn expand_self_closing(html: &str) -> Cow<'_, str> {
    SELF_CLOSING.replace_all(html, |caps: &Captures| {
        let name = &caps[1];
        if VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(name)) {
            caps[0].to_string()
        } else {
            format!("<{}{}></{}>", name, &caps[2], name)
        }
    })
}

/// 注释和空的页码锚点不参与词条匹配
fn is_skippable(node: &Node, has_children: bool) -> bool {
    match node {
        Node::Comment(_) => true,
        Node::Element(element) => element.name() == "a" && !has_children,
        _ => false,
    }
}

fn has_class(element: ElementRef, class: &str) -> bool {
    element
        .value()
        .attr("class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslationScript;

    fn texts(entries: &[VocabularyEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_pronunciation_entries() {
        let html = r#"<html><body>
<p class="bodytext">abandon <span class="yinbiao">/əˈbændən/</span> v. 放弃</p>
<p class="bodytext">well-known<span class="yinbiao">/ˌwel ˈnəʊn/</span> adj. 著名的</p>
<p class="bodytext">not an entry</p>
<p class="note">ability <span class="yinbiao">/əˈbɪləti/</span></p>
</body></html>"#;

        let entries = extract_vocabulary_entries(html, &VocabularyConfig::default());
        assert_eq!(texts(&entries), vec!["abandon", "well-known"]);
        assert!(entries.iter().all(|e| e.shape == EntryShape::Pronunciation));
    }

    #[test]
    fn test_collocation_entries() {
        let html = r#"<p class="bodytext"><span class="text-title1">搭配</span> give up 放弃</p>
<p class="bodytext"><span class="text-title1">搭配</span> look
  forward to <b>期待</b></p>
<p class="bodytext"><span class="text-title1">搭配</span> no translation here</p>"#;

        let entries = extract_vocabulary_entries(html, &VocabularyConfig::default());
        assert_eq!(texts(&entries), vec!["give up", "look\n  forward to"]);
        assert!(entries.iter().all(|e| e.shape == EntryShape::Collocation));
    }

    #[test]
    fn test_expand_self_closing() {
        assert_eq!(expand_self_closing("<title/>"), "<title></title>");
        assert_eq!(
            expand_self_closing(r#"<script type="text/javascript" src="js/a.js" />"#),
            r#"<script type="text/javascript" src="js/a.js"></script>"#
        );
        assert_eq!(expand_self_closing(r#"<a id="p12"/>"#), r#"<a id="p12"></a>"#);
        assert_eq!(
            expand_self_closing(r#"<br/><link href="a/b.css" rel="stylesheet"/>"#),
            r#"<br/><link href="a/b.css" rel="stylesheet"/>"#
        );
        assert_eq!(expand_self_closing("<p>no change</p>"), "<p>no change</p>");
    }

    #[test]
    fn test_self_closing_title_does_not_hide_entries() {
        let html = r#"<head><title/></head><body>
<p class="bodytext">abandon <span class="yinbiao">/a/</span> v. 放弃</p>
<p>Some surrounding prose here</p></body>"#;

        let entries = extract_vocabulary_entries(html, &VocabularyConfig::default());
        assert_eq!(texts(&entries), vec!["abandon"]);
    }

    #[test]
    fn test_xhtml_content_document() {
        let html = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="zh-CN">
<head>
  <title/>
  <link href="../Styles/stylesheet.css" rel="stylesheet" type="text/css"/>
</head>
<body>
<a id="page_12"/>
<p class="bodytext"><a id="w1"/>abandon <span class="yinbiao">/əˈbændən/</span> v. 放弃<a id="w1end"/></p>
<p class="bodytext">ability<a id="w2"/><span class="yinbiao">/əˈbɪləti/</span> n. 能力</p>
<p class="bodytext"><span class="text-title1">搭配</span><a id="c1"/> give up 放弃</p>
<p class="example">She would never abandon her friends.</p>
</body>
</html>"#;

        let entries = extract_vocabulary_entries(html, &VocabularyConfig::default());
        assert_eq!(texts(&entries), vec!["abandon", "ability", "give up"]);
        assert_eq!(entries[2].shape, EntryShape::Collocation);
    }

    #[test]
    fn test_self_closing_script_in_first_of_joined_documents() {
        let first = r#"<?xml version="1.0" encoding="utf-8"?>
<html xmlns="http://www.w3.org/1999/xhtml"><head><title>Unit 1</title>
<script type="text/javascript" src="../Misc/page.js"/></head>
<body><p class="bodytext">abandon <span class="yinbiao">/əˈbændən/</span> v. 放弃</p></body></html>"#;
        let second = r#"<?xml version="1.0" encoding="utf-8"?>
<html xmlns="http://www.w3.org/1999/xhtml"><head><title/></head>
<body><p class="bodytext">ability <span class="yinbiao">/əˈbɪləti/</span> n. 能力</p></body></html>"#;
        let joined = format!("{}\n{}\n", first, second);

        let entries = extract_vocabulary_entries(&joined, &VocabularyConfig::default());
        assert_eq!(texts(&entries), vec!["abandon", "ability"]);
    }

    #[test]
    fn test_class_matching_ignores_case() {
        let html = r#"<P CLASS="BodyText">Cabin <SPAN class="YinBiao">/ˈkæbɪn/</SPAN> n. 小屋</P>"#;

        let entries = extract_vocabulary_entries(html, &VocabularyConfig::default());
        assert_eq!(texts(&entries), vec!["Cabin"]);
    }

    #[test]
    fn test_entries_keep_document_order() {
        let html = r#"<p class="bodytext"><span class="text-title1">搭配</span> carry out 执行</p>
<p class="bodytext">carry <span class="yinbiao">/ˈkæri/</span> v. 携带</p>"#;

        let entries = extract_vocabulary_entries(html, &VocabularyConfig::default());
        assert_eq!(texts(&entries), vec!["carry out", "carry"]);
    }

    #[test]
    fn test_configurable_translation_script() {
        let html = r#"<p class="bodytext"><span class="text-title1">表現</span> give up あきらめる</p>"#;

        let cjk_only = VocabularyConfig::default();
        assert!(extract_vocabulary_entries(html, &cjk_only).is_empty());

        let kana = VocabularyConfig {
            translation_scripts: vec![TranslationScript::Kana],
            ..VocabularyConfig::default()
        };
        assert_eq!(texts(&extract_vocabulary_entries(html, &kana)), vec!["give up"]);
    }

    #[test]
    fn test_configurable_class_names() {
        let html = r#"<p class="entry">zeal <span class="ipa">/ziːl/</span></p>"#;
        let config = VocabularyConfig {
            body_class: "entry".to_string(),
            pronunciation_class: "ipa".to_string(),
            ..VocabularyConfig::default()
        };

        assert_eq!(texts(&extract_vocabulary_entries(html, &config)), vec!["zeal"]);
        assert!(extract_vocabulary_entries(html, &VocabularyConfig::default()).is_empty());
    }
}
