//! 提取配置模块
//!
//! 提供单词提取相关的配置管理功能，支持从YAML文件加载配置。
//! 配置文件中缺失的字段使用默认值。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VocabError};

/// 默认的停用词表
pub const DEFAULT_STOP_WORDS: [&str; 9] =
    ["www", "http", "https", "com", "org", "net", "html", "css", "js"];

/// 完整的提取配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// 结构化词汇条目的识别规则
    pub vocabulary: VocabularyConfig,
    /// 单词过滤规则
    pub filter: FilterConfig,
    /// 文本解码规则
    pub decoding: DecodingConfig,
}

/// 词汇条目识别规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// 正文段落的class
    pub body_class: String,
    /// 音标span的class
    pub pronunciation_class: String,
    /// 搭配/短语标签span的class
    pub label_class: String,
    /// 视为释义开始的文字类别
    pub translation_scripts: Vec<TranslationScript>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            body_class: "bodytext".to_string(),
            pronunciation_class: "yinbiao".to_string(),
            label_class: "text-title1".to_string(),
            translation_scripts: vec![TranslationScript::Cjk],
        }
    }
}

impl VocabularyConfig {
    /// 判断字符是否标志着释义的开始
    pub fn is_translation_char(&self, c: char) -> bool {
        self.translation_scripts.iter().any(|script| script.contains(c))
    }
}

/// 释义所用的文字类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationScript {
    /// CJK统一汉字 (U+4E00..=U+9FFF)
    Cjk,
    /// 日文平假名和片假名 (U+3040..=U+30FF)
    Kana,
    /// 韩文音节 (U+AC00..=U+D7AF)
    Hangul,
    /// 任何非拉丁字母
    NonLatin,
}

impl TranslationScript {
    pub fn contains(self, c: char) -> bool {
        match self {
            TranslationScript::Cjk => ('\u{4E00}'..='\u{9FFF}').contains(&c),
            TranslationScript::Kana => ('\u{3040}'..='\u{30FF}').contains(&c),
            TranslationScript::Hangul => ('\u{AC00}'..='\u{D7AF}').contains(&c),
            // 基本拉丁和拉丁扩展A/B之外的字母
            TranslationScript::NonLatin => c.is_alphabetic() && c > '\u{024F}',
        }
    }
}

/// 单词过滤规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// 最短单词长度（按字符计）
    pub min_length: usize,
    /// 停用词（小写）
    pub stop_words: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_length: 2,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// 文本解码规则
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodingConfig {
    pub on_invalid: DecodePolicy,
}

/// 遇到非法UTF-8字节序列时的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// 替换为U+FFFD
    #[default]
    Replace,
    /// 直接丢弃
    Drop,
}

impl DecodePolicy {
    /// 按策略解码字节，永远不会失败
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            DecodePolicy::Replace => String::from_utf8_lossy(bytes).into_owned(),
            DecodePolicy::Drop => {
                let mut text = String::with_capacity(bytes.len());
                for chunk in bytes.utf8_chunks() {
                    text.push_str(chunk.valid());
                }
                text
            }
        }
    }
}

impl ExtractorConfig {
    /// 从YAML配置文件加载
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    /// * `Result<Self>` - 文件无法读取或格式错误时返回 `VocabError::Config`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| VocabError::Config(format!("无法读取配置文件 {}: {}", path.display(), e)))?;

        Self::from_yaml(&content)
    }

    /// 从YAML字符串解析
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yml::from_str(content).map_err(|e| VocabError::Config(format!("配置文件格式错误: {}", e)))
    }

    /// 生成带注释的默认配置文件
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let yaml_content = serde_yml::to_string(&Self::default())
            .map_err(|e| VocabError::Config(format!("序列化配置失败: {}", e)))?;

        let content_with_header = format!(
            "# vocabforge 提取配置文件\n\
             # vocabulary: 单词书中词条的class名称，translation_scripts可选 cjk / kana / hangul / non_latin\n\
             # filter: 最短单词长度和停用词\n\
             # decoding.on_invalid: 遇到非法字节时 replace(替换) 或 drop(丢弃)\n\n{}",
            yaml_content
        );

        fs::write(path.as_ref(), content_with_header)
            .map_err(|e| VocabError::Config(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractorConfig::default();
        assert_eq!(config.vocabulary.body_class, "bodytext");
        assert_eq!(config.vocabulary.translation_scripts, vec![TranslationScript::Cjk]);
        assert_eq!(config.filter.min_length, 2);
        assert_eq!(config.filter.stop_words.len(), 9);
        assert_eq!(config.decoding.on_invalid, DecodePolicy::Replace);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "vocabulary:\n  translation_scripts: [kana, hangul]\ndecoding:\n  on_invalid: drop\n";
        let config = ExtractorConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.vocabulary.pronunciation_class, "yinbiao");
        assert_eq!(
            config.vocabulary.translation_scripts,
            vec![TranslationScript::Kana, TranslationScript::Hangul]
        );
        assert_eq!(config.decoding.on_invalid, DecodePolicy::Drop);
        assert_eq!(config.filter, FilterConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let result = ExtractorConfig::from_yaml("decoding:\n  on_invalid: explode\n");
        assert!(matches!(result, Err(VocabError::Config(_))));
    }

    #[test]
    fn test_generate_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocabforge.yaml");

        ExtractorConfig::generate_default_config(&path).unwrap();
        let config = ExtractorConfig::from_file(&path).unwrap();
        assert_eq!(config, ExtractorConfig::default());
    }

    #[test]
    fn test_translation_scripts() {
        assert!(TranslationScript::Cjk.contains('词'));
        assert!(!TranslationScript::Cjk.contains('a'));
        assert!(TranslationScript::Kana.contains('の'));
        assert!(TranslationScript::Hangul.contains('한'));
        assert!(TranslationScript::NonLatin.contains('ж'));
        assert!(!TranslationScript::NonLatin.contains('é'));
        assert!(!TranslationScript::NonLatin.contains('-'));
    }

    #[test]
    fn test_decode_policy() {
        assert_eq!(DecodePolicy::Replace.decode(b"ab\xFFc"), "ab\u{FFFD}c");
        assert_eq!(DecodePolicy::Drop.decode(b"ab\xFFc"), "abc");
    }
}
