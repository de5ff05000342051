//! 单词提取模块
//!
//! 两级提取：先尝试识别单词书的结构化词条，只要识别出至少一个词条就只用这部分结果；
//! 一个都没有时才退回到去掉标记后的通用切分。

pub mod structured;
pub mod fallback;
pub mod filter;

pub use structured::{EntryShape, VocabularyEntry, extract_vocabulary_entries};
pub use fallback::{clean_html_content, tokenize};
pub use filter::filter_words;

use log::debug;

use crate::config::ExtractorConfig;

/// 产生结果的提取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionTier {
    /// 结构化词条
    Structured,
    /// 通用切分
    Generic,
}

/// 单词提取结果
#[derive(Debug, Clone)]
pub struct WordExtraction {
    /// 去重后的单词表
    pub words: Vec<String>,
    pub tier: ExtractionTier,
    /// 过滤前的原始匹配数
    pub raw_count: usize,
}

/// 单词提取器
#[derive(Debug, Clone, Default)]
pub struct WordExtractor {
    config: ExtractorConfig,
}

impl WordExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// 从拼接后的标记文本中提取单词
    pub fn extract(&self, content: &str) -> WordExtraction {
        let entries = extract_vocabulary_entries(content, &self.config.vocabulary);
        if !entries.is_empty() {
            debug!("识别出 {} 个结构化词条", entries.len());
            return WordExtraction {
                words: filter_words(entries.iter().map(|e| e.text.as_str()), &self.config.filter),
                tier: ExtractionTier::Structured,
                raw_count: entries.len(),
            };
        }

        debug!("未找到结构化词条，使用通用提取");
        let cleaned = clean_html_content(content);
        let tokens = tokenize(&cleaned);
        WordExtraction {
            raw_count: tokens.len(),
            words: filter_words(tokens, &self.config.filter),
            tier: ExtractionTier::Generic,
        }
    }
}

/// 使用默认配置提取单词
pub fn extract_words(content: &str) -> Vec<String> {
    WordExtractor::default().extract(content).words
}
