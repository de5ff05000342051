//! 单词过滤与去重
//!
//! 两种提取方式得到的原始结果都经过同一套处理：转小写、去掉过短的、
//! 含数字的和停用词，最后按首次出现的顺序去重。

use std::collections::HashSet;

use crate::config::FilterConfig;

/// 过滤并去重，保持首次出现的顺序
pub fn filter_words<I, S>(tokens: I, config: &FilterConfig) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stop_words: HashSet<String> = config.stop_words.iter().map(|w| w.to_lowercase()).collect();
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for token in tokens {
        // 短语中的换行和连续空白折叠为单个空格
        let word = token.as_ref().split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();

        if word.chars().count() < config.min_length {
            continue;
        }
        if word.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        if stop_words.contains(&word) {
            continue;
        }

        if seen.insert(word.clone()) {
            words.push(word);
        }
    }

    words
}
