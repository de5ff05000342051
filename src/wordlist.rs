//! 单词表读写模块
//!
//! 单词表是每行一个单词的UTF-8文本文件，没有表头。

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, VocabError};

/// 把单词逐行写入文件（创建或覆盖），返回写入的单词数
pub fn write_word_list<P: AsRef<Path>, S: AsRef<str>>(words: &[S], path: P) -> Result<usize> {
    let path = path.as_ref();
    let write_error = |source| VocabError::Write { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    for word in words {
        writeln!(writer, "{}", word.as_ref()).map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;

    Ok(words.len())
}

/// 读取单词表，保持文件中的顺序，忽略空行
pub fn read_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| VocabError::ReadList {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// 按第一个列表的顺序求两个列表的交集，并按首次出现去重
pub fn common_words<A: AsRef<str>, B: AsRef<str>>(first: &[A], second: &[B]) -> Vec<String> {
    let members: HashSet<&str> = second.iter().map(|w| w.as_ref()).collect();
    let mut seen = HashSet::new();

    first
        .iter()
        .map(|w| w.as_ref())
        .filter(|word| members.contains(word) && seen.insert(*word))
        .map(str::to_string)
        .collect()
}

/// 找出两个单词表文件的共同单词并写入输出文件
///
/// 两个输入文件都读取成功之后才会创建输出文件；任一输入缺失或无法读取时返回错误，
/// 不会留下输出文件。
///
/// # 返回值
/// * `Result<usize>` - 共同单词的数量
pub fn find_common_words<P1, P2, P3>(first: P1, second: P2, output: P3) -> Result<usize>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
    P3: AsRef<Path>,
{
    let first = read_word_list(first)?;
    let second = read_word_list(second)?;

    let common = common_words(&first, &second);
    write_word_list(&common, output)
}

/// 默认输出文件名: `<输入文件名>_words[_p<页码范围>].txt`，页码范围中的 `-` 替换为 `_`
pub fn default_output_path<P: AsRef<Path>>(input: P, pages: Option<&str>) -> PathBuf {
    let stem = input
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    match pages.map(str::trim).filter(|p| !p.is_empty()) {
        Some(pages) => PathBuf::from(format!("{}_words_p{}.txt", stem, pages.replace('-', "_"))),
        None => PathBuf::from(format!("{}_words.txt", stem)),
    }
}
