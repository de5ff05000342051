//! 脊柱模块
//!
//! 提供EPUB包中阅读顺序（脊柱）的结构定义。

use crate::epub::opf::manifest::PackageManifest;

/// 脊柱项信息(阅读顺序)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpineItem {
    /// 引用的清单项ID
    pub idref: String,
    /// 是否线性阅读
    pub linear: bool,
}

impl SpineItem {
    /// 创建指定线性属性的脊柱项
    pub fn with_linear(idref: String, linear: bool) -> Self {
        Self { idref, linear }
    }
}

/// 脊柱：按阅读顺序排列的清单项ID
#[derive(Debug, Clone, Default)]
pub struct SpineOrder {
    items: Vec<SpineItem>,
}

impl SpineOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, item: SpineItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[SpineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 按脊柱顺序映射出HTML类内容文档的路径
    ///
    /// 清单中不存在的idref直接跳过；非线性项同样保留，单词书的附录也需要提取。
    pub fn content_paths(&self, manifest: &PackageManifest) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| manifest.get(&item.idref))
            .filter(|item| item.is_html_like())
            .map(|item| item.path.clone())
            .collect()
    }
}
