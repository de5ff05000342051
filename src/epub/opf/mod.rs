//! OPF（Open Packaging Format）文件解析模块
//! 
//! 此模块提供EPUB文件中OPF包文件的解析功能，包括清单、脊柱和书名的提取。

mod manifest;
mod spine;
mod parser;

pub use manifest::{ManifestItem, PackageManifest, is_html_like, resolve_href};
pub use spine::{SpineItem, SpineOrder};
pub use parser::Package;
