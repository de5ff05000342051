use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use vocabforge::{
    ContentSource, ExtractionReport, ExtractionTier, ExtractorConfig, PageRange, Result, VocabError,
    default_output_path, extract_epub_words, list_content_files, write_word_list,
};

/// 📚 VocabForge - EPUB单词书提取工具
#[derive(Parser)]
#[command(name = "vocabforge")]
#[command(about = "从EPUB文件中提取英文单词")]
#[command(version)]
#[command(after_help = "页码范围格式说明:
  5        - 只提取第5个文件
  5-10     - 提取第5-10个文件
  5-       - 从第5个文件开始到结束
  -10      - 从开始到第10个文件

示例:
  vocabforge book.epub
  vocabforge book.epub --pages 5-10
  vocabforge book.epub -p 5- -o output.txt")]
struct Args {
    /// EPUB文件路径
    #[arg(help = "要处理的EPUB文件路径", required_unless_present = "init_config")]
    epub_file: Option<PathBuf>,

    /// 页码范围
    #[arg(short, long, allow_hyphen_values = true, help = "页码范围 (例如: 5-10, 5-, -10, 5)")]
    pages: Option<String>,

    /// 输出文件
    #[arg(short, long, help = "输出文件名")]
    output: Option<PathBuf>,

    /// 只列出内容文件
    #[arg(long, help = "列出EPUB中的所有内容文件")]
    list_files: bool,

    /// 配置文件
    #[arg(short, long, help = "YAML格式的提取配置文件")]
    config: Option<PathBuf>,

    /// 生成默认配置文件
    #[arg(long, value_name = "PATH", help = "生成默认配置文件后退出")]
    init_config: Option<PathBuf>,

    /// 详细输出模式
    #[arg(short, long, help = "显示详细日志")]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ 错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    if let Some(path) = &args.init_config {
        ExtractorConfig::generate_default_config(path)?;
        println!("✅ 已生成默认配置文件: {}", path.display());
        return Ok(());
    }

    let Some(epub_file) = args.epub_file.as_deref() else {
        return Err(VocabError::Config("缺少EPUB文件路径".to_string()));
    };

    if !epub_file.exists() {
        return Err(VocabError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("文件 '{}' 不存在", epub_file.display()),
        )));
    }

    let is_epub = epub_file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("epub"));
    if !is_epub {
        println!("⚠️  警告: 文件扩展名不是.epub，但仍会尝试处理");
    }

    if args.list_files {
        return list_files(epub_file);
    }

    let range = match &args.pages {
        Some(pages) => PageRange::parse(pages)?,
        None => PageRange::full(),
    };
    if !range.is_full() {
        println!("将提取{}", range);
    }

    let config = match &args.config {
        Some(path) => ExtractorConfig::from_file(path)?,
        None => ExtractorConfig::default(),
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(epub_file, args.pages.as_deref()));

    println!("📚 开始处理文件: {}", epub_file.display());
    let report = extract_epub_words(epub_file, &range, &config)?;
    print_report(&report);

    println!("正在保存单词到文件...");
    let count = write_word_list(report.words(), &output)?;
    println!("✅ 成功保存 {} 个唯一单词到 {}", count, output.display());

    println!("\n🎉 处理完成!");
    println!("输出文件: {}", output.display());
    println!("单词总数: {}", count);

    Ok(())
}

/// 列出内容文件
fn list_files(epub_file: &Path) -> Result<()> {
    println!("正在分析文件: {}", epub_file.display());

    let list = list_content_files(epub_file)?;
    if list.is_empty() {
        println!("未找到内容文件");
        return Ok(());
    }

    println!("\n找到 {} 个内容文件:", list.len());
    if list.source == ContentSource::Fallback {
        println!("  (无法获取阅读顺序，按压缩包中的顺序列出)");
    }
    for (i, path) in list.files.iter().enumerate() {
        println!("  {:3}. {}", i + 1, file_name(path));
    }

    Ok(())
}

/// 打印提取过程的统计信息
fn print_report(report: &ExtractionReport) {
    if let Some(title) = &report.title {
        println!("书籍标题: {}", title);
    }
    if report.source == ContentSource::Fallback {
        println!("⚠️  警告: 无法获取EPUB结构，已提取所有HTML文件");
    }
    println!("找到 {} 个内容文件", report.total_files);

    if let (Some(first), Some(last)) = (report.files.first(), report.files.last()) {
        println!(
            "将处理第 {} 到第 {} 个文件（共 {} 个文件）",
            first.position,
            last.position,
            report.files.len()
        );
    }
    for file in &report.files {
        if file.read {
            println!("  处理文件 {}/{}: {}", file.position, report.total_files, file_name(&file.path));
        } else {
            println!("  警告: 文件 {} 不存在或无法读取", file.path);
        }
    }
    println!("提取到的内容长度: {} 字符", report.content_length);

    let extraction = &report.extraction;
    match extraction.tier {
        ExtractionTier::Structured => {
            println!("从词汇条目中提取到 {} 个原始单词", extraction.raw_count);
        }
        ExtractionTier::Generic => {
            println!("未找到标准词汇条目格式，使用备用提取方法...");
            println!("从正文中切分出 {} 个原始单词", extraction.raw_count);
        }
    }

    let words = report.words();
    println!("找到 {} 个唯一单词", words.len());
    if words.len() > 10 {
        println!("前10个单词预览:");
        for (i, word) in words.iter().take(10).enumerate() {
            println!("  {}. {}", i + 1, word);
        }
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
