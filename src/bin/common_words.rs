use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use vocabforge::find_common_words;

/// 🔗 找出两个单词表中的共同单词
///
/// 输出顺序与第一个文件保持一致，并去掉重复的单词。
#[derive(Parser)]
#[command(name = "common-words")]
#[command(about = "找出两个单词表文件中相同的单词")]
#[command(version)]
struct Args {
    /// 第一个单词表（决定输出顺序）
    #[arg(default_value = "file1.txt")]
    file1: PathBuf,

    /// 第二个单词表
    #[arg(default_value = "file2.txt")]
    file2: PathBuf,

    /// 输出文件
    #[arg(short, long, default_value = "common_words.txt", help = "输出文件路径")]
    output: PathBuf,

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

    log::debug!("比较 {} 和 {}", args.file1.display(), args.file2.display());

    match find_common_words(&args.file1, &args.file2, &args.output) {
        Ok(count) => {
            println!("找到 {} 个相同单词", count);
            println!("结果已保存到: {}", args.output.display());
            println!("处理完成!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("处理失败!");
            ExitCode::FAILURE
        }
    }
}
