//! 取词 demo（行缓冲 REPL）。
//!
//! 把屏幕坐标简化成“当前行内的列号”：先输入一行文本作为缓冲，
//! 再用命令模拟光标事件：
//!
//! - `@<col>`：悬停在第 col 列（0 起）
//! - `!<col>`：钉选从第 col 列到行尾的文本
//! - `~`：解除钉选
//! - `[` / `]`：选区拖拽开始 / 结束
//! - `-` / `+`：暂停 / 恢复
//! - `:q`：退出

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use quci_core::event::{Action, InputEvent};
use quci_core::lookuper::Lookuper;
use quci_core::session::{CaretError, CaretHit, CaretLocator, Session, TextCapture};
use quci_core::store::{ContentGenerator, ContentSink};
use quci_core::window::WindowExtractor;
use quci_dict::TsvStore;
use quci_lang::entry::DefaultEntryBuilder;
use quci_lang::latin::LatinClassifier;
use quci_lang::segment::UnicodeBoundary;

#[derive(Debug, Parser)]
#[command(name = "quci_cli", about = "取词词典 demo（行缓冲 REPL）")]
struct Args {
    /// TSV 词典路径
    #[arg(long)]
    dict: Option<PathBuf>,
    /// JSON 设置文件路径（缺省用内置默认值）
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Settings {
    lookup_with_capitalized: bool,
    max_words: usize,
    min_phrase_length: usize,
    enable_phrasing: bool,
    cache_size: usize,
    wide_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lookup_with_capitalized: false,
            max_words: 8,
            min_phrase_length: 1,
            enable_phrasing: true,
            cache_size: 100,
            wide_limit: 40,
        }
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let s = fs::read_to_string(path).with_context(|| format!("读取设置文件 {}", path.display()))?;
    let settings =
        serde_json::from_str(&s).with_context(|| format!("解析设置文件 {}", path.display()))?;
    Ok(settings)
}

fn default_dict_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("asset").join("dict.tsv")
}

/// 行缓冲定位器：x 即缓冲内列号（char 计），y 忽略。
struct LineLocator {
    buffer: Rc<RefCell<String>>,
}

impl CaretLocator for LineLocator {
    fn locate(&self, x: f64, _y: f64) -> Result<Option<CaretHit>, CaretError> {
        if x < 0.0 {
            return Err(CaretError(format!("负坐标: {x}")));
        }
        let line = self.buffer.borrow().clone();
        let offset = x as usize;
        if offset >= line.chars().count() {
            return Ok(None);
        }
        Ok(Some(CaretHit {
            text: line,
            offset,
            following: None,
        }))
    }
}

/// 纯文本渲染：每个命中词头一行 `head<TAB>description`。
struct PlainGenerator;

impl ContentGenerator for PlainGenerator {
    type Content = String;

    fn generate(
        &self,
        heads: &[String],
        descriptions: &HashMap<String, String>,
        allow_short_words: bool,
    ) -> (String, usize) {
        let mut out = String::new();
        let mut hits = 0usize;
        let mut shown: Vec<&String> = Vec::new();
        for head in heads {
            let Some(desc) = descriptions.get(head) else {
                continue;
            };
            if !allow_short_words && head.chars().count() < 3 {
                continue;
            }
            if shown.contains(&head) {
                continue;
            }
            shown.push(head);
            out.push_str(head);
            out.push('\t');
            out.push_str(desc);
            out.push('\n');
            hits += 1;
        }
        (out, hits)
    }
}

/// 把渲染结果打到标准输出。
struct PrintSink;

impl ContentSink<String> for PrintSink {
    fn update(&mut self, content: &String, hit_count: usize) {
        println!("---- {hit_count} 条 ----");
        print!("{content}");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;
    log::debug!("设置: {settings:?}");
    let dict_path = args.dict.unwrap_or_else(default_dict_path);
    let store = TsvStore::from_path(&dict_path)
        .with_context(|| format!("载入词典 {}", dict_path.display()))?;

    let buffer = Rc::new(RefCell::new(String::new()));
    let extractor = WindowExtractor::new(LatinClassifier)
        .max_words(settings.max_words)
        .wide_limit(settings.wide_limit);
    let capture = TextCapture::new(
        extractor,
        Box::new(LineLocator {
            buffer: buffer.clone(),
        }),
    )
    .resolver(Box::new(UnicodeBoundary));
    let builder = DefaultEntryBuilder::new()
        .min_phrase_len(settings.min_phrase_length)
        .enable_phrasing(settings.enable_phrasing);
    let lookuper = Lookuper::new(store, PlainGenerator, Box::new(builder), Box::new(PrintSink))
        .cache_capacity(settings.cache_size)
        .with_capitalized(settings.lookup_with_capitalized);
    let mut session = Session::new(capture, lookuper);

    repl(&mut session, &buffer, &dict_path)
}

fn repl(
    session: &mut Session<LatinClassifier, TsvStore, PlainGenerator>,
    buffer: &Rc<RefCell<String>>,
    dict_path: &Path,
) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let mut line = String::new();
    writeln!(out, "quci demo (行缓冲 REPL) | dict: {}", dict_path.display())?;
    writeln!(out, "先输入一行文本，再用 @<col> 悬停、!<col> 钉选、~ 解除、[ ] 选区、- + 暂停恢复。:q 退出。")?;
    out.flush()?;

    loop {
        line.clear();
        print!("quci>");
        out.flush()?;
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\r', '\n']);
        if input.is_empty() {
            continue;
        }
        if input == ":q" || input == ":quit" || input == ":exit" {
            break;
        }

        match parse_command(input) {
            Some(Command::Hover(col)) => {
                let actions = session.handle(InputEvent::PointerMove {
                    x: col as f64,
                    y: 0.0,
                });
                if !actions.contains(&Action::Updated) {
                    writeln!(out, "(无更新)")?;
                }
            }
            Some(Command::Pin(col)) => {
                let text: String = buffer.borrow().chars().skip(col).collect();
                let text = text.trim().to_string();
                let actions = session.handle(InputEvent::Pin(text));
                if !actions.contains(&Action::Updated) {
                    writeln!(out, "(钉选未命中)")?;
                }
            }
            Some(Command::Unpin) => {
                session.handle(InputEvent::Unpin);
                writeln!(out, "(已解除钉选)")?;
            }
            Some(Command::SelectionStart) => {
                session.handle(InputEvent::SelectionStart);
            }
            Some(Command::SelectionEnd) => {
                session.handle(InputEvent::SelectionEnd);
            }
            Some(Command::Suspend) => {
                session.handle(InputEvent::Suspend);
                writeln!(out, "(已暂停)")?;
            }
            Some(Command::Resume) => {
                session.handle(InputEvent::Resume);
                writeln!(out, "(已恢复)")?;
            }
            None => {
                *buffer.borrow_mut() = input.to_string();
                writeln!(out, "buffer: {input}")?;
            }
        }
    }

    Ok(())
}

enum Command {
    Hover(usize),
    Pin(usize),
    Unpin,
    SelectionStart,
    SelectionEnd,
    Suspend,
    Resume,
}

fn parse_command(input: &str) -> Option<Command> {
    match input {
        "~" => return Some(Command::Unpin),
        "[" => return Some(Command::SelectionStart),
        "]" => return Some(Command::SelectionEnd),
        "-" => return Some(Command::Suspend),
        "+" => return Some(Command::Resume),
        _ => {}
    }
    if let Some(rest) = input.strip_prefix('@') {
        return rest.trim().parse().ok().map(Command::Hover);
    }
    if let Some(rest) = input.strip_prefix('!') {
        return rest.trim().parse().ok().map(Command::Pin);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_to_events() {
        assert!(matches!(parse_command("@12"), Some(Command::Hover(12))));
        assert!(matches!(parse_command("! 3"), Some(Command::Pin(3))));
        assert!(matches!(parse_command("~"), Some(Command::Unpin)));
        assert!(matches!(parse_command("["), Some(Command::SelectionStart)));
        assert!(matches!(parse_command("]"), Some(Command::SelectionEnd)));
        assert!(matches!(parse_command("-"), Some(Command::Suspend)));
        assert!(matches!(parse_command("+"), Some(Command::Resume)));
        assert!(parse_command("plain text").is_none());
        assert!(parse_command("@abc").is_none());
    }

    #[test]
    fn generator_skips_short_heads_unless_allowed() {
        let mut descriptions = HashMap::new();
        descriptions.insert("up".to_string(), "upward".to_string());
        descriptions.insert("apple".to_string(), "a fruit".to_string());
        let heads = vec!["up".to_string(), "apple".to_string()];

        let (content, hits) = PlainGenerator.generate(&heads, &descriptions, false);
        assert_eq!(hits, 1);
        assert!(!content.contains("up\t"));

        let (_, hits) = PlainGenerator.generate(&heads, &descriptions, true);
        assert_eq!(hits, 2);
    }

    #[test]
    fn generator_deduplicates_display_heads() {
        let mut descriptions = HashMap::new();
        descriptions.insert("apple".to_string(), "a fruit".to_string());
        let heads = vec!["apple".to_string(), "apple".to_string()];
        let (_, hits) = PlainGenerator.generate(&heads, &descriptions, true);
        assert_eq!(hits, 1);
    }

    #[test]
    fn settings_fill_defaults_for_missing_fields() {
        let s: Settings = serde_json::from_str(r#"{"max_words": 3}"#).unwrap();
        assert_eq!(s.max_words, 3);
        assert_eq!(s.cache_size, 100);
        assert!(s.enable_phrasing);
    }
}
