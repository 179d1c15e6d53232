//! Text export and character statistics for generated content

use chrono::{DateTime, Local};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Han, kana and full-width forms. Punctuation, spaces and ASCII are excluded.
const CJK_CLASS: &str = r"[\x{4e00}-\x{9fff}\x{3040}-\x{309f}\x{30a0}-\x{30ff}\x{ff00}-\x{ffef}]";

fn cjk_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CJK_CLASS).expect("CJK class is a valid regex"))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStats {
    pub cjk_chars: usize,
    pub total_chars: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            cjk_chars: cjk_regex().find_iter(text).count(),
            total_chars: text.chars().count(),
        }
    }
}

impl std::fmt::Display for TextStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "📊 字数统计：{} 个中文字符（共 {} 字符）", self.cjk_chars, self.total_chars)
    }
}

/// `{template_id}_{YYYYmmdd_HHMMSS}.txt`
pub fn export_filename(template_id: &str, at: DateTime<Local>) -> String {
    let safe_id: String = template_id
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}_{}.txt", safe_id, at.format("%Y%m%d_%H%M%S"))
}

/// Write `text` byte-for-byte into `dir`, creating it if needed.
pub fn save_text(dir: &Path, template_id: &str, text: &str) -> std::io::Result<PathBuf> {
    save_text_at(dir, template_id, text, Local::now())
}

fn save_text_at(dir: &Path, template_id: &str, text: &str, at: DateTime<Local>) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(template_id, at));
    std::fs::write(&path, text.as_bytes())?;
    tracing::info!("Saved {} bytes to {}", text.len(), path.display());
    Ok(path)
}
