//! Scene extraction from project scripts.
//!
//! Scripts follow the layout produced by the script step of the create flow:
//!
//! ```text
//! 场景一：开场
//! 画面：城市天际线，晨光初现
//! 旁白：在这片充满希望的土地上……
//! ```
//!
//! Each `画面` (or English `Visual`) line describes one shot and becomes one
//! image prompt. Scripts without any such marker fall back to one prompt per
//! non-empty line, skipping bracketed titles like `【视频脚本】`.

use std::sync::LazyLock;

use regex::Regex;

/// Upper bound on prompts extracted from a single script.
pub const MAX_SCENES: usize = 50;

static VISUAL_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:画面|(?i:visual))\s*[：:]\s*(.+?)\s*$").expect("valid regex")
});

/// Extract one prompt per scene from a script, capped at [`MAX_SCENES`].
pub fn extract_scene_prompts(script: &str) -> Vec<String> {
    let visuals: Vec<String> = script
        .lines()
        .filter_map(|line| VISUAL_LINE_RE.captures(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .take(MAX_SCENES)
        .collect();

    if !visuals.is_empty() {
        return visuals;
    }

    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !(line.starts_with('【') && line.ends_with('】')))
        .take(MAX_SCENES)
        .map(str::to_string)
        .collect()
}
