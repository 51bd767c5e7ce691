/// Static text screens (start, win, game over).
///
/// Each banner is a multi-line text resource; the end screens carry a
/// `SCORE: 0000` placeholder substituted with the zero-padded final
/// score. Files are looked up under the configured screens directory
/// and fall back to the compiled-in copies, so a bare binary still has
/// all three screens.

use std::path::Path;

/// The templated field the end-screen resources contain.
const SCORE_FIELD: &str = "SCORE: 0000";

pub const EMBEDDED_START: &str = include_str!("../../screens/start.txt");
pub const EMBEDDED_WIN: &str = include_str!("../../screens/win.txt");
pub const EMBEDDED_GAME_OVER: &str = include_str!("../../screens/game_over.txt");

#[derive(Clone, Debug)]
pub struct Banner {
    lines: Vec<String>,
}

impl Banner {
    /// Load `dir/name`, falling back to the embedded copy.
    pub fn load_or_embedded(dir: &Path, name: &str, embedded: &str) -> Self {
        let text = std::fs::read_to_string(dir.join(name))
            .unwrap_or_else(|_| embedded.to_string());
        Banner {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines with the score field filled in, zero-padded to four
    /// digits (wider scores widen the field).
    pub fn lines_with_score(&self, score: u32) -> Vec<String> {
        let value = format!("SCORE: {score:04}");
        self.lines
            .iter()
            .map(|line| line.replace(SCORE_FIELD, &value))
            .collect()
    }

    /// Index of the blinking prompt line, if the banner has one.
    pub fn prompt_line(&self) -> Option<usize> {
        self.lines.iter().position(|line| line.contains("Press"))
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn banner(text: &str) -> Banner {
        Banner {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    #[test]
    fn score_field_is_zero_padded() {
        let b = banner("== end ==\n  SCORE: 0000  \ndone");
        let lines = b.lines_with_score(30);
        assert_eq!(lines[1], "  SCORE: 0030  ");
        // Other lines pass through untouched.
        assert_eq!(lines[0], "== end ==");
        assert_eq!(lines[2], "done");
    }

    #[test]
    fn large_scores_keep_all_digits() {
        let b = banner("SCORE: 0000");
        assert_eq!(b.lines_with_score(123450)[0], "SCORE: 123450");
    }

    #[test]
    fn prompt_line_found_by_keyword() {
        let b = banner("title\n\nPress any key to START\n");
        assert_eq!(b.prompt_line(), Some(2));
        assert_eq!(banner("no prompt here").prompt_line(), None);
    }

    #[test]
    fn embedded_screens_have_expected_fields() {
        assert!(banner(EMBEDDED_START).prompt_line().is_some());
        for text in [EMBEDDED_WIN, EMBEDDED_GAME_OVER] {
            assert!(text.contains(SCORE_FIELD));
        }
    }
}
