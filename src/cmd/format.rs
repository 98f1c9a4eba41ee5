/*!
Decorated-mode output primitives.

Zero terminal crates on purpose: color, boxes, and tables are plain string
builders that degrade gracefully when ANSI is disabled.

Style decisions live in one place:
  - NO_COLOR env disables ANSI
  - NO_EMOJI env disables emoji prefixes
  - COLUMNS env sets width, clamped to 40..=220, default 100

These helpers return strings and never print. Plain-mode output paths must
not use them, so machine output stays undecorated.
*/

/* ---- Style Options ---- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);
        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            term_width: width,
        }
    }
}

/* ---- Color / Emoji ---- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Title,
    Accent,
    Dim,
    Error,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Title => "1;34", // bold blue
        Role::Accent => "36",  // cyan
        Role::Dim => "2",      // faint
        Role::Error => "31",   // red
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "craft" => "🔨",
        "tool" => "🔧",
        "domain" => "📂",
        "run" => "🚀",
        "info" => "ℹ",
        "warn" => "⚠",
        _ => "",
    }
}

/* ---- Panels ---- */

/// Boxed multi-line panel with an optional title on the top border.
///
/// Long lines wrap at the panel width; embedded newlines are preserved.
pub fn panel(title: &str, body: &str, style: &StyleOptions) -> String {
    let inner_width = panel_inner_width(title, body, style);
    let mut out = Vec::new();

    let title_styled = color(Role::Title, title, style);
    let tail = inner_width.saturating_sub(display_width(title) + 3);
    out.push(format!("┌─ {title_styled} {}┐", "─".repeat(tail)));

    for raw_line in body.lines() {
        for line in wrap_text(raw_line, inner_width.saturating_sub(2)) {
            let pad = inner_width.saturating_sub(display_width(&line) + 2);
            out.push(format!("│ {line}{} │", " ".repeat(pad)));
        }
    }

    out.push(format!("└{}┘", "─".repeat(inner_width)));
    out.join("\n")
}

fn panel_inner_width(title: &str, body: &str, style: &StyleOptions) -> usize {
    let widest_body = body.lines().map(display_width).max().unwrap_or(0);
    let wanted = widest_body.max(display_width(title) + 4) + 2;
    wanted.min(style.term_width.saturating_sub(2)).max(20)
}

/* ---- Tables ---- */

/// Column-aligned table with a header row and a dashed separator. Columns
/// shrink greedily, widest first, when the natural width exceeds the
/// terminal; shrunk cells truncate with an ellipsis.
pub fn table(headers: &[&str], rows: &[Vec<String>], style: &StyleOptions) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let gutter = 2;
    let natural: usize = widths.iter().sum::<usize>() + gutter * (cols - 1);
    if natural > style.term_width {
        let mut overflow = natural - style.term_width;
        let mut by_width: Vec<usize> = (0..cols).collect();
        by_width.sort_by_key(|&i| std::cmp::Reverse(widths[i]));
        for i in by_width {
            if overflow == 0 {
                break;
            }
            let shrink = widths[i].saturating_sub(4).min(overflow);
            widths[i] -= shrink;
            overflow -= shrink;
        }
    }

    let mut out = String::new();
    for (i, h) in headers.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&color(Role::Accent, fit(h, widths[i]), style));
    }
    out.push('\n');
    for (i, _) in headers.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&color(Role::Dim, "-".repeat(widths[i]), style));
    }
    for row in rows {
        out.push('\n');
        for c in 0..cols {
            if c > 0 {
                out.push_str("  ");
            }
            out.push_str(&fit(row.get(c).map(String::as_str).unwrap_or(""), widths[c]));
        }
    }
    out
}

fn fit(s: &str, width: usize) -> String {
    let len = display_width(s);
    if len <= width {
        return format!("{s}{}", " ".repeat(width - len));
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('…');
    out
}

/* ---- Text Helpers ---- */

pub fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || display_width(s) <= max_width {
        return vec![s.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in s.split(' ') {
        let candidate = display_width(&current) + display_width(word) + 1;
        if !current.is_empty() && candidate > max_width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn strip_ansi(s: &str) -> String {
    if !s.contains('\x1b') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_style() -> StyleOptions {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width: 80,
        }
    }

    #[test]
    fn panel_contains_title_and_body() {
        let p = panel("Craft CLI", "line one\nline two", &plain_style());
        assert!(p.contains("Craft CLI"));
        assert!(p.contains("line one"));
        assert!(p.starts_with('┌'));
        assert!(p.ends_with('┘'));
    }

    #[test]
    fn panel_lines_are_equally_wide() {
        let p = panel("T", "short\na much longer body line here", &plain_style());
        let widths: Vec<usize> = p.lines().map(display_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    }

    #[test]
    fn table_aligns_and_truncates() {
        let style = StyleOptions {
            term_width: 24,
            ..plain_style()
        };
        let t = table(
            &["ID", "DESCRIPTION"],
            &[vec![
                "linting".into(),
                "a very long description that cannot fit".into(),
            ]],
            &style,
        );
        assert!(t.contains("linting"));
        assert!(t.contains('…'));
        for line in t.lines() {
            assert!(display_width(line) <= 24, "{line:?}");
        }
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("alpha beta gamma delta", 11);
        assert!(lines.len() >= 2);
        assert!(lines.iter().all(|l| display_width(l) <= 11));
    }

    #[test]
    fn strip_ansi_removes_codes() {
        assert_eq!(strip_ansi("\x1b[1;34mX\x1b[0m"), "X");
        assert_eq!(display_width("\x1b[31mab\x1b[0m"), 2);
    }

    #[test]
    fn color_respects_style() {
        let style = plain_style();
        assert_eq!(color(Role::Error, "x", &style), "x");
        let colored = StyleOptions {
            use_color: true,
            ..plain_style()
        };
        assert!(color(Role::Error, "x", &colored).contains("\x1b[31m"));
    }
}
