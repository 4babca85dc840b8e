// HTML subset rendering for terminal display

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::mem;

/// Convert an HTML fragment to ratatui Lines with styling.
///
/// Handles the tags an explanation typically carries (headings, paragraphs,
/// lists, inline emphasis, code and preformatted blocks). Unknown tags are
/// dropped and their text kept; `script`, `style`, `head` and `title`
/// content is discarded.
pub fn render_html_to_lines(html: &str) -> Vec<Line<'static>> {
    let mut renderer = HtmlRenderer::default();
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        renderer.push_text(&rest[..lt]);
        let tail = &rest[lt..];

        if tail.starts_with("<!--") {
            rest = tail.find("-->").map_or("", |end| &tail[end + 3..]);
            continue;
        }

        let starts_tag = tail[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!');
        if !starts_tag {
            renderer.push_text("<");
            rest = &tail[1..];
            continue;
        }

        if let Some(gt) = tail.find('>') {
            renderer.tag(&tail[1..gt]);
            rest = &tail[gt + 1..];
        } else {
            renderer.push_text(tail);
            rest = "";
        }
    }
    renderer.push_text(rest);

    renderer.finish()
}

/// Render text verbatim, one Line per source line.
pub fn render_plain_text(text: &str) -> Vec<Line<'static>> {
    text.split('\n')
        .map(|line| Line::raw(line.trim_end_matches('\r').replace('\t', "    ")))
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum ListKind {
    Bullet,
    Ordered(usize),
}

#[derive(Default)]
struct HtmlRenderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    bold: usize,
    italic: usize,
    code: usize,
    link: usize,
    pre: usize,
    skip: usize,
    heading: Option<u8>,
    lists: Vec<ListKind>,
    pending_space: bool,
}

impl HtmlRenderer {
    fn style(&self) -> Style {
        let mut style = Style::default();

        if let Some(level) = self.heading {
            let color = match level {
                1 => Color::Yellow,
                2 => Color::Cyan,
                _ => Color::Blue,
            };
            style = style.fg(color).add_modifier(Modifier::BOLD);
        }
        if self.pre > 0 {
            style = style.fg(Color::Green);
        } else if self.code > 0 {
            style = style.fg(Color::Magenta);
        }
        if self.bold > 0 {
            style = style.add_modifier(Modifier::BOLD);
            if self.heading.is_none() {
                style = style.fg(Color::Yellow);
            }
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.link > 0 {
            style = style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    fn push_span(&mut self, text: String) {
        if !text.is_empty() {
            let style = self.style();
            self.spans.push(Span::styled(text, style));
        }
    }

    fn push_text(&mut self, raw: &str) {
        if self.skip > 0 || raw.is_empty() {
            return;
        }
        let text = decode_entities(raw);

        if self.pre > 0 {
            let mut parts = text.split('\n');
            if let Some(first) = parts.next() {
                self.push_span(first.replace('\t', "    "));
            }
            for part in parts {
                self.force_break();
                self.push_span(part.replace('\t', "    "));
            }
            return;
        }

        let mut out = String::new();
        for ch in text.chars() {
            if ch.is_whitespace() && ch != '\u{a0}' {
                self.pending_space = true;
                continue;
            }
            if self.pending_space && !(self.spans.is_empty() && out.is_empty()) {
                out.push(' ');
            }
            self.pending_space = false;
            out.push(if ch == '\u{a0}' { ' ' } else { ch });
        }
        self.push_span(out);
    }

    /// End the current line if it has content.
    fn break_line(&mut self) {
        if !self.spans.is_empty() {
            self.force_break();
        }
        self.pending_space = false;
    }

    /// End the current line even if it is empty.
    fn force_break(&mut self) {
        self.lines.push(Line::from(mem::take(&mut self.spans)));
        self.pending_space = false;
    }

    /// End the current line and leave one blank line after it.
    fn paragraph_break(&mut self) {
        self.break_line();
        if self.lines.last().is_some_and(|line| line.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn tag(&mut self, inner: &str) {
        let inner = inner.trim();
        if inner.starts_with('!') {
            return;
        }

        let (closing, body) = inner
            .strip_prefix('/')
            .map_or((false, inner), |body| (true, body));
        let name: String = body
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        if closing {
            self.close_tag(&name);
        } else {
            self.open_tag(&name);
        }
    }

    fn open_tag(&mut self, name: &str) {
        match name {
            "script" | "style" | "head" | "title" => self.skip += 1,
            _ if self.skip > 0 => {}
            "br" => self.force_break(),
            "hr" => {
                self.break_line();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            "p" | "div" | "section" | "article" | "table" | "tr" => self.break_line(),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.paragraph_break();
                self.heading = name[1..].parse().ok();
            }
            "ul" => {
                self.break_line();
                self.lists.push(ListKind::Bullet);
            }
            "ol" => {
                self.break_line();
                self.lists.push(ListKind::Ordered(0));
            }
            "li" => {
                self.break_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(ListKind::Ordered(n)) => {
                        *n += 1;
                        format!("{n}. ")
                    }
                    Some(ListKind::Bullet) | None => "• ".to_string(),
                };
                self.spans.push(Span::styled(
                    format!("{indent}{marker}"),
                    Style::default().fg(Color::Cyan),
                ));
            }
            "pre" => {
                self.break_line();
                self.pre += 1;
            }
            "blockquote" => {
                self.break_line();
                self.italic += 1;
            }
            "td" | "th" => {
                if !self.spans.is_empty() {
                    self.spans.push(Span::raw(" | "));
                }
            }
            "strong" | "b" => self.bold += 1,
            "em" | "i" => self.italic += 1,
            "code" | "kbd" | "samp" => self.code += 1,
            "a" => self.link += 1,
            _ => {}
        }
    }

    fn close_tag(&mut self, name: &str) {
        match name {
            "script" | "style" | "head" | "title" => self.skip = self.skip.saturating_sub(1),
            _ if self.skip > 0 => {}
            "p" => self.paragraph_break(),
            "div" | "section" | "article" | "table" | "tr" | "li" => self.break_line(),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.break_line();
                self.heading = None;
            }
            "ul" | "ol" => {
                self.break_line();
                self.lists.pop();
            }
            "pre" => {
                self.break_line();
                self.pre = self.pre.saturating_sub(1);
            }
            "blockquote" => {
                self.break_line();
                self.italic = self.italic.saturating_sub(1);
            }
            "strong" | "b" => self.bold = self.bold.saturating_sub(1),
            "em" | "i" => self.italic = self.italic.saturating_sub(1),
            "code" | "kbd" | "samp" => self.code = self.code.saturating_sub(1),
            "a" => self.link = self.link.saturating_sub(1),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.break_line();
        while self.lines.last().is_some_and(|line| line.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Decode named and numeric character references.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|ch| (ch, semi)));

        if let Some((ch, semi)) = decoded {
            out.push(ch);
            rest = &tail[semi + 1..];
        } else {
            out.push('&');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
