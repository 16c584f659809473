//! View composition: transcript lines, wrapping, scroll clamping, and the
//! frame layout.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::app::App;
use crate::core::message::Transcript;
use crate::ui::rain::RainState;

/// Rows taken by the input box at the bottom of the frame.
pub const INPUT_AREA_HEIGHT: u16 = 3;

/// Rows taken by the transcript title.
pub const TITLE_HEIGHT: u16 = 1;

pub fn build_display_lines(transcript: &Transcript) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    for msg in transcript.entries() {
        if msg.is_user {
            lines.push(Line::from(vec![
                Span::styled(
                    "You: ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(&msg.text, Style::default().fg(Color::Green)),
            ]));
        } else {
            for content_line in msg.text.lines() {
                lines.push(Line::from(Span::styled(
                    content_line,
                    Style::default().fg(Color::LightGreen),
                )));
            }
        }
        // Empty line between entries, matching the log format.
        lines.push(Line::from(""));
    }

    lines
}

fn styled_chars(line: &Line<'_>) -> Vec<(char, Style)> {
    line.spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |c| (c, span.style)))
        .collect()
}

/// Rebuilds a run of styled characters into a line, merging adjacent
/// characters that share a style back into single spans.
fn rebuild_line(chars: &[(char, Style)]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut current_style: Option<Style> = None;

    for (c, style) in chars {
        match current_style {
            Some(active) if active == *style => current.push(*c),
            Some(active) => {
                spans.push(Span::styled(std::mem::take(&mut current), active));
                current.push(*c);
                current_style = Some(*style);
            }
            None => {
                current.push(*c);
                current_style = Some(*style);
            }
        }
    }
    if let Some(active) = current_style {
        spans.push(Span::styled(current, active));
    }
    Line::from(spans)
}

/// Word-wraps styled lines to `width` display columns.
///
/// The transcript paragraph scrolls by row, so wrapping has to happen before
/// the scroll offset is applied; handing unwrapped lines to the widget's own
/// wrapper would make the offset undercount whenever an entry spans more
/// than one row. Breaks prefer the last space on the row and continuation
/// rows drop their leading spaces; a word wider than the area is broken
/// mid-word.
pub fn wrap_lines(lines: &[Line<'_>], width: u16) -> Vec<Line<'static>> {
    if width == 0 {
        return lines.iter().map(|line| rebuild_line(&styled_chars(line))).collect();
    }
    let max_width = usize::from(width);
    let mut wrapped = Vec::new();

    for line in lines {
        let chars = styled_chars(line);
        if chars.is_empty() {
            wrapped.push(Line::from(""));
            continue;
        }

        let mut start = 0;
        while start < chars.len() {
            if start > 0 {
                while start < chars.len() && chars[start].0 == ' ' {
                    start += 1;
                }
                if start >= chars.len() {
                    break;
                }
            }

            let mut used = 0;
            let mut end = start;
            let mut last_space = None;
            while end < chars.len() {
                let char_width = chars[end].0.width().unwrap_or(0);
                // Always make progress, even on a char wider than the area.
                if used + char_width > max_width && end > start {
                    break;
                }
                if chars[end].0 == ' ' {
                    last_space = Some(end);
                }
                used += char_width;
                end += 1;
            }

            let split = if end < chars.len() {
                match last_space {
                    Some(space) if space > start => space,
                    _ => end,
                }
            } else {
                end
            };
            wrapped.push(rebuild_line(&chars[start..split]));
            start = split;
        }
    }

    wrapped
}

pub fn max_scroll_offset(total_lines: u16, available_height: u16) -> u16 {
    total_lines.saturating_sub(available_height)
}

/// Rows the transcript occupies after wrapping to `width`, saturating at
/// `u16::MAX` so a very long session cannot wrap the counter.
pub fn total_rows(transcript: &Transcript, width: u16) -> u16 {
    let wrapped = wrap_lines(&build_display_lines(transcript), width);
    u16::try_from(wrapped.len()).unwrap_or(u16::MAX)
}

/// Transcript rows visible for a given terminal height.
pub fn available_height(terminal_height: u16) -> u16 {
    terminal_height
        .saturating_sub(INPUT_AREA_HEIGHT)
        .saturating_sub(TITLE_HEIGHT)
}

fn input_title(busy: bool) -> &'static str {
    if busy {
        "Waiting for a reply... (Ctrl+C to quit)"
    } else {
        "Enter your message... (Enter to send, Ctrl+C to quit)"
    }
}

pub fn draw(f: &mut Frame, app: &App, rain: Option<&RainState>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(INPUT_AREA_HEIGHT)])
        .split(f.area());
    let transcript_area = chunks[0];
    let input_area = chunks[1];

    let lines = wrap_lines(
        &build_display_lines(&app.transcript),
        transcript_area.width,
    );
    let visible = transcript_area.height.saturating_sub(TITLE_HEIGHT);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_offset = max_scroll_offset(total, visible);
    let offset = if app.auto_scroll {
        max_offset
    } else {
        app.scroll_offset.min(max_offset)
    };

    let transcript = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Construct")
                .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        )
        .scroll((offset, 0));
    f.render_widget(transcript, transcript_area);

    // The rain falls over the transcript body, below the title row.
    if let Some(rain) = rain {
        let rain_area = Rect {
            y: transcript_area.y + TITLE_HEIGHT,
            height: transcript_area.height.saturating_sub(TITLE_HEIGHT),
            ..transcript_area
        };
        f.render_widget(rain, rain_area);
    }

    let input_style = if app.is_busy() {
        Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::Green)
    };
    let input = Paragraph::new(app.input.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(input_title(app.is_busy())),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(input, input_area);

    if !app.is_busy() {
        f.set_cursor_position((
            input_area.x + app.input.width() as u16 + 1,
            input_area.y + 1,
        ));
    }
}
