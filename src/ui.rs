use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Padding, Paragraph, Widget},
    Frame,
};

use crate::{
    app::App,
    stats::Stats,
    view::{CharStatus, Footer, RenderState, FINISHED_PROMPT},
};

/// Extra columns granted to the sentence beyond its widest line
const CONTENT_SLACK: u16 = 5;
const HORIZONTAL_PADDING: u16 = 2;
const VERTICAL_PADDING: u16 = 1;
/// Borders plus padding around a box's text
const BOX_CHROME_WIDTH: u16 = 2 + HORIZONTAL_PADDING * 2;
const BOX_CHROME_HEIGHT: u16 = 2 + VERTICAL_PADDING * 2;

fn label_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

fn value_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn boxed<'a>(border: BorderType) -> Block<'a> {
    Block::bordered().border_type(border).padding(Padding::new(
        HORIZONTAL_PADDING,
        HORIZONTAL_PADDING,
        VERTICAL_PADDING,
        VERTICAL_PADDING,
    ))
}

/// Paints a [`RenderState`]: sentence box, input box, then the prompt or
/// the results box.
pub struct RaceView<'a> {
    state: &'a RenderState,
    cursor_visible: bool,
    centered: bool,
}

impl<'a> RaceView<'a> {
    pub fn new(state: &'a RenderState, cursor_visible: bool) -> Self {
        Self {
            state,
            cursor_visible,
            centered: false,
        }
    }

    /// Center the content in the render area instead of anchoring top-left
    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }
}

impl Widget for RaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sentence = sentence_lines(self.state);
        let input = input_lines(self.state, self.cursor_visible);

        let text_width = widest(&sentence);
        let box_width = text_width.saturating_add(CONTENT_SLACK + BOX_CHROME_WIDTH);
        let sentence_height = row_count(&sentence).saturating_add(BOX_CHROME_HEIGHT);
        let input_height = row_count(&input).saturating_add(BOX_CHROME_HEIGHT);

        let (footer, footer_width, footer_height) = match &self.state.footer {
            Footer::Prompt(prompt) => {
                let lines = vec![Line::from(""), Line::from(*prompt)];
                let width = widest(&lines);
                (Paragraph::new(lines), width, 2)
            }
            Footer::Stats(stats) => {
                let lines = stats_lines(stats);
                let width = widest(&lines).saturating_add(BOX_CHROME_WIDTH);
                let height = row_count(&lines).saturating_add(BOX_CHROME_HEIGHT);
                (
                    Paragraph::new(lines).block(boxed(BorderType::Rounded)),
                    width,
                    height,
                )
            }
        };

        // one blank row between the boxes, one margin row above the results
        let footer_margin = u16::from(self.state.is_finished());
        let total_width = box_width.max(footer_width);
        let total_height = [1, input_height, footer_margin, footer_height]
            .into_iter()
            .fold(sentence_height, u16::saturating_add);

        let content = if self.centered {
            centered_rect(area, total_width, total_height)
        } else {
            Rect {
                width: total_width.min(area.width),
                height: total_height.min(area.height),
                ..area
            }
        };

        let mut y = content.y;
        let mut next_row = |height: u16, width: u16| {
            let rect = Rect {
                x: content.x,
                y,
                width: width.min(content.width),
                height,
            }
            .intersection(content);
            y = y.saturating_add(height);
            rect
        };

        let sentence_area = next_row(sentence_height, box_width);
        next_row(1, box_width);
        let input_area = next_row(input_height, box_width);
        next_row(footer_margin, box_width);
        let footer_area = next_row(footer_height, footer_width);

        Paragraph::new(sentence)
            .block(boxed(BorderType::Plain))
            .render(sentence_area, buf);
        Paragraph::new(input)
            .block(boxed(BorderType::Plain))
            .render(input_area, buf);
        footer.render(footer_area, buf);
    }
}

/// Target text split on wrap newlines, each character styled by status
fn sentence_lines(state: &RenderState) -> Vec<Line<'static>> {
    let correct = Style::default().fg(Color::Green);
    let incorrect = Style::default().fg(Color::Red);
    let cursor = Style::default().add_modifier(Modifier::UNDERLINED);

    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();

    for cell in &state.cells {
        let style = match cell.status {
            CharStatus::Correct => correct,
            CharStatus::Incorrect => incorrect,
            CharStatus::Cursor => cursor,
            CharStatus::Pending => Style::default(),
        };

        if cell.char == '\n' {
            if cell.status == CharStatus::Cursor {
                spans.push(Span::styled(" ", style));
            }
            lines.push(Line::from(std::mem::take(&mut spans)));
        } else {
            spans.push(Span::styled(cell.char.to_string(), style));
        }
    }
    lines.push(Line::from(spans));
    lines
}

/// Echo of the typed text followed by the blinking cursor
fn input_lines(state: &RenderState, cursor_visible: bool) -> Vec<Line<'static>> {
    let cursor = if state.cursor.is_some() && cursor_visible {
        "_"
    } else {
        " "
    };
    format!("{}{cursor}", state.typed)
        .split('\n')
        .map(|line| Line::from(line.to_string()))
        .collect()
}

fn stat_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, label_style()),
        Span::raw(" "),
        Span::styled(value, value_style()),
    ])
}

fn stats_lines(stats: &Stats) -> Vec<Line<'static>> {
    let mut lines = vec![
        stat_line("Time:", format!("{:.2} seconds", stats.duration_secs)),
        stat_line("WPM:", format!("{:.2}", stats.wpm)),
        stat_line("Accuracy:", format!("{:.2}%", stats.accuracy)),
    ];

    if !stats.top_mistyped.is_empty() {
        let mistyped_key = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

        lines.push(Line::from(Span::styled("Mistypes:", label_style())));
        for mistyped in &stats.top_mistyped {
            lines.push(Line::from(vec![
                Span::raw("- "),
                Span::styled(format!("{:?}", mistyped.char), mistyped_key),
                Span::raw(" "),
                Span::styled(mistyped.count.to_string(), value_style()),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(FINISHED_PROMPT, label_style())));
    lines
}

fn widest(lines: &[Line]) -> u16 {
    lines
        .iter()
        .map(Line::width)
        .max()
        .unwrap_or(0)
        .try_into()
        .unwrap_or(u16::MAX)
}

fn row_count(lines: &[Line]) -> u16 {
    u16::try_from(lines.len()).unwrap_or(u16::MAX)
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw the whole screen for `app`
pub fn draw(app: &App, f: &mut Frame) {
    let state = app.render_state();
    let view =
        RaceView::new(&state, app.cursor_visible()).centered(app.width > 0 && app.height > 0);
    f.render_widget(view, f.area());
}
