use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use keycoach::suggestion::SuggestionTone;

use super::{App, MAX_SELECTABLE};

const HELP_LINE: &str =
    "Tab shift  F2 mode  Ctrl+W del word  Alt+1-5 use  Ctrl+N more  Ctrl+D dismiss  Ctrl+T toggle  Esc quit";

/// Colour for a tone label
pub fn tone_color(tone: Option<SuggestionTone>) -> Color {
    match tone {
        Some(SuggestionTone::Casual) => Color::Cyan,
        Some(SuggestionTone::Enthusiastic) => Color::Yellow,
        Some(SuggestionTone::Flirty) => Color::Magenta,
        Some(SuggestionTone::Thoughtful) => Color::Green,
        Some(SuggestionTone::Playful) => Color::LightRed,
        None => Color::Gray,
    }
}

impl App {
    /// Render the UI
    pub fn render(&self, frame: &mut Frame) {
        let bar_height = (self.session.suggestions().len().clamp(1, MAX_SELECTABLE) + 2) as u16;
        let layout = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(bar_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

        self.render_field(frame, layout[0]);
        self.render_suggestion_bar(frame, layout[1]);
        self.render_footer(frame, layout[2]);
    }

    fn render_field(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            " {} · {} · {} ",
            self.host_app_id,
            self.session.mode().label(),
            self.session.shift().label()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Cyan));

        let text = format!("{}▏", self.host.text());
        let content = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(content, area);
    }

    fn render_suggestion_bar(&self, frame: &mut Frame, area: Rect) {
        let title = if self.session.is_loading() {
            " Suggestions (thinking...) "
        } else {
            " Suggestions "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray));

        frame.render_widget(Paragraph::new(self.suggestion_lines()).block(block), area);
    }

    fn suggestion_lines(&self) -> Vec<Line<'static>> {
        if !self.session.suggestions_enabled() {
            return vec![Line::from(Span::styled(
                "Suggestions off (Ctrl+T to turn on)",
                Style::default().fg(Color::DarkGray),
            ))];
        }
        if let Some(prompt) = self.session.upgrade_prompt() {
            return vec![Line::from(Span::styled(
                prompt.to_string(),
                Style::default().fg(Color::Yellow),
            ))];
        }

        let suggestions = self.session.suggestions();
        if suggestions.is_empty() {
            return vec![Line::from(Span::styled(
                "Keep typing...",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        suggestions
            .iter()
            .take(MAX_SELECTABLE)
            .enumerate()
            .map(|(i, suggestion)| {
                let mut spans = vec![Span::styled(
                    format!("{}. ", i + 1),
                    Style::default().fg(Color::DarkGray),
                )];
                if let Some(tone) = suggestion.tone {
                    spans.push(Span::styled(
                        format!("[{}] ", tone.label()),
                        Style::default()
                            .fg(tone_color(Some(tone)))
                            .add_modifier(Modifier::BOLD),
                    ));
                }
                spans.push(Span::raw(suggestion.text.clone()));
                Line::from(spans)
            })
            .collect()
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(status) => Line::from(Span::styled(
                status.clone(),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(Span::styled(HELP_LINE, Style::default().fg(Color::DarkGray))),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
