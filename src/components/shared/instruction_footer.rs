use ratatui::{
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::tui::Frame;

/// What the list is doing, as far as the key hints are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FooterMode {
  #[default]
  Browsing,
  Confirming,
  Deleting,
}

#[derive(Default)]
pub struct InstructionFooter {}

impl InstructionFooter {
  /// Hints for the mode. While a delete is being confirmed or is in flight the list's own hints are replaced.
  pub fn instructions(mode: FooterMode, list_instructions: Vec<&'static str>) -> Vec<&'static str> {
    match mode {
      FooterMode::Browsing => list_instructions,
      FooterMode::Confirming => vec!["y: Delete", "n/esc: Cancel", "tab: Switch Button", "enter: Press Button"],
      FooterMode::Deleting => vec!["Deleting..."],
    }
  }

  pub fn line(mode: FooterMode, list_instructions: Vec<&'static str>) -> Line<'static> {
    let text = Self::instructions(mode, list_instructions).join(" | ");
    match mode {
      FooterMode::Browsing => Line::from(text),
      FooterMode::Confirming | FooterMode::Deleting => Line::from(vec![
        Span::styled(" DELETE ", Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::raw(text),
      ]),
    }
  }

  pub fn render(&self, frame: &mut Frame<'_>, area: Rect, mode: FooterMode, list_instructions: Vec<&'static str>) {
    if mode == FooterMode::Browsing && list_instructions.is_empty() {
      return;
    }

    let border = match mode {
      FooterMode::Browsing => Style::default(),
      FooterMode::Confirming | FooterMode::Deleting => Style::default().fg(Color::Red),
    };
    let paragraph = Paragraph::new(Self::line(mode, list_instructions))
      .block(Block::default().borders(Borders::ALL).border_style(border))
      .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
  }
}
