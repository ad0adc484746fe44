//! TUI rendering — orchestrates all panes.

pub mod inventory;
pub mod store_list;

use bookstock_core::gateway::Gateway;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, InputMode, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<G: Gateway>(f: &mut Frame, app: &App<G>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);

  match app.screen {
    Screen::StoreList => store_list::draw(f, rows[1], app),
    Screen::Inventory => inventory::draw(f, rows[1], app),
  }

  // Prompt overlays sit on top of the body.
  match &app.input {
    InputMode::AddSelect => inventory::draw_add_picker(f, rows[1], app),
    InputMode::AddPrice { buffer, .. } => {
      inventory::draw_price_prompt(f, rows[1], "Add at price", buffer);
    }
    InputMode::EditPrice { buffer, .. } => {
      inventory::draw_price_prompt(f, rows[1], "New price", buffer);
    }
    _ => {}
  }

  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<G: Gateway>(f: &mut Frame, area: Rect, app: &App<G>) {
  let who = match app.session.current_user() {
    Some(user) => format!("{} ({}) ", user.name, user.role.as_str()),
    None => "anonymous ".to_string(),
  };

  let left = Span::styled(
    " bookstock  [/] search  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(who, Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<G: Gateway>(f: &mut Frame, area: Rect, app: &App<G>) {
  let (mode_label, hints) = match (&app.input, app.screen) {
    (InputMode::StoreFilter, _) => ("FILTER", "Type to filter  Esc cancel  Enter select"),
    (InputMode::Search, _) => ("SEARCH", "Type to search  Esc clear  Enter apply"),
    (InputMode::AddSelect, _) => ("ADD", "↑↓/jk pick a book  Enter price it  Esc cancel"),
    (InputMode::AddPrice { .. } | InputMode::EditPrice { .. }, _) => {
      ("PRICE", "Digits and dot  Enter confirm  Esc cancel")
    }
    (InputMode::None, Screen::StoreList) => {
      ("STORES", "↑↓/jk navigate  / filter  Enter open  q quit")
    }
    (InputMode::None, Screen::Inventory) => (
      "NORMAL",
      "↑↓/jk move  / search  1-6 sort  a add  e price  d remove  r reload  Esc back",
    ),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// A centred overlay rect `percent_x` wide and `height` rows tall.
pub(crate) fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
  let width = area.width * percent_x / 100;
  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;
  Rect {
    x,
    y,
    width,
    height: height.min(area.height),
  }
}
