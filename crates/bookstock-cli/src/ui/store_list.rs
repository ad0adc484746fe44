//! Store picker pane.

use bookstock_core::gateway::Gateway;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, InputMode};

/// Render the store list into `area`.
pub fn draw<G: Gateway>(f: &mut Frame, area: Rect, app: &App<G>) {
  let filtered = app.filtered_stores();
  let total = app.stores.len();

  let filter_active = app.input == InputMode::StoreFilter;

  // Title with count.
  let title = if filter_active || !app.store_filter.is_empty() {
    format!(" Stores ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Stores ({total}) ")
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  // Build list items.
  let items: Vec<ListItem> = filtered
    .iter()
    .map(|store| {
      ListItem::new(Line::from(vec![
        Span::styled(
          format!("{:>3}  ", store.id),
          Style::default().fg(Color::DarkGray),
        ),
        Span::raw(store.name.clone()),
        Span::styled(
          format!("  {}", store.address),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // If the filter is active or set, show a filter bar at the bottom.
  if (filter_active || !app.store_filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if filter_active {
      format!("/{}_", app.store_filter)
    } else {
      format!("/{}", app.store_filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  // Scrollable list with cursor tracking.
  let mut state = ListState::default();
  state.select(if filtered.is_empty() {
    None
  } else {
    Some(app.store_cursor)
  });

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    inner_area,
    &mut state,
  );
}
