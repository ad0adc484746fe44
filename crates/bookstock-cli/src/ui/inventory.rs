//! Inventory table pane and its prompt overlays.

use bookstock_core::{
  gateway::Gateway,
  sort::{SortDirection, SortKey},
};
use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row,
    Table, TableState,
  },
};

use crate::app::{App, InputMode};

const COLUMNS: [(&str, SortKey); 6] = [
  ("1 Id", SortKey::Id),
  ("2 Title", SortKey::Title),
  ("3 Author", SortKey::AuthorName),
  ("4 Price", SortKey::Price),
  ("5 Pages", SortKey::PageCount),
  ("6 Format", SortKey::Format),
];

/// Render the inventory table into `area`.
pub fn draw<G: Gateway>(f: &mut Frame, area: Rect, app: &App<G>) {
  let view = app.engine.books();

  let store_name = app
    .engine
    .store_id()
    .and_then(|id| app.stores.iter().find(|s| s.id == id))
    .map(|s| s.name.clone())
    .unwrap_or_else(|| "?".to_string());

  let title = if app.engine.is_loading() {
    format!(" {store_name} — loading… ")
  } else {
    format!(" {store_name} ({} books) ", view.len())
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let mut inner = block.inner(area);
  f.render_widget(block, area);

  // Load errors stay visible until the next successful reload.
  if let Some(error) = app.engine.error()
    && inner.height > 1
  {
    let error_area = Rect { height: 1, ..inner };
    inner.y += 1;
    inner.height -= 1;
    f.render_widget(
      Paragraph::new(format!("⚠ {error}"))
        .style(Style::default().fg(Color::Red)),
      error_area,
    );
  }

  // Search bar at the bottom while searching or when a term is set.
  let searching = app.input == InputMode::Search;
  if (searching || !app.engine.search_term().is_empty()) && inner.height > 2 {
    let search_area = Rect {
      x:      inner.x,
      y:      inner.y + inner.height - 1,
      width:  inner.width,
      height: 1,
    };
    inner.height -= 1;

    let text = if searching {
      format!("/{}_", app.engine.search_term())
    } else {
      format!("/{}", app.engine.search_term())
    };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
      search_area,
    );
  }

  // Header row with the active sort marker.
  let sort = app.engine.sort();
  let header = Row::new(COLUMNS.map(|(label, key)| {
    let marker = match (sort.key == Some(key), sort.direction) {
      (true, SortDirection::Asc) => " ▲",
      (true, SortDirection::Desc) => " ▼",
      (false, _) => "",
    };
    Cell::from(format!("{label}{marker}"))
  }))
  .style(Style::default().add_modifier(Modifier::BOLD));

  let rows: Vec<Row> = view
    .iter()
    .map(|b| {
      Row::new(vec![
        Cell::from(b.book.id.to_string()),
        Cell::from(b.book.title.clone()),
        Cell::from(b.author_name.clone()),
        Cell::from(format!("{:>8.2}", b.price)),
        Cell::from(b.book.page_count.to_string()),
        Cell::from(b.book.format.as_str().to_string()),
      ])
    })
    .collect();

  let mut state = TableState::default();
  state.select(if view.is_empty() { None } else { Some(app.inv_cursor) });

  let table = Table::new(
    rows,
    [
      Constraint::Length(5),
      Constraint::Percentage(36),
      Constraint::Percentage(24),
      Constraint::Length(9),
      Constraint::Length(7),
      Constraint::Length(10),
    ],
  )
  .header(header)
  .row_highlight_style(
    Style::default()
      .bg(Color::Blue)
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );

  f.render_stateful_widget(table, inner, &mut state);
}

// ─── Overlays ─────────────────────────────────────────────────────────────────

/// The add-book picker: catalog books not yet stocked in this store.
pub fn draw_add_picker<G: Gateway>(f: &mut Frame, area: Rect, app: &App<G>) {
  let available = app.engine.available_books();

  let height = (available.len() as u16 + 2).clamp(3, area.height);
  let popup = super::centered_rect(area, 60, height);
  f.render_widget(Clear, popup);

  let block = Block::default()
    .title(format!(" Add a book ({}) ", available.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  let items: Vec<ListItem> = available
    .iter()
    .map(|b| {
      ListItem::new(Line::from(vec![
        Span::styled(
          format!("{:>3}  ", b.book.id),
          Style::default().fg(Color::DarkGray),
        ),
        Span::raw(b.book.title.clone()),
        Span::styled(
          format!("  — {}", b.author_name),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(if available.is_empty() {
    None
  } else {
    Some(app.add_cursor)
  });

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    popup,
    &mut state,
  );
}

/// A one-line price input box.
pub fn draw_price_prompt(f: &mut Frame, area: Rect, label: &str, buffer: &str) {
  let popup = super::centered_rect(area, 40, 3);
  f.render_widget(Clear, popup);

  let block = Block::default()
    .title(format!(" {label} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(popup);
  f.render_widget(block, popup);

  f.render_widget(
    Paragraph::new(format!("{buffer}_")).style(Style::default().fg(Color::Yellow)),
    inner,
  );
}
