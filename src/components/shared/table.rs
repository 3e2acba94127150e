use ratatui::{
  layout::Constraint,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Cell, Row, Table},
};

pub type Accessor<T> = fn(&T) -> String;
pub type CellFormatter<T> = fn(&T) -> Line<'static>;

/// One column of a list table: a header, a field accessor and an optional formatter that sees the whole record.
pub struct Column<T> {
  pub header: &'static str,
  pub width: Constraint,
  pub accessor: Accessor<T>,
  pub formatter: Option<CellFormatter<T>>,
}

impl<T> Column<T> {
  pub fn new(header: &'static str, width: Constraint, accessor: Accessor<T>) -> Self {
    Column { header, width, accessor, formatter: None }
  }

  pub fn with_formatter(mut self, formatter: CellFormatter<T>) -> Self {
    self.formatter = Some(formatter);
    self
  }

  pub fn render_cell(&self, record: &T) -> Line<'static> {
    match self.formatter {
      Some(formatter) => formatter(record),
      None => Line::from((self.accessor)(record)),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
  Loading,
  Rows(Vec<Vec<Line<'static>>>),
}

/// Rendered cells of a list, independent of the record type.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
  pub headers: Vec<&'static str>,
  pub widths: Vec<Constraint>,
  pub body: TableBody,
}

impl TableModel {
  /// Records win over the loading flag so a refresh keeps the current rows on screen.
  pub fn build<T>(columns: &[Column<T>], records: &[T], loading: bool) -> Self {
    let body = if loading && records.is_empty() {
      TableBody::Loading
    } else {
      TableBody::Rows(records.iter().map(|record| columns.iter().map(|c| c.render_cell(record)).collect()).collect())
    };
    TableModel {
      headers: columns.iter().map(|c| c.header).collect(),
      widths: columns.iter().map(|c| c.width).collect(),
      body,
    }
  }

  pub fn row_count(&self) -> usize {
    match &self.body {
      TableBody::Loading => 0,
      TableBody::Rows(rows) => rows.len(),
    }
  }

  pub fn to_widget<'a>(&self, block: Block<'a>) -> Table<'a> {
    let header = Row::new(self.headers.iter().map(|header| Cell::from(*header)))
      .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = match &self.body {
      TableBody::Loading => {
        vec![Row::new(vec![Cell::from(Span::styled("Loading...", Style::default().add_modifier(Modifier::DIM)))])]
      },
      TableBody::Rows(rows) => rows.iter().map(|cells| Row::new(cells.clone())).collect(),
    };

    Table::new(rows, self.widths.clone())
      .header(header)
      .block(block)
      .style(Style::default().fg(Color::White))
      .row_highlight_style(Style::default().add_modifier(Modifier::BOLD))
      .highlight_symbol("→ ")
  }
}

/// Concatenated text of a rendered cell.
pub fn line_text(line: &Line<'_>) -> String {
  line.spans.iter().map(|span| span.content.as_ref()).collect()
}
