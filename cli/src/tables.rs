#[derive(Clone, Copy)]
pub enum Width {
    Fixed(usize),
    Auto,
    ExpandWithMin(usize),
}
#[derive(Clone, Copy)]
pub enum Align {
    Left,
    Center,
    Right,
}
#[derive(Clone, Copy)]
pub enum ColumnFooter {
    Show,
    Hide,
}

pub struct Column<'a, TRow> {
    align: Align,
    width: Width,
    footer: ColumnFooter,
    title: Option<String>,
    get_content: &'a dyn Fn(&TRow) -> String,
    computed_width: usize,
}
impl<'a, TRow> Column<'a, TRow> {
    pub fn new(get_content: &'a dyn Fn(&TRow) -> String) -> Self {
        Self {
            align: Align::Left,
            width: Width::Auto,
            footer: ColumnFooter::Show,
            title: None,
            computed_width: 0,
            get_content,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_footer(mut self, footer: ColumnFooter) -> Self {
        self.footer = footer;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    fn title_width(&self) -> usize {
        self.title.as_ref().map_or(0, |t| t.chars().count())
    }
}

enum RowData {
    Separator,
    Cells(Vec<String>),
    Headers,
}

#[derive(Clone)]
pub struct Settings {
    pub colsep: String,
}
impl Default for Settings {
    fn default() -> Self {
        Settings {
            colsep: "│".to_string(),
        }
    }
}

pub struct Table<'a, TRow> {
    columns: Vec<Column<'a, TRow>>,
    rows: Vec<RowData>,
    title: Option<String>,
    settings: Settings,
}
impl<'a, TRow> Table<'a, TRow> {
    pub fn new(columns: Vec<Column<'a, TRow>>, settings: &Settings) -> Self {
        Self {
            rows: Vec::new(),
            columns,
            title: None,
            settings: settings.clone(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_col_headers(mut self) -> Self {
        self.rows.push(RowData::Headers);
        self.rows.push(RowData::Separator);
        self
    }

    pub fn add_rows<'r>(&mut self, rows: impl IntoIterator<Item = &'r TRow>)
    where
        TRow: 'r,
    {
        for row in rows {
            self.add_row(row);
        }
    }

    pub fn add_row(&mut self, row: &TRow) {
        self.rows.push(RowData::Cells(
            self.columns.iter().map(|col| (col.get_content)(row)).collect(),
        ));
    }

    pub fn add_footer(&mut self, total: &TRow) {
        self.rows.push(RowData::Separator);
        self.rows.push(RowData::Cells(
            self.columns
                .iter()
                .map(|col| match col.footer {
                    ColumnFooter::Hide => String::new(),
                    ColumnFooter::Show => (col.get_content)(total),
                })
                .collect(),
        ));
    }

    /// Compute the size allocated for each column.
    /// max_width should not include the space for column separators.
    fn compute_widths(&mut self, max_width: usize) {
        let mut expandable_count: usize = 0;
        let mut requested: usize = 0;

        for (colidx, col) in self.columns.iter_mut().enumerate() {
            let natural = self
                .rows
                .iter()
                .map(|row| match row {
                    RowData::Separator => 0,
                    RowData::Headers => col.title_width(),
                    RowData::Cells(cells) => {
                        cells.get(colidx).map_or(0, |c| c.chars().count())
                    }
                })
                .max()
                .unwrap_or(0);

            col.computed_width = match col.width {
                Width::Fixed(w) => w,
                Width::Auto => natural,
                Width::ExpandWithMin(min) => {
                    expandable_count += 1;
                    std::cmp::max(natural, min)
                }
            };
            requested += col.computed_width;
        }

        if requested <= max_width || expandable_count == 0 {
            return;
        }

        // Shrink expandable columns, evenly, but never below their minimum.
        // If the screen is really too narrow, rows will wrap.
        let mut excess = requested - max_width;
        let share = excess.div_ceil(expandable_count);
        for col in self.columns.iter_mut() {
            if let Width::ExpandWithMin(min) = col.width {
                let shrink = std::cmp::min(
                    std::cmp::min(share, excess),
                    col.computed_width.saturating_sub(min),
                );
                col.computed_width -= shrink;
                excess -= shrink;
            }
        }
    }

    pub fn to_string(&mut self, max_width: usize) -> String {
        let sep_width = self
            .columns
            .len()
            .saturating_sub(1)
            * self.settings.colsep.chars().count();
        self.compute_widths(max_width.saturating_sub(sep_width));

        let total_width: usize =
            self.columns.iter().map(|c| c.computed_width).sum::<usize>()
                + sep_width;
        let mut result = String::new();

        if let Some(title) = &self.title {
            push_align(&mut result, title, total_width, Align::Center);
            result.push('\n');
            push_sep(&mut result, total_width);
            result.push('\n');
        }

        for row in &self.rows {
            for (colidx, col) in self.columns.iter().enumerate() {
                if colidx > 0 {
                    result.push_str(&self.settings.colsep);
                }
                match row {
                    RowData::Separator => {
                        push_sep(&mut result, col.computed_width);
                    }
                    RowData::Headers => {
                        push_align(
                            &mut result,
                            truncate(
                                col.title.as_deref().unwrap_or(""),
                                col.computed_width,
                            ),
                            col.computed_width,
                            Align::Center,
                        );
                    }
                    RowData::Cells(cells) => {
                        push_align(
                            &mut result,
                            truncate(
                                cells.get(colidx).map_or("", String::as_str),
                                col.computed_width,
                            ),
                            col.computed_width,
                            col.align,
                        );
                    }
                }
            }
            result.push('\n');
        }

        result
    }
}

fn push_sep(into: &mut String, width: usize) {
    into.push_str(&format!("{:─^width$}", "", width = width));
}
fn push_align(into: &mut String, value: &str, width: usize, align: Align) {
    match align {
        Align::Left => into.push_str(&format!("{:<width$}", value)),
        Align::Center => into.push_str(&format!("{:^width$}", value)),
        Align::Right => into.push_str(&format!("{:>width$}", value)),
    }
}

/// Truncate the string if necessary, keeping the first characters
fn truncate(val: &str, width: usize) -> &str {
    val.char_indices()
        .nth(width)
        .map_or(val, |(i, _)| val.get(..i).unwrap_or(val))
}
