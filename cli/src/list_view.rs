use crate::tables::{Align, Column, ColumnFooter, Table, Width};
use expense_lib::categories::Category;
use expense_lib::expenses::Expense;
use expense_lib::store::ExpenseStore;
use expense_lib::totals::CurrencyTotals;

pub struct Settings {
    // One table per category, in this order
    pub categories: Vec<Category>,

    pub column_level: bool,
    pub column_id: bool,

    pub table: crate::tables::Settings,
    pub width: usize,
}

enum Row<'a> {
    Expense(usize, &'a Expense), // position in the category's list
    Total(CurrencyTotals),
}

pub fn list_view(store: &ExpenseStore, settings: &Settings) -> String {
    let index_image = |row: &Row| match row {
        Row::Expense(idx, _) => idx.to_string(),
        Row::Total(_) => String::new(),
    };
    let name_image = |row: &Row| match row {
        Row::Expense(_, e) => e.name().to_string(),
        Row::Total(_) => "Total".to_string(),
    };
    let amount_image = |row: &Row| match row {
        Row::Expense(_, e) => e.display_amount(),
        Row::Total(t) => t.display(),
    };
    let level_image = |row: &Row| match row {
        Row::Expense(_, e) => e.level().label().to_string(),
        Row::Total(_) => String::new(),
    };
    let id_image = |row: &Row| match row {
        Row::Expense(_, e) => e.id().short(),
        Row::Total(_) => String::new(),
    };

    let mut output = String::new();
    for category in &settings.categories {
        let expenses = store.filtered_by(category);
        if expenses.is_empty() {
            output.push_str(&format!("{}: no expenses\n\n", category));
            continue;
        }

        let mut columns = vec![
            Column::new(&index_image)
                .with_title("#")
                .with_align(Align::Right)
                .with_footer(ColumnFooter::Hide),
            Column::new(&name_image)
                .with_title("Name")
                .with_width(Width::ExpandWithMin(8)),
            Column::new(&amount_image)
                .with_title("Amount")
                .with_align(Align::Right),
        ];
        if settings.column_level {
            columns.push(
                Column::new(&level_image)
                    .with_title("Level")
                    .with_footer(ColumnFooter::Hide),
            );
        }
        if settings.column_id {
            columns.push(
                Column::new(&id_image)
                    .with_title("Id")
                    .with_width(Width::Fixed(8))
                    .with_footer(ColumnFooter::Hide),
            );
        }

        let mut table = Table::new(columns, &settings.table)
            .with_title(category.label())
            .with_col_headers();
        let rows: Vec<Row> = expenses
            .into_iter()
            .enumerate()
            .map(|(idx, e)| Row::Expense(idx, e))
            .collect();
        table.add_rows(&rows);
        table.add_footer(&Row::Total(store.totals(category)));

        output.push_str(&table.to_string(settings.width));
        output.push('\n');
    }
    output
}
