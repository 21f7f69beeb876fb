use crate::args::build_session;
use crate::global_settings::GlobalSettings;
use crate::list_view::list_view;
use anyhow::Result;
use clap::ArgMatches;
use expense_lib::categories::Category;
use expense_lib::currencies::{
    CurrencyCatalog, StaticCatalog, normalize_code, picker_label,
};
use expense_lib::expenses::{Expense, ExpenseDraft, parse_amount};
use expense_lib::store::ExpenseStore;
use itertools::Itertools;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::rc::Rc;

enum Outcome {
    Continue(String),
    Quit,
}

/// One run of the application.  The expenses only live as long as the
/// session.
pub struct Session {
    settings: GlobalSettings,
    store: ExpenseStore,
    catalog: StaticCatalog,

    // Set by the store observer, reset once the tables have been shown
    changed: Rc<Cell<bool>>,
}

impl Session {
    pub fn new(settings: GlobalSettings) -> Self {
        let mut store = ExpenseStore::default();
        let changed = Rc::new(Cell::new(false));
        let flag = changed.clone();
        store.subscribe(move |change| {
            log::debug!("store changed: {:?}", change);
            flag.set(true);
        });
        Session {
            settings,
            store,
            catalog: StaticCatalog,
            changed,
        }
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    /// Execute all commands read from `input`, until end of input or the
    /// "quit" command.  Errors in a command are reported and do not stop
    /// the session.
    pub fn run(
        &mut self,
        input: impl BufRead,
        out: &mut impl Write,
    ) -> Result<()> {
        self.prompt(out)?;
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                self.prompt(out)?;
                continue;
            }

            match self.execute(line) {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Continue(text)) => out.write_all(text.as_bytes())?,
                Err(e) => {
                    log::warn!("{:?}: {}", line, e);
                    writeln!(out, "error: {}", e)?;
                }
            }

            if self.changed.replace(false) && self.settings.interactive {
                out.write_all(self.list(None, false).as_bytes())?;
            }
            self.prompt(out)?;
        }
        out.flush()?;
        Ok(())
    }

    fn prompt(&self, out: &mut impl Write) -> Result<()> {
        if self.settings.interactive {
            write!(out, "{}> ", self.settings.currency.selected())?;
            out.flush()?;
        }
        Ok(())
    }

    fn execute(&mut self, line: &str) -> Result<Outcome> {
        let Some(words) = shlex::split(line) else {
            anyhow::bail!("unbalanced quotes");
        };
        let args = match build_session().try_get_matches_from(words) {
            Ok(args) => args,

            // Also used for --help
            Err(e) => return Ok(Outcome::Continue(e.render().to_string())),
        };

        match args.subcommand() {
            Some(("add", sub)) => self.add(sub),
            Some(("list", sub)) => {
                let category = sub
                    .get_one::<String>("category")
                    .map(|c| Category::from(c.as_str()));
                if sub.get_flag("json") {
                    let expenses: Vec<&Expense> = match &category {
                        None => self.store.all().iter().collect(),
                        Some(c) => self.store.filtered_by(c),
                    };
                    Ok(Outcome::Continue(format!(
                        "{}\n",
                        serde_json::to_string_pretty(&expenses)?
                    )))
                } else {
                    Ok(Outcome::Continue(
                        self.list(category, sub.get_flag("ids")),
                    ))
                }
            }
            Some(("delete", sub)) => self.delete(sub),
            Some(("currency", sub)) => {
                if let Some(code) = sub.get_one::<String>("CODE") {
                    self.settings.currency.select(code)?;
                    let selected = self.settings.currency.selected();
                    if !self.catalog.is_known(selected) {
                        log::warn!("{} is not a known currency", selected);
                    }
                    log::info!("selected currency {}", selected);
                }
                Ok(Outcome::Continue(format!(
                    "Selected currency: {}\n",
                    picker_label(&self.catalog, self.settings.currency.selected())
                )))
            }
            Some(("currencies", _)) => Ok(Outcome::Continue(
                self.catalog
                    .currency_codes()
                    .iter()
                    .map(|code| {
                        format!("{}\n", picker_label(&self.catalog, code))
                    })
                    .collect(),
            )),
            Some(("totals", _)) => Ok(Outcome::Continue(
                self.store
                    .categories()
                    .iter()
                    .map(|c| {
                        let totals = self.store.totals(c);
                        format!(
                            "{}: {}\n",
                            c,
                            if totals.is_zero() {
                                "0".to_string()
                            } else {
                                totals.display()
                            }
                        )
                    })
                    .collect(),
            )),
            Some(("quit", _)) => Ok(Outcome::Quit),
            Some((name, _)) => anyhow::bail!("unknown command {}", name),
            None => anyhow::bail!("missing command"),
        }
    }

    fn add(&mut self, args: &ArgMatches) -> Result<Outcome> {
        let currency = match args.get_one::<String>("currency") {
            Some(code) => normalize_code(code)?,
            None => self.settings.currency.selected().to_string(),
        };
        let mut draft = ExpenseDraft::new(&currency);
        if let Some(name) = args.get_one::<String>("NAME") {
            draft = draft.with_name(name);
        }
        if let Some(amount) = args.get_one::<String>("AMOUNT") {
            draft = draft.with_amount(parse_amount(amount)?);
        }
        if let Some(category) = args.get_one::<String>("category") {
            draft = draft.with_category(Category::from(category.as_str()));
        }

        let expense = draft.into_expense();
        let text = format!(
            "Added {} ({}, {})\n",
            expense.name(),
            expense.category(),
            expense.display_amount()
        );
        self.store.add(expense);
        Ok(Outcome::Continue(text))
    }

    fn delete(&mut self, args: &ArgMatches) -> Result<Outcome> {
        let positions: BTreeSet<usize> = args
            .get_many::<usize>("index")
            .into_iter()
            .flatten()
            .copied()
            .collect();
        let removed = match args.get_one::<String>("category") {
            None => self.store.remove_at(&positions)?,
            Some(c) => self
                .store
                .remove_in_category(&Category::from(c.as_str()), &positions)?,
        };
        Ok(Outcome::Continue(format!(
            "Deleted {}\n",
            removed.iter().map(|e| e.name()).join(", ")
        )))
    }

    fn list(&self, category: Option<Category>, column_id: bool) -> String {
        list_view(
            &self.store,
            &crate::list_view::Settings {
                categories: match category {
                    None => self.store.categories(),
                    Some(c) => vec![c],
                },
                column_level: true,
                column_id,
                table: self.settings.table.clone(),
                width: self.settings.width,
            },
        )
    }
}
