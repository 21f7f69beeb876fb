use clap::{Arg, ArgMatches, arg, value_parser};
use console::Term;
use expense_lib::currencies::{CurrencySettings, DEFAULT_CURRENCY};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

pub struct GlobalSettings {
    // Currency for new expenses, until changed in the session
    pub currency: CurrencySettings,

    // Read commands from this file rather than from the terminal
    pub script: Option<PathBuf>,

    // Maximum width for tables
    pub width: usize,

    // Show the prompt and the tables after each change
    pub interactive: bool,

    pub table: crate::tables::Settings,
}

impl GlobalSettings {
    /// Return the command line switches to configure the global settings
    pub fn cli() -> impl IntoIterator<Item = Arg> {
        [
            arg!(--currency <CODE> "Currency for new expenses")
                .default_value(DEFAULT_CURRENCY),
            arg!(--script <FILE> "Read commands from FILE")
                .value_parser(value_parser!(PathBuf)),
            arg!(--width <COLUMNS> "Maximum width of tables")
                .value_parser(value_parser!(usize)),
        ]
    }

    /// Create the settings from the command line arguments.
    pub fn new(args: &ArgMatches) -> anyhow::Result<Self> {
        let currency = CurrencySettings::new(
            args.get_one::<String>("currency")
                .map_or(DEFAULT_CURRENCY, String::as_str),
        )?;
        let script = args.get_one::<PathBuf>("script").cloned();
        let width = match args.get_one::<usize>("width") {
            Some(w) => *w,
            None => Term::stdout().size().1 as usize,
        };
        Ok(GlobalSettings {
            interactive: is_interactive(
                script.as_deref(),
                std::io::stdin().is_terminal(),
                console::user_attended(),
            ),
            currency,
            script,
            width,
            table: crate::tables::Settings::default(),
        })
    }
}

/// The prompt and tables are only shown when commands are typed by a user
/// who also sees the output: no script, and both stdin and stdout are
/// terminals.
fn is_interactive(
    script: Option<&Path>,
    stdin_is_terminal: bool,
    stdout_is_terminal: bool,
) -> bool {
    script.is_none() && stdin_is_terminal && stdout_is_terminal
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            currency: CurrencySettings::default(),
            script: None,
            width: 80,
            interactive: false,
            table: crate::tables::Settings::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::global_settings::is_interactive;
    use std::path::Path;

    #[test]
    fn test_is_interactive() {
        assert!(is_interactive(None, true, true));

        // Commands piped in, output on a terminal
        assert!(!is_interactive(None, false, true));

        // Output redirected
        assert!(!is_interactive(None, true, false));

        assert!(!is_interactive(Some(Path::new("cmds.txt")), true, true));
    }
}
