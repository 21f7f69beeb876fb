use crate::global_settings::GlobalSettings;
use clap::{Arg, ArgAction, Command, arg, value_parser};

pub(crate) fn build_cli() -> Command {
    Command::new("iexpense")
        .version("0.1")
        .about("Keep track of your personal and business expenses")
        .args(GlobalSettings::cli())
        .subcommand(
            // Use    eval "$(iexpense completions zsh)"
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .value_name("SHELL")
                        .help("The shell to generate the completions for")
                        .required(true)
                        .value_parser(clap::builder::EnumValueParser::<
                            clap_complete_command::Shell,
                        >::new()),
                ),
        )
}

/// The commands accepted on each line of a session.
pub(crate) fn build_session() -> Command {
    let category = || {
        arg!(-c --category <CATEGORY> "Business, Personal or any other label")
    };

    Command::new("iexpense")
        .no_binary_name(true)
        .subcommand_required(true)
        .disable_version_flag(true)
        .subcommand(
            Command::new("add")
                .about("Add a new expense")
                .arg(arg!(<NAME> "Name of the expense"))
                .arg(
                    arg!(<AMOUNT> "Amount spent, e.g. 3.50")
                        .allow_negative_numbers(true),
                )
                .arg(category().default_value("Business"))
                .arg(arg!(--currency <CODE> "Defaults to the selected currency")),
        )
        .subcommand(
            Command::new("list")
                .alias("ls")
                .about("Show expenses, one table per category")
                .arg(category())
                .arg(arg!(--ids "Show expense ids"))
                .arg(arg!(--json "Output as JSON")),
        )
        .subcommand(
            Command::new("delete")
                .alias("rm")
                .about("Delete expenses given their position")
                .long_about(
                    "Delete expenses given their position.  With --category, \
                     positions are those shown in that category's table, \
                     otherwise they are positions in the full list.",
                )
                .arg(category())
                .arg(
                    Arg::new("index")
                        .value_name("INDEX")
                        .required(true)
                        .num_args(1..)
                        .action(ArgAction::Append)
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("currency")
                .about("Show or select the currency for new expenses")
                .arg(arg!([CODE] "ISO code of the currency, e.g. EUR")),
        )
        .subcommand(
            Command::new("currencies").about("List the known currencies"),
        )
        .subcommand(
            Command::new("totals").about("Show totals for each category"),
        )
        .subcommand(Command::new("quit").alias("exit").about("End the session"))
}
