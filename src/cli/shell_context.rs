//! Command dispatch and rendering for the month manager shell.

use strsim::levenshtein;
use thiserror::Error;

use crate::config::{Config, ConfigManager};
use crate::core::budget_manager::BudgetManager;
use crate::core::services::{ServiceError, SummaryService};
use crate::ledger::{parse_date, Category, Period, Transaction};
use crate::utils::format::format_amount;

use super::output::{self, OutputPreferences};
use super::CliError;

const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Failures of a single command. The shell reports them and keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

struct CommandSpec {
    name: &'static str,
    usage: &'static str,
    summary: &'static str,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "month",
        usage: "month [YYYY-MM]",
        summary: "Show or change the selected month",
    },
    CommandSpec {
        name: "next",
        usage: "next",
        summary: "Select the following month",
    },
    CommandSpec {
        name: "prev",
        usage: "prev",
        summary: "Select the previous month",
    },
    CommandSpec {
        name: "add-expense",
        usage: "add-expense <name> <amount> [category] [YYYY-MM-DD]",
        summary: "Record an expense (category defaults to Other, date to today)",
    },
    CommandSpec {
        name: "add-income",
        usage: "add-income <source> <amount> [YYYY-MM-DD]",
        summary: "Record an income entry",
    },
    CommandSpec {
        name: "delete",
        usage: "delete <id>",
        summary: "Delete a transaction by id or id prefix",
    },
    CommandSpec {
        name: "list",
        usage: "list",
        summary: "List expenses and income for the selected month",
    },
    CommandSpec {
        name: "summary",
        usage: "summary",
        summary: "Show totals, balance, and spend per category",
    },
    CommandSpec {
        name: "categories",
        usage: "categories",
        summary: "List expense categories",
    },
    CommandSpec {
        name: "help",
        usage: "help [command]",
        summary: "Show available commands",
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        summary: "Leave the shell",
    },
];

/// State shared across shell commands.
pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    manager: BudgetManager,
    currency_symbol: String,
}

impl ShellContext {
    /// Loads the user's config and opens their data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let manager = BudgetManager::open(&config_manager, &config)?;
        tracing::debug!(base = %config_manager.base_dir().display(), "shell context ready");
        Ok(Self::with_manager(mode, manager, &config))
    }

    pub fn with_manager(mode: CliMode, manager: BudgetManager, config: &Config) -> Self {
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
        });
        Self {
            mode,
            running: true,
            manager,
            currency_symbol: config.currency_symbol.clone(),
        }
    }

    pub fn manager(&self) -> &BudgetManager {
        &self.manager
    }

    pub fn prompt(&self) -> String {
        format!("month-manager [{}]> ", self.manager.period())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = COMMANDS.iter().map(|spec| spec.name).collect();
        names.push("quit");
        names
    }

    pub fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        match command {
            "month" => self.cmd_month(args)?,
            "next" => self.change_period(self.manager.period().next()),
            "prev" => self.change_period(self.manager.period().previous()),
            "add-expense" => self.cmd_add_expense(args)?,
            "add-income" => self.cmd_add_income(args)?,
            "delete" => self.cmd_delete(args)?,
            "list" => self.cmd_list(),
            "summary" => self.cmd_summary(),
            "categories" => self.cmd_categories(),
            "help" => self.cmd_help(args),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            _ => self.suggest_command(raw),
        }
        Ok(LoopControl::Continue)
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Service(ServiceError::Rejected(reason)) => {
                output::error(format!("Entry not recorded: {reason}"));
            }
            CommandError::Service(other) => {
                tracing::error!(error = %other, "command failed");
                output::error(other);
            }
        }
    }

    pub fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    fn cmd_month(&mut self, args: &[&str]) -> Result<(), CommandError> {
        match args {
            [] => {
                output::info(format!("Selected month: {}", self.manager.period()));
                Ok(())
            }
            [raw] => {
                let period: Period = raw.parse().map_err(|_| {
                    CommandError::InvalidArguments(format!(
                        "`{raw}` is not a month; expected YYYY-MM"
                    ))
                })?;
                self.change_period(period);
                Ok(())
            }
            _ => Err(usage_error("month")),
        }
    }

    fn change_period(&mut self, period: Period) {
        self.manager.select_period(period);
        output::success(format!("Selected month: {period}"));
    }

    fn cmd_add_expense(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let (name, amount, category, date) = match args {
            [name, amount] => (*name, *amount, None, None),
            [name, amount, third] if parse_date(third).is_ok() => {
                (*name, *amount, None, Some(*third))
            }
            [name, amount, category] => (*name, *amount, Some(*category), None),
            [name, amount, category, date] => (*name, *amount, Some(*category), Some(*date)),
            _ => return Err(usage_error("add-expense")),
        };
        let id = self.manager.add_expense(name, amount, category, date)?;
        self.report_added("expense", id)
    }

    fn cmd_add_income(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let (source, amount, date) = match args {
            [source, amount] => (*source, *amount, None),
            [source, amount, date] => (*source, *amount, Some(*date)),
            _ => return Err(usage_error("add-income")),
        };
        let id = self.manager.add_income(source, amount, date)?;
        self.report_added("income", id)
    }

    fn report_added(&self, noun: &str, id: uuid::Uuid) -> Result<(), CommandError> {
        let period = self.manager.period();
        match self.manager.transactions().iter().find(|txn| txn.id() == id) {
            Some(txn) if period.contains(txn.date()) => {
                output::success(format!(
                    "Added {noun} {} ({}) [{}]",
                    txn.label(),
                    self.amount(txn.amount()),
                    short_id(txn)
                ));
            }
            Some(txn) => {
                output::success(format!("Added {noun} {} [{}]", txn.label(), short_id(txn)));
                output::hint(format!(
                    "Dated {}; use `month {}` to see it.",
                    txn.date(),
                    Period::from_date(txn.date())
                ));
            }
            None => {
                output::success(format!("Added {noun} [{}]", &id.to_string()[..SHORT_ID_LEN]));
                output::hint("It is dated outside the selected month.");
            }
        }
        Ok(())
    }

    fn cmd_delete(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let [needle] = args else {
            return Err(usage_error("delete"));
        };
        if self.manager.delete_matching(needle)? {
            output::success("Transaction deleted.");
        } else {
            output::warning("Nothing to delete.");
        }
        Ok(())
    }

    fn cmd_list(&self) {
        let period = self.manager.period();
        let (expenses, incomes) = SummaryService::split_by_kind(&self.manager.visible());

        output::section(format!("Expenses for {period}"));
        if expenses.is_empty() {
            output::info("No expenses yet.");
        }
        for txn in &expenses {
            let detail = format!("{} • {}", txn.category().unwrap_or_default(), txn.date());
            output::info(self.list_row(txn, &detail));
        }

        output::section(format!("Income for {period}"));
        if incomes.is_empty() {
            output::info("No income yet.");
        }
        for txn in &incomes {
            output::info(self.list_row(txn, &txn.date().to_string()));
        }
    }

    fn list_row(&self, txn: &Transaction, detail: &str) -> String {
        format!(
            "{}  {:<20} {:<26} {:>12}",
            short_id(txn),
            txn.label(),
            detail,
            self.amount(txn.amount())
        )
    }

    fn cmd_summary(&self) {
        let summary = self.manager.summary();
        output::section(format!("Monthly Summary ({})", summary.period));
        output::info(format!("Total Income: {}", self.amount(summary.total_income)));
        output::info(format!(
            "Total Expenses: {}",
            self.amount(summary.total_expenses)
        ));
        output::info(format!(
            "Balance: {}",
            output::signed(summary.balance, self.amount(summary.balance))
        ));
        for (category, total) in summary.category_totals.iter() {
            output::info(format!("  {category}: {}", self.amount(total)));
        }
    }

    fn cmd_categories(&self) {
        output::section("Categories");
        for category in Category::ALL {
            output::info(format!("  {category}"));
        }
    }

    fn cmd_help(&self, args: &[&str]) {
        if let Some(name) = args.first() {
            match COMMANDS.iter().find(|spec| spec.name == name.to_lowercase()) {
                Some(spec) => {
                    output::info(format!("Usage: {}", spec.usage));
                    output::hint(spec.summary);
                }
                None => self.suggest_command(name),
            }
            return;
        }
        output::section("Commands");
        for spec in COMMANDS {
            output::info(format!("  {:<52} {}", spec.usage, spec.summary));
        }
    }

    fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let needle = input.to_lowercase();
        let best = COMMANDS
            .iter()
            .map(|spec| (levenshtein(spec.name, &needle), spec.name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    fn amount(&self, value: f64) -> String {
        format_amount(value, &self.currency_symbol)
    }
}

fn usage_error(command: &str) -> CommandError {
    let usage = COMMANDS
        .iter()
        .find(|spec| spec.name == command)
        .map(|spec| spec.usage)
        .unwrap_or(command);
    CommandError::InvalidArguments(format!("Usage: {usage}"))
}

fn short_id(txn: &Transaction) -> String {
    txn.id().to_string()[..SHORT_ID_LEN].to_string()
}
