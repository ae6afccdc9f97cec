//! Interactive menu loop driving the core command interface.
//!
//! All ledger semantics live in [`crate::core`]; this module only prompts,
//! prints, and relays raw field values.

pub mod format;

use chrono::Local;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use uuid::Uuid;

use crate::core::{
    App, Confirmation, EntryForm, LedgerStore, Notification, NotificationKind, UuidIdGenerator,
};
use crate::domain::Category;
use crate::errors::LedgerError;
use crate::storage::JsonSlotStorage;
use crate::view::ViewFilter;

use format::{format_money, format_row, DisplayOptions};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Entry point for the interactive shell.
pub fn run_cli() -> Result<(), CliError> {
    let mut app = open_app()?;
    let theme = ColorfulTheme::default();
    let opts = DisplayOptions::default();

    loop {
        let choices = [
            "Add transaction",
            "Edit transaction",
            "Delete transaction",
            "List transactions",
            "Summary",
            "Filter",
            "Exit",
        ];
        let selection = Select::with_theme(&theme)
            .with_prompt(format!("fintrack (filter: {})", app.filter()))
            .items(&choices)
            .default(0)
            .interact()?;
        match selection {
            0 => add_transaction(&mut app, &theme)?,
            1 => edit_transaction(&mut app, &theme, &opts)?,
            2 => delete_transaction(&mut app, &theme, &opts)?,
            3 => list_transactions(&app, &opts),
            4 => show_summary(&app, &opts),
            5 => choose_filter(&mut app, &theme)?,
            _ => break,
        }
    }
    Ok(())
}

/// Loads the persisted ledger. A corrupt or too-new slot is reported to the
/// user before continuing with an empty ledger; the unreadable blob stays on
/// disk until the next successful save.
fn open_app() -> Result<App, CliError> {
    match LedgerStore::open(
        Box::new(JsonSlotStorage::file_backed()?),
        Box::new(UuidIdGenerator),
    ) {
        Ok(store) => Ok(App::new(store)),
        Err(err @ (LedgerError::CorruptData(_) | LedgerError::SchemaVersion { .. })) => {
            print_notification(&Notification::error(err.to_string()));
            println!(
                "{}",
                "Starting with an empty ledger. The stored data is kept until the next save."
                    .yellow()
            );
            Ok(App::new(LedgerStore::new(
                Box::new(JsonSlotStorage::file_backed()?),
                Box::new(UuidIdGenerator),
            )))
        }
        Err(err) => Err(err.into()),
    }
}

fn add_transaction(app: &mut App, theme: &ColorfulTheme) -> Result<(), CliError> {
    let form = prompt_entry_form(theme, None)?;
    print_notification(&app.submit_form(form));
    Ok(())
}

fn edit_transaction(
    app: &mut App,
    theme: &ColorfulTheme,
    opts: &DisplayOptions,
) -> Result<(), CliError> {
    let id = match choose_record(app, theme, opts, "Edit which transaction?")? {
        Some(id) => id,
        None => return Ok(()),
    };
    let prefill = app.request_edit(id)?;
    let form = match prompt_entry_form(theme, Some(&prefill)) {
        Ok(form) => form,
        Err(err) => {
            app.cancel_edit();
            return Err(err);
        }
    };
    print_notification(&app.submit_form(form));
    Ok(())
}

fn delete_transaction(
    app: &mut App,
    theme: &ColorfulTheme,
    opts: &DisplayOptions,
) -> Result<(), CliError> {
    let id = match choose_record(app, theme, opts, "Delete which transaction?")? {
        Some(id) => id,
        None => return Ok(()),
    };
    let confirmed = Confirm::with_theme(theme)
        .with_prompt("Delete this transaction?")
        .default(false)
        .interact()?;
    let confirmation = if confirmed {
        Confirmation::Confirmed
    } else {
        Confirmation::Declined
    };
    match app.request_delete(id, confirmation) {
        Some(notification) => print_notification(&notification),
        None => println!("Deletion cancelled."),
    }
    Ok(())
}

fn list_transactions(app: &App, opts: &DisplayOptions) {
    let rows = app.projection();
    if rows.is_empty() {
        println!("No transactions found.");
        return;
    }
    for record in rows {
        println!("{}", format_row(record, opts));
    }
}

fn show_summary(app: &App, opts: &DisplayOptions) {
    let totals = app.totals();
    println!("Income:  {}", format_money(totals.income, opts).green());
    println!("Expense: {}", format_money(totals.expense, opts).red());
    let balance = format_money(totals.balance, opts);
    if totals.balance < 0.0 {
        println!("Balance: {}", balance.red());
    } else {
        println!("Balance: {}", balance);
    }
}

fn choose_filter(app: &mut App, theme: &ColorfulTheme) -> Result<(), CliError> {
    let labels: Vec<&str> = ViewFilter::ALL.iter().map(|filter| filter.as_str()).collect();
    let current = ViewFilter::ALL
        .iter()
        .position(|filter| *filter == app.filter())
        .unwrap_or(0);
    let selection = Select::with_theme(theme)
        .with_prompt("Show")
        .items(&labels)
        .default(current)
        .interact()?;
    app.select_filter(ViewFilter::ALL[selection]);
    Ok(())
}

/// Prompts for every entry field, prefilled from `initial` when editing.
fn prompt_entry_form(
    theme: &ColorfulTheme,
    initial: Option<&EntryForm>,
) -> Result<EntryForm, CliError> {
    let description: String = {
        let mut input = Input::with_theme(theme).with_prompt("Description");
        if let Some(form) = initial {
            input = input.with_initial_text(form.description.clone());
        }
        input.interact_text()?
    };
    let amount: String = {
        let mut input = Input::with_theme(theme).with_prompt("Amount");
        if let Some(form) = initial {
            input = input.with_initial_text(form.amount.clone());
        }
        input.interact_text()?
    };
    let categories: Vec<&str> = Category::ALL.iter().map(|category| category.as_str()).collect();
    let category_default = initial
        .and_then(|form| categories.iter().position(|name| **name == form.category))
        .unwrap_or(0);
    let category_index = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&categories)
        .default(category_default)
        .interact()?;
    let kinds = ["income", "expense"];
    let kind_default = initial
        .and_then(|form| kinds.iter().position(|name| **name == form.kind))
        .unwrap_or(0);
    let kind_index = Select::with_theme(theme)
        .with_prompt("Kind")
        .items(&kinds)
        .default(kind_default)
        .interact()?;
    let date_initial = initial
        .map(|form| form.date.clone())
        .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
    let date: String = Input::with_theme(theme)
        .with_prompt("Date (YYYY-MM-DD)")
        .with_initial_text(date_initial)
        .interact_text()?;

    Ok(EntryForm {
        description,
        amount,
        category: categories[category_index].to_string(),
        kind: kinds[kind_index].to_string(),
        date,
    })
}

/// Lets the user pick a record from the current projection. Returns `None`
/// when the list is empty.
fn choose_record(
    app: &App,
    theme: &ColorfulTheme,
    opts: &DisplayOptions,
    prompt: &str,
) -> Result<Option<Uuid>, CliError> {
    let rows = app.projection();
    if rows.is_empty() {
        println!("No transactions found.");
        return Ok(None);
    }
    let labels: Vec<String> = rows.iter().map(|record| format_row(record, opts)).collect();
    let selection = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Some(rows[selection].id))
}

fn print_notification(notification: &Notification) {
    match notification.kind {
        NotificationKind::Success => {
            println!("{}", format!("✔ {}", notification.message).green())
        }
        NotificationKind::Warning => {
            println!("{}", format!("⚠ {}", notification.message).yellow())
        }
        NotificationKind::Error => {
            println!("{}", format!("✖ {}", notification.message).red())
        }
    }
}
