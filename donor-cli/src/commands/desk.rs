//! Interactive desk session.
//!
//! Drives a `DonorDesk` with prompts: fill the form and register, search,
//! pick a row and delete it. The results table and status line are redrawn
//! after every action. Recoverable errors only update the status line.

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing::debug;

use donor_core::config::AppConfig;
use donor_core::error::{DonorError, DonorResult};
use donor_models::Database;
use donor_services::{DonorDesk, DonorForm};

const ACTIONS: &[&str] = &["Register donor", "Search", "Select and delete", "Quit"];

pub fn run(config: &AppConfig) -> DonorResult<()> {
    let db = super::init_database(config)?;
    let form = DonorForm::from_config(&config.form)?;
    let mut desk = DonorDesk::new(db, form);
    let theme = ColorfulTheme::default();
    let term = Term::stderr();

    settle(desk.search(""))?;

    loop {
        render(&desk);

        let action = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(ACTIONS)
            .default(0)
            .interact_on_opt(&term)
            .map_err(prompt_error)?;

        match action {
            Some(0) => {
                fill_form(&mut desk, &theme)?;
                if settle(desk.register())?.is_some() {
                    settle(desk.refresh())?;
                }
            }
            Some(1) => {
                let criteria: String = Input::with_theme(&theme)
                    .with_prompt("Search (name or blood group)")
                    .allow_empty(true)
                    .with_initial_text(desk.criteria())
                    .interact_text()
                    .map_err(prompt_error)?;
                settle(desk.search(&criteria))?;
            }
            Some(2) => {
                choose_row(&mut desk, &theme, &term)?;
                settle(desk.delete_selected())?;
            }
            _ => break,
        }
    }

    Ok(())
}

fn render(desk: &DonorDesk<Database>) {
    println!();
    if desk.results().is_empty() {
        println!("No donors found.");
    } else {
        println!("{}", super::donor_table(desk.results()));
    }
    if let Some(status) = desk.status() {
        println!("{}", style(status).red());
    }
}

fn fill_form(desk: &mut DonorDesk<Database>, theme: &ColorfulTheme) -> DonorResult<()> {
    let form = desk.form().clone();

    let name: String = Input::with_theme(theme)
        .with_prompt("Name")
        .allow_empty(true)
        .with_initial_text(&form.name)
        .interact_text()
        .map_err(prompt_error)?;

    let groups: Vec<&str> = form.blood_group_choices().iter().map(|g| g.as_str()).collect();
    let group_idx = Select::with_theme(theme)
        .with_prompt("Blood group")
        .items(&groups)
        .default(groups.iter().position(|g| *g == form.blood_group).unwrap_or(0))
        .interact()
        .map_err(prompt_error)?;

    let contact: String = Input::with_theme(theme)
        .with_prompt("Contact")
        .allow_empty(true)
        .with_initial_text(&form.contact)
        .interact_text()
        .map_err(prompt_error)?;

    let banks = form.blood_bank_choices();
    let bank = if banks.is_empty() {
        Input::<String>::with_theme(theme)
            .with_prompt("Blood bank")
            .with_initial_text(&form.blood_bank)
            .interact_text()
            .map_err(prompt_error)?
    } else {
        let idx = Select::with_theme(theme)
            .with_prompt("Blood bank")
            .items(banks)
            .default(banks.iter().position(|b| *b == form.blood_bank).unwrap_or(0))
            .interact()
            .map_err(prompt_error)?;
        banks[idx].clone()
    };

    let fields = desk.form_mut();
    fields.name = name;
    fields.blood_group = groups[group_idx].to_string();
    fields.contact = contact;
    fields.blood_bank = bank;
    Ok(())
}

/// Let the user pick a result row. Escape leaves nothing selected.
fn choose_row(
    desk: &mut DonorDesk<Database>,
    theme: &ColorfulTheme,
    term: &Term,
) -> DonorResult<()> {
    desk.clear_selection();
    if desk.results().is_empty() {
        return Ok(());
    }

    let items: Vec<String> = desk
        .results()
        .iter()
        .map(|row| row.cells().join("  |  "))
        .collect();
    let picked = Select::with_theme(theme)
        .with_prompt("Donor to delete (Esc for none)")
        .items(&items)
        .default(0)
        .interact_on_opt(term)
        .map_err(prompt_error)?;

    if let Some(row) = picked {
        settle(desk.select(row).map(|_| ()))?;
    }
    Ok(())
}

/// Keep the session going on recoverable errors; the desk has already put
/// them in the status line.
fn settle<T>(result: DonorResult<T>) -> DonorResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => {
            debug!("desk action failed: {e}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn prompt_error(e: dialoguer::Error) -> DonorError {
    DonorError::Internal(format!("prompt failed: {e}"))
}
