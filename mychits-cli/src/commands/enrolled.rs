//! Enrolled command - the user's groups with amount paid

use anyhow::Result;
use colored::Colorize;

use mychits_core::format::CurrencyFormat;

use super::{get_context, startup_probe};
use crate::output;

pub fn run(user: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context(user)?;
    startup_probe(&ctx);

    let result = output::with_spinner("Fetching your groups...", || {
        ctx.group_service.enrolled_groups()
    });

    if json {
        return output::json_result(result);
    }
    let result = result?;

    for warning in &result.warnings {
        output::warning(warning);
    }

    if result.groups.is_empty() {
        output::info("You are not enrolled in any group yet");
        return Ok(());
    }

    let rupees = CurrencyFormat::rupees();
    let mut table = output::create_table();
    table.set_header(vec!["Group", "Tickets", "Value", "Paid"]);
    for enrolled in &result.groups {
        let paid = if enrolled.amount_paid.is_missing() {
            "N/A".dimmed().to_string()
        } else {
            rupees.format(enrolled.amount_paid.clone())
        };
        table.add_row(vec![
            enrolled.group.name.clone(),
            enrolled.tickets.join(", "),
            rupees.format(enrolled.group.group_value.clone()),
            paid,
        ]);
    }

    println!("{}", "My Groups".bold());
    println!("{}", table);
    Ok(())
}
