//! Groups command - list chit groups open for enrollment

use anyhow::Result;
use colored::Colorize;

use mychits_core::format::CurrencyFormat;
use mychits_core::state::ViewState;

use super::{get_context, startup_probe};
use crate::output;

pub fn run(user: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context(user)?;
    startup_probe(&ctx);

    if json {
        let groups = output::with_spinner("Fetching groups...", || ctx.group_service.groups());
        return output::json_result(groups);
    }

    let mut view = ViewState::default();
    output::with_spinner("Fetching groups...", || {
        view.load(|| ctx.group_service.groups(), |_| {});
    });

    match &view {
        ViewState::Failed(notice) => {
            output::notice(notice);
            return Err(output::Reported.into());
        }
        ViewState::Empty => {
            output::info("No groups are open right now");
            return Ok(());
        }
        _ => {}
    }

    let rupees = CurrencyFormat::rupees();
    let mut table = output::create_table();
    table.set_header(vec!["Group", "Value", "Installment", "Members", "Starts"]);
    for group in view.items() {
        table.add_row(vec![
            group.name.clone(),
            rupees.format(group.group_value.clone()),
            rupees.format(group.installment.clone()),
            group.members.map(|m| m.to_string()).unwrap_or_default(),
            ctx.dates.short(group.start_date.as_deref()),
        ]);
    }

    println!("{}", "Chit Groups".bold());
    println!("{}", table);
    Ok(())
}
