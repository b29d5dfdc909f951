//! Status command - connectivity and session

use anyhow::Result;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::get_context;
use crate::output;

pub fn run(user: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context(user)?;
    let status = output::with_spinner("Checking connectivity...", || {
        ctx.status_service.get_status(ctx.probe.as_ref())
    });

    if json {
        return output::json(&status);
    }

    println!("{}", "MyChits Status".bold());
    println!();

    let yes_no = |b: bool| if b { "yes" } else { "no" };
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["Backend", ctx.client.base_url().as_str()]);
    table.add_row(vec!["Connected", yes_no(status.connectivity.is_connected)]);
    table.add_row(vec!["Internet reachable", yes_no(status.connectivity.is_internet_reachable)]);
    table.add_row(vec!["Logged in", status.user_id.as_deref().unwrap_or("no")]);
    println!("{}", table);
    println!();

    if let Some(e) = &status.probe_error {
        output::warning(&format!("Probe gave no answer, showing last known state: {}", e));
    }
    if status.online {
        output::success("Online");
    } else {
        output::error("Offline");
    }
    Ok(())
}
