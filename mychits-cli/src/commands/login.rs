//! Login command - exchange phone and password for a user id

use anyhow::Result;
use serde_json::json;

use super::{get_context, password_or_prompt, startup_probe, value_or_prompt};
use crate::output;

pub fn run(phone: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context(None)?;
    let phone = value_or_prompt(phone, "Phone number")?;
    let password = password_or_prompt(password, false)?;

    startup_probe(&ctx);
    let result = output::with_spinner("Logging in...", || {
        ctx.auth_service.login(&phone, &password)
    });

    if json {
        return output::json_result(result.map(|user_id| json!({ "userId": user_id })));
    }
    let user_id = result?;

    output::success("Logged in");
    println!("User id: {}", user_id);
    output::info(&format!(
        "Pass --user {} (or set MYCHITS_USER_ID) to use this session",
        user_id
    ));
    Ok(())
}
