//! Register command - create an account

use anyhow::Result;
use serde_json::json;

use super::{get_context, password_or_prompt, startup_probe, value_or_prompt};
use crate::output;

pub fn run(
    name: Option<String>,
    phone: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context(None)?;
    let name = value_or_prompt(name, "Full name")?;
    let phone = value_or_prompt(phone, "Phone number")?;
    let password = password_or_prompt(password, true)?;

    startup_probe(&ctx);
    let result = output::with_spinner("Creating account...", || {
        ctx.auth_service.register(&name, &phone, &password)
    });

    if json {
        return output::json_result(result.map(|user_id| json!({ "userId": user_id })));
    }
    let user_id = result?;

    output::success(&format!("Welcome to MyChits, {}", name.trim()));
    println!("User id: {}", user_id);
    Ok(())
}
