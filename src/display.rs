use crate::error::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

pub fn output<T: Serialize>(
    json_mode: bool,
    data: &T,
    render_text: impl FnOnce(&T),
) -> Result<()> {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        render_text(data);
    }
    Ok(())
}

pub fn warn(msg: &str) {
    eprintln!("{} {msg}", "warning:".yellow().bold());
}

pub fn error(msg: &str) {
    eprintln!("{} {msg}", "error:".red().bold());
}
