use crate::models::{ConversationMessage, Speaker};
use crate::utils::colors::CYAN;
use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_BOT: &str = "🤖";

const WRAP_WIDTH: usize = 72;

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Optional: formatted section header
pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "{}{}====================== {}\n{}",
        FG_BLUE, BOLD, msg, RESET
    );
}

/// System side of the conversation, wrapped for the terminal.
pub fn system<T: fmt::Display>(msg: T) {
    let text = msg.to_string();
    let wrapped = textwrap::fill(&text, WRAP_WIDTH);
    println!("{}{}{} {}{}", CYAN, BOLD, ICON_BOT, RESET, wrapped);
}

/// Render one transcript message. User lines were typed by the user and
/// are not echoed.
pub fn render(message: &ConversationMessage) {
    match message.speaker {
        Speaker::System => system(&message.text),
        Speaker::Notice => warning(&message.text),
        Speaker::User => {}
    }
}
