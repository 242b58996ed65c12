use std::str::FromStr;

use anyhow::Result;
use tracing::debug;

use crate::application::VendingSession;
use crate::domain::{Category, Cents, ItemCode, PurchaseError, format_cents, parse_cents};

use super::console::Console;

/// How the customer left the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// Answered "no" to buying more
    Finished,
    /// Answered something other than yes/no
    InvalidResponse,
    /// Input ran out
    EndOfInput,
}

/// Result of an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub exit: SessionExit,
    pub refunded: Cents,
}

/// Customer-facing message for a refused purchase.
pub fn rejection_message(err: &PurchaseError) -> &'static str {
    match err {
        PurchaseError::InvalidQuantity(_) => "Quantity must be at least 1.",
        PurchaseError::InvalidSelection(_) => "Invalid selection.",
        PurchaseError::InsufficientStock { .. } => "Not enough stock available.",
        PurchaseError::InsufficientFunds { .. } => "Insufficient funds.",
    }
}

/// Print every category with its items, in code order.
pub fn display_products<C: Console>(session: &VendingSession, console: &mut C) -> Result<()> {
    console.write_line("")?;
    console.write_line("Available Products:")?;
    for category in Category::ALL {
        console.write_line(&format!("--- {} ---", category.title()))?;
        for entry in session.list_category(category) {
            console.write_line(&format!(
                "{} - {}: ${} (Stock: {})",
                entry.code,
                entry.name,
                format_cents(entry.price),
                entry.stock
            ))?;
        }
    }
    Ok(())
}

/// Drive one customer through the machine: insert money, buy until they say
/// no, then refund whatever is left.
///
/// When `opening_funds` is set it is credited directly instead of prompting.
pub fn run_session<C: Console>(
    session: &mut VendingSession,
    console: &mut C,
    opening_funds: Option<Cents>,
) -> Result<SessionOutcome> {
    let funded = match opening_funds {
        Some(amount) => {
            session.insert_funds(amount)?;
            true
        }
        None => ask_funds(session, console)?,
    };
    if !funded {
        return finish(session, console, SessionExit::EndOfInput, None);
    }
    console.write_line(&format!("Balance: ${}", format_cents(session.balance())))?;

    loop {
        display_products(session, console)?;

        let Some(code) = ask_number::<ItemCode, _>(
            console,
            "Enter product code: ",
            "Please enter a valid product code.",
        )?
        else {
            return finish(session, console, SessionExit::EndOfInput, None);
        };
        let Some(quantity) = ask_number::<i64, _>(
            console,
            "Enter quantity: ",
            "Please enter a whole number.",
        )?
        else {
            return finish(session, console, SessionExit::EndOfInput, None);
        };

        match session.purchase(code, quantity) {
            Ok(dispensed) => {
                console.write_line(&format!(
                    "Dispensing {} x {}",
                    dispensed.quantity, dispensed.name
                ))?;
                console.write_line("Thank you for your purchase!")?;
            }
            Err(err) => console.write_line(rejection_message(&err))?,
        }

        let Some(answer) = ask_word(console, "Would you like to buy anything else? (yes/no): ")?
        else {
            return finish(session, console, SessionExit::EndOfInput, None);
        };
        match answer.to_lowercase().as_str() {
            "yes" => {
                console.write_line(&format!(
                    "Remaining balance: ${}",
                    format_cents(session.balance())
                ))?;
            }
            "no" => {
                return finish(
                    session,
                    console,
                    SessionExit::Finished,
                    Some("Have a great day!"),
                );
            }
            other => {
                debug!(answer = other, "unrecognised answer");
                console.write_line("Invalid response. Exiting the machine.")?;
                return finish(session, console, SessionExit::InvalidResponse, None);
            }
        }
    }
}

/// Prompt until a valid amount is credited. Returns false at end of input.
fn ask_funds<C: Console>(session: &mut VendingSession, console: &mut C) -> Result<bool> {
    loop {
        let Some(input) = console.ask("Insert money: $")? else {
            return Ok(false);
        };
        let amount = match parse_cents(&input) {
            Ok(amount) => amount,
            Err(err) => {
                console.write_line(&format!("Invalid amount ({}). Try e.g. 2.50", err))?;
                continue;
            }
        };
        match session.insert_funds(amount) {
            Ok(_) => return Ok(true),
            Err(err) => console.write_line(&err.to_string())?,
        }
    }
}

/// Prompt until a non-blank answer arrives. Returns `None` at end of input.
fn ask_word<C: Console>(console: &mut C, prompt: &str) -> Result<Option<String>> {
    loop {
        let Some(input) = console.ask(prompt)? else {
            return Ok(None);
        };
        let word = input.trim();
        if !word.is_empty() {
            return Ok(Some(word.to_string()));
        }
    }
}

/// Prompt until the input parses as `T`. Returns `None` at end of input.
fn ask_number<T: FromStr, C: Console>(
    console: &mut C,
    prompt: &str,
    retry_message: &str,
) -> Result<Option<T>> {
    loop {
        let Some(input) = console.ask(prompt)? else {
            return Ok(None);
        };
        match input.trim().parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => console.write_line(retry_message)?,
        }
    }
}

fn finish<C: Console>(
    session: &mut VendingSession,
    console: &mut C,
    exit: SessionExit,
    farewell: Option<&str>,
) -> Result<SessionOutcome> {
    let refunded = session.end_session();
    if refunded > 0 {
        console.write_line(&format!(
            "Automatically refunding: ${}",
            format_cents(refunded)
        ))?;
    }
    if let Some(farewell) = farewell {
        console.write_line(farewell)?;
    }
    Ok(SessionOutcome { exit, refunded })
}
