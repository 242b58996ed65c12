// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io::Cursor;

use anyhow::Result;
use vendo::application::VendingSession;
use vendo::cli::{IoConsole, SessionOutcome, run_session};
use vendo::domain::{Catalog, Cents, Item, ItemCode};

/// Helper to create a session stocked with the machine's default items
pub fn default_session() -> VendingSession {
    VendingSession::new(Catalog::with_default_items())
}

/// Helper to create a session with funds already inserted
pub fn funded_session(funds: Cents) -> Result<VendingSession> {
    let mut session = default_session();
    session.insert_funds(funds)?;
    Ok(session)
}

/// Helper to read the stock of one slot
pub fn stock_of(session: &VendingSession, code: ItemCode) -> u32 {
    session.catalog().lookup(code).unwrap().stock
}

/// Run the interactive loop against a scripted input and capture the output
pub fn run_scripted(
    session: &mut VendingSession,
    script: &str,
    opening_funds: Option<Cents>,
) -> Result<(SessionOutcome, String)> {
    let mut console = IoConsole::new(Cursor::new(script.to_string()), Vec::new());
    let outcome = run_session(session, &mut console, opening_funds)?;
    let output = String::from_utf8(console.into_output())?;
    Ok((outcome, output))
}

/// Test fixture: a small catalog with one item per category
pub struct SmallCatalog;

impl SmallCatalog {
    pub fn items() -> Vec<Item> {
        vec![
            Item::new(110, "Mints", 50, 2),
            Item::new(210, "Water", 100, 1),
            Item::new(310, "Nuts", 300, 4),
        ]
    }

    pub fn session() -> Result<VendingSession> {
        Ok(VendingSession::new(Catalog::from_items(Self::items())?))
    }
}
