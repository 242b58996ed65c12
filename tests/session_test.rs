mod common;

use anyhow::Result;
use common::{default_session, run_scripted, stock_of};
use vendo::cli::SessionExit;

#[test]
fn test_full_session_matches_machine_dialogue() -> Result<()> {
    let mut session = default_session();

    let (outcome, output) = run_scripted(&mut session, "5.00\n101\n2\nno\n", None)?;

    let expected_order = [
        "Insert money: $",
        "Balance: $5.00",
        "Available Products:",
        "--- Candies ---",
        "101 - Chocolate Bar: $1.50 (Stock: 5)",
        "Enter product code: ",
        "Enter quantity: ",
        "Dispensing 2 x Chocolate Bar",
        "Thank you for your purchase!",
        "Would you like to buy anything else? (yes/no): ",
        "Automatically refunding: $2.00",
        "Have a great day!",
    ];
    let mut cursor = 0;
    for fragment in expected_order {
        let found = output[cursor..]
            .find(fragment)
            .unwrap_or_else(|| panic!("missing or out of order: {:?}", fragment));
        cursor += found + fragment.len();
    }

    assert_eq!(outcome.exit, SessionExit::Finished);
    assert_eq!(outcome.refunded, 200);
    assert_eq!(stock_of(&session, 101), 3);
    assert_eq!(session.balance(), 0);

    Ok(())
}

#[test]
fn test_listing_shows_updated_stock_on_next_round() -> Result<()> {
    let mut session = default_session();

    let (_, output) = run_scripted(&mut session, "10\n201\n2\nyes\n202\n1\nno\n", None)?;

    assert!(output.contains("201 - Coca-Cola: $2.00 (Stock: 5)"));
    assert!(output.contains("201 - Coca-Cola: $2.00 (Stock: 3)"));
    assert!(output.contains("Remaining balance: $6.00"));
    assert!(output.contains("Automatically refunding: $4.25"));

    Ok(())
}

#[test]
fn test_opening_funds_skip_the_money_prompt() -> Result<()> {
    let mut session = default_session();

    let (outcome, output) = run_scripted(&mut session, "303\n1\nno\n", Some(150))?;

    assert!(!output.contains("Insert money"));
    assert!(output.contains("Balance: $1.50"));
    assert!(output.contains("Dispensing 1 x Cookies"));
    assert_eq!(outcome.refunded, 0);
    assert!(!output.contains("Automatically refunding"));

    Ok(())
}

#[test]
fn test_invalid_answer_exits_with_refund() -> Result<()> {
    let mut session = default_session();

    let (outcome, output) = run_scripted(&mut session, "3\n102\n1\nperhaps\n", None)?;

    assert_eq!(outcome.exit, SessionExit::InvalidResponse);
    assert_eq!(outcome.refunded, 200);
    assert!(output.contains("Invalid response. Exiting the machine."));
    assert!(!output.contains("Have a great day!"));

    Ok(())
}

#[test]
fn test_rejected_purchase_keeps_session_going() -> Result<()> {
    let mut session = default_session();

    let (outcome, output) = run_scripted(&mut session, "1\n301\n1\nyes\n102\n1\nno\n", None)?;

    assert!(output.contains("Insufficient funds."));
    assert!(output.contains("Dispensing 1 x Gummy Bears"));
    assert_eq!(session.sales().len(), 1);
    assert_eq!(outcome.refunded, 0);

    Ok(())
}

#[test]
fn test_receipt_after_session() -> Result<()> {
    let mut session = default_session();
    run_scripted(&mut session, "4\n203\n2\nno\n", None)?;

    let receipt = session.receipt();

    assert_eq!(receipt.inserted, 400);
    assert_eq!(receipt.spent, 300);
    assert_eq!(receipt.refunded, 100);
    assert_eq!(receipt.sales.len(), 1);
    assert_eq!(receipt.sales[0].name, "Sprite");
    assert!(receipt.ended_at.is_some());

    Ok(())
}
