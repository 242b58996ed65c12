mod common;

use anyhow::Result;
use common::{SmallCatalog, default_session, funded_session, stock_of};
use vendo::domain::{Category, ItemCode, PurchaseError};

#[test]
fn test_purchase_dispenses_and_debits() -> Result<()> {
    let mut session = funded_session(500)?;

    let dispensed = session.purchase(101, 2)?;

    assert_eq!(dispensed.name, "Chocolate Bar");
    assert_eq!(dispensed.quantity, 2);
    assert_eq!(dispensed.total, 300);
    assert_eq!(stock_of(&session, 101), 3);
    assert_eq!(session.balance(), 200);

    Ok(())
}

#[test]
fn test_unknown_code_is_invalid_selection() -> Result<()> {
    let mut session = funded_session(500)?;

    let err = session.purchase(999, 1).unwrap_err();

    assert_eq!(err, PurchaseError::InvalidSelection(999));
    assert_eq!(stock_of(&session, 101), 5);
    assert_eq!(session.balance(), 500);

    Ok(())
}

#[test]
fn test_quantity_above_stock_is_rejected() -> Result<()> {
    let mut session = funded_session(5000)?;

    let err = session.purchase(101, 10).unwrap_err();

    assert!(matches!(err, PurchaseError::InsufficientStock { .. }));
    assert_eq!(stock_of(&session, 101), 5);
    assert_eq!(session.balance(), 5000);

    Ok(())
}

#[test]
fn test_insufficient_funds_is_rejected() -> Result<()> {
    let mut session = funded_session(100)?;

    let err = session.purchase(101, 1).unwrap_err();

    assert_eq!(
        err,
        PurchaseError::InsufficientFunds {
            balance: 100,
            required: Some(150),
        }
    );
    assert_eq!(session.balance(), 100);
    assert_eq!(stock_of(&session, 101), 5);

    Ok(())
}

#[test]
fn test_end_session_refunds_everything() -> Result<()> {
    let mut session = funded_session(1000)?;

    assert_eq!(session.end_session(), 1000);
    assert_eq!(session.balance(), 0);

    // A second drain has nothing left to hand back
    assert_eq!(session.end_session(), 0);
    assert_eq!(session.receipt().refunded, 1000);

    Ok(())
}

#[test]
fn test_failed_purchases_leave_state_unchanged() -> Result<()> {
    let mut session = funded_session(200)?;
    let catalog_before = session.catalog().clone();

    let attempts: [(ItemCode, i64); 5] = [(101, 0), (101, -3), (404, 1), (102, 11), (301, 1)];
    for (code, quantity) in attempts {
        assert!(session.purchase(code, quantity).is_err());
        assert_eq!(session.catalog(), &catalog_before);
        assert_eq!(session.balance(), 200);
    }
    assert!(session.sales().is_empty());

    Ok(())
}

#[test]
fn test_stock_and_balance_never_negative() -> Result<()> {
    let mut session = SmallCatalog::session()?;
    session.insert_funds(1000)?;

    // Keep buying until every slot refuses
    for _ in 0..20 {
        for code in [110, 210, 310] {
            let _ = session.purchase(code, 1);
        }
    }

    assert_eq!(stock_of(&session, 110), 0);
    assert_eq!(stock_of(&session, 210), 0);
    assert_eq!(stock_of(&session, 310), 2);
    assert_eq!(session.balance(), 200);
    assert_eq!(
        session.balance() + session.takings(),
        1000,
        "money is neither created nor lost"
    );
    let spent: u64 = session.sales().iter().map(|sale| sale.total).sum();
    assert_eq!(spent, session.takings());

    Ok(())
}

#[test]
fn test_sold_out_slot_reports_insufficient_stock() -> Result<()> {
    let mut session = SmallCatalog::session()?;
    session.insert_funds(500)?;

    session.purchase(210, 1)?;
    let err = session.purchase(210, 1).unwrap_err();

    assert_eq!(
        err,
        PurchaseError::InsufficientStock {
            code: 210,
            available: 0,
            requested: 1,
        }
    );

    Ok(())
}

#[test]
fn test_list_category_reflects_purchases() -> Result<()> {
    let mut session = funded_session(1000)?;
    session.purchase(302, 2)?;

    let snacks = session.list_category(Category::Snacks);

    let pretzels = snacks.iter().find(|entry| entry.code == 302).unwrap();
    assert_eq!(pretzels.stock, 3);
    assert_eq!(snacks.len(), 3);

    Ok(())
}

#[test]
fn test_credit_then_drain_without_purchase() -> Result<()> {
    let mut session = default_session();

    session.insert_funds(250)?;
    session.insert_funds(125)?;

    assert_eq!(session.end_session(), 375);
    assert_eq!(session.balance(), 0);

    Ok(())
}
