mod common;

use anyhow::Result;
use common::{reopen, test_service};
use remitcalc::application::AppError;
use remitcalc::domain::{AddOutcome, Expense, ValidationError};

#[tokio::test]
async fn test_case_insensitive_merge() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    let first = service.add_expense("Gas", "50").await?;
    assert_eq!(first.outcome, AddOutcome::Appended { index: 0 });

    let second = service.add_expense("gas", "25").await?;
    assert_eq!(second.outcome, AddOutcome::Merged { index: 0 });
    assert_eq!(second.expense, Expense::new("Gas", 75.0));

    assert_eq!(service.expenses(), &[Expense::new("Gas", 75.0)]);
    assert_eq!(service.total_expenses(), 75.0);

    Ok(())
}

#[tokio::test]
async fn test_invalid_expenses_leave_ledger_unchanged() -> Result<()> {
    let (mut service, temp) = test_service().await?;
    service.add_expense("Gas", "50").await?;

    for (name, amount) in [("", "10"), ("   ", "10"), ("Ice", "0"), ("Ice", "-5"), ("Ice", "free")] {
        let err = service.add_expense(name, amount).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    assert_eq!(service.expenses(), &[Expense::new("Gas", 50.0)]);

    // Nothing extra was persisted either
    let reopened = reopen(&temp).await?;
    assert_eq!(reopened.expenses(), &[Expense::new("Gas", 50.0)]);

    Ok(())
}

#[tokio::test]
async fn test_remove_keeps_order() -> Result<()> {
    let (mut service, _temp) = test_service().await?;
    for (name, amount) in [("Gas", "50"), ("Lunch", "12"), ("Tape", "3"), ("Ice", "7")] {
        service.add_expense(name, amount).await?;
    }

    let removed = service.remove_expense(1).await?;
    assert_eq!(removed.name, "Lunch");

    let names: Vec<&str> = service.expenses().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Gas", "Tape", "Ice"]);

    Ok(())
}

#[tokio::test]
async fn test_remove_out_of_range_is_rejected() -> Result<()> {
    let (mut service, _temp) = test_service().await?;
    service.add_expense("Gas", "50").await?;

    let err = service.remove_expense(5).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::ExpenseIndexOutOfRange { index: 5, len: 1 })
    ));
    assert_eq!(service.expenses().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_remove_at_max_index_reports_error() -> Result<()> {
    let (mut service, _temp) = test_service().await?;
    service.add_expense("Gas", "50").await?;

    let err = service.remove_expense(usize::MAX).await.unwrap_err();
    assert!(err.to_string().starts_with("No expense at position"));
    assert_eq!(service.expenses().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_amount_text_is_coerced() -> Result<()> {
    let (mut service, _temp) = test_service().await?;

    let added = service.add_expense("Rent share", "1,250.75").await?;
    assert_eq!(added.expense.amount, 1250.75);

    Ok(())
}

#[tokio::test]
async fn test_clear_expenses() -> Result<()> {
    let (mut service, temp) = test_service().await?;
    service.add_expense("Gas", "50").await?;
    service.add_expense("Ice", "5").await?;

    assert_eq!(service.clear_expenses().await, 2);
    assert_eq!(service.total_expenses(), 0.0);

    let reopened = reopen(&temp).await?;
    assert!(reopened.expenses().is_empty());

    Ok(())
}
