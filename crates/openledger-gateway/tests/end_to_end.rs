//! End-to-end integration tests across all planes.
//!
//! These tests drive the gateway the way a transport collaborator would:
//! register → login → open accounts → post top-ups and transfers → list
//! history → run the KYC lifecycle — and then prove the books still
//! reconcile.

use openledger_gateway::BankGateway;
use openledger_types::{
    Currency, KycStatus, OpenledgerError, TransactionKind,
};
use rust_decimal::Decimal;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn amount(s: &str) -> Decimal {
    s.parse().unwrap()
}

// =============================================================================
// Test: full customer lifecycle
// =============================================================================
#[test]
fn e2e_customer_lifecycle() {
    init_tracing();
    let bank = BankGateway::new();

    // Onboard.
    bank.register("alice@bank.example", "alice92").unwrap();
    let (token, alice) = bank.login("alice@bank.example").unwrap();
    assert_eq!(alice.kyc_status, KycStatus::NotStarted);

    // Open accounts in two currencies.
    let checking = bank
        .create_account(&token, Currency::Usd, "Checking")
        .unwrap();
    let savings = bank
        .create_account(&token, Currency::Eur, "Savings")
        .unwrap();
    let accounts = bank.list_accounts(&token).unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].id, checking.id);
    assert_eq!(accounts[1].id, savings.id);

    // Fund and spend.
    bank.post_topup(&token, checking.id, amount("100.00"), None, Some("payroll".into()))
        .unwrap();
    bank.post_transfer(&token, checking.id, "Bob", amount("30.00"), Some("lunch".into()))
        .unwrap();

    assert_eq!(bank.balance(checking.id).unwrap(), 7_000);
    assert_eq!(bank.balance(savings.id).unwrap(), 0);

    // History: newest first, scoped to Alice's accounts.
    let history = bank.list_transactions(&token, None).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].kind, TransactionKind::Transfer);
    assert_eq!(history[1].kind, TransactionKind::Topup);
    assert_eq!(history[0].counterparty_label.as_deref(), Some("Bob"));

    // KYC lifecycle.
    let pending = bank.submit_kyc(&token, "Alice Example").unwrap();
    assert_eq!(pending.kyc_status, KycStatus::Pending);
    assert_eq!(pending.display_name, "Alice Example");
    let approved = bank.approve_kyc(&token).unwrap();
    assert_eq!(approved.kyc_status, KycStatus::Approved);

    // The books still reconcile: cache ≡ fold for every touched account.
    bank.poster().reconcile().unwrap();
}

// =============================================================================
// Test: two users never see each other's state
// =============================================================================
#[test]
fn e2e_user_isolation() {
    init_tracing();
    let bank = BankGateway::new();

    bank.register("alice@bank.example", "Alice").unwrap();
    bank.register("bob@bank.example", "Bob").unwrap();
    let (alice_token, _) = bank.login("alice@bank.example").unwrap();
    let (bob_token, _) = bank.login("bob@bank.example").unwrap();

    let alice_account = bank
        .create_account(&alice_token, Currency::Usd, "Checking")
        .unwrap();
    let bob_account = bank
        .create_account(&bob_token, Currency::Usd, "Checking")
        .unwrap();

    bank.post_topup(&alice_token, alice_account.id, amount("50.00"), None, None)
        .unwrap();

    // Bob cannot top up or see Alice's activity.
    let err = bank
        .post_topup(&bob_token, alice_account.id, amount("1.00"), None, None)
        .unwrap_err();
    assert!(matches!(err, OpenledgerError::Forbidden { .. }));

    assert!(bank.list_transactions(&bob_token, None).unwrap().is_empty());
    assert_eq!(bank.list_accounts(&bob_token).unwrap().len(), 1);
    assert_eq!(bank.balance(bob_account.id).unwrap(), 0);
}

// =============================================================================
// Test: transfers in different currencies use separate clearing accounts
// =============================================================================
#[test]
fn e2e_per_currency_clearing() {
    init_tracing();
    let bank = BankGateway::new();

    bank.register("carol@bank.example", "Carol").unwrap();
    let (token, _) = bank.login("carol@bank.example").unwrap();

    let usd = bank.create_account(&token, Currency::Usd, "USD").unwrap();
    let eur = bank.create_account(&token, Currency::Eur, "EUR").unwrap();
    bank.post_topup(&token, usd.id, amount("100.00"), None, None)
        .unwrap();
    bank.post_topup(&token, eur.id, amount("200.00"), None, None)
        .unwrap();

    bank.post_transfer(&token, usd.id, "Dan", amount("10.00"), None)
        .unwrap();
    bank.post_transfer(&token, eur.id, "Erin", amount("20.00"), None)
        .unwrap();

    let poster = bank.poster();
    let usd_clearing = poster.clearing_account_id(Currency::Usd).unwrap();
    let eur_clearing = poster.clearing_account_id(Currency::Eur).unwrap();
    assert_ne!(usd_clearing, eur_clearing);
    assert_eq!(bank.balance(usd_clearing).unwrap(), 1_000);
    assert_eq!(bank.balance(eur_clearing).unwrap(), 2_000);

    poster.reconcile().unwrap();
}

// =============================================================================
// Test: a failed posting is invisible everywhere
// =============================================================================
#[test]
fn e2e_failed_posting_leaves_no_trace() {
    init_tracing();
    let bank = BankGateway::new();

    bank.register("dave@bank.example", "Dave").unwrap();
    let (token, _) = bank.login("dave@bank.example").unwrap();
    let account = bank
        .create_account(&token, Currency::Gbp, "Current")
        .unwrap();
    bank.post_topup(&token, account.id, amount("10.00"), None, None)
        .unwrap();

    let before_history = bank.list_transactions(&token, None).unwrap();
    let err = bank
        .post_transfer(&token, account.id, "Bob", amount("999.00"), None)
        .unwrap_err();
    assert!(matches!(err, OpenledgerError::InsufficientFunds { .. }));

    assert_eq!(bank.balance(account.id).unwrap(), 1_000);
    let after_history = bank.list_transactions(&token, None).unwrap();
    assert_eq!(before_history.len(), after_history.len());
    // No clearing account was provisioned for a posting that never happened
    // (GBP had seen no successful transfer).
    assert!(bank.poster().clearing_account_id(Currency::Gbp).is_none());
}
