//! The external facade consumed by transport/UI collaborators.
//!
//! Every authenticated call resolves the token through the session gate
//! before touching anything else. Identity state (users, sessions) lives
//! under its own lock, separate from the books: identity reads never block
//! postings, and the posting lock is never held while identity is locked.

use std::sync::RwLock;

use openledger_posting::Poster;
use openledger_types::{
    Account, AccountId, Currency, GatewayConfig, Result, SessionToken, Transaction, User, UserId,
};
use rust_decimal::Decimal;

use crate::sessions::SessionGate;
use crate::users::UserRegistry;

#[derive(Debug)]
struct Identity {
    users: UserRegistry,
    sessions: SessionGate,
}

/// The bank backend as collaborators see it: registration, login, accounts,
/// balances, postings, and the KYC lifecycle behind one object with an
/// explicit lifetime — construct one per deployment, or one per test.
#[derive(Debug)]
pub struct BankGateway {
    identity: RwLock<Identity>,
    poster: Poster,
    config: GatewayConfig,
}

impl BankGateway {
    /// Create a gateway with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GatewayConfig::default())
    }

    /// Create a gateway with explicit configuration.
    #[must_use]
    pub fn with_config(config: GatewayConfig) -> Self {
        Self {
            identity: RwLock::new(Identity {
                users: UserRegistry::new(),
                sessions: SessionGate::new(config.session_ttl_secs),
            }),
            poster: Poster::new(),
            config,
        }
    }

    /// The posting engine, for reconciliation jobs and tests.
    #[must_use]
    pub fn poster(&self) -> &Poster {
        &self.poster
    }

    fn resolve(&self, token: &SessionToken) -> Result<UserId> {
        let identity = self.identity.read().unwrap();
        identity.sessions.resolve(token)
    }

    // =================================================================
    // Identity
    // =================================================================

    /// Register a new user. Emails are unique, case-insensitive.
    pub fn register(
        &self,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<User> {
        let mut identity = self.identity.write().unwrap();
        identity.users.register(email, display_name)
    }

    /// Log in by email. No auto-provisioning: unknown emails fail with
    /// `EmailNotRegistered`.
    pub fn login(&self, email: &str) -> Result<(SessionToken, User)> {
        let mut identity = self.identity.write().unwrap();
        let user = identity.users.find_by_email(email)?.clone();
        let session = identity.sessions.issue(user.id);
        tracing::info!(user = %user.id, "login");
        Ok((session.token, user))
    }

    /// Invalidate a session. Returns whether a live session was revoked.
    pub fn logout(&self, token: &SessionToken) -> bool {
        let mut identity = self.identity.write().unwrap();
        identity.sessions.revoke(token)
    }

    /// The authenticated user.
    pub fn me(&self, token: &SessionToken) -> Result<User> {
        let user_id = self.resolve(token)?;
        let identity = self.identity.read().unwrap();
        identity.users.get(user_id).cloned()
    }

    // =================================================================
    // Accounts & ledger reads
    // =================================================================

    /// Open an account for the authenticated user.
    pub fn create_account(
        &self,
        token: &SessionToken,
        currency: Currency,
        display_name: impl Into<String>,
    ) -> Result<Account> {
        let user_id = self.resolve(token)?;
        Ok(self.poster.create_account(user_id, currency, display_name))
    }

    /// The authenticated user's accounts, in creation order.
    pub fn list_accounts(&self, token: &SessionToken) -> Result<Vec<Account>> {
        let user_id = self.resolve(token)?;
        Ok(self.poster.list_accounts(user_id))
    }

    /// Balance of any account in minor units. Unauthenticated read — the
    /// account id is the capability.
    pub fn balance(&self, account_id: AccountId) -> Result<i64> {
        self.poster.balance_minor(account_id)
    }

    /// Transactions touching the authenticated user's accounts, newest
    /// first. `limit` defaults from configuration.
    pub fn list_transactions(
        &self,
        token: &SessionToken,
        limit: Option<usize>,
    ) -> Result<Vec<Transaction>> {
        let user_id = self.resolve(token)?;
        let limit = limit.unwrap_or(self.config.default_transaction_limit);
        Ok(self.poster.list_transactions_for_user(user_id, limit))
    }

    // =================================================================
    // Postings
    // =================================================================

    /// Post an external top-up into the authenticated user's account.
    pub fn post_topup(
        &self,
        token: &SessionToken,
        account_id: AccountId,
        amount_major: Decimal,
        memo: Option<String>,
        counterparty: Option<String>,
    ) -> Result<Transaction> {
        let user_id = self.resolve(token)?;
        self.poster
            .post_topup(user_id, account_id, amount_major, memo, counterparty)
    }

    /// Post an outbound transfer from the authenticated user's account.
    pub fn post_transfer(
        &self,
        token: &SessionToken,
        account_id: AccountId,
        counterparty_label: impl Into<String>,
        amount_major: Decimal,
        memo: Option<String>,
    ) -> Result<Transaction> {
        let user_id = self.resolve(token)?;
        self.poster
            .post_transfer(user_id, account_id, counterparty_label, amount_major, memo)
    }

    // =================================================================
    // KYC
    // =================================================================

    /// Submit KYC documents for the authenticated user. KYC status does not
    /// gate postings.
    pub fn submit_kyc(&self, token: &SessionToken, full_name: impl Into<String>) -> Result<User> {
        let user_id = self.resolve(token)?;
        let mut identity = self.identity.write().unwrap();
        identity.users.submit_kyc(user_id, full_name)
    }

    /// Approve the authenticated user's pending KYC submission. Self-service
    /// stand-in for a back-office review action.
    pub fn approve_kyc(&self, token: &SessionToken) -> Result<User> {
        let user_id = self.resolve(token)?;
        let mut identity = self.identity.write().unwrap();
        identity.users.approve_kyc(user_id)
    }
}

impl Default for BankGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openledger_types::OpenledgerError;

    fn amount(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn logged_in(gateway: &BankGateway, email: &str) -> SessionToken {
        gateway.register(email, "Someone").unwrap();
        gateway.login(email).unwrap().0
    }

    #[test]
    fn login_requires_registration() {
        let gateway = BankGateway::new();
        let err = gateway.login("ghost@bank.example").unwrap_err();
        assert!(matches!(err, OpenledgerError::EmailNotRegistered(_)));
    }

    #[test]
    fn me_reflects_logged_in_user() {
        let gateway = BankGateway::new();
        let user = gateway.register("alice@bank.example", "Alice").unwrap();
        let (token, login_user) = gateway.login("ALICE@bank.example").unwrap();
        assert_eq!(login_user.id, user.id);
        assert_eq!(gateway.me(&token).unwrap().id, user.id);
    }

    #[test]
    fn every_authenticated_call_rejects_bad_tokens() {
        let gateway = BankGateway::new();
        let bogus = SessionToken::generate();

        assert!(matches!(
            gateway.me(&bogus).unwrap_err(),
            OpenledgerError::Unauthorized
        ));
        assert!(matches!(
            gateway.list_accounts(&bogus).unwrap_err(),
            OpenledgerError::Unauthorized
        ));
        assert!(matches!(
            gateway.list_transactions(&bogus, None).unwrap_err(),
            OpenledgerError::Unauthorized
        ));
        assert!(matches!(
            gateway
                .post_topup(&bogus, AccountId::new(), amount("1.00"), None, None)
                .unwrap_err(),
            OpenledgerError::Unauthorized
        ));
        assert!(matches!(
            gateway.submit_kyc(&bogus, "Alice Example").unwrap_err(),
            OpenledgerError::Unauthorized
        ));
    }

    #[test]
    fn logout_revokes_access() {
        let gateway = BankGateway::new();
        let token = logged_in(&gateway, "alice@bank.example");
        assert!(gateway.me(&token).is_ok());

        assert!(gateway.logout(&token));
        assert!(matches!(
            gateway.me(&token).unwrap_err(),
            OpenledgerError::Unauthorized
        ));
    }

    #[test]
    fn cross_user_posting_forbidden() {
        let gateway = BankGateway::new();
        let alice = logged_in(&gateway, "alice@bank.example");
        let mallory = logged_in(&gateway, "mallory@bank.example");

        let account = gateway
            .create_account(&alice, Currency::Usd, "Checking")
            .unwrap();
        let err = gateway
            .post_topup(&mallory, account.id, amount("9.99"), None, None)
            .unwrap_err();
        assert!(matches!(err, OpenledgerError::Forbidden { .. }));
    }

    #[test]
    fn default_transaction_limit_comes_from_config() {
        let gateway = BankGateway::with_config(GatewayConfig {
            default_transaction_limit: 2,
            session_ttl_secs: None,
        });
        let token = logged_in(&gateway, "alice@bank.example");
        let account = gateway
            .create_account(&token, Currency::Usd, "Checking")
            .unwrap();
        for _ in 0..4 {
            gateway
                .post_topup(&token, account.id, amount("1.00"), None, None)
                .unwrap();
        }

        assert_eq!(gateway.list_transactions(&token, None).unwrap().len(), 2);
        assert_eq!(
            gateway.list_transactions(&token, Some(10)).unwrap().len(),
            4
        );
    }
}
