//! Read-only seam to the account and bill data shown by the bodies.
//!
//! The navigation core never owns data. It forwards the `name` argument of
//! the current entry to an [`AccountSource`] and hands back whatever the
//! source returns.

/// A financial account.
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub name: String,
    pub number: u32,
    pub balance: f64,
    /// ARGB color used for the account's accent.
    pub color: u32,
}

/// A recurring bill.
#[derive(Clone, Debug, PartialEq)]
pub struct Bill {
    pub name: String,
    pub due: String,
    pub amount: f64,
    pub color: u32,
}

/// Provider of account and bill records.
pub trait AccountSource {
    fn accounts(&self) -> &[Account];

    fn bills(&self) -> &[Bill];

    /// Look up an account by its display name.
    fn get_account(&self, name: &str) -> Option<&Account> {
        self.accounts().iter().find(|account| account.name == name)
    }
}
