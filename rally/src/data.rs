//! In-memory sample data shown by the Rally bodies.

use rally_nav::{Account, AccountSource, Bill};

/// The fixed accounts and bills of the Rally sample.
#[derive(Clone, Debug)]
pub struct UserData {
    accounts: Vec<Account>,
    bills: Vec<Bill>,
}

impl UserData {
    pub fn sample() -> Self {
        let account = |name: &str, number, balance, color| Account {
            name: name.to_string(),
            number,
            balance,
            color,
        };
        let bill = |name: &str, due: &str, amount, color| Bill {
            name: name.to_string(),
            due: due.to_string(),
            amount,
            color,
        };
        Self {
            accounts: vec![
                account("Checking", 1234, 2215.13, 0xFF004940),
                account("Home Savings", 5678, 8676.88, 0xFF005D57),
                account("Car Savings", 9012, 987.48, 0xFF04B97F),
                account("Vacation", 3456, 253.0, 0xFF37EFBA),
            ],
            bills: vec![
                bill("RedPay Credit", "Jan 29", 45.36, 0xFFFFDC78),
                bill("Rent", "Feb 9", 1200.0, 0xFFFF6951),
                bill("TabFine Credit", "Feb 22", 87.33, 0xFFFFD7D0),
                bill("ABC Loans", "Feb 29", 400.0, 0xFFFFAC12),
                bill("ABC Loans 2", "Feb 29", 77.4, 0xFFFFAC12),
            ],
        }
    }
}

impl AccountSource for UserData {
    fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    fn bills(&self) -> &[Bill] {
        &self.bills
    }
}
