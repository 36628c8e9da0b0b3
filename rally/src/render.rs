//! Text renderers standing in for the tab row and the screen bodies.

use rally_nav::{Account, AccountSource, Bill, NavigationCoordinator, RallyDestination, RallyScreen};

/// Render the tab row; the selected tab is bracketed and shows its label.
pub fn tab_row(all_screens: &[RallyScreen], current: RallyScreen) -> String {
    all_screens
        .iter()
        .map(|screen| {
            if *screen == current {
                format!("[{} {}]", screen.icon().asset(), screen.label().to_uppercase())
            } else {
                format!(" {} ", screen.icon().asset())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the tab row and the body of the current destination.
pub fn frame<S: AccountSource>(nav: &NavigationCoordinator, data: &S) -> String {
    let mut out = tab_row(nav.all_screens(), nav.current_screen());
    out.push('\n');
    let body = match nav.current_destination() {
        Some(RallyDestination::Overview) => overview_body(data),
        Some(RallyDestination::Accounts) => accounts_body(data.accounts()),
        Some(RallyDestination::Bills) => bills_body(data.bills()),
        Some(RallyDestination::SingleAccount) => single_account_body(nav.current_account(data)),
        None => String::from("(empty back-stack)\n"),
    };
    out.push_str(&body);
    out
}

fn overview_body<S: AccountSource>(data: &S) -> String {
    let balance: f64 = data.accounts().iter().map(|a| a.balance).sum();
    let due: f64 = data.bills().iter().map(|b| b.amount).sum();
    let mut out = String::from("Alerts: heads up, you've used up 90% of your Shopping budget\n");
    out.push_str(&format!(
        "Accounts  ${balance:.2}  ({} accounts)\n",
        data.accounts().len()
    ));
    out.extend(
        data.accounts()
            .iter()
            .take(3)
            .map(|account| format!("  {:<16} ${:>10.2}\n", account.name, account.balance)),
    );
    out.push_str(&format!("Bills     ${due:.2}  ({} bills)\n", data.bills().len()));
    out.extend(
        data.bills()
            .iter()
            .take(3)
            .map(|bill| format!("  {:<16} ${:>10.2}\n", bill.name, bill.amount)),
    );
    out
}

fn accounts_body(accounts: &[Account]) -> String {
    accounts
        .iter()
        .map(|account| {
            format!(
                "  {:<16} •••••{:04}  ${:>10.2}\n",
                account.name, account.number, account.balance
            )
        })
        .collect()
}

fn bills_body(bills: &[Bill]) -> String {
    bills
        .iter()
        .map(|bill| format!("  {:<16} {:<8} ${:>10.2}\n", bill.name, bill.due, bill.amount))
        .collect()
}

fn single_account_body(account: Option<&Account>) -> String {
    match account {
        Some(account) => format!(
            "{}\n  •••••{:04}\n  balance ${:.2}\n",
            account.name, account.number, account.balance
        ),
        None => String::from("Account not found\n"),
    }
}

#[cfg(test)]
mod tests {
    use rally_nav::{AccountSource, NavConfig, NavigationCoordinator, RallyScreen};

    use super::{accounts_body, bills_body, frame, tab_row};
    use crate::data::UserData;

    #[test]
    fn selected_tab_is_highlighted() {
        let row = tab_row(RallyScreen::all(), RallyScreen::Accounts);
        assert_eq!(row, " pie_chart  [attach_money ACCOUNTS]  money_off ");
    }

    #[test]
    fn frame_follows_navigation() {
        let data = UserData::sample();
        let mut nav = NavigationCoordinator::new(NavConfig::default()).unwrap();
        assert!(frame(&nav, &data).contains("Alerts"));

        nav.navigate_to_account_detail("Car Savings").unwrap();
        let out = frame(&nav, &data);
        assert!(out.starts_with(" pie_chart  [attach_money ACCOUNTS]"));
        assert!(out.contains("Car Savings\n  •••••9012"));

        nav.navigate_to_account_detail("Unknown").unwrap();
        assert!(frame(&nav, &data).contains("Account not found"));

        nav.on_tab_selected(RallyScreen::Bills).unwrap();
        assert!(frame(&nav, &data).contains("RedPay Credit"));
    }

    #[test]
    fn list_bodies_render_one_line_per_row() {
        let data = UserData::sample();
        let accounts = accounts_body(data.accounts());
        assert_eq!(accounts.lines().count(), data.accounts().len());
        assert!(accounts.lines().all(|line| line.contains("•••••")));

        let bills = bills_body(data.bills());
        assert_eq!(bills.lines().count(), data.bills().len());
        assert!(bills.ends_with('\n'));
    }
}
