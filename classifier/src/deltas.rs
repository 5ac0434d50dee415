//! Partitioning of an account's balance changes into outgoing and incoming.

use suiscope_types::{is_native_asset, AccountId, BalanceChange};

/// The inspected account's share of a transaction's balance changes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BalanceDeltas<'a> {
    /// Decreases, in reported order.
    pub outgoing: Vec<&'a BalanceChange>,
    /// Increases, in reported order.
    pub incoming: Vec<&'a BalanceChange>,
    /// Combined magnitude of native-asset decreases when those are the only
    /// changes the account saw. Such a debit is kept out of `outgoing`.
    pub native_debit: Option<NativeDebit<'a>>,
}

/// A native-asset-only decrease: the gas debit, possibly with a plain
/// SUI transfer folded in.
#[derive(Debug, PartialEq, Eq)]
pub struct NativeDebit<'a> {
    pub asset_type: &'a str,
    pub magnitude: u128,
}

impl<'a> BalanceDeltas<'a> {
    /// Select the changes owned by `account` and split them by sign.
    ///
    /// Zero deltas are ignored.
    pub fn for_account(changes: &'a [BalanceChange], account: &AccountId) -> Self {
        let mine: Vec<&BalanceChange> = changes
            .iter()
            .filter(|change| change.is_owned_by(account) && change.raw_amount != 0)
            .collect();

        let native_only = !mine.is_empty()
            && mine
                .iter()
                .all(|change| change.raw_amount < 0 && is_native_asset(&change.asset_type));

        if native_only {
            let first: &'a BalanceChange = mine[0];
            let magnitude = mine
                .iter()
                .fold(0u128, |acc, change| acc.saturating_add(change.raw_amount.unsigned_abs()));
            return Self {
                native_debit: Some(NativeDebit {
                    asset_type: first.asset_type.as_str(),
                    magnitude,
                }),
                ..Self::default()
            };
        }

        let (outgoing, incoming) = mine.into_iter().partition(|change| change.raw_amount < 0);
        Self {
            outgoing,
            incoming,
            native_debit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUI: &str = "0x2::sui::SUI";

    fn account() -> AccountId {
        AccountId::new("0xa11ce")
    }

    #[test]
    fn ignores_other_owners_and_zero_deltas() {
        let changes = vec![
            BalanceChange::new(AccountId::new("0xb0b"), "X::COIN", -10),
            BalanceChange::new(account(), "Y::COIN", 0),
            BalanceChange::new(account(), "Z::COIN", 7),
        ];
        let deltas = BalanceDeltas::for_account(&changes, &account());
        assert!(deltas.outgoing.is_empty());
        assert_eq!(deltas.incoming, vec![&changes[2]]);
        assert_eq!(deltas.native_debit, None);
    }

    #[test]
    fn native_only_decrease_is_set_aside() {
        let changes = vec![BalanceChange::new(account(), SUI, -2_000_000)];
        let deltas = BalanceDeltas::for_account(&changes, &account());
        assert!(deltas.outgoing.is_empty());
        assert!(deltas.incoming.is_empty());
        assert_eq!(
            deltas.native_debit,
            Some(NativeDebit {
                asset_type: SUI,
                magnitude: 2_000_000
            })
        );
    }

    #[test]
    fn native_decrease_with_token_change_stays_outgoing() {
        let changes = vec![
            BalanceChange::new(account(), SUI, -3_000_000_000),
            BalanceChange::new(account(), "0x5d::usdc::USDC", 4_000_000),
        ];
        let deltas = BalanceDeltas::for_account(&changes, &account());
        assert_eq!(deltas.outgoing, vec![&changes[0]]);
        assert_eq!(deltas.incoming, vec![&changes[1]]);
        assert_eq!(deltas.native_debit, None);
    }

    #[test]
    fn preserves_reported_order() {
        let changes = vec![
            BalanceChange::new(account(), "B::COIN", -2),
            BalanceChange::new(account(), "A::COIN", -1),
            BalanceChange::new(account(), "C::COIN", -3),
        ];
        let deltas = BalanceDeltas::for_account(&changes, &account());
        let order: Vec<&str> = deltas.outgoing.iter().map(|c| c.asset_type.as_str()).collect();
        assert_eq!(order, vec!["B::COIN", "A::COIN", "C::COIN"]);
    }
}
