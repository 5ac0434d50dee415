//! The classification decision.

use suiscope_types::amount::ONE_UNIT;
use suiscope_types::{
    format_amount, format_gas, format_magnitude, format_timestamp_ms, AccountId, BalanceChange,
    Category, ClassifiedTransaction, TransactionDetail,
};

use crate::deltas::BalanceDeltas;

/// Classify one transaction from the point of view of `account`.
///
/// Priority order:
/// 1. the account lost and gained assets: [`Category::Swap`]
/// 2. only lost assets: [`Category::Send`]
/// 3. only gained assets: [`Category::Receive`]
/// 4. only a native-asset decrease of at least one whole unit: [`Category::SuiSend`]
/// 5. only a smaller native-asset decrease (gas): [`Category::ContractExecution`]
/// 6. anything else: [`Category::Other`]
pub fn classify(detail: &TransactionDetail, account: &AccountId) -> ClassifiedTransaction {
    let deltas = BalanceDeltas::for_account(&detail.balance_changes, account);

    let (category, outgoing, incoming) = match (
        deltas.outgoing.is_empty(),
        deltas.incoming.is_empty(),
        &deltas.native_debit,
    ) {
        (false, false, _) => (
            Category::Swap,
            render(&deltas.outgoing),
            render(&deltas.incoming),
        ),
        (false, true, _) => (Category::Send, render(&deltas.outgoing), Vec::new()),
        (true, false, _) => (Category::Receive, Vec::new(), render(&deltas.incoming)),
        (true, true, Some(debit)) if debit.magnitude >= ONE_UNIT => (
            Category::SuiSend,
            vec![format_magnitude(debit.magnitude, debit.asset_type).to_string()],
            Vec::new(),
        ),
        (true, true, Some(_)) => (Category::ContractExecution, Vec::new(), Vec::new()),
        (true, true, None) => (Category::Other, Vec::new(), Vec::new()),
    };

    tracing::trace!(
        digest = %detail.digest,
        category = %category,
        outgoing = outgoing.len(),
        incoming = incoming.len(),
        "classified transaction"
    );

    ClassifiedTransaction {
        digest: detail.digest.clone(),
        timestamp: format_timestamp_ms(detail.timestamp_ms),
        category,
        outgoing,
        incoming,
        gas_cost: format_gas(detail.gas.net_cost()),
    }
}

/// Classify a batch, preserving input order.
pub fn classify_all<'a, I>(details: I, account: &AccountId) -> Vec<ClassifiedTransaction>
where
    I: IntoIterator<Item = &'a TransactionDetail>,
{
    details
        .into_iter()
        .map(|detail| classify(detail, account))
        .collect()
}

fn render(changes: &[&BalanceChange]) -> Vec<String> {
    changes
        .iter()
        .map(|change| format_amount(change.raw_amount, &change.asset_type).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use suiscope_types::time::UNKNOWN_TIMESTAMP;
    use suiscope_types::{GasUsage, TransactionDigest, EMPTY_MARKER};

    const SUI: &str = "0x2::sui::SUI";

    fn account() -> AccountId {
        AccountId::new("0xa")
    }

    fn detail(changes: Vec<BalanceChange>) -> TransactionDetail {
        TransactionDetail {
            digest: TransactionDigest::new("D1"),
            timestamp_ms: Some(1_700_000_000_000),
            gas: GasUsage::new(1_000_000, 2_000_000, 978_120),
            balance_changes: changes,
        }
    }

    #[test]
    fn swap_lists_both_sides() {
        let tx = detail(vec![
            BalanceChange::new(account(), "X::COIN", -5_000_000_000),
            BalanceChange::new(account(), "Y::COIN", 3_000_000_000),
        ]);
        let classified = classify(&tx, &account());
        assert_eq!(classified.category, Category::Swap);
        assert_eq!(classified.outgoing, vec!["5.0000 COIN"]);
        assert_eq!(classified.incoming, vec!["3.0000 COIN"]);
    }

    #[test]
    fn send_has_empty_incoming() {
        let tx = detail(vec![
            BalanceChange::new(account(), "0x5d::usdc::USDC", -12_345_600_000),
            BalanceChange::new(AccountId::new("0xb"), "0x5d::usdc::USDC", 12_345_600_000),
        ]);
        let classified = classify(&tx, &account());
        assert_eq!(classified.category, Category::Send);
        assert_eq!(classified.outgoing, vec!["12.3456 USDC"]);
        assert_eq!(classified.incoming_summary(), EMPTY_MARKER);
    }

    #[test]
    fn receive_mirrors_send() {
        let tx = detail(vec![
            BalanceChange::new(AccountId::new("0xb"), SUI, -7_000_000_000),
            BalanceChange::new(account(), SUI, 7_000_000_000),
        ]);
        let classified = classify(&tx, &account());
        assert_eq!(classified.category, Category::Receive);
        assert!(classified.outgoing.is_empty());
        assert_eq!(classified.incoming, vec!["7.0000 SUI"]);
    }

    #[test]
    fn large_native_debit_is_sui_send() {
        let tx = detail(vec![BalanceChange::new(account(), SUI, -2_501_000_000)]);
        let classified = classify(&tx, &account());
        assert_eq!(classified.category, Category::SuiSend);
        assert_eq!(classified.outgoing, vec!["2.5010 SUI"]);
        assert!(classified.incoming.is_empty());
    }

    #[test]
    fn gas_only_debit_is_contract_execution() {
        let tx = detail(vec![BalanceChange::new(account(), SUI, -2_021_880)]);
        let classified = classify(&tx, &account());
        assert_eq!(classified.category, Category::ContractExecution);
        assert!(classified.outgoing.is_empty());
        assert!(classified.incoming.is_empty());
    }

    #[test]
    fn threshold_of_exactly_one_unit_is_sui_send() {
        let tx = detail(vec![BalanceChange::new(account(), SUI, -1_000_000_000)]);
        assert_eq!(classify(&tx, &account()).category, Category::SuiSend);
        let tx = detail(vec![BalanceChange::new(account(), SUI, -999_999_999)]);
        assert_eq!(classify(&tx, &account()).category, Category::ContractExecution);
    }

    #[test]
    fn no_owned_changes_is_other() {
        let tx = detail(vec![BalanceChange::new(AccountId::new("0xb"), SUI, -5)]);
        let classified = classify(&tx, &account());
        assert_eq!(classified.category, Category::Other);
        assert_eq!(classified.outgoing_summary(), EMPTY_MARKER);
    }

    #[test]
    fn multiple_entries_summarize_with_count() {
        let tx = detail(vec![
            BalanceChange::new(account(), "A::COIN", -1_000_000_000),
            BalanceChange::new(account(), SUI, -2_000_000_000),
            BalanceChange::new(account(), "B::LP", -3_000_000_000),
            BalanceChange::new(account(), "C::USDC", 4_000_000_000),
        ]);
        let classified = classify(&tx, &account());
        assert_eq!(classified.category, Category::Swap);
        assert_eq!(classified.outgoing.len(), 3);
        assert_eq!(classified.outgoing_summary(), "1.0000 COIN +2 more");
        assert_eq!(classified.incoming_summary(), "4.0000 USDC");
    }

    #[test]
    fn gas_and_timestamp_are_rendered() {
        let classified = classify(&detail(Vec::new()), &account());
        assert_eq!(classified.gas_cost, "0.002022");
        assert_eq!(classified.timestamp, "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn missing_timestamp_renders_unknown() {
        let mut tx = detail(Vec::new());
        tx.timestamp_ms = None;
        tx.gas = GasUsage::default();
        let classified = classify(&tx, &account());
        assert_eq!(classified.timestamp, UNKNOWN_TIMESTAMP);
        assert_eq!(classified.gas_cost, "0.000000");
    }

    #[test]
    fn classify_all_preserves_order() {
        let mut first = detail(Vec::new());
        first.digest = TransactionDigest::new("first");
        let mut second = detail(Vec::new());
        second.digest = TransactionDigest::new("second");
        let out = classify_all([&first, &second], &account());
        let digests: Vec<&str> = out.iter().map(|c| c.digest.as_str()).collect();
        assert_eq!(digests, vec!["first", "second"]);
    }
}
