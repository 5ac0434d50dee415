//! Fixed-scale amount formatting.
//!
//! Raw ledger amounts are unscaled integers. Every asset is rendered as if it
//! had 9 decimal places (the native SUI precision). This is an approximation:
//! assets with a different precision display wrong magnitudes, so formatted
//! amounts are best-effort and never authoritative.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places assumed for every asset.
pub const ASSET_DECIMALS: u32 = 9;

/// Raw units per whole unit (`10^ASSET_DECIMALS`).
pub const ONE_UNIT: u128 = 1_000_000_000;

/// Fractional digits shown for transferred amounts.
pub const AMOUNT_FRACTION_DIGITS: u32 = 4;

/// Fractional digits shown for gas costs.
pub const GAS_FRACTION_DIGITS: u32 = 6;

/// Canonical type tag of the native asset.
pub const NATIVE_ASSET: &str = "0x2::sui::SUI";

/// A scaled amount and its short asset label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedAmount {
    pub decimal: String,
    pub label: String,
}

impl fmt::Display for FormattedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.decimal, self.label)
    }
}

/// Format a signed raw amount of `asset_type`.
///
/// The decimal is the magnitude `|raw| / 10^9` with exactly four fractional
/// digits, so `raw` and `-raw` render identically.
pub fn format_amount(raw: i128, asset_type: &str) -> FormattedAmount {
    format_magnitude(raw.unsigned_abs(), asset_type)
}

/// Format an unsigned raw magnitude of `asset_type`.
pub fn format_magnitude(magnitude: u128, asset_type: &str) -> FormattedAmount {
    FormattedAmount {
        decimal: scale_to_decimal(magnitude, AMOUNT_FRACTION_DIGITS),
        label: asset_label(asset_type).to_string(),
    }
}

/// Format a net gas cost (raw native units) with six fractional digits.
pub fn format_gas(net_cost: u64) -> String {
    scale_to_decimal(u128::from(net_cost), GAS_FRACTION_DIGITS)
}

/// Render `magnitude / 10^9` with `fraction_digits` digits, rounding half up.
pub fn scale_to_decimal(magnitude: u128, fraction_digits: u32) -> String {
    let fraction_digits = fraction_digits.min(ASSET_DECIMALS);
    let divisor = 10u128.pow(ASSET_DECIMALS - fraction_digits);
    let round_up = divisor > 1 && magnitude % divisor >= divisor / 2;
    let units = magnitude / divisor + u128::from(round_up);

    if fraction_digits == 0 {
        return units.to_string();
    }
    let fraction_base = 10u128.pow(fraction_digits);
    format!(
        "{}.{:0width$}",
        units / fraction_base,
        units % fraction_base,
        width = fraction_digits as usize
    )
}

/// Short label of an asset type: the final `::` segment, without type
/// parameters (`"0x5d4b::coin::COIN"` becomes `"COIN"`).
pub fn asset_label(asset_type: &str) -> &str {
    let base = asset_type.split('<').next().unwrap_or(asset_type).trim();
    base.rsplit("::").next().unwrap_or(base)
}

/// Whether `asset_type` names the native asset, ignoring address padding
/// (`0x2::sui::SUI` and `0x000...002::sui::SUI` are the same type).
pub fn is_native_asset(asset_type: &str) -> bool {
    let mut parts = asset_type.trim().split("::");
    let (Some(address), Some(module), Some(name), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let digits = address
        .strip_prefix("0x")
        .unwrap_or(address)
        .trim_start_matches('0');
    digits == "2" && module == "sui" && name == "SUI"
}
