use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// One page of a Voyager list endpoint (`/txns`, `/contract/{addr}/transfers`).
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(rename = "lastPage", deserialize_with = "de_u32_any")]
    pub last_page: u32,
}

/// Transaction from `/txns?to=<addr>`.
#[derive(Debug, Clone, Deserialize)]
pub struct TxnItem {
    #[serde(rename = "type")]
    pub tx_type: Option<String>,
    pub timestamp: i64,
    #[serde(deserialize_with = "de_string_any")]
    pub actual_fee: String,
    #[serde(default)]
    pub hash: Option<String>,
}

/// Token transfer from `/contract/<addr>/transfers`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferItem {
    pub transfer_from: String,
    pub transfer_to: String,
    pub token_symbol: Option<String>,
    #[serde(deserialize_with = "de_opt_string_any", default)]
    pub transfer_value: Option<String>,
    pub tx_hash: Option<String>,
}

/// `/contract/<addr>/balances` is an object keyed by asset slug. Entries for
/// untracked assets are not guaranteed to share a shape, so the raw map is kept.
pub type BalancesResponse = serde_json::Map<String, serde_json::Value>;

/// OKX `/api/v5/market/ticker` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub data: Vec<Ticker>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    #[serde(deserialize_with = "de_string_any")]
    pub last: String,
}

/// Parse a decimal amount, accepting plain and scientific notation.
pub fn parse_decimal(raw: &str) -> Result<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .with_context(|| format!("invalid decimal amount: {raw:?}"))
}

/// Convert a fee in wei (decimal or `0x` hex) to ether.
pub fn wei_to_ether(raw: &str) -> Result<Decimal> {
    let raw = raw.trim();
    let wei = if let Some(hex) = raw.strip_prefix("0x") {
        let v = u128::from_str_radix(hex, 16)
            .with_context(|| format!("invalid hex fee: {raw:?}"))?;
        i128::try_from(v).with_context(|| format!("fee out of range: {raw:?}"))?
    } else if let Ok(v) = raw.parse::<i128>() {
        v
    } else {
        let exact = parse_decimal(raw)?;
        let unit = Decimal::from_i128_with_scale(1_000_000_000_000_000_000, 0);
        return exact
            .checked_div(unit)
            .with_context(|| format!("fee out of range: {raw:?}"));
    };
    Decimal::try_from_i128_with_scale(wei, 18)
        .with_context(|| format!("fee out of range: {raw:?}"))
}

/// Look up `<slug>.amount` in a balances response. `Ok(None)` when the slug is absent.
pub fn balance_amount(balances: &BalancesResponse, slug: &str) -> Result<Option<Decimal>> {
    let Some(entry) = balances.get(slug) else {
        return Ok(None);
    };
    let amount = entry
        .get("amount")
        .with_context(|| format!("balance entry {slug:?} has no amount"))?;
    let parsed = match amount {
        serde_json::Value::String(s) => parse_decimal(s)?,
        serde_json::Value::Number(n) => parse_decimal(&n.to_string())?,
        other => anyhow::bail!("balance entry {slug:?} has non-numeric amount: {other}"),
    };
    Ok(Some(parsed))
}

fn de_string_any<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    de_opt_string_any(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("expected a string or number, got null"))
}

fn de_opt_string_any<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de;

    struct StringOrNumber;

    impl<'de> de::Visitor<'de> for StringOrNumber {
        type Value = Option<String>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

fn de_u32_any<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = de_string_any(deserializer)?;
    raw.trim().parse::<u32>().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_txns_page() {
        let json = r#"{"items":[{"type":"INVOKE","timestamp":1700000000,"actual_fee":"2000000000000000","hash":"0x1"}],"lastPage":3}"#;
        let page: Page<TxnItem> = serde_json::from_str(json).unwrap();
        assert_eq!(page.last_page, 3);
        assert_eq!(page.items[0].tx_type.as_deref(), Some("INVOKE"));
        assert_eq!(page.items[0].actual_fee, "2000000000000000");
    }

    #[test]
    fn test_last_page_as_string() {
        let json = r#"{"items":[],"lastPage":"7"}"#;
        let page: Page<TxnItem> = serde_json::from_str(json).unwrap();
        assert_eq!(page.last_page, 7);
    }

    #[test]
    fn test_parse_transfer_numeric_value_and_null_symbol() {
        let json = r#"{"items":[{"transfer_from":"0xa","transfer_to":"0xb","token_symbol":null,"transfer_value":1.5,"tx_hash":"0xh"}],"lastPage":1}"#;
        let page: Page<TransferItem> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items[0].token_symbol, None);
        assert_eq!(page.items[0].transfer_value.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_wei_to_ether() {
        assert_eq!(
            wei_to_ether("2000000000000000").unwrap(),
            Decimal::from_str("0.002").unwrap()
        );
        assert_eq!(
            wei_to_ether("0x71afd498d0000").unwrap(),
            Decimal::from_str("0.002").unwrap()
        );
        assert!(wei_to_ether("abc").is_err());
    }

    #[test]
    fn test_parse_decimal_scientific() {
        assert_eq!(
            parse_decimal("1e-3").unwrap(),
            Decimal::from_str("0.001").unwrap()
        );
    }

    #[test]
    fn test_balance_amount() {
        let balances: BalancesResponse = serde_json::from_str(
            r#"{"ethereum":{"amount":"0.25"},"tether":{"amount":12},"weird":[1,2]}"#,
        )
        .unwrap();
        assert_eq!(
            balance_amount(&balances, "ethereum").unwrap(),
            Some(Decimal::from_str("0.25").unwrap())
        );
        assert_eq!(
            balance_amount(&balances, "tether").unwrap(),
            Some(Decimal::from(12))
        );
        assert_eq!(balance_amount(&balances, "dai").unwrap(), None);
    }

    #[test]
    fn test_balance_amount_malformed_is_error() {
        let balances: BalancesResponse =
            serde_json::from_str(r#"{"dai":{"amount":true}}"#).unwrap();
        assert!(balance_amount(&balances, "dai").is_err());
    }

    #[test]
    fn test_parse_ticker() {
        let json = r#"{"code":"0","msg":"","data":[{"instId":"ETH-USD-SWAP","last":"1935.2"}]}"#;
        let ticker: TickerResponse = serde_json::from_str(json).unwrap();
        assert_eq!(ticker.data[0].last, "1935.2");
    }
}
