//! Large-number display formatting and the lossless save encoding for
//! arbitrary-precision currency values.

use num_bigint::BigUint;

const SI_SYMBOLS: [&str; 12] = ["", "K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc", "No", "De"];

/// Format a currency value with an SI-style suffix and up to two decimals,
/// e.g. `1234567` → `"1.23M"`. Values below 1000 print verbatim.
pub fn format_number(value: &BigUint) -> String {
    let thousand = BigUint::from(1_000u32);
    if value < &thousand {
        return value.to_string();
    }

    let mut tier = 0usize;
    let mut temp = value.clone();
    while temp >= thousand && tier < SI_SYMBOLS.len() - 1 {
        temp /= 1_000u32;
        tier += 1;
    }

    let divisor = BigUint::from(10u32).pow((tier * 3) as u32);
    let main_part = value / &divisor;
    let remainder = value % &divisor;

    if remainder > BigUint::from(0u32) {
        let decimal_part = remainder * 100u32 / &divisor;
        if decimal_part > BigUint::from(0u32) {
            return format!(
                "{}.{:0>2}{}",
                main_part,
                decimal_part.to_string(),
                SI_SYMBOLS[tier]
            );
        }
    }

    format!("{}{}", main_part, SI_SYMBOLS[tier])
}

/// Serde adapter storing a `BigUint` as a decimal string with an `n` suffix
/// (`"1500n"`). Plain JSON numbers silently lose precision past 2^53, so the
/// save format rejects them for currency fields. Round-trips exactly at any
/// magnitude.
pub mod bigint_str {
    use num_bigint::BigUint;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}n", value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        let digits = text
            .strip_suffix('n')
            .ok_or_else(|| de::Error::custom(format!("big integer missing 'n' suffix: {text:?}")))?;
        digits
            .parse::<BigUint>()
            .map_err(|e| de::Error::custom(format!("bad big integer {digits:?}: {e}")))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "bigint_str")]
        value: BigUint,
    }

    proptest! {
        #[test]
        fn prop_format_never_panics(n in 0u128..u128::MAX) {
            let _ = format_number(&BigUint::from(n));
        }

        #[test]
        fn prop_format_below_thousand_is_decimal(n in 0u32..1000) {
            prop_assert_eq!(format_number(&BigUint::from(n)), n.to_string());
        }

        #[test]
        fn prop_serde_roundtrip(n in 0u128..u128::MAX) {
            let original = Wrapper { value: BigUint::from(n) };
            let json = serde_json::to_string(&original).unwrap();
            let restored: Wrapper = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(restored.value, original.value);
        }
    }
}
