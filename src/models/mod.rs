pub mod auth;
pub mod finance;
pub mod objective;
pub mod payroll;

use serde::Deserialize;

/// List endpoints answer either with a bare array or, when pagination is
/// switched on server side, with `{ "results": [...] }` (some older views
/// used `{ "data": [...] }`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
    Wrapped { data: Vec<T> },
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Plain(items) => items,
            ListPayload::Paged { results } => results,
            ListPayload::Wrapped { data } => data,
        }
    }
}

/// Decimal fields are serialised by the backend as strings ("150.00") but we
/// post plain numbers. Both shapes end up as `f64`.
pub mod amount {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    fn parse(raw: &str) -> Result<f64, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(0.0);
        }
        trimmed
            .parse::<f64>()
            .map_err(|_| format!("invalid amount `{}`", raw))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => parse(&s).map_err(de::Error::custom),
        }
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*value)
    }

    pub mod option {
        use super::{parse, Raw};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<Raw>::deserialize(deserializer)? {
                None => Ok(None),
                Some(Raw::Number(n)) => Ok(Some(n)),
                Some(Raw::Text(s)) => parse(&s).map(Some).map_err(de::Error::custom),
            }
        }

        pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => serializer.serialize_some(v),
                None => serializer.serialize_none(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(with = "amount")]
        value: f64,
        #[serde(default, with = "amount::option")]
        paid: Option<f64>,
    }

    #[test]
    fn amounts_accept_strings_and_numbers() {
        let a: Priced = serde_json::from_str(r#"{"value": "150.50", "paid": 20}"#).unwrap();
        assert_eq!(a.value, 150.5);
        assert_eq!(a.paid, Some(20.0));

        let b: Priced = serde_json::from_str(r#"{"value": 99}"#).unwrap();
        assert_eq!(b.value, 99.0);
        assert_eq!(b.paid, None);

        let c: Priced = serde_json::from_str(r#"{"value": "", "paid": null}"#).unwrap();
        assert_eq!(c.value, 0.0);
        assert_eq!(c.paid, None);
    }

    #[test]
    fn garbage_amount_is_rejected() {
        let err = serde_json::from_str::<Priced>(r#"{"value": "abc"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn list_payload_unwraps_every_shape() {
        let plain: ListPayload<u32> = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(plain.into_vec(), vec![1, 2]);

        let paged: ListPayload<u32> =
            serde_json::from_str(r#"{"count": 1, "next": null, "results": [3]}"#).unwrap();
        assert_eq!(paged.into_vec(), vec![3]);

        let wrapped: ListPayload<u32> = serde_json::from_str(r#"{"data": [4]}"#).unwrap();
        assert_eq!(wrapped.into_vec(), vec![4]);
    }
}
