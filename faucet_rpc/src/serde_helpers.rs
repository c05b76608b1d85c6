use {
    serde::{de::DeserializeOwned, Deserialize, Deserializer},
    serde_aux::prelude::deserialize_option_number_from_string,
    serde_json::Value,
    std::{fmt::Display, str::FromStr},
};

pub mod u64_as_hex {
    use {
        crate::domain::ChainId,
        serde::{Deserialize, Deserializer, Serializer},
    };

    pub fn serialize<S>(data: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{data:#x}"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        String::deserialize(deserializer)?
            .parse::<ChainId>()
            .map(|id| id.value())
            .map_err(D::Error::custom)
    }
}

/// Decodes an optional field, mapping a value of the wrong shape to `None`
/// instead of failing the enclosing body.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;

    Ok(T::deserialize(value).ok())
}

/// Like [`lenient`], falling back to the type's default.
pub fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    lenient(deserializer).map(Option::unwrap_or_default)
}

/// Number or numeric string. Anything else decodes as `None`.
pub fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + DeserializeOwned,
    <T as FromStr>::Err: Display,
{
    let value = Value::deserialize(deserializer)?;

    Ok(deserialize_option_number_from_string(value).ok().flatten())
}

/// Treats empty strings the same as missing values. Faucet error bodies are
/// matched the way a JavaScript `a || b || fallback` chain would match them.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
