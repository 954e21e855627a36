//! Serde adapter writing big integers as decimal strings.

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(values: &[BigUint], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(BigUint::to_string))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<BigUint>, D::Error> {
    Vec::<String>::deserialize(deserializer)?
        .iter()
        .map(|raw| raw.parse::<BigUint>().map_err(serde::de::Error::custom))
        .collect()
}
