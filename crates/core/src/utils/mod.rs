pub mod decimal_utils;

pub use decimal_utils::{
    decimal_or_zero, decimal_serde, decimal_serde_option, decimal_serde_or_zero,
    deserialize_decimal_or_zero, deserialize_lenient_decimal, parse_decimal_lenient,
    value_to_decimal,
};
