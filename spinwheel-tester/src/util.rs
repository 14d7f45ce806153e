use anyhow::{Context, Result};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse a decimal or `0x`-prefixed hexadecimal seed.
pub fn parse_seed(token: &str) -> Result<u64> {
    let parsed = match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => token.parse::<u64>(),
    };
    parsed.with_context(|| format!("invalid seed `{token}`"))
}

pub fn parse_seeds(tokens: &[String]) -> Result<Vec<u64>> {
    tokens.iter().map(|token| parse_seed(token)).collect()
}
