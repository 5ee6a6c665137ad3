use chrono::{DateTime, Utc};

///number of random bytes behind each object name - two hex chars per byte
pub const NAME_ENTROPY_BYTES: usize = 16;

///random lowercase hex from the OS entropy source
pub fn random_hex_string(bytes: usize) -> color_eyre::Result<String> {
    let mut buf = vec![0_u8; bytes];
    getrandom::getrandom(&mut buf)?;

    Ok(buf.into_iter().map(|x| format!("{x:02x}")).collect())
}

///uploads get grouped by the day they were named, not the day they landed
pub fn date_directory(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}
