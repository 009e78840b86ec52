//! Lenient calendar-date deserialisation for work-history dates.
//!
//! Accepts either a bare `YYYY-MM-DD` date or a full RFC 3339 timestamp (what
//! a browser `Date` serialises to); only the UTC date part is kept. Dates are
//! always serialised back as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, de};

pub fn parse(raw: &str) -> Result<NaiveDate, String> {
  if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
    return Ok(date);
  }
  DateTime::parse_from_rfc3339(raw)
    .map(|dt| dt.with_timezone(&Utc).date_naive())
    .map_err(|_| {
      format!("invalid date {raw:?}: expected YYYY-MM-DD or an RFC 3339 timestamp")
    })
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = String::deserialize(deserializer)?;
  parse(&raw).map_err(de::Error::custom)
}

pub fn deserialize_opt<'de, D>(
  deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
  D: Deserializer<'de>,
{
  Option::<String>::deserialize(deserializer)?
    .filter(|raw| !raw.is_empty())
    .map(|raw| parse(&raw).map_err(de::Error::custom))
    .transpose()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_plain_date() {
    assert_eq!(
      parse("2020-06-01").unwrap(),
      NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()
    );
  }

  #[test]
  fn parses_browser_timestamp() {
    assert_eq!(
      parse("2018-06-01T00:00:00.000Z").unwrap(),
      NaiveDate::from_ymd_opt(2018, 6, 1).unwrap()
    );
  }

  #[test]
  fn rejects_garbage() {
    assert!(parse("June 1st").is_err());
  }
}
