//! Display helpers shared by the listing and summary renderers.

use crate::core::types::{Rating, Timestamp};

pub const PLACEHOLDER: &str = "—";

/// `dd.mm.yyyy HH:MM`, or the placeholder when the timestamp is absent or
/// unparseable.
pub fn fmt_timestamp(ts: Option<&Timestamp>) -> String {
    ts.and_then(Timestamp::to_utc)
        .map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Traffic-light icon for a 1-5 rating. Missing or out-of-range values
/// clamp into range, so an unrated field shows the lowest light.
pub fn icon(value: Option<f64>) -> &'static str {
    let v = value.filter(|v| v.is_finite()).unwrap_or(0.0).clamp(1.0, 5.0);
    if v >= 5.0 {
        "🟢"
    } else if v >= 4.0 {
        "✅"
    } else if v >= 3.0 {
        "🙂"
    } else if v >= 2.0 {
        "⚠️"
    } else {
        "🔴"
    }
}

/// Raw rating value for display: whole numbers without a decimal point,
/// sentinel strings as stored, missing fields as the placeholder.
pub fn rating_display(rating: Option<&Rating>) -> String {
    match rating {
        Some(Rating::Value(v)) if v.fract() == 0.0 => format!("{}", *v as i64),
        Some(Rating::Value(v)) => format!("{v}"),
        Some(Rating::Sentinel(s)) => s.clone(),
        None => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn timestamp_formats_day_first() {
        let ts = Timestamp::from(Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap());
        assert_eq!(fmt_timestamp(Some(&ts)), "07.03.2024 09:05");
        assert_eq!(fmt_timestamp(None), PLACEHOLDER);
    }

    #[test]
    fn icon_maps_each_rating_band() {
        assert_eq!(icon(Some(5.0)), "🟢");
        assert_eq!(icon(Some(4.0)), "✅");
        assert_eq!(icon(Some(3.0)), "🙂");
        assert_eq!(icon(Some(2.0)), "⚠️");
        assert_eq!(icon(Some(1.0)), "🔴");
        assert_eq!(icon(None), "🔴");
    }

    #[test]
    fn rating_display_shows_sentinels_verbatim() {
        assert_eq!(rating_display(Some(&Rating::Value(4.0))), "4");
        assert_eq!(rating_display(Some(&Rating::Sentinel("na".into()))), "na");
        assert_eq!(rating_display(None), PLACEHOLDER);
    }
}
