use crate::listing::fields::{first_text, LOCATION_NAME};
use crate::listing::Location;
use serde_json::Value;

/// Parses a comma-separated location string
///
/// - one part: city
/// - two parts: city and state when the second part is an abbreviation of at
///   most two characters, otherwise city and country
/// - three or more parts: city, state, country
pub fn parse_location(text: &str) -> Option<Location> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let part = |i: usize| {
        parts
            .get(i)
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
    };

    let location = match parts.len() {
        0 | 1 => Location {
            city: part(0),
            ..Location::default()
        },
        2 if parts[1].chars().count() <= 2 => Location {
            city: part(0),
            state: part(1),
            country: None,
        },
        2 => Location {
            city: part(0),
            state: None,
            country: part(1),
        },
        _ => Location {
            city: part(0),
            state: part(1),
            country: part(2),
        },
    };

    if location == Location::default() {
        None
    } else {
        Some(location)
    }
}

/// Parses the location field of a listing node
///
/// Accepts a string or a list; for a list only the first entry is used, and
/// object entries contribute their display name.
pub fn parse_location_value(value: &Value) -> Option<Location> {
    let first = match value {
        Value::Array(items) => items.first()?,
        other => other,
    };

    let text = match first {
        Value::String(s) => s.clone(),
        Value::Object(_) => first_text(first, LOCATION_NAME)?,
        _ => return None,
    };

    parse_location(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loc(city: Option<&str>, state: Option<&str>, country: Option<&str>) -> Location {
        Location {
            city: city.map(String::from),
            state: state.map(String::from),
            country: country.map(String::from),
        }
    }

    #[test]
    fn test_city_only() {
        assert_eq!(parse_location("Remote"), Some(loc(Some("Remote"), None, None)));
    }

    #[test]
    fn test_city_and_state_abbreviation() {
        assert_eq!(
            parse_location("San Francisco, CA"),
            Some(loc(Some("San Francisco"), Some("CA"), None))
        );
    }

    #[test]
    fn test_city_and_country() {
        assert_eq!(
            parse_location("London, United Kingdom"),
            Some(loc(Some("London"), None, Some("United Kingdom")))
        );
    }

    #[test]
    fn test_city_state_country() {
        assert_eq!(
            parse_location("Austin, TX, USA"),
            Some(loc(Some("Austin"), Some("TX"), Some("USA")))
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_location(""), None);
        assert_eq!(parse_location(" , "), None);
    }

    #[test]
    fn test_value_list_uses_first_entry() {
        let value = json!(["Berlin, Germany", "Remote"]);
        assert_eq!(
            parse_location_value(&value),
            Some(loc(Some("Berlin"), None, Some("Germany")))
        );
    }

    #[test]
    fn test_value_object_entries() {
        let value = json!([{"displayName": "New York, NY"}]);
        assert_eq!(
            parse_location_value(&value),
            Some(loc(Some("New York"), Some("NY"), None))
        );
    }

    #[test]
    fn test_value_unusable() {
        assert_eq!(parse_location_value(&json!([])), None);
        assert_eq!(parse_location_value(&json!(42)), None);
    }
}
