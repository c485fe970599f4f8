//! Alternate source keys per logical field
//!
//! Listing nodes name the same data differently across schema versions.
//! Each logical field lists its candidate keys in priority order and
//! [`first_present`] picks the first one holding a non-empty value.

use serde_json::Value;

/// Ordered candidate keys for one logical field
pub type FieldKeys = &'static [&'static str];

pub const ID: FieldKeys = &["id"];
pub const TITLE: FieldKeys = &["title", "primaryRoleTitle"];
pub const SLUG: FieldKeys = &["slug"];
pub const COMPANY: FieldKeys = &["startup", "company"];
pub const LOCATION: FieldKeys = &["locationNames", "locations"];
pub const REMOTE: FieldKeys = &["remote", "isRemote"];
pub const COMPENSATION: FieldKeys = &["compensation", "compensationString"];
pub const JOB_TYPE: FieldKeys = &["jobType", "employmentType"];
pub const DATE_POSTED: FieldKeys = &["liveStartAt", "postedAt", "createdAt"];
pub const DESCRIPTION: FieldKeys = &["description", "descriptionHtml", "descriptionText"];

pub const COMPANY_NAME: FieldKeys = &["name", "companyName"];
pub const COMPANY_LOGO: FieldKeys = &["logoUrl", "companyLogoUrl"];
pub const COMPANY_URL: FieldKeys = &["companyUrl", "websiteUrl"];
pub const COMPANY_SIZE: FieldKeys = &["companySize", "companySizeString"];

/// Location object keys, for lists of resolved location nodes
pub const LOCATION_NAME: FieldKeys = &["displayName", "name"];

/// Returns the first candidate value that is present and non-empty
///
/// Null, blank strings, empty arrays and empty objects count as absent.
pub fn first_present<'a>(node: &'a Value, keys: FieldKeys) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| node.get(*key))
        .find(|value| !is_empty(value))
}

/// Like [`first_present`], rendered as a trimmed string
///
/// Numbers are formatted; booleans, arrays and objects are skipped.
pub fn first_text(node: &Value, keys: FieldKeys) -> Option<String> {
    keys.iter()
        .filter_map(|key| node.get(*key))
        .find_map(scalar_text)
}

/// Renders a string or number as trimmed text
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(obj) => obj.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
