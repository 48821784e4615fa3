//! Search filters for the inventory list.
//!
//! Fields hold the raw form input; empty fields are omitted from the query
//! string entirely, so the server only sees the filters the user actually
//! set.

/// Filters for `GET /api/sweets/search`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetSearchQuery {
    pub name: String,
    pub category: String,
    pub min_price: String,
    pub max_price: String,
}

impl SweetSearchQuery {
    /// True when no filter is set; the plain list endpoint applies then.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.category.is_empty()
            && self.min_price.is_empty()
            && self.max_price.is_empty()
    }

    /// Key/value pairs in a fixed order, non-empty fields only.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", self.name.as_str()),
            ("category", self.category.as_str()),
            ("minPrice", self.min_price.as_str()),
            ("maxPrice", self.max_price.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }

    /// The encoded query string, without the leading `?`.
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| format!("{key}={}", encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Minimal percent-encoding for query values. Unreserved characters pass
/// through; everything else is escaped byte-wise.
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_has_no_pairs() {
        let query = SweetSearchQuery::default();
        assert!(query.is_empty());
        assert!(query.query_pairs().is_empty());
        assert_eq!(query.query_string(), "");
    }

    #[test]
    fn only_non_empty_fields_are_emitted() {
        let query = SweetSearchQuery {
            min_price: "1.00".into(),
            max_price: "5.00".into(),
            ..Default::default()
        };
        assert!(!query.is_empty());
        assert_eq!(
            query.query_pairs(),
            vec![("minPrice", "1.00"), ("maxPrice", "5.00")]
        );
        assert_eq!(query.query_string(), "minPrice=1.00&maxPrice=5.00");
    }

    #[test]
    fn all_fields_keep_a_fixed_order() {
        let query = SweetSearchQuery {
            name: "fudge".into(),
            category: "chocolate".into(),
            min_price: "0.5".into(),
            max_price: "9".into(),
        };
        assert_eq!(
            query.query_string(),
            "name=fudge&category=chocolate&minPrice=0.5&maxPrice=9"
        );
    }

    #[test]
    fn values_are_percent_encoded() {
        let query = SweetSearchQuery {
            name: "gummy bears & co".into(),
            ..Default::default()
        };
        assert_eq!(query.query_string(), "name=gummy%20bears%20%26%20co");
    }
}
