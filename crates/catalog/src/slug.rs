//! Group name <-> URL slug codec.
//!
//! `"Product & Engineering"` encodes to `"product-and-engineering"`.
//! Decoding is a heuristic inverse: it yields a lower-case candidate name
//! that callers match case-insensitively against the known groups.
//!
//! Known limitation: a group whose name contains the standalone word
//! "and" (e.g. `"Research and Development"`) decodes with `&` in its
//! place, and an `&` without surrounding spaces (`"R&D"`) is not restored
//! at all. Neither case occurs in the shipped group set.

/// Encode a group name as a URL-safe slug.
///
/// Lower-cases, collapses every whitespace run into a single `-`, then
/// replaces each literal `&` with `and`.
pub fn encode(group_name: &str) -> String {
    let lowered = group_name.to_lowercase();
    let mut out = String::with_capacity(lowered.len() + 4);
    let mut in_whitespace = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            out.push(ch);
        }
    }
    out.replace('&', "and")
}

/// Decode a slug back into a candidate group name.
///
/// Hyphens become spaces and every hyphen-delimited `and` token becomes
/// `&`. The result keeps the slug's casing.
pub fn decode(slug: &str) -> String {
    slug.split('-')
        .map(|token| if token == "and" { "&" } else { token })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED_GROUPS: &[&str] = &[
        "Sales",
        "Marketing",
        "Customer Success",
        "Product & Engineering",
        "Finance",
        "Operations",
        "Executive",
        "HR",
    ];

    #[test]
    fn encodes_ampersand_and_spaces() {
        assert_eq!(encode("Product & Engineering"), "product-and-engineering");
        assert_eq!(encode("Customer Success"), "customer-success");
        assert_eq!(encode("Sales"), "sales");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(encode("Customer \t  Success"), "customer-success");
    }

    #[test]
    fn decodes_conjunction_token() {
        assert_eq!(decode("product-and-engineering"), "product & engineering");
        assert_eq!(decode("customer-success"), "customer success");
    }

    #[test]
    fn decode_leaves_and_inside_words() {
        assert_eq!(decode("brand-operations"), "brand operations");
        assert_eq!(decode("sandbox"), "sandbox");
    }

    #[test]
    fn shipped_groups_round_trip_case_insensitively() {
        for group in SHIPPED_GROUPS {
            let decoded = decode(&encode(group));
            assert_eq!(decoded.to_lowercase(), group.to_lowercase(), "group {group}");
        }
    }

    #[test]
    fn literal_and_word_does_not_round_trip() {
        let decoded = decode(&encode("Research and Development"));
        assert_eq!(decoded, "research & development");
    }

    #[test]
    fn tight_ampersand_does_not_round_trip() {
        assert_eq!(encode("R&D"), "randd");
        assert_eq!(decode("randd"), "randd");
    }

    #[test]
    fn decoding_a_plain_name_is_harmless() {
        assert_eq!(decode("Product & Engineering"), "Product & Engineering");
    }
}
