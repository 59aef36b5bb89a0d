//! Priority flag for event submissions
//!
//! Submissions mentioning sustainability themes jump the admin review queue.
//! Matching is on whole words (or word sequences) after lowercasing, so
//! "economy" does not match "eco".

const PRIORITY_TERMS: &[&str] = &[
    "sustainable",
    "sustainability",
    "eco",
    "ecotourism",
    "conservation",
    "renewable",
    "recycle",
    "recycling",
    "zero waste",
    "organic",
    "climate",
    "biodiversity",
    "plant based",
    "vegan",
    "wildlife",
    "reforestation",
    "tree planting",
    "solar",
    "regenerative",
    "clean up",
    "cleanup",
];

/// Whether title or description contains a priority term
pub fn is_priority(title: &str, description: &str) -> bool {
    let text = normalize(&format!("{title} {description}"));
    PRIORITY_TERMS
        .iter()
        .any(|term| text.contains(&format!(" {term} ")))
}

/// Lowercase, collapse every non-alphanumeric run into one space, pad both ends
fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push(' ');
    for c in input.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with(' ') {
            out.push(' ');
        }
    }
    if !out.ends_with(' ') {
        out.push(' ');
    }
    out
}
