//! String utility functions.

/// Derives a human-readable title from a field name.
///
/// Underscores become spaces and each word is capitalized: the first cased
/// character after an uncased one is uppercased, the rest are lowercased.
///
/// # Examples
///
/// ```
/// use hxform_core::utils::text::title_from_name;
///
/// assert_eq!(title_from_name("birth_date"), "Birth Date");
/// assert_eq!(title_from_name("is_admin"), "Is Admin");
/// assert_eq!(title_from_name("userID"), "Userid");
/// ```
pub fn title_from_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_cased = false;
    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }
    out
}
