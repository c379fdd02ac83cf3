/// Delimiter joining the identity fields of a composite store key.
pub const KEY_DELIMITER: char = '$';

/// Build a composite key from identity fields, e.g.
/// `composite_key(["superapp", "alice@demo.org"])` → `"superapp$alice@demo.org"`.
pub fn composite_key<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            out.push(KEY_DELIMITER);
        }
        out.push_str(part);
    }
    out
}
