use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in a path segment: everything except the unreserved
/// marks `- _ . ! ~ * ' ( )`, matching the storefront's image helpers.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Public URL of an asset image: `<base>/images/<dir>/<encoded file>`.
///
/// `dir` is inserted verbatim; only the file name is percent-encoded.
#[must_use]
pub fn image_url(base: &str, dir: &str, file_name: &str) -> String {
    format!(
        "{}/images/{dir}/{}",
        base.trim_end_matches('/'),
        utf8_percent_encode(file_name, SEGMENT)
    )
}
