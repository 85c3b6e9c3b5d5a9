//! Screenshot path derivation
//!
//! The on-device test framework stores one PNG per failed test at
//! `<root>/<class name>/<test name>.png`. Deriving the same path from
//! the test result record is the matching contract: if the framework
//! changes its naming scheme, matching breaks silently, so this module
//! keeps the derivation in one pure function with no I/O.

/// Characters that are illegal in file names on at least one supported
/// platform and therefore stripped by the test framework when it writes
/// the screenshot.
const ILLEGAL_FILE_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Strips characters that cannot appear in a file name.
///
/// Idempotent: sanitizing an already sanitized name is a no-op.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| !ILLEGAL_FILE_NAME_CHARS.contains(c) && !c.is_control())
        .collect()
}

/// Derives the expected screenshot path for one failed case.
///
/// Pure function of its three inputs: the same (folder, class, test)
/// triple always yields the same path string. The folder is expected to
/// carry a trailing slash; configuration guarantees that.
pub fn screenshot_path(folder: &str, class_name: &str, test_name: &str) -> String {
    format!(
        "{}{}/{}.png",
        folder,
        sanitize(class_name),
        sanitize(test_name)
    )
}

/// The file name an attachment is published under.
///
/// Matches the on-disk name, not the full path, so the attachment shows
/// up in the test result UI as `<test>.png`.
pub fn attachment_file_name(test_name: &str) -> String {
    format!("{}.png", sanitize(test_name))
}
