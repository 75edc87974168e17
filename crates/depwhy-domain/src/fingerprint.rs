use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for an issue.
///
/// Identity fields:
/// - check_id
/// - implicated packages, in issue order
/// - message
pub fn fingerprint_for_issue(check_id: &str, packages: &[String], message: &str) -> String {
    let mut parts = vec![check_id];
    parts.extend(packages.iter().map(String::as_str));
    parts.push(message);
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
