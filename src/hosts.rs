//! Idempotent reconciliation of the system hosts file
//!
//! The reconciler computes the new file content in memory and reports
//! whether anything changed at all; the caller only writes when it did.
//! Matching is deliberately loose (no structured hosts parsing): adding
//! checks for the domain as a whitespace-delimited token on any line,
//! removing drops any line that mentions either domain as a substring.

use crate::domain::DomainPair;
use std::path::PathBuf;

/// Address every managed entry points at
pub const HOSTS_IP: &str = "127.0.0.1";

/// Intended action for a reconciliation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostsAction {
    /// Ensure both domain entries are present
    Add,
    /// Drop every line mentioning either domain
    Remove,
}

/// Platform default path of the system hosts file
pub fn default_hosts_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

/// Render the hosts line for one domain
pub fn entry_line(domain: &str) -> String {
    format!("{}   {}", HOSTS_IP, domain)
}

/// Check whether a line already carries the domain as a hostname token.
///
/// Token equality (not substring) so an existing `www.example.com` entry
/// does not suppress the bare `example.com` entry.
fn line_has_domain(line: &str, domain: &str) -> bool {
    line.split_whitespace().any(|token| token == domain)
}

/// Compute the reconciled hosts content for a domain pair.
///
/// Returns `None` when the content is already in the intended state, so the
/// caller can skip the privileged write entirely. The trailing-newline
/// presence of the original content is preserved, which makes add-then-remove
/// restore the file byte-for-byte.
pub fn reconcile(content: &str, pair: &DomainPair, action: HostsAction) -> Option<String> {
    let had_trailing_newline = content.ends_with('\n');
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    let changed = match action {
        HostsAction::Add => {
            let mut changed = false;
            // www form first, matching the order the original artifacts used
            for domain in [pair.with_www.as_str(), pair.without_www.as_str()] {
                if !lines.iter().any(|line| line_has_domain(line, domain)) {
                    lines.push(entry_line(domain));
                    changed = true;
                }
            }
            changed
        }
        HostsAction::Remove => {
            let before = lines.len();
            lines.retain(|line| {
                let trimmed = line.trim();
                !(trimmed.contains(&pair.with_www) || trimmed.contains(&pair.without_www))
            });
            lines.len() != before
        }
    };

    if !changed {
        return None;
    }

    let mut out = lines.join("\n");
    if had_trailing_newline && !out.is_empty() {
        out.push('\n');
    }
    Some(out)
}

/// The lines an operator has to add by hand when the privileged write fails
pub fn manual_add_lines(pair: &DomainPair) -> [String; 2] {
    [entry_line(&pair.with_www), entry_line(&pair.without_www)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> DomainPair {
        DomainPair::derive("smartseraina.ch")
    }

    #[test]
    fn test_add_to_empty_file_appends_both_entries() {
        let result = reconcile("", &pair(), HostsAction::Add).unwrap();
        assert_eq!(
            result,
            "127.0.0.1   www.smartseraina.ch\n127.0.0.1   smartseraina.ch"
        );
    }

    #[test]
    fn test_add_is_idempotent() {
        let once = reconcile("127.0.0.1   localhost\n", &pair(), HostsAction::Add).unwrap();
        assert!(reconcile(&once, &pair(), HostsAction::Add).is_none());
    }

    #[test]
    fn test_add_with_www_line_present_appends_only_bare_entry() {
        let content = "127.0.0.1   www.smartseraina.ch\n";
        let result = reconcile(content, &pair(), HostsAction::Add).unwrap();
        assert_eq!(
            result,
            "127.0.0.1   www.smartseraina.ch\n127.0.0.1   smartseraina.ch\n"
        );
    }

    #[test]
    fn test_add_with_both_lines_present_is_noop() {
        let content = "127.0.0.1   www.smartseraina.ch\n127.0.0.1   smartseraina.ch\n";
        assert!(reconcile(content, &pair(), HostsAction::Add).is_none());
    }

    #[test]
    fn test_remove_drops_all_matching_lines_keeps_order() {
        let content = "127.0.0.1   localhost\n\
                       127.0.0.1   www.smartseraina.ch\n\
                       ::1         localhost\n\
                       127.0.0.1   smartseraina.ch\n";
        let result = reconcile(content, &pair(), HostsAction::Remove).unwrap();
        assert_eq!(result, "127.0.0.1   localhost\n::1         localhost\n");
    }

    #[test]
    fn test_remove_drops_duplicates() {
        let content = "127.0.0.1   smartseraina.ch\n127.0.0.1   smartseraina.ch\n";
        let result = reconcile(content, &pair(), HostsAction::Remove).unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_remove_without_matches_is_noop() {
        let content = "127.0.0.1   localhost\n";
        assert!(reconcile(content, &pair(), HostsAction::Remove).is_none());
    }

    #[test]
    fn test_add_then_remove_round_trips() {
        for original in ["127.0.0.1   localhost\n", "127.0.0.1   localhost", ""] {
            let added = reconcile(original, &pair(), HostsAction::Add).unwrap();
            let removed = reconcile(&added, &pair(), HostsAction::Remove).unwrap();
            assert_eq!(removed, *original, "round trip failed for {:?}", original);
        }
    }

    #[test]
    fn test_remove_matches_substring_mentions() {
        // Remove is substring-based, so a commented-out entry goes too.
        let content = "# 127.0.0.1   smartseraina.ch\n127.0.0.1   localhost\n";
        let result = reconcile(content, &pair(), HostsAction::Remove).unwrap();
        assert_eq!(result, "127.0.0.1   localhost\n");
    }

    #[test]
    fn test_add_ignores_unrelated_substring_overlap() {
        // "smartseraina.ch.example" is not a token match for either form.
        let content = "127.0.0.1   smartseraina.ch.example\n";
        let result = reconcile(content, &pair(), HostsAction::Add).unwrap();
        assert_eq!(
            result,
            "127.0.0.1   smartseraina.ch.example\n\
             127.0.0.1   www.smartseraina.ch\n\
             127.0.0.1   smartseraina.ch\n"
        );
    }
}
