// Dump threshold policy.
//
// A policy sees the corpus totals and one candidate and decides whether the
// candidate is worth writing to the dumped dictionary. Redundant prefixes
// are filtered before the policy is asked.

use super::meta::Meta;

/// `(total_docs, total_freq, candidate) -> keep?`
pub type ThresholdFn = dyn Fn(u64, u64, &Meta) -> bool;

/// Keep every non-redundant entry.
pub fn accept_all(_total_docs: u64, _total_freq: u64, _meta: &Meta) -> bool {
    true
}

/// The default policy.
///
/// Rejects phrases that dominate the corpus (more than 10% of all
/// occurrences). Keeps phrases that appear in at most 10% of documents, two
/// to ten times per document, and are not one-offs; or very rare phrases that
/// repeat within their documents and were a single token to begin with.
pub fn default_threshold(total_docs: u64, total_freq: u64, meta: &Meta) -> bool {
    if total_docs < 1 {
        return false;
    }

    let (big_d, big_f) = (total_docs as f64, total_freq as f64);
    let (d, f) = (meta.docs as f64, meta.freq as f64);

    if f / big_f > 1e-1 {
        return false;
    }

    let idf = d / big_d;
    let fr = f / d;

    if idf <= 1e-1 && fr > 2.0 && fr < 10.0 && (d > 2.0 || f > 15.0) {
        return true;
    }

    if idf < 1e-3 && fr > 1.0 && d > 2.0 && meta.token_count() < 2 {
        return true;
    }

    false
}
