//! Degree-sequence validation.
//!
//! A sequence of non-negative integers is *graphical* if some simple undirected graph
//! realizes it as its degree sequence. Two classic tests are provided, selected by
//! [`DegreeSequenceMethod`].

use strum::{Display, EnumIter, EnumString};

use crate::Result;

/// Test used by [`is_valid_degree_sequence`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum DegreeSequenceMethod {
    /// Havel–Hakimi: repeatedly connect the highest-degree node to the next highest ones.
    #[default]
    #[strum(serialize = "hh")]
    HavelHakimi,
    /// Erdős–Gallai: check the inequality at every distinct-degree breakpoint.
    #[strum(serialize = "eg")]
    ErdosGallai,
}

impl DegreeSequenceMethod {
    /// Parses the keyword form, `"hh"` or `"eg"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) for any other
    /// keyword.
    pub fn from_keyword(keyword: &str) -> Result<Self> {
        keyword
            .parse()
            .map_err(|_| invalid_argument!("method must be 'eg' or 'hh', got '{}'", keyword))
    }
}

/// Rejects negative entries, entries no simple graph on `sequence.len()` nodes can
/// reach, and odd sums.
///
/// Bounding every entry by the node count first keeps the sums below within `i64`.
fn trivially_rejected(sequence: &[i64]) -> bool {
    let n = sequence.len() as i64;
    if sequence.iter().any(|&d| d < 0 || d >= n) {
        return true;
    }
    sequence.iter().sum::<i64>() % 2 != 0
}

/// Returns `true` if `sequence` is realizable by a simple undirected graph.
///
/// The empty sequence is valid (the null graph). Negative entries, entries of at least
/// `sequence.len()`, or an odd sum are rejected before either test runs.
///
/// # Examples
///
/// ```rust
/// use netgraph::algorithms::graphical::{is_valid_degree_sequence, DegreeSequenceMethod};
///
/// assert!(is_valid_degree_sequence(&[3, 3, 3, 3], DegreeSequenceMethod::HavelHakimi));
/// assert!(!is_valid_degree_sequence(&[3, 3, 1, 1], DegreeSequenceMethod::ErdosGallai));
/// ```
#[must_use]
pub fn is_valid_degree_sequence(sequence: &[i64], method: DegreeSequenceMethod) -> bool {
    match method {
        DegreeSequenceMethod::HavelHakimi => is_valid_degree_sequence_havel_hakimi(sequence),
        DegreeSequenceMethod::ErdosGallai => is_valid_degree_sequence_erdos_gallai(sequence),
    }
}

/// Havel–Hakimi test, `O(n² log n)`.
#[must_use]
pub fn is_valid_degree_sequence_havel_hakimi(sequence: &[i64]) -> bool {
    if sequence.is_empty() {
        return true;
    }
    if trivially_rejected(sequence) {
        return false;
    }

    let mut remaining = sequence.to_vec();
    loop {
        remaining.sort_unstable();
        if remaining.first().is_some_and(|&d| d < 0) {
            return false;
        }
        let Some(d) = remaining.pop() else {
            return true;
        };
        if d == 0 {
            return true;
        }
        let d = d as usize;
        if d > remaining.len() {
            return false;
        }
        let len = remaining.len();
        for degree in &mut remaining[len - d..] {
            *degree -= 1;
        }
    }
}

/// Erdős–Gallai test, `O(n²)`.
///
/// The inequality is checked at each index where the non-increasing sequence strictly
/// drops, and at the end of the sequence.
#[must_use]
pub fn is_valid_degree_sequence_erdos_gallai(sequence: &[i64]) -> bool {
    if sequence.is_empty() {
        return true;
    }
    if trivially_rejected(sequence) {
        return false;
    }

    let mut degrees = sequence.to_vec();
    degrees.sort_unstable_by(|a, b| b.cmp(a));
    let n = degrees.len();

    let breakpoints = (1..n)
        .filter(|&k| degrees[k] < degrees[k - 1])
        .chain(std::iter::once(n));

    for k in breakpoints {
        let lhs: i64 = degrees[..k].iter().sum();
        let k_i = k as i64;
        let rhs = k_i * (k_i - 1) + degrees[k..].iter().map(|&d| d.min(k_i)).sum::<i64>();
        if lhs > rhs {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::Error;

    fn both(sequence: &[i64]) -> bool {
        let results: Vec<bool> = DegreeSequenceMethod::iter()
            .map(|method| is_valid_degree_sequence(sequence, method))
            .collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]), "methods disagree on {sequence:?}");
        results[0]
    }

    #[test]
    fn test_valid_sequences() {
        assert!(both(&[]));
        assert!(both(&[0, 0, 0]));
        assert!(both(&[1, 1]));
        assert!(both(&[2, 2, 2]));
        assert!(both(&[3, 3, 3, 3]));
        assert!(both(&[3, 3, 2, 2, 2]));
        assert!(both(&[4, 3, 3, 2, 2, 2, 1, 1]));
    }

    #[test]
    fn test_invalid_sequences() {
        assert!(!both(&[1]));
        assert!(!both(&[-1, 1]));
        assert!(!both(&[3, 3, 1, 1]));
        assert!(!both(&[2, 2]));
        assert!(!both(&[5, 5]));
        assert!(!both(&[4, 4, 4, 1, 1]));
    }

    #[test]
    fn test_huge_degrees_are_rejected() {
        let sequence = [i64::MAX, i64::MAX, 2];
        assert!(!is_valid_degree_sequence_havel_hakimi(&sequence));
        assert!(!is_valid_degree_sequence_erdos_gallai(&sequence));
        assert!(!both(&[i64::MAX, i64::MIN]));
        assert!(!both(&[3, 1, 1]));
        assert!(both(&[3, 1, 1, 1]));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            DegreeSequenceMethod::from_keyword("hh").unwrap(),
            DegreeSequenceMethod::HavelHakimi
        );
        assert_eq!(
            DegreeSequenceMethod::from_keyword("eg").unwrap(),
            DegreeSequenceMethod::ErdosGallai
        );
        assert_eq!(DegreeSequenceMethod::default(), DegreeSequenceMethod::HavelHakimi);
        assert_eq!(DegreeSequenceMethod::ErdosGallai.to_string(), "eg");
        assert!(matches!(
            DegreeSequenceMethod::from_keyword("xx"),
            Err(Error::InvalidArgument(_))
        ));
    }
}
