//! Shared assertions for comparing result sets.

/// Asserts that two result sets hold the same (query, index, distance)
/// triples, with distances equal to within `tolerance`.
pub fn check_results(truth: &[Vec<(usize, f64)>], pred: &[Vec<(usize, f64)>], tolerance: f64, name: &str) {
    assert_eq!(truth.len(), pred.len(), "{name}: result sets differ in query count");

    for (qi, (t_row, p_row)) in truth.iter().zip(pred.iter()).enumerate() {
        let mut t_row = t_row.clone();
        let mut p_row = p_row.clone();
        t_row.sort_by_key(|&(i, _)| i);
        p_row.sort_by_key(|&(i, _)| i);

        let t_indices = t_row.iter().map(|&(i, _)| i).collect::<Vec<_>>();
        let p_indices = p_row.iter().map(|&(i, _)| i).collect::<Vec<_>>();
        assert_eq!(t_indices, p_indices, "{name}: indices differ for query {qi}");

        for (&(i, t_d), &(_, p_d)) in t_row.iter().zip(p_row.iter()) {
            assert!(
                (t_d - p_d).abs() <= tolerance,
                "{name}: distance to {i} differs for query {qi}: {t_d} vs {p_d}"
            );
        }
    }
}

/// Asserts that results arrive sorted by increasing reference index.
pub fn check_sorted(results: &[Vec<(usize, f64)>], name: &str) {
    for (qi, row) in results.iter().enumerate() {
        let indices = row.iter().map(|&(i, _)| i).collect::<Vec<_>>();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted, "{name}: query {qi} results are not sorted by index");
    }
}
