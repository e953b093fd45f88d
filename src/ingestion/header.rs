//! Column naming shared by the CSV and spreadsheet loaders.

use std::collections::HashSet;

/// Positional column names `0`, `1`, `2`, ... for input without a header row.
pub fn positional_names(width: usize) -> Vec<String> {
    (0..width).map(|i| i.to_string()).collect()
}

/// Turn raw header cells into unique column names.
///
/// - Names are kept verbatim, surrounding whitespace included.
/// - A blank (empty or whitespace-only) cell becomes `Unnamed: {index}`.
/// - A repeated name gets the first free `.{n}` suffix (`id`, `id.1`, `id.2`).
pub fn unique_names<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let raw: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let name = name.as_ref();
            if name.trim().is_empty() {
                format!("Unnamed: {idx}")
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut used: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut out = Vec::with_capacity(raw.len());
    for name in raw {
        let mut candidate = name.clone();
        let mut n = 1usize;
        while used.contains(&candidate) {
            candidate = format!("{name}.{n}");
            n += 1;
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{positional_names, unique_names};

    #[test]
    fn positional_names_count_from_zero() {
        assert_eq!(positional_names(3), vec!["0", "1", "2"]);
        assert!(positional_names(0).is_empty());
    }

    #[test]
    fn blank_and_repeated_names_are_made_unique() {
        let names = unique_names(["id", "", "id", "  ", "id"]);
        assert_eq!(names, vec!["id", "Unnamed: 1", "id.1", "Unnamed: 3", "id.2"]);
    }

    #[test]
    fn surrounding_whitespace_is_kept() {
        let names = unique_names([" MemberNo ", "MemberNo", " MemberNo "]);
        assert_eq!(names, vec![" MemberNo ", "MemberNo", " MemberNo .1"]);
    }

    #[test]
    fn suffix_skips_names_already_taken() {
        let names = unique_names(["a", "a.1", "a"]);
        assert_eq!(names, vec!["a", "a.1", "a.2"]);
    }
}
