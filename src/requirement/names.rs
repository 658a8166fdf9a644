//! Splitting user supplied package name lists

use super::Requirement;

/// Partition package names into parseable requirements and rejects
///
/// Returns `(valid, invalid)`, both in input order.
pub fn convert_package_names<I, S>(names: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut results = Vec::new();
    let mut errors = Vec::new();

    for name in names {
        let name = name.as_ref();
        if Requirement::parse(name).is_ok() {
            results.push(name.to_string());
        } else {
            errors.push(name.to_string());
        }
    }

    (results, errors)
}

/// Same as [`convert_package_names`] over a whitespace separated string
pub fn split_package_names(text: &str) -> (Vec<String>, Vec<String>) {
    convert_package_names(text.split_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_string() {
        let (result, error) = split_package_names("setuptools calmjs");
        assert_eq!(result, ["setuptools", "calmjs"]);
        assert!(error.is_empty());
    }

    #[test]
    fn test_split_string_with_detached_extras() {
        let (result, error) = split_package_names("calmjs [dev]");
        assert_eq!(result, ["calmjs"]);
        assert_eq!(error, ["[dev]"]);

        let (result, error) = split_package_names("calmjs[dev]");
        assert_eq!(result, ["calmjs[dev]"]);
        assert!(error.is_empty());
    }

    #[test]
    fn test_list_keeps_spaced_requirements_whole() {
        let (result, error) = convert_package_names(["setuptools", "[dev]", "calmjs [dev]"]);
        assert_eq!(result, ["setuptools", "calmjs [dev]"]);
        assert_eq!(error, ["[dev]"]);
    }
}
