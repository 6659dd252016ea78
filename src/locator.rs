//! Resource locators.
//!
//! TeamCity addresses resources in URL paths through locators. Every id that
//! narrows a service's path goes through [`locator_id`].

const ID_DIMENSION: &str = "id:";

/// Canonical `id:<value>` locator for a project or build configuration id.
///
/// Characters that would break a path segment are percent-encoded. Input that
/// already carries the `id:` dimension is treated as a locator: its value is
/// decoded and encoded again, so applying the function twice gives the same
/// locator and a raw `/` never reaches the path.
pub fn locator_id(id: &str) -> String {
    let value = match id.strip_prefix(ID_DIMENSION) {
        Some(rest) => urlencoding::decode(rest)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| rest.to_string()),
        None => id.to_string(),
    };
    format!("{ID_DIMENSION}{}", urlencoding::encode(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_id() {
        assert_eq!(locator_id("MyProject_Build"), "id:MyProject_Build");
    }

    #[test]
    fn test_idempotent() {
        let once = locator_id("proj1");
        assert_eq!(locator_id(&once), once);
    }

    #[test]
    fn test_idempotent_with_encoded_characters() {
        let once = locator_id("a/b c");
        assert_eq!(locator_id(&once), once);
    }

    #[test]
    fn test_prefixed_input_still_encoded() {
        assert_eq!(locator_id("id:a/b"), "id:a%2Fb");
        assert_eq!(locator_id("id:a/b"), locator_id("a/b"));
    }

    #[test]
    fn test_path_characters_encoded() {
        assert_eq!(locator_id("a/b c"), "id:a%2Fb%20c");
    }

    #[test]
    fn test_distinct_ids_distinct_locators() {
        assert_ne!(locator_id("proj1"), locator_id("proj2"));
        assert_ne!(locator_id("a/b"), locator_id("a%2Fb"));
    }
}
