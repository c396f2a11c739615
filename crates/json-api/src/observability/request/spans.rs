//! HTTP span helpers.

/// Route label for a request with numeric path segments collapsed, e.g. `GET /product/{id}`.
pub(super) fn request_span_name(method: &str, path: &str) -> String {
    format!("{method} {}", normalise_path(path))
}

fn normalise_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
            normalised.push_str("{id}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_segments_are_collapsed() {
        assert_eq!(
            request_span_name("GET", "/tags/product/42"),
            "GET /tags/product/{id}"
        );
    }

    #[test]
    fn root_is_kept() {
        assert_eq!(request_span_name("GET", "/"), "GET /");
    }

    #[test]
    fn named_segments_are_kept() {
        assert_eq!(
            request_span_name("POST", "/admin/products/clear-inventory"),
            "POST /admin/products/clear-inventory"
        );
    }
}
