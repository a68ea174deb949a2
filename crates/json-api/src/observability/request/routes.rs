//! Route templates for span names and metric labels.

use uuid::Uuid;

/// `/orders/0190.../` -> `/orders/{id}`, keeping label cardinality bounded.
pub(super) fn template(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_replaced() {
        let path = format!("/categories/{}/average-price/", Uuid::now_v7());

        assert_eq!(template(&path), "/categories/{id}/average-price");
    }

    #[test]
    fn root_stays_root() {
        assert_eq!(template("/"), "/");
        assert_eq!(template(""), "/");
    }

    #[test]
    fn static_paths_are_untouched() {
        assert_eq!(template("/products/bulk-upload"), "/products/bulk-upload");
    }
}
