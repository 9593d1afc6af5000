//! API Response types
//!
//! The backend answers with bare records on success. Errors, deletes and
//! status patches carry a small `{ success?, message? }` acknowledgement.

use serde::{Deserialize, Serialize};

/// Acknowledgement / error body
///
/// ```json
/// { "success": false, "message": "Client non trouvé" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    /// Explicit `success: false` in an otherwise successful HTTP response
    pub fn is_rejection(&self) -> bool {
        self.success == Some(false)
    }

    /// Server message, if any non-blank one was sent
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page as u64) as u32
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_pages() {
        let p = Pagination::new(1, 10, 21);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next());
        assert!(!p.has_previous());
        assert_eq!(Pagination::new(1, 0, 5).total_pages, 0);
    }

    #[test]
    fn test_message_response_blank_message() {
        let body: MessageResponse = serde_json::from_str(r#"{"success":false,"message":"  "}"#).unwrap();
        assert!(body.is_rejection());
        assert_eq!(body.message(), None);
    }
}
