use std::io;

use thiserror::Error;

/// Outcome of a page handler that did not produce a page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Post not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PageError {
    pub fn status(&self) -> u16 {
        match self {
            PageError::NotFound(_) => 404,
            PageError::Io(_) | PageError::Other(_) => 500,
        }
    }

    /// Text sent to the client. Internal details stay in the log.
    pub fn public_message(&self) -> &'static str {
        match self {
            PageError::NotFound(_) => "Post not found",
            PageError::Io(_) | PageError::Other(_) => "Error rendering page",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(PageError::NotFound("x".to_string()).status(), 404);
        assert_eq!(PageError::from(io::Error::new(io::ErrorKind::Other, "disk")).status(), 500);
        assert_eq!(PageError::from(anyhow::anyhow!("template")).status(), 500);
    }

    #[test]
    fn test_display_keeps_context() {
        let err = anyhow::anyhow!("root cause").context("Error loading post a.md");
        let err = PageError::from(err);
        assert_eq!(err.to_string(), "Error loading post a.md");
        assert_eq!(format!("{:#}", err), "Error loading post a.md: root cause");
    }
}
