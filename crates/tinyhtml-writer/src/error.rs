//! Render error types.

use std::path::PathBuf;

/// Error that aborts a render.
///
/// A failed render produces no output at all.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A stylesheet marked for embedding could not be read.
    #[error("cannot embed stylesheet {}", .path.display())]
    Stylesheet {
        /// Path given in the settings.
        path: PathBuf,
        /// Underlying read error.
        #[source]
        source: std::io::Error,
    },

    /// A substitution reference survived the transforms that should have
    /// replaced it.
    #[error("unresolved substitution reference |{refname}| at {location}")]
    UnresolvedSubstitution {
        /// Substitution name (`refname` property), empty if absent.
        refname: String,
        /// Slash-joined node kinds from the root to the offending node.
        location: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_error_message() {
        let err = RenderError::Stylesheet {
            path: PathBuf::from("missing.css"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "cannot embed stylesheet missing.css");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_substitution_error_message() {
        let err = RenderError::UnresolvedSubstitution {
            refname: "logo".to_owned(),
            location: "document/paragraph/substitution_reference".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "unresolved substitution reference |logo| at document/paragraph/substitution_reference"
        );
    }
}
