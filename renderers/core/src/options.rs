//! Backend rendering options.

/// Rendering hints consumed by backends.
///
/// The converter core treats these as opaque; only the backends read
/// them. Use [`Options::builder()`] to construct an instance.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Options {
    width: usize,
    title: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: 80,
            title: None,
        }
    }
}

impl Options {
    /// Create a new builder with default values.
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Get the page width in display columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the document title, if one was configured.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Builder for [`Options`].
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    width: usize,
    title: Option<String>,
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self {
            width: 80,
            title: None,
        }
    }
}

impl OptionsBuilder {
    /// Set the page width in display columns.
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the document title.
    #[must_use]
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build the [`Options`] instance.
    #[must_use]
    pub fn build(self) -> Options {
        Options {
            width: self.width,
            title: self.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.width(), 80);
        assert_eq!(options.title(), None);
    }

    #[test]
    fn test_builder() {
        let options = Options::builder().width(66).title("GCLOUD(1)").build();
        assert_eq!(options.width(), 66);
        assert_eq!(options.title(), Some("GCLOUD(1)"));
    }
}
