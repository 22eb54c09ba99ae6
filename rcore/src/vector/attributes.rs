// Attribute carrier attached to dense vectors

/// Attributes a vector may carry alongside its elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes {
    pub names: Option<Vec<Option<String>>>,
    pub dim: Option<Vec<usize>>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.names = Some(names.into_iter().map(|n| n.map(Into::into)).collect());
        self
    }

    pub fn with_dim(mut self, dim: Vec<usize>) -> Self {
        self.dim = Some(dim);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_none() && self.dim.is_none()
    }

    pub fn name_at(&self, i: usize) -> Option<&str> {
        self.names
            .as_ref()
            .and_then(|names| names.get(i))
            .and_then(|n| n.as_deref())
    }
}
