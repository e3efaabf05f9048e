//! Ordered target-column → expression mapping.

/// A projection: each target column and the expression that defines it.
///
/// Insertion order is the edge emission order of a lineage run.
/// Re-inserting a column replaces its expression in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    columns: Vec<(String, String)>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expression for a target column.
    /// Returns the previous expression if the column was already present.
    pub fn insert(
        &mut self,
        column: impl Into<String>,
        expression: impl Into<String>,
    ) -> Option<String> {
        let column = column.into();
        let expression = expression.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => Some(std::mem::replace(existing, expression)),
            None => {
                self.columns.push((column, expression));
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, column: impl Into<String>, expression: impl Into<String>) -> Self {
        self.insert(column, expression);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, expr)| expr.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> ProjectionIter<'_> {
        ProjectionIter(self.columns.iter())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Projection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut projection = Projection::new();
        for (column, expression) in iter {
            projection.insert(column, expression);
        }
        projection
    }
}

/// Iterator over `(column, expression)` pairs in insertion order.
#[derive(Debug, Clone)]
pub struct ProjectionIter<'a>(std::slice::Iter<'a, (String, String)>);

impl<'a> Iterator for ProjectionIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next()
            .map(|(column, expr)| (column.as_str(), expr.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> IntoIterator for &'a Projection {
    type Item = (&'a str, &'a str);
    type IntoIter = ProjectionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
