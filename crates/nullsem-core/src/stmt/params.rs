use super::{ExprParam, Input, Value};
use indexmap::IndexMap;

/// Runtime values of the parameters referenced by a predicate.
///
/// Supplied once per compilation and read-only while the predicate is
/// rewritten. An empty table means no parameter values are known yet.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    values: IndexMap<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl Input for &Params {
    fn resolve_param(&mut self, expr_param: &ExprParam) -> Option<Value> {
        self.get(&expr_param.name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_binding_replaces_earlier() {
        let params = Params::new().bind("a", true).bind("a", Value::Null);

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("a"), Some(&Value::Null));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let params: Params = [("b", 1i64), ("a", 2i64)].into_iter().collect();

        let names = params.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn missing_binding_is_none() {
        let params = Params::new().bind("a", true);
        assert!(params.get("b").is_none());
        assert!(!params.is_empty());
        assert!(Params::new().is_empty());
    }
}
