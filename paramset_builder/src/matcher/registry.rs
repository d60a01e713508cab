use std::collections::HashMap;

use crate::api::ParameterDefinition;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Identifies a parameter by its registration order within one [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterId(pub(crate) usize);

impl ParameterId {
    /// The registration index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// An immutable lookup from every name and alias to its parameter.
///
/// Names are registered in order: each definition's primary name, then its aliases.
/// When a name is registered twice, the later registration answers to it.
#[derive(Debug)]
pub struct Registry<'a> {
    definitions: Vec<ParameterDefinition<'a>>,
    names: HashMap<String, ParameterId>,
}

impl<'a> Registry<'a> {
    /// Build the registry.
    pub fn build(definitions: Vec<ParameterDefinition<'a>>) -> Self {
        let mut names = HashMap::default();

        for (index, definition) in definitions.iter().enumerate() {
            for name in definition.names() {
                let _previous = names.insert(name.to_string(), ParameterId(index));

                #[cfg(feature = "tracing_debug")]
                {
                    if let Some(previous) = _previous {
                        debug!("Name '{name}' moves from parameter #{} to #{index}.", previous.0);
                    }
                }
            }
        }

        Self { definitions, names }
    }

    /// The parameter answering to `name`.
    pub fn lookup(&self, name: &str) -> Option<&ParameterDefinition<'a>> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// The id of the parameter answering to `name`.
    pub fn id_of(&self, name: &str) -> Option<ParameterId> {
        self.names.get(name).copied()
    }

    /// The parameter identified by `id`, if `id` was issued by this registry.
    pub fn get(&self, id: ParameterId) -> Option<&ParameterDefinition<'a>> {
        self.definitions.get(id.0)
    }

    /// Every parameter, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ParameterId, &ParameterDefinition<'a>)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| (ParameterId(index), definition))
    }

    /// The number of parameters.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Parameter, Scalar};
    use crate::model::ParameterKind;
    use rstest::rstest;

    fn definitions<'a>() -> Vec<ParameterDefinition<'a>> {
        vec![
            Parameter::new(Scalar::with(|_: i64| {}), "-loopCount")
                .alias("-loops")
                .alias("-loop-count")
                .build(),
            Parameter::new(Scalar::with(|_: bool| {}), "-regex").build(),
            Parameter::new(Scalar::with(|_: String| {}), "-name")
                .alias("-n")
                .build(),
        ]
    }

    #[rstest]
    #[case("-loopCount", Some(0))]
    #[case("-loops", Some(0))]
    #[case("-loop-count", Some(0))]
    #[case("-regex", Some(1))]
    #[case("-name", Some(2))]
    #[case("-n", Some(2))]
    #[case("-N", None)]
    #[case("loops", None)]
    #[case("", None)]
    fn lookup(#[case] name: &str, #[case] expected: Option<usize>) {
        // Setup
        let registry = Registry::build(definitions());

        // Execute
        let id = registry.id_of(name);

        // Verify
        assert_eq!(id.map(|id| id.index()), expected);
        assert_eq!(registry.lookup(name).is_some(), expected.is_some());
        if let Some(id) = id {
            assert!(registry.get(id).unwrap().answers_to(name));
        }
    }

    #[test]
    fn iter_registration_order() {
        // Setup
        let registry = Registry::build(definitions());

        // Execute
        let names: Vec<(usize, &str)> = registry
            .iter()
            .map(|(id, definition)| (id.index(), definition.name()))
            .collect();

        // Verify
        assert_eq!(names, vec![(0, "-loopCount"), (1, "-regex"), (2, "-name")]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn last_registration_wins() {
        // Setup
        let mut definitions = definitions();
        definitions.push(
            Parameter::new(Scalar::with(|_: f64| {}), "-ratio")
                .alias("-n")
                .build(),
        );

        // Execute
        let registry = Registry::build(definitions);

        // Verify
        assert_eq!(registry.lookup("-n").unwrap().name(), "-ratio");
        assert_eq!(registry.lookup("-n").unwrap().kind(), ParameterKind::Float);
        assert_eq!(registry.lookup("-name").unwrap().kind(), ParameterKind::Text);
    }

    #[test]
    fn get_foreign_id() {
        // Setup
        let registry = Registry::build(definitions());
        let larger = Registry::build(
            definitions()
                .into_iter()
                .chain(definitions())
                .collect(),
        );
        let foreign = larger.id_of("-n").unwrap();

        // Execute
        let definition = registry.get(foreign);

        // Verify
        assert_eq!(foreign.index(), 5);
        assert_matches!(definition, None);
        assert_eq!(registry.get(ParameterId(2)).map(|d| d.name()), Some("-name"));
    }

    #[test]
    fn build_empty() {
        let registry = Registry::build(Vec::default());
        assert!(registry.is_empty());
        assert_eq!(registry.lookup("-loops").map(|d| d.name()), None);
    }
}
