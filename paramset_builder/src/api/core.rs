use crate::api::{HelpParameter, Parameter, ParameterDefinition};
use crate::parser::ParameterSet;

/// Assembles a [`ParameterSet`].
///
/// ### Example
/// ```
/// # use paramset_builder as paramset;
/// use paramset::ParameterSet;
///
/// let set = ParameterSet::builder()
///     // Configure with ParameterSetBuilder::add and ParameterSetBuilder::help.
///     .build();
/// let tokens: &[&str] = &[];
/// set.parse(tokens, 0, &mut std::io::sink()).unwrap();
/// ```
pub struct ParameterSetBuilder<'a> {
    definitions: Vec<ParameterDefinition<'a>>,
    help: Option<HelpParameter>,
}

impl<'a> Default for ParameterSetBuilder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ParameterSetBuilder<'a> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            definitions: Vec::default(),
            help: None,
        }
    }

    /// Add a parameter to the set.
    ///
    /// When two parameters share a name or alias, the one added last answers to it.
    ///
    /// ### Example
    /// ```
    /// # use paramset_builder as paramset;
    /// use paramset::{Parameter, ParameterSet, Scalar};
    ///
    /// let mut a: i64 = 0;
    /// let mut b: String = String::default();
    /// let set = ParameterSet::builder()
    ///     .add(Parameter::new(Scalar::new(&mut a), "-a"))
    ///     .add(Parameter::new(Scalar::new(&mut b), "-b"))
    ///     .build();
    ///
    /// set.parse(&["-b", "two", "-a", "1"], 0, &mut std::io::sink()).unwrap();
    /// drop(set);
    ///
    /// assert_eq!(a, 1);
    /// assert_eq!(b, "two");
    /// ```
    pub fn add<T: Clone + 'a>(self, parameter: Parameter<'a, T>) -> Self {
        self.add_definition(parameter.build())
    }

    /// Add an already built parameter to the set.
    pub fn add_definition(mut self, definition: ParameterDefinition<'a>) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Synthesize a help parameter for the set.
    /// If repeated, only the final help parameter will apply.
    pub fn help(mut self, help: HelpParameter) -> Self {
        self.help.replace(help);
        self
    }

    /// Build the parameter set.
    pub fn build(self) -> ParameterSet<'a> {
        match self.help {
            Some(help) => ParameterSet::with_help(self.definitions, help),
            None => ParameterSet::new(self.definitions),
        }
    }
}
