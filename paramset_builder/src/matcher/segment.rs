use crate::matcher::{ParameterId, Registry};

/// The tokens of one parameter occurrence: its name token, followed by its value tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    /// The parameter named by the first token.
    pub id: ParameterId,
    /// The index of the name token.
    pub start: usize,
    /// The number of tokens, including the name token (so at least 1).
    pub len: usize,
}

/// Partitions a token array into [`Slice`]s, by locating the tokens that name a registered parameter.
///
/// Tokens before the first name token are skipped.
/// Each slice runs from its name token up to (but excluding) the next name token, or to the end of the tokens.
///
/// ### Example
/// ```
/// # use paramset_builder as paramset;
/// use paramset::{Parameter, Registry, Scalar, Segmenter};
///
/// let registry = Registry::build(vec![
///     Parameter::new(Scalar::with(|_: i64| {}), "-loops").build(),
///     Parameter::new(Scalar::with(|_: bool| {}), "-regex").build(),
/// ]);
/// let tokens = ["stray", "-loops", "3", "-regex"];
/// let slices: Vec<(usize, usize)> = Segmenter::new(&registry, &tokens, 0)
///     .map(|slice| (slice.start, slice.len))
///     .collect();
/// assert_eq!(slices, vec![(1, 2), (3, 1)]);
/// ```
pub struct Segmenter<'r, 'a, S> {
    registry: &'r Registry<'a>,
    tokens: &'r [S],
    position: usize,
    pending: Option<(ParameterId, usize)>,
}

impl<'r, 'a, S: AsRef<str>> Segmenter<'r, 'a, S> {
    /// Segment `tokens`, starting from `offset`.
    pub fn new(registry: &'r Registry<'a>, tokens: &'r [S], offset: usize) -> Self {
        Self {
            registry,
            tokens,
            position: offset,
            pending: None,
        }
    }

    fn find_name(&self, from: usize) -> Option<(ParameterId, usize)> {
        self.tokens
            .get(from..)?
            .iter()
            .enumerate()
            .find_map(|(i, token)| {
                self.registry
                    .id_of(token.as_ref())
                    .map(|id| (id, from + i))
            })
    }
}

impl<'r, 'a, S: AsRef<str>> Iterator for Segmenter<'r, 'a, S> {
    type Item = Slice;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, start) = match self.pending.take() {
            Some(pending) => pending,
            None => self.find_name(self.position)?,
        };

        let end = match self.find_name(start + 1) {
            Some((next_id, next_start)) => {
                self.pending.replace((next_id, next_start));
                next_start
            }
            None => self.tokens.len(),
        };
        self.position = end;

        Some(Slice {
            id,
            start,
            len: end - start,
        })
    }
}

/// Whether each parameter of a [`Registry`] was parsed successfully, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionMap {
    entries: Vec<(String, bool)>,
}

impl CompletionMap {
    /// Create the map, with every parameter incomplete.
    pub fn new(registry: &Registry) -> Self {
        Self {
            entries: registry
                .iter()
                .map(|(_, definition)| (definition.name().to_string(), false))
                .collect(),
        }
    }

    pub(crate) fn complete(&mut self, id: ParameterId) {
        if let Some((_, complete)) = self.entries.get_mut(id.0) {
            *complete = true;
        }
    }

    /// Whether the parameter identified by `id` is complete.
    pub fn get(&self, id: ParameterId) -> Option<bool> {
        self.entries.get(id.0).map(|(_, complete)| *complete)
    }

    /// Whether the parameter with the primary name `name` is complete.
    ///
    /// When several parameters share the primary name, the last registered answers.
    pub fn is_complete(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .rev()
            .find(|(entry, _)| entry == name)
            .map(|(_, complete)| *complete)
    }

    /// Every parameter's completion, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ParameterId, &str, bool)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, (name, complete))| (ParameterId(index), name.as_str(), *complete))
    }

    /// Whether every parameter is complete.
    pub fn all_complete(&self) -> bool {
        self.entries.iter().all(|(_, complete)| *complete)
    }
}
