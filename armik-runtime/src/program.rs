use std::{collections::VecDeque, path::Path};

use crate::core::Target;

/// Queue of targets loaded from a JSON file.
///
/// The file holds an array of `[x, y, z]` triples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program(VecDeque<Target>);

impl Program {
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let str = std::fs::read_to_string(path)?;

        Self::parse(&str)
    }

    pub fn parse(str: &str) -> std::io::Result<Self> {
        let targets: VecDeque<Target> = serde_json::from_str::<Vec<[f64; 3]>>(str)?
            .iter()
            .map(|v| v.into())
            .collect();

        Ok(Self(targets))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn next(&mut self) -> Option<Target> {
        self.0.pop_front()
    }
}

impl FromIterator<Target> for Program {
    fn from_iter<T: IntoIterator<Item = Target>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Program {
    type Item = Target;
    type IntoIter = std::collections::vec_deque::IntoIter<Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
