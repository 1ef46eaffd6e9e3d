//! Directed links between station records.

use std::fmt;

use super::station::{Line, StationKey};

/// The kind of a link between two station records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkKind {
    /// Adjacent stations on the same line.
    Train,
    /// Same physical stop, different line. Zero travel distance.
    Transfer,
    /// Different stops close enough to walk between.
    Walk,
}

impl LinkKind {
    /// All link kinds.
    pub const ALL: [LinkKind; 3] = [LinkKind::Train, LinkKind::Transfer, LinkKind::Walk];

    /// Relationship type name used in the graph store.
    ///
    /// These are the only strings ever interpolated into a query.
    pub fn relationship_type(&self) -> &'static str {
        match self {
            LinkKind::Train => "TRAIN_LINK",
            LinkKind::Transfer => "TRANSFER",
            LinkKind::Walk => "WALK",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.relationship_type())
    }
}

/// A directed edge between two station records.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub from: StationKey,
    pub to: StationKey,
    pub kind: LinkKind,
    /// Line tag, set for train links only.
    pub line: Option<Line>,
}

impl Link {
    /// A train link along `line`.
    pub fn train(from: StationKey, to: StationKey, line: Line) -> Self {
        Self {
            from,
            to,
            kind: LinkKind::Train,
            line: Some(line),
        }
    }

    /// A transfer between two lines at the same stop.
    pub fn transfer(from: StationKey, to: StationKey) -> Self {
        Self {
            from,
            to,
            kind: LinkKind::Transfer,
            line: None,
        }
    }

    /// A walking link between two nearby stops.
    pub fn walk(from: StationKey, to: StationKey) -> Self {
        Self {
            from,
            to,
            kind: LinkKind::Walk,
            line: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationName;

    fn key(name: &str, line: &str) -> StationKey {
        StationKey::new(
            StationName::normalize(name).unwrap(),
            Line::parse(line).unwrap(),
        )
    }

    #[test]
    fn relationship_types_are_distinct() {
        let mut names: Vec<_> = LinkKind::ALL.iter().map(|k| k.relationship_type()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn constructors_set_kind_and_line() {
        let a = key("A", "1");
        let b = key("B", "1");

        let train = Link::train(a.clone(), b.clone(), Line::parse("1").unwrap());
        assert_eq!(train.kind, LinkKind::Train);
        assert_eq!(train.line.as_ref().map(Line::as_str), Some("1"));

        let walk = Link::walk(a.clone(), b);
        assert_eq!(walk.kind, LinkKind::Walk);
        assert!(walk.line.is_none());

        let transfer = Link::transfer(a, key("A", "2"));
        assert_eq!(transfer.kind, LinkKind::Transfer);
        assert_eq!(transfer.kind.to_string(), "TRANSFER");
    }
}
