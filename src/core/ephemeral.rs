//! Groups that exist only transiently and are never listed.

use std::collections::HashSet;

/// Immutable set of ephemeral group names.
///
/// Built once when the service is constructed and shared by reference across
/// all concurrent requests afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EphemeralGroups {
    names: HashSet<String>,
}

impl EphemeralGroups {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, group_name: &str) -> bool {
        self.names.contains(group_name)
    }
}

#[cfg(test)]
mod tests {
    use super::EphemeralGroups;

    #[test]
    fn membership() {
        let ephemeral = EphemeralGroups::new(["guests", "spiders"]);
        assert!(ephemeral.contains("guests"));
        assert!(ephemeral.contains("spiders"));
        assert!(!ephemeral.contains("registered-users"));
        assert!(!EphemeralGroups::default().contains("guests"));
    }
}
