//! Lattice trait and the variable-set lattice.
//!
//! A lattice defines how abstract values combine when control flow paths
//! meet. Every analysis value type implements [`MeetSemiLattice`]; the
//! solver only ever needs the meet operation plus value equality for its
//! fixpoint test.
//!
//! The meet for a *may* analysis (reaching definitions, live variables) is
//! set union; the meet for a *must* analysis (available expressions) is set
//! intersection. Constant propagation uses a per-key three-valued join.

use std::collections::BTreeSet;
use std::fmt::{self, Debug};

/// A meet semi-lattice with a meet (greatest lower bound) operation.
///
/// The meet operation combines information from multiple control flow paths.
/// It must satisfy:
///
/// - **Idempotent**: `x.meet(x) = x`
/// - **Commutative**: `x.meet(y) = y.meet(x)`
/// - **Associative**: `x.meet(y.meet(z)) = (x.meet(y)).meet(z)`
pub trait MeetSemiLattice: Clone + Debug + PartialEq {
    /// Computes the meet (greatest lower bound) of two lattice elements.
    ///
    /// The meet represents combining information from two paths that merge.
    #[must_use]
    fn meet(&self, other: &Self) -> Self;
}

/// Writes `elems` comma-separated, or the empty-set marker when there are
/// none. Shared by the `Display` impls of every set- and map-valued lattice.
pub(crate) fn write_elements<T, I>(f: &mut fmt::Formatter<'_>, mut elems: I) -> fmt::Result
where
    T: fmt::Display,
    I: Iterator<Item = T>,
{
    let Some(first) = elems.next() else {
        return f.write_str("∅");
    };
    write!(f, "{first}")?;
    for elem in elems {
        write!(f, ", {elem}")?;
    }
    Ok(())
}

/// An ordered set of variable names.
///
/// The value domain for defined-variables and live-variables analysis.
/// Elements display sorted and comma-separated, with `∅` for the empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarSet(BTreeSet<String>);

impl VarSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable name. Returns `true` if it was not already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    /// Removes a variable name. Returns `true` if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.0.remove(name)
    }

    /// Returns `true` if the set contains `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Returns the number of variables in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the variable names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for VarSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for VarSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

impl MeetSemiLattice for VarSet {
    /// Meet is union (a fact holds if it holds on any incoming path).
    fn meet(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).cloned().collect())
    }
}

impl fmt::Display for VarSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, self.0.iter())
    }
}
