//! Read-only type introspection boundary.

use crate::domain::entities::{Member, TypeSymbol};

/// Answers structural questions about named types.
///
/// The tree builder only ever reads through this trait and never caches its
/// answers: a type that appears several times is queried once per appearance.
pub trait Introspect {
    /// Concrete shapes `type_name` resolves to, in declaration order.
    ///
    /// Scalars and unknown names resolve to nothing.
    fn type_symbols(&self, type_name: &str) -> Vec<TypeSymbol>;

    /// Ordered member list of `symbol`, or `None` when the symbol has none.
    fn members(&self, symbol: &TypeSymbol) -> Option<Vec<Member>>;
}

impl<T: Introspect + ?Sized> Introspect for &T {
    fn type_symbols(&self, type_name: &str) -> Vec<TypeSymbol> {
        (**self).type_symbols(type_name)
    }

    fn members(&self, symbol: &TypeSymbol) -> Option<Vec<Member>> {
        (**self).members(symbol)
    }
}
