use std::cmp::Ordering;

/// Direction of an ordering.
///
/// For [RankTree](crate::RankTree) it decides which end of the key order
/// is rank 1: the smallest key for `Ascending`, the largest key for
/// `Descending`. For composite keys it decides how a single field takes
/// part in the lexicographic comparison.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Order {
    Ascending,
    Descending,
}

impl Default for Order {
    fn default() -> Order {
        Order::Ascending
    }
}

impl Order {
    /// Apply this direction to a comparison done in natural order.
    #[inline]
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Order::Ascending => ord,
            Order::Descending => ord.reverse(),
        }
    }

    /// Compare `a` with `b` in this direction.
    #[inline]
    pub fn cmp<T: Ord + ?Sized>(self, a: &T, b: &T) -> Ordering {
        self.apply(a.cmp(b))
    }
}
