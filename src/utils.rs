use fnv::FnvHashSet;

use crate::cells::Coordinate;

/// Collect coordinates into a set. FNV hashing is quicker than the default hasher on keys as
/// small as a coordinate.
pub fn coordinate_set<I>(coords: I) -> FnvHashSet<Coordinate>
    where I: IntoIterator<Item = Coordinate>
{
    let coords = coords.into_iter();
    let mut set = FnvHashSet::with_capacity_and_hasher(coords.size_hint().0, Default::default());
    set.extend(coords);
    set
}
