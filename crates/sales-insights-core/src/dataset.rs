//! Dataset merge utilities.

use std::collections::BTreeMap;

#[cfg(feature = "catalog")]
use crate::catalog::CatalogEntry;
#[cfg(feature = "catalog")]
use crate::types::SaleRecord;

/// Left join on an ordered key: every left row paired with the first right
/// row sharing its key, or `None`. Left order and cardinality are preserved;
/// the right side is treated as a unique index.
pub fn left_join<'a, L, R, K, FL, FR>(
    left: &'a [L],
    right: &'a [R],
    left_key: FL,
    right_key: FR,
) -> Vec<(&'a L, Option<&'a R>)>
where
    K: Ord,
    FL: Fn(&L) -> K,
    FR: Fn(&R) -> K,
{
    let mut index: BTreeMap<K, &R> = BTreeMap::new();
    for row in right {
        index.entry(right_key(row)).or_insert(row);
    }
    left.iter()
        .map(|row| (row, index.get(&left_key(row)).copied()))
        .collect()
}

/// Pair each sale with its catalog entry by trimmed product name.
#[cfg(feature = "catalog")]
pub fn attach_catalog<'a>(
    sales: &'a [SaleRecord],
    catalog: &'a [CatalogEntry],
) -> Vec<(&'a SaleRecord, Option<&'a CatalogEntry>)> {
    left_join(
        sales,
        catalog,
        |sale| sale.product_name.trim().to_string(),
        |entry| entry.product_name.trim().to_string(),
    )
}
