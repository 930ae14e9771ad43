//! Group and catalog merges.
//!
//! Both merges take the first fragment (by key) as the base document and fold the
//! remaining fragments into it in key order. Field presence is checked explicitly:
//! a fragment without the expected shape fails the merge instead of being skipped.

use super::fragment::{Fragment, FragmentSet};
use crate::error::CatalogError;
use serde_json::Value;

const CATALOG: &str = "catalog";
const ITEMS: &str = "items";

/// Merge a set of group fragments into one Group Document.
///
/// Every fragment after the base contributes its `catalog[0].items[0]`, appended to
/// the base's `catalog[0].items`. A single fragment is returned unchanged.
pub fn merge_groups(set: FragmentSet) -> Result<Value, CatalogError> {
    let (dir, fragments) = set.into_parts();
    let mut fragments = fragments.into_iter();
    let mut base = fragments
        .next()
        .ok_or(CatalogError::EmptyFragmentSet(dir))?;

    let additions = fragments
        .map(|mut fragment| {
            let mut head = take_catalog_head(&mut fragment)?;
            take_first_item(&mut head, &fragment.key)
        })
        .collect::<Result<Vec<_>, _>>()?;
    if additions.is_empty() {
        return Ok(base.document);
    }

    let items = base
        .document
        .pointer_mut("/catalog/0/items")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| missing_field(&base.key, "catalog[0].items"))?;
    items.extend(additions);

    Ok(base.document)
}

/// Merge the top-level fragments into the Catalog Document.
///
/// The base's `catalog` is replaced by the `catalog[0]` of every other fragment, in key
/// order. The base's own catalog entries are discarded, and a base without a `catalog`
/// field gains one.
pub fn merge_catalog(set: FragmentSet) -> Result<Value, CatalogError> {
    let (dir, fragments) = set.into_parts();
    let mut fragments = fragments.into_iter();
    let mut base = fragments
        .next()
        .ok_or(CatalogError::EmptyFragmentSet(dir))?;

    let entries = fragments
        .map(|mut fragment| take_catalog_head(&mut fragment))
        .collect::<Result<Vec<_>, _>>()?;

    let Value::Object(map) = &mut base.document else {
        return Err(CatalogError::NotAnObject(base.key));
    };
    // Replacing an existing key keeps its position in the object
    map.insert(CATALOG.to_string(), Value::Array(entries));

    Ok(base.document)
}

/// Move `catalog[0]` out of a fragment
fn take_catalog_head(fragment: &mut Fragment) -> Result<Value, CatalogError> {
    let catalog = fragment
        .document
        .get_mut(CATALOG)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| missing_field(&fragment.key, CATALOG))?;

    catalog
        .first_mut()
        .map(Value::take)
        .ok_or_else(|| missing_field(&fragment.key, "catalog[0]"))
}

/// Move `items[0]` out of a catalog entry
fn take_first_item(entry: &mut Value, key: &str) -> Result<Value, CatalogError> {
    let items = entry
        .get_mut(ITEMS)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| missing_field(key, "catalog[0].items"))?;

    items
        .first_mut()
        .map(Value::take)
        .ok_or_else(|| missing_field(key, "catalog[0].items[0]"))
}

fn missing_field(fragment: &str, field: &str) -> CatalogError {
    CatalogError::MissingField {
        fragment: fragment.to_string(),
        field: field.to_string(),
    }
}
