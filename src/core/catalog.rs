//! In-memory, insertion-ordered store of export products.

use crate::core::product::{Product, ProductId};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub product: Product,
}

/// The products recorded during one session.
///
/// Nothing is persisted; the catalog is dropped with the session that owns it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    next_id: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a product at the end and returns its id. Duplicates are allowed.
    pub fn append(&mut self, product: Product) -> ProductId {
        self.next_id += 1;
        let id = ProductId::from(self.next_id);
        debug!(%id, name = %product.name, "Appending product");
        self.entries.push(CatalogEntry { id, product });
        id
    }

    /// Removes the product at `index`, shifting later products down.
    ///
    /// Out-of-range indexes are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Product> {
        if index >= self.entries.len() {
            debug!(index, len = self.entries.len(), "Ignoring out-of-range removal");
            return None;
        }
        let entry = self.entries.remove(index);
        debug!(id = %entry.id, index, "Removed product");
        Some(entry.product)
    }

    /// Removes the product with the given id, if it is still present.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        match self.position(id) {
            Some(index) => self.remove_at(index),
            None => {
                debug!(%id, "Ignoring removal of unknown product");
                None
            }
        }
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.product)
    }

    pub fn position(&self, id: ProductId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn list(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.entries.iter().map(|entry| &entry.product)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<Product> for Catalog {
    fn extend<T: IntoIterator<Item = Product>>(&mut self, iter: T) {
        for product in iter {
            self.append(product);
        }
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<T: IntoIterator<Item = Product>>(iter: T) -> Self {
        let mut catalog = Catalog::new();
        catalog.extend(iter);
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(catalog: &Catalog) -> Vec<&str> {
        catalog.products().map(|p| p.name.as_str()).collect()
    }

    fn sample() -> Catalog {
        [
            Product::new("Manzanas", 100, 1.2, "España"),
            Product::new("Peras", 50, 2.5, "Francia"),
            Product::new("Uvas", 10, 3.0, "Perú"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());

        let first = catalog.append(Product::new("Manzanas", 100, 1.2, "España"));
        let second = catalog.append(Product::new("Peras", 50, 2.5, "Francia"));

        assert_eq!(catalog.len(), 2);
        assert_ne!(first, second);
        assert_eq!(names(&catalog), vec!["Manzanas", "Peras"]);
        assert_eq!(catalog.get(second).unwrap().destination, "Francia");
    }

    #[test]
    fn test_append_allows_duplicates() {
        let mut catalog = Catalog::new();
        let product = Product::new("Vino", 6, 12.0, "Japón");
        let a = catalog.append(product.clone());
        let b = catalog.append(product);
        assert_eq!(catalog.len(), 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_at_shifts_later_products() {
        let mut catalog = sample();
        let removed = catalog.remove_at(0).unwrap();
        assert_eq!(removed.name, "Manzanas");
        assert_eq!(names(&catalog), vec!["Peras", "Uvas"]);

        // Position 0 now refers to what used to be position 1.
        assert_eq!(catalog.remove_at(0).unwrap().name, "Peras");
        assert_eq!(names(&catalog), vec!["Uvas"]);
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut catalog = sample();
        assert!(catalog.remove_at(3).is_none());
        assert!(catalog.remove_at(usize::MAX).is_none());
        assert_eq!(catalog.len(), 3);

        let mut empty = Catalog::new();
        assert!(empty.remove_at(0).is_none());
    }

    #[test]
    fn test_remove_by_id_survives_earlier_removals() {
        let mut catalog = sample();
        let uvas = catalog.list()[2].id;

        catalog.remove_at(0);
        assert_eq!(catalog.position(uvas), Some(1));
        assert_eq!(catalog.remove(uvas).unwrap().name, "Uvas");

        // Removing again is a no-op.
        assert!(catalog.remove(uvas).is_none());
        assert_eq!(names(&catalog), vec!["Peras"]);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut catalog = Catalog::new();
        let first = catalog.append(Product::new("A", 1, 1.0, "X"));
        catalog.remove(first);
        let second = catalog.append(Product::new("B", 1, 1.0, "X"));
        assert_ne!(first, second);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Append,
            RemoveAt(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![Just(Op::Append), (0usize..12).prop_map(Op::RemoveAt)]
        }

        proptest! {
            /// Length tracks appends minus successful removals and survivors
            /// keep their relative insertion order.
            #[test]
            fn length_and_order_follow_operations(ops in prop::collection::vec(op(), 0..64)) {
                let mut catalog = Catalog::new();
                let mut model: Vec<u32> = Vec::new();
                let mut appended = 0u32;
                let mut removed = 0usize;

                for op in ops {
                    match op {
                        Op::Append => {
                            catalog.append(Product::new(format!("p{appended}"), appended, 1.0, "X"));
                            model.push(appended);
                            appended += 1;
                        }
                        Op::RemoveAt(index) => {
                            if catalog.remove_at(index).is_some() {
                                model.remove(index);
                                removed += 1;
                            }
                        }
                    }
                }

                prop_assert_eq!(catalog.len(), appended as usize - removed);
                let quantities: Vec<u32> = catalog.products().map(|p| p.quantity).collect();
                prop_assert_eq!(&quantities, &model);
                prop_assert!(quantities.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
