//! Product Handlers

pub(crate) mod get;
pub(crate) mod index;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use storefront_app::domain::{
        collections::records::CollectionId,
        products::records::{ProductId, ProductRecord},
    };

    pub(super) fn make_product(id: i64, title: &str, unit_price: u64) -> ProductRecord {
        ProductRecord {
            id: ProductId::from_i64(id),
            title: title.to_owned(),
            slug: None,
            description: None,
            unit_price,
            inventory: 5,
            last_update: Timestamp::UNIX_EPOCH,
            collection: CollectionId::from_i64(1),
        }
    }
}
