use tienda_core::domain::product::{Product, ProductDraft};

/// Sample catalog used when the data file is missing or unreadable. Ids and
/// timestamps are generated fresh on every seeding.
pub fn sample_products() -> Vec<Product> {
    [
        (
            "Smartphone Samsung Galaxy S23",
            "Teléfono inteligente con pantalla AMOLED de 6.1 pulgadas",
            899.99,
            "Electrónicos",
            15,
            "https://example.com/samsung-s23.jpg",
        ),
        (
            "Laptop MacBook Air M2",
            "Laptop ultradelgada con chip M2 de Apple",
            1299.99,
            "Computadoras",
            8,
            "https://example.com/macbook-air.jpg",
        ),
        (
            "Auriculares Sony WH-1000XM4",
            "Auriculares inalámbricos con cancelación de ruido",
            349.99,
            "Audio",
            25,
            "https://example.com/sony-headphones.jpg",
        ),
        (
            "Smartwatch Apple Watch Series 8",
            "Reloj inteligente con monitoreo de salud avanzado",
            399.99,
            "Wearables",
            12,
            "https://example.com/apple-watch.jpg",
        ),
        (
            "Tablet iPad Air",
            "Tablet con pantalla Liquid Retina de 10.9 pulgadas",
            599.99,
            "Tablets",
            20,
            "https://example.com/ipad-air.jpg",
        ),
    ]
    .into_iter()
    .map(|(name, description, price, category, stock, image_url)| {
        Product::new(ProductDraft {
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            stock,
            image_url: image_url.to_string(),
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::fixtures::sample_products;

    #[test]
    fn sample_catalog_is_valid_and_unique() {
        let products = sample_products();

        assert_eq!(products.len(), 5);
        let ids: HashSet<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), products.len());
        for product in &products {
            assert!(product.is_active);
            assert!(product.validate().is_ok(), "fixture `{}` must validate", product.name);
        }
    }
}
