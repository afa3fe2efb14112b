//! The five demo products used to seed an empty store.

use crate::models::NewProduct;

fn product(
    name: &str,
    brand: &str,
    category: &str,
    price: f64,
    stock: i64,
    description: &str,
    sku: &str,
) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        brand: brand.to_string(),
        category: category.to_string(),
        price,
        stock,
        description: description.to_string(),
        sku: sku.to_string(),
        active: true,
    }
}

pub fn sample_products() -> Vec<NewProduct> {
    vec![
        product(
            "Laptop Dell XPS 13",
            "Dell",
            "Electrónica",
            1299.99,
            15,
            "Laptop ultraligera de 13 pulgadas con procesador Intel de última generación",
            "DELL-XPS-13-001",
        ),
        product(
            "iPhone 15 Pro",
            "Apple",
            "Celulares",
            999.99,
            20,
            "Smartphone premium con cámara avanzada y chip A17 Pro",
            "APPLE-IP15P-001",
        ),
        product(
            "Samsung Galaxy S24",
            "Samsung",
            "Celulares",
            899.99,
            25,
            "Teléfono Android con pantalla AMOLED 6.1 pulgadas",
            "SAMSUNG-S24-001",
        ),
        product(
            "iPad Pro 12.9",
            "Apple",
            "Tablets",
            1199.99,
            10,
            "Tableta premium con pantalla Liquid Retina XDR",
            "APPLE-IPAD-PRO-001",
        ),
        product(
            "AirPods Pro",
            "Apple",
            "Accesorios",
            249.99,
            50,
            "Auriculares inalámbricos con cancelación de ruido activa",
            "APPLE-AIRPODS-PRO-001",
        ),
    ]
}

/// Names of the sample products, used to remove them again.
pub fn sample_product_names() -> Vec<String> {
    sample_products().into_iter().map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_products_are_active_with_unique_skus() {
        let products = sample_products();
        assert_eq!(products.len(), 5);
        assert!(products.iter().all(|p| p.active && p.stock > 0));

        let skus: HashSet<_> = products.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus.len(), 5);
    }

    #[test]
    fn test_iphone_sample() {
        let iphone = sample_products()
            .into_iter()
            .find(|p| p.name == "iPhone 15 Pro")
            .unwrap();
        assert_eq!(iphone.price, 999.99);
        assert_eq!(iphone.stock, 20);
        assert_eq!(iphone.sku, "APPLE-IP15P-001");
    }

    #[test]
    fn test_sample_product_names() {
        assert_eq!(
            sample_product_names(),
            [
                "Laptop Dell XPS 13",
                "iPhone 15 Pro",
                "Samsung Galaxy S24",
                "iPad Pro 12.9",
                "AirPods Pro"
            ]
        );
    }
}
