//! The house menu. The list is fixed at build time and only ever read.

use rust_decimal::Decimal;

use crate::models::{Category, Product};

#[derive(Debug, Clone)]
pub struct MenuCatalog {
    products: Vec<Product>,
}

impl MenuCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn house_menu() -> Self {
        Self::new(vec![
            item(
                "1",
                "Costela Defumada",
                "Costela bovina defumada por 12h, acompanha purê de batata rústica.",
                8990,
                Category::Principal,
                "https://picsum.photos/id/292/400/300",
            ),
            item(
                "2",
                "Burger Industrial",
                "Blend da casa 180g, queijo cheddar inglês, cebola caramelizada no pão brioche.",
                4200,
                Category::Principal,
                "https://picsum.photos/id/163/400/300",
            ),
            item(
                "3",
                "Dadinhos de Tapioca",
                "Cubos de tapioca com queijo coalho, acompanha geleia de pimenta.",
                2800,
                Category::Entrada,
                "https://picsum.photos/id/493/400/300",
            ),
            item(
                "4",
                "Salada Botânica",
                "Mix de folhas, nozes, queijo gorgonzola e molho de mel e mostarda.",
                3600,
                Category::Entrada,
                "https://picsum.photos/id/365/400/300",
            ),
            item(
                "5",
                "Cheesecake de Frutas Vermelhas",
                "Base de biscoito, creme suave de queijo e calda artesanal.",
                2200,
                Category::Sobremesa,
                "https://picsum.photos/id/102/400/300",
            ),
            item(
                "6",
                "Soda Italiana Artesanal",
                "Xarope de frutas feito na casa com água com gás.",
                1400,
                Category::Bebida,
                "https://picsum.photos/id/431/400/300",
            ),
        ])
    }

    /// Products in menu order, optionally restricted to one category.
    pub fn list(&self, category: Option<Category>) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::house_menu()
    }
}

fn item(
    id: &str,
    name: &str,
    description: &str,
    cents: i64,
    category: Category,
    image: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(cents, 2),
        category,
        image: image.to_string(),
    }
}
