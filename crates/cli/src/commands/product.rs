//! Product commands: detail view and delivery estimates.

use chrono::Local;
use marigold_core::ProductId;
use marigold_storefront::api::ApiClient;
use marigold_storefront::catalog::{ProductPage, ProductPhase, delivery};

/// Show a product's details, selection defaults, and optionally a delivery
/// estimate for a pincode.
pub async fn show(
    api: &ApiClient,
    id: &str,
    pincode: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut page = ProductPage::new(ProductId::new(id));
    page.refresh(api).await;

    if let Some(code) = pincode {
        page.set_pincode(code, Local::now().date_naive());
    }

    match page.phase() {
        ProductPhase::NotFound => {
            println!("Product {id} was not found.");
        }
        ProductPhase::Loading => {
            // refresh() always leaves Ready or NotFound
            println!("Product {id} is still loading.");
        }
        ProductPhase::Ready(ready) => {
            let product = &ready.product;
            println!("{} ({})", product.name, product.id);
            println!("  Price: {}", product.price.display());
            println!("  Stock: {}", product.stock_quantity);
            println!("  Sizes: {}", product.sizes.join(", "));
            println!("  Colors: {}", product.colors.join(", "));
            if let Some(material) = &product.material {
                println!("  Material: {material}");
            }
            if !product.description.is_empty() {
                println!("  {}", product.description);
            }

            match ready.cart_gate() {
                None => println!("  Add to cart: available"),
                Some(block) => println!("  Add to cart: {}", block.message()),
            }

            if pincode.is_some() {
                match &ready.delivery {
                    Some(est) => println!(
                        "  Delivery by {} (cash on delivery: {})",
                        est.date, est.cash_on_delivery
                    ),
                    None => println!("  Enter a valid 6-character pincode for an estimate"),
                }
            }
        }
    }
    Ok(())
}

/// Compute a delivery estimate for a pincode without touching the network.
pub fn estimate(pincode: &str) {
    match delivery::estimate(pincode, Local::now().date_naive()) {
        Some(est) => println!(
            "Delivery by {} (cash on delivery: {})",
            est.date, est.cash_on_delivery
        ),
        None => println!("Pincode must be exactly 6 characters"),
    }
}
