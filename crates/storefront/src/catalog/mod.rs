//! Product detail page controller.
//!
//! # Architecture
//!
//! One [`ProductPage`] per mounted product view. The page moves through
//! `Loading -> Ready | NotFound`; selection fields (size, color, quantity,
//! image index) live inside `Ready` and move independently. Changing the
//! product id re-enters `Loading` and resets every selection.
//!
//! Fetches are tagged with a generation counter. A response is only applied
//! when its generation is still the latest, so a slow response for an old
//! product id can never overwrite the state of a newer one.

pub mod delivery;

use chrono::NaiveDate;
use marigold_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, DataEnvelope, Endpoint, Result};
use crate::cart::{Cart, CollaboratorError, Wishlist, cart_line, wishlist_entry};

pub use delivery::{DeliveryEstimate, estimate};

/// How long the wishlist button animates after a toggle. Presentation only.
pub const WISHLIST_ANIMATION: std::time::Duration = std::time::Duration::from_millis(300);

/// A catalog product as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Denormalized availability flag carried on the wire.
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
}

impl Product {
    /// Whether the product cannot currently be added to a cart.
    #[must_use]
    pub const fn out_of_stock(&self) -> bool {
        self.stock_quantity == 0
    }
}

/// The shopper's current choices on a product page.
///
/// Reset whenever the underlying product changes; mutated only by explicit
/// actions (chip click, stepper, thumbnail click).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub size: Option<String>,
    pub color: Option<String>,
    /// Always at least 1.
    pub quantity: u32,
    /// Bounded to `[0, images.len())`.
    pub image_index: usize,
}

impl Selection {
    /// Initial selection for a freshly loaded product: first size and color
    /// when available, quantity 1, first image.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        Self {
            size: product.sizes.first().cloned(),
            color: product.colors.first().cloned(),
            quantity: 1,
            image_index: 0,
        }
    }
}

/// Why the add-to-cart control is disabled.
///
/// The variants are ordered by display precedence: a missing size is
/// reported before a missing color, which is reported before stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartBlock {
    SizeNotSelected,
    ColorNotSelected,
    OutOfStock,
}

impl CartBlock {
    /// The message shown next to the disabled control.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::SizeNotSelected => "Please select a size",
            Self::ColorNotSelected => "Please select a color",
            Self::OutOfStock => "Out of stock",
        }
    }
}

/// Failure modes of the add-to-cart action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddToCartError {
    /// The page is not in the `Ready` phase.
    #[error("product is not loaded")]
    NotReady,

    /// A required selection is missing or the product is out of stock.
    #[error("{}", .0.message())]
    Blocked(CartBlock),

    /// The cart collaborator rejected the mutation.
    #[error("cart error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

/// Direction of a wishlist toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistChange {
    Added,
    Removed,
}

/// Loaded product state plus everything the shopper has touched.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyProduct {
    pub product: Product,
    pub selection: Selection,
    /// Raw pincode input, kept verbatim so partial input survives.
    pub pincode: String,
    /// Present only while the pincode is exactly six characters.
    pub delivery: Option<DeliveryEstimate>,
    /// Transient presentation flag; cleared via `finish_wishlist_animation`.
    pub wishlist_animating: bool,
}

impl ReadyProduct {
    fn new(product: Product) -> Self {
        Self {
            selection: Selection::for_product(&product),
            product,
            pincode: String::new(),
            delivery: None,
            wishlist_animating: false,
        }
    }

    /// The selected size and color once the gate passes, or the blocking
    /// reason.
    ///
    /// Precedence is fixed: missing size, then missing color, then stock.
    fn checkout_selection(&self) -> std::result::Result<(&str, &str), CartBlock> {
        let Some(size) = self.selection.size.as_deref() else {
            return Err(CartBlock::SizeNotSelected);
        };
        let Some(color) = self.selection.color.as_deref() else {
            return Err(CartBlock::ColorNotSelected);
        };
        if self.product.out_of_stock() {
            return Err(CartBlock::OutOfStock);
        }
        Ok((size, color))
    }

    /// The reason add-to-cart is disabled, or `None` when it is enabled.
    #[must_use]
    pub fn cart_gate(&self) -> Option<CartBlock> {
        self.checkout_selection().err()
    }

    /// The currently displayed image, if the product has any.
    #[must_use]
    pub fn main_image(&self) -> Option<&str> {
        self.product
            .images
            .get(self.selection.image_index)
            .map(String::as_str)
    }

    /// Image navigation is only offered with two or more images.
    #[must_use]
    pub fn can_navigate_images(&self) -> bool {
        self.product.images.len() > 1
    }
}

/// Lifecycle of a mounted product page.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductPhase {
    /// Fetch in flight.
    Loading,
    /// Product loaded; selection fields are live.
    Ready(ReadyProduct),
    /// The backend had no product for this id (or the fetch failed).
    NotFound,
}

/// Backend operations the product page needs.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    /// Fetch a product detail payload. `Ok(None)` means the backend answered
    /// with an empty data payload.
    async fn fetch_product(&self, id: &ProductId) -> Result<Option<Product>>;
}

impl CatalogApi for ApiClient {
    async fn fetch_product(&self, id: &ProductId) -> Result<Option<Product>> {
        let envelope: DataEnvelope<Option<Product>> = self.get_json(Endpoint::Product(id)).await?;
        Ok(envelope.data)
    }
}

impl ApiClient {
    /// Fetch a product, treating an absent payload as a hard error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the backend has no such product,
    /// or any normalized transport/server error.
    pub async fn product(&self, id: &ProductId) -> Result<Product> {
        self.fetch_product(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }
}

/// Interaction controller for one product detail page.
#[derive(Debug)]
pub struct ProductPage {
    product_id: ProductId,
    generation: u64,
    phase: ProductPhase,
}

impl ProductPage {
    /// Create a page for a product id, in the `Loading` phase.
    #[must_use]
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            generation: 0,
            phase: ProductPhase::Loading,
        }
    }

    /// The product this page is showing.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> &ProductPhase {
        &self.phase
    }

    /// The ready state, when loaded.
    #[must_use]
    pub fn ready(&self) -> Option<&ReadyProduct> {
        match &self.phase {
            ProductPhase::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    fn ready_mut(&mut self) -> Option<&mut ReadyProduct> {
        match &mut self.phase {
            ProductPhase::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    /// Point the page at a different product, discarding all selections.
    pub fn set_product(&mut self, product_id: ProductId) {
        if product_id == self.product_id {
            return;
        }
        self.product_id = product_id;
        self.phase = ProductPhase::Loading;
    }

    /// Start a fetch: re-enter `Loading` and claim the next generation.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.phase = ProductPhase::Loading;
        self.generation
    }

    /// Apply a fetch result, unless a newer fetch has started since.
    ///
    /// Stale generations are dropped without touching state. An error or an
    /// empty payload lands in `NotFound`.
    pub fn apply_loaded(&mut self, generation: u64, result: Result<Option<Product>>) {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "dropping stale product response"
            );
            return;
        }

        self.phase = match result {
            Ok(Some(product)) => ProductPhase::Ready(ReadyProduct::new(product)),
            Ok(None) => ProductPhase::NotFound,
            Err(e) => {
                warn!(product_id = %self.product_id, error = %e.message(), "product fetch failed");
                ProductPhase::NotFound
            }
        };
    }

    /// Fetch the product and apply the result.
    pub async fn refresh<A: CatalogApi>(&mut self, api: &A) {
        let generation = self.begin_load();
        let product_id = self.product_id.clone();
        let result = api.fetch_product(&product_id).await;
        self.apply_loaded(generation, result);
    }

    /// Select a size chip. Ignored unless the product offers that size.
    pub fn select_size(&mut self, size: &str) {
        if let Some(ready) = self.ready_mut()
            && ready.product.sizes.iter().any(|s| s == size)
        {
            ready.selection.size = Some(size.to_string());
        }
    }

    /// Select a color chip. Ignored unless the product offers that color.
    pub fn select_color(&mut self, color: &str) {
        if let Some(ready) = self.ready_mut()
            && ready.product.colors.iter().any(|c| c == color)
        {
            ready.selection.color = Some(color.to_string());
        }
    }

    /// Step the quantity up. No upper bound here; checkout validates against
    /// stock downstream.
    pub fn increment_quantity(&mut self) {
        if let Some(ready) = self.ready_mut() {
            ready.selection.quantity += 1;
        }
    }

    /// Step the quantity down, clamped at 1.
    pub fn decrement_quantity(&mut self) {
        if let Some(ready) = self.ready_mut()
            && ready.selection.quantity > 1
        {
            ready.selection.quantity -= 1;
        }
    }

    /// Advance to the next image, wrapping past the end.
    pub fn next_image(&mut self) {
        if let Some(ready) = self.ready_mut() {
            let len = ready.product.images.len();
            if len > 1 {
                ready.selection.image_index = (ready.selection.image_index + 1) % len;
            }
        }
    }

    /// Step back to the previous image, wrapping past the start.
    pub fn previous_image(&mut self) {
        if let Some(ready) = self.ready_mut() {
            let len = ready.product.images.len();
            if len > 1 {
                ready.selection.image_index = (ready.selection.image_index + len - 1) % len;
            }
        }
    }

    /// Record pincode input and recompute the delivery estimate.
    ///
    /// Anything other than a six-character code clears the estimate.
    pub fn set_pincode(&mut self, code: &str, today: NaiveDate) {
        if let Some(ready) = self.ready_mut() {
            ready.pincode = code.to_string();
            ready.delivery = delivery::estimate(code, today);
        }
    }

    /// Add the current selection to the cart.
    ///
    /// Builds a denormalized line item and delegates to the cart
    /// collaborator. `Ok` means the caller should navigate to the cart view;
    /// a collaborator failure is surfaced, not swallowed, and blocks that
    /// navigation.
    ///
    /// # Errors
    ///
    /// Returns [`AddToCartError`] when the page is not ready, the gate is
    /// closed, or the collaborator rejects the mutation.
    pub async fn add_to_cart<C: Cart>(
        &self,
        cart: &C,
        media_origin: &str,
    ) -> std::result::Result<(), AddToCartError> {
        let ProductPhase::Ready(ready) = &self.phase else {
            return Err(AddToCartError::NotReady);
        };
        let (size, color) = ready
            .checkout_selection()
            .map_err(AddToCartError::Blocked)?;

        let line = cart_line(&ready.product, media_origin);
        cart.add_to_cart(
            line,
            ready.selection.quantity,
            size.to_string(),
            color.to_string(),
        )
        .await?;
        Ok(())
    }

    /// Toggle wishlist membership for this product.
    ///
    /// Starts the transient button animation; call
    /// [`finish_wishlist_animation`](Self::finish_wishlist_animation) after
    /// [`WISHLIST_ANIMATION`] to clear it.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's error when the mutation fails; the page is
    /// not ready errors map to [`CollaboratorError`] with a fixed message.
    pub async fn toggle_wishlist<W: Wishlist>(
        &mut self,
        wishlist: &W,
        media_origin: &str,
    ) -> std::result::Result<WishlistChange, CollaboratorError> {
        let ProductPhase::Ready(ready) = &mut self.phase else {
            return Err(CollaboratorError("product is not loaded".to_string()));
        };

        ready.wishlist_animating = true;

        let change = if wishlist.is_in_wishlist(&ready.product.id).await {
            wishlist.remove_from_wishlist(&ready.product.id).await?;
            WishlistChange::Removed
        } else {
            wishlist
                .add_to_wishlist(wishlist_entry(&ready.product, media_origin))
                .await?;
            WishlistChange::Added
        };

        Ok(change)
    }

    /// Clear the transient wishlist animation flag.
    pub fn finish_wishlist_animation(&mut self) {
        if let Some(ready) = self.ready_mut() {
            ready.wishlist_animating = false;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::{MemoryCart, MemoryWishlist};
    use rust_decimal::Decimal;

    fn kurta() -> Product {
        Product {
            id: ProductId::new("p-1"),
            name: "Linen Kurta".to_string(),
            price: Price::new(Decimal::new(149_900, 2)),
            in_stock: true,
            stock_quantity: 5,
            images: vec![
                "https://media.marigold.shop/uploads/kurta-front.jpg".to_string(),
                "kurta-back.jpg".to_string(),
                "kurta-detail.jpg".to_string(),
            ],
            sizes: vec!["S".to_string(), "M".to_string()],
            colors: vec!["Black".to_string()],
            description: "A linen kurta.".to_string(),
            material: Some("Linen".to_string()),
            category: Some("Women".to_string()),
            sub_category: Some("Kurtas".to_string()),
            collection: None,
        }
    }

    fn loaded_page(product: Product) -> ProductPage {
        let mut page = ProductPage::new(product.id.clone());
        let generation = page.begin_load();
        page.apply_loaded(generation, Ok(Some(product)));
        page
    }

    struct FakeCatalog {
        product: Option<Product>,
    }

    impl CatalogApi for FakeCatalog {
        async fn fetch_product(&self, _id: &ProductId) -> Result<Option<Product>> {
            Ok(self.product.clone())
        }
    }

    #[test]
    fn test_initial_selection_takes_first_entries() {
        let page = loaded_page(kurta());
        let ready = page.ready().unwrap();

        assert_eq!(ready.selection.size.as_deref(), Some("S"));
        assert_eq!(ready.selection.color.as_deref(), Some("Black"));
        assert_eq!(ready.selection.quantity, 1);
        assert!(ready.cart_gate().is_none());
    }

    #[test]
    fn test_empty_payload_enters_not_found() {
        let mut page = ProductPage::new(ProductId::new("p-404"));
        let generation = page.begin_load();
        page.apply_loaded(generation, Ok(None));
        assert_eq!(page.phase(), &ProductPhase::NotFound);
    }

    #[test]
    fn test_fetch_error_enters_not_found() {
        let mut page = ProductPage::new(ProductId::new("p-1"));
        let generation = page.begin_load();
        page.apply_loaded(
            generation,
            Err(ApiError::Server {
                status: 500,
                message: String::new(),
                body: String::new(),
            }),
        );
        assert_eq!(page.phase(), &ProductPhase::NotFound);
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let mut page = ProductPage::new(ProductId::new("p-1"));
        let old_generation = page.begin_load();
        let _new_generation = page.begin_load();

        page.apply_loaded(old_generation, Ok(Some(kurta())));
        assert_eq!(page.phase(), &ProductPhase::Loading);
    }

    #[test]
    fn test_gate_precedence_size_then_color_then_stock() {
        let mut product = kurta();
        product.sizes.clear();
        product.colors.clear();
        product.stock_quantity = 0;
        let page = loaded_page(product);
        assert_eq!(
            page.ready().unwrap().cart_gate(),
            Some(CartBlock::SizeNotSelected)
        );

        let mut product = kurta();
        product.colors.clear();
        product.stock_quantity = 0;
        let page = loaded_page(product);
        assert_eq!(
            page.ready().unwrap().cart_gate(),
            Some(CartBlock::ColorNotSelected)
        );

        let mut product = kurta();
        product.stock_quantity = 0;
        let page = loaded_page(product);
        assert_eq!(page.ready().unwrap().cart_gate(), Some(CartBlock::OutOfStock));
    }

    #[test]
    fn test_gate_messages() {
        assert_eq!(CartBlock::SizeNotSelected.message(), "Please select a size");
        assert_eq!(
            CartBlock::ColorNotSelected.message(),
            "Please select a color"
        );
        assert_eq!(CartBlock::OutOfStock.message(), "Out of stock");
    }

    #[test]
    fn test_select_rejects_unoffered_variant() {
        let mut page = loaded_page(kurta());
        page.select_size("XXL");
        page.select_color("Chartreuse");

        let ready = page.ready().unwrap();
        assert_eq!(ready.selection.size.as_deref(), Some("S"));
        assert_eq!(ready.selection.color.as_deref(), Some("Black"));

        page.select_size("M");
        assert_eq!(page.ready().unwrap().selection.size.as_deref(), Some("M"));
    }

    #[test]
    fn test_quantity_never_drops_below_one() {
        let mut page = loaded_page(kurta());
        page.increment_quantity();
        page.increment_quantity();
        assert_eq!(page.ready().unwrap().selection.quantity, 3);

        for _ in 0..10 {
            page.decrement_quantity();
        }
        assert_eq!(page.ready().unwrap().selection.quantity, 1);
    }

    #[test]
    fn test_image_navigation_wraps() {
        let mut page = loaded_page(kurta());
        assert!(page.ready().unwrap().can_navigate_images());

        page.previous_image();
        assert_eq!(page.ready().unwrap().selection.image_index, 2);

        page.next_image();
        assert_eq!(page.ready().unwrap().selection.image_index, 0);

        page.next_image();
        page.next_image();
        page.next_image();
        assert_eq!(page.ready().unwrap().selection.image_index, 0);
    }

    #[test]
    fn test_single_image_disables_navigation() {
        let mut product = kurta();
        product.images.truncate(1);
        let mut page = loaded_page(product);

        assert!(!page.ready().unwrap().can_navigate_images());
        page.next_image();
        assert_eq!(page.ready().unwrap().selection.image_index, 0);
    }

    #[test]
    fn test_set_product_resets_to_loading() {
        let mut page = loaded_page(kurta());
        page.set_product(ProductId::new("p-2"));
        assert_eq!(page.phase(), &ProductPhase::Loading);
        assert_eq!(page.product_id(), &ProductId::new("p-2"));

        // Same id is a no-op
        let mut page = loaded_page(kurta());
        page.set_product(ProductId::new("p-1"));
        assert!(page.ready().is_some());
    }

    #[test]
    fn test_pincode_gates_estimate() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let mut page = loaded_page(kurta());

        page.set_pincode("1100", today);
        assert!(page.ready().unwrap().delivery.is_none());

        page.set_pincode("110001", today);
        let ready = page.ready().unwrap();
        assert_eq!(ready.pincode, "110001");
        assert_eq!(ready.delivery.as_ref().unwrap().date, "3 Sep 2026");

        // Editing back to a partial code clears the estimate
        page.set_pincode("11000", today);
        assert!(page.ready().unwrap().delivery.is_none());
    }

    #[tokio::test]
    async fn test_refresh_loads_product() {
        let api = FakeCatalog {
            product: Some(kurta()),
        };
        let mut page = ProductPage::new(ProductId::new("p-1"));
        page.refresh(&api).await;
        assert!(page.ready().is_some());

        let api = FakeCatalog { product: None };
        let mut page = ProductPage::new(ProductId::new("p-404"));
        page.refresh(&api).await;
        assert_eq!(page.phase(), &ProductPhase::NotFound);
    }

    #[tokio::test]
    async fn test_add_to_cart_denormalizes_line() {
        let cart = MemoryCart::default();
        let page = loaded_page(kurta());

        page.add_to_cart(&cart, "https://media.marigold.shop")
            .await
            .expect("add to cart");

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        let stored = &lines[0];
        assert_eq!(stored.line.product_id, ProductId::new("p-1"));
        assert_eq!(stored.line.name, "Linen Kurta");
        // Same-origin image reduced to a bare filename
        assert_eq!(stored.line.image, "kurta-front.jpg");
        assert_eq!(stored.quantity, 1);
        assert_eq!(stored.size, "S");
        assert_eq!(stored.color, "Black");
    }

    #[tokio::test]
    async fn test_add_to_cart_carries_chosen_variant() {
        let cart = MemoryCart::default();
        let mut page = loaded_page(kurta());
        page.select_size("M");
        page.increment_quantity();

        page.add_to_cart(&cart, "https://media.marigold.shop")
            .await
            .expect("add to cart");

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].size, "M");
        assert_eq!(lines[0].color, "Black");
        assert_eq!(lines[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_add_to_cart_blocked_when_out_of_stock() {
        let cart = MemoryCart::default();
        let mut product = kurta();
        product.stock_quantity = 0;
        let page = loaded_page(product);

        let result = page.add_to_cart(&cart, "https://media.marigold.shop").await;
        assert_eq!(result, Err(AddToCartError::Blocked(CartBlock::OutOfStock)));
        assert!(cart.lines().is_empty());
    }

    #[tokio::test]
    async fn test_add_to_cart_requires_ready_phase() {
        let cart = MemoryCart::default();
        let page = ProductPage::new(ProductId::new("p-1"));
        let result = page.add_to_cart(&cart, "https://media.marigold.shop").await;
        assert_eq!(result, Err(AddToCartError::NotReady));
    }

    #[tokio::test]
    async fn test_wishlist_toggle_round_trip() {
        let wishlist = MemoryWishlist::default();
        let mut page = loaded_page(kurta());
        let origin = "https://media.marigold.shop";

        let change = page.toggle_wishlist(&wishlist, origin).await.unwrap();
        assert_eq!(change, WishlistChange::Added);
        assert!(page.ready().unwrap().wishlist_animating);
        assert_eq!(wishlist.entries().len(), 1);

        page.finish_wishlist_animation();
        assert!(!page.ready().unwrap().wishlist_animating);

        let change = page.toggle_wishlist(&wishlist, origin).await.unwrap();
        assert_eq!(change, WishlistChange::Removed);
        assert!(wishlist.entries().is_empty());
    }

    #[test]
    fn test_product_deserializes_from_backend_shape() {
        let json = r#"{
            "id": "p-7",
            "name": "Silk Scarf",
            "price": 899.5,
            "inStock": true,
            "stockQuantity": 12,
            "images": ["scarf.jpg"],
            "sizes": ["One Size"],
            "colors": ["Teal", "Rust"],
            "description": "A silk scarf.",
            "subCategory": "Accessories"
        }"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.id, ProductId::new("p-7"));
        assert_eq!(product.stock_quantity, 12);
        assert_eq!(product.sub_category.as_deref(), Some("Accessories"));
        assert!(product.material.is_none());
        assert!(!product.out_of_stock());
    }
}
