//! Domain types for the GameHub storefront.
//!
//! Catalog products, cart line items, order snapshots and money.

pub mod cart;
pub mod id;
pub mod lenient;
pub mod order;
pub mod price;
pub mod product;

pub use cart::{Cart, CartLineItem, LineItemImage};
pub use id::ProductId;
pub use order::OrderSnapshot;
pub use price::Money;
pub use product::{Product, ProductImage, UNTITLED};
