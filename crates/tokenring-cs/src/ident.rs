//! Supported card identities.

use pccard_api::ProductId;

/// Vendor/product pairs this driver recognizes.
pub const PRODUCT_IDS: &[ProductId] = &[
    ProductId::new(
        "3Com",
        "TokenLink Velocity PC Card",
        0x4124_0e5b,
        0x82c3_734e,
    ),
    ProductId::new("IBM", "TOKEN RING", 0xb569_a6e5, 0xbf8e_ed47),
];

/// Returns `true` if the given identity strings name a supported card.
#[must_use]
pub fn matches_card(vendor: &str, product: &str) -> bool {
    PRODUCT_IDS.iter().any(|id| id.matches(vendor, product))
}
