//! Card identity matching.
//!
//! Sockets expose the vendor/product strings read from a card's information
//! structure; drivers match them against a static table of [`ProductId`]
//! entries. Enumeration itself belongs to the socket subsystem — drivers only
//! recognize.

/// A vendor/product string pair identifying a supported card.
#[derive(Debug, Clone, Copy)]
pub struct ProductId {
    /// Vendor identification string.
    pub vendor: &'static str,
    /// Product identification string.
    pub product: &'static str,
    /// CRC hash of the vendor string, as recorded in the card information
    /// structure.
    pub vendor_hash: u32,
    /// CRC hash of the product string.
    pub product_hash: u32,
}

impl ProductId {
    /// Creates an identity entry for a vendor/product pair.
    #[must_use]
    pub const fn new(
        vendor: &'static str,
        product: &'static str,
        vendor_hash: u32,
        product_hash: u32,
    ) -> Self {
        Self {
            vendor,
            product,
            vendor_hash,
            product_hash,
        }
    }

    /// Returns `true` if this entry matches the given identity strings.
    #[must_use]
    pub fn matches(&self, vendor: &str, product: &str) -> bool {
        self.vendor == vendor && self.product == product
    }
}
