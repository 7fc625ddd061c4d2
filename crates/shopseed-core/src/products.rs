use serde::{Deserialize, Serialize};

/// Role marker stored on the bootstrap admin account.
pub const ADMIN_ROLE: &str = "ADMIN";

/// A sample catalog product, as staged by the reconciler and persisted by the
/// upsert writer. `product_name` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub product_name: String,
    pub brand_name: String,
    pub category: String,
    /// Image URLs; never empty for staged products.
    pub product_image: Vec<String>,
    pub description: String,
    pub price: i32,
    pub selling_price: i32,
}

impl NewProduct {
    /// First image URL, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.product_image.first().map(String::as_str)
    }
}

/// A user account to insert. `password` holds an already-hashed credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub profile_pic: Option<String>,
}
