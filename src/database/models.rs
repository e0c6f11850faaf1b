pub type ReceiptId = i64;
pub type PurchaseId = i64;
pub type CategoryId = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub id: PurchaseId,
    pub product: String,
    pub price: String,
    pub receipt_id: ReceiptId,
    pub category_id: Option<CategoryId>,
}

// Row shape for the categorized-purchase join; the date stays raw text so the
// caller decides how strictly to parse it.
#[derive(Debug, Clone)]
pub struct CategorizedPurchaseRow {
    pub purchase_id: PurchaseId,
    pub product: String,
    pub price: String,
    pub category_id: Option<CategoryId>,
    pub receipt_date: String,
}

/// A receipt ready to be written, with its line items.
#[derive(Debug, Clone)]
pub struct NewReceipt {
    pub date: String,
    pub amount: String,
    pub purchases: Vec<NewPurchase>,
}

#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub product: String,
    pub price: String,
}
